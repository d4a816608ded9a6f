// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fan-out of session events.

use tokio::sync::broadcast;

use super::DeviceEvent;

/// Events buffered per subscriber before the oldest are dropped.
const CAPACITY: usize = 256;

/// Broadcasts [`DeviceEvent`]s to every subscriber.
///
/// Handles are cheap to clone and all feed the same channel: the reconciler,
/// the stream supervisor and the session each hold one.
///
/// A subscriber that falls more than the capacity behind skips the oldest
/// events and gets `RecvError::Lagged` once. Device state is never lost that
/// way, since [`DeviceRegistry::snapshot`](crate::DeviceRegistry::snapshot)
/// always holds the merged result.
///
/// # Examples
///
/// ```
/// use systemair_lib::event::{DeviceEvent, EventBus};
///
/// let bus = EventBus::new();
/// let mut rx = bus.subscribe();
///
/// assert_eq!(bus.publish(DeviceEvent::StreamConnected), 1);
/// assert!(matches!(rx.try_recv().unwrap(), DeviceEvent::StreamConnected));
/// ```
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<DeviceEvent>,
}

impl EventBus {
    /// Creates a bus buffering up to 256 events per subscriber.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(CAPACITY)
    }

    /// Creates a bus with a custom per-subscriber buffer.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Returns a receiver for the events published from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<DeviceEvent> {
        self.sender.subscribe()
    }

    /// Returns the number of live receivers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Publishes an event; returns how many receivers got it.
    ///
    /// Publishing without subscribers is not an error.
    #[allow(clippy::must_use_candidate)]
    pub fn publish(&self, event: DeviceEvent) -> usize {
        self.sender.send(event).unwrap_or_else(|broadcast::error::SendError(event)| {
            tracing::trace!(?event, "No subscriber for event");
            0
        })
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{Device, DeviceId};
    use crate::event::UpdateSource;
    use crate::state::DeviceState;

    #[test]
    fn receivers_are_counted() {
        let bus = EventBus::new();
        let first = bus.subscribe();
        let _second = bus.clone().subscribe();
        assert_eq!(bus.subscriber_count(), 2);

        drop(first);
        assert_eq!(bus.subscriber_count(), 1);
    }

    #[tokio::test]
    async fn every_subscriber_sees_discovery() {
        let bus = EventBus::new();
        let mut receivers = [bus.subscribe(), bus.subscribe()];

        let delivered = bus.publish(DeviceEvent::DeviceDiscovered {
            device: Device::new("IAM_1", "Hall"),
        });
        assert_eq!(delivered, 2);

        for rx in &mut receivers {
            let event = rx.recv().await.unwrap();
            assert_eq!(event.device_id().unwrap().as_str(), "IAM_1");
        }
    }

    #[test]
    fn publishing_without_subscribers_is_dropped() {
        let bus = EventBus::new();
        let state = DeviceState::new(DeviceId::new("IAM_1"));
        assert_eq!(bus.publish(DeviceEvent::state_changed(UpdateSource::Push, state)), 0);
    }

    #[test]
    fn slow_subscriber_lags() {
        let bus = EventBus::with_capacity(2);
        let mut rx = bus.subscribe();
        for _ in 0..3 {
            bus.publish(DeviceEvent::StreamConnected);
        }

        assert!(matches!(
            rx.try_recv(),
            Err(broadcast::error::TryRecvError::Lagged(1))
        ));
    }
}
