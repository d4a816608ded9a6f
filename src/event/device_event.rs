// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device event types.

use chrono::{DateTime, Utc};

use crate::device::{Device, DeviceId};
use crate::state::DeviceState;

/// The channel an update arrived through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpdateSource {
    /// A pull snapshot requested by the session loop.
    Pull,
    /// A delta delivered by the push stream.
    Push,
}

/// Events emitted while a session runs.
///
/// Device events carry the identifier of the device they concern; session
/// events (stream and credential changes) carry none.
///
/// # Examples
///
/// ```
/// use systemair_lib::event::DeviceEvent;
/// use systemair_lib::DeviceId;
///
/// let event = DeviceEvent::UnknownDevice {
///     device_id: DeviceId::new("IAM_X"),
/// };
/// assert_eq!(event.device_id().map(DeviceId::as_str), Some("IAM_X"));
/// assert!(!event.is_state_change());
/// ```
#[derive(Debug, Clone)]
pub enum DeviceEvent {
    /// A device was found during discovery.
    DeviceDiscovered {
        /// The discovered device.
        device: Device,
    },

    /// A device state changed.
    StateChanged {
        /// The ID of the device.
        device_id: DeviceId,
        /// The channel the update arrived through.
        source: UpdateSource,
        /// The complete new state of the device.
        state: Box<DeviceState>,
    },

    /// The push stream is connected.
    StreamConnected,

    /// The push stream was lost or closed.
    StreamDisconnected {
        /// Error message if the loss was due to an error.
        error: Option<String>,
    },

    /// A new credential was acquired by login or refresh.
    CredentialRotated {
        /// Expiry of the new access token.
        expiry: DateTime<Utc>,
    },

    /// A push delta for an unregistered device was discarded.
    UnknownDevice {
        /// The identifier carried by the delta.
        device_id: DeviceId,
    },
}

impl DeviceEvent {
    /// Returns the device ID associated with this event, if any.
    #[must_use]
    pub fn device_id(&self) -> Option<&DeviceId> {
        match self {
            Self::DeviceDiscovered { device } => Some(device.id()),
            Self::StateChanged { device_id, .. } | Self::UnknownDevice { device_id } => {
                Some(device_id)
            }
            Self::StreamConnected
            | Self::StreamDisconnected { .. }
            | Self::CredentialRotated { .. } => None,
        }
    }

    /// Returns `true` if this is a state change event.
    #[must_use]
    pub fn is_state_change(&self) -> bool {
        matches!(self, Self::StateChanged { .. })
    }

    /// Returns `true` if this is a stream connection event.
    #[must_use]
    pub fn is_stream(&self) -> bool {
        matches!(
            self,
            Self::StreamConnected | Self::StreamDisconnected { .. }
        )
    }

    /// Creates a state changed event.
    #[must_use]
    pub fn state_changed(source: UpdateSource, state: DeviceState) -> Self {
        Self::StateChanged {
            device_id: state.device_id().clone(),
            source,
            state: Box::new(state),
        }
    }

    /// Creates a stream disconnected event.
    #[must_use]
    pub fn stream_disconnected(error: Option<String>) -> Self {
        Self::StreamDisconnected { error }
    }
}
