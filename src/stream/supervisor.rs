// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Lifecycle of the push connection.

use futures::StreamExt;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::envelope::parse_frame;
use super::transport::{FrameStream, Transport};
use crate::error::StreamError;
use crate::event::{DeviceEvent, EventBus};
use crate::state::StateReconciler;

/// Frames buffered between the connection and the reconciler.
const FRAME_BUFFER: usize = 64;

/// Connection state of the push stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamState {
    /// No connection is open.
    Disconnected,
    /// A connection is being opened.
    Connecting,
    /// Frames are being received and applied.
    Streaming,
}

struct Connection {
    cancel: CancellationToken,
    reader: JoinHandle<()>,
    applier: JoinHandle<()>,
}

/// Owns the push connection and feeds its deltas to the reconciler.
///
/// A connection runs as two tasks joined by a channel: a reader that pulls
/// frames off the transport, and an applier that parses each frame and
/// applies it with [`StateReconciler::apply_push`]. A malformed frame is
/// logged and skipped; it never closes the connection.
///
/// When the transport fails or closes, the supervisor falls back to
/// [`StreamState::Disconnected`] and publishes
/// [`DeviceEvent::StreamDisconnected`]; reconnecting is up to the caller.
pub struct StreamSupervisor<T> {
    transport: T,
    reconciler: StateReconciler,
    events: EventBus,
    state: watch::Sender<StreamState>,
    connection: Option<Connection>,
}

impl<T> std::fmt::Debug for StreamSupervisor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamSupervisor")
            .field("state", &*self.state.borrow())
            .field("connected", &self.connection.is_some())
            .finish_non_exhaustive()
    }
}

impl<T: Transport> StreamSupervisor<T> {
    /// Creates a disconnected supervisor.
    #[must_use]
    pub fn new(transport: T, reconciler: StateReconciler, events: EventBus) -> Self {
        let (state, _) = watch::channel(StreamState::Disconnected);
        Self {
            transport,
            reconciler,
            events,
            state,
            connection: None,
        }
    }

    /// Returns the current connection state.
    #[must_use]
    pub fn state(&self) -> StreamState {
        *self.state.borrow()
    }

    /// Returns `true` while frames are being received.
    #[must_use]
    pub fn is_streaming(&self) -> bool {
        self.state() == StreamState::Streaming
    }

    /// Subscribes to connection state changes.
    #[must_use]
    pub fn watch_state(&self) -> watch::Receiver<StreamState> {
        self.state.subscribe()
    }

    /// Opens a connection authenticated with `access_token`.
    ///
    /// Any previous connection is torn down first.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError`] if the connection cannot be opened; the
    /// supervisor is then [`StreamState::Disconnected`].
    pub async fn connect(&mut self, access_token: &str) -> Result<(), StreamError> {
        self.disconnect().await;

        self.state.send_replace(StreamState::Connecting);
        let frames = match self.transport.open(access_token).await {
            Ok(frames) => frames,
            Err(e) => {
                tracing::warn!(error = %e, "Push connection failed");
                self.state.send_replace(StreamState::Disconnected);
                return Err(e);
            }
        };

        let cancel = CancellationToken::new();
        let (tx, rx) = mpsc::channel(FRAME_BUFFER);
        self.state.send_replace(StreamState::Streaming);
        tracing::info!("Push stream connected");
        self.events.publish(DeviceEvent::StreamConnected);

        let reader = tokio::spawn(read_frames(
            frames,
            tx,
            cancel.clone(),
            self.state.clone(),
            self.events.clone(),
        ));
        let applier = tokio::spawn(apply_frames(rx, self.reconciler.clone()));

        self.connection = Some(Connection {
            cancel,
            reader,
            applier,
        });
        Ok(())
    }

    /// Closes the connection, if any.
    ///
    /// Returns once both connection tasks have finished. Calling this while
    /// already disconnected is a no-op.
    pub async fn disconnect(&mut self) {
        let Some(connection) = self.connection.take() else {
            self.state.send_replace(StreamState::Disconnected);
            return;
        };

        connection.cancel.cancel();
        for (task, handle) in [("reader", connection.reader), ("applier", connection.applier)] {
            if let Err(e) = handle.await {
                tracing::warn!(task, error = %e, "Push stream task ended abnormally");
            }
        }

        let previous = self.state.send_replace(StreamState::Disconnected);
        if previous == StreamState::Streaming {
            tracing::info!("Push stream disconnected");
            self.events.publish(DeviceEvent::stream_disconnected(None));
        }
    }
}

/// Dropping a connected supervisor cancels and aborts both connection tasks,
/// which releases the transport without waiting on them.
impl<T> Drop for StreamSupervisor<T> {
    fn drop(&mut self) {
        if let Some(connection) = self.connection.take() {
            connection.cancel.cancel();
            connection.reader.abort();
            connection.applier.abort();
        }
    }
}

/// Forwards frames until cancelled or the connection ends.
async fn read_frames(
    mut frames: FrameStream,
    tx: mpsc::Sender<String>,
    cancel: CancellationToken,
    state: watch::Sender<StreamState>,
    events: EventBus,
) {
    let error = loop {
        tokio::select! {
            () = cancel.cancelled() => return,
            frame = frames.next() => match frame {
                Some(Ok(text)) => {
                    if tx.send(text).await.is_err() {
                        return;
                    }
                }
                Some(Err(e)) => break Some(e.to_string()),
                None => break None,
            },
        }
    };

    match &error {
        Some(e) => tracing::warn!(error = %e, "Push stream lost"),
        None => tracing::info!("Push stream closed by peer"),
    }
    state.send_replace(StreamState::Disconnected);
    events.publish(DeviceEvent::stream_disconnected(error));
}

/// Applies frames in arrival order until the reader is gone.
async fn apply_frames(mut rx: mpsc::Receiver<String>, reconciler: StateReconciler) {
    while let Some(text) = rx.recv().await {
        match parse_frame(&text) {
            Ok(Some(delta)) => match reconciler.apply_push(&delta) {
                Ok(changed) => {
                    tracing::trace!(device_id = %delta.device_id, changed, "Push delta applied");
                }
                Err(warning) => tracing::debug!(%warning, "Push delta dropped"),
            },
            Ok(None) => tracing::debug!("Ignoring non-status frame"),
            Err(e) => tracing::warn!(error = %e, "Discarding malformed push frame"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use std::time::Duration;

    use futures::stream;
    use tokio::sync::oneshot;

    use super::*;
    use crate::device::{Device, DeviceId, DeviceRegistry};

    /// Replays a fixed list of frames, then stays open.
    struct ScriptedTransport {
        frames: Vec<Result<String, StreamError>>,
        stay_open: bool,
    }

    impl Transport for ScriptedTransport {
        async fn open(&self, _access_token: &str) -> Result<FrameStream, StreamError> {
            let frames: Vec<Result<String, StreamError>> = self
                .frames
                .iter()
                .map(|f| match f {
                    Ok(text) => Ok(text.clone()),
                    Err(_) => Err(StreamError::Closed),
                })
                .collect();
            let replay = stream::iter(frames);
            if self.stay_open {
                Ok(replay.chain(stream::pending()).boxed())
            } else {
                Ok(replay.boxed())
            }
        }
    }

    /// Holds its connection open and signals when the stream is dropped.
    struct TrackedTransport {
        released: parking_lot::Mutex<Option<oneshot::Sender<()>>>,
    }

    impl Transport for TrackedTransport {
        async fn open(&self, _access_token: &str) -> Result<FrameStream, StreamError> {
            let guard = self.released.lock().take();
            Ok(stream::unfold(guard, |guard| async move {
                std::future::pending::<()>().await;
                drop(guard);
                None
            })
            .boxed())
        }
    }

    struct FailingTransport;

    impl Transport for FailingTransport {
        async fn open(&self, _access_token: &str) -> Result<FrameStream, StreamError> {
            Err(StreamError::NotConnected)
        }
    }

    fn reconciler() -> (StateReconciler, Arc<DeviceRegistry>, EventBus) {
        let registry = Arc::new(DeviceRegistry::new());
        registry.populate(vec![Device::new("IAM_1", "Hall")]);
        let events = EventBus::new();
        (
            StateReconciler::new(Arc::clone(&registry), events.clone()),
            registry,
            events,
        )
    }

    fn status_frame(body: &str) -> String {
        format!(r#"{{"type":"SYSTEM_EVENT","action":"DEVICE_STATUS_UPDATE","properties":{body}}}"#)
    }

    #[tokio::test]
    async fn frames_are_applied_and_malformed_ones_skipped() {
        let (reconciler, registry, events) = reconciler();
        let transport = ScriptedTransport {
            frames: vec![
                Ok(status_frame(r#"{"id":"IAM_1","airflow":2}"#)),
                Ok("{{ garbage".to_string()),
                Ok(status_frame(r#"{"id":"IAM_X","airflow":4}"#)),
                Ok(status_frame(r#"{"id":"IAM_1","humidity":45}"#)),
            ],
            stay_open: true,
        };
        let mut supervisor = StreamSupervisor::new(transport, reconciler, events);
        let mut watch = registry.watch(&DeviceId::new("IAM_1")).unwrap();

        supervisor.connect("token").await.unwrap();
        assert!(supervisor.is_streaming());

        watch
            .wait_for(|state| state.humidity().is_some())
            .await
            .unwrap();
        // Still connected after the malformed frame
        assert!(supervisor.is_streaming());

        let state = registry.snapshot(&DeviceId::new("IAM_1")).unwrap();
        assert_eq!(state.airflow(), Some(2));
        assert_eq!(state.humidity(), Some(45.0));
        assert!(!registry.contains(&DeviceId::new("IAM_X")));

        supervisor.disconnect().await;
        assert_eq!(supervisor.state(), StreamState::Disconnected);
    }

    #[tokio::test]
    async fn transport_failure_marks_stream_disconnected() {
        let (reconciler, _, events) = reconciler();
        let mut rx = events.subscribe();
        let transport = ScriptedTransport {
            frames: vec![Err(StreamError::Closed)],
            stay_open: false,
        };
        let mut supervisor = StreamSupervisor::new(transport, reconciler, events);
        let mut state = supervisor.watch_state();

        supervisor.connect("token").await.unwrap();
        state
            .wait_for(|s| *s == StreamState::Disconnected)
            .await
            .unwrap();

        assert!(matches!(rx.recv().await.unwrap(), DeviceEvent::StreamConnected));
        match rx.recv().await.unwrap() {
            DeviceEvent::StreamDisconnected { error } => assert!(error.is_some()),
            other => panic!("Expected StreamDisconnected, got {other:?}"),
        }

        // Tearing down an already lost connection is fine
        supervisor.disconnect().await;
        assert!(!supervisor.is_streaming());
    }

    #[tokio::test]
    async fn failed_open_leaves_supervisor_disconnected() {
        let (reconciler, _, events) = reconciler();
        let mut supervisor = StreamSupervisor::new(FailingTransport, reconciler, events);

        let err = supervisor.connect("token").await.unwrap_err();
        assert!(matches!(err, StreamError::NotConnected));
        assert_eq!(supervisor.state(), StreamState::Disconnected);
    }

    #[tokio::test]
    async fn disconnect_is_safe_in_any_state() {
        let (reconciler, _, events) = reconciler();
        let transport = ScriptedTransport {
            frames: Vec::new(),
            stay_open: true,
        };
        let mut supervisor = StreamSupervisor::new(transport, reconciler, events);

        supervisor.disconnect().await;
        supervisor.connect("a").await.unwrap();
        supervisor.connect("b").await.unwrap();
        supervisor.disconnect().await;
        supervisor.disconnect().await;
        assert_eq!(supervisor.state(), StreamState::Disconnected);
    }

    #[tokio::test]
    async fn dropping_supervisor_releases_connection() {
        let (reconciler, _, events) = reconciler();
        let (tx, released) = oneshot::channel();
        let transport = TrackedTransport {
            released: parking_lot::Mutex::new(Some(tx)),
        };
        let mut supervisor = StreamSupervisor::new(transport, reconciler, events);
        supervisor.connect("token").await.unwrap();

        drop(supervisor);

        // The sender lives inside the stream, so the receiver errors once it is dropped
        let result = tokio::time::timeout(Duration::from_secs(1), released)
            .await
            .expect("connection was not released");
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn unknown_device_delta_keeps_stream_open() {
        let (reconciler, registry, events) = reconciler();
        let mut rx = events.subscribe();
        let transport = ScriptedTransport {
            frames: vec![
                Ok(status_frame(r#"{"id":"IAM_X","airflow":4}"#)),
                Ok(status_frame(r#"{"id":"IAM_1","airflow":1}"#)),
            ],
            stay_open: true,
        };
        let mut supervisor = StreamSupervisor::new(transport, reconciler, events);
        let mut watch = registry.watch(&DeviceId::new("IAM_1")).unwrap();

        supervisor.connect("token").await.unwrap();
        watch.wait_for(|state| state.airflow() == Some(1)).await.unwrap();

        assert!(supervisor.is_streaming());
        assert!(matches!(rx.recv().await.unwrap(), DeviceEvent::StreamConnected));
        assert!(matches!(
            rx.recv().await.unwrap(),
            DeviceEvent::UnknownDevice { .. }
        ));
        supervisor.disconnect().await;
    }
}
