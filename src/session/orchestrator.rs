// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The session control loop.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

use super::SessionConfig;
use crate::auth::{Credential, CredentialSource};
use crate::device::{DeviceId, DeviceRegistry};
use crate::error::{Error, Result};
use crate::event::{DeviceEvent, EventBus};
use crate::protocol::DeviceApi;
use crate::register::RegisterId;
use crate::state::StateReconciler;
use crate::stream::{StreamState, StreamSupervisor, Transport};
use crate::types::UserMode;

/// Outcome of one session cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// A new credential was acquired.
    pub credential_rotated: bool,
    /// The push stream was re-established.
    pub stream_reconnected: bool,
    /// Devices whose pull snapshot was applied.
    pub pulled: usize,
    /// Devices whose pull snapshot failed.
    pub failed: usize,
}

/// Ties credential freshness to push stream liveness and schedules pulls.
///
/// The orchestrator owns every session component: the credential source,
/// the device API, the [`DeviceRegistry`] with its reconciler, and the
/// [`StreamSupervisor`]. Consumers observe it through [`registry`] and
/// [`subscribe`].
///
/// [`registry`]: Self::registry
/// [`subscribe`]: Self::subscribe
///
/// # Examples
///
/// ```no_run
/// use systemair_lib::auth::Authenticator;
/// use systemair_lib::protocol::{ApiConfig, HttpApi};
/// use systemair_lib::session::{SessionConfig, SessionOrchestrator};
/// use systemair_lib::stream::WebSocketTransport;
/// use tokio_util::sync::CancellationToken;
///
/// # async fn example() -> systemair_lib::Result<()> {
/// let api_config = ApiConfig::default();
/// let session = SessionOrchestrator::new(
///     Authenticator::new(api_config.clone(), "user@example.com", "secret")?,
///     HttpApi::new(api_config.clone())?,
///     WebSocketTransport::new(&api_config),
///     SessionConfig::default(),
/// );
///
/// let cancel = CancellationToken::new();
/// let stop = cancel.clone();
/// tokio::spawn(async move {
///     let _ = tokio::signal::ctrl_c().await;
///     stop.cancel();
/// });
///
/// session.run(cancel).await;
/// # Ok(())
/// # }
/// ```
pub struct SessionOrchestrator<C, A, T> {
    credentials: C,
    api: A,
    supervisor: StreamSupervisor<T>,
    reconciler: StateReconciler,
    events: EventBus,
    config: SessionConfig,
    failures: u32,
}

impl<C, A, T> std::fmt::Debug for SessionOrchestrator<C, A, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionOrchestrator")
            .field("supervisor", &self.supervisor)
            .field("devices", &self.reconciler.registry().len())
            .field("config", &self.config)
            .field("failures", &self.failures)
            .finish_non_exhaustive()
    }
}

impl<C, A, T> SessionOrchestrator<C, A, T>
where
    C: CredentialSource,
    A: DeviceApi,
    T: Transport,
{
    /// Creates an orchestrator with an empty registry.
    #[must_use]
    pub fn new(credentials: C, api: A, transport: T, config: SessionConfig) -> Self {
        let events = EventBus::new();
        let registry = Arc::new(DeviceRegistry::new());
        let reconciler = StateReconciler::new(registry, events.clone());
        let supervisor = StreamSupervisor::new(transport, reconciler.clone(), events.clone());
        Self {
            credentials,
            api,
            supervisor,
            reconciler,
            events,
            config,
            failures: 0,
        }
    }

    /// Returns the registry of discovered devices.
    #[must_use]
    pub fn registry(&self) -> &Arc<DeviceRegistry> {
        self.reconciler.registry()
    }

    /// Returns the event bus.
    #[must_use]
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Subscribes to session and device events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<DeviceEvent> {
        self.events.subscribe()
    }

    /// Returns the push stream state.
    #[must_use]
    pub fn stream_state(&self) -> StreamState {
        self.supervisor.state()
    }

    /// Returns the device API.
    #[must_use]
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Returns the current credential, if any.
    #[must_use]
    pub fn credential(&self) -> Option<&Credential> {
        self.credentials.credential()
    }

    fn access_token(&self) -> Result<&str> {
        self.credentials
            .credential()
            .map(Credential::access_token)
            .ok_or(Error::NotAuthenticated)
    }

    fn credential_is_valid(&self) -> bool {
        self.credentials
            .credential()
            .is_some_and(|c| c.is_valid(Utc::now(), self.config.skew()))
    }

    /// Logs in, discovers devices, opens the push stream and pulls every
    /// device once.
    ///
    /// A push stream that cannot be opened is retried by the next cycle.
    ///
    /// # Errors
    ///
    /// Returns error if the login or the device discovery fails.
    pub async fn start(&mut self) -> Result<CycleReport> {
        tracing::info!("Starting session");
        let credential = self.credentials.login().await?;
        self.publish_rotation(&credential);
        let token = credential.access_token().to_owned();

        let devices = self.api.account_devices(&token).await?;
        let added = self.registry().populate(devices);
        if self.registry().is_empty() {
            tracing::warn!("No devices found for this account");
        }
        for device in added {
            tracing::info!(device_id = %device.id(), name = %device.name(), "Device discovered");
            self.events.publish(DeviceEvent::DeviceDiscovered { device });
        }

        let stream_reconnected = self.reconnect_stream(&token).await;
        let (pulled, failed) = self.pull_all(&token).await;

        Ok(CycleReport {
            credential_rotated: true,
            stream_reconnected,
            pulled,
            failed,
        })
    }

    /// Runs one cycle of the session loop.
    ///
    /// An expired credential is refreshed, falling back to a full login if
    /// the refresh fails; a new credential re-establishes the push stream and
    /// re-requests a status broadcast. A lost stream is re-established the
    /// same way. Every registered device is then pulled; a failed pull only
    /// affects its own device.
    ///
    /// # Errors
    ///
    /// Returns error if both the refresh and the fallback login fail.
    pub async fn run_cycle(&mut self) -> Result<CycleReport> {
        let mut report = CycleReport::default();

        if !self.credential_is_valid() {
            let credential = self.renew_credential().await?;
            self.publish_rotation(&credential);
            report.credential_rotated = true;
        }
        let token = self.access_token()?.to_owned();

        if report.credential_rotated || !self.supervisor.is_streaming() {
            report.stream_reconnected = self.reconnect_stream(&token).await;
        }

        (report.pulled, report.failed) = self.pull_all(&token).await;
        Ok(report)
    }

    async fn renew_credential(&mut self) -> Result<Credential> {
        tracing::info!("Credential expired, refreshing");
        match self.credentials.refresh().await {
            Ok(credential) => Ok(credential),
            Err(e) => {
                tracing::warn!(error = %e, "Credential refresh failed, logging in again");
                self.credentials.login().await.map_err(|e| {
                    tracing::error!(error = %e, "Login failed");
                    e.into()
                })
            }
        }
    }

    fn publish_rotation(&self, credential: &Credential) {
        tracing::info!(expiry = %credential.expiry(), "Credential rotated");
        self.events.publish(DeviceEvent::CredentialRotated {
            expiry: credential.expiry(),
        });
    }

    /// Opens the push stream and asks for a status broadcast.
    ///
    /// Returns whether the stream is up.
    async fn reconnect_stream(&mut self, token: &str) -> bool {
        if let Err(e) = self.supervisor.connect(token).await {
            tracing::warn!(error = %e, "Push stream unavailable, retrying next cycle");
            return false;
        }

        let ids = self.registry().ids();
        if let Err(e) = self.api.broadcast_device_statuses(token, &ids).await {
            tracing::warn!(error = %e, "Status broadcast request failed");
        }
        true
    }

    /// Pulls every registered device; returns (applied, failed) counts.
    async fn pull_all(&self, token: &str) -> (usize, usize) {
        let mut pulled = 0;
        let mut failed = 0;

        for device_id in self.registry().ids() {
            match self.api.fetch_registers(token, &device_id).await {
                Ok(observations) => match self.reconciler.apply_pull(&device_id, &observations) {
                    Ok(_) => pulled += 1,
                    Err(warning) => {
                        tracing::warn!(%warning, "Pull snapshot discarded");
                        failed += 1;
                    }
                },
                Err(e) => {
                    tracing::warn!(device_id = %device_id, error = %e, "Pull snapshot failed");
                    failed += 1;
                }
            }
        }

        tracing::debug!(pulled, failed, "Pull cycle complete");
        (pulled, failed)
    }

    /// Writes a register of a device with the current credential.
    ///
    /// # Errors
    ///
    /// Returns error if no credential is held or the request fails.
    pub async fn write_register(
        &self,
        device_id: &DeviceId,
        register: RegisterId,
        value: i64,
    ) -> Result<bool> {
        let token = self.access_token()?;
        self.api
            .write_register(token, device_id, register, value)
            .await
    }

    /// Requests a user mode change with the current credential.
    ///
    /// # Errors
    ///
    /// Returns error if no credential is held or the request fails.
    pub async fn set_user_mode(&self, device_id: &DeviceId, mode: UserMode) -> Result<bool> {
        let token = self.access_token()?;
        self.api.set_user_mode(token, device_id, mode).await
    }

    /// Closes the push stream.
    pub async fn shutdown(&mut self) {
        self.supervisor.disconnect().await;
    }

    /// Runs the session until `cancel` fires.
    ///
    /// Starts the session, then runs a cycle every poll period. Failed starts
    /// and failed logins are retried after a growing delay. Cancellation is
    /// observed between cycles, never in the middle of a request, and the
    /// push stream is always closed before this returns.
    ///
    /// If the future is dropped early or a cycle panics, the graceful
    /// shutdown is skipped; dropping the session still aborts the push
    /// stream tasks and releases the connection.
    pub async fn run(mut self, cancel: CancellationToken) {
        self.run_until_cancelled(&cancel).await;
        self.shutdown().await;
        tracing::info!("Session stopped");
    }

    async fn run_until_cancelled(&mut self, cancel: &CancellationToken) {
        loop {
            if cancel.is_cancelled() {
                return;
            }
            match self.start().await {
                Ok(_) => {
                    self.failures = 0;
                    break;
                }
                Err(e) => {
                    self.failures = self.failures.saturating_add(1);
                    tracing::error!(error = %e, failures = self.failures, "Session start failed");
                    if !self.sleep(cancel).await {
                        return;
                    }
                }
            }
        }

        loop {
            if !self.sleep(cancel).await {
                return;
            }
            match self.run_cycle().await {
                Ok(report) => {
                    self.failures = 0;
                    tracing::debug!(?report, "Cycle complete");
                }
                Err(e) => {
                    self.failures = self.failures.saturating_add(1);
                    tracing::error!(error = %e, failures = self.failures, "Session cycle failed");
                }
            }
        }
    }

    /// Waits for the next cycle. Returns `false` if cancelled first.
    async fn sleep(&self, cancel: &CancellationToken) -> bool {
        let delay = self
            .config
            .backoff()
            .delay_for(self.failures)
            .max(self.config.poll_period());

        tokio::select! {
            () = cancel.cancelled() => false,
            () = tokio::time::sleep(delay) => true,
        }
    }
}
