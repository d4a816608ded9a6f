// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `Systemair` Lib - A Rust library to monitor Systemair ventilation units.
//!
//! This library keeps a live view of the ventilation units bound to a
//! Systemair Home Solutions account. It combines two sources of truth:
//! periodic register snapshots pulled over GraphQL and partial status
//! updates pushed over a WebSocket.
//!
//! # Components
//!
//! - **Authentication**: browser-style login, code exchange, refresh
//!   ([`auth`])
//! - **Device API**: discovery, register pulls, status broadcasts, register
//!   writes ([`protocol`])
//! - **Push stream**: connection supervision and frame decoding ([`stream`])
//! - **State**: per-device state merged from both sources ([`state`])
//! - **Session**: the control loop tying them together ([`session`])
//!
//! # Quick Start
//!
//! ```no_run
//! use systemair_lib::auth::Authenticator;
//! use systemair_lib::event::DeviceEvent;
//! use systemair_lib::protocol::{ApiConfig, HttpApi};
//! use systemair_lib::session::{SessionConfig, SessionOrchestrator};
//! use systemair_lib::stream::WebSocketTransport;
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> systemair_lib::Result<()> {
//!     let api = ApiConfig::default();
//!     let session = SessionOrchestrator::new(
//!         Authenticator::new(api.clone(), "user@example.com", "secret")?,
//!         HttpApi::new(api.clone())?,
//!         WebSocketTransport::new(&api),
//!         SessionConfig::default(),
//!     );
//!
//!     let mut events = session.subscribe();
//!     tokio::spawn(async move {
//!         while let Ok(event) = events.recv().await {
//!             if let DeviceEvent::StateChanged { state, .. } = event {
//!                 println!("{state}");
//!             }
//!         }
//!     });
//!
//!     session.run(CancellationToken::new()).await;
//!     Ok(())
//! }
//! ```
//!
//! ## Reading State
//!
//! ```
//! use systemair_lib::{Device, DeviceId, DeviceRegistry};
//!
//! let registry = DeviceRegistry::new();
//! registry.populate(vec![Device::new("IAM_1", "Hall")]);
//!
//! let state = registry.snapshot(&DeviceId::new("IAM_1")).unwrap();
//! assert_eq!(state.airflow(), None);
//! ```

pub mod auth;
mod device;
pub mod error;
pub mod event;
pub mod protocol;
pub mod register;
pub mod session;
pub mod state;
pub mod stream;
pub mod types;

pub use device::{Device, DeviceId, DeviceRegistry};
pub use error::{
    AuthenticationError, Error, ParseError, Result, StreamError, TokenDecodeError, TransportError,
    UnknownDeviceWarning, ValueError,
};
pub use event::{DeviceEvent, EventBus, UpdateSource};
pub use session::{SessionConfig, SessionOrchestrator};
pub use state::DeviceState;
pub use types::UserMode;
