// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Push channel.
//!
//! The backend pushes JSON envelopes over a WebSocket. Envelopes of type
//! `SYSTEM_EVENT` with action `DEVICE_STATUS_UPDATE` carry a
//! [`PushDelta`](crate::state::PushDelta); everything else is ignored.
//!
//! The [`StreamSupervisor`] owns the connection, while a [`Transport`]
//! opens it. [`WebSocketTransport`] is the production transport.

mod envelope;
mod supervisor;
mod transport;

pub use envelope::parse_frame;
pub use supervisor::{StreamState, StreamSupervisor};
pub use transport::{FrameStream, Transport, WebSocketTransport};
