// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Session orchestration.
//!
//! A session logs in, discovers the account's devices, keeps the push
//! stream open with a valid credential and pulls every device once per
//! period. See [`SessionOrchestrator`].

mod config;
mod orchestrator;

pub use config::{BackoffPolicy, SessionConfig};
pub use orchestrator::{CycleReport, SessionOrchestrator};
