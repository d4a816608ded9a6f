// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device state and its reconciliation.
//!
//! A [`DeviceState`] is fed by two channels: pull snapshots, made of
//! [`RegisterObservation`]s, and push frames, each carrying a [`PushDelta`].
//! The [`StateReconciler`] merges both into the registered devices without
//! ever clearing a field an update does not mention.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use systemair_lib::event::EventBus;
//! use systemair_lib::state::{PushDelta, StateReconciler};
//! use systemair_lib::{Device, DeviceId, DeviceRegistry};
//!
//! let registry = Arc::new(DeviceRegistry::new());
//! registry.populate(vec![Device::new("IAM_1", "Hall")]);
//! let reconciler = StateReconciler::new(Arc::clone(&registry), EventBus::new());
//!
//! let mut delta = PushDelta::new(DeviceId::new("IAM_1"));
//! delta.temperature = Some(22.5);
//! assert!(reconciler.apply_push(&delta).unwrap());
//! ```

mod delta;
mod device_state;
mod reconciler;

pub use delta::{PushDelta, RegisterObservation, UpdateStatus, WizardStatus};
pub use device_state::{ActiveFunctions, DeviceState, Temperatures, Version};
pub use reconciler::StateReconciler;
