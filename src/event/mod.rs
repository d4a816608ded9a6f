// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Event system for session and device state changes.
//!
//! The [`EventBus`] broadcasts [`DeviceEvent`]s to any number of
//! subscribers: device discovery, state changes from either channel, push
//! stream connection changes and credential rotations.
//!
//! # Examples
//!
//! ```
//! use systemair_lib::event::{DeviceEvent, EventBus};
//!
//! let bus = EventBus::new();
//! let mut rx = bus.subscribe();
//!
//! bus.publish(DeviceEvent::StreamConnected);
//! assert!(rx.try_recv().unwrap().is_stream());
//! ```

mod device_event;
mod event_bus;

pub use device_event::{DeviceEvent, UpdateSource};
pub use event_bus::EventBus;
