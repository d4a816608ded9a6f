// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Devices bound to an account.
//!
//! A [`Device`] is discovered once per session and never changes afterwards.
//! The [`DeviceRegistry`] owns the set of known devices together with their
//! [`DeviceState`], one lock per device record.

mod device_id;

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::state::DeviceState;

pub use device_id::DeviceId;

/// A ventilation unit bound to the authenticated account.
///
/// # Examples
///
/// ```
/// use systemair_lib::Device;
///
/// let device = Device::new("IAM_123456789ABC", "Living room");
/// assert_eq!(device.id().as_str(), "IAM_123456789ABC");
/// assert_eq!(device.name(), "Living room");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Device {
    #[serde(rename = "identifier")]
    id: DeviceId,
    name: String,
}

impl Device {
    /// Creates a device.
    #[must_use]
    pub fn new(id: impl Into<DeviceId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Returns the device identifier.
    #[must_use]
    pub fn id(&self) -> &DeviceId {
        &self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A registered device and its state.
///
/// The mutex is the critical section for every merge into the state. The
/// watch channel always carries the state as of the last completed merge.
#[derive(Debug)]
pub(crate) struct DeviceRecord {
    device: Device,
    state: Mutex<DeviceState>,
    state_tx: watch::Sender<DeviceState>,
}

impl DeviceRecord {
    fn new(device: Device) -> Self {
        let state = DeviceState::new(device.id().clone());
        let (state_tx, _) = watch::channel(state.clone());
        Self {
            device,
            state: Mutex::new(state),
            state_tx,
        }
    }

    pub(crate) fn device(&self) -> &Device {
        &self.device
    }

    /// Runs `f` on the state under the record lock.
    ///
    /// When `f` reports a change, the new state is published to watchers
    /// before the lock is released, so watchers see merges in lock order.
    pub(crate) fn update<F>(&self, f: F) -> Option<DeviceState>
    where
        F: FnOnce(&mut DeviceState) -> bool,
    {
        let mut state = self.state.lock();
        if !f(&mut state) {
            return None;
        }
        let snapshot = state.clone();
        self.state_tx.send_replace(snapshot.clone());
        Some(snapshot)
    }

    fn snapshot(&self) -> DeviceState {
        self.state.lock().clone()
    }
}

/// The set of devices known for the authenticated account.
///
/// The registry is shared between the session loop and the push stream. It
/// is cheap to share through an [`Arc`]; lookups take a read lock on the
/// device map and merges take the per-device lock only.
///
/// # Examples
///
/// ```
/// use systemair_lib::{Device, DeviceId, DeviceRegistry};
///
/// let registry = DeviceRegistry::new();
/// registry.populate(vec![Device::new("IAM_1", "Hall")]);
///
/// assert!(registry.contains(&DeviceId::new("IAM_1")));
/// let state = registry.snapshot(&DeviceId::new("IAM_1")).unwrap();
/// assert_eq!(state.airflow(), None);
/// ```
#[derive(Debug, Default)]
pub struct DeviceRegistry {
    devices: RwLock<HashMap<DeviceId, Arc<DeviceRecord>>>,
}

impl DeviceRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers discovered devices.
    ///
    /// Devices already registered keep their record and state. Returns the
    /// devices that were not registered before.
    pub fn populate(&self, devices: impl IntoIterator<Item = Device>) -> Vec<Device> {
        let mut map = self.devices.write();
        let mut added = Vec::new();
        for device in devices {
            if map.contains_key(device.id()) {
                continue;
            }
            tracing::debug!(device_id = %device.id(), name = %device.name(), "Registering device");
            map.insert(
                device.id().clone(),
                Arc::new(DeviceRecord::new(device.clone())),
            );
            added.push(device);
        }
        added
    }

    /// Returns `true` if the device is registered.
    #[must_use]
    pub fn contains(&self, id: &DeviceId) -> bool {
        self.devices.read().contains_key(id)
    }

    /// Returns a registered device.
    #[must_use]
    pub fn get(&self, id: &DeviceId) -> Option<Device> {
        self.devices.read().get(id).map(|r| r.device().clone())
    }

    /// Returns all registered devices, ordered by identifier.
    #[must_use]
    pub fn devices(&self) -> Vec<Device> {
        let mut devices: Vec<Device> = self
            .devices
            .read()
            .values()
            .map(|r| r.device().clone())
            .collect();
        devices.sort_by(|a, b| a.id().cmp(b.id()));
        devices
    }

    /// Returns all registered identifiers, ordered.
    #[must_use]
    pub fn ids(&self) -> Vec<DeviceId> {
        let mut ids: Vec<DeviceId> = self.devices.read().keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Returns the number of registered devices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.devices.read().len()
    }

    /// Returns `true` if no device is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.devices.read().is_empty()
    }

    /// Returns a consistent copy of a device's state.
    #[must_use]
    pub fn snapshot(&self, id: &DeviceId) -> Option<DeviceState> {
        self.record(id).map(|r| r.snapshot())
    }

    /// Subscribes to the state of a device.
    ///
    /// The receiver holds the current state and is notified after every
    /// merge that changed it.
    #[must_use]
    pub fn watch(&self, id: &DeviceId) -> Option<watch::Receiver<DeviceState>> {
        self.record(id).map(|r| r.state_tx.subscribe())
    }

    pub(crate) fn record(&self, id: &DeviceId) -> Option<Arc<DeviceRecord>> {
        self.devices.read().get(id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry_with(ids: &[&str]) -> DeviceRegistry {
        let registry = DeviceRegistry::new();
        registry.populate(ids.iter().map(|id| Device::new(*id, format!("Unit {id}"))));
        registry
    }

    #[test]
    fn populate_returns_new_devices_only() {
        let registry = registry_with(&["IAM_1"]);

        let added = registry.populate(vec![Device::new("IAM_1", "Again"), Device::new("IAM_2", "B")]);

        assert_eq!(added.len(), 1);
        assert_eq!(added[0].id().as_str(), "IAM_2");
        assert_eq!(registry.len(), 2);
        // Existing record keeps its original name
        assert_eq!(registry.get(&DeviceId::new("IAM_1")).unwrap().name(), "Unit IAM_1");
    }

    #[test]
    fn ids_are_sorted() {
        let registry = registry_with(&["IAM_B", "IAM_A"]);
        assert_eq!(registry.ids(), vec![DeviceId::new("IAM_A"), DeviceId::new("IAM_B")]);
        assert_eq!(registry.devices()[0].id().as_str(), "IAM_A");
    }

    #[test]
    fn unknown_device_has_no_state() {
        let registry = registry_with(&["IAM_1"]);
        assert!(registry.snapshot(&DeviceId::new("IAM_X")).is_none());
        assert!(registry.watch(&DeviceId::new("IAM_X")).is_none());
        assert!(!registry.is_empty());
    }

    #[test]
    fn known_device_has_initial_state() {
        let registry = registry_with(&["IAM_1"]);
        let id = DeviceId::new("IAM_1");

        let state = registry.snapshot(&id).unwrap();
        assert_eq!(state.device_id(), &id);
        assert_eq!(state.airflow(), None);

        let rx = registry.watch(&id).unwrap();
        assert_eq!(rx.borrow().device_id(), &id);
    }

    #[test]
    fn update_publishes_to_watchers() {
        let registry = registry_with(&["IAM_1"]);
        let id = DeviceId::new("IAM_1");
        let mut rx = registry.watch(&id).unwrap();
        let record = registry.record(&id).unwrap();

        let unchanged = record.update(|_| false);
        assert!(unchanged.is_none());
        assert!(!rx.has_changed().unwrap());

        let changed = record.update(|state| {
            state.airflow = Some(3);
            true
        });
        assert_eq!(changed.unwrap().airflow(), Some(3));
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().airflow(), Some(3));
        assert_eq!(registry.snapshot(&id).unwrap().airflow(), Some(3));
    }

    #[test]
    fn device_deserializes_from_discovery_record() {
        let device: Device =
            serde_json::from_str(r#"{"identifier":"IAM_1","name":"Hall","extra":1}"#).unwrap();
        assert_eq!(device, Device::new("IAM_1", "Hall"));
    }
}
