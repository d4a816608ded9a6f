// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Merging of pull snapshots and push deltas into device state.

use std::sync::Arc;

use super::DeviceState;
use super::delta::{PushDelta, RegisterObservation};
use crate::device::{DeviceId, DeviceRecord, DeviceRegistry};
use crate::error::UnknownDeviceWarning;
use crate::event::{DeviceEvent, EventBus, UpdateSource};
use crate::register::RegisterTable;

/// Applies updates from both channels to the registered devices.
///
/// Each merge runs under the lock of the device record it targets, so pull
/// and push updates for one device never interleave. Merges only write the
/// fields an update carries, which makes the order of updates across
/// channels irrelevant and re-applying an update a no-op.
///
/// Every merge that changes a state publishes
/// [`DeviceEvent::StateChanged`] and notifies the device's watchers.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use systemair_lib::event::EventBus;
/// use systemair_lib::state::{RegisterObservation, StateReconciler};
/// use systemair_lib::{Device, DeviceId, DeviceRegistry};
///
/// let registry = Arc::new(DeviceRegistry::new());
/// registry.populate(vec![Device::new("IAM_1", "Hall")]);
/// let reconciler = StateReconciler::new(Arc::clone(&registry), EventBus::new());
///
/// let id = DeviceId::new("IAM_1");
/// reconciler
///     .apply_pull(&id, &[RegisterObservation::new(32, 210)])
///     .unwrap();
///
/// let state = registry.snapshot(&id).unwrap();
/// assert_eq!(state.temperatures().setpoint, Some(21.0));
/// ```
#[derive(Debug, Clone)]
pub struct StateReconciler {
    registry: Arc<DeviceRegistry>,
    events: EventBus,
    table: &'static RegisterTable,
}

impl StateReconciler {
    /// Creates a reconciler over a registry, publishing on `events`.
    #[must_use]
    pub fn new(registry: Arc<DeviceRegistry>, events: EventBus) -> Self {
        Self {
            registry,
            events,
            table: RegisterTable::global(),
        }
    }

    /// Returns the registry updates are applied to.
    #[must_use]
    pub fn registry(&self) -> &Arc<DeviceRegistry> {
        &self.registry
    }

    /// Applies a pull snapshot to a device.
    ///
    /// Each observation is mapped through the register table; temperature
    /// registers are decoded from tenths of a degree. Registers without a
    /// modelled field are skipped.
    ///
    /// Returns `Ok(true)` if the state changed.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownDeviceWarning`] if the device is not registered; no
    /// state is touched in that case.
    pub fn apply_pull(
        &self,
        device_id: &DeviceId,
        observations: &[RegisterObservation],
    ) -> Result<bool, UnknownDeviceWarning> {
        let record = self.record(device_id)?;

        let updated = record.update(|state| {
            let mut changed = false;
            for observation in observations {
                let Some(field) = self.table.field(observation.id) else {
                    continue;
                };
                changed |= state.apply_register(field, observation.value);
            }
            changed
        });

        tracing::debug!(
            device_id = %device_id,
            registers = observations.len(),
            changed = updated.is_some(),
            "Applied pull snapshot"
        );
        Ok(self.publish(UpdateSource::Pull, updated))
    }

    /// Applies a push delta to the device it names.
    ///
    /// Returns `Ok(true)` if the state changed.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownDeviceWarning`] if the device is not registered. The
    /// delta is discarded, no state is touched and
    /// [`DeviceEvent::UnknownDevice`] is published.
    pub fn apply_push(&self, delta: &PushDelta) -> Result<bool, UnknownDeviceWarning> {
        let record = match self.record(&delta.device_id) {
            Ok(record) => record,
            Err(warning) => {
                tracing::warn!(device_id = %delta.device_id, "Discarding push delta for unknown device");
                self.events.publish(DeviceEvent::UnknownDevice {
                    device_id: delta.device_id.clone(),
                });
                return Err(warning);
            }
        };

        let updated = record.update(|state| state.merge_delta(delta));

        tracing::debug!(
            device_id = %delta.device_id,
            changed = updated.is_some(),
            "Applied push delta"
        );
        Ok(self.publish(UpdateSource::Push, updated))
    }

    fn record(&self, device_id: &DeviceId) -> Result<Arc<DeviceRecord>, UnknownDeviceWarning> {
        self.registry
            .record(device_id)
            .ok_or_else(|| UnknownDeviceWarning {
                device_id: device_id.to_string(),
            })
    }

    fn publish(&self, source: UpdateSource, updated: Option<DeviceState>) -> bool {
        match updated {
            Some(state) => {
                self.events.publish(DeviceEvent::state_changed(source, state));
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::Device;
    use crate::register::{Function, ids};
    use crate::state::Temperatures;

    fn setup() -> (StateReconciler, Arc<DeviceRegistry>, EventBus) {
        let registry = Arc::new(DeviceRegistry::new());
        registry.populate(vec![Device::new("IAM_1", "Hall")]);
        let events = EventBus::new();
        let reconciler = StateReconciler::new(Arc::clone(&registry), events.clone());
        (reconciler, registry, events)
    }

    fn id() -> DeviceId {
        DeviceId::new("IAM_1")
    }

    // ========================================================================
    // Pull snapshots
    // ========================================================================

    #[test]
    fn pull_snapshot_decodes_fields() {
        let (reconciler, registry, _) = setup();

        let changed = reconciler
            .apply_pull(
                &id(),
                &[
                    RegisterObservation::new(ids::USERMODE_MODE_HMI, 1),
                    RegisterObservation::new(ids::SPEED_INDICATION_APP, 3),
                    RegisterObservation::new(ids::TC_SP, 210),
                    RegisterObservation::new(ids::SENSOR_OAT, 150),
                ],
            )
            .unwrap();
        assert!(changed);

        let state = registry.snapshot(&id()).unwrap();
        assert_eq!(state.user_mode_value(), Some(1));
        assert_eq!(state.airflow(), Some(3));
        assert_eq!(state.temperatures().setpoint, Some(21.0));
        assert_eq!(state.temperatures().oat, Some(15.0));
    }

    #[test]
    fn pull_snapshot_is_idempotent() {
        let (reconciler, registry, _) = setup();
        let batch = [
            RegisterObservation::new(ids::TC_SP, 215),
            RegisterObservation::new(ids::FUNCTION_ACTIVE_HEATING, 1),
            RegisterObservation::new(ids::ALARM_TYPE_B, 0),
        ];

        assert!(reconciler.apply_pull(&id(), &batch).unwrap());
        let once = registry.snapshot(&id()).unwrap();

        assert!(!reconciler.apply_pull(&id(), &batch).unwrap());
        assert_eq!(registry.snapshot(&id()).unwrap(), once);
        assert_eq!(once.functions().get(Function::Heating), Some(true));
        assert_eq!(once.alarm_type_b(), Some(false));
    }

    #[test]
    fn unmodelled_registers_are_ignored() {
        let (reconciler, registry, _) = setup();

        let changed = reconciler
            .apply_pull(
                &id(),
                &[
                    RegisterObservation::new(0, 7),
                    RegisterObservation::new(9_999, 1),
                ],
            )
            .unwrap();

        assert!(!changed);
        assert_eq!(
            registry.snapshot(&id()).unwrap(),
            DeviceState::new(id())
        );
    }

    #[test]
    fn pull_for_unknown_device_is_rejected() {
        let (reconciler, _, _) = setup();
        let err = reconciler
            .apply_pull(&DeviceId::new("IAM_X"), &[RegisterObservation::new(31, 2)])
            .unwrap_err();
        assert_eq!(err.device_id, "IAM_X");
    }

    // ========================================================================
    // Push deltas
    // ========================================================================

    #[test]
    fn push_never_clears_absent_fields() {
        let (reconciler, registry, _) = setup();

        let mut first = PushDelta::new(id());
        first.temperature = Some(22.5);
        reconciler.apply_push(&first).unwrap();

        let mut second = PushDelta::new(id());
        second.humidity = Some(45.0);
        reconciler.apply_push(&second).unwrap();

        let state = registry.snapshot(&id()).unwrap();
        assert_eq!(state.temperature(), Some(22.5));
        assert_eq!(state.humidity(), Some(45.0));
    }

    #[test]
    fn push_and_pull_share_temperature_group() {
        let (reconciler, registry, _) = setup();
        reconciler
            .apply_pull(&id(), &[RegisterObservation::new(ids::SENSOR_OAT, 150)])
            .unwrap();

        let mut delta = PushDelta::new(id());
        delta.temperatures = Some(Temperatures {
            sat: Some(19.5),
            ..Temperatures::default()
        });
        reconciler.apply_push(&delta).unwrap();

        let temperatures = registry.snapshot(&id()).unwrap().temperatures();
        assert_eq!(temperatures.oat, Some(15.0));
        assert_eq!(temperatures.sat, Some(19.5));
    }

    #[test]
    fn unknown_push_device_is_dropped() {
        let (reconciler, registry, events) = setup();
        let mut rx = events.subscribe();
        let before = registry.snapshot(&id()).unwrap();

        let mut delta = PushDelta::new(DeviceId::new("IAM_X"));
        delta.airflow = Some(4);
        let warning = reconciler.apply_push(&delta).unwrap_err();

        assert_eq!(warning.device_id, "IAM_X");
        assert_eq!(registry.snapshot(&id()).unwrap(), before);
        assert!(!registry.contains(&DeviceId::new("IAM_X")));
        assert!(matches!(
            rx.try_recv().unwrap(),
            DeviceEvent::UnknownDevice { device_id } if device_id.as_str() == "IAM_X"
        ));
    }

    // ========================================================================
    // Notifications
    // ========================================================================

    #[test]
    fn changes_are_published_with_source() {
        let (reconciler, _, events) = setup();
        let mut rx = events.subscribe();

        let mut delta = PushDelta::new(id());
        delta.co2 = Some(650);
        reconciler.apply_push(&delta).unwrap();
        // Unchanged re-application publishes nothing
        reconciler.apply_push(&delta).unwrap();

        match rx.try_recv().unwrap() {
            DeviceEvent::StateChanged { source, state, .. } => {
                assert_eq!(source, UpdateSource::Push);
                assert_eq!(state.co2(), Some(650));
            }
            other => panic!("Expected StateChanged, got {other:?}"),
        }
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn watchers_see_merged_state() {
        let (reconciler, registry, _) = setup();
        let mut rx = registry.watch(&id()).unwrap();

        reconciler
            .apply_pull(&id(), &[RegisterObservation::new(ids::SPEED_INDICATION_APP, 2)])
            .unwrap();

        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().airflow(), Some(2));
    }
}
