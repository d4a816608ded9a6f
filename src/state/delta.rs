// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Update units of the two channels and how they merge into a state.
//!
//! A pull snapshot is a batch of [`RegisterObservation`]s, a push frame
//! carries one [`PushDelta`]. Both merge into [`DeviceState`] field by field:
//! a field only changes when the update carries a value for it.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::device_state::{DeviceState, Temperatures, Version};
use crate::device::DeviceId;
use crate::register::{Field, RegisterId};

/// One register value from a pull snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterObservation {
    /// Register identifier.
    pub id: RegisterId,
    /// Raw register value, before any unit conversion.
    pub value: i64,
}

impl RegisterObservation {
    /// Creates an observation.
    #[must_use]
    pub const fn new(id: RegisterId, value: i64) -> Self {
        Self { id, value }
    }

    /// Reads an observation from a `{id, value}` data item.
    ///
    /// The backend encodes values as numbers, booleans or numeric strings.
    /// Returns `None` for items that carry no integral value.
    #[must_use]
    pub fn from_data_item(item: &Value) -> Option<Self> {
        let id = match item.get("id")? {
            Value::Number(n) => RegisterId::try_from(n.as_u64()?).ok()?,
            Value::String(s) => s.trim().parse().ok()?,
            _ => return None,
        };
        let value = raw_value(item.get("value")?)?;
        Some(Self { id, value })
    }
}

#[allow(clippy::cast_possible_truncation)]
fn raw_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            // Integral floats such as `210.0` are accepted
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < 9.0e15)
                .map(|f| f as i64)
        }),
        Value::Bool(b) => Some(i64::from(*b)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// A partial device update delivered by the push channel.
///
/// Every field is optional; a missing key and a JSON `null` both mean the
/// field is not part of this update. A value of the wrong shape is dropped
/// on its own, so the other fields of the frame still merge.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushDelta {
    /// Device the update is about.
    #[serde(rename = "id")]
    pub device_id: DeviceId,
    /// Unit model name.
    #[serde(default, deserialize_with = "lenient")]
    pub model: Option<String>,
    /// Unit serial number.
    #[serde(default, deserialize_with = "lenient")]
    pub serial_number: Option<String>,
    /// Whether any alarm is active.
    #[serde(default, deserialize_with = "lenient")]
    pub active_alarms: Option<bool>,
    /// Airflow level.
    #[serde(default, deserialize_with = "lenient")]
    pub airflow: Option<u8>,
    /// Raw user mode value.
    #[serde(default, deserialize_with = "lenient")]
    pub user_mode: Option<u8>,
    /// Room temperature in degrees Celsius.
    #[serde(default, deserialize_with = "lenient")]
    pub temperature: Option<f64>,
    /// Temperature group; each present key is merged.
    #[serde(default, deserialize_with = "lenient")]
    pub temperatures: Option<Temperatures>,
    /// Relative humidity in percent.
    #[serde(default, deserialize_with = "lenient")]
    pub humidity: Option<f64>,
    /// Indoor air quality level.
    #[serde(default, deserialize_with = "lenient")]
    pub air_quality: Option<u8>,
    /// CO2 level in ppm.
    #[serde(default, deserialize_with = "lenient")]
    pub co2: Option<u32>,
    /// Connectivity flags.
    #[serde(default, deserialize_with = "lenient")]
    pub connectivity: Option<Vec<String>>,
    /// Remaining filter time in seconds.
    #[serde(default, deserialize_with = "lenient")]
    pub filter_expiration: Option<u64>,
    /// Version list; an empty list is ignored.
    #[serde(default, deserialize_with = "lenient")]
    pub versions: Option<Vec<Version>>,
    /// Firmware update progress.
    #[serde(default, deserialize_with = "lenient")]
    pub update: Option<UpdateStatus>,
    /// Configuration wizard status.
    #[serde(default, deserialize_with = "lenient")]
    pub configuration_wizard: Option<WizardStatus>,
}

impl PushDelta {
    /// Creates a delta for `device_id` that carries no field.
    #[must_use]
    pub fn new(device_id: DeviceId) -> Self {
        Self {
            device_id,
            model: None,
            serial_number: None,
            active_alarms: None,
            airflow: None,
            user_mode: None,
            temperature: None,
            temperatures: None,
            humidity: None,
            air_quality: None,
            co2: None,
            connectivity: None,
            filter_expiration: None,
            versions: None,
            update: None,
            configuration_wizard: None,
        }
    }
}

/// Decodes an optional field, treating a malformed value as absent.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Firmware update progress of a push delta.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatus {
    /// Whether a firmware update is running.
    pub in_progress: Option<bool>,
}

/// Configuration wizard status of a push delta.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct WizardStatus {
    /// Whether the wizard is active.
    pub active: Option<bool>,
}

/// Stores `value` in `slot`, returning `true` if it differs.
fn set<T: PartialEq>(slot: &mut Option<T>, value: T) -> bool {
    if slot.as_ref() == Some(&value) {
        return false;
    }
    *slot = Some(value);
    true
}

/// Like [`set`], but only when a value is present.
fn merge<T: PartialEq + Clone>(slot: &mut Option<T>, value: Option<&T>) -> bool {
    value.is_some_and(|v| set(slot, v.clone()))
}

impl DeviceState {
    /// Writes one decoded register value into its field.
    ///
    /// Returns `true` if the state changed. Values that do not fit the
    /// field's type are ignored.
    #[allow(clippy::cast_precision_loss)]
    pub(crate) fn apply_register(&mut self, field: Field, raw: i64) -> bool {
        let flag = raw != 0;
        let tenths = raw as f64 / 10.0;
        match field {
            Field::UserMode => u8::try_from(raw).is_ok_and(|v| set(&mut self.user_mode, v)),
            Field::Airflow => u8::try_from(raw).is_ok_and(|v| set(&mut self.airflow, v)),
            Field::AirQuality => u8::try_from(raw).is_ok_and(|v| set(&mut self.air_quality, v)),
            Field::SetpointTemperature => set(&mut self.temperatures.setpoint, tenths),
            Field::SupplyAirTemperature => set(&mut self.temperatures.sat, tenths),
            Field::OutdoorAirTemperature => set(&mut self.temperatures.oat, tenths),
            Field::UserModeRemainingTime => set(&mut self.user_mode_remaining_time, raw),
            Field::EcoMode => set(&mut self.eco_mode, flag),
            Field::LockedUser => set(&mut self.locked_user, flag),
            Field::AlarmTypeA => set(&mut self.alarm_type_a, flag),
            Field::AlarmTypeB => set(&mut self.alarm_type_b, flag),
            Field::AlarmTypeC => set(&mut self.alarm_type_c, flag),
            Field::SetupWizardRequired => set(&mut self.setup_wizard_required, flag),
            Field::ReheaterType => set(&mut self.reheater_type, raw),
            Field::Function(function) => {
                if self.functions.get(function) == Some(flag) {
                    false
                } else {
                    self.functions.set(function, flag);
                    true
                }
            }
        }
    }

    /// Merges the fields present in a push delta.
    ///
    /// Returns `true` if the state changed.
    pub(crate) fn merge_delta(&mut self, delta: &PushDelta) -> bool {
        let mut changed = false;
        changed |= merge(&mut self.model, delta.model.as_ref());
        changed |= merge(&mut self.serial_number, delta.serial_number.as_ref());
        changed |= merge(&mut self.active_alarms, delta.active_alarms.as_ref());
        changed |= merge(&mut self.airflow, delta.airflow.as_ref());
        changed |= merge(&mut self.user_mode, delta.user_mode.as_ref());
        changed |= merge(&mut self.temperature, delta.temperature.as_ref());
        changed |= merge(&mut self.humidity, delta.humidity.as_ref());
        changed |= merge(&mut self.air_quality, delta.air_quality.as_ref());
        changed |= merge(&mut self.co2, delta.co2.as_ref());
        changed |= merge(&mut self.connectivity, delta.connectivity.as_ref());
        changed |= merge(&mut self.filter_expiration, delta.filter_expiration.as_ref());

        if let Some(temperatures) = &delta.temperatures {
            changed |= merge(&mut self.temperatures.oat, temperatures.oat.as_ref());
            changed |= merge(&mut self.temperatures.sat, temperatures.sat.as_ref());
            changed |= merge(&mut self.temperatures.setpoint, temperatures.setpoint.as_ref());
        }

        // An empty list never erases a known one
        if let Some(versions) = delta.versions.as_ref().filter(|v| !v.is_empty()) {
            changed |= set(&mut self.versions, versions.clone());
        }

        if let Some(update) = &delta.update {
            changed |= merge(&mut self.update_in_progress, update.in_progress.as_ref());
        }
        if let Some(wizard) = &delta.configuration_wizard {
            changed |= merge(&mut self.configuration_wizard_active, wizard.active.as_ref());
        }

        changed
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::register::Function;

    fn state() -> DeviceState {
        DeviceState::new(DeviceId::new("IAM_1"))
    }

    #[test]
    fn observation_from_numeric_item() {
        let obs = RegisterObservation::from_data_item(&json!({"id": 32, "value": 210}));
        assert_eq!(obs, Some(RegisterObservation::new(32, 210)));
    }

    #[test]
    fn observation_from_lenient_item() {
        assert_eq!(
            RegisterObservation::from_data_item(&json!({"id": "29", "value": "1"})),
            Some(RegisterObservation::new(29, 1))
        );
        assert_eq!(
            RegisterObservation::from_data_item(&json!({"id": 102, "value": true})),
            Some(RegisterObservation::new(102, 1))
        );
        assert_eq!(
            RegisterObservation::from_data_item(&json!({"id": 54, "value": 150.0})),
            Some(RegisterObservation::new(54, 150))
        );
    }

    #[test]
    fn observation_rejects_unusable_items() {
        assert_eq!(RegisterObservation::from_data_item(&json!({"id": 32})), None);
        assert_eq!(
            RegisterObservation::from_data_item(&json!({"id": 32, "value": null})),
            None
        );
        assert_eq!(
            RegisterObservation::from_data_item(&json!({"id": 32, "value": 21.5})),
            None
        );
        assert_eq!(
            RegisterObservation::from_data_item(&json!({"id": -1, "value": 1})),
            None
        );
    }

    #[test]
    fn temperature_registers_are_fixed_point() {
        let mut state = state();
        assert!(state.apply_register(Field::SetpointTemperature, 210));
        assert!(state.apply_register(Field::OutdoorAirTemperature, 150));
        assert!(state.apply_register(Field::SupplyAirTemperature, -35));

        let temperatures = state.temperatures();
        assert_eq!(temperatures.setpoint, Some(21.0));
        assert_eq!(temperatures.oat, Some(15.0));
        assert_eq!(temperatures.sat, Some(-3.5));
    }

    #[test]
    fn register_apply_reports_change_once() {
        let mut state = state();
        assert!(state.apply_register(Field::Function(Function::Heating), 1));
        assert!(!state.apply_register(Field::Function(Function::Heating), 1));
        assert!(state.apply_register(Field::Function(Function::Heating), 0));
        assert_eq!(state.functions().get(Function::Heating), Some(false));
    }

    #[test]
    fn out_of_range_register_value_is_ignored() {
        let mut state = state();
        assert!(!state.apply_register(Field::Airflow, 300));
        assert_eq!(state.airflow(), None);
    }

    #[test]
    fn delta_deserializes_with_nulls_as_absent() {
        let delta: PushDelta = serde_json::from_value(json!({
            "id": "IAM_1",
            "temperature": null,
            "humidity": 45,
            "update": {"inProgress": false},
            "configurationWizard": {"active": true},
            "unmodelled": "ignored"
        }))
        .unwrap();

        assert_eq!(delta.device_id.as_str(), "IAM_1");
        assert_eq!(delta.temperature, None);
        assert_eq!(delta.humidity, Some(45.0));
        assert_eq!(delta.update.unwrap().in_progress, Some(false));
        assert_eq!(delta.configuration_wizard.unwrap().active, Some(true));
    }

    #[test]
    fn malformed_delta_field_does_not_drop_the_others() {
        let delta: PushDelta = serde_json::from_value(json!({
            "id": "IAM_1",
            "temperature": 22.5,
            "humidity": 40,
            "co2": 650.5,
            "filterExpiration": -1,
            "airflow": "high",
            "connectivity": ["online"]
        }))
        .unwrap();

        assert_eq!(delta.temperature, Some(22.5));
        assert_eq!(delta.humidity, Some(40.0));
        assert_eq!(delta.co2, None);
        assert_eq!(delta.filter_expiration, None);
        assert_eq!(delta.airflow, None);

        let mut state = state();
        state.co2 = Some(600);
        assert!(state.merge_delta(&delta));
        assert_eq!(state.temperature(), Some(22.5));
        assert_eq!(state.humidity(), Some(40.0));
        assert_eq!(state.co2(), Some(600));
        assert_eq!(state.connectivity(), Some(&["online".to_string()][..]));
    }

    #[test]
    fn delta_without_id_is_rejected() {
        assert!(serde_json::from_value::<PushDelta>(json!({"temperature": 21.0})).is_err());
    }

    #[test]
    fn delta_merge_keeps_absent_fields() {
        let mut state = state();
        state.temperature = Some(22.5);
        state.temperatures.oat = Some(15.0);

        let delta = PushDelta {
            humidity: Some(40.0),
            temperatures: Some(Temperatures {
                setpoint: Some(21.0),
                ..Temperatures::default()
            }),
            ..PushDelta::new(DeviceId::new("IAM_1"))
        };
        assert!(state.merge_delta(&delta));

        assert_eq!(state.temperature(), Some(22.5));
        assert_eq!(state.humidity(), Some(40.0));
        assert_eq!(state.temperatures().oat, Some(15.0));
        assert_eq!(state.temperatures().setpoint, Some(21.0));
    }

    #[test]
    fn empty_versions_do_not_erase() {
        let mut state = state();
        let version = Version {
            kind: "hardware".to_string(),
            version: "2.0".to_string(),
        };
        state.versions = Some(vec![version.clone()]);

        let delta = PushDelta {
            versions: Some(Vec::new()),
            ..PushDelta::new(DeviceId::new("IAM_1"))
        };
        assert!(!state.merge_delta(&delta));
        assert_eq!(state.versions(), Some(&[version][..]));
    }

    #[test]
    fn delta_merge_is_idempotent() {
        let mut state = state();
        let delta = PushDelta {
            model: Some("VTR 300".to_string()),
            airflow: Some(2),
            connectivity: Some(vec!["online".to_string()]),
            ..PushDelta::new(DeviceId::new("IAM_1"))
        };
        assert!(state.merge_delta(&delta));
        let once = state.clone();
        assert!(!state.merge_delta(&delta));
        assert_eq!(state, once);
    }
}
