// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device state tracking.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::device::DeviceId;
use crate::register::Function;
use crate::types::UserMode;

/// Last known state of a ventilation unit.
///
/// Every field is `None` until it is first observed, either from a pull
/// snapshot or from a push delta. Once known, a field only changes when a
/// newer observation of that same field arrives; updates that do not mention
/// a field never clear it.
///
/// The state is only mutated through the
/// [`StateReconciler`](super::StateReconciler). Readers obtain consistent
/// snapshots by cloning.
///
/// # Examples
///
/// ```
/// use systemair_lib::DeviceId;
/// use systemair_lib::state::DeviceState;
///
/// let state = DeviceState::new(DeviceId::new("IAM_1"));
/// assert_eq!(state.user_mode_value(), None);
/// assert_eq!(state.temperatures().setpoint, None);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceState {
    pub(crate) device_id: DeviceId,
    pub(crate) user_mode: Option<u8>,
    pub(crate) user_mode_remaining_time: Option<i64>,
    pub(crate) airflow: Option<u8>,
    pub(crate) temperature: Option<f64>,
    pub(crate) temperatures: Temperatures,
    pub(crate) humidity: Option<f64>,
    pub(crate) air_quality: Option<u8>,
    pub(crate) co2: Option<u32>,
    pub(crate) active_alarms: Option<bool>,
    pub(crate) alarm_type_a: Option<bool>,
    pub(crate) alarm_type_b: Option<bool>,
    pub(crate) alarm_type_c: Option<bool>,
    pub(crate) functions: ActiveFunctions,
    pub(crate) eco_mode: Option<bool>,
    pub(crate) locked_user: Option<bool>,
    pub(crate) setup_wizard_required: Option<bool>,
    pub(crate) reheater_type: Option<i64>,
    pub(crate) connectivity: Option<Vec<String>>,
    pub(crate) versions: Option<Vec<Version>>,
    pub(crate) filter_expiration: Option<u64>,
    pub(crate) update_in_progress: Option<bool>,
    pub(crate) configuration_wizard_active: Option<bool>,
    pub(crate) model: Option<String>,
    pub(crate) serial_number: Option<String>,
}

/// Temperature group of a unit, in degrees Celsius.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Temperatures {
    /// Outdoor air temperature.
    #[serde(default)]
    pub oat: Option<f64>,
    /// Supply air temperature.
    #[serde(default)]
    pub sat: Option<f64>,
    /// Supply air temperature setpoint.
    #[serde(default)]
    pub setpoint: Option<f64>,
}

impl Temperatures {
    /// Returns `true` if no temperature is known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.oat.is_none() && self.sat.is_none() && self.setpoint.is_none()
    }
}

/// A firmware or hardware version entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    /// Component the version applies to, e.g. `hardware`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Version string.
    pub version: String,
}

/// Function-active flags, each unknown until observed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActiveFunctions([Option<bool>; Function::ALL.len()]);

impl ActiveFunctions {
    /// Returns the flag of a function.
    #[must_use]
    pub fn get(&self, function: Function) -> Option<bool> {
        self.0[function.index()]
    }

    pub(crate) fn set(&mut self, function: Function, active: bool) {
        self.0[function.index()] = Some(active);
    }

    /// Returns the functions currently known to be active.
    #[must_use]
    pub fn active(&self) -> Vec<Function> {
        Function::ALL
            .into_iter()
            .filter(|f| self.get(*f) == Some(true))
            .collect()
    }
}

impl Serialize for ActiveFunctions {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(Function::ALL.len()))?;
        for function in Function::ALL {
            map.serialize_entry(function.as_str(), &self.get(function))?;
        }
        map.end()
    }
}

impl DeviceState {
    /// Creates a state with every field unknown.
    #[must_use]
    pub fn new(device_id: DeviceId) -> Self {
        Self {
            device_id,
            user_mode: None,
            user_mode_remaining_time: None,
            airflow: None,
            temperature: None,
            temperatures: Temperatures::default(),
            humidity: None,
            air_quality: None,
            co2: None,
            active_alarms: None,
            alarm_type_a: None,
            alarm_type_b: None,
            alarm_type_c: None,
            functions: ActiveFunctions::default(),
            eco_mode: None,
            locked_user: None,
            setup_wizard_required: None,
            reheater_type: None,
            connectivity: None,
            versions: None,
            filter_expiration: None,
            update_in_progress: None,
            configuration_wizard_active: None,
            model: None,
            serial_number: None,
        }
    }

    /// Returns the identifier of the owning device.
    #[must_use]
    pub fn device_id(&self) -> &DeviceId {
        &self.device_id
    }

    // ========== Operating mode ==========

    /// Returns the raw user mode value.
    #[must_use]
    pub fn user_mode_value(&self) -> Option<u8> {
        self.user_mode
    }

    /// Returns the user mode, if known and recognized.
    #[must_use]
    pub fn user_mode(&self) -> Option<UserMode> {
        self.user_mode.and_then(|v| UserMode::try_from(v).ok())
    }

    /// Returns the remaining time of a temporary user mode.
    #[must_use]
    pub fn user_mode_remaining_time(&self) -> Option<i64> {
        self.user_mode_remaining_time
    }

    /// Returns the airflow level.
    #[must_use]
    pub fn airflow(&self) -> Option<u8> {
        self.airflow
    }

    // ========== Climate ==========

    /// Returns the room temperature reported by the unit.
    #[must_use]
    pub fn temperature(&self) -> Option<f64> {
        self.temperature
    }

    /// Returns the temperature group.
    #[must_use]
    pub fn temperatures(&self) -> Temperatures {
        self.temperatures
    }

    /// Returns the relative humidity in percent.
    #[must_use]
    pub fn humidity(&self) -> Option<f64> {
        self.humidity
    }

    /// Returns the indoor air quality level.
    #[must_use]
    pub fn air_quality(&self) -> Option<u8> {
        self.air_quality
    }

    /// Returns the CO2 level in ppm.
    #[must_use]
    pub fn co2(&self) -> Option<u32> {
        self.co2
    }

    // ========== Alarms and functions ==========

    /// Returns whether the unit reports any active alarm.
    #[must_use]
    pub fn active_alarms(&self) -> Option<bool> {
        self.active_alarms
    }

    /// Returns the type A alarm flag.
    #[must_use]
    pub fn alarm_type_a(&self) -> Option<bool> {
        self.alarm_type_a
    }

    /// Returns the type B alarm flag.
    #[must_use]
    pub fn alarm_type_b(&self) -> Option<bool> {
        self.alarm_type_b
    }

    /// Returns the type C alarm flag.
    #[must_use]
    pub fn alarm_type_c(&self) -> Option<bool> {
        self.alarm_type_c
    }

    /// Returns the function-active flags.
    #[must_use]
    pub fn functions(&self) -> &ActiveFunctions {
        &self.functions
    }

    /// Returns the eco mode switch.
    #[must_use]
    pub fn eco_mode(&self) -> Option<bool> {
        self.eco_mode
    }

    /// Returns the user lock flag.
    #[must_use]
    pub fn locked_user(&self) -> Option<bool> {
        self.locked_user
    }

    /// Returns whether the start-up wizard must be run.
    #[must_use]
    pub fn setup_wizard_required(&self) -> Option<bool> {
        self.setup_wizard_required
    }

    /// Returns the configured reheater type.
    #[must_use]
    pub fn reheater_type(&self) -> Option<i64> {
        self.reheater_type
    }

    // ========== Unit information ==========

    /// Returns the connectivity flags.
    #[must_use]
    pub fn connectivity(&self) -> Option<&[String]> {
        self.connectivity.as_deref()
    }

    /// Returns the firmware and hardware versions.
    #[must_use]
    pub fn versions(&self) -> Option<&[Version]> {
        self.versions.as_deref()
    }

    /// Returns the remaining filter time in seconds.
    #[must_use]
    pub fn filter_expiration(&self) -> Option<u64> {
        self.filter_expiration
    }

    /// Returns whether a firmware update is in progress.
    #[must_use]
    pub fn update_in_progress(&self) -> Option<bool> {
        self.update_in_progress
    }

    /// Returns whether the configuration wizard is active.
    #[must_use]
    pub fn configuration_wizard_active(&self) -> Option<bool> {
        self.configuration_wizard_active
    }

    /// Returns the unit model.
    #[must_use]
    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    /// Returns the unit serial number.
    #[must_use]
    pub fn serial_number(&self) -> Option<&str> {
        self.serial_number.as_deref()
    }
}

struct Show<'a, T>(&'a Option<T>);

impl<T: fmt::Display> fmt::Display for Show<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => value.fmt(f),
            None => f.write_str("unknown"),
        }
    }
}

impl fmt::Display for DeviceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = self.user_mode();
        writeln!(f, "Status for {}:", self.device_id)?;
        writeln!(f, "  Model: {}", Show(&self.model))?;
        writeln!(f, "  Serial number: {}", Show(&self.serial_number))?;
        writeln!(f, "  User mode: {}", Show(&mode))?;
        writeln!(f, "  Airflow: {}", Show(&self.airflow))?;
        writeln!(f, "  Temperature: {}", Show(&self.temperature))?;
        writeln!(f, "  Humidity: {}", Show(&self.humidity))?;
        writeln!(f, "  Air quality: {}", Show(&self.air_quality))?;
        writeln!(f, "  CO2: {}", Show(&self.co2))?;
        writeln!(f, "  Active alarms: {}", Show(&self.active_alarms))?;
        writeln!(f, "  Filter expiration: {}", Show(&self.filter_expiration))?;
        writeln!(f, "Temperatures:")?;
        writeln!(f, "  - OAT: {}", Show(&self.temperatures.oat))?;
        writeln!(f, "  - SAT: {}", Show(&self.temperatures.sat))?;
        writeln!(f, "  - SETPOINT: {}", Show(&self.temperatures.setpoint))?;
        writeln!(f, "Versions:")?;
        for version in self.versions.iter().flatten() {
            writeln!(
                f,
                "  - {}: {}",
                version.kind.to_uppercase(),
                version.version
            )?;
        }
        writeln!(f, "Active functions:")?;
        for function in self.functions.active() {
            writeln!(f, "  - {function}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_is_unknown() {
        let state = DeviceState::new(DeviceId::new("IAM_1"));
        assert_eq!(state.device_id().as_str(), "IAM_1");
        assert!(state.temperatures().is_empty());
        assert!(state.functions().active().is_empty());
        assert_eq!(state.functions().get(Function::Heating), None);
        assert!(state.versions().is_none());
    }

    #[test]
    fn user_mode_is_typed() {
        let mut state = DeviceState::new(DeviceId::new("IAM_1"));
        state.user_mode = Some(1);
        assert_eq!(state.user_mode(), Some(UserMode::Manual));

        state.user_mode = Some(42);
        assert_eq!(state.user_mode(), None);
        assert_eq!(state.user_mode_value(), Some(42));
    }

    #[test]
    fn active_functions_lists_true_flags() {
        let mut functions = ActiveFunctions::default();
        functions.set(Function::Heating, true);
        functions.set(Function::Cooling, false);
        assert_eq!(functions.active(), vec![Function::Heating]);
        assert_eq!(functions.get(Function::Cooling), Some(false));
    }

    #[test]
    fn serializes_to_status_map() {
        let mut state = DeviceState::new(DeviceId::new("IAM_1"));
        state.airflow = Some(3);
        state.temperatures.setpoint = Some(21.0);
        state.functions.set(Function::FreeCooling, true);

        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["device_id"], "IAM_1");
        assert_eq!(json["airflow"], 3);
        assert_eq!(json["temperatures"]["setpoint"], 21.0);
        assert_eq!(json["functions"]["free_cooling"], true);
        assert!(json["functions"]["heating"].is_null());
    }

    #[test]
    fn display_report_lists_known_values() {
        let mut state = DeviceState::new(DeviceId::new("IAM_1"));
        state.user_mode = Some(5);
        state.versions = Some(vec![Version {
            kind: "hardware".to_string(),
            version: "2.0".to_string(),
        }]);
        state.functions.set(Function::Heating, true);

        let report = state.to_string();
        assert!(report.contains("User mode: Away"));
        assert!(report.contains("Airflow: unknown"));
        assert!(report.contains("- HARDWARE: 2.0"));
        assert!(report.contains("- heating"));
    }
}
