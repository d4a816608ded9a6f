// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Register table of the ventilation unit control board.
//!
//! Every data point of a unit is a numbered register. The [`RegisterTable`]
//! maps register ids to their names and, for the registers this library
//! models, to the [`Field`] of the device state they feed. The table is
//! built once and shared process-wide.
//!
//! # Examples
//!
//! ```
//! use systemair_lib::register::{Field, Function, RegisterTable, ids};
//!
//! let table = RegisterTable::global();
//!
//! let setpoint = table.get(ids::TC_SP).unwrap();
//! assert_eq!(setpoint.name, "REG_MAINBOARD_TC_SP");
//! assert!(setpoint.is_temperature());
//!
//! assert_eq!(
//!     table.field(ids::FUNCTION_ACTIVE_FREE_COOLING),
//!     Some(Field::Function(Function::FreeCooling))
//! );
//! assert_eq!(table.id("REG_MAINBOARD_SENSOR_OAT"), Some(ids::SENSOR_OAT));
//! ```

mod names;

use std::collections::HashMap;
use std::fmt;
use std::ops::RangeInclusive;
use std::sync::LazyLock;

use names::REGISTER_NAMES;

/// Numeric identifier of a register.
pub type RegisterId = u16;

/// Ids of the registers read or written by this library.
pub mod ids {
    use super::RegisterId;

    /// Current user mode.
    pub const USERMODE_MODE_HMI: RegisterId = 29;
    /// User mode change request (write only).
    pub const USERMODE_HMI_CHANGE_REQUEST: RegisterId = 30;
    /// Airflow level indication.
    pub const SPEED_INDICATION_APP: RegisterId = 31;
    /// Supply air temperature setpoint (tenths of a degree).
    pub const TC_SP: RegisterId = 32;
    /// Indoor air quality level.
    pub const IAQ_LEVEL: RegisterId = 33;
    /// Eco mode switch.
    pub const ECO_MODE_ON_OFF: RegisterId = 34;
    /// User lock.
    pub const LOCKED_USER: RegisterId = 35;
    /// Start-up wizard required flag.
    pub const SUW_REQUIRED: RegisterId = 43;
    /// Supply air temperature sensor (tenths of a degree).
    pub const SENSOR_SAT: RegisterId = 53;
    /// Outdoor air temperature sensor (tenths of a degree).
    pub const SENSOR_OAT: RegisterId = 54;
    /// First function-active flag.
    pub const FUNCTION_ACTIVE_COOLING: RegisterId = 102;
    /// Free cooling function-active flag.
    pub const FUNCTION_ACTIVE_FREE_COOLING: RegisterId = 103;
    /// Heating function-active flag.
    pub const FUNCTION_ACTIVE_HEATING: RegisterId = 104;
    /// Last function-active flag.
    pub const FUNCTION_ACTIVE_CDI_3: RegisterId = 118;
    /// Type A alarm.
    pub const ALARM_TYPE_A: RegisterId = 119;
    /// Type B alarm.
    pub const ALARM_TYPE_B: RegisterId = 120;
    /// Type C alarm.
    pub const ALARM_TYPE_C: RegisterId = 121;
    /// Remaining time of a temporary user mode, low word.
    pub const USERMODE_REMAINING_TIME_L: RegisterId = 250;
    /// Configured reheater type.
    pub const UNIT_CONFIG_REHEATER_TYPE: RegisterId = 260;
}

const MAINBOARD_PREFIX: &str = "REG_MAINBOARD_";
const FUNCTION_PREFIX: &str = "REG_MAINBOARD_FUNCTION_ACTIVE_";
const FUNCTION_RANGE: RangeInclusive<RegisterId> =
    ids::FUNCTION_ACTIVE_COOLING..=ids::FUNCTION_ACTIVE_CDI_3;

/// Registers mapped to a scalar state field.
const FIELD_REGISTERS: [(RegisterId, Field); 14] = [
    (ids::USERMODE_MODE_HMI, Field::UserMode),
    (ids::SPEED_INDICATION_APP, Field::Airflow),
    (ids::TC_SP, Field::SetpointTemperature),
    (ids::IAQ_LEVEL, Field::AirQuality),
    (ids::ECO_MODE_ON_OFF, Field::EcoMode),
    (ids::LOCKED_USER, Field::LockedUser),
    (ids::SUW_REQUIRED, Field::SetupWizardRequired),
    (ids::SENSOR_SAT, Field::SupplyAirTemperature),
    (ids::SENSOR_OAT, Field::OutdoorAirTemperature),
    (ids::ALARM_TYPE_A, Field::AlarmTypeA),
    (ids::ALARM_TYPE_B, Field::AlarmTypeB),
    (ids::ALARM_TYPE_C, Field::AlarmTypeC),
    (ids::USERMODE_REMAINING_TIME_L, Field::UserModeRemainingTime),
    (ids::UNIT_CONFIG_REHEATER_TYPE, Field::ReheaterType),
];

/// A boolean function of the unit reported by the function-active registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Function {
    /// Cooling.
    Cooling,
    /// Free cooling.
    FreeCooling,
    /// Heating.
    Heating,
    /// Defrosting.
    Defrosting,
    /// Heat recovery.
    HeatRecovery,
    /// Cooling recovery.
    CoolingRecovery,
    /// Moisture transfer.
    MoistureTransfer,
    /// Secondary air.
    SecondaryAir,
    /// Central vacuum cleaner.
    VacuumCleaner,
    /// Cooker hood.
    CookerHood,
    /// User lock.
    UserLock,
    /// Eco mode.
    EcoMode,
    /// Heater cool down.
    HeaterCoolDown,
    /// Pressure guard.
    PressureGuard,
    /// Configurable digital input 1.
    Cdi1,
    /// Configurable digital input 2.
    Cdi2,
    /// Configurable digital input 3.
    Cdi3,
}

impl Function {
    /// All functions, in register order.
    pub const ALL: [Self; 17] = [
        Self::Cooling,
        Self::FreeCooling,
        Self::Heating,
        Self::Defrosting,
        Self::HeatRecovery,
        Self::CoolingRecovery,
        Self::MoistureTransfer,
        Self::SecondaryAir,
        Self::VacuumCleaner,
        Self::CookerHood,
        Self::UserLock,
        Self::EcoMode,
        Self::HeaterCoolDown,
        Self::PressureGuard,
        Self::Cdi1,
        Self::Cdi2,
        Self::Cdi3,
    ];

    /// Returns the snake case name of the function.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cooling => "cooling",
            Self::FreeCooling => "free_cooling",
            Self::Heating => "heating",
            Self::Defrosting => "defrosting",
            Self::HeatRecovery => "heat_recovery",
            Self::CoolingRecovery => "cooling_recovery",
            Self::MoistureTransfer => "moisture_transfer",
            Self::SecondaryAir => "secondary_air",
            Self::VacuumCleaner => "vacuum_cleaner",
            Self::CookerHood => "cooker_hood",
            Self::UserLock => "user_lock",
            Self::EcoMode => "eco_mode",
            Self::HeaterCoolDown => "heater_cool_down",
            Self::PressureGuard => "pressure_guard",
            Self::Cdi1 => "cdi_1",
            Self::Cdi2 => "cdi_2",
            Self::Cdi3 => "cdi_3",
        }
    }

    /// Looks a function up by its snake case name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == name)
    }

    /// Returns the position of the function in [`Function::ALL`].
    #[must_use]
    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Device state field fed by a register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Current user mode.
    UserMode,
    /// Airflow level.
    Airflow,
    /// Supply air temperature setpoint.
    SetpointTemperature,
    /// Supply air temperature.
    SupplyAirTemperature,
    /// Outdoor air temperature.
    OutdoorAirTemperature,
    /// Remaining time of a temporary user mode.
    UserModeRemainingTime,
    /// Indoor air quality level.
    AirQuality,
    /// Eco mode switch.
    EcoMode,
    /// User lock.
    LockedUser,
    /// Type A alarm.
    AlarmTypeA,
    /// Type B alarm.
    AlarmTypeB,
    /// Type C alarm.
    AlarmTypeC,
    /// Start-up wizard required flag.
    SetupWizardRequired,
    /// Configured reheater type.
    ReheaterType,
    /// A function-active flag.
    Function(Function),
}

impl Field {
    /// Returns `true` for fields encoded as tenths of a degree.
    #[must_use]
    pub const fn is_temperature(&self) -> bool {
        matches!(
            self,
            Self::SetpointTemperature | Self::SupplyAirTemperature | Self::OutdoorAirTemperature
        )
    }
}

/// Entry of the register table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterInfo {
    /// Register id.
    pub id: RegisterId,
    /// Full register name, e.g. `REG_MAINBOARD_TC_SP`.
    pub name: &'static str,
    /// The state field this register feeds, if modeled.
    pub field: Option<Field>,
}

impl RegisterInfo {
    /// Returns `true` if the raw value is a fixed-point temperature.
    #[must_use]
    pub fn is_temperature(&self) -> bool {
        self.field.is_some_and(|f| f.is_temperature())
    }

    /// Returns the name without the `REG_MAINBOARD_` prefix.
    #[must_use]
    pub fn short_name(&self) -> &'static str {
        self.name
            .strip_prefix(MAINBOARD_PREFIX)
            .unwrap_or(self.name)
    }
}

/// Bidirectional lookup between register ids, names and state fields.
#[derive(Debug)]
pub struct RegisterTable {
    by_id: Vec<RegisterInfo>,
    by_name: HashMap<&'static str, RegisterId>,
}

static TABLE: LazyLock<RegisterTable> = LazyLock::new(RegisterTable::build);

impl RegisterTable {
    /// Returns the process-wide table.
    #[must_use]
    pub fn global() -> &'static Self {
        &TABLE
    }

    fn build() -> Self {
        let mut by_id = Vec::with_capacity(REGISTER_NAMES.len());
        let mut by_name = HashMap::with_capacity(REGISTER_NAMES.len());

        for (id, name) in (0..).zip(REGISTER_NAMES) {
            let field = FIELD_REGISTERS
                .iter()
                .find(|(register, _)| *register == id)
                .map(|(_, field)| *field)
                .or_else(|| function_field(id, name));

            by_id.push(RegisterInfo { id, name, field });
            by_name.insert(name, id);
        }

        Self { by_id, by_name }
    }

    /// Returns the entry for a register id.
    #[must_use]
    pub fn get(&self, id: RegisterId) -> Option<&RegisterInfo> {
        self.by_id.get(usize::from(id))
    }

    /// Returns the full name of a register.
    #[must_use]
    pub fn name(&self, id: RegisterId) -> Option<&'static str> {
        self.get(id).map(|info| info.name)
    }

    /// Returns the register name without the `REG_MAINBOARD_` prefix.
    #[must_use]
    pub fn short_name(&self, id: RegisterId) -> Option<&'static str> {
        self.get(id).map(RegisterInfo::short_name)
    }

    /// Returns the id of a register by its full name.
    #[must_use]
    pub fn id(&self, name: &str) -> Option<RegisterId> {
        self.by_name.get(name).copied()
    }

    /// Returns the state field fed by a register.
    #[must_use]
    pub fn field(&self, id: RegisterId) -> Option<Field> {
        self.get(id).and_then(|info| info.field)
    }

    /// Returns the contiguous range of function-active registers.
    #[must_use]
    pub fn function_range(&self) -> RangeInclusive<RegisterId> {
        FUNCTION_RANGE
    }

    /// Returns the number of registers in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Returns `true` if the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

/// Derives the function of a register in the function-active range from the
/// terminal segment of its name.
fn function_field(id: RegisterId, name: &str) -> Option<Field> {
    if !FUNCTION_RANGE.contains(&id) {
        return None;
    }
    let segment = name.strip_prefix(FUNCTION_PREFIX)?.to_ascii_lowercase();
    Function::from_name(&segment).map(Field::Function)
}
