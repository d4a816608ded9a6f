// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Ventilation user modes.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// Operating mode selected by the user on a ventilation unit.
///
/// The numeric value is the one reported by the mode register and by push
/// updates.
///
/// # Examples
///
/// ```
/// use systemair_lib::types::UserMode;
///
/// let mode = UserMode::try_from(5).unwrap();
/// assert_eq!(mode, UserMode::Away);
/// assert_eq!(mode.as_str(), "Away");
/// assert_eq!(mode.change_request_value(), 6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum UserMode {
    /// Demand-controlled ventilation.
    Auto,
    /// Fixed airflow level.
    Manual,
    /// Temporarily increased airflow.
    Crowded,
    /// Temporary maximum airflow.
    Refresh,
    /// Overpressure for lighting a fireplace.
    Fireplace,
    /// Reduced airflow while away.
    Away,
    /// Long-term reduced airflow.
    Holiday,
}

impl UserMode {
    /// All modes, ordered by numeric value.
    pub const ALL: [Self; 7] = [
        Self::Auto,
        Self::Manual,
        Self::Crowded,
        Self::Refresh,
        Self::Fireplace,
        Self::Away,
        Self::Holiday,
    ];

    /// Returns the numeric value reported by the device.
    #[must_use]
    pub const fn value(&self) -> u8 {
        match self {
            Self::Auto => 0,
            Self::Manual => 1,
            Self::Crowded => 2,
            Self::Refresh => 3,
            Self::Fireplace => 4,
            Self::Away => 5,
            Self::Holiday => 6,
        }
    }

    /// Returns the value to write to the mode change request register.
    ///
    /// The backend expects the reported value plus one on this register.
    #[must_use]
    pub const fn change_request_value(&self) -> u8 {
        self.value() + 1
    }

    /// Returns the display name of the mode.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "Auto",
            Self::Manual => "Manual",
            Self::Crowded => "Crowded",
            Self::Refresh => "Refresh",
            Self::Fireplace => "Fireplace",
            Self::Away => "Away",
            Self::Holiday => "Holiday",
        }
    }
}

impl fmt::Display for UserMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<u8> for UserMode {
    type Error = ValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(usize::from(value))
            .copied()
            .ok_or_else(|| ValueError::InvalidUserMode(value.to_string()))
    }
}

impl FromStr for UserMode {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(value) = s.parse::<u8>() {
            return Self::try_from(value);
        }
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ValueError::InvalidUserMode(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_match_index() {
        for (index, mode) in UserMode::ALL.iter().enumerate() {
            assert_eq!(usize::from(mode.value()), index);
        }
    }

    #[test]
    fn change_request_is_offset_by_one() {
        assert_eq!(UserMode::Auto.change_request_value(), 1);
        assert_eq!(UserMode::Holiday.change_request_value(), 7);
    }

    #[test]
    fn try_from_out_of_range() {
        assert_eq!(
            UserMode::try_from(7),
            Err(ValueError::InvalidUserMode("7".to_string()))
        );
    }

    #[test]
    fn parse_by_name_or_number() {
        assert_eq!("fireplace".parse::<UserMode>(), Ok(UserMode::Fireplace));
        assert_eq!("MANUAL".parse::<UserMode>(), Ok(UserMode::Manual));
        assert_eq!("3".parse::<UserMode>(), Ok(UserMode::Refresh));
        assert!("turbo".parse::<UserMode>().is_err());
    }

    #[test]
    fn display_uses_name() {
        assert_eq!(UserMode::Crowded.to_string(), "Crowded");
    }
}
