// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Power state of a bulb.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// Represents the power state of a bulb.
///
/// The rotary input encodes power as `0` (off) or `1` (on); parsing accepts
/// exactly those two literals.
///
/// # Examples
///
/// ```
/// use rotary_sync::types::PowerState;
///
/// assert_eq!("1".parse::<PowerState>().unwrap(), PowerState::On);
/// assert_eq!("0".parse::<PowerState>().unwrap(), PowerState::Off);
/// assert!("on".parse::<PowerState>().is_err());
///
/// assert_eq!(PowerState::On.as_str(), "ON");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerState {
    /// Power is off.
    Off,
    /// Power is on.
    On,
}

impl PowerState {
    /// Returns the display representation used in logs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "OFF",
            Self::On => "ON",
        }
    }

    /// Returns the sub-command understood by the device-control program.
    #[must_use]
    pub const fn as_kasa_arg(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::On => "on",
        }
    }

    /// Returns true if the state is [`PowerState::On`].
    #[must_use]
    pub const fn is_on(&self) -> bool {
        matches!(self, Self::On)
    }
}

impl fmt::Display for PowerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PowerState {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "0" => Ok(Self::Off),
            "1" => Ok(Self::On),
            _ => Err(ValueError::InvalidPowerState(s.to_string())),
        }
    }
}

impl From<bool> for PowerState {
    fn from(value: bool) -> Self {
        if value { Self::On } else { Self::Off }
    }
}

impl From<PowerState> for bool {
    fn from(value: PowerState) -> Self {
        value.is_on()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn power_state_from_source_encoding() {
        assert_eq!("0".parse::<PowerState>().unwrap(), PowerState::Off);
        assert_eq!("1".parse::<PowerState>().unwrap(), PowerState::On);
    }

    #[test]
    fn power_state_rejects_other_literals() {
        for input in ["", "2", "01", "on", "ON", "true", " 1", "1 "] {
            let result = input.parse::<PowerState>();
            assert!(
                matches!(result, Err(ValueError::InvalidPowerState(ref s)) if s == input),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn power_state_bool_conversions() {
        assert_eq!(PowerState::from(true), PowerState::On);
        assert_eq!(PowerState::from(false), PowerState::Off);
        assert!(bool::from(PowerState::On));
        assert!(!bool::from(PowerState::Off));
    }

    #[test]
    fn power_state_kasa_arg() {
        assert_eq!(PowerState::On.as_kasa_arg(), "on");
        assert_eq!(PowerState::Off.as_kasa_arg(), "off");
    }

    #[test]
    fn power_state_display() {
        assert_eq!(PowerState::On.to_string(), "ON");
        assert_eq!(PowerState::Off.to_string(), "OFF");
    }
}
