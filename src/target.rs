// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Target bulb state derived from a reading.

use std::fmt;

use crate::reading::Reading;
use crate::types::{Brightness, PowerState};

/// The state every bulb should converge to for one sync cycle.
///
/// When power is off the brightness rests at [`Brightness::MIN`]; when on it
/// is the reading clamped to 1-100.
///
/// # Examples
///
/// ```
/// use rotary_sync::Reading;
/// use rotary_sync::target::TargetState;
/// use rotary_sync::types::{Brightness, PowerState};
///
/// let on = TargetState::from_reading(&"250;1".parse::<Reading>().unwrap());
/// assert_eq!(on.brightness, Brightness::MAX);
///
/// let off = TargetState::from_reading(&"80;0".parse::<Reading>().unwrap());
/// assert_eq!(off.power, PowerState::Off);
/// assert_eq!(off.brightness, Brightness::MIN);
///
/// // Digits beyond u64 still count as "too bright"
/// let full = TargetState::from_reading(&"99999999999999999999;1".parse::<Reading>().unwrap());
/// assert_eq!(full.brightness, Brightness::MAX);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetState {
    /// Desired power state.
    pub power: PowerState,
    /// Desired brightness, only sent to bulbs when `power` is on.
    pub brightness: Brightness,
}

impl TargetState {
    /// Derives the target state from a reading.
    #[must_use]
    pub const fn from_reading(reading: &Reading) -> Self {
        let brightness = if reading.power.is_on() {
            Brightness::clamped(reading.brightness)
        } else {
            Brightness::MIN
        };
        Self {
            power: reading.power,
            brightness,
        }
    }

    /// Returns true if a brightness command should follow the power command.
    #[must_use]
    pub const fn needs_brightness(&self) -> bool {
        self.power.is_on()
    }
}

impl From<&Reading> for TargetState {
    fn from(reading: &Reading) -> Self {
        Self::from_reading(reading)
    }
}

impl fmt::Display for TargetState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.needs_brightness() {
            write!(f, "{} at {}", self.power, self.brightness)
        } else {
            write!(f, "{}", self.power)
        }
    }
}
