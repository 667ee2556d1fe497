// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Brightness type for bulbs that are switched on.
//!
//! A bulb that is on never goes below 1%, so the valid range is 1-100%.

use std::fmt;

use crate::error::ValueError;

/// Brightness level as a percentage (1-100).
///
/// # Examples
///
/// ```
/// use rotary_sync::types::Brightness;
///
/// let level = Brightness::new(75).unwrap();
/// assert_eq!(level.value(), 75);
///
/// // Out-of-range readings are clamped rather than rejected
/// assert_eq!(Brightness::clamped(0), Brightness::MIN);
/// assert_eq!(Brightness::clamped(200), Brightness::MAX);
///
/// assert!(Brightness::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Brightness(u8);

impl Brightness {
    /// Minimum brightness (1%), also the resting level of a bulb that is off.
    pub const MIN: Self = Self(1);

    /// Maximum brightness (100%).
    pub const MAX: Self = Self(100);

    /// Creates a new brightness value.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if value is 0 or exceeds 100.
    pub fn new(value: u8) -> Result<Self, ValueError> {
        if !(Self::MIN.0..=Self::MAX.0).contains(&value) {
            return Err(ValueError::OutOfRange {
                min: u64::from(Self::MIN.0),
                max: u64::from(Self::MAX.0),
                actual: u64::from(value),
            });
        }
        Ok(Self(value))
    }

    /// Creates a brightness from an arbitrary reading, clamping to 1-100.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn clamped(value: u64) -> Self {
        if value < Self::MIN.0 as u64 {
            Self::MIN
        } else if value > Self::MAX.0 as u64 {
            Self::MAX
        } else {
            // In range, so it fits a u8
            Self(value as u8)
        }
    }

    /// Returns the brightness percentage value.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for Brightness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl TryFrom<u8> for Brightness {
    type Error = ValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Brightness> for u8 {
    fn from(value: Brightness) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brightness_valid_values() {
        for v in 1..=100 {
            assert_eq!(Brightness::new(v).unwrap().value(), v);
        }
    }

    #[test]
    fn brightness_invalid_values() {
        assert!(matches!(
            Brightness::new(0),
            Err(ValueError::OutOfRange { actual: 0, .. })
        ));
        assert!(Brightness::new(101).is_err());
    }

    #[test]
    fn brightness_clamped_bounds() {
        assert_eq!(Brightness::clamped(0).value(), 1);
        assert_eq!(Brightness::clamped(1).value(), 1);
        assert_eq!(Brightness::clamped(100).value(), 100);
        assert_eq!(Brightness::clamped(101).value(), 100);
        assert_eq!(Brightness::clamped(u64::MAX).value(), 100);
    }

    #[test]
    fn brightness_clamped_is_identity_in_range() {
        for v in 1..=100_u8 {
            assert_eq!(Brightness::clamped(u64::from(v)).value(), v);
        }
    }

    #[test]
    fn brightness_clamped_is_monotonic() {
        let mut previous = Brightness::clamped(0);
        for v in 1..=300 {
            let current = Brightness::clamped(v);
            assert!(current >= previous);
            previous = current;
        }
    }

    #[test]
    fn brightness_display() {
        assert_eq!(Brightness::new(75).unwrap().to_string(), "75%");
    }
}
