// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Reader for the rotary input file.
//!
//! The dial writes one `<brightness>;<power>` line per change, for example
//! `42;1`. Only the last line of the file is meaningful; earlier lines are
//! history.

use std::path::Path;
use std::str::FromStr;

use crate::error::{MalformedReason, ReadError};
use crate::types::PowerState;

/// Separator between the brightness and power fields.
pub const FIELD_DELIMITER: char = ';';

/// A validated rotary reading.
///
/// # Examples
///
/// ```
/// use rotary_sync::Reading;
/// use rotary_sync::types::PowerState;
///
/// let reading: Reading = " 42;1 ".parse().unwrap();
/// assert_eq!(reading.brightness, 42);
/// assert_eq!(reading.power, PowerState::On);
///
/// assert!("abc;1".parse::<Reading>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reading {
    /// Brightness as written by the dial, not yet clamped.
    pub brightness: u64,
    /// Requested power state.
    pub power: PowerState,
}

impl FromStr for Reading {
    type Err = ReadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let line = s.trim();
        let malformed = |reason| ReadError::Malformed {
            line: line.to_string(),
            reason,
        };

        let fields: Vec<&str> = line.split(FIELD_DELIMITER).collect();
        let [brightness, power] = fields.as_slice() else {
            return Err(malformed(MalformedReason::FieldCount(fields.len())));
        };

        // `u64::from_str` alone would accept a leading '+'
        if brightness.is_empty() || !brightness.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed(MalformedReason::Brightness((*brightness).to_string())));
        }
        // All digits, so parsing only fails on overflow; that still clamps to 100
        let brightness = brightness.parse::<u64>().unwrap_or(u64::MAX);

        let power = power
            .parse::<PowerState>()
            .map_err(|_| malformed(MalformedReason::Power((*power).to_string())))?;

        Ok(Self { brightness, power })
    }
}

/// Reads and validates the last line of the rotary input file.
///
/// The file is only ever opened for reading.
///
/// # Errors
///
/// Returns `ReadError::Io` if the file cannot be read, `ReadError::Empty` if
/// it has no content, and `ReadError::Malformed` if the last line is invalid.
pub async fn try_read_latest(path: &Path) -> Result<Reading, ReadError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ReadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    let Some(last_line) = content.lines().last() else {
        return Err(ReadError::Empty {
            path: path.to_path_buf(),
        });
    };

    last_line.parse()
}

/// Returns the latest valid reading, or `None` if there is none.
///
/// Never fails: every failure is logged once, at warning level or above,
/// and degrades to `None`.
pub async fn read_latest(path: &Path) -> Option<Reading> {
    match try_read_latest(path).await {
        Ok(reading) => {
            tracing::debug!(
                path = %path.display(),
                brightness = reading.brightness,
                power = %reading.power,
                "Read rotary value"
            );
            Some(reading)
        }
        Err(e @ ReadError::Io { .. }) => {
            tracing::error!(error = %e, "Could not read rotary value");
            None
        }
        Err(ReadError::Empty { .. }) => {
            tracing::warn!(path = %path.display(), "Rotary file is empty");
            None
        }
        Err(ReadError::Malformed { line, reason }) => {
            tracing::warn!(line = %line, reason = %reason, "Invalid line format in file");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn malformed_reason(input: &str) -> MalformedReason {
        match input.parse::<Reading>() {
            Err(ReadError::Malformed { reason, .. }) => reason,
            other => panic!("expected malformed for {input:?}, got {other:?}"),
        }
    }

    #[test]
    fn parses_valid_lines() {
        for (line, brightness, power) in [
            ("42;1", 42, PowerState::On),
            ("0;0", 0, PowerState::Off),
            ("200;0", 200, PowerState::Off),
            ("007;1", 7, PowerState::On),
            ("18446744073709551615;1", u64::MAX, PowerState::On),
        ] {
            let reading: Reading = line.parse().unwrap();
            assert_eq!(reading, Reading { brightness, power }, "{line}");
        }
    }

    #[test]
    fn ignores_surrounding_whitespace() {
        let reading: Reading = "\t 75;1 \r\n".parse().unwrap();
        assert_eq!(reading.brightness, 75);
        assert_eq!(reading.power, PowerState::On);
    }

    #[test]
    fn rejects_wrong_field_count() {
        assert_eq!(malformed_reason(""), MalformedReason::FieldCount(1));
        assert_eq!(malformed_reason("42"), MalformedReason::FieldCount(1));
        assert_eq!(malformed_reason("42;1;0"), MalformedReason::FieldCount(3));
        assert_eq!(malformed_reason("42,1"), MalformedReason::FieldCount(1));
    }

    #[test]
    fn rejects_non_digit_brightness() {
        for input in ["abc;1", "-5;1", "+5;1", ";1", "4 2;1", " 42 ;1", "4.2;1"] {
            assert!(
                matches!(malformed_reason(input), MalformedReason::Brightness(_)),
                "{input:?}"
            );
        }
    }

    #[test]
    fn overflowing_brightness_saturates() {
        for input in ["18446744073709551616;1", "99999999999999999999;1"] {
            let reading: Reading = input.parse().unwrap();
            assert_eq!(reading.brightness, u64::MAX, "{input}");
            assert_eq!(reading.power, PowerState::On);
        }
    }

    #[test]
    fn rejects_bad_power() {
        for input in ["42;2", "42;", "42;on", "42; 1", "42;true"] {
            assert!(
                matches!(malformed_reason(input), MalformedReason::Power(_)),
                "{input:?}"
            );
        }
    }

    #[test]
    fn malformed_keeps_trimmed_line() {
        let err = "  abc;1  ".parse::<Reading>().unwrap_err();
        assert!(matches!(err, ReadError::Malformed { ref line, .. } if line == "abc;1"));
    }
}
