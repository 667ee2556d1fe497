// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bulb command definitions.
//!
//! Commands are rendered to the argument list of the device-control program,
//! which has the shape `--host <address> <name> [payload]`.
//!
//! # Examples
//!
//! ```
//! use rotary_sync::command::{BulbCommand, Command};
//! use rotary_sync::types::{Brightness, PowerState};
//!
//! let on = BulbCommand::SetPower(PowerState::On);
//! assert_eq!(on.to_args("10.0.0.5"), ["--host", "10.0.0.5", "on"]);
//!
//! let dim = BulbCommand::SetBrightness(Brightness::new(75).unwrap());
//! assert_eq!(dim.name(), "brightness");
//! assert_eq!(dim.payload(), Some("75".to_string()));
//! ```

use std::fmt;

use crate::types::{Brightness, PowerState};

/// A command that can be sent to a bulb.
pub trait Command {
    /// Returns the sub-command name, e.g. `"on"` or `"brightness"`.
    fn name(&self) -> String;

    /// Returns the command payload, if any.
    fn payload(&self) -> Option<String>;

    /// Returns the full argument list addressed to `address`.
    fn to_args(&self, address: &str) -> Vec<String> {
        let mut args = vec!["--host".to_string(), address.to_string(), self.name()];
        args.extend(self.payload());
        args
    }
}

/// The two operations a bulb supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulbCommand {
    /// Switch the bulb on or off.
    SetPower(PowerState),
    /// Set brightness of a bulb that is on.
    SetBrightness(Brightness),
}

impl BulbCommand {
    /// Short label used in logs.
    #[must_use]
    pub const fn operation(&self) -> &'static str {
        match self {
            Self::SetPower(_) => "power",
            Self::SetBrightness(_) => "brightness",
        }
    }
}

impl Command for BulbCommand {
    fn name(&self) -> String {
        match self {
            Self::SetPower(state) => state.as_kasa_arg().to_string(),
            Self::SetBrightness(_) => "brightness".to_string(),
        }
    }

    fn payload(&self) -> Option<String> {
        match self {
            Self::SetPower(_) => None,
            Self::SetBrightness(level) => Some(level.value().to_string()),
        }
    }
}

impl fmt::Display for BulbCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SetPower(state) => write!(f, "power {state}"),
            Self::SetBrightness(level) => write!(f, "brightness {level}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn power_args() {
        assert_eq!(
            BulbCommand::SetPower(PowerState::On).to_args("10.0.0.5"),
            ["--host", "10.0.0.5", "on"]
        );
        assert_eq!(
            BulbCommand::SetPower(PowerState::Off).to_args("bulb.local"),
            ["--host", "bulb.local", "off"]
        );
    }

    #[test]
    fn brightness_args() {
        let cmd = BulbCommand::SetBrightness(Brightness::new(42).unwrap());
        assert_eq!(
            cmd.to_args("10.0.0.5"),
            ["--host", "10.0.0.5", "brightness", "42"]
        );
    }

    #[test]
    fn power_has_no_payload() {
        assert_eq!(BulbCommand::SetPower(PowerState::On).payload(), None);
    }

    #[test]
    fn display_and_operation() {
        let cmd = BulbCommand::SetBrightness(Brightness::MAX);
        assert_eq!(cmd.to_string(), "brightness 100%");
        assert_eq!(cmd.operation(), "brightness");
        assert_eq!(
            BulbCommand::SetPower(PowerState::Off).to_string(),
            "power OFF"
        );
    }
}
