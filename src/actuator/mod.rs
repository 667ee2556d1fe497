// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bulb-actuation capability.
//!
//! [`BulbActuator`] is the seam between the synchronizer and whatever
//! actually talks to the bulbs. [`CommandActuator`] implements it by running
//! an external device-control program (by default `kasa`) once per command.

mod process;

pub use process::{CommandActuator, CommandConfig};

use crate::command::BulbCommand;
use crate::error::ActuationError;
use crate::types::{Brightness, PowerState};

/// Output of a successful actuation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActuationOutput {
    /// Text the capability reported on success, trimmed.
    pub stdout: String,
}

impl ActuationOutput {
    /// Creates an output with the given text.
    #[must_use]
    pub fn new(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
        }
    }
}

/// Trait for capabilities that can apply commands to a bulb.
#[allow(async_fn_in_trait)]
pub trait BulbActuator {
    /// Applies `command` to the bulb at `address`.
    ///
    /// # Errors
    ///
    /// Returns `ActuationError` if the capability cannot be invoked or
    /// reports failure.
    async fn execute(
        &self,
        address: &str,
        command: &BulbCommand,
    ) -> Result<ActuationOutput, ActuationError>;

    /// Switches the bulb on or off.
    ///
    /// # Errors
    ///
    /// See [`BulbActuator::execute`].
    async fn set_power(
        &self,
        address: &str,
        state: PowerState,
    ) -> Result<ActuationOutput, ActuationError> {
        self.execute(address, &BulbCommand::SetPower(state)).await
    }

    /// Sets the brightness of the bulb.
    ///
    /// # Errors
    ///
    /// See [`BulbActuator::execute`].
    async fn set_brightness(
        &self,
        address: &str,
        level: Brightness,
    ) -> Result<ActuationOutput, ActuationError> {
        self.execute(address, &BulbCommand::SetBrightness(level))
            .await
    }
}

impl<A: BulbActuator + ?Sized> BulbActuator for &A {
    async fn execute(
        &self,
        address: &str,
        command: &BulbCommand,
    ) -> Result<ActuationOutput, ActuationError> {
        (**self).execute(address, command).await
    }
}
