// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Applying a target state to every configured bulb.

use crate::actuator::{ActuationOutput, BulbActuator};
use crate::error::ActuationError;
use crate::target::TargetState;

/// Outcome of one actuation call.
pub type ActuationResult = Result<ActuationOutput, ActuationError>;

/// What happened to one bulb during a cycle.
#[derive(Debug)]
pub struct BulbOutcome {
    /// The bulb address.
    pub address: String,
    /// Result of the power command.
    pub power: ActuationResult,
    /// Result of the brightness command, `None` when the target is off.
    pub brightness: Option<ActuationResult>,
}

impl BulbOutcome {
    /// Returns true if every command sent to this bulb succeeded.
    #[must_use]
    pub fn is_applied(&self) -> bool {
        self.power.is_ok() && self.brightness.as_ref().is_none_or(Result::is_ok)
    }
}

/// Per-bulb results of one sync cycle, in configuration order.
#[derive(Debug)]
pub struct CycleReport {
    /// The state that was applied.
    pub target: TargetState,
    /// One entry per configured bulb.
    pub bulbs: Vec<BulbOutcome>,
}

impl CycleReport {
    /// Returns true if every bulb accepted every command.
    #[must_use]
    pub fn is_fully_applied(&self) -> bool {
        self.bulbs.iter().all(BulbOutcome::is_applied)
    }

    /// Returns the addresses of bulbs with at least one failed command.
    #[must_use]
    pub fn failures(&self) -> Vec<&str> {
        self.bulbs
            .iter()
            .filter(|b| !b.is_applied())
            .map(|b| b.address.as_str())
            .collect()
    }
}

/// Applies `target` to each bulb in order.
///
/// Power is always sent; brightness follows only when the target is on.
/// A failure never stops the remaining commands or bulbs.
pub async fn apply_target<A, S>(actuator: &A, bulbs: &[S], target: &TargetState) -> CycleReport
where
    A: BulbActuator + ?Sized,
    S: AsRef<str>,
{
    let mut outcomes = Vec::with_capacity(bulbs.len());

    for address in bulbs {
        let address = address.as_ref();

        let power = actuator.set_power(address, target.power).await;
        match &power {
            Ok(output) => {
                tracing::info!(
                    bulb = %address,
                    power = %target.power,
                    "Successfully set power state"
                );
                log_output(address, output);
            }
            Err(e) => log_failure(address, "power", e),
        }

        let brightness = if target.needs_brightness() {
            let result = actuator.set_brightness(address, target.brightness).await;
            match &result {
                Ok(output) => {
                    tracing::info!(
                        bulb = %address,
                        brightness = target.brightness.value(),
                        "Successfully updated brightness"
                    );
                    log_output(address, output);
                }
                Err(e) => log_failure(address, "brightness", e),
            }
            Some(result)
        } else {
            None
        };

        outcomes.push(BulbOutcome {
            address: address.to_string(),
            power,
            brightness,
        });
    }

    CycleReport {
        target: *target,
        bulbs: outcomes,
    }
}

fn log_output(address: &str, output: &ActuationOutput) {
    if !output.stdout.is_empty() {
        tracing::debug!(bulb = %address, output = %output.stdout, "Bulb control output");
    }
}

fn log_failure(address: &str, operation: &str, error: &ActuationError) {
    match error {
        ActuationError::Spawn { .. } => tracing::error!(
            bulb = %address,
            operation,
            error = %error,
            "Could not invoke bulb control"
        ),
        _ => tracing::error!(
            bulb = %address,
            operation,
            error = %error,
            "Bulb command failed"
        ),
    }
}
