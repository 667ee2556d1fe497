// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Actuation through an external device-control program.

use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command as ProcessCommand;

use crate::actuator::{ActuationOutput, BulbActuator};
use crate::command::{BulbCommand, Command};
use crate::error::ActuationError;

/// Configuration for the device-control program.
///
/// # Examples
///
/// ```
/// use rotary_sync::actuator::CommandConfig;
/// use std::time::Duration;
///
/// // Plain `kasa` from PATH, no timeout
/// let config = CommandConfig::new();
/// assert_eq!(config.program(), "kasa");
///
/// // A wrapper with a leading argument and a timeout
/// let config = CommandConfig::new()
///     .with_program("uvx")
///     .with_arg("kasa")
///     .with_timeout(Duration::from_secs(15));
/// assert_eq!(config.args(), ["kasa"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandConfig {
    program: String,
    args: Vec<String>,
    timeout: Option<Duration>,
}

impl CommandConfig {
    /// Default device-control program.
    pub const DEFAULT_PROGRAM: &'static str = "kasa";

    /// Creates a configuration running `kasa` with no timeout.
    #[must_use]
    pub fn new() -> Self {
        Self {
            program: Self::DEFAULT_PROGRAM.to_string(),
            args: Vec::new(),
            timeout: None,
        }
    }

    /// Sets the program to run.
    #[must_use]
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Appends an argument placed before the per-command arguments.
    #[must_use]
    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Sets a limit on how long a single invocation may take.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Returns the program.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Returns the leading arguments.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Returns the timeout, if any.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

impl Default for CommandConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs the device-control program once per bulb command.
///
/// A zero exit status is success. Any other status is reported as
/// [`ActuationError::Rejected`] carrying the program's stderr.
#[derive(Debug, Clone, Default)]
pub struct CommandActuator {
    config: CommandConfig,
}

impl CommandActuator {
    /// Creates an actuator from the given configuration.
    #[must_use]
    pub fn new(config: CommandConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &CommandConfig {
        &self.config
    }
}

impl BulbActuator for CommandActuator {
    async fn execute(
        &self,
        address: &str,
        command: &BulbCommand,
    ) -> Result<ActuationOutput, ActuationError> {
        let args = command.to_args(address);

        tracing::debug!(
            program = %self.config.program,
            args = ?args,
            "Running bulb command"
        );

        let mut process = ProcessCommand::new(&self.config.program);
        process
            .args(&self.config.args)
            .args(&args)
            .stdin(Stdio::null())
            .kill_on_drop(true);

        let output = match self.config.timeout {
            Some(limit) => tokio::time::timeout(limit, process.output())
                .await
                .map_err(|_| {
                    ActuationError::Timeout(u64::try_from(limit.as_millis()).unwrap_or(u64::MAX))
                })?,
            None => process.output().await,
        }
        .map_err(|source| ActuationError::Spawn {
            program: self.config.program.clone(),
            source,
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

        if output.status.success() {
            return Ok(ActuationOutput { stdout });
        }

        match output.status.code() {
            Some(code) => Err(ActuationError::Rejected { code, stderr }),
            None => Err(ActuationError::Terminated { stderr }),
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::types::{Brightness, PowerState};

    fn shell(script: &str) -> CommandActuator {
        CommandActuator::new(
            CommandConfig::new()
                .with_program("sh")
                .with_arg("-c")
                .with_arg(script)
                .with_arg("sh"),
        )
    }

    #[test]
    fn config_defaults() {
        let config = CommandConfig::default();
        assert_eq!(config.program(), "kasa");
        assert!(config.args().is_empty());
        assert!(config.timeout().is_none());
    }

    #[tokio::test]
    async fn zero_exit_is_success() {
        let actuator = shell("echo done");
        let output = actuator
            .set_power("10.0.0.5", PowerState::On)
            .await
            .unwrap();
        assert_eq!(output.stdout, "done");
    }

    #[tokio::test]
    async fn passes_power_arguments() {
        let actuator =
            shell(r#"test "$1" = --host && test "$2" = 10.0.0.5 && test "$3" = off && test $# -eq 3"#);
        assert!(actuator.set_power("10.0.0.5", PowerState::Off).await.is_ok());
    }

    #[tokio::test]
    async fn passes_brightness_arguments() {
        let actuator = shell(r#"test "$3" = brightness && test "$4" = 75 && test $# -eq 4"#);
        let level = Brightness::new(75).unwrap();
        assert!(actuator.set_brightness("10.0.0.5", level).await.is_ok());
    }

    #[tokio::test]
    async fn non_zero_exit_carries_stderr() {
        let actuator = shell("echo 'No device found' >&2; exit 3");
        let err = actuator
            .set_power("10.0.0.5", PowerState::On)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ActuationError::Rejected { code: 3, ref stderr } if stderr == "No device found"
        ));
    }

    #[tokio::test]
    async fn missing_program_is_spawn_error() {
        let actuator = CommandActuator::new(
            CommandConfig::new().with_program("rotary-sync-test-no-such-program"),
        );
        let err = actuator
            .set_power("10.0.0.5", PowerState::On)
            .await
            .unwrap_err();
        assert!(matches!(err, ActuationError::Spawn { .. }));
    }

    #[tokio::test]
    async fn slow_program_times_out() {
        let actuator = CommandActuator::new(
            shell("sleep 5")
                .config()
                .clone()
                .with_timeout(Duration::from_millis(50)),
        );
        let err = actuator
            .set_power("10.0.0.5", PowerState::On)
            .await
            .unwrap_err();
        assert!(matches!(err, ActuationError::Timeout(50)));
    }
}
