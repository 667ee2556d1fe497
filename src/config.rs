// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Startup configuration.
//!
//! Settings come from command-line flags and, optionally, a JSON settings
//! file given with `--config`. A flag always wins over the same key in the
//! file.
//!
//! ```json
//! {
//!     "file": "/run/rotary/value.txt",
//!     "bulbs": ["192.168.1.20", "192.168.1.21"],
//!     "mode": "debounced",
//!     "debounce_ms": 1000,
//!     "kasa": "kasa",
//!     "command_timeout_secs": 10
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, ValueEnum};
use serde::Deserialize;

use crate::actuator::CommandConfig;
use crate::error::ConfigError;
use crate::sync::SyncPolicy;

/// Which synchronizer policy to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Read and apply on a fixed interval.
    Interval,
    /// Apply once the file has stopped changing.
    #[default]
    Debounced,
}

/// Command-line arguments.
#[derive(Debug, Default, Parser)]
#[command(name = "rotary-sync")]
#[command(version, about = "Update smart bulbs with rotary value brightness and on/off state")]
pub struct SyncArgs {
    /// Path to the rotary value output file
    #[arg(long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Smart bulb addresses
    #[arg(long, num_args = 1.., value_name = "ADDR")]
    pub bulbs: Vec<String>,

    /// Update interval in seconds (interval mode only) [default: 5]
    #[arg(long, short = 'n', value_name = "SECS")]
    pub interval: Option<u64>,

    /// Triggering policy [default: debounced]
    #[arg(long, value_enum)]
    pub mode: Option<Mode>,

    /// Quiet time after the last change before applying, in milliseconds
    #[arg(long, value_name = "MS")]
    pub debounce_ms: Option<u64>,

    /// How often to check the file for changes, in milliseconds
    #[arg(long, value_name = "MS")]
    pub poll_ms: Option<u64>,

    /// Device-control program [default: kasa]
    #[arg(long, value_name = "PROGRAM")]
    pub kasa: Option<String>,

    /// Abort a single bulb command after this many seconds
    #[arg(long, value_name = "SECS")]
    pub command_timeout_secs: Option<u64>,

    /// JSON settings file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Contents of a JSON settings file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SettingsFile {
    /// Path to the rotary value output file.
    pub file: Option<PathBuf>,
    /// Smart bulb addresses.
    pub bulbs: Vec<String>,
    /// Interval mode period in seconds.
    pub interval_secs: Option<u64>,
    /// Triggering policy.
    pub mode: Option<Mode>,
    /// Debounce window in milliseconds.
    pub debounce_ms: Option<u64>,
    /// Poll period in milliseconds.
    pub poll_ms: Option<u64>,
    /// Error backoff in milliseconds.
    pub backoff_ms: Option<u64>,
    /// Device-control program.
    pub kasa: Option<String>,
    /// Arguments placed before every bulb command.
    pub kasa_args: Vec<String>,
    /// Per-command timeout in seconds.
    pub command_timeout_secs: Option<u64>,
}

impl SettingsFile {
    /// Parses settings from JSON.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` if the text is not a valid settings object.
    pub fn from_json(path: &Path, json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads settings from a file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` if the file cannot be read, or
    /// `ConfigError::Parse` if it is not valid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(path, &contents)?;
        tracing::info!(path = %path.display(), "Loaded settings file");
        Ok(settings)
    }
}

/// What the synchronizer watches and drives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncSettings {
    /// The rotary input file.
    pub file: PathBuf,
    /// Bulb addresses, in the order they are updated.
    pub bulbs: Vec<String>,
    /// Triggering policy.
    pub policy: SyncPolicy,
}

impl SyncSettings {
    /// Creates settings with the default (debounced) policy.
    #[must_use]
    pub fn new(file: impl Into<PathBuf>, bulbs: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            file: file.into(),
            bulbs: bulbs.into_iter().map(Into::into).collect(),
            policy: SyncPolicy::default(),
        }
    }

    /// Sets the triggering policy.
    #[must_use]
    pub fn with_policy(mut self, policy: SyncPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Checks that the settings can drive a synchronizer.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if there are no bulbs, an address is blank, or a
    /// period is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.file.as_os_str().is_empty() {
            return Err(ConfigError::MissingFile);
        }
        if self.bulbs.is_empty() {
            return Err(ConfigError::NoBulbs);
        }
        if self.bulbs.iter().any(|b| b.trim().is_empty()) {
            return Err(ConfigError::EmptyAddress);
        }
        match self.policy {
            SyncPolicy::Interval { period } if period.is_zero() => {
                Err(ConfigError::InvalidPeriod("interval"))
            }
            SyncPolicy::Debounced { poll, .. } if poll.is_zero() => {
                Err(ConfigError::InvalidPeriod("poll period"))
            }
            _ => Ok(()),
        }
    }
}

/// Fully resolved startup settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Synchronizer settings.
    pub sync: SyncSettings,
    /// Device-control program settings.
    pub command: CommandConfig,
}

impl Settings {
    /// Resolves command-line arguments, loading `--config` if given.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the settings file cannot be loaded or the
    /// merged settings are invalid.
    pub fn resolve(args: SyncArgs) -> Result<Self, ConfigError> {
        let file = match &args.config {
            Some(path) => SettingsFile::load(path)?,
            None => SettingsFile::default(),
        };
        Self::merge(args, file)
    }

    /// Merges arguments over settings-file values and validates the result.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the merged settings are invalid.
    pub fn merge(args: SyncArgs, file: SettingsFile) -> Result<Self, ConfigError> {
        let input = args.file.or(file.file).ok_or(ConfigError::MissingFile)?;
        let bulbs = if args.bulbs.is_empty() {
            file.bulbs
        } else {
            args.bulbs
        };

        let policy = match args.mode.or(file.mode).unwrap_or_default() {
            Mode::Interval => SyncPolicy::Interval {
                period: args
                    .interval
                    .or(file.interval_secs)
                    .map_or(SyncPolicy::DEFAULT_INTERVAL, Duration::from_secs),
            },
            Mode::Debounced => SyncPolicy::Debounced {
                poll: args
                    .poll_ms
                    .or(file.poll_ms)
                    .map_or(SyncPolicy::DEFAULT_POLL, Duration::from_millis),
                debounce: args
                    .debounce_ms
                    .or(file.debounce_ms)
                    .map_or(SyncPolicy::DEFAULT_DEBOUNCE, Duration::from_millis),
                backoff: file
                    .backoff_ms
                    .map_or(SyncPolicy::DEFAULT_BACKOFF, Duration::from_millis),
            },
        };

        let sync = SyncSettings {
            file: input,
            bulbs,
            policy,
        };
        sync.validate()?;

        let mut command = CommandConfig::new();
        if let Some(program) = args.kasa.or(file.kasa) {
            command = command.with_program(program);
        }
        for arg in file.kasa_args {
            command = command.with_arg(arg);
        }
        if let Some(secs) = args.command_timeout_secs.or(file.command_timeout_secs) {
            command = command.with_timeout(Duration::from_secs(secs));
        }

        Ok(Self { sync, command })
    }
}
