// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for `rotary_sync`.
//!
//! This module provides the error hierarchy used across the crate: value
//! validation, reading the rotary input file, invoking the bulb-control
//! capability, and startup configuration.

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred while reading the rotary input.
    #[error("read error: {0}")]
    Read(#[from] ReadError),

    /// Error occurred while actuating a bulb.
    #[error("actuation error: {0}")]
    Actuation(#[from] ActuationError),

    /// Startup configuration is invalid.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Unexpected I/O failure inside the synchronization loop.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// The path being accessed.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// Errors related to value validation and constraints.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A numeric value is outside the allowed range.
    #[error("value {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Minimum allowed value.
        min: u64,
        /// Maximum allowed value.
        max: u64,
        /// The actual value that was provided.
        actual: u64,
    },

    /// An invalid power state string was provided.
    #[error("invalid power state: {0:?}")]
    InvalidPowerState(String),
}

/// Reasons a rotary input line is rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MalformedReason {
    /// The line did not split into exactly two fields.
    #[error("expected 2 fields separated by ';', found {0}")]
    FieldCount(usize),

    /// The brightness field is not a non-negative integer.
    #[error("brightness {0:?} is not a non-negative integer")]
    Brightness(String),

    /// The power field is not `0` or `1`.
    #[error("power {0:?} is not 0 or 1")]
    Power(String),
}

/// Errors related to reading the rotary input file.
#[derive(Debug, Error)]
pub enum ReadError {
    /// The file could not be opened or read.
    #[error("could not read from file {}: {source}", .path.display())]
    Io {
        /// The input file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The file has no content.
    #[error("file {} is empty", .path.display())]
    Empty {
        /// The input file.
        path: PathBuf,
    },

    /// The last line is not `<brightness>;<power>`.
    #[error("invalid line format {line:?}: {reason}")]
    Malformed {
        /// The offending line, trimmed.
        line: String,
        /// Why it was rejected.
        reason: MalformedReason,
    },
}

/// Errors related to invoking the bulb-control capability.
#[derive(Debug, Error)]
pub enum ActuationError {
    /// The control program could not be started.
    #[error("could not run {program}: {source}")]
    Spawn {
        /// The program that was invoked.
        program: String,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The control program exited with a non-success status.
    #[error("exited with status {code}: {stderr}")]
    Rejected {
        /// Exit status code.
        code: i32,
        /// Diagnostic text written to stderr.
        stderr: String,
    },

    /// The control program was terminated without an exit code.
    #[error("terminated by signal: {stderr}")]
    Terminated {
        /// Diagnostic text written to stderr before termination.
        stderr: String,
    },

    /// The invocation did not finish within the configured timeout.
    #[error("timed out after {0} ms")]
    Timeout(u64),
}

/// Errors related to startup configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No rotary input file was given.
    #[error("an input file is required")]
    MissingFile,

    /// No bulb addresses were given.
    #[error("at least one bulb address is required")]
    NoBulbs,

    /// A bulb address is blank.
    #[error("bulb address must not be empty")]
    EmptyAddress,

    /// A period must be greater than zero.
    #[error("{0} must be greater than zero")]
    InvalidPeriod(&'static str),

    /// The settings file could not be read.
    #[error("could not read settings file {}: {source}", .path.display())]
    Io {
        /// The settings file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The settings file is not valid JSON for this crate.
    #[error("could not parse settings file {}: {source}", .path.display())]
    Parse {
        /// The settings file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: serde_json::Error,
    },
}

/// A specialized Result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
