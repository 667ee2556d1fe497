// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `rotary_sync` - keep smart bulbs in line with a rotary dial.
//!
//! A dial process appends `<brightness>;<power>` lines to a text file. This
//! crate reads the last line, derives a target state and pushes it to a fixed
//! set of bulbs through an external device-control program such as `kasa`.
//!
//! # Components
//!
//! - **Reader** ([`reading`]): extracts the latest valid [`Reading`] from the
//!   input file, degrading every failure to "no reading".
//! - **Target** ([`target`]): clamps brightness to 1-100 and rests it at
//!   1 while the bulbs are off.
//! - **Actuation** ([`actuator`], [`apply`]): sends power and brightness
//!   commands to every bulb, one bulb at a time, isolating failures.
//! - **Synchronizer** ([`Synchronizer`]): a fixed-interval loop or a
//!   change-triggered loop with debouncing.
//!
//! # Quick Start
//!
//! ```no_run
//! use rotary_sync::actuator::{CommandActuator, CommandConfig};
//! use rotary_sync::{SyncSettings, Synchronizer};
//!
//! #[tokio::main]
//! async fn main() {
//!     let settings = SyncSettings::new("/run/rotary/value.txt", ["192.168.1.20"]);
//!     let actuator = CommandActuator::new(CommandConfig::new());
//!
//!     let mut sync = Synchronizer::new(actuator, settings);
//!     sync.run(async {
//!         let _ = tokio::signal::ctrl_c().await;
//!     })
//!     .await;
//! }
//! ```
//!
//! # One-off Update
//!
//! ```no_run
//! use rotary_sync::actuator::CommandActuator;
//! use rotary_sync::{SyncSettings, Synchronizer};
//!
//! # async fn example() {
//! let sync = Synchronizer::new(
//!     CommandActuator::default(),
//!     SyncSettings::new("/run/rotary/value.txt", ["192.168.1.20", "192.168.1.21"]),
//! );
//! if let Some(report) = sync.sync_once().await {
//!     println!("failed bulbs: {:?}", report.failures());
//! }
//! # }
//! ```

pub mod actuator;
pub mod apply;
pub mod command;
pub mod config;
pub mod error;
pub mod reading;
pub mod sync;
pub mod target;
pub mod types;

pub use actuator::{ActuationOutput, BulbActuator, CommandActuator, CommandConfig};
pub use apply::{BulbOutcome, CycleReport, apply_target};
pub use command::{BulbCommand, Command};
pub use config::{Mode, Settings, SettingsFile, SyncArgs, SyncSettings};
pub use error::{
    ActuationError, ConfigError, Error, MalformedReason, ReadError, Result, ValueError,
};
pub use reading::{Reading, read_latest, try_read_latest};
pub use sync::{SyncPolicy, SyncStatus, Synchronizer, TickOutcome};
pub use target::TargetState;
pub use types::{Brightness, PowerState};
