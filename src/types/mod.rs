// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for bulb control.
//!
//! Each type guarantees its value is within the range the bulbs accept at
//! construction time.
//!
//! # Types
//!
//! - [`PowerState`] - On/Off state for power control
//! - [`Brightness`] - Brightness level while on (1-100%)

mod brightness;
mod power;

pub use brightness::Brightness;
pub use power::PowerState;
