// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The synchronization loop.
//!
//! Two triggering policies are supported:
//!
//! - [`SyncPolicy::Interval`] reads the file and applies it on a fixed period.
//! - [`SyncPolicy::Debounced`] polls the file's modification time on a short
//!   period and applies a reading once changes have settled for the debounce
//!   window. Bursts of writes from a dial being turned collapse into one
//!   batch of bulb commands.
//!
//! Both loops run until the shutdown future passed to them completes. The
//! shutdown future is only polled while the loop sleeps, so a sync cycle in
//! progress always runs to completion.

mod status;

pub use status::SyncStatus;

use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use chrono::{DateTime, Utc};
use tokio::time::{Instant, sleep};

use crate::actuator::BulbActuator;
use crate::apply::{CycleReport, apply_target};
use crate::config::SyncSettings;
use crate::error::{Error, Result};
use crate::reading::read_latest;
use crate::target::TargetState;

/// When the synchronizer applies readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPolicy {
    /// Read and apply on every tick of a fixed period.
    Interval {
        /// Time between cycles.
        period: Duration,
    },
    /// Apply after the input file has stopped changing.
    Debounced {
        /// Time between modification-time checks.
        poll: Duration,
        /// Quiet time required after the last change.
        debounce: Duration,
        /// Pause after an unexpected error before resuming.
        backoff: Duration,
    },
}

impl SyncPolicy {
    /// Default period for [`SyncPolicy::Interval`].
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);
    /// Default poll period for [`SyncPolicy::Debounced`].
    pub const DEFAULT_POLL: Duration = Duration::from_millis(100);
    /// Default debounce window for [`SyncPolicy::Debounced`].
    pub const DEFAULT_DEBOUNCE: Duration = Duration::from_secs(1);
    /// Default error backoff for [`SyncPolicy::Debounced`].
    pub const DEFAULT_BACKOFF: Duration = Duration::from_secs(1);

    /// Fixed-interval policy with the given period.
    #[must_use]
    pub const fn interval(period: Duration) -> Self {
        Self::Interval { period }
    }

    /// Debounced policy with default timings.
    #[must_use]
    pub const fn debounced() -> Self {
        Self::Debounced {
            poll: Self::DEFAULT_POLL,
            debounce: Self::DEFAULT_DEBOUNCE,
            backoff: Self::DEFAULT_BACKOFF,
        }
    }
}

impl Default for SyncPolicy {
    fn default() -> Self {
        Self::debounced()
    }
}

/// Result of one debounced tick.
#[derive(Debug)]
pub enum TickOutcome {
    /// Nothing changed and everything is applied.
    Idle,
    /// A new modification time was detected on this tick.
    Changed,
    /// Not synced, still inside the debounce window.
    Waiting,
    /// A cycle ran; the status is synced again.
    Synced(CycleReport),
    /// The window closed but there was no valid reading; retried next tick.
    NoReading,
}

/// Keeps a fixed set of bulbs in line with the rotary input file.
#[derive(Debug)]
pub struct Synchronizer<A> {
    actuator: A,
    settings: SyncSettings,
    status: SyncStatus,
}

impl<A: BulbActuator> Synchronizer<A> {
    /// Creates a synchronizer; the status starts synced.
    #[must_use]
    pub fn new(actuator: A, settings: SyncSettings) -> Self {
        Self {
            actuator,
            settings,
            status: SyncStatus::new(),
        }
    }

    /// Returns the current sync status.
    #[must_use]
    pub fn status(&self) -> &SyncStatus {
        &self.status
    }

    /// Returns the settings.
    #[must_use]
    pub fn settings(&self) -> &SyncSettings {
        &self.settings
    }

    /// Returns the actuator.
    #[must_use]
    pub fn actuator(&self) -> &A {
        &self.actuator
    }

    /// Reads the file once and applies the reading to every bulb.
    ///
    /// Returns `None` if there is no valid reading; the reader has already
    /// logged why.
    pub async fn sync_once(&self) -> Option<CycleReport> {
        let Some(reading) = read_latest(&self.settings.file).await else {
            tracing::debug!("No valid rotary value or power state found, skipping this update");
            return None;
        };

        let target = TargetState::from_reading(&reading);
        tracing::debug!(
            state = %target,
            bulbs = self.settings.bulbs.len(),
            "Applying rotary value"
        );

        let report = apply_target(&self.actuator, &self.settings.bulbs, &target).await;
        if !report.is_fully_applied() {
            tracing::warn!(
                failed = ?report.failures(),
                "Some bulbs did not accept the update"
            );
        }
        Some(report)
    }

    /// Runs one step of the debounced policy.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the input file's modification time cannot be
    /// queried.
    pub async fn tick(&mut self) -> Result<TickOutcome> {
        let modified = modification_time(&self.settings.file).await?;
        let now = Instant::now();

        let changed = self.status.observe(modified, now);
        if changed {
            tracing::debug!(
                modified = %DateTime::<Utc>::from(modified).to_rfc3339(),
                "Detected change in rotary file"
            );
        }

        if !self.status.is_due(now, self.debounce()) {
            return Ok(if changed {
                TickOutcome::Changed
            } else if self.status.in_sync() {
                TickOutcome::Idle
            } else {
                TickOutcome::Waiting
            });
        }

        match self.sync_once().await {
            Some(report) => {
                self.status.mark_synced();
                Ok(TickOutcome::Synced(report))
            }
            None => Ok(TickOutcome::NoReading),
        }
    }

    /// Runs the loop selected by the configured policy until `shutdown`
    /// completes.
    pub async fn run<F>(&mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tracing::info!(
            file = %self.settings.file.display(),
            bulbs = %self.settings.bulbs.join(", "),
            policy = ?self.settings.policy,
            "Starting lightbulb updater"
        );

        match self.settings.policy {
            SyncPolicy::Interval { period } => self.run_interval(period, shutdown).await,
            SyncPolicy::Debounced { poll, backoff, .. } => {
                self.run_debounced(poll, backoff, shutdown).await;
            }
        }

        tracing::info!("Exiting lightbulb updater");
    }

    /// Reads and applies every `period` until `shutdown` completes.
    pub async fn run_interval<F>(&mut self, period: Duration, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        let mut shutdown = std::pin::pin!(shutdown);
        loop {
            self.sync_once().await;

            tokio::select! {
                () = &mut shutdown => break,
                () = sleep(period) => {}
            }
        }
    }

    /// Ticks every `poll` until `shutdown` completes, pausing for `backoff`
    /// after a failed tick.
    pub async fn run_debounced<F>(&mut self, poll: Duration, backoff: Duration, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        let mut shutdown = std::pin::pin!(shutdown);
        loop {
            let pause = match self.tick().await {
                Ok(_) => poll,
                Err(e) => {
                    tracing::error!(error = %e, "Sync tick failed, backing off");
                    backoff
                }
            };

            tokio::select! {
                () = &mut shutdown => break,
                () = sleep(pause) => {}
            }
        }
    }

    fn debounce(&self) -> Duration {
        match self.settings.policy {
            SyncPolicy::Debounced { debounce, .. } => debounce,
            SyncPolicy::Interval { .. } => SyncPolicy::DEFAULT_DEBOUNCE,
        }
    }
}

async fn modification_time(path: &Path) -> Result<SystemTime> {
    let io_error = |source| Error::Io {
        path: PathBuf::from(path),
        source,
    };
    let metadata = tokio::fs::metadata(path).await.map_err(io_error)?;
    metadata.modified().map_err(io_error)
}
