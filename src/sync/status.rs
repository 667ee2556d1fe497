// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Convergence tracking for the debounced synchronizer.

use std::time::{Duration, SystemTime};

use tokio::time::Instant;

/// Whether the last known input has been applied to all bulbs.
///
/// Owned by a single synchronizer loop. Starts synced; any change in the
/// input file's modification time marks it not synced until a full
/// application cycle has been attempted.
///
/// # Examples
///
/// ```
/// use rotary_sync::sync::SyncStatus;
/// use std::time::{Duration, SystemTime};
/// use tokio::time::Instant;
///
/// let mut status = SyncStatus::new();
/// assert!(status.in_sync());
///
/// let t0 = Instant::now();
/// assert!(status.observe(SystemTime::UNIX_EPOCH, t0));
/// assert!(!status.in_sync());
///
/// let debounce = Duration::from_secs(1);
/// assert!(!status.is_due(t0 + Duration::from_millis(500), debounce));
/// assert!(status.is_due(t0 + Duration::from_millis(1100), debounce));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncStatus {
    in_sync: bool,
    last_modified: Option<SystemTime>,
    last_change: Option<Instant>,
}

impl SyncStatus {
    /// Creates a status that is synced and has observed nothing yet.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            in_sync: true,
            last_modified: None,
            last_change: None,
        }
    }

    /// Returns true if the last observed input has been applied.
    #[must_use]
    pub const fn in_sync(&self) -> bool {
        self.in_sync
    }

    /// Returns the modification time last observed on the input file.
    #[must_use]
    pub const fn last_modified(&self) -> Option<SystemTime> {
        self.last_modified
    }

    /// Returns when the most recent change was detected.
    #[must_use]
    pub const fn last_change(&self) -> Option<Instant> {
        self.last_change
    }

    /// Records the input file's modification time as of `now`.
    ///
    /// Returns true if it differs from the previous observation, in which
    /// case the status becomes not synced. The very first observation always
    /// counts as a change.
    pub fn observe(&mut self, modified: SystemTime, now: Instant) -> bool {
        if self.last_modified == Some(modified) {
            return false;
        }
        self.last_modified = Some(modified);
        self.last_change = Some(now);
        self.in_sync = false;
        true
    }

    /// Returns true if a sync attempt should run now.
    ///
    /// That is the case once the status is not synced and strictly more than
    /// `debounce` has passed since the last change.
    #[must_use]
    pub fn is_due(&self, now: Instant, debounce: Duration) -> bool {
        !self.in_sync
            && self
                .last_change
                .is_some_and(|changed| now.saturating_duration_since(changed) > debounce)
    }

    /// Marks the current input as applied.
    pub fn mark_synced(&mut self) {
        self.in_sync = true;
    }
}

impl Default for SyncStatus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEBOUNCE: Duration = Duration::from_secs(1);

    fn mtime(secs: u64) -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_secs(secs)
    }

    #[test]
    fn starts_synced() {
        let status = SyncStatus::new();
        assert!(status.in_sync());
        assert!(status.last_modified().is_none());
        assert!(!status.is_due(Instant::now(), DEBOUNCE));
    }

    #[test]
    fn same_mtime_is_not_a_change() {
        let mut status = SyncStatus::new();
        let t0 = Instant::now();
        assert!(status.observe(mtime(10), t0));
        status.mark_synced();

        assert!(!status.observe(mtime(10), t0 + Duration::from_secs(5)));
        assert!(status.in_sync());
        assert_eq!(status.last_change(), Some(t0));
    }

    #[test]
    fn new_mtime_flips_to_not_synced() {
        let mut status = SyncStatus::new();
        let t0 = Instant::now();
        status.observe(mtime(10), t0);
        status.mark_synced();

        let t1 = t0 + Duration::from_secs(3);
        assert!(status.observe(mtime(11), t1));
        assert!(!status.in_sync());
        assert_eq!(status.last_modified(), Some(mtime(11)));
        assert_eq!(status.last_change(), Some(t1));
    }

    #[test]
    fn debounce_threshold_is_exclusive() {
        let mut status = SyncStatus::new();
        let t0 = Instant::now();
        status.observe(mtime(1), t0);

        assert!(!status.is_due(t0, DEBOUNCE));
        assert!(!status.is_due(t0 + DEBOUNCE, DEBOUNCE));
        assert!(status.is_due(t0 + DEBOUNCE + Duration::from_millis(1), DEBOUNCE));
    }

    #[test]
    fn later_change_restarts_the_window() {
        let mut status = SyncStatus::new();
        let t0 = Instant::now();
        status.observe(mtime(1), t0);
        status.observe(mtime(2), t0 + Duration::from_millis(900));

        assert!(!status.is_due(t0 + Duration::from_millis(1500), DEBOUNCE));
        assert!(status.is_due(t0 + Duration::from_millis(2000), DEBOUNCE));
    }

    #[test]
    fn synced_is_never_due() {
        let mut status = SyncStatus::new();
        let t0 = Instant::now();
        status.observe(mtime(1), t0);
        status.mark_synced();
        assert!(!status.is_due(t0 + Duration::from_secs(60), DEBOUNCE));
    }
}
