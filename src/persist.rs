// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Write scheduling for the ledger document.
//!
//! High-frequency edits (note keystrokes, checkbox toggles) do not write
//! straight away. Each one restarts a short debounce window; the write happens
//! once the window passes with no further edits. A separate backstop forces a
//! write once changes have been pending for too long, so a user who never
//! pauses still gets saved.
//!
//! The scheduler owns no timer. Callers pass the current `Instant` and ask
//! [`PersistScheduler::due`] whether a write should happen now, and
//! [`PersistScheduler::next_wakeup`] how long they may sleep.

use std::time::{Duration, Instant};
use tracing::debug;

pub const DEBOUNCE_INTERVAL: Duration = Duration::from_millis(500);
pub const BACKSTOP_INTERVAL: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushReason {
    /// The debounce window elapsed without a new edit.
    Quiet,
    /// Changes have been pending for the whole backstop interval.
    Backstop,
}

#[derive(Debug, Clone)]
pub struct PersistScheduler {
    debounce: Duration,
    backstop: Duration,
    deadline: Option<Instant>,
    dirty_since: Option<Instant>,
}

impl Default for PersistScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl PersistScheduler {
    pub fn new() -> Self {
        Self::with_intervals(DEBOUNCE_INTERVAL, BACKSTOP_INTERVAL)
    }

    pub fn with_intervals(debounce: Duration, backstop: Duration) -> Self {
        Self {
            debounce,
            backstop,
            deadline: None,
            dirty_since: None,
        }
    }

    /// Records an edit at `now`: cancels any pending deadline and starts a new one.
    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.debounce);
        self.dirty_since.get_or_insert(now);
        debug!(deadline = ?self.deadline, "debounced write rescheduled");
    }

    /// Forgets pending work; called after any successful or attempted write.
    pub fn clear(&mut self) {
        self.deadline = None;
        self.dirty_since = None;
    }

    pub fn is_pending(&self) -> bool {
        self.dirty_since.is_some()
    }

    pub fn due(&self, now: Instant) -> Option<FlushReason> {
        if self.deadline.is_some_and(|d| d <= now) {
            return Some(FlushReason::Quiet);
        }
        if self.dirty_since.is_some_and(|t| t + self.backstop <= now) {
            return Some(FlushReason::Backstop);
        }
        None
    }

    /// Earliest instant at which [`due`](Self::due) can turn true.
    pub fn next_wakeup(&self) -> Option<Instant> {
        let backstop = self.dirty_since.map(|t| t + self.backstop);
        match (self.deadline, backstop) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }
}
