// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::{Storage, ONBOARDING_COMPLETED_KEY, ONBOARDING_STEP_KEY};
use crate::error::StorageError;
use serde::Serialize;
use tracing::info;

/// First-run walkthrough: record an income, then an expense, then a goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Onboarding {
    pub completed: bool,
    pub step: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Milestone {
    Income,
    Expense,
    Goal,
}

impl Onboarding {
    pub fn load(storage: &dyn Storage) -> Result<Self, StorageError> {
        let completed = storage.get(ONBOARDING_COMPLETED_KEY)?.as_deref() == Some("true");
        let step = storage
            .get(ONBOARDING_STEP_KEY)?
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(0);
        Ok(Self { completed, step })
    }

    pub fn save(&self, storage: &mut dyn Storage) -> Result<(), StorageError> {
        storage.set(
            ONBOARDING_COMPLETED_KEY,
            if self.completed { "true" } else { "false" },
        )?;
        storage.set(ONBOARDING_STEP_KEY, &self.step.to_string())
    }

    pub fn start(&mut self) {
        if !self.completed && self.step == 0 {
            self.step = 1;
        }
    }

    pub fn complete(&mut self) {
        self.completed = true;
        self.step = 0;
        info!("onboarding complete");
    }

    /// Moves to the next step when `m` is the milestone the current step waits
    /// for. Returns whether anything changed.
    pub fn track(&mut self, m: Milestone) -> bool {
        if self.completed {
            return false;
        }
        match (self.step, m) {
            (1, Milestone::Income) => self.step = 2,
            (2, Milestone::Expense) => self.step = 3,
            (3, Milestone::Goal) => self.complete(),
            _ => return false,
        }
        true
    }
}
