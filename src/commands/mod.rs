// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod categories;
pub mod entries;
pub mod exporter;
pub mod goals;
pub mod importer;
pub mod notes;
pub mod onboarding;
pub mod reports;
pub mod reset;
pub mod shell;

use crate::db::Storage;
use crate::onboarding::{Milestone, Onboarding};
use crate::store::LedgerStore;
use crate::utils::{parse_period, period_of, today};
use anyhow::Result;
use std::io::{self, BufRead, Write};
use tracing::warn;

/// Confirmation source for destructive commands: `--yes` answers every
/// prompt, otherwise each prompt is asked on stdin.
pub fn confirmer(sub: &clap::ArgMatches) -> impl FnMut(&str) -> bool {
    let assume_yes = sub.try_get_one::<bool>("yes").ok().flatten().copied().unwrap_or(false);
    move |prompt: &str| {
        if assume_yes {
            return true;
        }
        print!("{} [y/N] ", prompt);
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(_) => matches!(line.trim().to_lowercase().as_str(), "y" | "yes"),
            Err(_) => false,
        }
    }
}

/// `--period` if given, else the month containing today.
pub fn selected_period(sub: &clap::ArgMatches) -> Result<String> {
    match sub.try_get_one::<String>("period").ok().flatten() {
        Some(p) => Ok(parse_period(p)?),
        None => Ok(period_of(today())),
    }
}

pub fn track_onboarding<S: Storage>(store: &mut LedgerStore<S>, m: Milestone) {
    let result = Onboarding::load(store.storage()).and_then(|mut ob| {
        if ob.track(m) {
            ob.save(store.storage_mut())?;
        }
        Ok(())
    });
    if let Err(e) = result {
        warn!(error = %e, "could not update onboarding progress");
    }
}
