// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod aggregate;
pub mod cli;
pub mod commands;
pub mod db;
pub mod error;
pub mod goals;
pub mod logging;
pub mod models;
pub mod notes;
pub mod onboarding;
pub mod persist;
pub mod recurrence;
pub mod store;
pub mod utils;

use anyhow::Result;
use db::Storage;
use models::EntryKind;
use store::LedgerStore;

/// Routes one parsed command line to its handler.
pub fn dispatch<S: Storage>(store: &mut LedgerStore<S>, matches: &clap::ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("income", sub)) => commands::entries::handle(store, EntryKind::Income, sub)?,
        Some(("expense", sub)) => commands::entries::handle(store, EntryKind::Expense, sub)?,
        Some(("card", sub)) => commands::entries::handle(store, EntryKind::CardDue, sub)?,
        Some(("type", sub)) => commands::categories::handle(store, sub)?,
        Some(("goal", sub)) => commands::goals::handle(store, sub)?,
        Some(("note", sub)) => commands::notes::handle(store, sub)?,
        Some(("periods", _)) => commands::reports::periods(store)?,
        Some(("dashboard", sub)) => commands::reports::show_dashboard(store, sub)?,
        Some(("report", sub)) => commands::reports::handle(store, sub)?,
        Some(("export", sub)) => commands::exporter::handle(store, sub)?,
        Some(("import", sub)) => commands::importer::handle(store, sub)?,
        Some(("reset", sub)) => commands::reset::handle(store, sub)?,
        Some(("onboarding", sub)) => commands::onboarding::handle(store, sub)?,
        Some(("shell", _)) => commands::shell::run(store)?,
        _ => {}
    }
    Ok(())
}
