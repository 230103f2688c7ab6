// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::confirmer;
use crate::db::Storage;
use crate::store::{ImportOutcome, LedgerStore};
use anyhow::{Context, Result};

pub fn handle<S: Storage>(store: &mut LedgerStore<S>, sub: &clap::ArgMatches) -> Result<()> {
    let path = sub.get_one::<String>("path").map(|s| s.trim()).unwrap_or_default();
    let raw = std::fs::read_to_string(path).with_context(|| format!("Read {}", path))?;
    let mut confirm = confirmer(sub);
    match store.import_json(&raw, &mut confirm) {
        ImportOutcome::Applied { sections, persisted } => {
            println!("Imported {} from {}", sections.join(", "), path);
            if !persisted {
                println!("Warning: import kept in memory only, saving failed");
            }
        }
        ImportOutcome::Declined => println!("Import cancelled"),
        ImportOutcome::Rejected(reason) => println!("Not a ledger export, nothing changed ({})", reason),
    }
    Ok(())
}
