// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::Storage;
use crate::store::LedgerStore;
use crate::utils::pretty_table;
use anyhow::Result;

pub fn handle<S: Storage>(store: &mut LedgerStore<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").map(String::as_str).unwrap_or_default();
            if store.add_type(name) {
                println!("Added category '{}'", name.trim());
            } else {
                println!("Category '{}' not added (blank or already present)", name.trim());
            }
        }
        Some(("list", _)) => {
            let data = store
                .document()
                .types
                .iter()
                .map(|t| vec![t.clone()])
                .collect();
            println!("{}", pretty_table(&["Category"], data));
        }
        _ => {}
    }
    Ok(())
}
