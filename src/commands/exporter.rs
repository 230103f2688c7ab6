// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::Storage;
use crate::models::EntryKind;
use crate::store::LedgerStore;
use crate::utils::{period_of, today};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// File name offered for a full export taken during `period`.
pub fn default_file_name(period: &str) -> String {
    format!("monthbook-{}.json", period)
}

pub fn handle<S: Storage>(store: &LedgerStore<S>, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub
        .get_one::<String>("format")
        .map(|s| s.to_lowercase())
        .unwrap_or_else(|| "json".into());
    let out = match sub.get_one::<String>("out") {
        Some(p) => PathBuf::from(p.trim()),
        None if fmt == "csv" => PathBuf::from(format!("monthbook-{}.csv", period_of(today()))),
        None => PathBuf::from(default_file_name(&period_of(today()))),
    };
    match fmt.as_str() {
        "json" => export_json(store, &out)?,
        "csv" => export_csv(store, &out)?,
        other => anyhow::bail!("Unknown format: {} (use json|csv)", other),
    }
    println!("Exported ledger to {}", out.display());
    Ok(())
}

pub fn export_json<S: Storage>(store: &LedgerStore<S>, out: &std::path::Path) -> Result<()> {
    let body = store.export_json()?;
    std::fs::write(out, body).with_context(|| format!("Write {}", out.display()))?;
    Ok(())
}

/// Flat listing of every entry; not read back by `import`.
pub fn export_csv<S: Storage>(store: &LedgerStore<S>, out: &std::path::Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(out).with_context(|| format!("Open {}", out.display()))?;
    wtr.write_record([
        "period", "kind", "date", "name", "amount", "category", "tags", "recurring",
    ])?;
    for (period, bucket) in &store.document().periods {
        for kind in EntryKind::ALL {
            for e in bucket.entries(kind) {
                let date = e.date.to_string();
                let amount = e.amount.to_string();
                let tags = e.tags.join(";");
                let row: [&str; 8] = [
                    period,
                    kind.label(),
                    &date,
                    &e.name,
                    &amount,
                    e.category.as_deref().unwrap_or_default(),
                    &tags,
                    if e.recurring { "true" } else { "false" },
                ];
                wtr.write_record(row)?;
            }
        }
    }
    wtr.flush()?;
    Ok(())
}
