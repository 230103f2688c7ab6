// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{confirmer, selected_period, track_onboarding};
use crate::db::Storage;
use crate::models::EntryKind;
use crate::onboarding::Milestone;
use crate::recurrence::{submit, EntryDraft};
use crate::store::LedgerStore;
use crate::utils::{
    fmt_money, maybe_print_json, parse_period, pretty_table, resolve_id, short_id, today,
};
use anyhow::Result;
use serde::Serialize;

pub fn handle<S: Storage>(
    store: &mut LedgerStore<S>,
    kind: EntryKind,
    m: &clap::ArgMatches,
) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, kind, sub)?,
        Some(("list", sub)) => list(store, kind, sub)?,
        Some(("rm", sub)) => remove(store, kind, sub)?,
        _ => {}
    }
    Ok(())
}

fn add<S: Storage>(store: &mut LedgerStore<S>, kind: EntryKind, sub: &clap::ArgMatches) -> Result<()> {
    let draft = EntryDraft {
        name: sub.get_one::<String>("name").cloned().unwrap_or_default(),
        amount: sub.get_one::<String>("amount").cloned().unwrap_or_default(),
        date: sub
            .get_one::<String>("date")
            .cloned()
            .unwrap_or_else(|| today().to_string()),
        category: sub
            .try_get_one::<String>("category")
            .ok()
            .flatten()
            .cloned(),
        repeat: sub.get_one::<u32>("repeat").copied().unwrap_or(0),
    };
    match submit(store, kind, &draft) {
        Ok(placed) => {
            if let Some((period, id)) = placed.first() {
                println!(
                    "Recorded {} '{}' in {} (id {})",
                    kind,
                    draft.name.trim(),
                    period,
                    short_id(id)
                );
            }
            if placed.len() > 1 {
                let last = placed.last().map(|(p, _)| p.as_str()).unwrap_or_default();
                println!("  + {} monthly copies through {}", placed.len() - 1, last);
            }
            match kind {
                EntryKind::Income => track_onboarding(store, Milestone::Income),
                EntryKind::Expense => track_onboarding(store, Milestone::Expense),
                EntryKind::CardDue => {}
            }
        }
        Err(e) => println!("Not recorded: {}", e),
    }
    Ok(())
}

#[derive(Serialize)]
pub struct EntryRow {
    pub id: String,
    pub date: String,
    pub name: String,
    pub amount: String,
    pub category: String,
    pub tags: String,
    pub overdue: bool,
}

pub fn query_rows<S: Storage>(
    store: &LedgerStore<S>,
    kind: EntryKind,
    period: &str,
) -> Vec<EntryRow> {
    let today = today();
    let Some(bucket) = store.document().periods.get(period) else {
        return Vec::new();
    };
    let mut entries: Vec<_> = bucket.entries(kind).iter().collect();
    entries.sort_by_key(|e| e.date);
    entries
        .into_iter()
        .map(|e| EntryRow {
            id: short_id(&e.id),
            date: e.date.to_string(),
            name: e.name.clone(),
            amount: fmt_money(&e.amount),
            category: e.category.clone().unwrap_or_default(),
            tags: e.tags.join(","),
            overdue: kind.is_due() && e.is_overdue(today),
        })
        .collect()
}

fn list<S: Storage>(store: &LedgerStore<S>, kind: EntryKind, sub: &clap::ArgMatches) -> Result<()> {
    let period = selected_period(sub)?;
    let data = query_rows(store, kind, &period);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.clone(),
                    r.date.clone(),
                    r.name.clone(),
                    r.amount.clone(),
                    r.category.clone(),
                    if r.overdue { "overdue".into() } else { r.tags.clone() },
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["ID", "Date", "Name", "Amount", "Category", "Status"], rows)
        );
    }
    Ok(())
}

fn remove<S: Storage>(
    store: &mut LedgerStore<S>,
    kind: EntryKind,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let raw = sub.get_one::<String>("id").map(String::as_str).unwrap_or_default();
    let doc = store.document();
    let period_filter = match sub.get_one::<String>("period") {
        Some(p) => Some(parse_period(p)?),
        None => None,
    };
    let candidates: Vec<_> = doc
        .entries_of(kind)
        .filter(|(p, _)| period_filter.as_ref().is_none_or(|f| f == *p))
        .map(|(_, e)| e.id)
        .collect();
    let id = resolve_id(raw, candidates, "entry")?;
    let Some(period) = store.find_entry(kind, id).map(|(p, _)| p.clone()) else {
        return Ok(());
    };
    let mut confirm = confirmer(sub);
    if store.delete_entry(kind, &period, id, &mut confirm) {
        println!("Deleted {} {} from {}", kind, short_id(&id), period);
    }
    Ok(())
}
