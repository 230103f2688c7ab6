// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{confirmer, track_onboarding};
use crate::db::Storage;
use crate::goals::{create_goal, delete_goal, deposit, withdraw};
use crate::onboarding::Milestone;
use crate::store::LedgerStore;
use crate::utils::{fmt_money, maybe_print_json, pretty_table, resolve_id, short_id};
use anyhow::Result;
use serde::Serialize;
use uuid::Uuid;

pub fn handle<S: Storage>(store: &mut LedgerStore<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let desc = sub.get_one::<String>("description").map(String::as_str).unwrap_or_default();
            let target = sub.get_one::<String>("target").map(String::as_str).unwrap_or_default();
            match create_goal(store, desc, target) {
                Ok(id) => {
                    println!("Added goal '{}' (id {})", desc.trim(), short_id(&id));
                    track_onboarding(store, Milestone::Goal);
                }
                Err(e) => println!("Not added: {}", e),
            }
        }
        Some(("list", sub)) => list(store, sub)?,
        Some(("deposit", sub)) => {
            let id = goal_id(store, sub)?;
            let amount = sub.get_one::<String>("amount").map(String::as_str).unwrap_or_default();
            match deposit(store, id, amount) {
                Some(bal) => println!("Goal {} now at {}", short_id(&id), fmt_money(&bal)),
                None => println!("Ignored: amount must be a positive number"),
            }
        }
        Some(("withdraw", sub)) => {
            let id = goal_id(store, sub)?;
            let amount = sub.get_one::<String>("amount").map(String::as_str).unwrap_or_default();
            match withdraw(store, id, amount) {
                Some(bal) => println!("Goal {} now at {}", short_id(&id), fmt_money(&bal)),
                None => println!("Ignored: amount must be a positive number"),
            }
        }
        Some(("rm", sub)) => {
            let id = goal_id(store, sub)?;
            let mut confirm = confirmer(sub);
            if delete_goal(store, id, &mut confirm) {
                println!("Deleted goal {}", short_id(&id));
            }
        }
        _ => {}
    }
    Ok(())
}

fn goal_id<S: Storage>(store: &LedgerStore<S>, sub: &clap::ArgMatches) -> Result<Uuid> {
    let raw = sub.get_one::<String>("id").map(String::as_str).unwrap_or_default();
    let ids = store.document().goals.iter().map(|g| g.id);
    Ok(resolve_id(raw, ids, "goal")?)
}

#[derive(Serialize)]
pub struct GoalRow {
    pub id: String,
    pub description: String,
    pub target: String,
    pub accumulated: String,
    pub remaining: String,
    pub progress: String,
}

pub fn query_rows<S: Storage>(store: &LedgerStore<S>) -> Vec<GoalRow> {
    store
        .document()
        .goals
        .iter()
        .map(|g| GoalRow {
            id: short_id(&g.id),
            description: g.description.clone(),
            target: fmt_money(&g.target),
            accumulated: fmt_money(&g.accumulated),
            remaining: fmt_money(&g.remaining()),
            progress: format!("{}%", g.progress_percent()),
        })
        .collect()
}

fn list<S: Storage>(store: &LedgerStore<S>, sub: &clap::ArgMatches) -> Result<()> {
    let data = query_rows(store);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .into_iter()
            .map(|r| vec![r.id, r.description, r.target, r.accumulated, r.remaining, r.progress])
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Goal", "Target", "Saved", "Remaining", "Progress"],
                rows
            )
        );
    }
    Ok(())
}
