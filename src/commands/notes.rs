// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::confirmer;
use crate::db::Storage;
use crate::notes::NoteEditCoordinator;
use crate::store::LedgerStore;
use crate::utils::{maybe_print_json, pretty_table, resolve_id, short_id};
use anyhow::Result;
use serde::Serialize;
use std::time::Instant;
use uuid::Uuid;

pub fn handle<S: Storage>(store: &mut LedgerStore<S>, m: &clap::ArgMatches) -> Result<()> {
    let mut editor = NoteEditCoordinator::new();
    match m.subcommand() {
        Some(("new", sub)) => {
            let id = editor.create(store, Instant::now());
            if let Some(text) = sub.get_one::<String>("text") {
                editor.keystroke(store, id, text, Instant::now());
                editor.blur(store, id);
            }
            println!("Created note {}", short_id(&id));
        }
        Some(("list", sub)) => list(store, sub)?,
        Some(("edit", sub)) => {
            let id = note_id(store, sub)?;
            let text = sub.get_one::<String>("text").map(String::as_str).unwrap_or_default();
            editor.focus(store, id, Instant::now());
            editor.keystroke(store, id, text, Instant::now());
            editor.blur(store, id);
            println!("Updated note {}", short_id(&id));
        }
        Some(("done", sub)) => {
            let id = note_id(store, sub)?;
            let done = !sub.get_flag("undo");
            editor.set_done(store, id, done, Instant::now());
            println!(
                "Note {} marked {}",
                short_id(&id),
                if done { "done" } else { "open" }
            );
        }
        Some(("rm", sub)) => {
            let id = note_id(store, sub)?;
            let mut confirm = confirmer(sub);
            if editor.delete(store, id, &mut confirm) {
                println!("Deleted note {}", short_id(&id));
            }
        }
        _ => {}
    }
    editor.shutdown(store);
    Ok(())
}

pub fn note_id<S: Storage>(store: &LedgerStore<S>, sub: &clap::ArgMatches) -> Result<Uuid> {
    let raw = sub.get_one::<String>("id").map(String::as_str).unwrap_or_default();
    let ids = store.document().notes.iter().map(|n| n.id);
    Ok(resolve_id(raw, ids, "note")?)
}

#[derive(Serialize)]
pub struct NoteRow {
    pub id: String,
    pub done: bool,
    pub text: String,
    pub updated: String,
}

fn list<S: Storage>(store: &LedgerStore<S>, sub: &clap::ArgMatches) -> Result<()> {
    let data: Vec<NoteRow> = store
        .document()
        .notes
        .iter()
        .map(|n| NoteRow {
            id: short_id(&n.id),
            done: n.done,
            text: n.text.clone(),
            updated: n
                .updated_at
                .unwrap_or(n.created_at)
                .format("%Y-%m-%d %H:%M")
                .to_string(),
        })
        .collect();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .into_iter()
            .map(|r| {
                vec![
                    r.id,
                    if r.done { "x".into() } else { String::new() },
                    r.text,
                    r.updated,
                ]
            })
            .collect();
        println!("{}", pretty_table(&["ID", "Done", "Text", "Updated"], rows));
    }
    Ok(())
}
