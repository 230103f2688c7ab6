// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Line-driven editing session. Every input line is one editor event, applied
//! in arrival order on this thread; between lines the loop sleeps until the
//! next scheduled write is due.

use crate::db::Storage;
use crate::notes::NoteEditCoordinator;
use crate::store::LedgerStore;
use crate::utils::{pretty_table, resolve_id, short_id};
use anyhow::Result;
use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Instant;
use tracing::debug;
use uuid::Uuid;

const HELP: &str = "\
commands:
  new                  create a note and start editing it
  focus <id>           move the cursor into a note
  type <id> <text>     replace a note's text (one keystroke event)
  blur <id>            leave a note's editor (saves immediately)
  done <id> | open <id>
  rm <id> | rm! <id>   delete (rm! also deletes notes with text)
  list | help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellAction {
    Continue(String),
    Quit,
}

enum Input {
    Line(String),
    Closed,
}

pub fn run<S: Storage>(store: &mut LedgerStore<S>) -> Result<()> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(Input::Line(line)).is_err() {
                return;
            }
        }
        let _ = tx.send(Input::Closed);
    });

    let mut editor = NoteEditCoordinator::new();
    println!("{}", HELP);
    prompt()?;
    loop {
        let received = match store.next_wakeup() {
            Some(at) => rx.recv_timeout(at.saturating_duration_since(Instant::now())),
            None => rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };
        match received {
            Ok(Input::Line(line)) => match apply(store, &mut editor, &line, Instant::now()) {
                ShellAction::Continue(msg) => {
                    if !msg.is_empty() {
                        println!("{}", msg);
                    }
                    prompt()?;
                }
                ShellAction::Quit => break,
            },
            Ok(Input::Closed) | Err(RecvTimeoutError::Disconnected) => break,
            Err(RecvTimeoutError::Timeout) => {}
        }
        if let Some(reason) = store.tick(Instant::now()) {
            debug!(?reason, "shell flushed pending edits");
        }
    }
    editor.shutdown(store);
    Ok(())
}

fn prompt() -> Result<()> {
    print!("notes> ");
    io::stdout().flush()?;
    Ok(())
}

fn lookup<S: Storage>(store: &LedgerStore<S>, raw: &str) -> Result<Uuid, String> {
    let ids = store.document().notes.iter().map(|n| n.id);
    resolve_id(raw, ids, "note").map_err(|e| e.to_string())
}

/// Applies one input line at `now`.
pub fn apply<S: Storage>(
    store: &mut LedgerStore<S>,
    editor: &mut NoteEditCoordinator,
    line: &str,
    now: Instant,
) -> ShellAction {
    let line = line.trim();
    let (cmd, rest) = line.split_once(' ').unwrap_or((line, ""));
    let rest = rest.trim_start();
    let msg = match cmd {
        "" => String::new(),
        "quit" | "exit" => return ShellAction::Quit,
        "help" => HELP.to_string(),
        "list" => {
            let rows = store
                .document()
                .notes
                .iter()
                .map(|n| {
                    let marker = if editor.active() == Some(n.id) { "*" } else { "" };
                    vec![
                        format!("{}{}", short_id(&n.id), marker),
                        if n.done { "x".into() } else { String::new() },
                        n.text.clone(),
                    ]
                })
                .collect();
            pretty_table(&["ID", "Done", "Text"], rows).to_string()
        }
        "new" => {
            let id = editor.create(store, now);
            editor.focus(store, id, now);
            format!("editing {}", short_id(&id))
        }
        "focus" => match lookup(store, rest) {
            Ok(id) => {
                editor.focus(store, id, now);
                String::new()
            }
            Err(e) => e,
        },
        "type" => {
            let (raw, text) = rest.split_once(' ').unwrap_or((rest, ""));
            match lookup(store, raw) {
                Ok(id) => {
                    editor.keystroke(store, id, text, now);
                    String::new()
                }
                Err(e) => e,
            }
        }
        "blur" => match lookup(store, rest) {
            Ok(id) => {
                if editor.blur(store, id) {
                    "saved".into()
                } else {
                    String::new()
                }
            }
            Err(e) => e,
        },
        "done" | "open" => match lookup(store, rest) {
            Ok(id) => {
                editor.set_done(store, id, cmd == "done", now);
                String::new()
            }
            Err(e) => e,
        },
        "rm" | "rm!" => match lookup(store, rest) {
            Ok(id) => {
                let force = cmd == "rm!";
                let mut confirm = |_: &str| force;
                if editor.delete(store, id, &mut confirm) {
                    format!("deleted {}", short_id(&id))
                } else {
                    "note has text, use rm! to delete it".into()
                }
            }
            Err(e) => e,
        },
        other => format!("unknown command '{}', try help", other),
    };
    ShellAction::Continue(msg)
}
