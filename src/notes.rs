// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Free-form notes and the single-editor rule.
//!
//! At most one note is active (receiving keystrokes) at a time. The active
//! slot is flushed into the document in two places: when another note starts
//! receiving input, and when the active note loses focus. Editors can hand
//! focus directly to each other without a blur in between, so the switch-time
//! flush is the one that keeps the previous note's text.

use crate::db::Storage;
use crate::models::Note;
use crate::store::{Confirm, LedgerStore};
use chrono::Utc;
use std::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
struct ActiveNote {
    id: Uuid,
    /// Editor contents as of the last keystroke.
    text: String,
}

#[derive(Debug, Default)]
pub struct NoteEditCoordinator {
    active: Option<ActiveNote>,
}

impl NoteEditCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<Uuid> {
        self.active.as_ref().map(|a| a.id)
    }

    /// Appends an empty note and schedules a write.
    pub fn create<S: Storage>(&mut self, store: &mut LedgerStore<S>, now: Instant) -> Uuid {
        let note = Note {
            id: Uuid::new_v4(),
            text: String::new(),
            done: false,
            created_at: Utc::now(),
            updated_at: None,
        };
        let id = note.id;
        store.document_mut().notes.push(note);
        info!(%id, "note created");
        store.persist_debounced(now);
        id
    }

    /// An editor gained focus. Switching away from another note flushes it.
    pub fn focus<S: Storage>(&mut self, store: &mut LedgerStore<S>, id: Uuid, now: Instant) {
        if self.active() == Some(id) {
            return;
        }
        self.flush_active(store, now);
        let Some(note) = store.document().note(id) else {
            return;
        };
        self.active = Some(ActiveNote {
            id,
            text: note.text.clone(),
        });
    }

    /// An editor's contents changed to `text`.
    pub fn keystroke<S: Storage>(
        &mut self,
        store: &mut LedgerStore<S>,
        id: Uuid,
        text: &str,
        now: Instant,
    ) {
        if self.active() != Some(id) {
            self.flush_active(store, now);
        }
        let Some(note) = store.document_mut().note_mut(id) else {
            debug!(%id, "keystroke for a note that no longer exists");
            return;
        };
        note.text = text.to_string();
        note.updated_at = Some(Utc::now());
        self.active = Some(ActiveNote {
            id,
            text: text.to_string(),
        });
        store.persist_debounced(now);
    }

    /// The editor for `id` lost focus. If it was the active one, its text is
    /// committed and written immediately. Returns whether a write happened.
    pub fn blur<S: Storage>(&mut self, store: &mut LedgerStore<S>, id: Uuid) -> bool {
        match self.active.take() {
            Some(active) if active.id == id => {
                commit(store, &active);
                store.persist()
            }
            other => {
                self.active = other;
                false
            }
        }
    }

    /// Flushes the active note and forces out any pending write.
    pub fn shutdown<S: Storage>(&mut self, store: &mut LedgerStore<S>) -> bool {
        if let Some(active) = self.active.take() {
            commit(store, &active);
            return store.persist();
        }
        store.flush()
    }

    pub fn set_done<S: Storage>(
        &mut self,
        store: &mut LedgerStore<S>,
        id: Uuid,
        done: bool,
        now: Instant,
    ) -> bool {
        let Some(note) = store.document_mut().note_mut(id) else {
            return false;
        };
        note.done = done;
        note.updated_at = Some(Utc::now());
        store.persist_debounced(now);
        true
    }

    /// Deletes a note. Notes with text need confirmation; blank ones go
    /// straight away.
    pub fn delete<S: Storage>(
        &mut self,
        store: &mut LedgerStore<S>,
        id: Uuid,
        confirm: &mut dyn Confirm,
    ) -> bool {
        let Some(note) = store.document().note(id) else {
            return false;
        };
        let has_text = !self.text_of(note).trim().is_empty();
        if has_text && !confirm.confirm("This note has content. Delete it?") {
            return false;
        }
        store.document_mut().notes.retain(|n| n.id != id);
        if self.active() == Some(id) {
            self.active = None;
        }
        info!(%id, "note deleted");
        store.persist();
        true
    }

    fn text_of<'a>(&'a self, note: &'a Note) -> &'a str {
        match &self.active {
            Some(a) if a.id == note.id => &a.text,
            _ => &note.text,
        }
    }

    fn flush_active<S: Storage>(&mut self, store: &mut LedgerStore<S>, now: Instant) {
        if let Some(prev) = self.active.take() {
            debug!(id = %prev.id, "flushing note on editor switch");
            if commit(store, &prev) {
                store.persist_debounced(now);
            }
        }
    }
}

fn commit<S: Storage>(store: &mut LedgerStore<S>, active: &ActiveNote) -> bool {
    match store.document_mut().note_mut(active.id) {
        Some(note) => {
            note.text = active.text.clone();
            note.updated_at = Some(Utc::now());
            true
        }
        None => false,
    }
}
