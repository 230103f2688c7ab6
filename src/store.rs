// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The in-memory ledger document and its persistence lifecycle.
//!
//! A [`LedgerStore`] is loaded once, mutated in place, and written back either
//! immediately (structural edits) or through the debounce scheduler
//! (keystroke-rate edits). A failed write is logged and otherwise ignored:
//! the in-memory document stays authoritative and the next write carries
//! every change made since.

use crate::db::{Storage, DOCUMENT_KEY, ONBOARDING_COMPLETED_KEY, ONBOARDING_STEP_KEY};
use crate::error::LedgerError;
use crate::models::{Document, DocumentPatch, Entry, EntryKind, PeriodBucket, PeriodKey};
use crate::persist::{FlushReason, PersistScheduler};
use crate::utils::{period_of, today};
use chrono::Utc;
use std::time::Instant;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Yes/no gate in front of destructive actions.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    /// The listed top-level sections replaced the current ones.
    Applied {
        sections: Vec<&'static str>,
        persisted: bool,
    },
    /// Parsed fine but the user said no.
    Declined,
    /// Not a ledger document; nothing changed.
    Rejected(String),
}

pub struct LedgerStore<S: Storage> {
    doc: Document,
    storage: S,
    scheduler: PersistScheduler,
}

impl<S: Storage> LedgerStore<S> {
    /// Loads the saved document, or starts a default one on first run.
    pub fn load(storage: S) -> Result<Self, LedgerError> {
        let doc = match storage.get(DOCUMENT_KEY)? {
            Some(raw) => {
                serde_json::from_str(&raw).map_err(|source| LedgerError::CorruptDocument {
                    key: DOCUMENT_KEY.to_string(),
                    source,
                })?
            }
            None => {
                info!("no saved document, starting with defaults");
                Document::with_defaults(Utc::now())
            }
        };
        Ok(Self {
            doc,
            storage,
            scheduler: PersistScheduler::new(),
        })
    }

    pub fn with_scheduler(mut self, scheduler: PersistScheduler) -> Self {
        self.scheduler = scheduler;
        self
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub(crate) fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Returns the bucket for `key`, creating an empty one on first reference.
    pub fn ensure_period(&mut self, key: &str) -> &mut PeriodBucket {
        self.doc.periods.entry(key.to_string()).or_insert_with(|| {
            debug!(period = key, "period created");
            PeriodBucket::new(Utc::now())
        })
    }

    /// Appends `entry` to the bucket of the month its own date falls in.
    pub fn add_entry(&mut self, kind: EntryKind, entry: Entry) -> PeriodKey {
        let period = period_of(entry.date);
        debug!(%kind, %period, id = %entry.id, "entry added");
        self.ensure_period(&period).entries_mut(kind).push(entry);
        period
    }

    /// Drops the entry with `id` from one period list. Missing ids are a no-op.
    pub fn remove_entry(&mut self, kind: EntryKind, period: &str, id: Uuid) -> bool {
        let Some(bucket) = self.doc.periods.get_mut(period) else {
            return false;
        };
        let list = bucket.entries_mut(kind);
        let before = list.len();
        list.retain(|e| e.id != id);
        before != list.len()
    }

    /// Confirmed delete followed by an immediate write.
    pub fn delete_entry(
        &mut self,
        kind: EntryKind,
        period: &str,
        id: Uuid,
        confirm: &mut dyn Confirm,
    ) -> bool {
        if !confirm.confirm(&format!("Delete this {}?", kind)) {
            return false;
        }
        let removed = self.remove_entry(kind, period, id);
        if removed {
            info!(%kind, period, %id, "entry deleted");
            self.persist();
        }
        removed
    }

    /// Finds an entry by id in any period.
    pub fn find_entry(&self, kind: EntryKind, id: Uuid) -> Option<(&PeriodKey, &Entry)> {
        self.doc.entries_of(kind).find(|(_, e)| e.id == id)
    }

    /// Adds a category name. Blank or already-present names are ignored.
    pub fn add_type(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || self.doc.types.iter().any(|t| t == name) {
            return false;
        }
        self.doc.types.push(name.to_string());
        info!(category = name, "category added");
        self.persist();
        true
    }

    /// Writes the document now and cancels any pending debounced write.
    pub fn persist(&mut self) -> bool {
        let previous = self.doc.meta.last_backup.replace(period_of(today()));
        let written = self.write_document();
        if !written {
            self.doc.meta.last_backup = previous;
        }
        written
    }

    /// Restarts the debounce window; the write happens on a later [`tick`](Self::tick).
    pub fn persist_debounced(&mut self, now: Instant) {
        self.scheduler.schedule(now);
    }

    /// Performs the pending write if its window has passed.
    pub fn tick(&mut self, now: Instant) -> Option<FlushReason> {
        let reason = self.scheduler.due(now)?;
        debug!(?reason, "scheduled write due");
        self.write_document();
        Some(reason)
    }

    /// Writes whatever is pending, regardless of timers.
    pub fn flush(&mut self) -> bool {
        if self.scheduler.is_pending() {
            self.write_document()
        } else {
            true
        }
    }

    pub fn has_pending_write(&self) -> bool {
        self.scheduler.is_pending()
    }

    pub fn next_wakeup(&self) -> Option<Instant> {
        self.scheduler.next_wakeup()
    }

    fn write_document(&mut self) -> bool {
        self.scheduler.clear();
        let raw = match serde_json::to_string(&self.doc) {
            Ok(raw) => raw,
            Err(e) => {
                error!(error = %e, "could not serialize document");
                return false;
            }
        };
        match self.storage.set(DOCUMENT_KEY, &raw) {
            Ok(()) => {
                info!(bytes = raw.len(), "document saved");
                true
            }
            Err(e) => {
                error!(error = %e, "save failed, keeping in-memory state");
                false
            }
        }
    }

    pub fn export_json(&self) -> Result<String, LedgerError> {
        Ok(serde_json::to_string_pretty(&self.doc)?)
    }

    /// Parses `raw` as a document patch and, once confirmed, replaces each
    /// top-level section it carries.
    pub fn import_json(&mut self, raw: &str, confirm: &mut dyn Confirm) -> ImportOutcome {
        let patch: DocumentPatch = match serde_json::from_str(raw) {
            Ok(p) => p,
            Err(e) => {
                warn!(error = %e, "import rejected");
                return ImportOutcome::Rejected(e.to_string());
            }
        };
        if let Err(e) = patch.validate() {
            warn!(error = %e, "import rejected");
            return ImportOutcome::Rejected(e.to_string());
        }
        if !confirm.confirm("Import this data? It replaces the matching sections of your ledger.") {
            return ImportOutcome::Declined;
        }
        let sections = patch.sections();
        patch.apply(&mut self.doc);
        info!(?sections, "import applied");
        let persisted = self.persist();
        ImportOutcome::Applied {
            sections,
            persisted,
        }
    }

    /// Erases the saved document and onboarding flags after two confirmations,
    /// then starts over from defaults in memory.
    pub fn reset(&mut self, confirm: &mut dyn Confirm) -> Result<bool, LedgerError> {
        if !confirm.confirm("This erases ALL of your data. Continue?") {
            return Ok(false);
        }
        if !confirm.confirm("Are you sure? This cannot be undone.") {
            return Ok(false);
        }
        self.storage.remove(DOCUMENT_KEY)?;
        self.storage.remove(ONBOARDING_COMPLETED_KEY)?;
        self.storage.remove(ONBOARDING_STEP_KEY)?;
        self.scheduler.clear();
        self.doc = Document::with_defaults(Utc::now());
        warn!("ledger reset");
        Ok(true)
    }
}
