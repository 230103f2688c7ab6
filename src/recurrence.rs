// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Entry creation, including eager expansion of recurring entries.
//!
//! A recurring entry is written out once, at creation time, as independent
//! copies one month apart. Nothing regenerates them later; editing or deleting
//! one copy never touches the others.

use crate::db::Storage;
use crate::error::ValidationError;
use crate::models::{Entry, EntryKind, PeriodKey, INCOME_CATEGORY};
use crate::store::LedgerStore;
use crate::utils::{add_months, parse_amount, parse_date};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

/// Upper bound on monthly copies per entry: ten years.
pub const MAX_REPEAT: u32 = 120;

/// Raw form input for a new income, expense, or card due.
#[derive(Debug, Clone, Default)]
pub struct EntryDraft {
    pub name: String,
    pub amount: String,
    pub date: String,
    pub category: Option<String>,
    /// Extra monthly copies to create after the base entry.
    pub repeat: u32,
}

/// A draft that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEntry {
    pub kind: EntryKind,
    pub name: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub category: Option<String>,
    pub repeat: u32,
}

impl EntryDraft {
    pub fn validate(&self, kind: EntryKind, types: &[String]) -> Result<NewEntry, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingName);
        }
        let amount = parse_amount(&self.amount)?;
        let date = parse_date(&self.date)?;
        if self.repeat > MAX_REPEAT {
            return Err(ValidationError::TooManyRepeats {
                got: self.repeat,
                max: MAX_REPEAT,
            });
        }
        if add_months(date, self.repeat).is_none() {
            return Err(ValidationError::DateOutOfRange(format!(
                "{} + {} months",
                date, self.repeat
            )));
        }
        let category = match kind {
            EntryKind::Income => Some(
                self.category
                    .as_deref()
                    .map(str::trim)
                    .filter(|c| !c.is_empty())
                    .unwrap_or(INCOME_CATEGORY)
                    .to_string(),
            ),
            EntryKind::Expense => {
                let cat = self
                    .category
                    .as_deref()
                    .map(str::trim)
                    .filter(|c| !c.is_empty())
                    .ok_or(ValidationError::MissingCategory)?;
                if !types.iter().any(|t| t == cat) {
                    return Err(ValidationError::UnknownCategory(cat.to_string()));
                }
                Some(cat.to_string())
            }
            EntryKind::CardDue => None,
        };
        Ok(NewEntry {
            kind,
            name: name.to_string(),
            amount,
            date,
            category,
            repeat: self.repeat,
        })
    }
}

/// Builds the `count` monthly copies of `base`, at `date + 1..=count` months.
/// Each copy gets a fresh id; every other field is copied as is. Stops at the
/// last representable month.
pub fn materialize(base: &Entry, count: u32) -> Vec<Entry> {
    (1..=count)
        .map_while(|i| add_months(base.date, i))
        .map(|date| Entry {
            id: Uuid::new_v4(),
            date,
            ..base.clone()
        })
        .collect()
}

/// Stores a validated entry plus its recurring copies and writes the document.
/// Returns `(period, id)` for the base entry first, then each copy in order.
pub fn record_entry<S: Storage>(
    store: &mut LedgerStore<S>,
    new: NewEntry,
) -> Vec<(PeriodKey, Uuid)> {
    let base = Entry {
        id: Uuid::new_v4(),
        name: new.name,
        amount: new.amount,
        date: new.date,
        recurring: new.repeat > 0,
        category: new.category,
        tags: new.kind.default_tags(),
        created_at: Utc::now(),
        updated_at: None,
    };
    let copies = materialize(&base, new.repeat);
    let mut placed = Vec::with_capacity(copies.len() + 1);
    let id = base.id;
    placed.push((store.add_entry(new.kind, base), id));
    for copy in copies {
        let id = copy.id;
        placed.push((store.add_entry(new.kind, copy), id));
    }
    info!(kind = %new.kind, entries = placed.len(), "entry recorded");
    store.persist();
    placed
}

/// Validates and records `draft`. Invalid input is dropped with a warning and
/// leaves the document untouched.
pub fn submit<S: Storage>(
    store: &mut LedgerStore<S>,
    kind: EntryKind,
    draft: &EntryDraft,
) -> Result<Vec<(PeriodKey, Uuid)>, ValidationError> {
    let new = draft.validate(kind, &store.document().types).inspect_err(|e| {
        warn!(%kind, error = %e, "entry rejected");
    })?;
    Ok(record_entry(store, new))
}
