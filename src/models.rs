// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::ValidationError;
use crate::utils::{parse_period, period_of};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// `YYYY-MM`; string order is chronological order.
pub type PeriodKey = String;

pub const DEFAULT_TYPES: [&str; 7] = [
    "Housing",
    "Food",
    "Transport",
    "Health",
    "Education",
    "Leisure",
    "Other",
];

pub const INCOME_CATEGORY: &str = "Income";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntryKind {
    Income,
    Expense,
    CardDue,
}

impl EntryKind {
    pub const ALL: [EntryKind; 3] = [EntryKind::Income, EntryKind::Expense, EntryKind::CardDue];

    pub fn label(self) -> &'static str {
        match self {
            EntryKind::Income => "income",
            EntryKind::Expense => "expense",
            EntryKind::CardDue => "card",
        }
    }

    pub fn default_tags(self) -> Vec<String> {
        match self {
            EntryKind::Income => vec!["confirmed".to_string()],
            EntryKind::Expense | EntryKind::CardDue => vec!["pending".to_string()],
        }
    }

    /// Whether entries of this kind show up as upcoming due dates.
    pub fn is_due(self) -> bool {
        !matches!(self, EntryKind::Income)
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: Uuid,
    pub name: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    #[serde(default)]
    pub recurring: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entry {
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.date < today
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodBucket {
    #[serde(default)]
    pub incomes: Vec<Entry>,
    #[serde(default)]
    pub expenses: Vec<Entry>,
    #[serde(default)]
    pub card_dues: Vec<Entry>,
    pub created_at: DateTime<Utc>,
}

impl PeriodBucket {
    pub fn new(created_at: DateTime<Utc>) -> Self {
        Self {
            incomes: Vec::new(),
            expenses: Vec::new(),
            card_dues: Vec::new(),
            created_at,
        }
    }

    pub fn entries(&self, kind: EntryKind) -> &[Entry] {
        match kind {
            EntryKind::Income => &self.incomes,
            EntryKind::Expense => &self.expenses,
            EntryKind::CardDue => &self.card_dues,
        }
    }

    pub fn entries_mut(&mut self, kind: EntryKind) -> &mut Vec<Entry> {
        match kind {
            EntryKind::Income => &mut self.incomes,
            EntryKind::Expense => &mut self.expenses,
            EntryKind::CardDue => &mut self.card_dues,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.incomes.is_empty() && self.expenses.is_empty() && self.card_dues.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: Uuid,
    pub description: String,
    pub target: Decimal,
    pub accumulated: Decimal,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Goal {
    pub fn remaining(&self) -> Decimal {
        (self.target - self.accumulated).max(Decimal::ZERO)
    }

    /// Whole-number percentage of the target reached, within 0..=100.
    pub fn progress_percent(&self) -> Decimal {
        if self.target <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        (self.accumulated / self.target * Decimal::ONE_HUNDRED)
            .round_dp(0)
            .clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: Uuid,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub done: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    pub first_use: DateTime<Utc>,
    #[serde(default)]
    pub last_backup: Option<PeriodKey>,
}

/// The single persisted aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub periods: BTreeMap<PeriodKey, PeriodBucket>,
    pub types: Vec<String>,
    pub goals: Vec<Goal>,
    pub notes: Vec<Note>,
    pub meta: Meta,
}

impl Document {
    pub fn with_defaults(now: DateTime<Utc>) -> Self {
        Self {
            periods: BTreeMap::new(),
            types: DEFAULT_TYPES.iter().map(|s| s.to_string()).collect(),
            goals: Vec::new(),
            notes: Vec::new(),
            meta: Meta {
                first_use: now,
                last_backup: None,
            },
        }
    }

    pub fn goal_mut(&mut self, id: Uuid) -> Option<&mut Goal> {
        self.goals.iter_mut().find(|g| g.id == id)
    }

    pub fn note(&self, id: Uuid) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    pub fn note_mut(&mut self, id: Uuid) -> Option<&mut Note> {
        self.notes.iter_mut().find(|n| n.id == id)
    }

    /// Every entry of `kind`, paired with its period, in period order.
    pub fn entries_of(&self, kind: EntryKind) -> impl Iterator<Item = (&PeriodKey, &Entry)> {
        self.periods
            .iter()
            .flat_map(move |(p, b)| b.entries(kind).iter().map(move |e| (p, e)))
    }

    pub fn entry_ids(&self) -> impl Iterator<Item = Uuid> + '_ {
        EntryKind::ALL
            .into_iter()
            .flat_map(move |k| self.entries_of(k).map(|(_, e)| e.id))
    }
}

/// Top-level sections accepted by an import. Each present section replaces
/// the current one wholesale; absent sections are left alone.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DocumentPatch {
    pub periods: Option<BTreeMap<PeriodKey, PeriodBucket>>,
    pub types: Option<Vec<String>>,
    pub goals: Option<Vec<Goal>>,
    pub notes: Option<Vec<Note>>,
    pub meta: Option<Meta>,
}

impl DocumentPatch {
    /// Checks the sections against the rules the rest of the ledger relies
    /// on: `YYYY-MM` keys, entries filed under the month of their own date,
    /// positive amounts, named entries, unique non-blank categories, and goals
    /// holding `0..=target`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(periods) = &self.periods {
            for (key, bucket) in periods {
                parse_period(key)?;
                for kind in EntryKind::ALL {
                    for e in bucket.entries(kind) {
                        if e.name.trim().is_empty() {
                            return Err(ValidationError::MissingName);
                        }
                        if e.amount <= Decimal::ZERO {
                            return Err(ValidationError::NonPositiveAmount);
                        }
                        if period_of(e.date) != *key {
                            return Err(ValidationError::MisfiledEntry {
                                period: key.clone(),
                                date: e.date.to_string(),
                            });
                        }
                    }
                }
            }
        }
        if let Some(types) = &self.types {
            for (i, t) in types.iter().enumerate() {
                if t.trim().is_empty() {
                    return Err(ValidationError::MissingCategory);
                }
                if types[..i].contains(t) {
                    return Err(ValidationError::DuplicateCategory(t.clone()));
                }
            }
        }
        if let Some(goals) = &self.goals {
            for g in goals {
                if g.description.trim().is_empty() {
                    return Err(ValidationError::MissingDescription);
                }
                if g.target <= Decimal::ZERO {
                    return Err(ValidationError::NonPositiveAmount);
                }
                if g.accumulated < Decimal::ZERO || g.accumulated > g.target {
                    return Err(ValidationError::GoalOutOfRange(g.description.clone()));
                }
            }
        }
        Ok(())
    }

    pub fn sections(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if self.periods.is_some() {
            out.push("periods");
        }
        if self.types.is_some() {
            out.push("types");
        }
        if self.goals.is_some() {
            out.push("goals");
        }
        if self.notes.is_some() {
            out.push("notes");
        }
        if self.meta.is_some() {
            out.push("meta");
        }
        out
    }

    pub fn apply(self, doc: &mut Document) {
        if let Some(periods) = self.periods {
            doc.periods = periods;
        }
        if let Some(types) = self.types {
            doc.types = types;
        }
        if let Some(goals) = self.goals {
            doc.goals = goals;
        }
        if let Some(notes) = self.notes {
            doc.notes = notes;
        }
        if let Some(meta) = self.meta {
            doc.meta = meta;
        }
    }
}
