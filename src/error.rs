// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Failures of the key/value backend behind the ledger document.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("storage quota exceeded writing '{key}' ({needed} bytes, {available} available)")]
    QuotaExceeded {
        key: String,
        needed: usize,
        available: usize,
    },
}

/// Input rejected before it reaches the document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("name is required")]
    MissingName,
    #[error("category is required for expenses")]
    MissingCategory,
    #[error("unknown category '{0}'")]
    UnknownCategory(String),
    #[error("invalid amount '{0}'")]
    InvalidAmount(String),
    #[error("amount must be greater than zero")]
    NonPositiveAmount,
    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("invalid period '{0}', expected YYYY-MM")]
    InvalidPeriod(String),
    #[error("description is required")]
    MissingDescription,
    #[error("at most {max} monthly copies, got {got}")]
    TooManyRepeats { got: u32, max: u32 },
    #[error("'{0}' is past the last supported date, 9999-12-31")]
    DateOutOfRange(String),
    #[error("category '{0}' is listed twice")]
    DuplicateCategory(String),
    #[error("entry dated {date} is filed under period {period}")]
    MisfiledEntry { period: String, date: String },
    #[error("goal '{0}' has a saved amount outside 0..=target")]
    GoalOutOfRange(String),
}

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("serialize document: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("persisted document under '{key}' is unreadable: {source}")]
    CorruptDocument {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("no {what} matches '{id}'")]
    NotFound { what: &'static str, id: String },
    #[error("'{0}' matches more than one {1}, use a longer id")]
    AmbiguousId(String, &'static str),
}
