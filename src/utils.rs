// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{LedgerError, ValidationError};
use chrono::{Datelike, Local, Months, NaiveDate};
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use uuid::Uuid;

static PERIOD_RE: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^(\d{4})-(0[1-9]|1[0-2])$").ok());

/// Calendar date of the host's local clock. Dates are never shifted through UTC.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// `YYYY-MM` key of the month containing `date`.
pub fn period_of(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

/// Last year a period key can hold; past it keys grow a fifth digit and stop
/// sorting chronologically.
pub const MAX_YEAR: i32 = 9999;

/// Adds `n` calendar months, clamping the day to the last valid day of the
/// target month (2024-01-31 + 1 month = 2024-02-29). `None` past [`MAX_YEAR`].
pub fn add_months(date: NaiveDate, n: u32) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(n))
        .filter(|d| d.year() <= MAX_YEAR)
}

/// Months since year 0 for a period key, so two keys can be compared by distance.
pub fn period_index(period: &str) -> Option<i64> {
    let caps = PERIOD_RE.as_ref()?.captures(period)?;
    let y: i64 = caps[1].parse().ok()?;
    let m: i64 = caps[2].parse().ok()?;
    Some(y * 12 + (m - 1))
}

pub fn parse_date(s: &str) -> Result<NaiveDate, ValidationError> {
    let s = s.trim();
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(s.into()))?;
    if !(0..=MAX_YEAR).contains(&date.year()) {
        return Err(ValidationError::DateOutOfRange(s.into()));
    }
    Ok(date)
}

pub fn parse_period(s: &str) -> Result<String, ValidationError> {
    let s = s.trim();
    if PERIOD_RE.as_ref().is_some_and(|re| re.is_match(s)) {
        Ok(s.to_string())
    } else {
        Err(ValidationError::InvalidPeriod(s.into()))
    }
}

/// Parses a user-typed money amount. Accepts `,` as the decimal separator and
/// a leading currency marker; rejects zero and negatives.
pub fn parse_amount(s: &str) -> Result<Decimal, ValidationError> {
    let cleaned = s
        .trim()
        .trim_start_matches("R$")
        .trim_start_matches('$')
        .trim()
        .replace(',', ".");
    let d = cleaned
        .parse::<Decimal>()
        .map_err(|_| ValidationError::InvalidAmount(s.trim().into()))?;
    if d <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveAmount);
    }
    Ok(d)
}

pub fn fmt_money(d: &Decimal) -> String {
    format!("{:.2}", d.round_dp(2))
}

pub fn short_id(id: &Uuid) -> String {
    id.simple().to_string()[..8].to_string()
}

/// Finds the single id starting with `prefix` (hyphens ignored).
pub fn resolve_id<I>(prefix: &str, ids: I, what: &'static str) -> Result<Uuid, LedgerError>
where
    I: IntoIterator<Item = Uuid>,
{
    let needle = prefix.trim().replace('-', "").to_lowercase();
    if needle.is_empty() {
        return Err(LedgerError::NotFound {
            what,
            id: prefix.into(),
        });
    }
    let mut found: Option<Uuid> = None;
    for id in ids {
        if id.simple().to_string().starts_with(&needle) {
            if found.is_some_and(|f| f != id) {
                return Err(LedgerError::AmbiguousId(prefix.into(), what));
            }
            found = Some(id);
        }
    }
    found.ok_or_else(|| LedgerError::NotFound {
        what,
        id: prefix.into(),
    })
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> anyhow::Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
