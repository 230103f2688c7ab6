// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Derived views over the ledger document. Everything here is read-only and
//! recomputed on demand.

use crate::models::{Document, Entry, EntryKind, PeriodKey};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::ops::Bound;

/// How many trailing periods the history report covers.
pub const HISTORY_MONTHS: usize = 6;

const EXCELLENT_THRESHOLD: Decimal = Decimal::from_parts(500, 0, 0, false, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Excellent,
    Good,
    Warning,
}

impl Trend {
    pub fn classify(remaining: Decimal) -> Self {
        if remaining > EXCELLENT_THRESHOLD {
            Trend::Excellent
        } else if remaining > Decimal::ZERO {
            Trend::Good
        } else {
            Trend::Warning
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Trend::Excellent => "excellent",
            Trend::Good => "good",
            Trend::Warning => "warning",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodTotals {
    pub period: PeriodKey,
    pub income: Decimal,
    pub expenses: Decimal,
    pub card_dues: Decimal,
    /// Same as `income`; the money available for the month.
    pub balance: Decimal,
    pub remaining: Decimal,
    pub trend: Trend,
}

/// Saturates at `Decimal::MAX` instead of overflowing.
fn sum(entries: &[Entry]) -> Decimal {
    entries
        .iter()
        .fold(Decimal::ZERO, |acc, e| acc.saturating_add(e.amount))
}

pub fn period_totals(doc: &Document, period: &str) -> PeriodTotals {
    let (income, expenses, card_dues) = doc
        .periods
        .get(period)
        .map(|b| (sum(&b.incomes), sum(&b.expenses), sum(&b.card_dues)))
        .unwrap_or_default();
    let remaining = income.saturating_sub(expenses).saturating_sub(card_dues);
    PeriodTotals {
        period: period.to_string(),
        income,
        expenses,
        card_dues,
        balance: income,
        remaining,
        trend: Trend::classify(remaining),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DueEvent {
    pub date: NaiveDate,
    pub name: String,
    pub kind: EntryKind,
    pub amount: Decimal,
    pub period: PeriodKey,
}

/// Expenses and card dues dated `today` or later, from every period at or
/// after `current`, soonest first. Equal dates keep their stored order.
pub fn upcoming_dues(doc: &Document, current: &str, today: NaiveDate) -> Vec<DueEvent> {
    let mut events: Vec<DueEvent> = doc
        .periods
        .range::<str, _>((Bound::Included(current), Bound::Unbounded))
        .flat_map(|(period, bucket)| {
            EntryKind::ALL
                .into_iter()
                .filter(|k| k.is_due())
                .flat_map(move |kind| {
                    bucket.entries(kind).iter().map(move |e| DueEvent {
                        date: e.date,
                        name: e.name.clone(),
                        kind,
                        amount: e.amount,
                        period: period.clone(),
                    })
                })
        })
        .filter(|ev| ev.date >= today)
        .collect();
    events.sort_by_key(|ev| ev.date);
    events
}

pub fn next_due(doc: &Document, current: &str, today: NaiveDate) -> Option<DueEvent> {
    upcoming_dues(doc, current, today).into_iter().next()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub amount: Decimal,
    /// Share of the period's expenses, 0..=100, two decimals.
    pub percent: Decimal,
}

pub const UNCATEGORIZED: &str = "(uncategorized)";

/// Expense totals per category for one period, largest first.
pub fn category_breakdown(doc: &Document, period: &str) -> Vec<CategoryShare> {
    let Some(bucket) = doc.periods.get(period) else {
        return Vec::new();
    };
    let mut shares: Vec<CategoryShare> = Vec::new();
    for e in &bucket.expenses {
        let cat = e.category.as_deref().unwrap_or(UNCATEGORIZED);
        match shares.iter_mut().find(|s| s.category == cat) {
            Some(s) => s.amount = s.amount.saturating_add(e.amount),
            None => shares.push(CategoryShare {
                category: cat.to_string(),
                amount: e.amount,
                percent: Decimal::ZERO,
            }),
        }
    }
    let total = shares
        .iter()
        .fold(Decimal::ZERO, |acc, s| acc.saturating_add(s.amount));
    for s in &mut shares {
        s.percent = if total.is_zero() {
            Decimal::ZERO
        } else {
            (s.amount / total * Decimal::ONE_HUNDRED).round_dp(2)
        };
    }
    shares.sort_by(|a, b| b.amount.cmp(&a.amount));
    shares
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthBalance {
    pub period: PeriodKey,
    pub income: Decimal,
    pub outflow: Decimal,
    pub balance: Decimal,
}

/// Income against expenses plus card dues for the latest
/// [`HISTORY_MONTHS`] periods on record, oldest first.
pub fn monthly_history(doc: &Document) -> Vec<MonthBalance> {
    let skip = doc.periods.len().saturating_sub(HISTORY_MONTHS);
    doc.periods
        .iter()
        .skip(skip)
        .map(|(period, b)| {
            let income = sum(&b.incomes);
            let outflow = sum(&b.expenses).saturating_add(sum(&b.card_dues));
            MonthBalance {
                period: period.clone(),
                income,
                outflow,
                balance: income.saturating_sub(outflow),
            }
        })
        .collect()
}

/// Periods worth offering in a picker: those holding any entry, plus
/// `current` even when empty. Ascending.
pub fn visible_periods(doc: &Document, current: &str) -> Vec<PeriodKey> {
    let mut out: Vec<PeriodKey> = doc
        .periods
        .iter()
        .filter(|(p, b)| !b.is_empty() || p.as_str() == current)
        .map(|(p, _)| p.clone())
        .collect();
    if !out.iter().any(|p| p == current) {
        out.push(current.to_string());
        out.sort();
    }
    out
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub totals: PeriodTotals,
    pub next_due: Option<DueEvent>,
}

pub fn dashboard(doc: &Document, current: &str, today: NaiveDate) -> Dashboard {
    Dashboard {
        totals: period_totals(doc, current),
        next_due: next_due(doc, current, today),
    }
}
