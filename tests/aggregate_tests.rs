// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use monthbook::aggregate::{
    category_breakdown, dashboard, monthly_history, next_due, period_totals, upcoming_dues,
    visible_periods, Trend, HISTORY_MONTHS,
};
use monthbook::db::{MemoryStorage, Storage, DOCUMENT_KEY};
use monthbook::models::EntryKind;
use monthbook::recurrence::{submit, EntryDraft};
use monthbook::store::LedgerStore;
use rust_decimal::Decimal;

fn setup() -> LedgerStore<MemoryStorage> {
    LedgerStore::load(MemoryStorage::new()).unwrap()
}

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str_exact(s).unwrap()
}

fn add(store: &mut LedgerStore<MemoryStorage>, kind: EntryKind, name: &str, amount: &str, date: &str, category: Option<&str>) {
    let draft = EntryDraft {
        name: name.into(),
        amount: amount.into(),
        date: date.into(),
        category: category.map(Into::into),
        repeat: 0,
    };
    submit(store, kind, &draft).unwrap();
}

#[test]
fn totals_and_trend_for_a_period() {
    let mut store = setup();
    add(&mut store, EntryKind::Income, "Salary", "3000", "2024-05-05", None);
    add(&mut store, EntryKind::Income, "Side job", "250.50", "2024-05-20", None);
    add(&mut store, EntryKind::Expense, "Rent", "1500", "2024-05-10", Some("Housing"));
    add(&mut store, EntryKind::CardDue, "Visa", "600", "2024-05-15", None);

    let t = period_totals(store.document(), "2024-05");
    assert_eq!(t.income, dec("3250.50"));
    assert_eq!(t.balance, t.income);
    assert_eq!(t.expenses, dec("1500"));
    assert_eq!(t.card_dues, dec("600"));
    assert_eq!(t.remaining, dec("1150.50"));
    assert_eq!(t.trend, Trend::Excellent);

    let empty = period_totals(store.document(), "2030-01");
    assert!(empty.income.is_zero() && empty.remaining.is_zero());
    assert_eq!(empty.trend, Trend::Warning);
}

#[test]
fn trend_thresholds() {
    assert_eq!(Trend::classify(dec("500.01")), Trend::Excellent);
    assert_eq!(Trend::classify(dec("500")), Trend::Good);
    assert_eq!(Trend::classify(dec("0.01")), Trend::Good);
    assert_eq!(Trend::classify(Decimal::ZERO), Trend::Warning);
    assert_eq!(Trend::classify(dec("-20")), Trend::Warning);
}

#[test]
fn next_due_skips_past_dates_in_earlier_periods() {
    let mut store = setup();
    add(&mut store, EntryKind::Expense, "Water", "80", "2024-01-05", Some("Housing"));
    add(&mut store, EntryKind::Expense, "Insurance", "320", "2024-03-10", Some("Health"));
    let doc = store.document();
    // the January bill is earlier in the map but already past
    let ev = next_due(doc, "2024-01", d("2024-02-01")).unwrap();
    assert_eq!(ev.date, d("2024-03-10"));
    assert_eq!(ev.name, "Insurance");
    assert_eq!(ev.kind, EntryKind::Expense);
    assert_eq!(ev.period, "2024-03");
}

#[test]
fn next_due_reaches_far_future_periods_and_card_dues() {
    let mut store = setup();
    add(&mut store, EntryKind::Income, "Salary", "3000", "2024-02-02", None);
    add(&mut store, EntryKind::CardDue, "Amex", "900", "2026-11-01", None);
    let ev = next_due(store.document(), "2024-02", d("2024-02-01")).unwrap();
    assert_eq!(ev.name, "Amex");
    assert_eq!(ev.kind, EntryKind::CardDue);
    assert!(next_due(store.document(), "2024-02", d("2026-11-02")).is_none());
}

#[test]
fn due_today_counts_and_ties_keep_insertion_order() {
    let mut store = setup();
    add(&mut store, EntryKind::Expense, "Phone", "60", "2024-04-10", Some("Other"));
    add(&mut store, EntryKind::Expense, "Internet", "100", "2024-04-10", Some("Other"));
    add(&mut store, EntryKind::CardDue, "Visa", "400", "2024-04-10", None);
    let events = upcoming_dues(store.document(), "2024-04", d("2024-04-10"));
    let names: Vec<&str> = events.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["Phone", "Internet", "Visa"]);
}

#[test]
fn lookahead_ignores_periods_before_the_current_one() {
    let mut store = setup();
    add(&mut store, EntryKind::Expense, "Late fee", "15", "2024-06-30", Some("Other"));
    add(&mut store, EntryKind::Expense, "Rent", "1500", "2024-08-01", Some("Housing"));
    // a June entry dated after "today" is still outside the scanned range
    let ev = next_due(store.document(), "2024-07", d("2024-06-01")).unwrap();
    assert_eq!(ev.name, "Rent");
}

#[test]
fn category_breakdown_sorted_with_shares() {
    let mut store = setup();
    add(&mut store, EntryKind::Expense, "Groceries", "300", "2024-05-03", Some("Food"));
    add(&mut store, EntryKind::Expense, "Rent", "1200", "2024-05-05", Some("Housing"));
    add(&mut store, EntryKind::Expense, "Dinner", "100", "2024-05-09", Some("Food"));
    add(&mut store, EntryKind::Expense, "Bus", "400", "2024-05-11", Some("Transport"));
    add(&mut store, EntryKind::Expense, "Cinema", "50", "2024-06-11", Some("Leisure"));

    let shares = category_breakdown(store.document(), "2024-05");
    let cats: Vec<&str> = shares.iter().map(|s| s.category.as_str()).collect();
    assert_eq!(cats, ["Housing", "Food", "Transport"]);
    assert_eq!(shares[0].amount, dec("1200"));
    assert_eq!(shares[0].percent, dec("60"));
    assert_eq!(shares[1].amount, dec("400"));
    assert_eq!(shares[1].percent, dec("20"));
    assert!(category_breakdown(store.document(), "2024-07").is_empty());
}

#[test]
fn category_share_is_zero_when_total_is_zero() {
    let mut storage = MemoryStorage::new();
    let raw = r#"{"periods": {"2024-05": {
        "expenses": [{"id": "7d3c9a52-8a43-4c8e-b0a6-50a1d3c3c9f1", "name": "Voucher", "amount": "0",
                      "date": "2024-05-02", "category": "Food", "createdAt": "2024-05-02T08:00:00Z"}],
        "createdAt": "2024-05-01T00:00:00Z"}},
        "types": ["Food"], "goals": [], "notes": [],
        "meta": {"firstUse": "2024-05-01T00:00:00Z"}}"#;
    storage.set(DOCUMENT_KEY, raw).unwrap();
    let store = LedgerStore::load(storage).unwrap();
    let shares = category_breakdown(store.document(), "2024-05");
    assert_eq!(shares.len(), 1);
    assert!(shares[0].amount.is_zero());
    assert!(shares[0].percent.is_zero());
}

#[test]
fn totals_saturate_instead_of_overflowing() {
    let mut store = setup();
    let max = Decimal::MAX.to_string();
    add(&mut store, EntryKind::Income, "Jackpot", &max, "2024-05-01", None);
    add(&mut store, EntryKind::Income, "Jackpot", &max, "2024-05-02", None);
    add(&mut store, EntryKind::Expense, "Yacht", &max, "2024-05-03", Some("Leisure"));
    add(&mut store, EntryKind::Expense, "Island", &max, "2024-05-04", Some("Leisure"));
    add(&mut store, EntryKind::CardDue, "Visa", &max, "2024-05-05", None);

    let t = period_totals(store.document(), "2024-05");
    assert_eq!(t.income, Decimal::MAX);
    assert_eq!(t.expenses, Decimal::MAX);
    assert_eq!(t.remaining, Decimal::MIN);
    assert_eq!(t.trend, Trend::Warning);

    let shares = category_breakdown(store.document(), "2024-05");
    assert_eq!(shares[0].amount, Decimal::MAX);
    assert_eq!(shares[0].percent, dec("100"));
    let history = monthly_history(store.document());
    assert_eq!(history[0].outflow, Decimal::MAX);
    assert!(history[0].balance.is_zero());
}

#[test]
fn history_covers_latest_six_periods() {
    let mut store = setup();
    for m in 1..=8 {
        let date = format!("2024-{:02}-01", m);
        add(&mut store, EntryKind::Income, "Salary", "1000", &date, None);
        add(&mut store, EntryKind::Expense, "Rent", "700", &date, Some("Housing"));
        add(&mut store, EntryKind::CardDue, "Visa", &format!("{}", m * 100), &date, None);
    }
    let history = monthly_history(store.document());
    assert_eq!(history.len(), HISTORY_MONTHS);
    assert_eq!(history[0].period, "2024-03");
    assert_eq!(history[5].period, "2024-08");
    assert_eq!(history[0].balance, dec("0"));
    assert_eq!(history[5].balance, dec("-500"));
    assert_eq!(history[5].outflow, dec("1500"));
}

#[test]
fn visible_periods_include_current_even_when_empty() {
    let mut store = setup();
    add(&mut store, EntryKind::Income, "Salary", "1000", "2024-01-05", None);
    store.ensure_period("2024-02");
    let periods = visible_periods(store.document(), "2024-03");
    assert_eq!(periods, ["2024-01", "2024-03"]);
    let periods = visible_periods(store.document(), "2024-02");
    assert_eq!(periods, ["2024-01", "2024-02"]);
}

#[test]
fn dashboard_combines_totals_and_lookahead() {
    let mut store = setup();
    add(&mut store, EntryKind::Income, "Salary", "800", "2024-09-01", None);
    add(&mut store, EntryKind::Expense, "Market", "500", "2024-09-20", Some("Food"));
    let view = dashboard(store.document(), "2024-09", d("2024-09-10"));
    assert_eq!(view.totals.remaining, dec("300"));
    assert_eq!(view.totals.trend, Trend::Good);
    assert_eq!(view.next_due.unwrap().name, "Market");
}
