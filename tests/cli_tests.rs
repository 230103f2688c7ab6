// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use monthbook::cli::build_cli;
use monthbook::commands::entries::query_rows;
use monthbook::db::MemoryStorage;
use monthbook::dispatch;
use monthbook::models::{Document, EntryKind};
use monthbook::onboarding::Onboarding;
use monthbook::recurrence::{submit, EntryDraft};
use monthbook::store::LedgerStore;
use monthbook::utils::short_id;
use tempfile::tempdir;

fn setup() -> LedgerStore<MemoryStorage> {
    LedgerStore::load(MemoryStorage::new()).unwrap()
}

fn run(store: &mut LedgerStore<MemoryStorage>, args: &[&str]) {
    let matches = build_cli().get_matches_from(std::iter::once("monthbook").chain(args.iter().copied()));
    dispatch(store, &matches).unwrap();
}

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[test]
fn cli_definition_is_consistent() {
    build_cli().debug_assert();
}

#[test]
fn expense_add_with_repeat_clamps_month_ends() {
    let mut store = setup();
    run(
        &mut store,
        &[
            "expense", "add", "--name", "Rent", "--amount", "1200,00", "--date", "2024-01-31",
            "--repeat", "2", "--category", "Housing",
        ],
    );
    let doc = store.document();
    let dates: Vec<(String, NaiveDate)> = doc
        .entries_of(EntryKind::Expense)
        .map(|(p, e)| (p.clone(), e.date))
        .collect();
    assert_eq!(
        dates,
        [
            ("2024-01".to_string(), d("2024-01-31")),
            ("2024-02".to_string(), d("2024-02-29")),
            ("2024-03".to_string(), d("2024-03-31")),
        ]
    );
    assert!(doc.entries_of(EntryKind::Expense).all(|(_, e)| e.recurring));
    assert_eq!(store.storage().writes(), 1);
}

#[test]
fn invalid_input_records_nothing() {
    let mut store = setup();
    run(&mut store, &["expense", "add", "--name", "Gym", "--amount", "0", "--category", "Health"]);
    run(&mut store, &["expense", "add", "--name", "Gym", "--amount", "50"]);
    run(
        &mut store,
        &["income", "add", "--name", "Salary", "--amount", "100", "--date", "2024-13-01"],
    );
    assert!(store.document().periods.is_empty());
    assert_eq!(store.storage().writes(), 0);
}

#[test]
fn card_due_and_income_defaults() {
    let mut store = setup();
    run(&mut store, &["income", "add", "--name", "Salary", "--amount", "3000", "--date", "2024-05-05"]);
    run(&mut store, &["card", "add", "--name", "Visa", "--amount", "450", "--due", "2024-05-20"]);
    let bucket = &store.document().periods["2024-05"];
    assert_eq!(bucket.incomes[0].category.as_deref(), Some("Income"));
    assert_eq!(bucket.incomes[0].tags, ["confirmed"]);
    assert_eq!(bucket.card_dues[0].category, None);
    assert_eq!(bucket.card_dues[0].tags, ["pending"]);
}

#[test]
fn rm_by_id_prefix() {
    let mut store = setup();
    run(&mut store, &["card", "add", "--name", "Visa", "--amount", "450", "--date", "2024-05-20"]);
    let id = store.document().periods["2024-05"].card_dues[0].id;
    run(&mut store, &["card", "rm", "--id", &short_id(&id), "--yes"]);
    assert!(store.document().periods["2024-05"].card_dues.is_empty());
}

#[test]
fn category_add_via_cli() {
    let mut store = setup();
    run(&mut store, &["type", "add", "--name", " Pets "]);
    run(&mut store, &["type", "add", "--name", "Food"]);
    let types = &store.document().types;
    assert_eq!(types.last().map(String::as_str), Some("Pets"));
    assert_eq!(types.iter().filter(|t| *t == "Food").count(), 1);
    run(&mut store, &["expense", "add", "--name", "Vet", "--amount", "90", "--date", "2024-06-02", "--category", "Pets"]);
    assert_eq!(store.document().periods["2024-06"].expenses.len(), 1);
}

#[test]
fn export_then_import_round_trips_the_ledger() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("backup.json");
    let out_str = out.to_str().unwrap();

    let mut source = setup();
    run(&mut source, &["income", "add", "--name", "Salary", "--amount", "3000", "--date", "2024-05-05"]);
    run(&mut source, &["goal", "add", "--description", "Trip", "--target", "2000"]);
    run(&mut source, &["export", "--format", "json", "--out", out_str]);

    let exported: Document = serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(&exported, source.document());

    let mut target = setup();
    run(&mut target, &["import", "--path", out_str, "--yes"]);
    assert_eq!(target.document().periods, source.document().periods);
    assert_eq!(target.document().goals, source.document().goals);
    assert_eq!(target.storage().writes(), 1);
}

#[test]
fn import_of_foreign_json_changes_nothing() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("other.json");
    std::fs::write(&path, r#"{"accounts": []}"#).unwrap();
    let mut store = setup();
    run(&mut store, &["import", "--path", path.to_str().unwrap(), "--yes"]);
    assert_eq!(store.storage().writes(), 0);
    assert_eq!(store.document().types.len(), 7);
}

#[test]
fn csv_export_lists_every_entry() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("ledger.csv");
    let mut store = setup();
    run(&mut store, &["income", "add", "--name", "Salary", "--amount", "3000", "--date", "2024-05-05"]);
    run(
        &mut store,
        &["expense", "add", "--name", "Rent", "--amount", "1200", "--date", "2024-05-10", "--category", "Housing", "--repeat", "1"],
    );
    run(&mut store, &["export", "--format", "csv", "--out", out.to_str().unwrap()]);

    let mut rdr = csv::Reader::from_path(&out).unwrap();
    let headers = rdr.headers().unwrap().clone();
    assert_eq!(&headers[1], "kind");
    let rows: Vec<csv::StringRecord> = rdr.records().map(Result::unwrap).collect();
    assert_eq!(rows.len(), 3);
    assert_eq!(&rows[0][0], "2024-05");
    assert_eq!(&rows[0][1], "income");
    assert_eq!(&rows[2][0], "2024-06");
    assert_eq!(&rows[2][5], "Housing");
    assert_eq!(&rows[2][7], "true");
}

#[test]
fn onboarding_advances_with_milestones() {
    let mut store = setup();
    run(&mut store, &["onboarding", "start"]);
    assert_eq!(Onboarding::load(store.storage()).unwrap().step, 1);

    // out of order milestones are ignored
    run(&mut store, &["goal", "add", "--description", "Trip", "--target", "500"]);
    assert_eq!(Onboarding::load(store.storage()).unwrap().step, 1);

    run(&mut store, &["income", "add", "--name", "Salary", "--amount", "3000", "--date", "2024-05-05"]);
    assert_eq!(Onboarding::load(store.storage()).unwrap().step, 2);
    run(&mut store, &["expense", "add", "--name", "Rent", "--amount", "900", "--date", "2024-05-06", "--category", "Housing"]);
    assert_eq!(Onboarding::load(store.storage()).unwrap().step, 3);
    run(&mut store, &["goal", "add", "--description", "Car", "--target", "9000"]);
    let ob = Onboarding::load(store.storage()).unwrap();
    assert!(ob.completed);
}

#[test]
fn onboarding_skip_and_reset() {
    let mut store = setup();
    run(&mut store, &["onboarding", "skip"]);
    assert!(Onboarding::load(store.storage()).unwrap().completed);

    run(&mut store, &["goal", "add", "--description", "Trip", "--target", "500"]);
    run(&mut store, &["reset", "--yes"]);
    assert!(store.document().goals.is_empty());
    let ob = Onboarding::load(store.storage()).unwrap();
    assert!(!ob.completed);
    assert_eq!(ob.step, 0);
}

#[test]
fn notes_via_cli_are_saved_on_exit() {
    let mut store = setup();
    run(&mut store, &["note", "new", "--text", "check the bill"]);
    let id = store.document().notes[0].id;
    run(&mut store, &["note", "edit", "--id", &short_id(&id), "--text", "paid"]);
    run(&mut store, &["note", "done", "--id", &short_id(&id)]);
    assert!(!store.has_pending_write());
    let reloaded = LedgerStore::load(store.storage().clone()).unwrap();
    let note = reloaded.document().note(id).unwrap();
    assert_eq!(note.text, "paid");
    assert!(note.done);
}

#[test]
fn entry_rows_flag_overdue_dues_only() {
    let mut store = setup();
    for (kind, name, date) in [
        (EntryKind::Expense, "Old bill", "2000-01-10"),
        (EntryKind::Expense, "Later bill", "2000-01-25"),
        (EntryKind::Income, "Old pay", "2000-01-05"),
    ] {
        let draft = EntryDraft {
            name: name.into(),
            amount: "10".into(),
            date: date.into(),
            category: Some("Other".into()),
            repeat: 0,
        };
        submit(&mut store, kind, &draft).unwrap();
    }
    let rows = query_rows(&store, EntryKind::Expense, "2000-01");
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.overdue));
    assert_eq!(rows[0].name, "Old bill");
    let incomes = query_rows(&store, EntryKind::Income, "2000-01");
    assert!(!incomes[0].overdue);
    assert_eq!(incomes[0].category, "Other");
    assert!(query_rows(&store, EntryKind::Expense, "2000-02").is_empty());
}

#[test]
fn repeat_flag_is_bounded() {
    let base = ["monthbook", "income", "add", "--name", "Salary", "--amount", "10", "--repeat"];
    let too_many = build_cli().try_get_matches_from(base.iter().copied().chain(["121"]));
    assert!(too_many.is_err());
    let huge = build_cli().try_get_matches_from(base.iter().copied().chain(["4000000000"]));
    assert!(huge.is_err());

    let mut store = setup();
    run(
        &mut store,
        &["income", "add", "--name", "Salary", "--amount", "10", "--date", "2024-01-05", "--repeat", "120"],
    );
    assert_eq!(store.document().periods.len(), 121);
}
