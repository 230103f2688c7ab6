// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::selected_period;
use crate::aggregate::{category_breakdown, dashboard, monthly_history, visible_periods};
use crate::db::Storage;
use crate::store::LedgerStore;
use crate::utils::{fmt_money, maybe_print_json, parse_date, period_of, pretty_table, today};
use anyhow::Result;

pub fn handle<S: Storage>(store: &LedgerStore<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("categories", sub)) => categories(store, sub)?,
        Some(("history", sub)) => history(store, sub)?,
        _ => {}
    }
    Ok(())
}

pub fn periods<S: Storage>(store: &LedgerStore<S>) -> Result<()> {
    let current = period_of(today());
    let data = visible_periods(store.document(), &current)
        .into_iter()
        .map(|p| {
            let marker = if p == current { "*".to_string() } else { String::new() };
            vec![p, marker]
        })
        .collect();
    println!("{}", pretty_table(&["Period", "Current"], data));
    Ok(())
}

pub fn show_dashboard<S: Storage>(store: &LedgerStore<S>, sub: &clap::ArgMatches) -> Result<()> {
    let as_of = match sub.get_one::<String>("today") {
        Some(d) => parse_date(d)?,
        None => today(),
    };
    let period = match sub.get_one::<String>("period") {
        Some(_) => selected_period(sub)?,
        None => period_of(as_of),
    };
    let view = dashboard(store.document(), &period, as_of);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &view)? {
        return Ok(());
    }
    let t = &view.totals;
    let rows = vec![
        vec!["Balance".into(), fmt_money(&t.balance)],
        vec!["Expenses".into(), fmt_money(&t.expenses)],
        vec!["Card dues".into(), fmt_money(&t.card_dues)],
        vec!["Remaining".into(), fmt_money(&t.remaining)],
        vec!["Trend".into(), t.trend.label().into()],
        vec![
            "Next due".into(),
            match &view.next_due {
                Some(ev) => format!("{} {} ({}, {})", ev.date, ev.name, ev.kind, fmt_money(&ev.amount)),
                None => "nothing pending".into(),
            },
        ],
    ];
    println!("{}", period);
    println!("{}", pretty_table(&["", "Value"], rows));
    Ok(())
}

fn categories<S: Storage>(store: &LedgerStore<S>, sub: &clap::ArgMatches) -> Result<()> {
    let period = selected_period(sub)?;
    let shares = category_breakdown(store.document(), &period);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &shares)? {
        return Ok(());
    }
    if shares.is_empty() {
        println!("No expenses in {}", period);
        return Ok(());
    }
    let rows = shares
        .iter()
        .map(|s| {
            vec![
                s.category.clone(),
                fmt_money(&s.amount),
                format!("{}%", s.percent.round_dp(0)),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Category", "Spent", "Share"], rows));
    Ok(())
}

fn history<S: Storage>(store: &LedgerStore<S>, sub: &clap::ArgMatches) -> Result<()> {
    let months = monthly_history(store.document());
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &months)? {
        return Ok(());
    }
    let rows = months
        .iter()
        .map(|m| {
            vec![
                m.period.clone(),
                fmt_money(&m.income),
                fmt_money(&m.outflow),
                fmt_money(&m.balance),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Month", "Income", "Outflow", "Balance"], rows)
    );
    Ok(())
}
