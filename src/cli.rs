// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::recurrence::MAX_REPEAT;
use clap::{value_parser, Arg, ArgAction, Command};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn yes_flag() -> Arg {
    Arg::new("yes")
        .long("yes")
        .short('y')
        .action(ArgAction::SetTrue)
        .help("Answer yes to confirmation prompts")
}

fn period_arg() -> Arg {
    Arg::new("period")
        .long("period")
        .help("Period as YYYY-MM (default: this month)")
}

fn id_arg() -> Arg {
    Arg::new("id")
        .long("id")
        .required(true)
        .help("Id or unique id prefix")
}

fn entry_command(name: &'static str, about: &'static str, with_category: bool) -> Command {
    let mut add = Command::new("add")
        .about("Record a new entry")
        .arg(Arg::new("name").long("name").required(true))
        .arg(Arg::new("amount").long("amount").required(true))
        .arg(
            Arg::new("date")
                .long("date")
                .visible_alias("due")
                .help("Date as YYYY-MM-DD (default: today)"),
        )
        .arg(
            Arg::new("repeat")
                .long("repeat")
                .value_parser(value_parser!(u32).range(0..=i64::from(MAX_REPEAT)))
                .default_value("0")
                .help("Extra monthly copies to create after this one"),
        );
    if with_category {
        add = add.arg(Arg::new("category").long("category").help("Category name"));
    }
    Command::new(name)
        .about(about)
        .subcommand_required(true)
        .subcommand(add)
        .subcommand(json_flags(
            Command::new("list").about("List entries in a period").arg(period_arg()),
        ))
        .subcommand(
            Command::new("rm")
                .about("Delete an entry")
                .arg(id_arg())
                .arg(period_arg())
                .arg(yes_flag()),
        )
}

pub fn build_cli() -> Command {
    Command::new("monthbook")
        .about("Monthly personal finance ledger")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand(Command::new("init").about("Create the data file"))
        .subcommand(entry_command("income", "Incomes", true))
        .subcommand(entry_command("expense", "Expenses", true))
        .subcommand(entry_command("card", "Credit card dues", false))
        .subcommand(
            Command::new("type")
                .about("Expense categories")
                .subcommand_required(true)
                .subcommand(
                    Command::new("add").arg(Arg::new("name").long("name").required(true)),
                )
                .subcommand(Command::new("list")),
        )
        .subcommand(
            Command::new("goal")
                .about("Savings goals")
                .subcommand_required(true)
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("description").long("description").required(true))
                        .arg(Arg::new("target").long("target").required(true)),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(
                    Command::new("deposit")
                        .arg(id_arg())
                        .arg(Arg::new("amount").long("amount").required(true)),
                )
                .subcommand(
                    Command::new("withdraw")
                        .arg(id_arg())
                        .arg(Arg::new("amount").long("amount").required(true)),
                )
                .subcommand(Command::new("rm").arg(id_arg()).arg(yes_flag())),
        )
        .subcommand(
            Command::new("note")
                .about("Notes")
                .subcommand_required(true)
                .subcommand(
                    Command::new("new").arg(Arg::new("text").long("text").help("Initial text")),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(
                    Command::new("edit")
                        .arg(id_arg())
                        .arg(Arg::new("text").long("text").required(true)),
                )
                .subcommand(
                    Command::new("done").arg(id_arg()).arg(
                        Arg::new("undo")
                            .long("undo")
                            .action(ArgAction::SetTrue)
                            .help("Mark as not done"),
                    ),
                )
                .subcommand(Command::new("rm").arg(id_arg()).arg(yes_flag())),
        )
        .subcommand(Command::new("periods").about("Periods with entries"))
        .subcommand(json_flags(
            Command::new("dashboard")
                .about("Totals and the next due date")
                .arg(period_arg())
                .arg(
                    Arg::new("today")
                        .long("today")
                        .help("Evaluate as of this date, YYYY-MM-DD"),
                ),
        ))
        .subcommand(
            Command::new("report")
                .about("Reports")
                .subcommand_required(true)
                .subcommand(json_flags(
                    Command::new("categories")
                        .about("Expenses by category")
                        .arg(period_arg()),
                ))
                .subcommand(json_flags(
                    Command::new("history").about("Balance of the latest months"),
                )),
        )
        .subcommand(
            Command::new("export")
                .about("Write the ledger to a file")
                .arg(
                    Arg::new("format")
                        .long("format")
                        .value_parser(["json", "csv"])
                        .default_value("json"),
                )
                .arg(Arg::new("out").long("out").help("Output path")),
        )
        .subcommand(
            Command::new("import")
                .about("Replace ledger sections from a JSON export")
                .arg(Arg::new("path").long("path").required(true))
                .arg(yes_flag()),
        )
        .subcommand(
            Command::new("reset")
                .about("Erase all data")
                .arg(yes_flag()),
        )
        .subcommand(
            Command::new("onboarding")
                .about("First-run walkthrough state")
                .subcommand_required(true)
                .subcommand(Command::new("status"))
                .subcommand(Command::new("start"))
                .subcommand(Command::new("skip")),
        )
        .subcommand(Command::new("shell").about("Interactive note editing session"))
}
