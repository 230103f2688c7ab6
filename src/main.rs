// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use monthbook::{cli, db, dispatch, logging, store::LedgerStore};

fn main() -> Result<()> {
    logging::init_logging();
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let storage = db::open_or_init()?;
    let mut store = LedgerStore::load(storage)?;

    match matches.subcommand() {
        Some(("init", _)) => {
            if store.persist() {
                println!("Ledger initialized at {}", db::db_path()?.display());
            } else {
                println!("Could not write the ledger, see the log for details");
            }
        }
        Some(_) => dispatch(&mut store, &matches)?,
        None => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
