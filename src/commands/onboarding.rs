// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::Storage;
use crate::onboarding::Onboarding;
use crate::store::LedgerStore;
use anyhow::Result;

const STEPS: [&str; 3] = [
    "add your main monthly income (`monthbook income add`)",
    "record your largest fixed expense (`monthbook expense add`)",
    "set a savings goal (`monthbook goal add`)",
];

pub fn handle<S: Storage>(store: &mut LedgerStore<S>, m: &clap::ArgMatches) -> Result<()> {
    let mut ob = Onboarding::load(store.storage())?;
    match m.subcommand() {
        Some(("status", _)) => {}
        Some(("start", _)) => {
            ob.start();
            ob.save(store.storage_mut())?;
        }
        Some(("skip", _)) => {
            ob.complete();
            ob.save(store.storage_mut())?;
        }
        _ => {}
    }
    if ob.completed {
        println!("Onboarding complete");
    } else if ob.step == 0 {
        println!("Onboarding not started (`monthbook onboarding start`)");
    } else {
        let hint = STEPS.get(usize::from(ob.step) - 1).copied().unwrap_or_default();
        println!("Step {} of {}: {}", ob.step, STEPS.len(), hint);
    }
    Ok(())
}
