// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::confirmer;
use crate::db::Storage;
use crate::store::LedgerStore;
use anyhow::Result;

pub fn handle<S: Storage>(store: &mut LedgerStore<S>, sub: &clap::ArgMatches) -> Result<()> {
    let mut confirm = confirmer(sub);
    if store.reset(&mut confirm)? {
        println!("All data erased");
    } else {
        println!("Reset cancelled");
    }
    Ok(())
}
