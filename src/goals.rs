// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Savings goals. `accumulated` only moves through [`deposit`] and
//! [`withdraw`], and always stays within `0..=target`.

use crate::db::Storage;
use crate::error::ValidationError;
use crate::models::Goal;
use crate::store::{Confirm, LedgerStore};
use crate::utils::parse_amount;
use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

pub fn create_goal<S: Storage>(
    store: &mut LedgerStore<S>,
    description: &str,
    target: &str,
) -> Result<Uuid, ValidationError> {
    let description = description.trim();
    if description.is_empty() {
        warn!("goal rejected: empty description");
        return Err(ValidationError::MissingDescription);
    }
    let target = parse_amount(target).inspect_err(|e| warn!(error = %e, "goal rejected"))?;
    let goal = Goal {
        id: Uuid::new_v4(),
        description: description.to_string(),
        target,
        accumulated: Decimal::ZERO,
        created_at: Utc::now(),
        updated_at: None,
    };
    let id = goal.id;
    store.document_mut().goals.push(goal);
    info!(%id, %target, "goal created");
    store.persist();
    Ok(id)
}

/// Adds `amount`, capped at the target. Returns the new balance, or `None`
/// when the amount is invalid or the goal does not exist.
pub fn deposit<S: Storage>(store: &mut LedgerStore<S>, id: Uuid, amount: &str) -> Option<Decimal> {
    apply(store, id, amount, |g, amt| {
        g.accumulated
            .checked_add(amt)
            .map_or(g.target, |sum| sum.min(g.target))
    })
}

/// Takes out `amount`, floored at zero.
pub fn withdraw<S: Storage>(store: &mut LedgerStore<S>, id: Uuid, amount: &str) -> Option<Decimal> {
    apply(store, id, amount, |g, amt| {
        g.accumulated
            .checked_sub(amt)
            .map_or(Decimal::ZERO, |rest| rest.max(Decimal::ZERO))
    })
}

fn apply<S, F>(store: &mut LedgerStore<S>, id: Uuid, amount: &str, next: F) -> Option<Decimal>
where
    S: Storage,
    F: FnOnce(&Goal, Decimal) -> Decimal,
{
    let amt = match parse_amount(amount) {
        Ok(a) => a,
        Err(e) => {
            warn!(%id, error = %e, "goal movement ignored");
            return None;
        }
    };
    let goal = store.document_mut().goal_mut(id)?;
    goal.accumulated = next(goal, amt);
    goal.updated_at = Some(Utc::now());
    let balance = goal.accumulated;
    info!(%id, %balance, "goal updated");
    store.persist();
    Some(balance)
}

/// Removes the goal after confirmation. There is no undo.
pub fn delete_goal<S: Storage>(
    store: &mut LedgerStore<S>,
    id: Uuid,
    confirm: &mut dyn Confirm,
) -> bool {
    let Some(desc) = store
        .document()
        .goals
        .iter()
        .find(|g| g.id == id)
        .map(|g| g.description.clone())
    else {
        return false;
    };
    if !confirm.confirm(&format!("Delete the goal \"{}\"?", desc)) {
        return false;
    }
    store.document_mut().goals.retain(|g| g.id != id);
    info!(%id, "goal deleted");
    store.persist();
    true
}
