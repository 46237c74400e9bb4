//! Allowance registry.
//!
//! Contribution rights are not public: each investor must be granted a
//! per-project ceiling before they may send funds. Records are keyed by an
//! auto-incremented ID with a (project, investor) uniqueness index, and are
//! never deleted.

use soroban_sdk::{panic_with_error, Address, Env};

use crate::storage;
use crate::types::{Allowance, ProjectStatus};
use crate::Error;

/// Grant a contribution ceiling to `investor` on `project_id`.
///
/// The project must exist and still be Active. A (project, investor) pair
/// can hold at most one allowance, ever — ceilings are immutable once
/// granted.
pub fn grant(env: &Env, project_id: u64, investor: &Address, max_amount: i128) -> u64 {
    if max_amount <= 0 {
        panic_with_error!(env, Error::InvalidAmount);
    }

    let state = storage::load_project_state(env, project_id);
    if state.status != ProjectStatus::Active {
        panic_with_error!(env, Error::NotActive);
    }

    if storage::allowance_id_for(env, project_id, investor).is_some() {
        panic_with_error!(env, Error::DuplicateAllowance);
    }

    let id = storage::get_and_increment_allowance_id(env);
    let allowance = Allowance {
        id,
        project_id,
        investor: investor.clone(),
        max_amount,
        amount_filled: 0,
        reward_claimed: false,
    };
    storage::save_allowance(env, &allowance);
    id
}

/// Look up the allowance for a (project, investor) pair.
///
/// An absent pair yields a zero record (id 0, ceiling 0) rather than a
/// panic, so read-only callers can distinguish "never granted" from a
/// granted-but-unfilled allowance by the ceiling.
pub fn lookup(env: &Env, project_id: u64, investor: &Address) -> Allowance {
    match storage::allowance_id_for(env, project_id, investor) {
        Some(id) => storage::load_allowance(env, id),
        None => Allowance {
            id: 0,
            project_id,
            investor: investor.clone(),
            max_amount: 0,
            amount_filled: 0,
            reward_claimed: false,
        },
    }
}

/// Record a fill against an allowance.
///
/// Rejects the contribution when it would push `amount_filled` past the
/// ceiling. Returns the updated record.
pub fn record_fill(env: &Env, allowance_id: u64, amount: i128) -> Allowance {
    let mut allowance = storage::load_allowance(env, allowance_id);

    let new_filled = allowance
        .amount_filled
        .checked_add(amount)
        .unwrap_or_else(|| panic_with_error!(env, Error::AmountOverflow));
    if new_filled > allowance.max_amount {
        panic_with_error!(env, Error::AllowanceExceeded);
    }

    allowance.amount_filled = new_filled;
    storage::save_allowance(env, &allowance);
    allowance
}

/// Mark an allowance as claimed (reward or refund — the paths are mutually
/// exclusive per project, so they share the flag).
///
/// Returns the filled amount the settlement math needs. Fails if the flag
/// is already set; it is never reset.
pub fn mark_claimed(env: &Env, allowance_id: u64) -> i128 {
    let mut allowance = storage::load_allowance(env, allowance_id);

    if allowance.reward_claimed {
        panic_with_error!(env, Error::AlreadyClaimed);
    }

    allowance.reward_claimed = true;
    storage::save_allowance(env, &allowance);
    allowance.amount_filled
}
