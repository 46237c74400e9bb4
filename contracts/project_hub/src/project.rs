//! Project registry and lifecycle.
//!
//! A project advances monotonically from Active to exactly one of the three
//! terminal states. Filled is reached automatically when the raised total
//! hits the target; EndedPrematurely and Cancelled are explicit admin
//! actions and only EndedPrematurely rescales the payout pool.

use soroban_sdk::{panic_with_error, Address, Env, String};

use crate::storage;
use crate::types::{Project, ProjectStatus};
use crate::Error;

/// Open a new Active project and return its ID.
pub fn create(
    env: &Env,
    name: String,
    payment_asset: Option<Address>,
    funding_target: i128,
    payout_asset: Address,
    payout_pool_total: i128,
) -> u64 {
    if funding_target <= 0 || payout_pool_total < 0 {
        panic_with_error!(env, Error::InvalidAmount);
    }

    let id = storage::get_and_increment_project_id(env);
    let project = Project {
        id,
        name,
        payment_asset,
        funding_target,
        payout_asset,
        payout_pool_total,
        raised_total: 0,
        status: ProjectStatus::Active,
        funds_withdrawn: false,
    };
    storage::save_project(env, &project);
    id
}

/// Close an Active project early.
///
/// The target is frozen at whatever was actually raised and the payout pool
/// is scaled down by the same ratio, rounding toward the escrow:
/// `new_pool = pool * raised / old_target` (floor). Contributors forfeit the
/// sub-unit remainder rather than the pool overpaying.
pub fn end_prematurely(env: &Env, project_id: u64) {
    let mut state = storage::load_project_state(env, project_id);
    if state.status != ProjectStatus::Active {
        panic_with_error!(env, Error::NotActive);
    }

    // funding_target > 0 is guaranteed at creation and only ever replaced
    // here, after this division.
    let new_pool = state
        .payout_pool_total
        .checked_mul(state.raised_total)
        .unwrap_or_else(|| panic_with_error!(env, Error::AmountOverflow))
        / state.funding_target;

    state.funding_target = state.raised_total;
    state.payout_pool_total = new_pool;
    state.status = ProjectStatus::EndedPrematurely;
    storage::save_project_state(env, project_id, &state);
}

/// Cancel an Active project. No rescaling: contributors are made whole via
/// refund, not payout.
pub fn cancel(env: &Env, project_id: u64) {
    let mut state = storage::load_project_state(env, project_id);
    if state.status != ProjectStatus::Active {
        panic_with_error!(env, Error::NotActive);
    }

    state.status = ProjectStatus::Cancelled;
    storage::save_project_state(env, project_id, &state);
}

/// Apply an accepted contribution to the project's raised total.
///
/// Rejects anything that would overshoot the target; hitting it exactly
/// transitions the project to Filled.
pub fn apply_contribution(env: &Env, project_id: u64, amount: i128) {
    let mut state = storage::load_project_state(env, project_id);
    if state.status != ProjectStatus::Active {
        panic_with_error!(env, Error::NotActive);
    }

    let new_raised = state
        .raised_total
        .checked_add(amount)
        .unwrap_or_else(|| panic_with_error!(env, Error::AmountOverflow));
    if new_raised > state.funding_target {
        panic_with_error!(env, Error::FundingGoalExceeded);
    }

    state.raised_total = new_raised;
    if new_raised == state.funding_target {
        state.status = ProjectStatus::Filled;
    }
    storage::save_project_state(env, project_id, &state);
}
