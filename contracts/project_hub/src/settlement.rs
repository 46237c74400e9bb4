//! Settlement engine.
//!
//! Once a project leaves Active, these are the only legal paths for fund
//! movement: the admin withdraws the raised capital, contributors claim
//! their pro-rata payout (Filled / EndedPrematurely), or contributors take
//! a refund (Cancelled). Claim and refund share the per-allowance claimed
//! flag — a project can only ever reach one of the two settlement sides.

use soroban_sdk::{panic_with_error, token, Address, Env};

use crate::types::ProjectStatus;
use crate::{allowance, events, invest, storage, Error};

/// Withdraw the raised capital to the admin.
///
/// The payout pool must be fully funded in escrow before any capital is
/// released; this protects contributors' later claims. Single-shot: a
/// second call fails with `AlreadyWithdrawn`.
pub fn withdraw(env: &Env, project_id: u64, admin: &Address) {
    let config = storage::load_project_config(env, project_id);
    let mut state = storage::load_project_state(env, project_id);

    match state.status {
        ProjectStatus::Filled | ProjectStatus::EndedPrematurely => {}
        _ => panic_with_error!(env, Error::ProjectNotReady),
    }
    if state.funds_withdrawn {
        panic_with_error!(env, Error::AlreadyWithdrawn);
    }

    let escrow = env.current_contract_address();
    let payout_balance = token::Client::new(env, &config.payout_asset).balance(&escrow);
    if payout_balance < state.payout_pool_total {
        panic_with_error!(env, Error::InsufficientPayoutFunds);
    }

    state.funds_withdrawn = true;
    storage::save_project_state(env, project_id, &state);

    let asset = invest::payment_asset_of(env, &config);
    token::Client::new(env, &asset).transfer(&escrow, admin, &state.raised_total);

    events::investments_withdrawn(env, project_id, state.raised_total);
}

/// Claim the caller's pro-rata share of the payout pool.
///
/// `share = payout_pool_total * amount_filled / funding_target`, rounding
/// down. An underfunded pool surfaces `InsufficientPayoutFunds` before the
/// allowance is marked, so the claim stays retryable once the pool lands.
pub fn claim_reward(env: &Env, project_id: u64, investor: &Address) {
    investor.require_auth();

    let config = storage::load_project_config(env, project_id);
    let state = storage::load_project_state(env, project_id);

    match state.status {
        ProjectStatus::Filled | ProjectStatus::EndedPrematurely => {}
        _ => panic_with_error!(env, Error::ProjectNotReady),
    }

    let allowance_id = storage::allowance_id_for(env, project_id, investor)
        .unwrap_or_else(|| panic_with_error!(env, Error::NoAllowance));
    let record = storage::load_allowance(env, allowance_id);
    if record.reward_claimed {
        panic_with_error!(env, Error::AlreadyClaimed);
    }

    let share = pro_rata_share(
        env,
        state.payout_pool_total,
        record.amount_filled,
        state.funding_target,
    );

    let escrow = env.current_contract_address();
    let payout_client = token::Client::new(env, &config.payout_asset);
    if payout_client.balance(&escrow) < share {
        panic_with_error!(env, Error::InsufficientPayoutFunds);
    }

    allowance::mark_claimed(env, allowance_id);
    payout_client.transfer(&escrow, investor, &share);

    events::reward_collected(env, project_id, investor, share);
}

/// Refund the caller's contribution after cancellation.
///
/// Returns exactly `amount_filled` of the payment asset. Double refund is
/// blocked by the same claimed flag as rewards.
pub fn refund(env: &Env, project_id: u64, investor: &Address) {
    investor.require_auth();

    let config = storage::load_project_config(env, project_id);
    let state = storage::load_project_state(env, project_id);

    if state.status != ProjectStatus::Cancelled {
        panic_with_error!(env, Error::ProjectNotCancelled);
    }

    let allowance_id = storage::allowance_id_for(env, project_id, investor)
        .unwrap_or_else(|| panic_with_error!(env, Error::NoAllowance));

    let amount = allowance::mark_claimed(env, allowance_id);

    let asset = invest::payment_asset_of(env, &config);
    token::Client::new(env, &asset).transfer(&env.current_contract_address(), investor, &amount);

    events::user_refunded(env, project_id, investor, amount);
}

/// Floor division pro-rata share. A zero target (a project ended early with
/// nothing raised) yields a zero share rather than dividing by zero.
fn pro_rata_share(env: &Env, pool: i128, filled: i128, target: i128) -> i128 {
    if target == 0 {
        return 0;
    }
    pool.checked_mul(filled)
        .unwrap_or_else(|| panic_with_error!(env, Error::AmountOverflow))
        / target
}
