//! Investment processor.
//!
//! Validates a contribution against the investor's allowance and the
//! project's remaining capacity, pulls the funds into escrow, and updates
//! both registries. The whole operation runs inside a single invocation:
//! if any step panics, the host rolls back the storage writes *and* the
//! token transfer, so no partial state is ever observable.

use soroban_sdk::{panic_with_error, token, Address, Env};

use crate::types::{ProjectConfig, ProjectStatus};
use crate::{allowance, events, project, storage, Error};

/// Contribute to a project.
///
/// The contribution amount is carried in one of two mutually exclusive
/// channels, mirroring a payable call:
///
/// - native project (`payment_asset` is `None`): the amount is
///   `attached_native`; a nonzero `declared_amount` that disagrees is
///   rejected as `MismatchedPayment`.
/// - token project: the amount is `declared_amount`; any nonzero
///   `attached_native` is rejected as `MismatchedPayment`.
pub fn invest(
    env: &Env,
    project_id: u64,
    investor: &Address,
    declared_amount: i128,
    attached_native: i128,
) {
    investor.require_auth();

    let config = storage::load_project_config(env, project_id);
    let state = storage::load_project_state(env, project_id);

    let allowance_id = storage::allowance_id_for(env, project_id, investor)
        .unwrap_or_else(|| panic_with_error!(env, Error::NoAllowance));

    let amount = resolve_amount(env, &config, declared_amount, attached_native);

    // Closed projects must never touch the token contract.
    if state.status != ProjectStatus::Active {
        panic_with_error!(env, Error::NotActive);
    }

    // Pull the funds into escrow. A panic in either registry update below
    // unwinds this transfer along with everything else.
    let asset = payment_asset_of(env, &config);
    token::Client::new(env, &asset).transfer(investor, &env.current_contract_address(), &amount);

    allowance::record_fill(env, allowance_id, amount);
    project::apply_contribution(env, project_id, amount);

    events::investment_accepted(env, project_id, investor, amount);
}

/// Resolve the actual contribution amount from the two payment channels.
fn resolve_amount(
    env: &Env,
    config: &ProjectConfig,
    declared_amount: i128,
    attached_native: i128,
) -> i128 {
    let amount = match config.payment_asset {
        None => {
            if declared_amount != 0 && declared_amount != attached_native {
                panic_with_error!(env, Error::MismatchedPayment);
            }
            attached_native
        }
        Some(_) => {
            if attached_native != 0 {
                panic_with_error!(env, Error::MismatchedPayment);
            }
            declared_amount
        }
    };

    if amount <= 0 {
        panic_with_error!(env, Error::InvalidAmount);
    }
    amount
}

/// The concrete asset a project is paid in, with the native sentinel
/// resolved to the SAC address stored at `init`.
pub fn payment_asset_of(env: &Env, config: &ProjectConfig) -> Address {
    config
        .payment_asset
        .clone()
        .unwrap_or_else(|| storage::get_native_asset(env))
}
