//! # ProjectHub Contract
//!
//! This is the root crate of the **ProjectHub** capital-raising escrow. It
//! exposes the single Soroban contract `ProjectHub` whose entry points cover
//! the full project lifecycle:
//!
//! | Phase        | Entry Point(s)                                        |
//! |--------------|-------------------------------------------------------|
//! | Bootstrap    | [`ProjectHub::init`]                                  |
//! | Setup        | [`ProjectHub::create_project`], [`ProjectHub::create_allowance`] |
//! | Funding      | [`ProjectHub::invest`]                                |
//! | Close        | [`ProjectHub::end_prematurely`], [`ProjectHub::cancel_project`] |
//! | Settlement   | [`ProjectHub::withdraw_investments`], [`ProjectHub::get_reward`], [`ProjectHub::get_refund`] |
//! | Queries      | `get_project`, `get_allowance`, `get_balance`         |
//!
//! ## Architecture
//!
//! Authorization is fully delegated to [`auth`]. Storage access is fully
//! delegated to [`storage`]. Business logic lives in [`allowance`],
//! [`project`], [`invest`] and [`settlement`]; this file contains **only**
//! the public entry points — each one authorizes, delegates, and emits.
//!
//! The host executes each invocation serially and rolls back every storage
//! write and token transfer when an invocation panics, so each entry point
//! is an atomic transaction against the records it touches.

#![no_std]

use soroban_sdk::{contract, contracterror, contractimpl, token, Address, Env, String};

mod allowance;
mod auth;
mod events;
mod invest;
mod project;
mod settlement;
mod storage;
mod types;

#[cfg(test)]
mod invariants;
#[cfg(test)]
mod test_events;
#[cfg(test)]
mod test_settlement;

pub use types::{Allowance, Project, ProjectStatus};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized      = 1,
    ProjectNotFound         = 2,
    InvalidAmount           = 3,
    DuplicateAllowance      = 4,
    NoAllowance             = 5,
    AllowanceExceeded       = 6,
    FundingGoalExceeded     = 7,
    NotActive               = 8,
    ProjectNotReady         = 9,
    InsufficientPayoutFunds = 10,
    AlreadyClaimed          = 11,
    ProjectNotCancelled     = 12,
    MismatchedPayment       = 13,
    AlreadyWithdrawn        = 14,
    AmountOverflow          = 15,
}

#[contract]
pub struct ProjectHub;

#[contractimpl]
impl ProjectHub {
    // ─────────────────────────────────────────────────────────
    // Bootstrap
    // ─────────────────────────────────────────────────────────

    /// Initialise the contract: fix the administrator and the Stellar Asset
    /// Contract address that the native-currency sentinel resolves to.
    ///
    /// Must be called exactly once immediately after deployment.
    /// Subsequent calls panic with `Error::AlreadyInitialized`.
    pub fn init(env: Env, admin: Address, native_asset: Address) {
        admin.require_auth();
        auth::init(&env, &admin, &native_asset);
    }

    // ─────────────────────────────────────────────────────────
    // Setup (admin-only)
    // ─────────────────────────────────────────────────────────

    /// Open a new project raising `funding_target` of `payment_asset`
    /// (`None` = native currency) against a fixed pro-rata pool of
    /// `payout_pool_total` units of `payout_asset`.
    ///
    /// Returns the new project's ID.
    pub fn create_project(
        env: Env,
        name: String,
        payment_asset: Option<Address>,
        funding_target: i128,
        payout_asset: Address,
        payout_pool_total: i128,
    ) -> u64 {
        auth::require_admin(&env);
        let id = project::create(
            &env,
            name,
            payment_asset,
            funding_target,
            payout_asset,
            payout_pool_total,
        );
        events::project_created(&env, id, funding_target, payout_pool_total);
        id
    }

    /// Grant `investor` a contribution ceiling of `max_amount` on a project.
    ///
    /// At most one allowance per (project, investor) pair; the ceiling is
    /// immutable once granted. Returns the new allowance's ID.
    pub fn create_allowance(env: Env, project_id: u64, investor: Address, max_amount: i128) -> u64 {
        auth::require_admin(&env);
        let id = allowance::grant(&env, project_id, &investor, max_amount);
        events::allowance_granted(&env, project_id, &investor, max_amount);
        id
    }

    // ─────────────────────────────────────────────────────────
    // Funding
    // ─────────────────────────────────────────────────────────

    /// Contribute to a project, within the caller's allowance and the
    /// project's remaining capacity.
    ///
    /// For native-currency projects the amount rides in `attached_native`
    /// and `declared_amount` should be zero; for token projects it is the
    /// other way around. A contribution that lands exactly on the funding
    /// target transitions the project to Filled.
    pub fn invest(
        env: Env,
        project_id: u64,
        investor: Address,
        declared_amount: i128,
        attached_native: i128,
    ) {
        invest::invest(&env, project_id, &investor, declared_amount, attached_native);
    }

    // ─────────────────────────────────────────────────────────
    // Close (admin-only)
    // ─────────────────────────────────────────────────────────

    /// Close an Active project early, freezing the target at the raised
    /// total and scaling the payout pool down by the same ratio.
    pub fn end_prematurely(env: Env, project_id: u64) {
        auth::require_admin(&env);
        project::end_prematurely(&env, project_id);
        let state = storage::load_project_state(&env, project_id);
        events::project_ended(&env, project_id, state.funding_target, state.payout_pool_total);
    }

    /// Cancel an Active project. Contributors become eligible for refunds.
    pub fn cancel_project(env: Env, project_id: u64) {
        auth::require_admin(&env);
        project::cancel(&env, project_id);
        events::project_cancelled(&env, project_id);
    }

    // ─────────────────────────────────────────────────────────
    // Settlement
    // ─────────────────────────────────────────────────────────

    /// Withdraw the raised capital to the admin. Requires the payout pool
    /// to be fully funded in escrow; callable once per project.
    pub fn withdraw_investments(env: Env, project_id: u64) {
        let admin = auth::require_admin(&env);
        settlement::withdraw(&env, project_id, &admin);
    }

    /// Collect the caller's pro-rata share of the payout pool.
    pub fn get_reward(env: Env, project_id: u64, investor: Address) {
        settlement::claim_reward(&env, project_id, &investor);
    }

    /// Reclaim the caller's contribution after cancellation.
    pub fn get_refund(env: Env, project_id: u64, investor: Address) {
        settlement::refund(&env, project_id, &investor);
    }

    // ─────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────

    /// Retrieve a project by its ID.
    pub fn get_project(env: Env, project_id: u64) -> Project {
        storage::load_project(&env, project_id)
    }

    /// Retrieve the allowance for `(investor, project_id)`.
    ///
    /// Absent pairs yield a zero record (id 0, ceiling 0) rather than an
    /// error.
    pub fn get_allowance(env: Env, investor: Address, project_id: u64) -> Allowance {
        allowance::lookup(&env, project_id, &investor)
    }

    /// Balance of `holder` in `asset` (`None` = native currency), read
    /// through the token contract.
    pub fn get_balance(env: Env, holder: Address, asset: Option<Address>) -> i128 {
        let asset = asset.unwrap_or_else(|| storage::get_native_asset(&env));
        token::Client::new(&env, &asset).balance(&holder)
    }
}
