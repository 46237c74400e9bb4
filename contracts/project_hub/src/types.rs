//! # Types
//!
//! Shared data structures used across all modules of the ProjectHub escrow.
//!
//! ## Design decisions
//!
//! ### Config / State split
//!
//! A `Project` is internally stored as two separate ledger entries:
//!
//! - [`ProjectConfig`] — written once at creation; never mutated.
//! - [`ProjectState`] — written on every accepted contribution and on
//!   lifecycle transitions.
//!
//! The public API exposes the reconstructed [`Project`] struct for convenience.
//!
//! Note that `funding_target` and `payout_pool_total` live in the *state*
//! entry: early termination rescales both exactly once, so neither is truly
//! immutable.
//!
//! ### Status as a Finite-State Machine
//!
//! [`ProjectStatus`] enforces a strict forward-only lifecycle:
//!
//! ```text
//! Active ──► Filled             (automatic, raised_total reaches target)
//! Active ──► EndedPrematurely   (admin action, pool rescaled)
//! Active ──► Cancelled          (admin action, contributors refunded)
//! ```
//!
//! `Filled`, `EndedPrematurely` and `Cancelled` are all terminal; no
//! transition leaves any of them.

use soroban_sdk::{contracttype, Address, String};

/// Lifecycle status of a project.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ProjectStatus {
    /// Accepting contributions from allowance holders.
    Active,
    /// Funding target reached; settlement may begin.
    Filled,
    /// Closed early by the admin; target frozen at the raised amount.
    EndedPrematurely,
    /// Terminated by the admin; contributors are refunded.
    Cancelled,
}

/// Immutable project configuration, written once at creation.
///
/// Stored separately from mutable state to reduce write costs on
/// contributions (the state entry is a fraction of the full struct).
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectConfig {
    pub id: u64,
    pub name: String,
    /// Asset investors contribute. `None` is the native-currency sentinel,
    /// resolved against the native asset address stored at `init`.
    pub payment_asset: Option<Address>,
    /// Asset distributed pro-rata to contributors after a successful close.
    pub payout_asset: Address,
}

/// Mutable project state, updated on contributions and lifecycle changes.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectState {
    /// Capital-raise ceiling. Rescaled exactly once, by early termination.
    pub funding_target: i128,
    /// Units of the payout asset reserved for pro-rata distribution.
    /// Rescaled together with `funding_target` so their ratio is preserved.
    pub payout_pool_total: i128,
    /// Sum of accepted contributions. Never exceeds `funding_target`.
    pub raised_total: i128,
    pub status: ProjectStatus,
    /// Set once the admin has withdrawn the raised capital.
    pub funds_withdrawn: bool,
}

/// Full representation of an escrow project.
///
/// Used as the public API return type; reconstructed internally from
/// the split `ProjectConfig` + `ProjectState` storage entries.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Project {
    /// Unique identifier (auto-incremented from 0).
    pub id: u64,
    /// Display label. Opaque, no uniqueness constraint.
    pub name: String,
    /// Contribution asset; `None` means the native currency.
    pub payment_asset: Option<Address>,
    pub funding_target: i128,
    pub payout_asset: Address,
    pub payout_pool_total: i128,
    pub raised_total: i128,
    pub status: ProjectStatus,
    pub funds_withdrawn: bool,
}

/// Per-(project, investor) contribution ceiling and fill/claim record.
///
/// Allowance ids are auto-incremented from **1**; id 0 is reserved as the
/// "absent" sentinel returned by lookups for pairs that were never granted
/// an allowance. Callers must not conflate that sentinel with a granted
/// allowance, which always has a positive `max_amount`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Allowance {
    pub id: u64,
    pub project_id: u64,
    pub investor: Address,
    /// Contribution ceiling, fixed at grant time.
    pub max_amount: i128,
    /// Cumulative contributed amount. Never exceeds `max_amount`.
    pub amount_filled: i128,
    /// Set once by the first successful reward claim *or* refund; the two
    /// settlement paths are mutually exclusive per project, so one flag
    /// covers both.
    pub reward_claimed: bool,
}
