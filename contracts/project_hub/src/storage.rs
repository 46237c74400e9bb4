//! # Storage
//!
//! Provides typed helpers over Soroban's two storage tiers used by ProjectHub:
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key              | Type      | Description                          |
//! |------------------|-----------|--------------------------------------|
//! | `Admin`          | `Address` | The administrator set at `init`      |
//! | `NativeAsset`    | `Address` | SAC address the native sentinel maps to |
//! | `ProjectCount`   | `u64`     | Auto-increment project ID counter    |
//! | `AllowanceCount` | `u64`     | Auto-increment allowance ID counter  |
//!
//! Instance TTL is bumped by **7 days** whenever it falls below 1 day remaining.
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key                        | Type            | Description                     |
//! |----------------------------|-----------------|---------------------------------|
//! | `ProjConfig(id)`           | `ProjectConfig` | Immutable project configuration |
//! | `ProjState(id)`            | `ProjectState`  | Mutable project state           |
//! | `Allowance(id)`            | `Allowance`     | Allowance record                |
//! | `AllowanceId(proj, inv)`   | `u64`           | (project, investor) → allowance id |
//!
//! Persistent TTL is bumped by **30 days** whenever it falls below 7 days remaining.
//!
//! ## Why split Config and State?
//!
//! Contributions are the high-frequency write. Writing the full `Project`
//! struct (name string included) on every contribution is wasteful;
//! `ProjectState` is a handful of integers, so separating it keeps the hot
//! path cheap while the public API stays clean via the reconstructed
//! [`Project`] return type.
//!
//! Records are append-only: projects and allowances are never deleted, so
//! historical fill and claim state stays auditable indefinitely.

use soroban_sdk::{contracttype, panic_with_error, Address, Env};

use crate::types::{Allowance, Project, ProjectConfig, ProjectState};
use crate::Error;

// ── TTL Constants ────────────────────────────────────────────────────

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

/// Instance storage: bump by 7 days when below 1 day remaining.
const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

/// Persistent storage: bump by 30 days when below 7 days remaining.
const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

// ── Storage Keys ─────────────────────────────────────────────────────

/// All contract storage keys.
///
/// Instance-tier keys live as long as the contract and are extended
/// together. Persistent-tier keys hold per-project and per-allowance data
/// with independent TTLs.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Administrator address (Instance).
    Admin,
    /// Stellar Asset Contract the native-currency sentinel resolves to (Instance).
    NativeAsset,
    /// Global auto-increment counter for project IDs (Instance).
    ProjectCount,
    /// Global auto-increment counter for allowance IDs (Instance).
    AllowanceCount,
    /// Immutable project configuration keyed by ID (Persistent).
    ProjConfig(u64),
    /// Mutable project state keyed by ID (Persistent).
    ProjState(u64),
    /// Allowance record keyed by ID (Persistent).
    Allowance(u64),
    /// Uniqueness index: (project ID, investor) → allowance ID (Persistent).
    AllowanceId(u64, Address),
}

// ── Instance Storage Helpers ─────────────────────────────────────────

/// Extend instance storage TTL if it falls below the threshold.
fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn has_admin(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Admin)
}

pub fn set_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&DataKey::Admin, admin);
    bump_instance(env);
}

/// Retrieve the administrator address.
/// Panics if `init` has not been called.
pub fn get_admin(env: &Env) -> Address {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Admin)
        .expect("admin not set")
}

pub fn set_native_asset(env: &Env, asset: &Address) {
    env.storage().instance().set(&DataKey::NativeAsset, asset);
    bump_instance(env);
}

/// Retrieve the SAC address the native-currency sentinel maps to.
/// Panics if `init` has not been called.
pub fn get_native_asset(env: &Env) -> Address {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::NativeAsset)
        .expect("native asset not set")
}

/// Atomically reads, increments, and stores the project counter.
/// Returns the ID to use for the *current* project (pre-increment value).
pub fn get_and_increment_project_id(env: &Env) -> u64 {
    bump_instance(env);
    let current: u64 = env
        .storage()
        .instance()
        .get(&DataKey::ProjectCount)
        .unwrap_or(0);
    env.storage()
        .instance()
        .set(&DataKey::ProjectCount, &(current + 1));
    current
}

/// Atomically reads, increments, and stores the allowance counter.
///
/// Allowance IDs start at 1; ID 0 is the "absent" sentinel used by
/// [`crate::allowance::lookup`].
pub fn get_and_increment_allowance_id(env: &Env) -> u64 {
    bump_instance(env);
    let current: u64 = env
        .storage()
        .instance()
        .get(&DataKey::AllowanceCount)
        .unwrap_or(1);
    env.storage()
        .instance()
        .set(&DataKey::AllowanceCount, &(current + 1));
    current
}

// ── Persistent Storage Helpers ───────────────────────────────────────

/// Extend the TTL for a persistent storage key.
fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

/// Save both the immutable config and initial mutable state for a new project.
pub fn save_project(env: &Env, project: &Project) {
    let config_key = DataKey::ProjConfig(project.id);
    let state_key = DataKey::ProjState(project.id);

    let config = ProjectConfig {
        id: project.id,
        name: project.name.clone(),
        payment_asset: project.payment_asset.clone(),
        payout_asset: project.payout_asset.clone(),
    };

    let state = ProjectState {
        funding_target: project.funding_target,
        payout_pool_total: project.payout_pool_total,
        raised_total: project.raised_total,
        status: project.status.clone(),
        funds_withdrawn: project.funds_withdrawn,
    };

    env.storage().persistent().set(&config_key, &config);
    env.storage().persistent().set(&state_key, &state);
    bump_persistent(env, &config_key);
    bump_persistent(env, &state_key);
}

/// Load the full `Project` by combining config and state.
/// Panics with `ProjectNotFound` if the project does not exist.
pub fn load_project(env: &Env, id: u64) -> Project {
    let config = load_project_config(env, id);
    let state = load_project_state(env, id);
    Project {
        id: config.id,
        name: config.name,
        payment_asset: config.payment_asset,
        funding_target: state.funding_target,
        payout_asset: config.payout_asset,
        payout_pool_total: state.payout_pool_total,
        raised_total: state.raised_total,
        status: state.status,
        funds_withdrawn: state.funds_withdrawn,
    }
}

/// Load only the immutable project configuration.
pub fn load_project_config(env: &Env, id: u64) -> ProjectConfig {
    let key = DataKey::ProjConfig(id);
    let config: ProjectConfig = env
        .storage()
        .persistent()
        .get(&key)
        .unwrap_or_else(|| panic_with_error!(env, Error::ProjectNotFound));
    bump_persistent(env, &key);
    config
}

/// Load only the mutable project state.
pub fn load_project_state(env: &Env, id: u64) -> ProjectState {
    let key = DataKey::ProjState(id);
    let state: ProjectState = env
        .storage()
        .persistent()
        .get(&key)
        .unwrap_or_else(|| panic_with_error!(env, Error::ProjectNotFound));
    bump_persistent(env, &key);
    state
}

/// Save only the mutable project state (optimized for contributions and
/// lifecycle transitions).
pub fn save_project_state(env: &Env, id: u64, state: &ProjectState) {
    let key = DataKey::ProjState(id);
    env.storage().persistent().set(&key, state);
    bump_persistent(env, &key);
}

/// Save an allowance record and its (project, investor) uniqueness index.
pub fn save_allowance(env: &Env, allowance: &Allowance) {
    let key = DataKey::Allowance(allowance.id);
    let index_key = DataKey::AllowanceId(allowance.project_id, allowance.investor.clone());
    env.storage().persistent().set(&key, allowance);
    env.storage().persistent().set(&index_key, &allowance.id);
    bump_persistent(env, &key);
    bump_persistent(env, &index_key);
}

/// Load an allowance by ID.
/// Panics with `NoAllowance` if the record does not exist.
pub fn load_allowance(env: &Env, id: u64) -> Allowance {
    let key = DataKey::Allowance(id);
    let allowance: Allowance = env
        .storage()
        .persistent()
        .get(&key)
        .unwrap_or_else(|| panic_with_error!(env, Error::NoAllowance));
    bump_persistent(env, &key);
    allowance
}

/// Look up the allowance ID for a (project, investor) pair, if one exists.
pub fn allowance_id_for(env: &Env, project_id: u64, investor: &Address) -> Option<u64> {
    let key = DataKey::AllowanceId(project_id, investor.clone());
    let id = env.storage().persistent().get(&key);
    if id.is_some() {
        bump_persistent(env, &key);
    }
    id
}
