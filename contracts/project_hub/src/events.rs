//! Contract events.
//!
//! Every state-changing entry point publishes an event so off-chain
//! consumers (see `backend/indexer`) can track escrow activity and
//! settlement without polling contract state. Topics follow the
//! `(symbol_short!(...), project_id)` convention; the data payload is a
//! typed struct.

use soroban_sdk::{contracttype, symbol_short, Address, Env};

/// A new project was opened (`created` topic).
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectCreated {
    pub project_id: u64,
    pub funding_target: i128,
    pub payout_pool_total: i128,
}

/// An investor was granted a contribution ceiling (`allowed` topic).
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AllowanceGranted {
    pub project_id: u64,
    pub investor: Address,
    pub max_amount: i128,
}

/// A contribution was validated and recorded (`invested` topic).
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InvestmentAccepted {
    pub project_id: u64,
    pub investor: Address,
    pub amount: i128,
}

/// A project was closed early; target and pool were rescaled (`ended` topic).
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectEnded {
    pub project_id: u64,
    pub funding_target: i128,
    pub payout_pool_total: i128,
}

/// A project was cancelled (`cancelled` topic).
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectCancelled {
    pub project_id: u64,
}

/// The admin withdrew the raised capital (`withdrawn` topic).
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InvestmentsWithdrawn {
    pub project_id: u64,
    pub amount: i128,
}

/// An investor collected their pro-rata payout (`reward` topic).
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardCollected {
    pub project_id: u64,
    pub investor: Address,
    pub amount: i128,
}

/// A contributor was refunded after cancellation (`refunded` topic).
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UserRefunded {
    pub project_id: u64,
    pub investor: Address,
    pub amount: i128,
}

pub fn project_created(env: &Env, project_id: u64, funding_target: i128, payout_pool_total: i128) {
    env.events().publish(
        (symbol_short!("created"), project_id),
        ProjectCreated {
            project_id,
            funding_target,
            payout_pool_total,
        },
    );
}

pub fn allowance_granted(env: &Env, project_id: u64, investor: &Address, max_amount: i128) {
    env.events().publish(
        (symbol_short!("allowed"), project_id),
        AllowanceGranted {
            project_id,
            investor: investor.clone(),
            max_amount,
        },
    );
}

pub fn investment_accepted(env: &Env, project_id: u64, investor: &Address, amount: i128) {
    env.events().publish(
        (symbol_short!("invested"), project_id),
        InvestmentAccepted {
            project_id,
            investor: investor.clone(),
            amount,
        },
    );
}

pub fn project_ended(env: &Env, project_id: u64, funding_target: i128, payout_pool_total: i128) {
    env.events().publish(
        (symbol_short!("ended"), project_id),
        ProjectEnded {
            project_id,
            funding_target,
            payout_pool_total,
        },
    );
}

pub fn project_cancelled(env: &Env, project_id: u64) {
    env.events().publish(
        (symbol_short!("cancelled"), project_id),
        ProjectCancelled { project_id },
    );
}

pub fn investments_withdrawn(env: &Env, project_id: u64, amount: i128) {
    env.events().publish(
        (symbol_short!("withdrawn"), project_id),
        InvestmentsWithdrawn { project_id, amount },
    );
}

pub fn reward_collected(env: &Env, project_id: u64, investor: &Address, amount: i128) {
    env.events().publish(
        (symbol_short!("reward"), project_id),
        RewardCollected {
            project_id,
            investor: investor.clone(),
            amount,
        },
    );
}

pub fn user_refunded(env: &Env, project_id: u64, investor: &Address, amount: i128) {
    env.events().publish(
        (symbol_short!("refunded"), project_id),
        UserRefunded {
            project_id,
            investor: investor.clone(),
            amount,
        },
    );
}
