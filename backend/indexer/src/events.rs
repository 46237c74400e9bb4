//! Canonical event types emitted by the ProjectHub escrow contract.
//!
//! These mirror the Soroban contract events defined in
//! `contracts/project_hub/src/events.rs`. Settlement consumers lean on the
//! `cancelled` / `reward` / `refunded` kinds to follow a project's close-out
//! without polling contract state.

use serde::{Deserialize, Serialize};

/// All recognised event kinds from the ProjectHub contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A new project was opened (`created` topic).
    ProjectCreated,
    /// An investor was granted a contribution ceiling (`allowed` topic).
    AllowanceGranted,
    /// A contribution was accepted into escrow (`invested` topic).
    InvestmentAccepted,
    /// A project was closed early and its pool rescaled (`ended` topic).
    ProjectEnded,
    /// A project was cancelled (`cancelled` topic).
    ProjectCancelled,
    /// The admin withdrew the raised capital (`withdrawn` topic).
    InvestmentsWithdrawn,
    /// An investor collected their pro-rata payout (`reward` topic).
    RewardCollected,
    /// A contributor was refunded after cancellation (`refunded` topic).
    UserRefunded,
    /// An event from this contract that we don't recognise yet.
    Unknown,
}

impl EventKind {
    /// Parse the leading topic symbol string produced by Soroban into an [`EventKind`].
    pub fn from_topic(topic: &str) -> Self {
        match topic {
            "created" => Self::ProjectCreated,
            "allowed" => Self::AllowanceGranted,
            "invested" => Self::InvestmentAccepted,
            "ended" => Self::ProjectEnded,
            "cancelled" => Self::ProjectCancelled,
            "withdrawn" => Self::InvestmentsWithdrawn,
            "reward" => Self::RewardCollected,
            "refunded" => Self::UserRefunded,
            _ => Self::Unknown,
        }
    }

    /// Return a short identifier string suitable for storage in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ProjectCreated => "project_created",
            Self::AllowanceGranted => "allowance_granted",
            Self::InvestmentAccepted => "investment_accepted",
            Self::ProjectEnded => "project_ended",
            Self::ProjectCancelled => "project_cancelled",
            Self::InvestmentsWithdrawn => "investments_withdrawn",
            Self::RewardCollected => "reward_collected",
            Self::UserRefunded => "user_refunded",
            Self::Unknown => "unknown",
        }
    }

    /// `true` for the kinds settlement trackers care about.
    pub fn is_settlement(&self) -> bool {
        matches!(
            self,
            Self::ProjectCancelled
                | Self::InvestmentsWithdrawn
                | Self::RewardCollected
                | Self::UserRefunded
        )
    }
}

/// A fully decoded ProjectHub event, ready to be stored in the database.
///
/// `investor` is NULL for admin-side events (`cancelled`, `withdrawn`,
/// `created`, `ended`); `amount` is NULL where the event carries none.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HubEvent {
    pub event_type: String,
    pub project_id: Option<String>,
    pub investor: Option<String>,
    pub amount: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
}

/// A raw event record as stored in / read from the database.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct EventRecord {
    pub id: i64,
    pub event_type: String,
    pub project_id: Option<String>,
    pub investor: Option<String>,
    pub amount: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
    pub created_at: i64,
}
