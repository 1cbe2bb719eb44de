//! Canonical event types emitted by the crowdfunder contract.
//!
//! These mirror the Soroban contract events defined in
//! `contracts/crowdfunder/src/events.rs`; the leading topic symbol identifies
//! the kind.

use serde::{Deserialize, Serialize};

/// All recognised event kinds from the crowdfunder contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A contribution was accepted and a receipt issued (`minted` topic).
    ReceiptMinted,
    /// The deployer withdrew the escrow after success (`withdrawn` topic).
    FundsWithdrawn,
    /// The deployer cancelled a failed campaign (`cancelled` topic).
    CampaignCancelled,
    /// A receipt holder reclaimed their unit (`refunded` topic).
    ReceiptRefunded,
    /// A receipt changed hands (`xfer` topic).
    ReceiptTransferred,
    /// An event from this contract that we don't recognise yet.
    Unknown,
}

impl EventKind {
    /// Parse the leading topic symbol string produced by Soroban into an [`EventKind`].
    pub fn from_topic(topic: &str) -> Self {
        match topic {
            "minted" => Self::ReceiptMinted,
            "withdrawn" => Self::FundsWithdrawn,
            "cancelled" => Self::CampaignCancelled,
            "refunded" => Self::ReceiptRefunded,
            "xfer" => Self::ReceiptTransferred,
            _ => Self::Unknown,
        }
    }

    /// Return a short identifier string suitable for storage in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ReceiptMinted => "receipt_minted",
            Self::FundsWithdrawn => "funds_withdrawn",
            Self::CampaignCancelled => "campaign_cancelled",
            Self::ReceiptRefunded => "receipt_refunded",
            Self::ReceiptTransferred => "receipt_transferred",
            Self::Unknown => "unknown",
        }
    }
}

/// A fully decoded crowdfunder event, ready to be stored in the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignEvent {
    /// RPC-assigned event identifier, unique per on-chain event. Used as
    /// the idempotence key when inserting into the database.
    pub event_id: String,
    pub event_type: String,
    /// Receipt id for per-receipt events; `None` for campaign-level ones.
    pub receipt_id: Option<String>,
    pub actor: Option<String>,
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
    pub event_id: String,
    pub event_type: String,
    pub receipt_id: Option<String>,
    pub actor: Option<String>,
    pub amount: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
    pub created_at: i64,
}
