//! # Events
//!
//! Typed payloads for every notification the contract publishes. Topics are
//! `(symbol, receipt_id)` for per-receipt events and a bare symbol for
//! campaign-level ones:
//!
//! | Topic       | Payload               | Emitted by       |
//! |-------------|-----------------------|------------------|
//! | `minted`    | [`ReceiptMinted`]     | `mint`           |
//! | `withdrawn` | [`FundsWithdrawn`]    | `withdraw`       |
//! | `cancelled` | [`CampaignCancelled`] | `cancel`         |
//! | `refunded`  | [`ReceiptRefunded`]   | `refund`         |
//! | `xfer`      | [`ReceiptTransferred`]| receipt registry |
//!
//! The off-chain indexer (`backend/indexer`) decodes these by leading topic
//! symbol, so topic strings are part of the external interface.

use soroban_sdk::{contracttype, Address};

/// A contribution was accepted and a receipt issued.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReceiptMinted {
    pub receipt_id: u64,
    pub contributor: Address,
    pub amount: i128,
}

/// The deployer drained the escrow after a successful campaign.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FundsWithdrawn {
    pub deployer: Address,
    pub amount: i128,
}

/// The deployer closed a failed campaign; refunds are now open.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignCancelled {
    pub deployer: Address,
    pub raised_total: i128,
}

/// A receipt holder reclaimed their contribution.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReceiptRefunded {
    pub receipt_id: u64,
    pub owner: Address,
    pub amount: i128,
}

/// A receipt changed hands.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReceiptTransferred {
    pub receipt_id: u64,
    pub from: Address,
    pub to: Address,
}
