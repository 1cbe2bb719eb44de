//! # Types
//!
//! Shared data structures for the crowdfunder contract.
//!
//! ## Design decisions
//!
//! ### Config / State split
//!
//! The campaign is internally stored as two separate ledger entries:
//!
//! - [`CampaignConfig`] — written once at initialization; never mutated.
//! - [`CampaignState`] — written on every mint, withdraw, cancel, and refund.
//!
//! The public API exposes the reconstructed [`Campaign`] struct for convenience.
//!
//! ### Derived lifecycle, not a stored one
//!
//! There is deliberately no status enum. The campaign's phase is a pure
//! function of the ledger timestamp and the two one-way flags:
//!
//! ```text
//! active:     now <  deadline
//! successful: now >= deadline && raised_total >= funding_objective && !cancelled
//! failed:     now >= deadline && raised_total <  funding_objective && !cancelled
//! cancelled:  cancelled (reachable only from failed)
//! withdrawn:  withdrawn (reachable only from successful)
//! ```
//!
//! A stored "ended" flag would go stale; the timestamp is re-read on every
//! call instead.

use soroban_sdk::{contracttype, Address, String};

/// Immutable campaign configuration, written once at initialization.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignConfig {
    /// Receipt-asset display name.
    pub name: String,
    /// Receipt-asset symbol.
    pub symbol: String,
    /// Address authorized to withdraw on success and cancel on failure.
    pub deployer: Address,
    /// Token contract the campaign is funded in.
    pub token: Address,
    /// Exact value required per contribution.
    pub unit_price: i128,
    /// Cumulative raised amount required for the campaign to succeed.
    pub funding_objective: i128,
    /// Ledger timestamp after which minting stops and the outcome is decidable.
    pub deadline: u64,
}

/// Mutable campaign state, kept small so the per-operation write is cheap.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignState {
    /// Escrowed balance; always equals the contract's token balance.
    pub raised_total: i128,
    /// One-way flag set by `cancel`; unlocks refunds.
    pub cancelled: bool,
    /// One-way flag set by `withdraw`; makes a second withdraw fail distinctly
    /// instead of being misreported as an objective failure.
    pub withdrawn: bool,
}

/// Full view of the campaign, reconstructed from the split
/// `CampaignConfig` + `CampaignState` storage entries.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Campaign {
    pub name: String,
    pub symbol: String,
    pub deployer: Address,
    pub token: Address,
    pub unit_price: i128,
    pub funding_objective: i128,
    pub deadline: u64,
    pub raised_total: i128,
    pub cancelled: bool,
    pub withdrawn: bool,
    /// Number of receipts issued so far (ids are `0..receipt_count`).
    pub receipt_count: u64,
}
