//! # Storage
//!
//! Typed helpers over Soroban's two storage tiers used by the crowdfunder:
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key      | Type             | Description                        |
//! |----------|------------------|------------------------------------|
//! | `Config` | `CampaignConfig` | Immutable campaign configuration   |
//! | `State`  | `CampaignState`  | Mutable campaign state             |
//!
//! Instance TTL is bumped by **7 days** whenever it falls below 1 day remaining.
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key             | Type   | Description                            |
//! |-----------------|--------|----------------------------------------|
//! | `Refunded(id)`  | `bool` | Set once when receipt `id` is refunded |
//!
//! Persistent TTL is bumped by **30 days** whenever it falls below 7 days
//! remaining.
//!
//! Receipt ownership and the id counter live in [`crate::receipt`] (key enum
//! `ReceiptKey` inside receipt.rs); the `Refunded` flags are ledger
//! accounting and are managed here.
//!
//! ## Why split Config and State?
//!
//! Every operation writes the mutable state. Writing the full campaign record
//! (name, symbol, addresses, ~200 bytes) on every mint is wasteful;
//! `CampaignState` is ~20 bytes. The public API still returns the combined
//! [`Campaign`] view.

use soroban_sdk::{contracttype, Env};

use crate::types::{Campaign, CampaignConfig, CampaignState};

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

/// Contract storage keys for campaign data.
///
/// Instance-tier keys (`Config`, `State`) live as long as the contract and are
/// extended together. The persistent-tier `Refunded` entries hold per-receipt
/// refund flags with independent TTLs.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Immutable campaign configuration (Instance).
    Config,
    /// Mutable campaign state (Instance).
    State,
    /// Refund flag for a receipt, present only once refunded (Persistent).
    Refunded(u64),
}

// ── Instance Storage Helpers ─────────────────────────────────────────

/// Extend instance storage TTL if it falls below the threshold.
fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

/// True once `init` has written the campaign configuration.
pub fn has_config(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

/// Write the immutable configuration and the initial mutable state.
pub fn save_campaign(env: &Env, config: &CampaignConfig, state: &CampaignState) {
    env.storage().instance().set(&DataKey::Config, config);
    env.storage().instance().set(&DataKey::State, state);
    bump_instance(env);
}

/// Load the immutable campaign configuration.
/// Panics if the contract has not been initialized.
pub fn load_config(env: &Env) -> CampaignConfig {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .expect("campaign not initialized")
}

/// Load the mutable campaign state.
pub fn load_state(env: &Env) -> CampaignState {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::State)
        .expect("campaign not initialized")
}

/// Save only the mutable campaign state.
pub fn save_state(env: &Env, state: &CampaignState) {
    env.storage().instance().set(&DataKey::State, state);
    bump_instance(env);
}

/// Load the full `Campaign` view by combining config, state, and the
/// registry's issue counter.
pub fn load_campaign(env: &Env) -> Campaign {
    let config = load_config(env);
    let state = load_state(env);
    Campaign {
        name: config.name,
        symbol: config.symbol,
        deployer: config.deployer,
        token: config.token,
        unit_price: config.unit_price,
        funding_objective: config.funding_objective,
        deadline: config.deadline,
        raised_total: state.raised_total,
        cancelled: state.cancelled,
        withdrawn: state.withdrawn,
        receipt_count: crate::receipt::count(env),
    }
}

// ── Persistent Storage Helpers ───────────────────────────────────────

/// Extend the TTL for a persistent storage key.
fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

/// True if a refund has already been paid out against `receipt_id`.
pub fn is_refunded(env: &Env, receipt_id: u64) -> bool {
    let key = DataKey::Refunded(receipt_id);
    if env.storage().persistent().has(&key) {
        bump_persistent(env, &key);
        true
    } else {
        false
    }
}

/// Permanently mark `receipt_id` as refunded. The entry is only ever written
/// with `true` and never removed, so the flag cannot flip back.
pub fn mark_refunded(env: &Env, receipt_id: u64) {
    let key = DataKey::Refunded(receipt_id);
    env.storage().persistent().set(&key, &true);
    bump_persistent(env, &key);
}
