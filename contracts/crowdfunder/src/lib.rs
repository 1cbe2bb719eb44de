//! # Crowdfunder Contract
//!
//! Fixed-price crowdfunding with numbered receipt tokens. Every contribution
//! of exactly [`UNIT_PRICE`] mints the next receipt id to the contributor;
//! the receipt is the sole proof of contribution and the sole capability
//! needed to claim a refund if the campaign fails.
//!
//! | Phase      | Entry Point(s)                               |
//! |------------|----------------------------------------------|
//! | Bootstrap  | [`Crowdfunder::init`]                        |
//! | Funding    | [`Crowdfunder::mint`]                        |
//! | Outcome    | [`Crowdfunder::withdraw`], [`Crowdfunder::cancel`] |
//! | Refunds    | [`Crowdfunder::refund`]                      |
//! | Receipts   | `owner_of`, `transfer_receipt`, `is_refunded` |
//! | Queries    | `funding_objective`, `deployer`, `is_active`, `raised_total`, `get_campaign` |
//!
//! ## Architecture
//!
//! Ownership bookkeeping is fully delegated to [`receipt`]. Storage access is
//! fully delegated to [`storage`]. This file contains only the entry points,
//! their guards, and event emissions.
//!
//! ## Lifecycle
//!
//! The campaign phase is derived fresh on every call from the ledger
//! timestamp, the escrow balance, and two one-way flags; there is no stored
//! status. Outgoing transfers (withdraw, refund) happen strictly after the
//! authoritative accounting state is committed, so a nested call observes the
//! already-updated state and its guards fail.

#![no_std]

use soroban_sdk::{
    contract, contracterror, contractimpl, panic_with_error, symbol_short, token, Address, Env,
    String,
};

mod events;
mod receipt;
mod storage;
mod types;

#[cfg(test)]
mod test_events;
#[cfg(test)]
mod test_refund;

use events::{CampaignCancelled, FundsWithdrawn, ReceiptMinted, ReceiptRefunded};
use storage::{
    has_config, is_refunded, load_config, load_state, mark_refunded, save_campaign, save_state,
};
pub use types::{Campaign, CampaignConfig, CampaignState};

/// Exact value required per contribution: one whole token at 7 decimals.
pub const UNIT_PRICE: i128 = 10_000_000;

/// Campaign duration; the deadline is fixed at init time plus this.
pub const CAMPAIGN_DURATION_SECS: u64 = 31 * 24 * 60 * 60;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    /// Contribution value is not exactly `UNIT_PRICE`.
    IncorrectValue             = 1,
    /// Mint attempted at or after the deadline.
    CrowdfundEnded             = 2,
    /// Withdraw/cancel attempted by someone other than the deployer.
    SenderIsNotDeployer        = 3,
    /// Withdraw/cancel attempted before the deadline.
    CrowdfundNotEnded          = 4,
    /// Withdraw attempted without the objective met.
    FundingObjectiveNotReached = 5,
    /// Cancel attempted on a campaign that met its objective.
    FundingObjectiveReached    = 6,
    /// Refund attempted before cancellation.
    CrowdfundIsActive          = 7,
    /// Refund/transfer attempted by someone other than the receipt owner.
    SenderIsNotOwner           = 8,
    /// Refund attempted twice against the same receipt.
    AlreadyRefunded            = 9,
    /// Withdraw or cancel attempted after the escrow was already drained.
    AlreadyWithdrawn           = 10,
    /// Cancel attempted twice.
    AlreadyCancelled           = 11,
    /// Withdraw attempted on a cancelled campaign.
    CrowdfundCancelled         = 12,
    /// Init attempted twice.
    AlreadyInitialized         = 13,
    /// Init with a non-positive funding objective.
    InvalidObjective           = 14,
    /// Ownership query for an id that was never issued.
    ReceiptNotFound            = 15,
}

#[contract]
pub struct Crowdfunder;

#[contractimpl]
impl Crowdfunder {
    // ─────────────────────────────────────────────────────────
    // Initialisation
    // ─────────────────────────────────────────────────────────

    /// Initialise the campaign.
    ///
    /// Must be called exactly once immediately after deployment; subsequent
    /// calls fail with `AlreadyInitialized`. All parameters are immutable
    /// afterwards. The deadline is derived, not chosen: init time plus
    /// [`CAMPAIGN_DURATION_SECS`].
    ///
    /// - `name` / `symbol` — receipt-asset display metadata.
    /// - `token` — token contract the campaign is funded in.
    /// - `funding_objective` — cumulative amount required for success; must
    ///   be positive.
    /// - `deployer` — address authorized to withdraw on success and cancel
    ///   on failure.
    pub fn init(
        env: Env,
        name: String,
        symbol: String,
        token: Address,
        funding_objective: i128,
        deployer: Address,
    ) {
        if has_config(&env) {
            panic_with_error!(&env, Error::AlreadyInitialized);
        }
        if funding_objective <= 0 {
            panic_with_error!(&env, Error::InvalidObjective);
        }

        let config = CampaignConfig {
            name,
            symbol,
            deployer,
            token,
            unit_price: UNIT_PRICE,
            funding_objective,
            deadline: env
                .ledger()
                .timestamp()
                .checked_add(CAMPAIGN_DURATION_SECS)
                .expect("deadline overflow"),
        };
        let state = CampaignState {
            raised_total: 0,
            cancelled: false,
            withdrawn: false,
        };
        save_campaign(&env, &config, &state);
    }

    // ─────────────────────────────────────────────────────────
    // Funding
    // ─────────────────────────────────────────────────────────

    /// Contribute exactly [`UNIT_PRICE`] and receive the next receipt.
    ///
    /// `amount` must equal the unit price to the token's smallest unit —
    /// overpayment is rejected, not refunded. Fails with `CrowdfundEnded`
    /// once the deadline has passed.
    ///
    /// Returns the id of the freshly minted receipt; ids are issued as
    /// `0, 1, 2, ...` with no gaps and are never reused.
    pub fn mint(env: Env, contributor: Address, amount: i128) -> u64 {
        contributor.require_auth();

        let config = load_config(&env);
        if env.ledger().timestamp() >= config.deadline {
            panic_with_error!(&env, Error::CrowdfundEnded);
        }
        if amount != config.unit_price {
            panic_with_error!(&env, Error::IncorrectValue);
        }

        // Pull the contribution into escrow.
        let token_client = token::Client::new(&env, &config.token);
        token_client.transfer(&contributor, &env.current_contract_address(), &amount);

        let mut state = load_state(&env);
        state.raised_total += amount;
        save_state(&env, &state);

        let receipt_id = receipt::mint_to(&env, &contributor);

        env.events().publish(
            (symbol_short!("minted"), receipt_id),
            ReceiptMinted {
                receipt_id,
                contributor,
                amount,
            },
        );
        receipt_id
    }

    // ─────────────────────────────────────────────────────────
    // Outcome
    // ─────────────────────────────────────────────────────────

    /// Deployer drains the escrow after a successful campaign.
    ///
    /// Requires the deadline to have passed, the objective to be met, and the
    /// campaign to be neither cancelled nor already withdrawn. A repeat call
    /// fails with `AlreadyWithdrawn` rather than being misreported as an
    /// objective failure against the zeroed balance.
    pub fn withdraw(env: Env, caller: Address) {
        caller.require_auth();

        let config = load_config(&env);
        if caller != config.deployer {
            panic_with_error!(&env, Error::SenderIsNotDeployer);
        }
        if env.ledger().timestamp() < config.deadline {
            panic_with_error!(&env, Error::CrowdfundNotEnded);
        }

        let mut state = load_state(&env);
        if state.withdrawn {
            panic_with_error!(&env, Error::AlreadyWithdrawn);
        }
        if state.cancelled {
            panic_with_error!(&env, Error::CrowdfundCancelled);
        }
        if state.raised_total < config.funding_objective {
            panic_with_error!(&env, Error::FundingObjectiveNotReached);
        }

        // Zero the escrow before the outgoing transfer so a reentrant call
        // hits AlreadyWithdrawn instead of draining twice.
        let amount = state.raised_total;
        state.raised_total = 0;
        state.withdrawn = true;
        save_state(&env, &state);

        let token_client = token::Client::new(&env, &config.token);
        token_client.transfer(&env.current_contract_address(), &config.deployer, &amount);

        env.events().publish(
            (symbol_short!("withdrawn"),),
            FundsWithdrawn {
                deployer: config.deployer,
                amount,
            },
        );
    }

    /// Deployer closes a failed campaign, unlocking refunds.
    ///
    /// Requires the deadline to have passed and the objective to be unmet.
    /// Successful campaigns cannot be cancelled, even post-deadline. Moves no
    /// value; contributors reclaim their units individually via [`Self::refund`].
    pub fn cancel(env: Env, caller: Address) {
        caller.require_auth();

        let config = load_config(&env);
        if caller != config.deployer {
            panic_with_error!(&env, Error::SenderIsNotDeployer);
        }
        if env.ledger().timestamp() < config.deadline {
            panic_with_error!(&env, Error::CrowdfundNotEnded);
        }

        let mut state = load_state(&env);
        if state.cancelled {
            panic_with_error!(&env, Error::AlreadyCancelled);
        }
        // A drained escrow reads as 0 < objective; without this check a
        // withdrawn campaign could be cancelled afterwards.
        if state.withdrawn {
            panic_with_error!(&env, Error::AlreadyWithdrawn);
        }
        if state.raised_total >= config.funding_objective {
            panic_with_error!(&env, Error::FundingObjectiveReached);
        }

        state.cancelled = true;
        save_state(&env, &state);

        env.events().publish(
            (symbol_short!("cancelled"),),
            CampaignCancelled {
                deployer: config.deployer,
                raised_total: state.raised_total,
            },
        );
    }

    // ─────────────────────────────────────────────────────────
    // Refunds
    // ─────────────────────────────────────────────────────────

    /// Reclaim one unit of escrowed value against a receipt.
    ///
    /// Only available once the campaign is cancelled. The caller must
    /// currently own the receipt — the capability follows the token, so a
    /// transferred receipt refunds to its new holder. Each receipt refunds
    /// exactly once; the flag flips before the transfer so a reentrant call
    /// hits `AlreadyRefunded`.
    pub fn refund(env: Env, caller: Address, receipt_id: u64) {
        caller.require_auth();

        let mut state = load_state(&env);
        if !state.cancelled {
            panic_with_error!(&env, Error::CrowdfundIsActive);
        }
        if receipt::owner_of(&env, receipt_id) != caller {
            panic_with_error!(&env, Error::SenderIsNotOwner);
        }
        if is_refunded(&env, receipt_id) {
            panic_with_error!(&env, Error::AlreadyRefunded);
        }

        let config = load_config(&env);
        mark_refunded(&env, receipt_id);
        state.raised_total -= config.unit_price;
        save_state(&env, &state);

        let token_client = token::Client::new(&env, &config.token);
        token_client.transfer(
            &env.current_contract_address(),
            &caller,
            &config.unit_price,
        );

        env.events().publish(
            (symbol_short!("refunded"), receipt_id),
            ReceiptRefunded {
                receipt_id,
                owner: caller,
                amount: config.unit_price,
            },
        );
    }

    // ─────────────────────────────────────────────────────────
    // Receipt registry
    // ─────────────────────────────────────────────────────────

    /// Current owner of a receipt. Fails if the id was never issued.
    pub fn owner_of(env: Env, receipt_id: u64) -> Address {
        receipt::owner_of(&env, receipt_id)
    }

    /// Transfer a receipt (and the refund capability it carries) to `to`.
    pub fn transfer_receipt(env: Env, from: Address, to: Address, receipt_id: u64) {
        from.require_auth();
        receipt::transfer(&env, &from, &to, receipt_id);
    }

    /// True once a refund has been paid out against `receipt_id`.
    pub fn is_refunded(env: Env, receipt_id: u64) -> bool {
        is_refunded(&env, receipt_id)
    }

    /// Number of receipts issued so far.
    pub fn receipt_count(env: Env) -> u64 {
        receipt::count(&env)
    }

    // ─────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────

    /// The immutable funding objective.
    pub fn funding_objective(env: Env) -> i128 {
        load_config(&env).funding_objective
    }

    /// The address authorized to withdraw and cancel.
    pub fn deployer(env: Env) -> Address {
        load_config(&env).deployer
    }

    /// The exact contribution value per mint.
    pub fn unit_price(env: Env) -> i128 {
        load_config(&env).unit_price
    }

    /// Timestamp after which minting stops.
    pub fn deadline(env: Env) -> u64 {
        load_config(&env).deadline
    }

    /// True while contributions are still being accepted.
    ///
    /// Re-evaluated against the ledger timestamp on every call.
    pub fn is_active(env: Env) -> bool {
        let config = load_config(&env);
        let state = load_state(&env);
        env.ledger().timestamp() < config.deadline && !state.cancelled
    }

    /// Current escrowed balance.
    pub fn raised_total(env: Env) -> i128 {
        load_state(&env).raised_total
    }

    /// Receipt-asset display name.
    pub fn name(env: Env) -> String {
        load_config(&env).name
    }

    /// Receipt-asset symbol.
    pub fn symbol(env: Env) -> String {
        load_config(&env).symbol
    }

    /// Full campaign view, reconstructed from the split storage entries.
    pub fn get_campaign(env: Env) -> Campaign {
        storage::load_campaign(&env)
    }
}
