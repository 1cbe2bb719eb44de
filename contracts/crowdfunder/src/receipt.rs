//! # Receipt Registry
//!
//! Minimal ownership registry for the numbered receipt tokens minted per
//! contribution. The ledger delegates identifier issuance and ownership
//! lookups here and never touches the owner entries directly.
//!
//! A receipt is a bare capability: whoever currently owns id `n` may claim
//! the refund for contribution `n` once the campaign is cancelled. Owners can
//! hand the capability on via [`transfer`]. There are no approvals, no
//! enumeration, and no metadata; the campaign-level `name`/`symbol` are held
//! in the ledger's config.
//!
//! Storage (all persistent tier, same TTL discipline as [`crate::storage`]):
//!
//! | Key          | Type      | Description                          |
//! |--------------|-----------|--------------------------------------|
//! | `Count`      | `u64`     | Next id to issue / total issued      |
//! | `Owner(id)`  | `Address` | Current holder of receipt `id`       |

use soroban_sdk::{contracttype, panic_with_error, symbol_short, Address, Env};

use crate::events::ReceiptTransferred;
use crate::Error;

const DAY_IN_LEDGERS: u32 = 17_280;
const BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

/// Registry-owned storage keys. Kept separate from the ledger's `DataKey`
/// so ownership bookkeeping stays encapsulated in this module.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ReceiptKey {
    /// Monotonic issue counter; also the number of receipts minted.
    Count,
    /// Current owner of a receipt, keyed by id.
    Owner(u64),
}

fn bump(env: &Env, key: &ReceiptKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, LIFETIME_THRESHOLD, BUMP_AMOUNT);
}

/// Number of receipts issued so far. Ids run `0..count` with no gaps.
pub fn count(env: &Env) -> u64 {
    env.storage()
        .persistent()
        .get(&ReceiptKey::Count)
        .unwrap_or(0)
}

/// Issue the next receipt to `to` and return its id.
///
/// Atomically reads, increments, and stores the counter, so no two receipts
/// can ever share an identifier.
pub fn mint_to(env: &Env, to: &Address) -> u64 {
    let id = count(env);
    env.storage()
        .persistent()
        .set(&ReceiptKey::Count, &(id + 1));
    bump(env, &ReceiptKey::Count);

    let owner_key = ReceiptKey::Owner(id);
    env.storage().persistent().set(&owner_key, to);
    bump(env, &owner_key);
    id
}

/// Current owner of `receipt_id`.
/// Fails with `ReceiptNotFound` if the id was never issued.
pub fn owner_of(env: &Env, receipt_id: u64) -> Address {
    let key = ReceiptKey::Owner(receipt_id);
    let owner: Option<Address> = env.storage().persistent().get(&key);
    match owner {
        Some(owner) => {
            bump(env, &key);
            owner
        }
        None => panic_with_error!(env, Error::ReceiptNotFound),
    }
}

/// Move `receipt_id` from `from` to `to`.
///
/// `from` must be the current owner; the refund capability follows the
/// receipt. Refund history is the ledger's concern and is not checked here —
/// an already-refunded receipt transfers fine, it is just worthless.
pub fn transfer(env: &Env, from: &Address, to: &Address, receipt_id: u64) {
    if owner_of(env, receipt_id) != *from {
        panic_with_error!(env, Error::SenderIsNotOwner);
    }

    let key = ReceiptKey::Owner(receipt_id);
    env.storage().persistent().set(&key, to);
    bump(env, &key);

    env.events().publish(
        (symbol_short!("xfer"), receipt_id),
        ReceiptTransferred {
            receipt_id,
            from: from.clone(),
            to: to.clone(),
        },
    );
}
