extern crate std;

use soroban_sdk::{
    testutils::{Address as _, Ledger},
    token, Address, Env, String,
};

use crate::invariants;
use crate::{Crowdfunder, CrowdfunderClient, Error, CAMPAIGN_DURATION_SECS, UNIT_PRICE};

fn create_token<'a>(env: &Env, admin: &Address) -> token::Client<'a> {
    let addr = env.register_stellar_asset_contract_v2(admin.clone());
    token::Client::new(env, &addr.address())
}

fn setup() -> (Env, CrowdfunderClient<'static>, Address, token::Client<'static>) {
    let env = Env::default();
    env.mock_all_auths();
    let contract_id = env.register(Crowdfunder, ());
    let client = CrowdfunderClient::new(&env, &contract_id);

    let deployer = Address::generate(&env);
    let token_admin = Address::generate(&env);
    let token = create_token(&env, &token_admin);

    client.init(
        &String::from_str(&env, "Test Token"),
        &String::from_str(&env, "TST"),
        &token.address,
        &(2 * UNIT_PRICE),
        &deployer,
    );
    (env, client, deployer, token)
}

fn fund(env: &Env, token: &token::Client, who: &Address, units: i128) {
    let sac = token::StellarAssetClient::new(env, &token.address);
    sac.mint(who, &(units * UNIT_PRICE));
}

fn pass_deadline(env: &Env) {
    env.ledger().with_mut(|li| {
        li.timestamp += CAMPAIGN_DURATION_SECS;
    });
}

/// Mint one receipt, run the campaign to failure, and cancel.
/// Returns the contributor holding receipt 0.
fn cancelled_campaign_with_one_receipt(
    env: &Env,
    client: &CrowdfunderClient,
    deployer: &Address,
    token: &token::Client,
) -> Address {
    let contributor = Address::generate(env);
    fund(env, token, &contributor, 1);
    client.mint(&contributor, &UNIT_PRICE);
    pass_deadline(env);
    client.cancel(deployer);
    contributor
}

// ─────────────────────────────────────────────────────────
// Refund guards
// ─────────────────────────────────────────────────────────

#[test]
fn refund_before_cancellation_fails() {
    let (env, client, _deployer, token) = setup();
    let contributor = Address::generate(&env);
    fund(&env, &token, &contributor, 1);
    client.mint(&contributor, &UNIT_PRICE);

    // Even after the deadline, refunds stay locked until cancel.
    pass_deadline(&env);

    let result = client.try_refund(&contributor, &0);
    assert_eq!(result, Err(Ok(Error::CrowdfundIsActive.into())));
    assert_eq!(client.raised_total(), UNIT_PRICE);
}

#[test]
fn refund_by_non_owner_fails() {
    let (env, client, deployer, token) = setup();
    let contributor = cancelled_campaign_with_one_receipt(&env, &client, &deployer, &token);
    let stranger = Address::generate(&env);

    let result = client.try_refund(&stranger, &0);
    assert_eq!(result, Err(Ok(Error::SenderIsNotOwner.into())));

    // The rightful owner is unaffected.
    assert_eq!(client.owner_of(&0), contributor);
    assert!(!client.is_refunded(&0));
}

#[test]
fn refund_of_unknown_receipt_fails() {
    let (env, client, deployer, token) = setup();
    let contributor = cancelled_campaign_with_one_receipt(&env, &client, &deployer, &token);

    let result = client.try_refund(&contributor, &7);
    assert_eq!(result, Err(Ok(Error::ReceiptNotFound.into())));
}

// ─────────────────────────────────────────────────────────
// Refund effects
// ─────────────────────────────────────────────────────────

#[test]
fn refund_returns_one_unit_to_owner() {
    let (env, client, deployer, token) = setup();
    let contributor = cancelled_campaign_with_one_receipt(&env, &client, &deployer, &token);

    client.refund(&contributor, &0);

    assert_eq!(token.balance(&contributor), UNIT_PRICE);
    assert_eq!(token.balance(&client.address), 0);
    assert_eq!(client.raised_total(), 0);
    assert!(client.is_refunded(&0));

    let campaign = client.get_campaign();
    invariants::assert_all_campaign_invariants(&campaign, 1);
}

#[test]
fn refund_twice_fails() {
    let (env, client, deployer, token) = setup();
    let contributor = cancelled_campaign_with_one_receipt(&env, &client, &deployer, &token);

    client.refund(&contributor, &0);
    let result = client.try_refund(&contributor, &0);
    assert_eq!(result, Err(Ok(Error::AlreadyRefunded.into())));

    // Exactly one unit left the escrow.
    assert_eq!(token.balance(&contributor), UNIT_PRICE);
    assert_eq!(client.raised_total(), 0);
}

#[test]
fn refunds_drain_the_escrow_unit_by_unit() {
    let env = Env::default();
    env.mock_all_auths();
    let contract_id = env.register(Crowdfunder, ());
    let client = CrowdfunderClient::new(&env, &contract_id);

    let deployer = Address::generate(&env);
    let token_admin = Address::generate(&env);
    let token = create_token(&env, &token_admin);

    // Objective of three units; only two are raised, so the campaign fails.
    client.init(
        &String::from_str(&env, "Test Token"),
        &String::from_str(&env, "TST"),
        &token.address,
        &(3 * UNIT_PRICE),
        &deployer,
    );

    let alice = Address::generate(&env);
    let bob = Address::generate(&env);
    fund(&env, &token, &alice, 1);
    fund(&env, &token, &bob, 1);
    client.mint(&alice, &UNIT_PRICE);
    client.mint(&bob, &UNIT_PRICE);

    pass_deadline(&env);
    client.cancel(&deployer);

    client.refund(&alice, &0);
    assert_eq!(client.raised_total(), UNIT_PRICE);
    invariants::assert_escrow_accounting(&client.get_campaign(), 1);

    client.refund(&bob, &1);
    assert_eq!(client.raised_total(), 0);
    assert_eq!(token.balance(&client.address), 0);
    invariants::assert_escrow_accounting(&client.get_campaign(), 2);

    // Both contributors are whole again.
    assert_eq!(token.balance(&alice), UNIT_PRICE);
    assert_eq!(token.balance(&bob), UNIT_PRICE);
}

// ─────────────────────────────────────────────────────────
// Receipt transfer
// ─────────────────────────────────────────────────────────

#[test]
fn transferred_receipt_refunds_to_new_owner() {
    let (env, client, deployer, token) = setup();
    let contributor = cancelled_campaign_with_one_receipt(&env, &client, &deployer, &token);
    let buyer = Address::generate(&env);

    client.transfer_receipt(&contributor, &buyer, &0);
    assert_eq!(client.owner_of(&0), buyer);

    // The original minter no longer holds the capability.
    let result = client.try_refund(&contributor, &0);
    assert_eq!(result, Err(Ok(Error::SenderIsNotOwner.into())));

    client.refund(&buyer, &0);
    assert_eq!(token.balance(&buyer), UNIT_PRICE);
    assert_eq!(token.balance(&contributor), 0);
}

#[test]
fn transfer_by_non_owner_fails() {
    let (env, client, deployer, token) = setup();
    let contributor = cancelled_campaign_with_one_receipt(&env, &client, &deployer, &token);
    let stranger = Address::generate(&env);
    let target = Address::generate(&env);

    let result = client.try_transfer_receipt(&stranger, &target, &0);
    assert_eq!(result, Err(Ok(Error::SenderIsNotOwner.into())));
    assert_eq!(client.owner_of(&0), contributor);
}

#[test]
fn transfer_of_unknown_receipt_fails() {
    let (env, client, _deployer, _token) = setup();
    let a = Address::generate(&env);
    let b = Address::generate(&env);

    let result = client.try_transfer_receipt(&a, &b, &0);
    assert_eq!(result, Err(Ok(Error::ReceiptNotFound.into())));
}

#[test]
fn refunded_flag_survives_transfer() {
    let (env, client, deployer, token) = setup();
    let contributor = cancelled_campaign_with_one_receipt(&env, &client, &deployer, &token);
    let buyer = Address::generate(&env);

    client.refund(&contributor, &0);

    // A spent receipt still transfers; it is just worthless.
    client.transfer_receipt(&contributor, &buyer, &0);
    assert_eq!(client.owner_of(&0), buyer);

    let result = client.try_refund(&buyer, &0);
    assert_eq!(result, Err(Ok(Error::AlreadyRefunded.into())));
}
