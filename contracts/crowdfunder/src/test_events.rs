extern crate std;

use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Events, Ledger},
    token, vec, Address, Env, IntoVal, String, TryIntoVal,
};

use crate::events::{
    CampaignCancelled, FundsWithdrawn, ReceiptMinted, ReceiptRefunded, ReceiptTransferred,
};
use crate::{Crowdfunder, CrowdfunderClient, CAMPAIGN_DURATION_SECS, UNIT_PRICE};

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

#[test]
fn minted_event() {
    let (env, client, _deployer, token) = setup();
    let contributor = Address::generate(&env);
    fund(&env, &token, &contributor, 1);

    let receipt_id = client.mint(&contributor, &UNIT_PRICE);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    // Topic: (symbol_short!("minted"), receipt_id)
    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![
        &env,
        symbol_short!("minted").into_val(&env),
        receipt_id.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: ReceiptMinted = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        ReceiptMinted {
            receipt_id,
            contributor: contributor.clone(),
            amount: UNIT_PRICE,
        }
    );
}

#[test]
fn withdrawn_event() {
    let (env, client, deployer, token) = setup();
    let contributor = Address::generate(&env);
    fund(&env, &token, &contributor, 2);
    client.mint(&contributor, &UNIT_PRICE);
    client.mint(&contributor, &UNIT_PRICE);

    pass_deadline(&env);
    client.withdraw(&deployer);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![&env, symbol_short!("withdrawn").into_val(&env)];
    assert_eq!(last_event.1, expected_topics);

    let event_data: FundsWithdrawn = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        FundsWithdrawn {
            deployer: deployer.clone(),
            amount: 2 * UNIT_PRICE,
        }
    );
}

#[test]
fn cancelled_event() {
    let (env, client, deployer, token) = setup();
    let contributor = Address::generate(&env);
    fund(&env, &token, &contributor, 1);
    client.mint(&contributor, &UNIT_PRICE);

    pass_deadline(&env);
    client.cancel(&deployer);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![&env, symbol_short!("cancelled").into_val(&env)];
    assert_eq!(last_event.1, expected_topics);

    let event_data: CampaignCancelled = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        CampaignCancelled {
            deployer: deployer.clone(),
            raised_total: UNIT_PRICE,
        }
    );
}

#[test]
fn refunded_event() {
    let (env, client, deployer, token) = setup();
    let contributor = Address::generate(&env);
    fund(&env, &token, &contributor, 1);
    client.mint(&contributor, &UNIT_PRICE);

    pass_deadline(&env);
    client.cancel(&deployer);
    client.refund(&contributor, &0);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![
        &env,
        symbol_short!("refunded").into_val(&env),
        0u64.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: ReceiptRefunded = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        ReceiptRefunded {
            receipt_id: 0,
            owner: contributor.clone(),
            amount: UNIT_PRICE,
        }
    );
}

#[test]
fn transfer_event() {
    let (env, client, _deployer, token) = setup();
    let contributor = Address::generate(&env);
    let buyer = Address::generate(&env);
    fund(&env, &token, &contributor, 1);
    client.mint(&contributor, &UNIT_PRICE);

    client.transfer_receipt(&contributor, &buyer, &0);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![
        &env,
        symbol_short!("xfer").into_val(&env),
        0u64.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: ReceiptTransferred = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        ReceiptTransferred {
            receipt_id: 0,
            from: contributor.clone(),
            to: buyer.clone(),
        }
    );
}
