extern crate std;

use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Events},
    token, vec, Address, Env, IntoVal, String, TryIntoVal,
};

use crate::events::{InvestmentAccepted, ProjectCancelled, RewardCollected, UserRefunded};
use crate::{ProjectHub, ProjectHubClient};

fn setup() -> (Env, ProjectHubClient<'static>, Address, token::Client<'static>) {
    let env = Env::default();
    env.mock_all_auths();
    let admin = Address::generate(&env);
    let native = create_token(&env, &admin);
    let contract_id = env.register(ProjectHub, ());
    let client = ProjectHubClient::new(&env, &contract_id);
    client.init(&admin, &native.address);
    (env, client, admin, native)
}

fn create_token<'a>(env: &Env, admin: &Address) -> token::Client<'a> {
    let addr = env.register_stellar_asset_contract_v2(admin.clone());
    token::Client::new(env, &addr.address())
}

fn mint(env: &Env, asset: &token::Client, to: &Address, amount: i128) {
    token::StellarAssetClient::new(env, &asset.address).mint(to, &amount);
}

#[test]
fn test_investment_accepted_event() {
    let (env, client, admin, native) = setup();
    let payout = create_token(&env, &admin);
    let investor = Address::generate(&env);
    mint(&env, &native, &investor, 100);

    let pid = client.create_project(
        &String::from_str(&env, "Cosmos"),
        &None,
        &100,
        &payout.address,
        &1000,
    );
    client.create_allowance(&pid, &investor, &50);
    client.invest(&pid, &investor, &0, &20);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    // Topic: (symbol_short!("invested"), project_id)
    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![
        &env,
        symbol_short!("invested").into_val(&env),
        pid.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    // Data: InvestmentAccepted struct
    let event_data: InvestmentAccepted = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        InvestmentAccepted {
            project_id: pid,
            investor: investor.clone(),
            amount: 20,
        }
    );
}

#[test]
fn test_project_cancelled_event() {
    let (env, client, admin, _native) = setup();
    let payout = create_token(&env, &admin);

    let pid = client.create_project(
        &String::from_str(&env, "Cosmos"),
        &None,
        &100,
        &payout.address,
        &1000,
    );
    client.cancel_project(&pid);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    // Topic: (symbol_short!("cancelled"), project_id)
    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![
        &env,
        symbol_short!("cancelled").into_val(&env),
        pid.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    // Data: ProjectCancelled struct
    let event_data: ProjectCancelled = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(event_data, ProjectCancelled { project_id: pid });
}

#[test]
fn test_reward_collected_event() {
    let (env, client, admin, native) = setup();
    let payout = create_token(&env, &admin);
    let investor = Address::generate(&env);
    mint(&env, &native, &investor, 100);

    let pid = client.create_project(
        &String::from_str(&env, "Agoric"),
        &None,
        &100,
        &payout.address,
        &1000,
    );
    client.create_allowance(&pid, &investor, &100);
    client.invest(&pid, &investor, &0, &100);
    mint(&env, &payout, &client.address, 1000);
    client.withdraw_investments(&pid);

    client.get_reward(&pid, &investor);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    // Topic: (symbol_short!("reward"), project_id)
    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![
        &env,
        symbol_short!("reward").into_val(&env),
        pid.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    // Data: RewardCollected struct with the full pro-rata share
    let event_data: RewardCollected = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        RewardCollected {
            project_id: pid,
            investor: investor.clone(),
            amount: 1000,
        }
    );
}

#[test]
fn test_user_refunded_event() {
    let (env, client, admin, native) = setup();
    let payout = create_token(&env, &admin);
    let investor = Address::generate(&env);
    mint(&env, &native, &investor, 100);

    let pid = client.create_project(
        &String::from_str(&env, "Agoric"),
        &None,
        &200,
        &payout.address,
        &1000,
    );
    client.create_allowance(&pid, &investor, &100);
    client.invest(&pid, &investor, &0, &100);
    client.cancel_project(&pid);

    client.get_refund(&pid, &investor);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    // Topic: (symbol_short!("refunded"), project_id)
    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![
        &env,
        symbol_short!("refunded").into_val(&env),
        pid.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    // Data: UserRefunded struct with the exact contributed amount
    let event_data: UserRefunded = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        UserRefunded {
            project_id: pid,
            investor: investor.clone(),
            amount: 100,
        }
    );
}
