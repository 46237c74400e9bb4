extern crate std;

use soroban_sdk::{testutils::Address as _, token, Address, Env, String};

use crate::{Error, ProjectHub, ProjectHubClient, ProjectStatus};

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

fn name(env: &Env, s: &str) -> String {
    String::from_str(env, s)
}

/// Native project with target 100 / pool 1000, filled to 100 by one investor.
fn filled_project(
    env: &Env,
    client: &ProjectHubClient,
    admin: &Address,
    native: &token::Client,
) -> (u64, Address, token::Client<'static>) {
    let payout = create_token(env, admin);
    let investor = Address::generate(env);
    mint(env, native, &investor, 100);

    let pid = client.create_project(&name(env, "Cosmos"), &None, &100, &payout.address, &1000);
    client.create_allowance(&pid, &investor, &100);
    client.invest(&pid, &investor, &0, &100);
    (pid, investor, payout)
}

#[test]
fn test_withdraw_after_fill() {
    let (env, client, admin, native) = setup();
    let (pid, _investor, payout) = filled_project(&env, &client, &admin, &native);
    mint(&env, &payout, &client.address, 1000);

    let before = native.balance(&admin);
    client.withdraw_investments(&pid);

    assert_eq!(native.balance(&admin) - before, 100);
    assert_eq!(native.balance(&client.address), 0);
    assert!(client.get_project(&pid).funds_withdrawn);
}

#[test]
fn test_withdraw_requires_funded_pool() {
    let (env, client, admin, native) = setup();
    let payout = create_token(&env, &admin);
    let investor = Address::generate(&env);
    mint(&env, &native, &investor, 100);

    let pid = client.create_project(&name(&env, "Cosmos"), &None, &100, &payout.address, &1000);
    client.create_allowance(&pid, &investor, &50);
    client.invest(&pid, &investor, &0, &20);
    client.end_prematurely(&pid);

    // Pool rescaled to 200; escrow holds none of the payout asset yet.
    assert_eq!(
        client.try_withdraw_investments(&pid),
        Err(Ok(Error::InsufficientPayoutFunds))
    );

    mint(&env, &payout, &client.address, 200);
    let before = native.balance(&admin);
    client.withdraw_investments(&pid);
    assert_eq!(native.balance(&admin) - before, 20);
}

#[test]
fn test_withdraw_not_ready() {
    let (env, client, admin, _native) = setup();
    let payout = create_token(&env, &admin);

    let active = client.create_project(&name(&env, "Cosmos"), &None, &100, &payout.address, &1000);
    assert_eq!(
        client.try_withdraw_investments(&active),
        Err(Ok(Error::ProjectNotReady))
    );

    let cancelled =
        client.create_project(&name(&env, "Axelar"), &None, &100, &payout.address, &1000);
    client.cancel_project(&cancelled);
    assert_eq!(
        client.try_withdraw_investments(&cancelled),
        Err(Ok(Error::ProjectNotReady))
    );
}

#[test]
fn test_withdraw_twice() {
    let (env, client, admin, native) = setup();
    let (pid, _investor, payout) = filled_project(&env, &client, &admin, &native);
    mint(&env, &payout, &client.address, 1000);

    client.withdraw_investments(&pid);
    assert_eq!(
        client.try_withdraw_investments(&pid),
        Err(Ok(Error::AlreadyWithdrawn))
    );
}

#[test]
fn test_claim_reward_sole_contributor() {
    let (env, client, admin, native) = setup();
    let (pid, investor, payout) = filled_project(&env, &client, &admin, &native);
    mint(&env, &payout, &client.address, 1000);
    client.withdraw_investments(&pid);

    client.get_reward(&pid, &investor);
    // share = 1000 * 100 / 100
    assert_eq!(payout.balance(&investor), 1000);
    assert!(client.get_allowance(&investor, &pid).reward_claimed);

    assert_eq!(
        client.try_get_reward(&pid, &investor),
        Err(Ok(Error::AlreadyClaimed))
    );
}

#[test]
fn test_claim_reward_pro_rata_floor() {
    let (env, client, admin, native) = setup();
    let payout = create_token(&env, &admin);
    let user1 = Address::generate(&env);
    let user2 = Address::generate(&env);
    mint(&env, &native, &user1, 10);
    mint(&env, &native, &user2, 10);

    let pid = client.create_project(&name(&env, "Cosmos"), &None, &7, &payout.address, &100);
    client.create_allowance(&pid, &user1, &3);
    client.create_allowance(&pid, &user2, &4);
    client.invest(&pid, &user1, &0, &3);
    client.invest(&pid, &user2, &0, &4);
    assert_eq!(client.get_project(&pid).status, ProjectStatus::Filled);

    mint(&env, &payout, &client.address, 100);
    client.get_reward(&pid, &user1);
    client.get_reward(&pid, &user2);

    // 100*3/7 = 42 and 100*4/7 = 57; one unit stays in escrow.
    assert_eq!(payout.balance(&user1), 42);
    assert_eq!(payout.balance(&user2), 57);
    assert_eq!(payout.balance(&client.address), 1);
}

#[test]
fn test_claim_reward_while_active() {
    let (env, client, admin, native) = setup();
    let payout = create_token(&env, &admin);
    let investor = Address::generate(&env);
    mint(&env, &native, &investor, 100);

    let pid = client.create_project(&name(&env, "Cosmos"), &None, &100, &payout.address, &1000);
    client.create_allowance(&pid, &investor, &50);
    client.invest(&pid, &investor, &0, &20);

    assert_eq!(
        client.try_get_reward(&pid, &investor),
        Err(Ok(Error::ProjectNotReady))
    );
}

#[test]
fn test_claim_reward_no_allowance() {
    let (env, client, admin, native) = setup();
    let (pid, _investor, payout) = filled_project(&env, &client, &admin, &native);
    mint(&env, &payout, &client.address, 1000);

    let stranger = Address::generate(&env);
    assert_eq!(
        client.try_get_reward(&pid, &stranger),
        Err(Ok(Error::NoAllowance))
    );
}

#[test]
fn test_claim_reward_unfunded_pool_is_retryable() {
    let (env, client, admin, native) = setup();
    let (pid, investor, payout) = filled_project(&env, &client, &admin, &native);

    // Nothing minted to escrow yet: the claim surfaces the shortfall and
    // leaves the allowance unclaimed.
    assert_eq!(
        client.try_get_reward(&pid, &investor),
        Err(Ok(Error::InsufficientPayoutFunds))
    );
    assert!(!client.get_allowance(&investor, &pid).reward_claimed);

    mint(&env, &payout, &client.address, 1000);
    client.get_reward(&pid, &investor);
    assert_eq!(payout.balance(&investor), 1000);
}

#[test]
fn test_claim_reward_zero_raise() {
    let (env, client, admin, _native) = setup();
    let payout = create_token(&env, &admin);
    let investor = Address::generate(&env);

    let pid = client.create_project(&name(&env, "Cosmos"), &None, &100, &payout.address, &1000);
    client.create_allowance(&pid, &investor, &50);
    client.end_prematurely(&pid);

    // Target and pool both rescaled to zero; the share is zero, not a
    // division failure.
    let project = client.get_project(&pid);
    assert_eq!(project.funding_target, 0);
    assert_eq!(project.payout_pool_total, 0);

    client.get_reward(&pid, &investor);
    assert_eq!(payout.balance(&investor), 0);
    assert!(client.get_allowance(&investor, &pid).reward_claimed);
}

#[test]
fn test_refund_after_cancel() {
    let (env, client, admin, native) = setup();
    let payout = create_token(&env, &admin);
    let investor = Address::generate(&env);
    mint(&env, &native, &investor, 100);

    let pid = client.create_project(&name(&env, "Agoric"), &None, &200, &payout.address, &1000);
    client.create_allowance(&pid, &investor, &100);
    client.invest(&pid, &investor, &0, &100);
    client.cancel_project(&pid);

    client.get_refund(&pid, &investor);
    assert_eq!(native.balance(&investor), 100);
    assert_eq!(native.balance(&client.address), 0);

    assert_eq!(
        client.try_get_refund(&pid, &investor),
        Err(Ok(Error::AlreadyClaimed))
    );
}

#[test]
fn test_refund_token_project() {
    let (env, client, admin, _native) = setup();
    let payment = create_token(&env, &admin);
    let payout = create_token(&env, &admin);
    let investor = Address::generate(&env);
    mint(&env, &payment, &investor, 80);

    let pid = client.create_project(
        &name(&env, "Agoric"),
        &Some(payment.address.clone()),
        &200,
        &payout.address,
        &1000,
    );
    client.create_allowance(&pid, &investor, &100);
    client.invest(&pid, &investor, &80, &0);
    client.cancel_project(&pid);

    client.get_refund(&pid, &investor);
    assert_eq!(payment.balance(&investor), 80);
}

#[test]
fn test_refund_not_cancelled() {
    let (env, client, admin, native) = setup();
    let payout = create_token(&env, &admin);
    let investor = Address::generate(&env);
    mint(&env, &native, &investor, 100);

    let pid = client.create_project(&name(&env, "Cosmos"), &None, &100, &payout.address, &1000);
    client.create_allowance(&pid, &investor, &50);
    client.invest(&pid, &investor, &0, &20);

    assert_eq!(
        client.try_get_refund(&pid, &investor),
        Err(Ok(Error::ProjectNotCancelled))
    );
}

#[test]
fn test_refund_no_allowance() {
    let (env, client, admin, _native) = setup();
    let payout = create_token(&env, &admin);
    let stranger = Address::generate(&env);

    let pid = client.create_project(&name(&env, "Cosmos"), &None, &100, &payout.address, &1000);
    client.cancel_project(&pid);
    assert_eq!(
        client.try_get_refund(&pid, &stranger),
        Err(Ok(Error::NoAllowance))
    );
}
