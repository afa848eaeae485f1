extern crate std;

use soroban_sdk::{testutils::Address as _, Address, Env, String};

use crate::{ContractError, RewardTokenContract, RewardTokenContractClient};

fn setup() -> (Env, RewardTokenContractClient<'static>, Address) {
    let env = Env::default();
    env.mock_all_auths();

    let contract_id = env.register(RewardTokenContract, ());
    let client = RewardTokenContractClient::new(&env, &contract_id);

    let owner = Address::generate(&env);
    client.initialize(
        &owner,
        &String::from_str(&env, "Reward Token"),
        &String::from_str(&env, "RWD"),
        &100,
        &5,
    );

    (env, client, owner)
}

fn assert_unauthorized<T: core::fmt::Debug, E: core::fmt::Debug>(
    result: Result<T, Result<ContractError, E>>,
) {
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        other => unreachable!("Expected Unauthorized error, got {:?}", other),
    }
}

// ── Owner-gated operations ───────────────────────────────────────────────────

#[test]
fn test_mint_by_non_owner_fails() {
    let (env, client, owner) = setup();
    let intruder = Address::generate(&env);

    assert_unauthorized(client.try_mint(&intruder, &owner, &100));
    assert_unauthorized(client.try_mint(&intruder, &intruder, &100));
    assert_eq!(client.total_supply(), 0);
}

#[test]
fn test_set_withdraw_fee_by_non_owner_fails() {
    let (env, client, _owner) = setup();
    let intruder = Address::generate(&env);

    assert_unauthorized(client.try_set_withdraw_fee(&intruder, &50));
    assert_eq!(client.get_withdraw_fee(), 5);
}

#[test]
fn test_set_reward_rate_by_non_owner_fails() {
    let (env, client, _owner) = setup();
    let intruder = Address::generate(&env);

    assert_unauthorized(client.try_set_reward_rate(&intruder, &50));
    assert_eq!(client.get_reward_rate(), 100);
}

#[test]
fn test_unauthorized_takes_precedence_over_invalid_rate() {
    let (env, client, _owner) = setup();
    let intruder = Address::generate(&env);

    assert_unauthorized(client.try_set_reward_rate(&intruder, &101));
}

// ── Owner transfer ───────────────────────────────────────────────────────────

#[test]
fn test_owner_transfer_two_step() {
    let (env, client, owner) = setup();
    let next = Address::generate(&env);

    client.propose_owner(&owner, &next);
    assert_eq!(client.get_pending_owner(), Some(next.clone()));
    // Not effective until accepted.
    assert_eq!(client.get_owner(), owner);

    client.accept_owner(&next);
    assert_eq!(client.get_owner(), next);
    assert_eq!(client.get_pending_owner(), None);

    // Old owner lost its privileges, new owner gained them.
    assert_unauthorized(client.try_mint(&owner, &owner, &1));
    client.mint(&next, &next, &1);
    assert_eq!(client.balance_of(&next), 1);
}

#[test]
fn test_propose_owner_by_non_owner_fails() {
    let (env, client, _owner) = setup();
    let intruder = Address::generate(&env);

    assert_unauthorized(client.try_propose_owner(&intruder, &intruder));
    assert_eq!(client.get_pending_owner(), None);
}

#[test]
fn test_accept_owner_by_wrong_address_fails() {
    let (env, client, owner) = setup();
    let next = Address::generate(&env);
    let intruder = Address::generate(&env);

    client.propose_owner(&owner, &next);
    assert_unauthorized(client.try_accept_owner(&intruder));
    assert_eq!(client.get_owner(), owner);
}

#[test]
fn test_accept_without_proposal_fails() {
    let (env, client, _owner) = setup();
    let next = Address::generate(&env);

    match client.try_accept_owner(&next) {
        Err(Ok(e)) => assert_eq!(e, ContractError::NoPendingOwner),
        _ => unreachable!("Expected NoPendingOwner error"),
    }
}

#[test]
fn test_cancel_owner_transfer() {
    let (env, client, owner) = setup();
    let next = Address::generate(&env);

    client.propose_owner(&owner, &next);
    assert_unauthorized(client.try_cancel_owner_transfer(&next));

    client.cancel_owner_transfer(&owner);
    assert_eq!(client.get_pending_owner(), None);

    match client.try_accept_owner(&next) {
        Err(Ok(e)) => assert_eq!(e, ContractError::NoPendingOwner),
        _ => unreachable!("Expected NoPendingOwner error"),
    }
}
