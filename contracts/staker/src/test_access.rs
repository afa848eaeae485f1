extern crate std;

use reward_token::{RewardTokenContract, RewardTokenContractClient};
use soroban_sdk::{testutils::Address as _, Address, Env, String};

use crate::{ContractError, StakerContract, StakerContractClient};

// ── Test helpers ─────────────────────────────────────────────────────────────

fn setup() -> (Env, StakerContractClient<'static>, Address) {
    let env = Env::default();
    env.mock_all_auths();

    let owner = Address::generate(&env);
    let token_id = env.register(RewardTokenContract, ());
    RewardTokenContractClient::new(&env, &token_id).initialize(
        &owner,
        &String::from_str(&env, "Reward Token"),
        &String::from_str(&env, "RWD"),
        &100,
        &5,
    );

    let pool_id = env.register(StakerContract, ());
    let pool = StakerContractClient::new(&env, &pool_id);
    pool.initialize(&owner, &token_id, &true);

    (env, pool, owner)
}

// ── Withdraw status ───────────────────────────────────────────────────────────

#[test]
fn test_set_withdraw_status_by_owner() {
    let (_env, pool, owner) = setup();

    pool.set_withdraw_status(&owner, &false);
    assert!(!pool.get_withdraw_status());

    pool.set_withdraw_status(&owner, &true);
    assert!(pool.get_withdraw_status());
}

#[test]
fn test_set_withdraw_status_by_non_owner_fails() {
    let (env, pool, _owner) = setup();
    let intruder = Address::generate(&env);

    for enabled in [true, false] {
        let result = pool.try_set_withdraw_status(&intruder, &enabled);
        match result {
            Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
            _ => unreachable!("Expected Unauthorized error"),
        }
    }
    assert!(pool.get_withdraw_status());
}

#[test]
fn test_allocate_rewards_open_to_anyone() {
    let (_env, pool, _owner) = setup();

    // No auth is required, so this succeeds for any invoker.
    assert_eq!(pool.allocate_rewards(), 0);
}

// ── Owner transfer ────────────────────────────────────────────────────────────

#[test]
fn test_owner_transfer_moves_withdraw_control() {
    let (env, pool, owner) = setup();
    let next = Address::generate(&env);

    pool.propose_owner(&owner, &next);
    assert_eq!(pool.get_pending_owner(), Some(next.clone()));
    pool.accept_owner(&next);
    assert_eq!(pool.get_owner(), next);

    match pool.try_set_withdraw_status(&owner, &false) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
    pool.set_withdraw_status(&next, &false);
    assert!(!pool.get_withdraw_status());
}

#[test]
fn test_owner_transfer_guards() {
    let (env, pool, owner) = setup();
    let next = Address::generate(&env);
    let intruder = Address::generate(&env);

    match pool.try_propose_owner(&intruder, &intruder) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
    match pool.try_accept_owner(&next) {
        Err(Ok(e)) => assert_eq!(e, ContractError::NoPendingOwner),
        _ => unreachable!("Expected NoPendingOwner error"),
    }

    pool.propose_owner(&owner, &next);
    match pool.try_accept_owner(&intruder) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }

    pool.cancel_owner_transfer(&owner);
    assert_eq!(pool.get_pending_owner(), None);
    assert_eq!(pool.get_owner(), owner);
}

// ── Authorization ─────────────────────────────────────────────────────────────

#[test]
fn test_deposit_requires_staker_auth() {
    let env = Env::default();
    env.mock_all_auths();

    let owner = Address::generate(&env);
    let staker = Address::generate(&env);
    let token_id = env.register(RewardTokenContract, ());
    let token = RewardTokenContractClient::new(&env, &token_id);
    token.initialize(
        &owner,
        &String::from_str(&env, "Reward Token"),
        &String::from_str(&env, "RWD"),
        &100,
        &5,
    );
    token.mint(&owner, &staker, &100);

    let pool_id = env.register(StakerContract, ());
    let pool = StakerContractClient::new(&env, &pool_id);
    pool.initialize(&owner, &token_id, &true);
    token.approve(&staker, &pool_id, &100);

    pool.deposit(&staker, &100);

    // The staker itself, not the owner, authorised the deposit.
    let auths = env.auths();
    assert!(auths.iter().any(|(addr, _)| *addr == staker));
    assert!(!auths.iter().any(|(addr, _)| *addr == owner));
}
