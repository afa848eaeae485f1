//! Client for the reward token the pool holds custody in.
//!
//! Only the calls the pool makes are declared. Fallible calls share
//! [`ContractError`] with the token, so a token rejection converts straight
//! back into the same variant here.

use common::ContractError;
use soroban_sdk::{contractclient, Address, Env};

#[allow(dead_code)]
#[contractclient(name = "LedgerClient")]
pub trait LedgerInterface {
    fn balance_of(env: Env, id: Address) -> i128;

    fn transfer(env: Env, from: Address, to: Address, amount: i128) -> Result<(), ContractError>;

    fn transfer_from(
        env: Env,
        spender: Address,
        from: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), ContractError>;

    fn get_reward_rate(env: Env) -> u32;

    fn get_withdraw_fee(env: Env) -> i128;
}

/// Pull `amount` from `from` into `pool` using the allowance `from` granted
/// the pool.
pub fn pull(
    client: &LedgerClient,
    pool: &Address,
    from: &Address,
    amount: i128,
) -> Result<(), ContractError> {
    match client.try_transfer_from(pool, from, pool, &amount) {
        Ok(Ok(())) => Ok(()),
        Err(Ok(err)) => Err(err),
        _ => Err(ContractError::LedgerCallFailed),
    }
}

/// Send `amount` out of pool custody.
pub fn push(
    client: &LedgerClient,
    pool: &Address,
    to: &Address,
    amount: i128,
) -> Result<(), ContractError> {
    match client.try_transfer(pool, to, &amount) {
        Ok(Ok(())) => Ok(()),
        Err(Ok(err)) => Err(err),
        _ => Err(ContractError::LedgerCallFailed),
    }
}
