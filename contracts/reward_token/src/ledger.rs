//! Balance, allowance and supply bookkeeping.
//!
//! These helpers never call `require_auth` and never emit events; the
//! contract entry points do both. Every mutator validates first and writes
//! last, so an `Err` leaves storage untouched.

use common::{ttl, ContractError};
use soroban_sdk::{symbol_short, Address, Env, Symbol};

const TOTAL_SUPPLY: Symbol = symbol_short!("TOT_SUP");

// Per-holder persistent storage uses tuple keys: (prefix, address[, address])
const BALANCE: Symbol = symbol_short!("BAL");
const ALLOWANCE: Symbol = symbol_short!("ALLOW");

fn balance_key(id: &Address) -> (Symbol, Address) {
    (BALANCE, id.clone())
}

fn allowance_key(owner: &Address, spender: &Address) -> (Symbol, Address, Address) {
    (ALLOWANCE, owner.clone(), spender.clone())
}

// ── Reads ────────────────────────────────────────────────────────────────────

pub fn total_supply(env: &Env) -> i128 {
    env.storage().instance().get(&TOTAL_SUPPLY).unwrap_or(0)
}

pub fn balance_of(env: &Env, id: &Address) -> i128 {
    env.storage().persistent().get(&balance_key(id)).unwrap_or(0)
}

pub fn allowance(env: &Env, owner: &Address, spender: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&allowance_key(owner, spender))
        .unwrap_or(0)
}

// ── Writes ───────────────────────────────────────────────────────────────────

fn write_balance(env: &Env, id: &Address, amount: i128) {
    let key = balance_key(id);
    env.storage().persistent().set(&key, &amount);
    ttl::extend_persistent(env, &key);
}

pub fn write_allowance(env: &Env, owner: &Address, spender: &Address, amount: i128) {
    let key = allowance_key(owner, spender);
    env.storage().persistent().set(&key, &amount);
    ttl::extend_persistent(env, &key);
}

/// Reject negative amounts. Zero is a valid amount for every ledger move.
pub fn require_non_negative(amount: i128) -> Result<(), ContractError> {
    if amount < 0 {
        return Err(ContractError::InvalidAmount);
    }
    Ok(())
}

/// Credit `to` with freshly created tokens and grow the supply.
///
/// Returns the new total supply.
pub fn mint(env: &Env, to: &Address, amount: i128) -> Result<i128, ContractError> {
    require_non_negative(amount)?;

    let new_supply = total_supply(env)
        .checked_add(amount)
        .ok_or(ContractError::Overflow)?;
    let new_balance = balance_of(env, to)
        .checked_add(amount)
        .ok_or(ContractError::Overflow)?;

    env.storage().instance().set(&TOTAL_SUPPLY, &new_supply);
    write_balance(env, to, new_balance);

    Ok(new_supply)
}

/// Move `amount` from `from` to `to`.
///
/// `from == to` is allowed and leaves the balance unchanged: the debit is
/// written before the credit re-reads the same slot.
pub fn move_balance(
    env: &Env,
    from: &Address,
    to: &Address,
    amount: i128,
) -> Result<(), ContractError> {
    require_non_negative(amount)?;

    let from_balance = balance_of(env, from);
    if from_balance < amount {
        return Err(ContractError::InsufficientBalance);
    }
    if from == to {
        return Ok(());
    }

    let to_balance = balance_of(env, to)
        .checked_add(amount)
        .ok_or(ContractError::Overflow)?;

    write_balance(env, from, from_balance - amount);
    write_balance(env, to, to_balance);

    Ok(())
}

/// Spend `amount` of the allowance `owner` granted to `spender`, moving
/// tokens from `owner` to `to`.
///
/// Returns the remaining allowance.
pub fn spend_allowance(
    env: &Env,
    spender: &Address,
    owner: &Address,
    to: &Address,
    amount: i128,
) -> Result<i128, ContractError> {
    require_non_negative(amount)?;

    let allowed = allowance(env, owner, spender);
    if allowed < amount {
        return Err(ContractError::InsufficientAllowance);
    }

    // Balance errors must surface before the allowance is touched.
    move_balance(env, owner, to, amount)?;

    let remaining = allowed - amount;
    write_allowance(env, owner, spender, remaining);
    Ok(remaining)
}
