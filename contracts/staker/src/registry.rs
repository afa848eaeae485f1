//! Insertion-ordered list of every address that has ever staked.
//!
//! Addresses cannot be enumerated from the stake map itself, so allocation
//! walks this list instead. Entries are never removed: a staker who withdrew
//! keeps its slot and is skipped while its stake is zero, and a re-deposit
//! does not move it to the back.

use common::ttl;
use soroban_sdk::{symbol_short, Address, Env, Symbol, Vec};

const STAKERS: Symbol = symbol_short!("STAKERS");
const REGISTERED: Symbol = symbol_short!("REG");

fn registered_key(staker: &Address) -> (Symbol, Address) {
    (REGISTERED, staker.clone())
}

pub fn is_registered(env: &Env, staker: &Address) -> bool {
    env.storage().persistent().has(&registered_key(staker))
}

/// Append `staker` on first sight. Returns `true` if it was new.
pub fn register(env: &Env, staker: &Address) -> bool {
    if is_registered(env, staker) {
        return false;
    }

    let mut stakers = all(env);
    stakers.push_back(staker.clone());
    env.storage().persistent().set(&STAKERS, &stakers);
    ttl::extend_persistent(env, &STAKERS);

    let key = registered_key(staker);
    env.storage().persistent().set(&key, &true);
    ttl::extend_persistent(env, &key);

    true
}

pub fn all(env: &Env) -> Vec<Address> {
    env.storage()
        .persistent()
        .get(&STAKERS)
        .unwrap_or_else(|| Vec::new(env))
}
