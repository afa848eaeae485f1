use soroban_sdk::{symbol_short, Address, Env, Symbol};

// ── Storage keys ─────────────────────────────────────────────────────────────

const OWNER: Symbol = symbol_short!("OWNER");
const PENDING_OWNER: Symbol = symbol_short!("PEND_OWN");

// ── Core functions ───────────────────────────────────────────────────────────

/// Record `owner` as the single privileged identity.
/// Only callable internally — callers must verify authorization beforehand.
pub fn set_owner(env: &Env, owner: &Address) {
    env.storage().instance().set(&OWNER, owner);
}

pub fn get_owner(env: &Env) -> Option<Address> {
    env.storage().instance().get(&OWNER)
}

/// Returns `true` only if an owner is recorded and it equals `caller`.
pub fn is_owner(env: &Env, caller: &Address) -> bool {
    match get_owner(env) {
        Some(owner) => owner == *caller,
        None => false,
    }
}

pub fn get_pending_owner(env: &Env) -> Option<Address> {
    env.storage().instance().get(&PENDING_OWNER)
}

// ── Two-step handover ────────────────────────────────────────────────────────

/// Stage `new_owner` as the next owner.
///
/// Returns `false` if `caller` is not the current owner. A later proposal
/// overwrites an earlier one.
pub fn propose_owner(env: &Env, caller: &Address, new_owner: &Address) -> bool {
    if !is_owner(env, caller) {
        return false;
    }
    env.storage().instance().set(&PENDING_OWNER, new_owner);
    true
}

/// Outcome of [`accept_owner`] and [`cancel_owner_transfer`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Handover {
    /// Accept: carries the replaced owner. Cancel: the withdrawn proposal.
    Done(Address),
    NothingPending,
    WrongCaller,
}

/// Complete a staged handover. Only the proposed address may accept.
pub fn accept_owner(env: &Env, new_owner: &Address) -> Handover {
    let pending = match get_pending_owner(env) {
        Some(p) => p,
        None => return Handover::NothingPending,
    };
    if pending != *new_owner {
        return Handover::WrongCaller;
    }
    let old_owner = match get_owner(env) {
        Some(o) => o,
        None => return Handover::NothingPending,
    };

    env.storage().instance().set(&OWNER, new_owner);
    env.storage().instance().remove(&PENDING_OWNER);
    Handover::Done(old_owner)
}

/// Drop a staged handover. Only the current owner may cancel; the result
/// carries the address that had been proposed.
pub fn cancel_owner_transfer(env: &Env, caller: &Address) -> Handover {
    if !is_owner(env, caller) {
        return Handover::WrongCaller;
    }
    let pending = match get_pending_owner(env) {
        Some(p) => p,
        None => return Handover::NothingPending,
    };
    env.storage().instance().remove(&PENDING_OWNER);
    Handover::Done(pending)
}

#[cfg(test)]
mod tests {
    use super::*;
    use soroban_sdk::{contract, contractimpl, testutils::Address as _};

    #[contract]
    pub struct OwnedHarness;

    #[contractimpl]
    impl OwnedHarness {
        pub fn ping(_env: Env) {}
    }

    fn setup() -> (Env, Address, Address) {
        let env = Env::default();
        let contract_id = env.register(OwnedHarness, ());
        let owner = Address::generate(&env);
        env.as_contract(&contract_id, || set_owner(&env, &owner));
        (env, contract_id, owner)
    }

    #[test]
    fn owner_check_matches_only_recorded_owner() {
        let (env, contract_id, owner) = setup();
        let stranger = Address::generate(&env);

        env.as_contract(&contract_id, || {
            assert!(is_owner(&env, &owner));
            assert!(!is_owner(&env, &stranger));
            assert_eq!(get_owner(&env), Some(owner.clone()));
        });
    }

    #[test]
    fn is_owner_false_before_owner_is_set() {
        let env = Env::default();
        let contract_id = env.register(OwnedHarness, ());
        let anyone = Address::generate(&env);

        env.as_contract(&contract_id, || {
            assert!(!is_owner(&env, &anyone));
        });
    }

    #[test]
    fn handover_requires_owner_proposal_and_matching_acceptor() {
        let (env, contract_id, owner) = setup();
        let next = Address::generate(&env);
        let intruder = Address::generate(&env);

        env.as_contract(&contract_id, || {
            assert!(!propose_owner(&env, &intruder, &intruder));
            assert!(propose_owner(&env, &owner, &next));
            assert_eq!(get_pending_owner(&env), Some(next.clone()));

            assert_eq!(accept_owner(&env, &intruder), Handover::WrongCaller);
            assert_eq!(accept_owner(&env, &next), Handover::Done(owner.clone()));

            assert!(is_owner(&env, &next));
            assert!(!is_owner(&env, &owner));
            assert_eq!(get_pending_owner(&env), None);
        });
    }

    #[test]
    fn cancel_clears_pending_owner() {
        let (env, contract_id, owner) = setup();
        let next = Address::generate(&env);

        env.as_contract(&contract_id, || {
            assert_eq!(
                cancel_owner_transfer(&env, &owner),
                Handover::NothingPending
            );
            assert!(propose_owner(&env, &owner, &next));
            assert_eq!(cancel_owner_transfer(&env, &next), Handover::WrongCaller);
            assert_eq!(
                cancel_owner_transfer(&env, &owner),
                Handover::Done(next.clone())
            );
            assert_eq!(accept_owner(&env, &next), Handover::NothingPending);
        });
    }
}
