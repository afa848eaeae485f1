#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the pool is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub owner: Address,
    pub token: Address,
    pub withdraw_enabled: bool,
    pub timestamp: u64,
}

/// Fired when a holder moves tokens into the pool.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositedEvent {
    pub staker: Address,
    pub amount: i128,
    pub new_stake: i128,
    pub new_total_staked: i128,
    pub timestamp: u64,
}

/// Fired when surplus is compounded into stakes.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardsAllocatedEvent {
    pub surplus: i128,
    pub distributed: i128,
    pub rewarded_stakers: u32,
    pub new_total_staked: i128,
    pub timestamp: u64,
}

/// Fired when a staker exits. `fee_retained` stays in pool custody.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawnEvent {
    pub staker: Address,
    pub principal: i128,
    pub payout: i128,
    pub fee_retained: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawStatusSetEvent {
    pub enabled: bool,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnerTransferProposedEvent {
    pub current_owner: Address,
    pub proposed_owner: Address,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnerTransferAcceptedEvent {
    pub old_owner: Address,
    pub new_owner: Address,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnerTransferCancelledEvent {
    pub owner: Address,
    pub cancelled_proposed: Address,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(env: &Env, owner: Address, token: Address, withdraw_enabled: bool) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            owner,
            token,
            withdraw_enabled,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_deposited(
    env: &Env,
    staker: Address,
    amount: i128,
    new_stake: i128,
    new_total_staked: i128,
) {
    env.events().publish(
        (symbol_short!("DEPOSIT"), staker.clone()),
        DepositedEvent {
            staker,
            amount,
            new_stake,
            new_total_staked,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_rewards_allocated(
    env: &Env,
    surplus: i128,
    distributed: i128,
    rewarded_stakers: u32,
    new_total_staked: i128,
) {
    env.events().publish(
        (symbol_short!("ALLOCATE"),),
        RewardsAllocatedEvent {
            surplus,
            distributed,
            rewarded_stakers,
            new_total_staked,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_withdrawn(env: &Env, staker: Address, principal: i128, payout: i128) {
    env.events().publish(
        (symbol_short!("WITHDRAW"), staker.clone()),
        WithdrawnEvent {
            staker,
            principal,
            payout,
            fee_retained: principal - payout,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_withdraw_status_set(env: &Env, enabled: bool) {
    env.events().publish(
        (symbol_short!("WDR_STAT"),),
        WithdrawStatusSetEvent {
            enabled,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_owner_transfer_proposed(env: &Env, current_owner: Address, proposed_owner: Address) {
    env.events().publish(
        (symbol_short!("OWN_PROP"), current_owner.clone()),
        OwnerTransferProposedEvent {
            current_owner,
            proposed_owner,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_owner_transfer_accepted(env: &Env, old_owner: Address, new_owner: Address) {
    env.events().publish(
        (symbol_short!("OWN_ACPT"), new_owner.clone()),
        OwnerTransferAcceptedEvent {
            old_owner,
            new_owner,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_owner_transfer_cancelled(env: &Env, owner: Address, cancelled_proposed: Address) {
    env.events().publish(
        (symbol_short!("OWN_CNCL"), owner.clone()),
        OwnerTransferCancelledEvent {
            owner,
            cancelled_proposed,
            timestamp: env.ledger().timestamp(),
        },
    );
}
