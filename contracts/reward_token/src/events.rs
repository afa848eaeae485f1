#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env, String};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the token is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub owner: Address,
    pub name: String,
    pub symbol: String,
    pub reward_rate: u32,
    pub withdraw_fee: i128,
    pub timestamp: u64,
}

/// Fired when the owner creates new tokens.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MintedEvent {
    pub to: Address,
    pub amount: i128,
    pub new_total_supply: i128,
    pub timestamp: u64,
}

/// Fired on every balance move, direct or through an allowance.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TransferEvent {
    pub from: Address,
    pub to: Address,
    pub amount: i128,
    pub timestamp: u64,
}

/// Fired whenever an allowance is written.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ApprovalEvent {
    pub owner: Address,
    pub spender: Address,
    pub amount: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardRateSetEvent {
    pub new_rate: u32,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawFeeSetEvent {
    pub new_fee: i128,
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

pub fn publish_initialized(
    env: &Env,
    owner: Address,
    name: String,
    symbol: String,
    reward_rate: u32,
    withdraw_fee: i128,
) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            owner,
            name,
            symbol,
            reward_rate,
            withdraw_fee,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_minted(env: &Env, to: Address, amount: i128, new_total_supply: i128) {
    env.events().publish(
        (symbol_short!("MINT"), to.clone()),
        MintedEvent {
            to,
            amount,
            new_total_supply,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_transfer(env: &Env, from: Address, to: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("TRANSFER"), from.clone(), to.clone()),
        TransferEvent {
            from,
            to,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_approval(env: &Env, owner: Address, spender: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("APPROVE"), owner.clone(), spender.clone()),
        ApprovalEvent {
            owner,
            spender,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_reward_rate_set(env: &Env, new_rate: u32) {
    env.events().publish(
        (symbol_short!("RWD_RATE"),),
        RewardRateSetEvent {
            new_rate,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_withdraw_fee_set(env: &Env, new_fee: i128) {
    env.events().publish(
        (symbol_short!("WDR_FEE"),),
        WithdrawFeeSetEvent {
            new_fee,
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
