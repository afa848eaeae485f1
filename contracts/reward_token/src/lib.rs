#![no_std]

pub mod events;
pub mod ledger;

pub use common::ContractError;

use common::ownership::{self, Handover};
use common::ttl;
use soroban_sdk::{contract, contractimpl, symbol_short, Address, Env, String, Symbol};

// ── Storage key constants ────────────────────────────────────────────────────

const INITIALIZED: Symbol = symbol_short!("INIT");
const NAME: Symbol = symbol_short!("NAME");
const SYMBOL: Symbol = symbol_short!("SYMBOL");
const REWARD_RATE: Symbol = symbol_short!("RWD_RATE");
const WITHDRAW_FEE: Symbol = symbol_short!("WDR_FEE");

/// Fixed-point denominator exponent shared by every amount: 1 token = 10^18 units.
pub const DECIMALS: u32 = 18;

/// Upper bound of the reward rate, expressed in percent.
pub const MAX_REWARD_RATE: u32 = 100;

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct RewardTokenContract;

#[contractimpl]
impl RewardTokenContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the token and record `owner` as the only minter and
    /// parameter setter.
    ///
    /// * `reward_rate`  – percentage (0–100) the staker applies to surplus.
    /// * `withdraw_fee` – flat amount the staker keeps back on withdrawal.
    pub fn initialize(
        env: Env,
        owner: Address,
        name: String,
        symbol: String,
        reward_rate: u32,
        withdraw_fee: i128,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }
        Self::validate_reward_rate(reward_rate)?;
        Self::validate_withdraw_fee(withdraw_fee)?;

        env.storage().instance().set(&INITIALIZED, &true);
        env.storage().instance().set(&NAME, &name);
        env.storage().instance().set(&SYMBOL, &symbol);
        env.storage().instance().set(&REWARD_RATE, &reward_rate);
        env.storage().instance().set(&WITHDRAW_FEE, &withdraw_fee);
        ownership::set_owner(&env, &owner);
        ttl::extend_instance(&env);

        events::publish_initialized(&env, owner, name, symbol, reward_rate, withdraw_fee);

        Ok(())
    }

    // ── Supply ──────────────────────────────────────────────────────────────

    /// Create `amount` new tokens for `to`. Owner only.
    pub fn mint(env: Env, caller: Address, to: Address, amount: i128) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        let new_supply = ledger::mint(&env, &to, amount)?;
        ttl::extend_instance(&env);

        events::publish_minted(&env, to, amount, new_supply);

        Ok(())
    }

    // ── Transfers ───────────────────────────────────────────────────────────

    pub fn transfer(env: Env, from: Address, to: Address, amount: i128) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        from.require_auth();

        ledger::move_balance(&env, &from, &to, amount)?;

        events::publish_transfer(&env, from, to, amount);

        Ok(())
    }

    /// Overwrite the allowance `owner` grants to `spender`.
    pub fn approve(
        env: Env,
        owner: Address,
        spender: Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        owner.require_auth();
        ledger::require_non_negative(amount)?;

        ledger::write_allowance(&env, &owner, &spender, amount);

        events::publish_approval(&env, owner, spender, amount);

        Ok(())
    }

    pub fn increase_allowance(
        env: Env,
        owner: Address,
        spender: Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        owner.require_auth();
        ledger::require_non_negative(amount)?;

        let new_allowance = ledger::allowance(&env, &owner, &spender)
            .checked_add(amount)
            .ok_or(ContractError::Overflow)?;
        ledger::write_allowance(&env, &owner, &spender, new_allowance);

        events::publish_approval(&env, owner, spender, new_allowance);

        Ok(())
    }

    /// Lower an allowance. Going below zero fails rather than clamping.
    pub fn decrease_allowance(
        env: Env,
        owner: Address,
        spender: Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        owner.require_auth();
        ledger::require_non_negative(amount)?;

        let current = ledger::allowance(&env, &owner, &spender);
        if current < amount {
            return Err(ContractError::InsufficientAllowance);
        }
        let new_allowance = current - amount;
        ledger::write_allowance(&env, &owner, &spender, new_allowance);

        events::publish_approval(&env, owner, spender, new_allowance);

        Ok(())
    }

    /// Spend on behalf of `from`: `spender` moves `amount` of `from`'s
    /// tokens to `to`, consuming the allowance `from` granted it.
    pub fn transfer_from(
        env: Env,
        spender: Address,
        from: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        spender.require_auth();

        ledger::spend_allowance(&env, &spender, &from, &to, amount)?;

        events::publish_transfer(&env, from, to, amount);

        Ok(())
    }

    // ── Economic parameters ─────────────────────────────────────────────────

    /// Update the reward percentage. Owner only; rejects anything above 100.
    pub fn set_reward_rate(env: Env, caller: Address, rate: u32) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;
        Self::validate_reward_rate(rate)?;

        env.storage().instance().set(&REWARD_RATE, &rate);

        events::publish_reward_rate_set(&env, rate);

        Ok(())
    }

    /// Update the flat withdrawal fee. Owner only; no upper bound.
    pub fn set_withdraw_fee(env: Env, caller: Address, fee: i128) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;
        Self::validate_withdraw_fee(fee)?;

        env.storage().instance().set(&WITHDRAW_FEE, &fee);

        events::publish_withdraw_fee_set(&env, fee);

        Ok(())
    }

    // ── View functions ───────────────────────────────────────────────────────

    pub fn get_reward_rate(env: Env) -> u32 {
        env.storage().instance().get(&REWARD_RATE).unwrap_or(0)
    }

    pub fn get_withdraw_fee(env: Env) -> i128 {
        env.storage().instance().get(&WITHDRAW_FEE).unwrap_or(0)
    }

    pub fn total_supply(env: Env) -> i128 {
        ledger::total_supply(&env)
    }

    pub fn balance_of(env: Env, id: Address) -> i128 {
        ledger::balance_of(&env, &id)
    }

    pub fn allowance(env: Env, owner: Address, spender: Address) -> i128 {
        ledger::allowance(&env, &owner, &spender)
    }

    pub fn name(env: Env) -> Result<String, ContractError> {
        env.storage()
            .instance()
            .get(&NAME)
            .ok_or(ContractError::NotInitialized)
    }

    pub fn symbol(env: Env) -> Result<String, ContractError> {
        env.storage()
            .instance()
            .get(&SYMBOL)
            .ok_or(ContractError::NotInitialized)
    }

    pub fn decimals(_env: Env) -> u32 {
        DECIMALS
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    pub fn get_owner(env: Env) -> Result<Address, ContractError> {
        ownership::get_owner(&env).ok_or(ContractError::NotInitialized)
    }

    // ── Owner transfer (two-step) ───────────────────────────────────────────

    /// Propose a new owner. Only the current owner can call this.
    /// The new owner must call `accept_owner` to complete the transfer.
    pub fn propose_owner(
        env: Env,
        current_owner: Address,
        new_owner: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        current_owner.require_auth();
        if !ownership::propose_owner(&env, &current_owner, &new_owner) {
            return Err(ContractError::Unauthorized);
        }

        events::publish_owner_transfer_proposed(&env, current_owner, new_owner);

        Ok(())
    }

    pub fn accept_owner(env: Env, new_owner: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        new_owner.require_auth();

        match ownership::accept_owner(&env, &new_owner) {
            Handover::Done(old_owner) => {
                events::publish_owner_transfer_accepted(&env, old_owner, new_owner);
                Ok(())
            }
            Handover::NothingPending => Err(ContractError::NoPendingOwner),
            Handover::WrongCaller => Err(ContractError::Unauthorized),
        }
    }

    pub fn cancel_owner_transfer(env: Env, current_owner: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        current_owner.require_auth();

        match ownership::cancel_owner_transfer(&env, &current_owner) {
            Handover::Done(cancelled) => {
                events::publish_owner_transfer_cancelled(&env, current_owner, cancelled);
                Ok(())
            }
            Handover::NothingPending => Err(ContractError::NoPendingOwner),
            Handover::WrongCaller => Err(ContractError::Unauthorized),
        }
    }

    pub fn get_pending_owner(env: Env) -> Option<Address> {
        ownership::get_pending_owner(&env)
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    fn require_owner(env: &Env, caller: &Address) -> Result<(), ContractError> {
        if !ownership::is_owner(env, caller) {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }

    fn validate_reward_rate(rate: u32) -> Result<(), ContractError> {
        if rate > MAX_REWARD_RATE {
            return Err(ContractError::InvalidParameter);
        }
        Ok(())
    }

    fn validate_withdraw_fee(fee: i128) -> Result<(), ContractError> {
        if fee < 0 {
            return Err(ContractError::InvalidParameter);
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────


#[cfg(test)]
mod test_access;
