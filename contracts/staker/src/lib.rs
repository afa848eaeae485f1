#![no_std]

pub mod events;
pub mod ledger;
pub mod registry;
pub mod rewards;

pub use common::ContractError;

use common::ownership::{self, Handover};
use common::ttl;
use soroban_sdk::{contract, contractimpl, symbol_short, Address, Env, Symbol, Vec};

use ledger::LedgerClient;

// ── Storage key constants ────────────────────────────────────────────────────

const INITIALIZED: Symbol = symbol_short!("INIT");
const TOKEN: Symbol = symbol_short!("TOKEN");
const TOTAL_STAKED: Symbol = symbol_short!("TOT_STK");
const WITHDRAW_ENABLED: Symbol = symbol_short!("WDR_ON");

// Per-staker persistent storage uses tuple keys: (prefix, staker_address)
const USER_STAKE: Symbol = symbol_short!("STK");

// ── Contract ─────────────────────────────────────────────────────────────────

/// Staking pool over a single reward token.
///
/// Rewards are never held as a separate balance: `allocate_rewards`
/// compounds each staker's share of the pool's surplus straight into its
/// stake. Withdrawal fees are not forwarded anywhere; they stay in pool
/// custody and become surplus for the next allocation.
#[contract]
pub struct StakerContract;

#[contractimpl]
impl StakerContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the pool.
    ///
    /// * `token`            – reward token contract holding custody balances.
    /// * `withdraw_enabled` – whether `withdraw` is open from the start.
    pub fn initialize(
        env: Env,
        owner: Address,
        token: Address,
        withdraw_enabled: bool,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }

        env.storage().instance().set(&INITIALIZED, &true);
        env.storage().instance().set(&TOKEN, &token);
        env.storage().instance().set(&WITHDRAW_ENABLED, &withdraw_enabled);
        // TOTAL_STAKED starts at zero; unwrap_or(0) handles the absent key.
        ownership::set_owner(&env, &owner);
        ttl::extend_instance(&env);

        events::publish_initialized(&env, owner, token, withdraw_enabled);

        Ok(())
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Move `amount` tokens from `staker` into pool custody and record them
    /// as stake.
    ///
    /// `staker` must have approved the pool for at least `amount` on the
    /// token. Stake is only credited once the pull has succeeded; a token
    /// rejection is returned unchanged.
    pub fn deposit(env: Env, staker: Address, amount: i128) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }

        // 1. Work out the new position before anything moves.
        let new_stake = Self::stake_of(&env, &staker)
            .checked_add(amount)
            .ok_or(ContractError::Overflow)?;
        let new_total = Self::total_staked(&env)
            .checked_add(amount)
            .ok_or(ContractError::Overflow)?;

        // 2. Pull tokens from the staker into the pool.
        let pool = env.current_contract_address();
        let token = Self::ledger(&env)?;
        ledger::pull(&token, &pool, &staker, amount)?;

        // 3. Record the stake.
        registry::register(&env, &staker);
        Self::write_stake(&env, &staker, new_stake);
        env.storage().instance().set(&TOTAL_STAKED, &new_total);
        ttl::extend_instance(&env);

        events::publish_deposited(&env, staker, amount, new_stake, new_total);

        Ok(())
    }

    // ── Rewards ─────────────────────────────────────────────────────────────

    /// `staker`'s share of `pool_amount` at the token's current reward rate.
    ///
    /// Read-only. Returns 0 when nothing is staked or the pool is not
    /// initialised.
    pub fn calculate_reward_amount(env: Env, staker: Address, pool_amount: i128) -> i128 {
        let token = match Self::ledger(&env) {
            Ok(t) => t,
            Err(_) => return 0,
        };
        let total_staked = Self::total_staked(&env);
        if total_staked <= 0 {
            return 0;
        }

        rewards::proportional_share(
            &env,
            Self::stake_of(&env, &staker),
            pool_amount,
            token.get_reward_rate(),
            total_staked,
        )
    }

    /// Compound every staker's share of the current surplus into its stake.
    ///
    /// Anyone may call this. Shares are computed against the stakes and
    /// total as they stood before the call, walking stakers in first-deposit
    /// order. A zero surplus or an empty pool is a no-op, so a second call
    /// without new funds in between changes nothing.
    ///
    /// Returns the total amount compounded.
    pub fn allocate_rewards(env: Env) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;

        let total_staked = Self::total_staked(&env);
        if total_staked <= 0 {
            return Ok(0);
        }

        let pool = env.current_contract_address();
        let token = Self::ledger(&env)?;
        let surplus = rewards::surplus(token.balance_of(&pool), total_staked);
        if surplus == 0 {
            return Ok(0);
        }
        let reward_rate = token.get_reward_rate();

        // 1. Compute every credit against the pre-allocation snapshot.
        let mut credits: Vec<(Address, i128)> = Vec::new(&env);
        let mut distributed: i128 = 0;
        for staker in registry::all(&env).iter() {
            let stake = Self::stake_of(&env, &staker);
            if stake == 0 {
                continue;
            }
            let reward =
                rewards::proportional_share(&env, stake, surplus, reward_rate, total_staked);
            if reward == 0 {
                continue;
            }
            let new_stake = stake.checked_add(reward).ok_or(ContractError::Overflow)?;
            distributed = distributed
                .checked_add(reward)
                .ok_or(ContractError::Overflow)?;
            credits.push_back((staker, new_stake));
        }

        if credits.is_empty() {
            return Ok(0);
        }
        let new_total = total_staked
            .checked_add(distributed)
            .ok_or(ContractError::Overflow)?;

        // 2. Apply.
        for (staker, new_stake) in credits.iter() {
            Self::write_stake(&env, &staker, new_stake);
        }
        env.storage().instance().set(&TOTAL_STAKED, &new_total);
        ttl::extend_instance(&env);

        events::publish_rewards_allocated(&env, surplus, distributed, credits.len(), new_total);

        Ok(distributed)
    }

    // ── Withdrawal ──────────────────────────────────────────────────────────

    /// Close `staker`'s whole position, paying out stake minus the token's
    /// withdraw fee (never below zero).
    ///
    /// The fee is not sent anywhere: it remains in pool custody and is
    /// picked up as surplus by the next `allocate_rewards`.
    ///
    /// Returns the amount paid out.
    pub fn withdraw(env: Env, staker: Address) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        if !Self::get_withdraw_status(env.clone()) {
            return Err(ContractError::WithdrawDisabled);
        }

        let principal = Self::stake_of(&env, &staker);
        if principal == 0 {
            return Err(ContractError::NothingStaked);
        }

        let token = Self::ledger(&env)?;
        let payout = rewards::payout_after_fee(principal, token.get_withdraw_fee());
        let new_total = Self::total_staked(&env)
            .checked_sub(principal)
            .ok_or(ContractError::Overflow)?;

        // Zero the position before any value leaves the pool
        // (checks-effects-interactions).
        Self::write_stake(&env, &staker, 0);
        env.storage().instance().set(&TOTAL_STAKED, &new_total);
        ttl::extend_instance(&env);

        if payout > 0 {
            let pool = env.current_contract_address();
            ledger::push(&token, &pool, &staker, payout)?;
        }

        events::publish_withdrawn(&env, staker, principal, payout);

        Ok(payout)
    }

    // ── View functions ───────────────────────────────────────────────────────

    pub fn get_total_staked(env: Env) -> i128 {
        Self::total_staked(&env)
    }

    pub fn get_total_staked_by_address(env: Env, staker: Address) -> i128 {
        Self::stake_of(&env, &staker)
    }

    /// Tokens held by the pool that are not yet anyone's stake.
    pub fn get_surplus(env: Env) -> i128 {
        let token = match Self::ledger(&env) {
            Ok(t) => t,
            Err(_) => return 0,
        };
        let pool = env.current_contract_address();
        rewards::surplus(token.balance_of(&pool), Self::total_staked(&env))
    }

    /// Every address that has ever deposited, in first-deposit order.
    pub fn get_stakers(env: Env) -> Vec<Address> {
        registry::all(&env)
    }

    pub fn get_withdraw_status(env: Env) -> bool {
        env.storage()
            .instance()
            .get(&WITHDRAW_ENABLED)
            .unwrap_or(false)
    }

    pub fn get_token(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&TOKEN)
            .ok_or(ContractError::NotInitialized)
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    pub fn get_owner(env: Env) -> Result<Address, ContractError> {
        ownership::get_owner(&env).ok_or(ContractError::NotInitialized)
    }

    // ── Admin functions ──────────────────────────────────────────────────────

    /// Open or close withdrawals. Owner only.
    pub fn set_withdraw_status(
        env: Env,
        caller: Address,
        enabled: bool,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        env.storage().instance().set(&WITHDRAW_ENABLED, &enabled);

        events::publish_withdraw_status_set(&env, enabled);

        Ok(())
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

    /// Guard: revert if the contract is not yet initialized.
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

    fn ledger(env: &Env) -> Result<LedgerClient<'static>, ContractError> {
        let token: Address = env
            .storage()
            .instance()
            .get(&TOKEN)
            .ok_or(ContractError::NotInitialized)?;
        Ok(LedgerClient::new(env, &token))
    }

    fn total_staked(env: &Env) -> i128 {
        env.storage().instance().get(&TOTAL_STAKED).unwrap_or(0)
    }

    fn stake_of(env: &Env, staker: &Address) -> i128 {
        env.storage()
            .persistent()
            .get(&(USER_STAKE, staker.clone()))
            .unwrap_or(0)
    }

    fn write_stake(env: &Env, staker: &Address, amount: i128) {
        let key = (USER_STAKE, staker.clone());
        env.storage().persistent().set(&key, &amount);
        ttl::extend_persistent(env, &key);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────


#[cfg(test)]
mod test_access;
