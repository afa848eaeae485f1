use soroban_sdk::{Env, I256};

/// Denominator of the reward rate, which is a whole percentage.
pub const PERCENT: i128 = 100;

// ── Core reward engine ──────────────────────────────────────────────────────

/// A staker's share of `pool_amount`, scaled by `reward_rate` percent:
///
/// ```text
/// reward = floor( stake × pool_amount × reward_rate / (total_staked × 100) )
/// ```
///
/// Returns 0 when nothing is staked or any input is non-positive.
///
/// The full product can need up to 261 bits, so it is never formed. With
/// `A = stake × pool_amount` (fits in 256 bits) and `D = total_staked × 100`,
/// write `A = q·D + m`; then
///
/// ```text
/// floor(A·r / D) = q·r + floor(m·r / D)
/// ```
///
/// which is exact and keeps every intermediate below 2^255.
pub fn proportional_share(
    env: &Env,
    stake: i128,
    pool_amount: i128,
    reward_rate: u32,
    total_staked: i128,
) -> i128 {
    if total_staked <= 0 || stake <= 0 || pool_amount <= 0 || reward_rate == 0 {
        return 0;
    }

    let rate = I256::from_i128(env, reward_rate as i128);
    let product = I256::from_i128(env, stake).mul(&I256::from_i128(env, pool_amount));
    let denominator = I256::from_i128(env, total_staked).mul(&I256::from_i128(env, PERCENT));

    let quotient = product.div(&denominator);
    let remainder = product.rem_euclid(&denominator);

    let share = quotient
        .mul(&rate)
        .add(&remainder.mul(&rate).div(&denominator));

    // share ≤ pool_amount whenever stake ≤ total_staked and rate ≤ 100.
    share.to_i128().unwrap_or(0)
}

/// Surplus held by the pool beyond what is already recorded as stake.
pub fn surplus(custody_balance: i128, total_staked: i128) -> i128 {
    custody_balance.saturating_sub(total_staked).max(0)
}

/// Amount a staker receives for `principal` after the flat `fee`.
pub fn payout_after_fee(principal: i128, fee: i128) -> i128 {
    principal.saturating_sub(fee).max(0)
}

// ── Unit tests ──────────────────────────────────────────────────────────────
