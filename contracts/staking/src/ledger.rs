//! Stake lifecycle per (pool, user): Empty -> Active -> Empty.
//!
//! Every mutation realizes pending interest through the accrual engine,
//! validates everything it needs before the first write, and moves the pool
//! aggregate and the global liability counter in the same step as the
//! principal.

use soroban_sdk::{token, Address, Env};
use yieldpool_shared::{
    compound_balance, elapsed_seconds, percentage_of, validate_positive_amount,
};

use crate::{
    events, pool, referral, storage, DataKey, Pool, StakeInfo, StakingConfig, StakingError,
};

pub fn load(env: &Env, pool_id: u32, user: &Address) -> StakeInfo {
    env.storage()
        .persistent()
        .get(&DataKey::Stake(pool_id, user.clone()))
        .unwrap_or_default()
}

fn save(env: &Env, pool_id: u32, user: &Address, stake: &StakeInfo) {
    env.storage()
        .persistent()
        .set(&DataKey::Stake(pool_id, user.clone()), stake);
}

fn clear(env: &Env, pool_id: u32, user: &Address) {
    env.storage()
        .persistent()
        .remove(&DataKey::Stake(pool_id, user.clone()));
}

/// Load a stake that may be withdrawn at `now`.
fn load_unlocked(
    env: &Env,
    pool_id: u32,
    user: &Address,
    now: u64,
) -> Result<StakeInfo, StakingError> {
    let stake = load(env, pool_id, user);
    if stake.amount == 0 {
        return Err(StakingError::NoStake);
    }
    if now < stake.unlock_time {
        return Err(StakingError::StakeLocked);
    }
    Ok(stake)
}

fn realized_balance(pool: &Pool, stake: &StakeInfo, now: u64) -> i128 {
    let elapsed = elapsed_seconds(stake.last_sync, pool::accrual_end(pool, now));
    compound_balance(stake.amount, pool.annual_yield_bps, elapsed)
}

/// Fail unless custody holds `needed` on top of everything owed to stakers.
fn ensure_reserve(env: &Env, config: &StakingConfig, needed: i128) -> Result<(), StakingError> {
    if needed <= 0 {
        return Ok(());
    }
    let custody = token::Client::new(env, &config.token)
        .balance(&env.current_contract_address());
    if custody.saturating_sub(storage::total_staked(env)) < needed {
        return Err(StakingError::InsufficientReserve);
    }
    Ok(())
}

/// Shift the pool aggregate and the global liabilities by `delta`.
fn apply_delta(
    env: &Env,
    pool_id: u32,
    pool: &mut Pool,
    delta: i128,
) -> Result<(), StakingError> {
    let total = storage::total_staked(env)
        .checked_add(delta)
        .ok_or(StakingError::NumericOverflow)?;
    pool.total_stake = pool
        .total_stake
        .checked_add(delta)
        .ok_or(StakingError::NumericOverflow)?;

    pool::save(env, pool_id, pool);
    storage::set_total_staked(env, total);
    Ok(())
}

pub fn stake(
    env: &Env,
    config: &StakingConfig,
    user: &Address,
    pool_id: u32,
    amount: i128,
    referrer_id: u64,
    now: u64,
) -> Result<(), StakingError> {
    let mut pool = pool::load(env, pool_id)?;
    if pool.paused {
        return Err(StakingError::PoolPaused);
    }
    if !validate_positive_amount(amount) {
        return Err(StakingError::InvalidAmount);
    }

    let current = load(env, pool_id, user);
    let (principal, gain) = if current.amount > 0 {
        let realized = realized_balance(&pool, &current, now);
        (realized, realized - current.amount)
    } else {
        (0, 0)
    };
    ensure_reserve(env, config, gain)?;

    let updated = StakeInfo {
        amount: principal
            .checked_add(amount)
            .ok_or(StakingError::NumericOverflow)?,
        last_sync: now,
        unlock_time: now.saturating_add(pool.lock_period),
    };
    let delta = updated.amount - current.amount;

    referral::register_if_absent(env, user)?;
    let (referrer, bound_now) = referral::resolve_referrer(env, referrer_id, user)?;

    apply_delta(env, pool_id, &mut pool, delta)?;
    save(env, pool_id, user, &updated);

    token::Client::new(env, &config.token).transfer(
        user,
        &env.current_contract_address(),
        &amount,
    );

    if bound_now {
        events::new_referral(env, user, &referrer);
    }
    if gain > 0 {
        events::restake(env, user, pool_id, gain);
    }
    events::stake(env, user, pool_id, amount);

    Ok(())
}

pub fn unstake(
    env: &Env,
    config: &StakingConfig,
    user: &Address,
    pool_id: u32,
    requested: i128,
    now: u64,
) -> Result<i128, StakingError> {
    let mut pool = pool::load(env, pool_id)?;
    let current = load_unlocked(env, pool_id, user, now)?;
    if !validate_positive_amount(requested) {
        return Err(StakingError::InvalidAmount);
    }

    let realized = realized_balance(&pool, &current, now);
    let gain = realized - current.amount;
    let withdraw = requested.min(realized);
    let commission = percentage_of(gain, config.referrer_reward_pct);

    // Gain not paid out stays owed to the user, commission leaves custody.
    let owed = gain
        .checked_add(commission)
        .ok_or(StakingError::NumericOverflow)?;
    ensure_reserve(env, config, owed)?;

    let remaining = realized - withdraw;
    let referrer = referral::payout_address(env, user)?;

    apply_delta(env, pool_id, &mut pool, remaining - current.amount)?;
    if remaining == 0 {
        clear(env, pool_id, user);
    } else {
        let updated = StakeInfo {
            amount: remaining,
            last_sync: now,
            unlock_time: current.unlock_time,
        };
        save(env, pool_id, user, &updated);
    }

    let asset = token::Client::new(env, &config.token);
    let custody = env.current_contract_address();
    asset.transfer(&custody, user, &withdraw);
    if commission > 0 {
        asset.transfer(&custody, &referrer, &commission);
    }

    events::unstake(env, user, pool_id, withdraw);

    Ok(withdraw)
}

/// Pay out the recorded principal. Interest accrued since the last sync is
/// forfeited and no commission is taken.
pub fn emergency_unstake(
    env: &Env,
    config: &StakingConfig,
    user: &Address,
    pool_id: u32,
    now: u64,
) -> Result<i128, StakingError> {
    let mut pool = pool::load(env, pool_id)?;
    let current = load_unlocked(env, pool_id, user, now)?;
    let payout = current.amount;

    apply_delta(env, pool_id, &mut pool, -payout)?;
    clear(env, pool_id, user);

    token::Client::new(env, &config.token).transfer(
        &env.current_contract_address(),
        user,
        &payout,
    );

    events::unstake(env, user, pool_id, payout);

    Ok(payout)
}

/// Balance of `user` in `pool_id` at `now`, pending interest included.
pub fn stake_of_auto(
    env: &Env,
    pool_id: u32,
    user: &Address,
    now: u64,
) -> Result<i128, StakingError> {
    let pool = pool::load(env, pool_id)?;
    let stake = load(env, pool_id, user);
    if stake.amount == 0 {
        return Ok(0);
    }
    Ok(realized_balance(&pool, &stake, now))
}
