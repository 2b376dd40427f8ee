//! Pool registry: append-only, dense ids starting at 0.

use soroban_sdk::Env;
use yieldpool_shared::validate_yield;

use crate::{DataKey, Pool, StakingError};

pub fn count(env: &Env) -> u32 {
    env.storage().instance().get(&DataKey::PoolCount).unwrap_or(0)
}

pub fn load(env: &Env, pool_id: u32) -> Result<Pool, StakingError> {
    env.storage()
        .persistent()
        .get(&DataKey::Pool(pool_id))
        .ok_or(StakingError::PoolNotFound)
}

pub fn save(env: &Env, pool_id: u32, pool: &Pool) {
    env.storage().persistent().set(&DataKey::Pool(pool_id), pool);
}

pub fn ensure_valid_yield(annual_yield_bps: u32) -> Result<(), StakingError> {
    if !validate_yield(annual_yield_bps) {
        return Err(StakingError::ZeroYield);
    }
    Ok(())
}

pub fn add(env: &Env, annual_yield_bps: u32, lock_period: u64) -> Result<u32, StakingError> {
    let pool_id = count(env);
    let next = pool_id.checked_add(1).ok_or(StakingError::NumericOverflow)?;

    let pool = Pool {
        paused: false,
        lock_period,
        annual_yield_bps,
        total_stake: 0,
        paused_at: 0,
    };

    save(env, pool_id, &pool);
    env.storage().instance().set(&DataKey::PoolCount, &next);

    Ok(pool_id)
}

/// Overwrite yield and lock period in place.
///
/// Stakes that have not synced since the change accrue their whole pending
/// interval at the new yield.
pub fn change(
    env: &Env,
    pool_id: u32,
    annual_yield_bps: u32,
    lock_period: u64,
) -> Result<(), StakingError> {
    let mut pool = load(env, pool_id)?;
    pool.annual_yield_bps = annual_yield_bps;
    pool.lock_period = lock_period;
    save(env, pool_id, &pool);
    Ok(())
}

pub fn pause(env: &Env, pool_id: u32, now: u64) -> Result<(), StakingError> {
    let mut pool = load(env, pool_id)?;
    if pool.paused {
        return Err(StakingError::PoolAlreadyPaused);
    }
    pool.paused = true;
    pool.paused_at = now;
    save(env, pool_id, &pool);
    Ok(())
}

/// End of the accrual window: interest stops the instant a pool is paused.
pub fn accrual_end(pool: &Pool, now: u64) -> u64 {
    if pool.paused {
        pool.paused_at
    } else {
        now
    }
}
