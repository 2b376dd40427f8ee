//! Audit events published by the staking contract.
//!
//! Each event is published under a single short topic with a typed payload.

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

pub const NEW_POOL: Symbol = symbol_short!("new_pool");
pub const PAUSE_POOL: Symbol = symbol_short!("pause");
pub const NEW_REFERRER_REWARD: Symbol = symbol_short!("ref_rwd");
pub const NEW_TREASURY: Symbol = symbol_short!("treasury");
pub const STAKE: Symbol = symbol_short!("stake");
pub const RESTAKE: Symbol = symbol_short!("restake");
pub const NEW_REFERRAL: Symbol = symbol_short!("referral");
pub const UNSTAKE: Symbol = symbol_short!("unstake");

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NewPoolEvent {
    pub pool_id: u32,
    pub annual_yield_bps: u32,
    pub lock_period: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PausePoolEvent {
    pub pool_id: u32,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReferrerRewardEvent {
    pub percentage: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TreasuryEvent {
    pub treasury: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakeEvent {
    pub user: Address,
    pub pool_id: u32,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RestakeEvent {
    pub user: Address,
    pub pool_id: u32,
    pub gain: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReferralEvent {
    pub user: Address,
    pub referrer: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnstakeEvent {
    pub user: Address,
    pub pool_id: u32,
    pub amount: i128,
}

pub fn new_pool(env: &Env, pool_id: u32, annual_yield_bps: u32, lock_period: u64) {
    let event = NewPoolEvent {
        pool_id,
        annual_yield_bps,
        lock_period,
    };
    env.events().publish((NEW_POOL,), event);
}

pub fn pause_pool(env: &Env, pool_id: u32, timestamp: u64) {
    env.events()
        .publish((PAUSE_POOL,), PausePoolEvent { pool_id, timestamp });
}

pub fn referrer_reward(env: &Env, percentage: u32) {
    env.events()
        .publish((NEW_REFERRER_REWARD,), ReferrerRewardEvent { percentage });
}

pub fn treasury(env: &Env, treasury: &Address) {
    let event = TreasuryEvent {
        treasury: treasury.clone(),
    };
    env.events().publish((NEW_TREASURY,), event);
}

pub fn stake(env: &Env, user: &Address, pool_id: u32, amount: i128) {
    let event = StakeEvent {
        user: user.clone(),
        pool_id,
        amount,
    };
    env.events().publish((STAKE,), event);
}

pub fn restake(env: &Env, user: &Address, pool_id: u32, gain: i128) {
    let event = RestakeEvent {
        user: user.clone(),
        pool_id,
        gain,
    };
    env.events().publish((RESTAKE,), event);
}

pub fn new_referral(env: &Env, user: &Address, referrer: &Address) {
    let event = ReferralEvent {
        user: user.clone(),
        referrer: referrer.clone(),
    };
    env.events().publish((NEW_REFERRAL,), event);
}

pub fn unstake(env: &Env, user: &Address, pool_id: u32, amount: i128) {
    let event = UnstakeEvent {
        user: user.clone(),
        pool_id,
        amount,
    };
    env.events().publish((UNSTAKE,), event);
}
