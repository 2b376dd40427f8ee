//! Referral registry.
//!
//! Every staker gets a compact numeric id on first deposit (1, 2, 3, ...),
//! id 0 always names the current treasury. A staker's referrer is bound on
//! their first deposit and never changes afterwards.

use soroban_sdk::{Address, Env};
use yieldpool_shared::TREASURY_REFERRAL_ID;

use crate::{DataKey, StakingError};

const FIRST_USER_ID: u64 = 1;

pub fn initialize(env: &Env, treasury: &Address) {
    env.storage()
        .instance()
        .set(&DataKey::NextReferralId, &FIRST_USER_ID);
    set_treasury(env, treasury);
}

pub fn set_treasury(env: &Env, treasury: &Address) {
    env.storage()
        .persistent()
        .set(&DataKey::IdToAddress(TREASURY_REFERRAL_ID), treasury);
}

pub fn treasury(env: &Env) -> Result<Address, StakingError> {
    address_of(env, TREASURY_REFERRAL_ID).ok_or(StakingError::NotInitialized)
}

pub fn address_of(env: &Env, id: u64) -> Option<Address> {
    env.storage().persistent().get(&DataKey::IdToAddress(id))
}

pub fn id_of(env: &Env, user: &Address) -> Option<u64> {
    env.storage()
        .persistent()
        .get(&DataKey::AddressToId(user.clone()))
}

/// Id the user's commissions are paid to. Fallback bindings hold id 0.
fn referrer_id_of(env: &Env, user: &Address) -> Option<u64> {
    env.storage()
        .persistent()
        .get(&DataKey::UserReferrer(user.clone()))
}

/// Current recipient of `user`'s commissions, if a referrer is bound.
///
/// Users bound to the treasury follow id 0, so they pay whichever address
/// holds the treasury today.
pub fn referrer_of(env: &Env, user: &Address) -> Option<Address> {
    referrer_id_of(env, user).and_then(|id| address_of(env, id))
}

/// Assign the next id to `user` unless it already has one. Returns the id.
pub fn register_if_absent(env: &Env, user: &Address) -> Result<u64, StakingError> {
    if let Some(id) = id_of(env, user) {
        return Ok(id);
    }

    let id: u64 = env
        .storage()
        .instance()
        .get(&DataKey::NextReferralId)
        .unwrap_or(FIRST_USER_ID);
    let next = id.checked_add(1).ok_or(StakingError::NumericOverflow)?;

    env.storage()
        .persistent()
        .set(&DataKey::AddressToId(user.clone()), &id);
    env.storage().persistent().set(&DataKey::IdToAddress(id), user);
    env.storage().instance().set(&DataKey::NextReferralId, &next);

    Ok(id)
}

/// Bind `caller`'s referrer from `candidate_id` unless one is already bound.
///
/// Returns the effective referrer and whether the binding was created by this
/// call. Id 0, unassigned ids and the caller's own id bind to the treasury id.
pub fn resolve_referrer(
    env: &Env,
    candidate_id: u64,
    caller: &Address,
) -> Result<(Address, bool), StakingError> {
    if referrer_id_of(env, caller).is_some() {
        return Ok((payout_address(env, caller)?, false));
    }

    let referrer_id = match address_of(env, candidate_id) {
        Some(candidate) if candidate_id != TREASURY_REFERRAL_ID && candidate != *caller => {
            candidate_id
        }
        _ => TREASURY_REFERRAL_ID,
    };

    env.storage()
        .persistent()
        .set(&DataKey::UserReferrer(caller.clone()), &referrer_id);

    Ok((payout_address(env, caller)?, true))
}

/// Recipient of commissions on `user`'s gains.
pub fn payout_address(env: &Env, user: &Address) -> Result<Address, StakingError> {
    match referrer_of(env, user) {
        Some(referrer) => Ok(referrer),
        None => treasury(env),
    }
}
