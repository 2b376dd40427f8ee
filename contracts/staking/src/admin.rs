//! Admin role set guarding configuration changes.

use soroban_sdk::{Address, Env};

use crate::{DataKey, StakingError};

pub fn is_admin(env: &Env, account: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&DataKey::Admin(account.clone()))
        .unwrap_or(false)
}

/// Guard: reject `caller` unless it holds the admin role.
///
/// Callers authenticate through `require_auth` before this runs.
pub fn require_admin(env: &Env, caller: &Address) -> Result<(), StakingError> {
    if !is_admin(env, caller) {
        return Err(StakingError::Unauthorized);
    }
    Ok(())
}

pub fn grant(env: &Env, account: &Address) {
    env.storage()
        .persistent()
        .set(&DataKey::Admin(account.clone()), &true);
}

pub fn revoke(env: &Env, account: &Address) {
    env.storage()
        .persistent()
        .remove(&DataKey::Admin(account.clone()));
}
