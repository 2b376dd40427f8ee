#![no_std]
use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, log, token, Address, Env,
};
use yieldpool_shared::{
    validate_percentage, validate_positive_amount, YieldSchedule, DEFAULT_REFERRER_REWARD_PCT,
};

mod admin;
pub mod events;
mod ledger;
mod pool;
mod referral;
mod storage;

// Data Types
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pool {
    pub paused: bool,
    pub lock_period: u64,
    pub annual_yield_bps: u32,
    pub total_stake: i128,
    pub paused_at: u64,
}

/// A user's position in one pool. An all-zero record means "no stake".
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct StakeInfo {
    pub amount: i128, // Principal plus interest realized at the last sync
    pub last_sync: u64,
    pub unlock_time: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakingConfig {
    pub token: Address,
    pub referrer_reward_pct: u32, // Share of realized gains paid to referrers
}

// Storage Keys
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Config,
    Admin(Address),
    PoolCount,
    Pool(u32),
    Stake(u32, Address),
    TotalStaked,
    NextReferralId,
    IdToAddress(u64),
    AddressToId(Address),
    UserReferrer(Address), // Referral id, 0 follows the treasury
}

// Error Types
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum StakingError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    ZeroYield = 4,
    InvalidReferrerReward = 5,
    InvalidAmount = 6,
    PoolNotFound = 7,
    PoolAlreadyPaused = 8,
    PoolPaused = 9,
    NoStake = 10,
    StakeLocked = 11,
    InsufficientReserve = 12,
    StakingTokenLocked = 13,
    NumericOverflow = 14,
}

#[contract]
pub struct StakingContract;

#[contractimpl]
impl StakingContract {
    /// Initialize the staking contract
    ///
    /// `admin` receives the admin role, `token` is the staked asset and
    /// `treasury` is bound to referral id 0.
    pub fn initialize(
        env: Env,
        admin: Address,
        token: Address,
        treasury: Address,
    ) -> Result<(), StakingError> {
        // Check if already initialized
        if storage::has_config(&env) {
            return Err(StakingError::AlreadyInitialized);
        }

        admin.require_auth();

        let config = StakingConfig {
            token,
            referrer_reward_pct: DEFAULT_REFERRER_REWARD_PCT,
        };

        storage::set_config(&env, &config);
        storage::set_total_staked(&env, 0);
        admin::grant(&env, &admin);
        referral::initialize(&env, &treasury);

        log!(&env, "Staking contract initialized by admin: {}", admin);

        Ok(())
    }

    // ------------------------------------------------------------------
    // Staking
    // ------------------------------------------------------------------

    /// Deposit `amount` into `pool_id`, compounding any pending interest first.
    ///
    /// `referrer_id` only matters on the user's first deposit; unknown ids and
    /// the user's own id fall back to the treasury.
    pub fn stake(
        env: Env,
        user: Address,
        pool_id: u32,
        amount: i128,
        referrer_id: u64,
    ) -> Result<(), StakingError> {
        user.require_auth();

        let config = storage::config(&env)?;
        let now = env.ledger().timestamp();

        ledger::stake(&env, &config, &user, pool_id, amount, referrer_id, now)?;

        log!(&env, "User {} staked {} into pool {}", user, amount, pool_id);

        Ok(())
    }

    /// Withdraw up to `amount` once the lock has elapsed; `i128::MAX` withdraws
    /// everything. Returns the amount paid to the user.
    pub fn unstake(
        env: Env,
        user: Address,
        pool_id: u32,
        amount: i128,
    ) -> Result<i128, StakingError> {
        user.require_auth();

        let config = storage::config(&env)?;
        let now = env.ledger().timestamp();

        let withdrawn = ledger::unstake(&env, &config, &user, pool_id, amount, now)?;

        log!(&env, "User {} unstaked {} from pool {}", user, withdrawn, pool_id);

        Ok(withdrawn)
    }

    /// Withdraw the recorded principal without realizing pending interest or
    /// paying a referral commission.
    pub fn emergency_unstake(env: Env, user: Address, pool_id: u32) -> Result<i128, StakingError> {
        user.require_auth();

        let config = storage::config(&env)?;
        let now = env.ledger().timestamp();

        let withdrawn = ledger::emergency_unstake(&env, &config, &user, pool_id, now)?;

        log!(&env, "User {} emergency unstaked {} from pool {}", user, withdrawn, pool_id);

        Ok(withdrawn)
    }

    // ------------------------------------------------------------------
    // Administration
    // ------------------------------------------------------------------

    /// Append a pool and return its id
    pub fn add_pool(
        env: Env,
        caller: Address,
        annual_yield_bps: u32,
        lock_period: u64,
    ) -> Result<u32, StakingError> {
        caller.require_auth();
        storage::config(&env)?;

        pool::ensure_valid_yield(annual_yield_bps)?;
        admin::require_admin(&env, &caller)?;

        let pool_id = pool::add(&env, annual_yield_bps, lock_period)?;
        events::new_pool(&env, pool_id, annual_yield_bps, lock_period);

        log!(&env, "Pool {} added: {} bps, lock {}", pool_id, annual_yield_bps, lock_period);

        Ok(pool_id)
    }

    /// Overwrite yield and lock period of an existing pool
    pub fn change_pool(
        env: Env,
        caller: Address,
        pool_id: u32,
        annual_yield_bps: u32,
        lock_period: u64,
    ) -> Result<(), StakingError> {
        caller.require_auth();
        storage::config(&env)?;

        pool::ensure_valid_yield(annual_yield_bps)?;
        admin::require_admin(&env, &caller)?;

        pool::change(&env, pool_id, annual_yield_bps, lock_period)?;

        log!(&env, "Pool {} changed: {} bps, lock {}", pool_id, annual_yield_bps, lock_period);

        Ok(())
    }

    /// Stop deposits into a pool and freeze its accrual at the current time
    pub fn pause_pool(env: Env, caller: Address, pool_id: u32) -> Result<(), StakingError> {
        caller.require_auth();
        storage::config(&env)?;
        admin::require_admin(&env, &caller)?;

        let now = env.ledger().timestamp();
        pool::pause(&env, pool_id, now)?;
        events::pause_pool(&env, pool_id, now);

        log!(&env, "Pool {} paused at {}", pool_id, now);

        Ok(())
    }

    /// Admin function to update the referral commission percentage
    pub fn set_referrer_reward(
        env: Env,
        caller: Address,
        percentage: u32,
    ) -> Result<(), StakingError> {
        caller.require_auth();

        let mut config = storage::config(&env)?;
        admin::require_admin(&env, &caller)?;

        if !validate_percentage(percentage) {
            return Err(StakingError::InvalidReferrerReward);
        }

        config.referrer_reward_pct = percentage;
        storage::set_config(&env, &config);
        events::referrer_reward(&env, percentage);

        log!(&env, "Referrer reward updated to: {}", percentage);

        Ok(())
    }

    /// Rebind referral id 0. Referrers bound earlier keep their address.
    pub fn set_treasury(env: Env, caller: Address, treasury: Address) -> Result<(), StakingError> {
        caller.require_auth();
        storage::config(&env)?;
        admin::require_admin(&env, &caller)?;

        referral::set_treasury(&env, &treasury);
        events::treasury(&env, &treasury);

        log!(&env, "Treasury updated to: {}", treasury);

        Ok(())
    }

    /// Recover tokens sent to the contract by mistake. The staking token backs
    /// user balances and can never be swept.
    pub fn sweep_stuck_token(
        env: Env,
        caller: Address,
        stuck_token: Address,
        amount: i128,
    ) -> Result<(), StakingError> {
        caller.require_auth();

        let config = storage::config(&env)?;
        if stuck_token == config.token {
            return Err(StakingError::StakingTokenLocked);
        }
        admin::require_admin(&env, &caller)?;

        if !validate_positive_amount(amount) {
            return Err(StakingError::InvalidAmount);
        }

        token::Client::new(&env, &stuck_token).transfer(
            &env.current_contract_address(),
            &caller,
            &amount,
        );

        log!(&env, "Swept {} of token {} to {}", amount, stuck_token, caller);

        Ok(())
    }

    pub fn grant_admin(env: Env, caller: Address, account: Address) -> Result<(), StakingError> {
        caller.require_auth();
        storage::config(&env)?;
        admin::require_admin(&env, &caller)?;

        admin::grant(&env, &account);

        log!(&env, "Admin role granted to {} by {}", account, caller);

        Ok(())
    }

    pub fn revoke_admin(env: Env, caller: Address, account: Address) -> Result<(), StakingError> {
        caller.require_auth();
        storage::config(&env)?;
        admin::require_admin(&env, &caller)?;

        admin::revoke(&env, &account);

        log!(&env, "Admin role revoked from {} by {}", account, caller);

        Ok(())
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Get contract configuration
    pub fn get_config(env: Env) -> Result<StakingConfig, StakingError> {
        storage::config(&env)
    }

    pub fn pool_info(env: Env, pool_id: u32) -> Result<Pool, StakingError> {
        pool::load(&env, pool_id)
    }

    pub fn pool_count(env: Env) -> u32 {
        pool::count(&env)
    }

    /// Stored stake record; all zero when the user has no stake
    pub fn stake_of(env: Env, pool_id: u32, user: Address) -> StakeInfo {
        ledger::load(&env, pool_id, &user)
    }

    /// Current balance including interest not yet realized
    pub fn stake_of_auto(env: Env, pool_id: u32, user: Address) -> Result<i128, StakingError> {
        let now = env.ledger().timestamp();
        ledger::stake_of_auto(&env, pool_id, &user, now)
    }

    pub fn referrer_of(env: Env, user: Address) -> Option<Address> {
        referral::referrer_of(&env, &user)
    }

    pub fn address_of_id(env: Env, id: u64) -> Option<Address> {
        referral::address_of(&env, id)
    }

    pub fn id_of(env: Env, user: Address) -> Option<u64> {
        referral::id_of(&env, &user)
    }

    pub fn referrer_reward(env: Env) -> Result<u32, StakingError> {
        Ok(storage::config(&env)?.referrer_reward_pct)
    }

    pub fn yield_schedule(_env: Env) -> YieldSchedule {
        YieldSchedule::default()
    }

    pub fn token(env: Env) -> Result<Address, StakingError> {
        Ok(storage::config(&env)?.token)
    }

    pub fn treasury(env: Env) -> Result<Address, StakingError> {
        referral::treasury(&env)
    }

    /// Sum of every pool's stake, i.e. what the contract owes its stakers
    pub fn total_staked(env: Env) -> i128 {
        storage::total_staked(&env)
    }

    pub fn is_admin(env: Env, account: Address) -> bool {
        admin::is_admin(&env, &account)
    }
}
