#![no_std]
use soroban_sdk::contracttype;

/// Shared constants, types and arithmetic used across YieldPool contracts.
///
/// The compounding engine lives in [`accrual`] so that it can be exercised
/// without a contract environment.
pub mod accrual;

pub use accrual::{compound_balance, current_balance, period_rate};

// ============================================================================
// Constants
// ============================================================================

/// Basis points representing 100% (10000 basis points = 100%)
pub const MAX_BASIS_POINTS: i128 = 10000;

/// Upper bound for a percentage value (100 = 100%)
pub const MAX_PERCENTAGE: u32 = 100;

/// Seconds in a year (365.25 days)
pub const SECONDS_PER_YEAR: u64 = 31_557_600;

/// Interval at which unrealized interest is folded into principal (1/12 year)
pub const COMPOUND_PERIOD: u64 = SECONDS_PER_YEAR / 12;

/// Referral commission taken from realized gains unless changed by an admin
pub const DEFAULT_REFERRER_REWARD_PCT: u32 = 20;

/// Referral id permanently bound to the treasury
pub const TREASURY_REFERRAL_ID: u64 = 0;

// ============================================================================
// Types
// ============================================================================

/// Timing constants the compounding engine runs on, exposed for clients.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct YieldSchedule {
    pub year_length: u64,
    pub compound_period: u64,
    pub bps_denominator: u32,
}

impl Default for YieldSchedule {
    fn default() -> Self {
        Self {
            year_length: SECONDS_PER_YEAR,
            compound_period: COMPOUND_PERIOD,
            bps_denominator: MAX_BASIS_POINTS as u32,
        }
    }
}

// ============================================================================
// Utility Functions for Validation and Conversion
// ============================================================================

/// Validate that an amount is positive
pub fn validate_positive_amount(amount: i128) -> bool {
    amount > 0
}

/// Validate that a percentage is within valid range (0-100%)
pub fn validate_percentage(percentage: u32) -> bool {
    percentage <= MAX_PERCENTAGE
}

/// Validate that an annual yield can back a pool
pub fn validate_yield(annual_yield_bps: u32) -> bool {
    annual_yield_bps != 0
}

/// Truncating share of `amount` at `percentage` percent
pub fn percentage_of(amount: i128, percentage: u32) -> i128 {
    amount.saturating_mul(percentage as i128) / MAX_PERCENTAGE as i128
}

/// Seconds between two timestamps, zero when `end` is not after `start`
pub fn elapsed_seconds(start: u64, end: u64) -> u64 {
    end.saturating_sub(start)
}

#[cfg(test)]
mod test;
