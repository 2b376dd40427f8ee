#![cfg(test)]
use super::*;

const UNIT: i128 = 100_000_000; // 8 decimals
const T: u64 = COMPOUND_PERIOD;

#[test]
fn test_constants() {
    assert_eq!(SECONDS_PER_YEAR, 31_557_600);
    assert_eq!(COMPOUND_PERIOD, 2_629_800);
    assert_eq!(DEFAULT_REFERRER_REWARD_PCT, 20);

    let schedule = YieldSchedule::default();
    assert_eq!(schedule.year_length, SECONDS_PER_YEAR);
    assert_eq!(schedule.compound_period, COMPOUND_PERIOD);
    assert_eq!(schedule.bps_denominator, 10000);
}

#[test]
fn test_zero_elapsed_returns_principal() {
    assert_eq!(compound_balance(1000 * UNIT, 1200, 0), 1000 * UNIT);
    assert_eq!(compound_balance(0, 1200, 10 * T), 0);
}

#[test]
fn test_simple_interest_inside_first_period() {
    assert_eq!(compound_balance(1000 * UNIT, 1200, T / 2), 100_499_999_999);
    // The elapsed share of the period is cut to nine decimals first.
    assert_eq!(compound_balance(1000 * UNIT, 1200, T - 1), 100_999_999_618);
}

#[test]
fn test_compounding_drift_matches_reference() {
    let principal = 1000 * UNIT;
    assert_eq!(compound_balance(principal, 1200, T), 1010 * UNIT - 1);
    assert_eq!(compound_balance(principal, 1200, 2 * T + T / 2), 102_520_050_000 - 1);
    assert_eq!(compound_balance(principal, 1200, 3 * T), 103_030_100_000 - 1);
    assert_eq!(compound_balance(principal, 1200, 10 * T), 110_462_212_542 - 1);
}

#[test]
fn test_other_yields() {
    assert_eq!(compound_balance(100 * UNIT, 1550, 2 * T), 10_260_001_736);
    assert_eq!(compound_balance(20_260_001_736, 1550, 2 * T + T / 2), 20_921_013_157);
    assert_eq!(
        compound_balance(100 * UNIT, 2000, 3 * T + T / 2) - 100 * UNIT,
        595_949_459
    );
    assert_eq!(compound_balance(100 * UNIT, 2400, T) - 100 * UNIT, 2 * UNIT - 1);
}

#[test]
fn test_balance_is_monotonic_in_time() {
    let mut previous = 0;
    for step in 0..40u64 {
        let balance = compound_balance(1000 * UNIT, 3000, step * T / 4);
        assert!(balance >= previous);
        previous = balance;
    }
}

#[test]
fn test_degenerate_schedule_returns_principal() {
    assert_eq!(current_balance(1000 * UNIT, 1200, T, 0, SECONDS_PER_YEAR), 1000 * UNIT);
    assert_eq!(current_balance(1000 * UNIT, 1200, T, T, 0), 1000 * UNIT);
}

#[test]
fn test_huge_balances_saturate() {
    let balance = current_balance(i128::MAX / 2, 100_000, 1_000 * T, T, SECONDS_PER_YEAR);
    assert_eq!(balance, i128::MAX);
}

#[test]
fn test_helpers() {
    assert!(validate_positive_amount(1));
    assert!(!validate_positive_amount(0));
    assert!(validate_percentage(100));
    assert!(!validate_percentage(101));
    assert!(!validate_yield(0));
    assert_eq!(percentage_of(150_499_999, 20), 30_099_999);
    assert_eq!(elapsed_seconds(10, 4), 0);
    assert_eq!(elapsed_seconds(4, 10), 6);
}
