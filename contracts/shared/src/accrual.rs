//! Compound accrual engine.
//!
//! Balances grow once per compound period by `period_rate`, truncated after
//! every period, and linearly inside the last unfinished period. The elapsed
//! share of that period is itself truncated to nine decimals. The growth
//! factor is carried as an 18-decimal fixed-point value and only converted
//! back to token units at the very end, so rounding shows up in the last
//! smallest unit rather than compounding per period.

use crate::{COMPOUND_PERIOD, MAX_BASIS_POINTS, SECONDS_PER_YEAR};

/// Scale of the growth factor and of the per-period rate.
pub const WAD: u128 = 1_000_000_000_000_000_000;

/// Scale of the per-second rate the period rate is derived from.
pub const RAY: u128 = 1_000_000_000_000_000_000_000_000_000;

/// Precision of the elapsed share of an unfinished period.
pub const PERIOD_FRACTION_SCALE: u128 = 1_000_000_000;

/// Growth per compound period as a `WAD` fraction.
///
/// `annual_yield_bps * compound_period / (10000 * year_length)`, with the
/// per-second rate truncated at `RAY` precision first.
pub fn period_rate(annual_yield_bps: u32, compound_period: u64, year_length: u64) -> u128 {
    if year_length == 0 {
        return 0;
    }
    let per_second = (annual_yield_bps as u128).saturating_mul(RAY)
        / (MAX_BASIS_POINTS as u128 * year_length as u128);
    per_second.saturating_mul(compound_period as u128) / (RAY / WAD)
}

/// Balance of `principal` after `elapsed` seconds at `annual_yield_bps`.
///
/// Never fails: zero elapsed time, non-positive principals and degenerate
/// timing parameters return `principal` unchanged, and results beyond the
/// `i128` range saturate.
pub fn current_balance(
    principal: i128,
    annual_yield_bps: u32,
    elapsed: u64,
    compound_period: u64,
    year_length: u64,
) -> i128 {
    if principal <= 0 || elapsed == 0 || compound_period == 0 || year_length == 0 {
        return principal;
    }

    let rate = period_rate(annual_yield_bps, compound_period, year_length);
    if rate == 0 {
        return principal;
    }

    let full_periods = elapsed / compound_period;
    let remainder = elapsed % compound_period;

    let mut factor = WAD;
    for _ in 0..full_periods {
        factor = factor.saturating_add(mul_wad(factor, rate));
        if factor == u128::MAX {
            break;
        }
    }

    let fraction = remainder as u128 * PERIOD_FRACTION_SCALE / compound_period as u128;
    let partial_rate = rate.saturating_mul(fraction) / PERIOD_FRACTION_SCALE;
    factor = factor.saturating_add(mul_wad(factor, partial_rate));

    i128::try_from(mul_wad(principal as u128, factor)).unwrap_or(i128::MAX)
}

/// [`current_balance`] on the ledger's year length and compound period.
pub fn compound_balance(principal: i128, annual_yield_bps: u32, elapsed: u64) -> i128 {
    current_balance(
        principal,
        annual_yield_bps,
        elapsed,
        COMPOUND_PERIOD,
        SECONDS_PER_YEAR,
    )
}

/// `floor(a * b / WAD)` without the intermediate product overflowing.
fn mul_wad(a: u128, b: u128) -> u128 {
    let (a_hi, a_lo) = (a / WAD, a % WAD);
    let (b_hi, b_lo) = (b / WAD, b % WAD);
    a_hi.saturating_mul(b_hi)
        .saturating_mul(WAD)
        .saturating_add(a_hi.saturating_mul(b_lo))
        .saturating_add(a_lo.saturating_mul(b_hi))
        .saturating_add(a_lo * b_lo / WAD)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mul_wad_is_exact_floor() {
        assert_eq!(mul_wad(3 * WAD, WAD / 2), 3 * WAD / 2);
        assert_eq!(mul_wad(WAD + 1, WAD - 1), WAD - 1);
        assert_eq!(mul_wad(7, 3), 0);
        assert_eq!(mul_wad(u128::MAX, 2 * WAD), u128::MAX);
    }

    #[test]
    fn period_rate_truncates_per_second_rate() {
        // 12% a year over a twelfth of a year lands one unit under 1%.
        assert_eq!(
            period_rate(1200, COMPOUND_PERIOD, SECONDS_PER_YEAR),
            WAD / 100 - 1
        );
        assert_eq!(period_rate(1200, COMPOUND_PERIOD, 0), 0);
    }
}
