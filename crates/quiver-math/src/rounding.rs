//! Decimal-exact rounding for presentation values.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Rounds to `dp` decimal places, midpoints away from zero.
///
/// The value is converted through its shortest round-trip decimal string
/// first, so `1.005` rounds to `1.01` even though its binary form is
/// slightly below the midpoint.
/// Non-finite values and values outside the `Decimal` range are returned
/// unchanged.
#[must_use]
pub fn round_dp(value: f64, dp: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    Decimal::from_str(&value.to_string())
        .ok()
        .or_else(|| Decimal::from_f64(value))
        .map(|d| d.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|d| d.to_f64())
        .unwrap_or(value)
}

/// Rounds to 2 decimal places.
#[must_use]
pub fn round2(value: f64) -> f64 {
    round_dp(value, 2)
}

/// Rounds an optional value to 2 decimal places.
#[must_use]
pub fn round2_opt(value: Option<f64>) -> Option<f64> {
    value.map(round2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_dp() {
        assert_eq!(round2(1.005), 1.01);
        assert_eq!(round2(-1.005), -1.01);
        assert_eq!(round2(2.344), 2.34);
        assert_eq!(round_dp(0.123456, 4), 0.1235);
        assert_eq!(round2(10.0), 10.0);
    }

    #[test]
    fn test_round_passthrough() {
        assert!(round2(f64::NAN).is_nan());
        assert_eq!(round2(f64::INFINITY), f64::INFINITY);
        assert_eq!(round2_opt(None), None);
        assert_eq!(round2_opt(Some(0.125)), Some(0.13));
    }
}
