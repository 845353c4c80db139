//! Decimal ratio helpers shared by day and month aggregates.
//!
//! All ratios round half-up (midpoint away from zero) and carry exactly the
//! requested scale, so `0.4` at scale 8 renders as `0.40000000`.

use crate::error::{Error, Result};
use rust_decimal::{Decimal, RoundingStrategy};

/// Scale used for every percentage ratio.
pub const PCT_SCALE: u32 = 5;

/// Largest scale a `Decimal` can carry.
pub const MAX_MATH_SCALE: u32 = 28;

/// Round half-up to `scale` places and pad to exactly that scale.
pub fn round_half_up(value: Decimal, scale: u32) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(scale);
    rounded
}

/// Zero at the given scale.
pub fn scaled_zero(scale: u32) -> Decimal {
    let mut zero = Decimal::ZERO;
    zero.rescale(scale);
    zero
}

/// `numerator / denominator` rounded half-up to `scale`.
///
/// Fails when the denominator is zero or the quotient overflows.
pub fn checked_ratio(numerator: Decimal, denominator: Decimal, scale: u32) -> Result<Decimal> {
    if denominator.is_zero() {
        return Err(Error::division_by_zero(format!(
            "{} / {}",
            numerator, denominator
        )));
    }
    numerator
        .checked_div(denominator)
        .map(|q| round_half_up(q, scale))
        .ok_or_else(|| Error::overflow(format!("{} / {}", numerator, denominator)))
}

/// Like [`checked_ratio`] but substitutes zero (at `scale`) on failure.
pub fn ratio(numerator: Decimal, denominator: Decimal, scale: u32) -> Decimal {
    checked_ratio(numerator, denominator, scale).unwrap_or_else(|_| scaled_zero(scale))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_round_half_up_pads_scale() {
        assert_eq!(round_half_up(dec("0.4"), 8).to_string(), "0.40000000");
        assert_eq!(round_half_up(dec("2"), 2).to_string(), "2.00");
    }

    #[test]
    fn test_round_half_up_midpoint() {
        assert_eq!(round_half_up(dec("0.123455"), 5).to_string(), "0.12346");
        assert_eq!(round_half_up(dec("0.123445"), 5).to_string(), "0.12345");
        assert_eq!(round_half_up(dec("-0.5"), 0).to_string(), "-1");
    }

    #[test]
    fn test_ratio_thirds() {
        assert_eq!(ratio(dec("1"), dec("3"), PCT_SCALE).to_string(), "0.33333");
        assert_eq!(ratio(dec("2"), dec("3"), PCT_SCALE).to_string(), "0.66667");
    }

    #[test]
    fn test_ratio_zero_denominator() {
        assert_eq!(ratio(dec("5"), Decimal::ZERO, PCT_SCALE), Decimal::ZERO);
        assert_eq!(ratio(dec("5"), Decimal::ZERO, PCT_SCALE).to_string(), "0.00000");
    }

    #[test]
    fn test_checked_ratio_zero_denominator() {
        let err = checked_ratio(dec("5"), Decimal::ZERO, 8).unwrap_err();
        assert!(matches!(err, Error::DivisionByZero(_)));
    }
}
