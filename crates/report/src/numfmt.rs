//! Number formatting for the human-readable report.
//!
//! Values are rounded half-even (banker's rounding) to the maximum number of
//! fraction digits, trailing zeros are dropped down to the minimum, and the
//! integer part gets comma thousands separators.

use rust_decimal::{Decimal, RoundingStrategy};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Insert comma separators into the integer part of a plain decimal string.
pub fn group_thousands(formatted: &str) -> String {
    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match fraction {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}

/// Round to at most `max_frac` places and show at least `min_frac`.
pub fn format_decimal(value: Decimal, min_frac: u32, max_frac: u32) -> String {
    let mut rounded = value
        .round_dp_with_strategy(max_frac, RoundingStrategy::MidpointNearestEven)
        .normalize();
    if rounded.scale() < min_frac {
        rounded.rescale(min_frac);
    }
    group_thousands(&rounded.to_string())
}

/// Whole shares: `1,234,567`.
pub fn shares(value: Decimal) -> String {
    format_decimal(value, 0, 0)
}

/// Dollars to the cent: `$1,234.50`.
pub fn usd(value: Decimal) -> String {
    dollar(format_decimal(value, 2, 2))
}

/// Dollars with three to six places, for sub-penny prices: `$0.000442`.
pub fn usd_precise(value: Decimal) -> String {
    dollar(format_decimal(value, 3, 6))
}

/// Fraction as a percentage with one to three places: `41.667%`.
pub fn percent(fraction: Decimal) -> String {
    format!("{}%", format_decimal(fraction * HUNDRED, 1, 3))
}

/// Fraction as a percentage with exactly one place: `41.7%`.
pub fn percent_short(fraction: Decimal) -> String {
    format!("{}%", format_decimal(fraction * HUNDRED, 1, 1))
}

fn dollar(formatted: String) -> String {
    match formatted.strip_prefix('-') {
        Some(rest) => format!("-${}", rest),
        None => format!("${}", formatted),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("0"), "0");
        assert_eq!(group_thousands("123"), "123");
        assert_eq!(group_thousands("1000"), "1,000");
        assert_eq!(group_thousands("1234567"), "1,234,567");
        assert_eq!(group_thousands("-1234.56"), "-1,234.56");
        assert_eq!(group_thousands("123456.789"), "123,456.789");
    }

    #[test]
    fn test_shares() {
        assert_eq!(shares(dec("6000")), "6,000");
        assert_eq!(shares(dec("0")), "0");
        assert_eq!(shares(dec("1234567.5")), "1,234,568");
        assert_eq!(shares(dec("2.5")), "2");
    }

    #[test]
    fn test_usd() {
        assert_eq!(usd(dec("2.6500")), "$2.65");
        assert_eq!(usd(dec("0.4")), "$0.40");
        assert_eq!(usd(dec("1234567.891")), "$1,234,567.89");
        assert_eq!(usd(dec("0")), "$0.00");
        assert_eq!(usd(dec("-3.5")), "-$3.50");
    }

    #[test]
    fn test_usd_precise() {
        assert_eq!(usd_precise(dec("0.00044167")), "$0.000442");
        assert_eq!(usd_precise(dec("0.40000000")), "$0.400");
        assert_eq!(usd_precise(dec("1234.5")), "$1,234.500");
        assert_eq!(usd_precise(dec("0.0000005")), "$0.000");
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent(dec("0.41667")), "41.667%");
        assert_eq!(percent(dec("0.25000")), "25.0%");
        assert_eq!(percent(dec("0.47170")), "47.17%");
        assert_eq!(percent(dec("0")), "0.0%");
        assert_eq!(percent(dec("1")), "100.0%");
    }

    #[test]
    fn test_percent_short() {
        assert_eq!(percent_short(dec("0.41667")), "41.7%");
        assert_eq!(percent_short(dec("0.00000")), "0.0%");
        assert_eq!(percent_short(dec("0.68657")), "68.7%");
    }
}
