//! Shared helpers for the pricing formulas: fail-soft input parsing and
//! the two rounding conventions the estimate sheets use.

use rust_decimal::Decimal;

/// Parses a raw text-entry value, degrading to zero instead of failing.
///
/// Blank and unparseable input becomes `0`; this is the engine-wide
/// policy, so a half-typed field never produces an error, only a zero
/// cost line. Negative numbers are passed through unchanged — the
/// original behaved the same way, and clamping here would silently alter
/// quotes (see DESIGN.md).
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use paving_core::calculations::common::parse_or_zero;
///
/// assert_eq!(parse_or_zero("1250.5"), dec!(1250.5));
/// assert_eq!(parse_or_zero("  42 "), dec!(42));
/// assert_eq!(parse_or_zero(""), dec!(0));
/// assert_eq!(parse_or_zero("abc"), dec!(0));
/// assert_eq!(parse_or_zero("-5"), dec!(-5));
/// ```
pub fn parse_or_zero(s: &str) -> Decimal {
    s.trim().parse::<Decimal>().unwrap_or(Decimal::ZERO)
}

/// Rounds a decimal value to exactly two decimal places using half-up
/// rounding, the standard convention for displayed dollar amounts.
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds a cost up to the next whole $100.
///
/// Quoting convention used by the Remove & Replace estimate for asphalt
/// material cost; amounts already on a $100 boundary are unchanged.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use paving_core::calculations::common::round_up_to_hundred;
///
/// assert_eq!(round_up_to_hundred(dec!(2185)), dec!(2200));
/// assert_eq!(round_up_to_hundred(dec!(2000)), dec!(2000));
/// assert_eq!(round_up_to_hundred(dec!(0)), dec!(0));
/// ```
pub fn round_up_to_hundred(cost: Decimal) -> Decimal {
    let hundred = Decimal::ONE_HUNDRED;
    (cost / hundred).ceil() * hundred
}

/// Returns the maximum of two decimal values.
pub fn max(a: Decimal, b: Decimal) -> Decimal {
    if a > b { a } else { b }
}
