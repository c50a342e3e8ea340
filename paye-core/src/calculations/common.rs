//! Rounding helpers shared by the PAYE calculations and their callers.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded away from zero. Used for presenting
/// rand-and-cent amounts; the calculations themselves never round
/// intermediate values.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use paye_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(25039.7966)), dec!(25039.80));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds to the nearest whole rand, sending exact halves to the even neighbour.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use paye_core::calculations::common::round_to_whole_rand;
///
/// assert_eq!(round_to_whole_rand(dec!(9999.99995)), dec!(10000));
/// assert_eq!(round_to_whole_rand(dec!(2.5)), dec!(2));
/// assert_eq!(round_to_whole_rand(dec!(3.5)), dec!(4));
/// ```
pub fn round_to_whole_rand(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven)
}
