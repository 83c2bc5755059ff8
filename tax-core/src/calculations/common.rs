//! Small decimal helpers shared by the estimator and the front-ends.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds to cents, sending exact midpoints away from zero.
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(4132.505)), dec!(4132.51));
/// assert_eq!(round_half_up(dec!(-0.125)), dec!(-0.13));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Clamps negative amounts to zero.
pub fn floor_at_zero(value: Decimal) -> Decimal {
    if value < Decimal::ZERO {
        Decimal::ZERO
    } else {
        value
    }
}

/// Expresses a fractional rate as a percentage with trailing zeros removed,
/// so `0.153` becomes `15.3`.
pub fn as_percent(rate: Decimal) -> Decimal {
    (rate * Decimal::ONE_HUNDRED).normalize()
}
