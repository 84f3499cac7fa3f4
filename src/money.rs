//! Money rounding.
//!
//! Every stake and payout passes through here so that repeated
//! accumulation never drifts off the cent grid.

use rust_decimal::prelude::*;
use rust_decimal_macros::dec;

/// One cent, the default money increment.
pub const CENT: Decimal = dec!(0.01);

/// Round `value` to the nearest multiple of `increment`, ties away from zero.
///
/// A non-positive increment leaves the value untouched. Returns `None` when
/// the rounded value does not fit in a `Decimal`.
pub fn round(value: Decimal, increment: Decimal) -> Option<Decimal> {
    if increment <= Decimal::ZERO {
        return Some(value);
    }

    // 1, 0.1, 0.01, ... round in place without scaling the value up.
    if increment.mantissa() == 1 {
        let rounded = value.round_dp_with_strategy(increment.scale(), RoundingStrategy::MidpointAwayFromZero);
        return Some(rounded.normalize());
    }

    let steps = value
        .checked_div(increment)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    steps.checked_mul(increment).map(|v| v.normalize())
}

/// Round to the nearest cent.
pub fn round_cents(value: Decimal) -> Option<Decimal> {
    round(value, CENT)
}

/// Parse a stake field. `None` when it is not a number or does not fit.
pub fn parse_stake(raw: &str) -> Option<Decimal> {
    Decimal::from_str(raw.trim()).ok()
}
