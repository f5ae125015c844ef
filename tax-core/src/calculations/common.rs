//! Rounding and arithmetic helpers shared by the engines.
//!
//! Every rounding here is half-up (midpoint away from zero), the usual
//! convention for currency.

use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places kept on rates (basis-point precision).
pub const RATE_DECIMALS: u32 = 4;

fn round_half_up(
    value: Decimal,
    dp: u32,
) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds to cents.
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::round_cents;
///
/// assert_eq!(round_cents(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_cents(dec!(-123.455)), dec!(-123.46));
/// ```
pub fn round_cents(value: Decimal) -> Decimal {
    round_half_up(value, 2)
}

/// Rounds to whole currency units.
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::round_whole;
///
/// assert_eq!(round_whole(dec!(2354.50)), dec!(2355));
/// assert_eq!(round_whole(dec!(2354.49)), dec!(2354));
/// ```
pub fn round_whole(value: Decimal) -> Decimal {
    round_half_up(value, 0)
}

/// Rounds a rate to four decimal places.
pub fn round_rate(value: Decimal) -> Decimal {
    round_half_up(value, RATE_DECIMALS)
}

/// `numerator / denominator` rounded as a rate, or zero when the
/// denominator is not positive.
pub fn rate_of(
    numerator: Decimal,
    denominator: Decimal,
) -> Decimal {
    if denominator <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    round_rate(numerator / denominator)
}

/// Clamps negative values to zero.
pub fn non_negative(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}

/// Sums `values`, pinning the result at [`Decimal::MAX`] instead of
/// overflowing.
pub fn saturating_sum(values: impl IntoIterator<Item = Decimal>) -> Decimal {
    values.into_iter().fold(Decimal::ZERO, Decimal::saturating_add)
}

/// Formats an amount as whole dollars with thousands separators, e.g. `$95,000`.
pub fn format_dollars(value: Decimal) -> String {
    let rounded = round_whole(value);
    let digits = rounded.abs().trunc().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded < Decimal::ZERO {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}
