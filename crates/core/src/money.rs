//! Overflow-free amount arithmetic.
//!
//! Aggregates arrive from caller-supplied payloads. Sums and differences
//! saturate at the `Decimal` bounds and ratios fall back to zero, so no
//! statement operation panics on extreme input.

use rust_decimal::Decimal;

/// Sums amounts, saturating at the `Decimal` bounds.
///
/// ```
/// use nepfin_core::money::sum_amounts;
/// use rust_decimal::Decimal;
///
/// assert_eq!(sum_amounts([Decimal::ONE, Decimal::TWO]), Decimal::from(3));
/// assert_eq!(sum_amounts([Decimal::MAX, Decimal::MAX]), Decimal::MAX);
/// ```
pub fn sum_amounts<I: IntoIterator<Item = Decimal>>(amounts: I) -> Decimal {
    amounts
        .into_iter()
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

/// `part / whole * 100` rounded to two decimals, zero unless `whole > 0`
/// and the result is representable.
#[must_use]
pub fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .map_or(Decimal::ZERO, |percent| percent.round_dp(2))
}
