//! Amount formatting for statement cells.

use rust_decimal::{Decimal, RoundingStrategy};

/// Placeholder printed for zero or missing amounts.
pub const PLACEHOLDER: &str = "-";

/// Formats an amount for display.
///
/// Zero and missing amounts print as `-`, negatives in parentheses, and all
/// values with two decimals and comma-grouped thousands:
///
/// ```
/// use nepfin_core::statements::format_amount;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_amount(Some(Decimal::new(123_456_789, 2))), "1,234,567.89");
/// assert_eq!(format_amount(Some(Decimal::new(-500, 0))), "(500.00)");
/// assert_eq!(format_amount(None), "-");
/// ```
#[must_use]
pub fn format_amount(amount: Option<Decimal>) -> String {
    let Some(amount) = amount else {
        return PLACEHOLDER.to_string();
    };

    let rounded = round_amount(amount);
    if rounded.is_zero() {
        return PLACEHOLDER.to_string();
    }

    let text = format!("{:.2}", rounded.abs());
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    let grouped = group_thousands(whole);

    if rounded.is_sign_negative() {
        format!("({grouped}.{fraction})")
    } else {
        format!("{grouped}.{fraction}")
    }
}

/// Rounds to two decimal places, half away from zero.
#[must_use]
pub fn round_amount(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
