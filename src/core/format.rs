//! Canonical decimal formatting for display and history.

use super::decimal::{plain_string, round_to_scale, Midpoint};
use bigdecimal::BigDecimal;

/// Most fractional digits ever shown.
pub const MAX_FRACTION_DIGITS: u32 = 10;

/// Format a decimal the way the display and the history show it.
///
/// At most [`MAX_FRACTION_DIGITS`] fractional digits (midpoints to even),
/// trailing zeros stripped, no grouping separators, no exponent, no dangling
/// decimal point. Anything that rounds to zero prints as `"0"`.
///
/// # Example
///
/// ```rust
/// use abacus::core::format_decimal;
/// use bigdecimal::BigDecimal;
/// use std::str::FromStr;
///
/// assert_eq!(format_decimal(&BigDecimal::from_str("3.0000000000").unwrap()), "3");
/// assert_eq!(format_decimal(&BigDecimal::from_str("0.50").unwrap()), "0.5");
/// assert_eq!(format_decimal(&BigDecimal::from_str("1234567.25").unwrap()), "1234567.25");
/// assert_eq!(format_decimal(&BigDecimal::from_str("1e25").unwrap()), "10000000000000000000000000");
/// ```
pub fn format_decimal(value: &BigDecimal) -> String {
    plain_string(&round_to_scale(
        value,
        i64::from(MAX_FRACTION_DIGITS),
        Midpoint::ToEven,
    ))
}
