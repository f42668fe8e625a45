//! Binary operators and the arithmetic policy they apply.

use super::decimal::{pow10, round_to_scale, Midpoint, MAX_SCALE};
use super::error::CalcError;
use bigdecimal::BigDecimal;
use num_bigint::{BigInt, Sign};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fractional digits kept by a division.
pub const DIVISION_SCALE: u32 = 10;

/// One of the four keypad operators.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    pub const ALL: [Operator; 4] = [
        Operator::Add,
        Operator::Subtract,
        Operator::Multiply,
        Operator::Divide,
    ];

    /// The keypad symbol, also used in history entries and snapshots.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
        }
    }

    /// Apply the operator to `lhs` and `rhs`.
    ///
    /// Addition, subtraction and multiplication are exact at any precision.
    /// Division rounds to [`DIVISION_SCALE`] fractional digits, midpoints
    /// away from zero.
    ///
    /// # Example
    ///
    /// ```rust
    /// use abacus::core::{format_decimal, CalcError, Operator};
    /// use bigdecimal::BigDecimal;
    ///
    /// let third = Operator::Divide
    ///     .apply(&BigDecimal::from(1), &BigDecimal::from(3))
    ///     .unwrap();
    /// assert_eq!(format_decimal(&third), "0.3333333333");
    ///
    /// let err = Operator::Divide
    ///     .apply(&BigDecimal::from(1), &BigDecimal::from(0))
    ///     .unwrap_err();
    /// assert_eq!(err, CalcError::DivideByZero);
    /// ```
    pub fn apply(self, lhs: &BigDecimal, rhs: &BigDecimal) -> Result<BigDecimal, CalcError> {
        match self {
            Self::Add => Ok(lhs + rhs),
            Self::Subtract => Ok(lhs - rhs),
            Self::Multiply => Ok(lhs * rhs),
            Self::Divide => divide(lhs, rhs),
        }
    }
}

/// Quotient rounded half-up to [`DIVISION_SCALE`] digits.
///
/// The quotient is truncated one digit past the target scale first; a
/// truncated digit of 5 or more means the exact remainder was at least half
/// a unit, so the half-up decision is the same as on the exact value.
fn divide(lhs: &BigDecimal, rhs: &BigDecimal) -> Result<BigDecimal, CalcError> {
    let (numerator, lhs_scale) = lhs.as_bigint_and_exponent();
    let (denominator, rhs_scale) = rhs.as_bigint_and_exponent();
    if denominator.sign() == Sign::NoSign {
        return Err(CalcError::DivideByZero);
    }

    let guard_scale = i64::from(DIVISION_SCALE) + 1;
    let shift = rhs_scale - lhs_scale + guard_scale;
    if shift.abs() > MAX_SCALE {
        return Err(CalcError::ArithmeticFault(format!(
            "quotient of {lhs} / {rhs} is out of range"
        )));
    }

    // shift is bounded by MAX_SCALE, so it fits in u32
    let factor = pow10(shift.unsigned_abs() as u32);
    let truncated: BigInt = if shift >= 0 {
        numerator * factor / denominator
    } else {
        numerator / (denominator * factor)
    };

    Ok(round_to_scale(
        &BigDecimal::new(truncated, guard_scale),
        i64::from(DIVISION_SCALE),
        Midpoint::AwayFromZero,
    ))
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Error returned when text does not name an operator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown operator '{0}'")]
pub struct UnknownOperator(pub String);

impl FromStr for Operator {
    type Err = UnknownOperator;

    /// Accepts the ASCII symbols plus the typographic keypad glyphs.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Self::Add),
            "-" | "\u{2212}" => Ok(Self::Subtract),
            "*" | "\u{00d7}" | "x" => Ok(Self::Multiply),
            "/" | "\u{00f7}" => Ok(Self::Divide),
            other => Err(UnknownOperator(other.to_string())),
        }
    }
}
