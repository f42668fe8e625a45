//! Scale arithmetic on arbitrary-precision decimals.
//!
//! A `BigDecimal` is an integer significand and a scale: the value is
//! `digits * 10^-scale`. Rounding and plain rendering work on that pair
//! directly, so neither ever switches to exponent notation.

use bigdecimal::BigDecimal;
use num_bigint::{BigInt, Sign};
use std::cmp::Ordering;

/// Largest scale magnitude accepted from outside the keypad, and the
/// largest power of ten a division may shift by.
pub const MAX_SCALE: i64 = 1_000_000;

/// How a value exactly halfway between two candidates is rounded.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Midpoint {
    /// `0.5 -> 1`, `-0.5 -> -1`
    AwayFromZero,
    /// `0.5 -> 0`, `1.5 -> 2`
    ToEven,
}

pub(crate) fn pow10(exponent: u32) -> BigInt {
    BigInt::from(10u32).pow(exponent)
}

/// Round `value` to at most `scale` fractional digits.
///
/// Values that already fit are returned unchanged.
pub fn round_to_scale(value: &BigDecimal, scale: i64, midpoint: Midpoint) -> BigDecimal {
    let (digits, exponent) = value.as_bigint_and_exponent();
    if exponent <= scale {
        return value.clone();
    }

    let shift = exponent - scale;
    // |digits| < 2^bits, so a shift beyond that leaves less than half a unit.
    if shift > digits.bits() as i64 {
        return BigDecimal::new(BigInt::default(), scale);
    }

    let divisor = pow10(u32::try_from(shift).unwrap_or(u32::MAX));
    let quotient = &digits / &divisor;
    let remainder = &digits % &divisor;

    let twice = remainder.magnitude() + remainder.magnitude();
    let away = match twice.cmp(divisor.magnitude()) {
        Ordering::Less => false,
        Ordering::Greater => true,
        Ordering::Equal => match midpoint {
            Midpoint::AwayFromZero => true,
            Midpoint::ToEven => is_odd(&quotient),
        },
    };

    let rounded = if !away {
        quotient
    } else if digits.sign() == Sign::Minus {
        quotient - BigInt::from(1)
    } else {
        quotient + BigInt::from(1)
    };
    BigDecimal::new(rounded, scale)
}

fn is_odd(value: &BigInt) -> bool {
    value
        .magnitude()
        .to_u32_digits()
        .first()
        .is_some_and(|low| low & 1 == 1)
}

/// Render without exponent notation or trailing fractional zeros.
pub fn plain_string(value: &BigDecimal) -> String {
    let (digits, scale) = value.as_bigint_and_exponent();
    if digits.sign() == Sign::NoSign {
        return "0".to_string();
    }

    let mut text = digits.magnitude().to_string();
    if scale <= 0 {
        text.push_str(&"0".repeat(scale.unsigned_abs() as usize));
    } else {
        let scale = scale as usize;
        if text.len() <= scale {
            text.insert_str(0, &"0".repeat(scale - text.len() + 1));
        }
        text.insert(text.len() - scale, '.');
        text = text.trim_end_matches('0').trim_end_matches('.').to_string();
    }

    if digits.sign() == Sign::Minus {
        text.insert(0, '-');
    }
    text
}

/// Render keeping the exact scale, so the text parses back to the same
/// significand. Negative scales use a trailing exponent.
pub fn scaled_string(value: &BigDecimal) -> String {
    let (digits, scale) = value.as_bigint_and_exponent();
    if scale <= 0 {
        return if scale == 0 {
            digits.to_string()
        } else {
            format!("{digits}E{}", -scale)
        };
    }

    let scale = scale as usize;
    let mut text = digits.magnitude().to_string();
    if text.len() <= scale {
        text.insert_str(0, &"0".repeat(scale - text.len() + 1));
    }
    text.insert(text.len() - scale, '.');
    if digits.sign() == Sign::Minus {
        text.insert(0, '-');
    }
    text
}
