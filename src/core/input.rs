//! The in-progress number being typed.

use super::error::CalcError;
use bigdecimal::BigDecimal;
use std::str::FromStr;
use thiserror::Error;

/// Digits and at most one decimal point, not yet committed as a number.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputBuffer {
    text: String,
}

/// Text that can never have been typed into an [`InputBuffer`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidInput {
    #[error("Unexpected character '{0}' in input")]
    UnexpectedChar(char),

    #[error("Input '{0}' contains more than one decimal point")]
    SecondDecimalPoint(String),
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a buffer from previously typed text.
    pub fn from_text(text: &str) -> Result<Self, InvalidInput> {
        let mut buffer = Self::new();
        for c in text.chars() {
            if !Self::accepts(c) {
                return Err(InvalidInput::UnexpectedChar(c));
            }
            if !buffer.push(c) {
                return Err(InvalidInput::SecondDecimalPoint(text.to_string()));
            }
        }
        Ok(buffer)
    }

    fn accepts(c: char) -> bool {
        c.is_ascii_digit() || c == '.'
    }

    /// Append a digit or the decimal point.
    ///
    /// Returns `false`, leaving the buffer unchanged, for a second decimal
    /// point or any other character.
    pub fn push(&mut self, c: char) -> bool {
        if !Self::accepts(c) || (c == '.' && self.text.contains('.')) {
            return false;
        }
        self.text.push(c);
        true
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// Parse the typed text as an exact decimal.
    ///
    /// A bare or dangling decimal point reads as if the missing digits were
    /// zero: `"."` is 0, `".5"` is 0.5, `"5."` is 5. Every digit is kept.
    pub fn parse(&self) -> Result<BigDecimal, CalcError> {
        let trimmed = self.text.trim_end_matches('.');
        let normalized = if trimmed.is_empty() {
            "0".to_string()
        } else if trimmed.starts_with('.') {
            format!("0{trimmed}")
        } else {
            trimmed.to_string()
        };

        BigDecimal::from_str(&normalized)
            .map_err(|e| CalcError::ArithmeticFault(format!("cannot read '{}': {e}", self.text)))
    }
}
