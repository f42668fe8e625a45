//! Discrete key events forwarded by the presentation layer.

use crate::core::Operator;

/// One button press.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Key {
    /// A digit from 0 to 9
    Digit(u8),
    DecimalPoint,
    Operator(Operator),
    Equals,
    Clear,
}

impl Key {
    /// Map a keypad character to a key.
    ///
    /// Digits, `.`, `+ - * /`, `=` and `C`/`c` are recognised.
    ///
    /// # Example
    ///
    /// ```rust
    /// use abacus::engine::Key;
    /// use abacus::core::Operator;
    ///
    /// assert_eq!(Key::from_char('7'), Some(Key::Digit(7)));
    /// assert_eq!(Key::from_char('*'), Some(Key::Operator(Operator::Multiply)));
    /// assert_eq!(Key::from_char('?'), None);
    /// ```
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0'..='9' => c.to_digit(10).map(|d| Self::Digit(d as u8)),
            '.' => Some(Self::DecimalPoint),
            '=' => Some(Self::Equals),
            'C' | 'c' => Some(Self::Clear),
            _ => {
                let mut buf = [0u8; 4];
                c.encode_utf8(&mut buf).parse().ok().map(Self::Operator)
            }
        }
    }
}
