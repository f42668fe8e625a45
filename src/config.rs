//! User-visible strings.
//!
//! Error text is a presentation resource: callers load localized strings and
//! hand them to the engine, which only decides *which* message to show.

use crate::core::CalcError;
use serde::{Deserialize, Serialize};

/// Messages shown when a computation fails.
///
/// Every field has a default, so partial JSON documents are accepted.
///
/// # Example
///
/// ```rust
/// use abacus::config::Messages;
///
/// let messages = Messages::from_json(r#"{ "divideByZero": "Division par zéro" }"#).unwrap();
/// assert_eq!(messages.divide_by_zero, "Division par zéro");
/// assert_eq!(messages.error, Messages::default().error);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Messages {
    /// Shown when the second operand of a division is zero
    pub divide_by_zero: String,
    /// Shown for every other arithmetic failure
    pub error: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            divide_by_zero: "Cannot divide by zero".to_string(),
            error: "Error".to_string(),
        }
    }
}

impl Messages {
    /// Load messages from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The message to show for `error`.
    pub fn for_error(&self, error: &CalcError) -> &str {
        match error {
            CalcError::DivideByZero => &self.divide_by_zero,
            CalcError::ArithmeticFault(_) => &self.error,
        }
    }
}
