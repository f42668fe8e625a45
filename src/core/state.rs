//! Phases of the calculator state machine.
//!
//! The engine never stores its phase; it is derived from the input buffer,
//! the committed operand and the pending operator. The `State` trait gives
//! phases a uniform, pure inspection surface used for logging and tests.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for state machine states.
///
/// All methods are pure - no side effects.
///
/// # Example
///
/// ```rust
/// use abacus::core::{Phase, State};
///
/// assert_eq!(Phase::OperatorPending.name(), "OperatorPending");
/// assert!(Phase::Error.is_error());
/// assert!(!Phase::Empty.is_final());
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;

    /// Check if this is a final (terminal) state.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }

    /// Check if this is an error state.
    ///
    /// Default implementation returns `false`.
    fn is_error(&self) -> bool {
        false
    }
}

/// Where the calculator is in the `input -> operator -> operand -> result` cycle.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Phase {
    /// Nothing typed, nothing committed.
    Empty,
    /// Typing a number that will become the first operand.
    EnteringFirstOperand,
    /// An operator is pending and no second operand has been typed yet.
    OperatorPending,
    /// Typing the number the pending operator will be applied to.
    EnteringSecondOperand,
    /// A result is committed and no operator is pending.
    ShowingResult,
    /// A computation failed. Momentary: the engine resets to `Empty` at once.
    Error,
}

impl Phase {
    /// Derive the phase from the three pieces of engine state.
    pub fn derive(has_operand: bool, has_operator: bool, has_input: bool) -> Self {
        match (has_operand, has_operator, has_input) {
            (true, true, true) => Self::EnteringSecondOperand,
            (_, _, true) => Self::EnteringFirstOperand,
            (_, true, false) => Self::OperatorPending,
            (true, false, false) => Self::ShowingResult,
            (false, false, false) => Self::Empty,
        }
    }
}

impl State for Phase {
    fn name(&self) -> &str {
        match self {
            Self::Empty => "Empty",
            Self::EnteringFirstOperand => "EnteringFirstOperand",
            Self::OperatorPending => "OperatorPending",
            Self::EnteringSecondOperand => "EnteringSecondOperand",
            Self::ShowingResult => "ShowingResult",
            Self::Error => "Error",
        }
    }

    fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }
}
