//! Computation error types.

use thiserror::Error;

/// Errors that end the current computation.
///
/// Neither is fatal to the session: the engine turns both into a
/// user-visible message and resets.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    /// The second operand of a division was exactly zero
    #[error("Division by zero")]
    DivideByZero,

    /// The decimal engine could not represent an operand or a result
    #[error("Arithmetic fault: {0}")]
    ArithmeticFault(String),
}
