//! Core calculator types and logic.
//!
//! This module contains the pure pieces the engine is assembled from:
//! - Phases of the state machine via the `State` trait
//! - Operators and the decimal arithmetic policy
//! - Rounding and plain rendering of arbitrary-precision decimals
//! - The input buffer and the canonical formatter
//! - Newest-first computation history
//!
//! Nothing in this module performs I/O or logging.

mod decimal;
mod error;
mod format;
mod history;
mod input;
mod operator;
mod state;

pub use decimal::{plain_string, round_to_scale, scaled_string, Midpoint, MAX_SCALE};
pub use error::CalcError;
pub use format::{format_decimal, MAX_FRACTION_DIGITS};
pub use history::{HistoryEntry, HistoryLog, MalformedEntry};
pub use input::{InputBuffer, InvalidInput};
pub use operator::{Operator, UnknownOperator, DIVISION_SCALE};
pub use state::{Phase, State};
