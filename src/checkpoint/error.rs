//! Checkpoint error types.

use crate::core::{InvalidInput, MalformedEntry, UnknownOperator};
use thiserror::Error;

/// Errors that can occur during snapshot operations
#[derive(Debug, Error)]
pub enum CheckpointError {
    /// Serialization to JSON or binary format failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// Deserialization from JSON or binary format failed
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// Snapshot version is not supported by this version
    #[error("Unsupported snapshot version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Snapshot data failed validation
    #[error("Snapshot validation failed: {}", format_violations(.0))]
    ValidationFailed(Vec<SnapshotViolation>),
}

/// A single field of a snapshot that cannot describe a reachable session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotViolation {
    #[error("firstOperand: scale {scale} is out of range")]
    OperandScale { scale: i64 },

    #[error("currentInput: {0}")]
    Input(InvalidInput),

    #[error("operator: {0}")]
    Operator(UnknownOperator),

    #[error("history[{index}]: {entry}")]
    History { index: usize, entry: MalformedEntry },
}

fn format_violations(violations: &[SnapshotViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
