//! Snapshot and restore for calculator sessions.
//!
//! A session has to survive its host being suspended: the presentation layer
//! takes a [`Snapshot`] before going to the background and hands it back on
//! resume. Snapshots encode to readable JSON or to compact bytes.

use crate::core::{HistoryEntry, HistoryLog, InputBuffer, Operator, MAX_SCALE};
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use uuid::Uuid;

pub mod error;

pub use error::{CheckpointError, SnapshotViolation};

/// Version identifier for the snapshot format
pub const SNAPSHOT_VERSION: u32 = 1;

fn current_version() -> u32 {
    SNAPSHOT_VERSION
}

fn fresh_id() -> String {
    Uuid::new_v4().to_string()
}

/// Serializable copy of a calculator session.
///
/// `operator` is the keypad symbol, or empty when no operator is pending.
/// `history` holds the rendered entries, newest first.
///
/// # Example
///
/// ```rust
/// use abacus::checkpoint::Snapshot;
/// use abacus::engine::Engine;
///
/// let mut engine = Engine::new();
/// engine.feed("1+2=3*");
///
/// let json = engine.snapshot().to_json().unwrap();
/// let restored = Engine::from_snapshot(&Snapshot::from_json(&json).unwrap()).unwrap();
/// assert_eq!(restored, engine);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Snapshot format version
    #[serde(default = "current_version")]
    pub version: u32,

    /// Unique snapshot identifier
    #[serde(default = "fresh_id")]
    pub id: String,

    /// When the snapshot was taken
    #[serde(default = "Utc::now")]
    pub taken_at: DateTime<Utc>,

    /// Committed operand, if any. Written as text so no digit is lost;
    /// a JSON number is accepted on input.
    #[serde(default, with = "operand_text")]
    pub first_operand: Option<BigDecimal>,

    /// Text typed but not yet committed
    #[serde(default)]
    pub current_input: String,

    /// Pending operator symbol, or empty
    #[serde(default)]
    pub operator: String,

    /// Rendered history entries, newest first
    #[serde(default)]
    pub history: Vec<String>,
}

/// Session state decoded from a validated snapshot.
pub(crate) struct Restored {
    pub(crate) operand: Option<BigDecimal>,
    pub(crate) input: InputBuffer,
    pub(crate) operator: Option<Operator>,
    pub(crate) history: HistoryLog,
}

/// Serde adapter for the operand: exact decimal text out, text or number in.
mod operand_text {
    use crate::core::scaled_string;
    use bigdecimal::BigDecimal;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};
    use std::str::FromStr;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Text(String),
        Number(serde_json::Number),
    }

    pub fn serialize<S>(value: &Option<BigDecimal>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(value) => serializer.serialize_some(&scaled_string(value)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<BigDecimal>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = if deserializer.is_human_readable() {
            Option::<Repr>::deserialize(deserializer)?.map(|repr| match repr {
                Repr::Text(text) => text,
                Repr::Number(number) => number.to_string(),
            })
        } else {
            Option::<String>::deserialize(deserializer)?
        };

        text.map(|text| {
            BigDecimal::from_str(text.trim())
                .map_err(|e| D::Error::custom(format!("invalid operand '{text}': {e}")))
        })
        .transpose()
    }
}

fn check_operand(operand: Option<&BigDecimal>) -> Result<(), SnapshotViolation> {
    let Some(operand) = operand else {
        return Ok(());
    };
    let (_, scale) = operand.as_bigint_and_exponent();
    if scale.unsigned_abs() > MAX_SCALE.unsigned_abs() {
        return Err(SnapshotViolation::OperandScale { scale });
    }
    Ok(())
}

fn parse_operator(symbol: &str) -> Result<Option<Operator>, SnapshotViolation> {
    if symbol.is_empty() {
        return Ok(None);
    }
    symbol
        .parse()
        .map(Some)
        .map_err(SnapshotViolation::Operator)
}

fn check<T>(result: Result<T, SnapshotViolation>) -> Validation<(), NonEmptyVec<SnapshotViolation>> {
    match result {
        Ok(_) => Validation::success(()),
        Err(violation) => Validation::fail(violation),
    }
}

impl Snapshot {
    /// Create a snapshot of the given session parts.
    pub fn new(
        first_operand: Option<BigDecimal>,
        current_input: String,
        operator: String,
        history: Vec<String>,
    ) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            id: fresh_id(),
            taken_at: Utc::now(),
            first_operand,
            current_input,
            operator,
            history,
        }
    }

    /// Check every field, accumulating ALL violations.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<SnapshotViolation>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<SnapshotViolation>>> = Vec::new();

        checks.push(check(check_operand(self.first_operand.as_ref())));
        checks.push(check(
            InputBuffer::from_text(&self.current_input).map_err(SnapshotViolation::Input),
        ));
        checks.push(check(parse_operator(&self.operator)));

        for (index, line) in self.history.iter().enumerate() {
            checks.push(check(line.parse::<HistoryEntry>().map_err(|entry| {
                SnapshotViolation::History { index, entry }
            })));
        }

        Validation::all_vec(checks).map(|_| ())
    }

    /// Validate and decode into session parts.
    pub(crate) fn decode(&self) -> Result<Restored, CheckpointError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: SNAPSHOT_VERSION,
            });
        }

        if let Validation::Failure(violations) = self.validate() {
            return Err(CheckpointError::ValidationFailed(
                violations.iter().cloned().collect(),
            ));
        }

        let single = |violation| CheckpointError::ValidationFailed(vec![violation]);

        check_operand(self.first_operand.as_ref()).map_err(single)?;
        let input = InputBuffer::from_text(&self.current_input)
            .map_err(|e| single(SnapshotViolation::Input(e)))?;
        let operator = parse_operator(&self.operator).map_err(single)?;
        let history = self
            .history
            .iter()
            .enumerate()
            .map(|(index, line)| {
                line.parse::<HistoryEntry>()
                    .map_err(|entry| single(SnapshotViolation::History { index, entry }))
            })
            .collect::<Result<HistoryLog, _>>()?;

        Ok(Restored {
            operand: self.first_operand.clone(),
            input,
            operator,
            history,
        })
    }

    /// Encode as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    /// Decode from JSON. Only the session fields are required.
    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        serde_json::from_str(json).map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))
    }

    /// Encode in the compact binary format.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    /// Decode from the compact binary format.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CheckpointError> {
        bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn sample() -> Snapshot {
        Snapshot::new(
            Some(BigDecimal::from(8)),
            "2.5".to_string(),
            "+".to_string(),
            vec!["5 + 3 = 8".to_string()],
        )
    }

    #[test]
    fn valid_snapshot_decodes() {
        let restored = sample().decode().unwrap();
        assert_eq!(restored.operand, Some(BigDecimal::from(8)));
        assert_eq!(restored.input.as_str(), "2.5");
        assert_eq!(restored.operator, Some(Operator::Add));
        assert_eq!(restored.history.rendered(), vec!["5 + 3 = 8"]);
    }

    #[test]
    fn empty_operator_means_none() {
        let mut snapshot = sample();
        snapshot.operator = String::new();
        assert_eq!(snapshot.decode().unwrap().operator, None);
    }

    #[test]
    fn validation_accumulates_all_violations() {
        let mut snapshot = sample();
        snapshot.current_input = "1.2.3".to_string();
        snapshot.operator = "%".to_string();
        snapshot.history = vec!["5 + 3 = 8".to_string(), "garbage".to_string()];

        match snapshot.validate() {
            Validation::Failure(violations) => {
                assert_eq!(violations.len(), 3);
                assert!(violations
                    .iter()
                    .any(|v| matches!(v, SnapshotViolation::Input(_))));
                assert!(violations
                    .iter()
                    .any(|v| matches!(v, SnapshotViolation::Operator(_))));
                assert!(violations
                    .iter()
                    .any(|v| matches!(v, SnapshotViolation::History { index: 1, .. })));
            }
            Validation::Success(_) => panic!("Expected failures, got success"),
        }
    }

    #[test]
    fn decode_reports_violations() {
        let mut snapshot = sample();
        snapshot.operator = "^".to_string();

        match snapshot.decode() {
            Err(CheckpointError::ValidationFailed(violations)) => {
                assert_eq!(violations.len(), 1);
            }
            other => panic!("expected validation failure, got {:?}", other.err()),
        }
    }

    #[test]
    fn unsupported_version_is_rejected() {
        let mut snapshot = sample();
        snapshot.version = SNAPSHOT_VERSION + 1;

        assert!(matches!(
            snapshot.decode(),
            Err(CheckpointError::UnsupportedVersion { found: 2, supported: 1 })
        ));
    }

    #[test]
    fn json_uses_camel_case_fields() {
        let json = sample().to_json().unwrap();
        assert!(json.contains("\"firstOperand\": \"8\""));
        assert!(json.contains("\"currentInput\": \"2.5\""));
        assert!(json.contains("\"operator\": \"+\""));
        assert!(json.contains("\"history\""));
    }

    #[test]
    fn json_without_metadata_is_accepted() {
        let json = r#"{
            "firstOperand": null,
            "currentInput": "42",
            "operator": "",
            "history": []
        }"#;
        let snapshot = Snapshot::from_json(json).unwrap();
        assert_eq!(snapshot.version, SNAPSHOT_VERSION);
        assert_eq!(snapshot.first_operand, None);
        assert_eq!(snapshot.current_input, "42");
        assert!(!snapshot.id.is_empty());
    }

    #[test]
    fn json_round_trip() {
        let snapshot = sample();
        let decoded = Snapshot::from_json(&snapshot.to_json().unwrap()).unwrap();
        assert_eq!(decoded, snapshot);
    }

    #[test]
    fn bytes_round_trip() {
        let snapshot = sample();
        let decoded = Snapshot::from_bytes(&snapshot.to_bytes().unwrap()).unwrap();
        assert_eq!(decoded, snapshot);
    }

    #[test]
    fn operand_scale_survives_encoding() {
        let snapshot = Snapshot::new(
            Some(BigDecimal::from_str("0.3333333330").unwrap()),
            String::new(),
            String::new(),
            Vec::new(),
        );
        let json = snapshot.to_json().unwrap();
        assert!(json.contains("\"firstOperand\": \"0.3333333330\""));

        for decoded in [
            Snapshot::from_json(&json).unwrap(),
            Snapshot::from_bytes(&snapshot.to_bytes().unwrap()).unwrap(),
        ] {
            let operand = decoded.first_operand.unwrap();
            assert_eq!(operand.as_bigint_and_exponent().1, 10);
            assert_eq!(operand, BigDecimal::from_str("0.333333333").unwrap());
        }
    }

    #[test]
    fn long_operand_survives_encoding() {
        let long = BigDecimal::from_str("12345678901234567890123456789012.000000000000000000000000000001")
            .unwrap();
        let snapshot = Snapshot::new(Some(long.clone()), String::new(), "+".to_string(), Vec::new());

        let from_json = Snapshot::from_json(&snapshot.to_json().unwrap()).unwrap();
        let from_bytes = Snapshot::from_bytes(&snapshot.to_bytes().unwrap()).unwrap();
        assert_eq!(from_json.first_operand, Some(long.clone()));
        assert_eq!(from_bytes.first_operand, Some(long));
    }

    #[test]
    fn numeric_first_operand_is_accepted() {
        let json = r#"{"firstOperand": 8, "currentInput": "", "operator": "+", "history": []}"#;
        let snapshot = Snapshot::from_json(json).unwrap();
        assert_eq!(snapshot.first_operand, Some(BigDecimal::from(8)));
        assert_eq!(snapshot.decode().unwrap().operator, Some(Operator::Add));

        let json = r#"{"firstOperand": 2.5, "currentInput": "", "operator": "", "history": []}"#;
        let snapshot = Snapshot::from_json(json).unwrap();
        assert_eq!(snapshot.first_operand, Some(BigDecimal::from_str("2.5").unwrap()));
    }

    #[test]
    fn malformed_first_operand_fails_to_decode() {
        for operand in [r#""eight""#, "true", "[]"] {
            let json = format!(
                r#"{{"firstOperand": {operand}, "currentInput": "", "operator": "", "history": []}}"#
            );
            assert!(
                matches!(
                    Snapshot::from_json(&json),
                    Err(CheckpointError::DeserializationFailed(_))
                ),
                "accepted {operand}"
            );
        }
    }

    #[test]
    fn out_of_range_operand_scale_is_a_violation() {
        let mut snapshot = sample();
        snapshot.first_operand = Some(BigDecimal::from_str("1e-2000000").unwrap());

        match snapshot.decode() {
            Err(CheckpointError::ValidationFailed(violations)) => {
                assert_eq!(
                    violations,
                    vec![SnapshotViolation::OperandScale { scale: 2_000_000 }]
                );
            }
            other => panic!("expected validation failure, got {:?}", other.err()),
        }
    }

    #[test]
    fn garbage_fails_to_decode() {
        assert!(matches!(
            Snapshot::from_json("{ not json"),
            Err(CheckpointError::DeserializationFailed(_))
        ));
        assert!(matches!(
            Snapshot::from_bytes(&[1, 2, 3]),
            Err(CheckpointError::DeserializationFailed(_))
        ));
    }
}
