//! Computation history.
//!
//! Every successful computation leaves one formatted record behind. The log
//! keeps them newest-first so the presentation layer can render it as is.

use super::format::format_decimal;
use super::operator::Operator;
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Record of a single completed computation.
///
/// Entries hold the canonically formatted texts, not the raw values, so that
/// what was shown is exactly what is kept.
///
/// # Example
///
/// ```rust
/// use abacus::core::{HistoryEntry, Operator};
/// use bigdecimal::BigDecimal;
///
/// let entry = HistoryEntry::new(
///     &BigDecimal::from(1),
///     Operator::Add,
///     &BigDecimal::from(2),
///     &BigDecimal::from(3),
/// );
/// assert_eq!(entry.to_string(), "1 + 2 = 3");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// The formatted left-hand operand
    pub operand_a: String,
    /// The operator that was applied
    pub operator: Operator,
    /// The formatted right-hand operand
    pub operand_b: String,
    /// The formatted result
    pub result: String,
}

impl HistoryEntry {
    /// Build an entry from raw values, formatting each of them.
    pub fn new(
        operand_a: &BigDecimal,
        operator: Operator,
        operand_b: &BigDecimal,
        result: &BigDecimal,
    ) -> Self {
        Self {
            operand_a: format_decimal(operand_a),
            operator,
            operand_b: format_decimal(operand_b),
            result: format_decimal(result),
        }
    }
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} = {}",
            self.operand_a, self.operator, self.operand_b, self.result
        )
    }
}

/// Error returned when a rendered history line cannot be read back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Malformed history entry '{0}'")]
pub struct MalformedEntry(pub String);

impl FromStr for HistoryEntry {
    type Err = MalformedEntry;

    /// Parse the `"a op b = r"` rendering produced by `Display`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || MalformedEntry(s.to_string());

        let (expression, result) = s.split_once(" = ").ok_or_else(malformed)?;
        let parts: Vec<&str> = expression.split(' ').collect();
        let [operand_a, operator, operand_b] = parts.as_slice() else {
            return Err(malformed());
        };

        let operator = operator.parse::<Operator>().map_err(|_| malformed())?;
        for number in [*operand_a, *operand_b, result] {
            BigDecimal::from_str(number).map_err(|_| malformed())?;
        }

        Ok(Self {
            operand_a: operand_a.to_string(),
            operator,
            operand_b: operand_b.to_string(),
            result: result.to_string(),
        })
    }
}

/// Newest-first log of completed computations.
///
/// Only grows; there is no deduplication and no size cap.
///
/// # Example
///
/// ```rust
/// use abacus::core::{HistoryEntry, HistoryLog, Operator};
/// use bigdecimal::BigDecimal;
///
/// let (one, two, three) = (BigDecimal::from(1), BigDecimal::from(2), BigDecimal::from(3));
/// let mut log = HistoryLog::new();
/// log.record(HistoryEntry::new(&one, Operator::Add, &one, &two));
/// log.record(HistoryEntry::new(&two, Operator::Add, &one, &three));
///
/// assert_eq!(log.len(), 2);
/// assert_eq!(log.rendered(), vec!["2 + 1 = 3", "1 + 1 = 2"]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryLog {
    entries: VecDeque<HistoryEntry>,
}

impl HistoryLog {
    /// Create a new empty log.
    pub fn new() -> Self {
        Self {
            entries: VecDeque::new(),
        }
    }

    /// Record an entry in front of all earlier ones.
    pub fn record(&mut self, entry: HistoryEntry) {
        self.entries.push_front(entry);
    }

    /// Entry at `index`, where 0 is the newest.
    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    /// Iterate newest-first.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every entry rendered as display text, newest-first.
    pub fn rendered(&self) -> Vec<String> {
        self.entries.iter().map(ToString::to_string).collect()
    }
}

impl FromIterator<HistoryEntry> for HistoryLog {
    /// Collect entries that are already in newest-first order.
    fn from_iter<I: IntoIterator<Item = HistoryEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
