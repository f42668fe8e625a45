//! The calculator engine.
//!
//! The engine owns all session state and is driven one key at a time. It
//! never talks to a screen: every operation returns a [`Signal`] telling the
//! presentation layer whether to redraw, animate, or flash an error message,
//! and the text to show is derived on demand by [`Engine::display_text`].
//!
//! # Example
//!
//! ```rust
//! use abacus::engine::{Engine, Signal};
//!
//! let mut engine = Engine::new();
//! engine.feed("5+3+2=");
//!
//! assert_eq!(engine.display_text(), "10");
//! assert_eq!(engine.history_entries(), vec!["8 + 2 = 10", "5 + 3 = 8"]);
//! ```

mod key;

pub use key::Key;

use crate::checkpoint::{CheckpointError, Snapshot};
use crate::config::Messages;
use crate::core::{
    format_decimal, CalcError, HistoryEntry, HistoryLog, InputBuffer, Operator, Phase, State,
};
use bigdecimal::BigDecimal;
use tracing::{debug, info, trace, warn};

/// What the presentation layer should do after an event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Signal {
    /// Nothing changed
    Ignored,

    /// State changed; re-render display and history
    Refresh,

    /// A computation was recorded; re-render and animate the display
    Computed(HistoryEntry),

    /// A computation failed and the engine was reset.
    /// Show `message` briefly, then the (reset) display text.
    Failed { error: CalcError, message: String },
}

impl Signal {
    /// Whether anything on screen may have changed.
    pub fn needs_redraw(&self) -> bool {
        !matches!(self, Self::Ignored)
    }

    /// Whether the display should play its update animation.
    pub fn animates(&self) -> bool {
        matches!(self, Self::Computed(_))
    }
}

/// Calculator session state: `current input -> operator -> operand -> result`.
///
/// Evaluation is strictly left to right. Each operator press collapses the
/// pending computation against the number just typed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Engine {
    input: InputBuffer,
    operand: Option<BigDecimal>,
    operator: Option<Operator>,
    history: HistoryLog,
    messages: Messages,
}

impl Engine {
    /// Create a fresh session with the default messages.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `messages` for user-visible error text.
    pub fn with_messages(mut self, messages: Messages) -> Self {
        self.messages = messages;
        self
    }

    /// Rebuild a session from a snapshot, using the default messages.
    pub fn from_snapshot(snapshot: &Snapshot) -> Result<Self, CheckpointError> {
        let mut engine = Self::new();
        engine.restore(snapshot)?;
        Ok(engine)
    }

    /// Dispatch a key event.
    pub fn press(&mut self, key: Key) -> Signal {
        match key {
            Key::Digit(d) => match char::from_digit(u32::from(d), 10) {
                Some(c) => self.append_digit_or_point(c),
                None => {
                    trace!(digit = d, "ignoring out-of-range digit");
                    Signal::Ignored
                }
            },
            Key::DecimalPoint => self.append_digit_or_point('.'),
            Key::Operator(op) => self.press_operator(op),
            Key::Equals => self.press_equals(),
            Key::Clear => self.clear(),
        }
    }

    /// Replay a string of keypad characters, skipping whitespace.
    ///
    /// Characters that are not keys are logged and skipped.
    pub fn feed(&mut self, keys: &str) -> Vec<Signal> {
        let mut signals = Vec::with_capacity(keys.len());
        for c in keys.chars().filter(|c| !c.is_whitespace()) {
            match Key::from_char(c) {
                Some(key) => signals.push(self.press(key)),
                None => warn!(key = %c, "skipping unknown key"),
            }
        }
        signals
    }

    /// Append a digit or the decimal point to the input.
    ///
    /// A second decimal point, or anything that is not a digit, is ignored.
    pub fn append_digit_or_point(&mut self, c: char) -> Signal {
        if !self.input.push(c) {
            trace!(key = %c, input = self.input.as_str(), "rejected input character");
            return Signal::Ignored;
        }
        debug!(input = self.input.as_str(), phase = self.phase().name(), "input appended");
        Signal::Refresh
    }

    /// Press an operator key.
    ///
    /// With input pending, either commits it as the first operand or, when an
    /// operand already exists, evaluates the pending computation first. Without
    /// input, only the pending operator is replaced.
    pub fn press_operator(&mut self, op: Operator) -> Signal {
        let mut computed = None;

        if !self.input.is_empty() {
            if self.operand.is_some() {
                match self.compute_and_commit() {
                    Ok(entry) => computed = entry,
                    Err(error) => return self.fail(error),
                }
            } else {
                match self.input.parse() {
                    Ok(value) => self.operand = Some(value),
                    Err(error) => return self.fail(error),
                }
            }
        }

        self.operator = Some(op);
        self.input.clear();
        debug!(operator = %op, phase = self.phase().name(), "operator pending");

        computed.map_or(Signal::Refresh, Signal::Computed)
    }

    /// Press `=`: evaluate the pending computation and drop the operator.
    pub fn press_equals(&mut self) -> Signal {
        let had_operator = self.operator.is_some();

        match self.compute_and_commit() {
            Err(error) => self.fail(error),
            Ok(entry) => {
                self.operator = None;
                match entry {
                    Some(entry) => Signal::Computed(entry),
                    None if had_operator => Signal::Refresh,
                    None => Signal::Ignored,
                }
            }
        }
    }

    /// Reset operand, input and operator. History is kept.
    pub fn clear(&mut self) -> Signal {
        self.reset();
        debug!("cleared");
        Signal::Refresh
    }

    /// Apply the pending operator to the operand and the typed input.
    ///
    /// Returns `Ok(None)` when there is nothing to compute. On success the
    /// raw result becomes the new operand and the entry is recorded.
    fn compute_and_commit(&mut self) -> Result<Option<HistoryEntry>, CalcError> {
        let (Some(operator), Some(lhs)) = (self.operator, self.operand.as_ref()) else {
            return Ok(None);
        };
        if self.input.is_empty() {
            return Ok(None);
        }

        let rhs = self.input.parse()?;
        let result = operator.apply(lhs, &rhs)?;

        let entry = HistoryEntry::new(lhs, operator, &rhs, &result);
        debug!(entry = %entry, "computed");
        self.history.record(entry.clone());
        self.operand = Some(result);
        self.input.clear();

        Ok(Some(entry))
    }

    fn fail(&mut self, error: CalcError) -> Signal {
        let message = self.messages.for_error(&error).to_string();
        warn!(phase = Phase::Error.name(), %error, "computation failed, resetting");
        self.reset();
        Signal::Failed { error, message }
    }

    fn reset(&mut self) {
        self.operand = None;
        self.input.clear();
        self.operator = None;
    }

    /// Text for the main display.
    ///
    /// The typed input if any, else the committed operand (the last result),
    /// else `"0"`.
    pub fn display_text(&self) -> String {
        if !self.input.is_empty() {
            return self.input.as_str().to_string();
        }
        match &self.operand {
            Some(value) => format_decimal(value),
            None => "0".to_string(),
        }
    }

    /// Rendered history, newest first.
    pub fn history_entries(&self) -> Vec<String> {
        self.history.rendered()
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    /// The current phase, derived from state.
    pub fn phase(&self) -> Phase {
        Phase::derive(
            self.operand.is_some(),
            self.operator.is_some(),
            !self.input.is_empty(),
        )
    }

    pub fn input(&self) -> &str {
        self.input.as_str()
    }

    pub fn operand(&self) -> Option<&BigDecimal> {
        self.operand.as_ref()
    }

    pub fn operator(&self) -> Option<Operator> {
        self.operator
    }

    pub fn messages(&self) -> &Messages {
        &self.messages
    }

    /// Capture the full session state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(
            self.operand.clone(),
            self.input.as_str().to_string(),
            self.operator
                .map_or_else(String::new, |op| op.symbol().to_string()),
            self.history.rendered(),
        )
    }

    /// Replace the session state with the snapshot's.
    ///
    /// The snapshot is fully validated first; on error the engine is left
    /// exactly as it was. Messages are not part of a snapshot and are kept.
    pub fn restore(&mut self, snapshot: &Snapshot) -> Result<(), CheckpointError> {
        let restored = snapshot.decode().inspect_err(|error| {
            warn!(snapshot = %snapshot.id, %error, "rejected snapshot");
        })?;

        self.operand = restored.operand;
        self.input = restored.input;
        self.operator = restored.operator;
        self.history = restored.history;

        info!(
            snapshot = %snapshot.id,
            phase = self.phase().name(),
            history = self.history.len(),
            "restored session"
        );
        Ok(())
    }
}
