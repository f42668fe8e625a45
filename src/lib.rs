//! Abacus: a decimal calculator state machine
//!
//! Abacus is the core of a single-screen keypad calculator. A presentation
//! layer forwards button presses; the engine keeps the running expression,
//! computes with exact decimals and tells the caller what to show.
//!
//! # Core Concepts
//!
//! - **Engine**: Session state driven one key at a time, left-to-right evaluation
//! - **Phases**: Named states of the engine via the `State` trait
//! - **History**: Newest-first log of formatted computations
//! - **Snapshots**: Serializable copies of a session for suspend/resume
//!
//! # Example
//!
//! ```rust
//! use abacus::engine::{Engine, Key, Signal};
//! use abacus::core::Operator;
//!
//! let mut engine = Engine::new();
//! engine.press(Key::Digit(1));
//! engine.press(Key::Operator(Operator::Add));
//! engine.press(Key::Digit(2));
//! let signal = engine.press(Key::Equals);
//!
//! assert!(signal.animates());
//! assert_eq!(engine.display_text(), "3");
//! assert_eq!(engine.history_entries(), vec!["1 + 2 = 3"]);
//!
//! let snapshot = engine.snapshot();
//! let resumed = Engine::from_snapshot(&snapshot).unwrap();
//! assert_eq!(resumed, engine);
//! ```

pub mod checkpoint;
pub mod config;
pub mod core;
pub mod engine;

// Re-export commonly used types
pub use checkpoint::{CheckpointError, Snapshot};
pub use config::Messages;
pub use crate::core::{CalcError, HistoryEntry, HistoryLog, Operator, Phase, State};
pub use engine::{Engine, Key, Signal};
