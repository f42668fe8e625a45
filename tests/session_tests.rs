//! End-to-end key sequences through the public API.

use abacus::checkpoint::{CheckpointError, Snapshot};
use abacus::core::{CalcError, Operator, Phase};
use abacus::engine::{Engine, Key, Signal};
use abacus::Messages;

fn run(keys: &str) -> (Engine, Vec<Signal>) {
    let mut engine = Engine::new();
    let signals = engine.feed(keys);
    (engine, signals)
}

#[test]
fn one_plus_two() {
    let (engine, signals) = run("1+2=");

    assert_eq!(engine.display_text(), "3");
    assert_eq!(engine.history_entries(), vec!["1 + 2 = 3"]);
    assert!(signals.last().is_some_and(Signal::animates));
}

#[test]
fn ten_divided_by_zero() {
    let (engine, signals) = run("10/0=");

    assert_eq!(
        signals.last(),
        Some(&Signal::Failed {
            error: CalcError::DivideByZero,
            message: Messages::default().divide_by_zero,
        })
    );
    assert_eq!(engine.display_text(), "0");
    assert_eq!(engine.history().len(), 0);
}

#[test]
fn chained_addition() {
    let (engine, _) = run("5+3+2=");

    assert_eq!(engine.display_text(), "10");
    assert_eq!(engine.history_entries(), vec!["8 + 2 = 10", "5 + 3 = 8"]);
    assert_eq!(engine.history().get(0).unwrap().to_string(), "8 + 2 = 10");
}

#[test]
fn one_third() {
    let (engine, _) = run("1/3=");
    assert_eq!(engine.display_text(), "0.3333333333");

    let (engine, _) = run("2/3=");
    assert_eq!(engine.display_text(), "0.6666666667");
}

#[test]
fn decimal_arithmetic_has_no_float_drift() {
    let (engine, _) = run(".1+.2=");
    assert_eq!(engine.display_text(), "0.3");
    assert_eq!(engine.history_entries(), vec!["0.1 + 0.2 = 0.3"]);
}

#[test]
fn subtraction_can_go_negative() {
    let (engine, _) = run("3-5=");
    assert_eq!(engine.display_text(), "-2");

    let (engine, _) = run("3-5=*2=");
    assert_eq!(engine.display_text(), "-4");
    assert_eq!(engine.history_entries(), vec!["-2 * 2 = -4", "3 - 5 = -2"]);
}

#[test]
fn tiny_intermediate_products_are_not_lost() {
    let (engine, signals) = run("0.000000000000001*0.000000000000001*100000000000000000000=");

    assert_eq!(engine.display_text(), "0.0000000001");
    assert!(signals.last().is_some_and(Signal::animates));
    assert_eq!(engine.history().len(), 2);
    assert_eq!(
        engine.history().get(0).unwrap().to_string(),
        "0 * 100000000000000000000 = 0.0000000001"
    );
}

#[test]
fn long_typed_numbers_are_exact() {
    let (engine, signals) = run("12345678901234567890123456789012+1=");

    assert!(signals.iter().all(|signal| !matches!(signal, Signal::Failed { .. })));
    assert_eq!(engine.display_text(), "12345678901234567890123456789013");

    let (engine, _) = run("99999999999999999999999999999*9999999999=");
    assert_eq!(engine.display_text(), "999999999899999999999999999990000000001");
}

#[test]
fn clear_at_any_point() {
    for keys in ["", "7", "7+", "7+8", "7+8=", "1/0="] {
        let (mut engine, _) = run(keys);
        let history = engine.history_entries();

        engine.press(Key::Clear);
        assert_eq!(engine.display_text(), "0", "after {keys:?}");
        assert_eq!(engine.phase(), Phase::Empty);
        assert_eq!(engine.history_entries(), history);

        engine.feed("2*4=");
        assert_eq!(engine.display_text(), "8");
    }
}

#[test]
fn session_survives_suspend_and_resume() {
    let (mut engine, _) = run("12.5*2=");
    engine.feed("+1.");

    let json = engine.snapshot().to_json().unwrap();
    let mut resumed = Engine::from_snapshot(&Snapshot::from_json(&json).unwrap()).unwrap();
    assert_eq!(resumed, engine);
    assert_eq!(resumed.display_text(), "1.");

    resumed.feed("5=");
    assert_eq!(resumed.display_text(), "26.5");
    assert_eq!(
        resumed.history_entries(),
        vec!["25 + 1.5 = 26.5", "12.5 * 2 = 25"]
    );
}

#[test]
fn restore_from_hand_written_snapshot() {
    let json = r#"{
        "firstOperand": "8",
        "currentInput": "2",
        "operator": "+",
        "history": ["5 + 3 = 8"]
    }"#;
    let mut engine = Engine::from_snapshot(&Snapshot::from_json(json).unwrap()).unwrap();

    assert_eq!(engine.phase(), Phase::EnteringSecondOperand);
    assert_eq!(engine.operator(), Some(Operator::Add));
    engine.press(Key::Equals);
    assert_eq!(engine.history_entries(), vec!["8 + 2 = 10", "5 + 3 = 8"]);
}

#[test]
fn restore_accepts_numeric_first_operand() {
    let json = r#"{"firstOperand": 8, "currentInput": "", "operator": "+", "history": []}"#;
    let mut engine = Engine::from_snapshot(&Snapshot::from_json(json).unwrap()).unwrap();

    assert_eq!(engine.display_text(), "8");
    assert_eq!(engine.phase(), Phase::OperatorPending);
    engine.feed("2=");
    assert_eq!(engine.history_entries(), vec!["8 + 2 = 10"]);
}

#[test]
fn long_operand_survives_suspend_and_resume() {
    let (engine, _) = run("12345678901234567890123456789012+");
    let json = engine.snapshot().to_json().unwrap();
    assert!(json.contains("\"12345678901234567890123456789012\""));

    let mut resumed = Engine::from_snapshot(&Snapshot::from_json(&json).unwrap()).unwrap();
    resumed.feed("1=");
    assert_eq!(resumed.display_text(), "12345678901234567890123456789013");
}

#[test]
fn corrupt_snapshot_is_rejected() {
    let json = r#"{
        "firstOperand": null,
        "currentInput": "1.2.3",
        "operator": "mod",
        "history": ["not a computation"]
    }"#;
    let snapshot = Snapshot::from_json(json).unwrap();

    match Engine::from_snapshot(&snapshot) {
        Err(CheckpointError::ValidationFailed(violations)) => assert_eq!(violations.len(), 3),
        other => panic!("expected validation failure, got {other:?}"),
    }
}
