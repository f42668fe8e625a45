//! Calculator Session
//!
//! This demo plays the role of the presentation layer: it forwards key
//! presses to the engine, prints what a screen would show, then suspends the
//! session into a snapshot and resumes it.
//!
//! Key concepts:
//! - Driving the engine with keypad characters
//! - Reacting to the returned signals (redraw, animate, error flash)
//! - Snapshot to JSON and restore
//!
//! Run with: cargo run --example session -- "5+3+2=" "*4="
//! Set RUST_LOG=abacus=debug to watch the engine's phases.

use abacus::checkpoint::Snapshot;
use abacus::engine::{Engine, Key, Signal};
use tracing_subscriber::EnvFilter;

fn render(engine: &Engine, key: char, signal: &Signal) {
    match signal {
        Signal::Ignored => println!("  [{key}] (ignored)"),
        Signal::Refresh => println!("  [{key}] {}", engine.display_text()),
        Signal::Computed(entry) => println!("  [{key}] {}   * {entry}", engine.display_text()),
        Signal::Failed { message, .. } => {
            println!("  [{key}] {message} -> {}", engine.display_text())
        }
    }
}

fn play(engine: &mut Engine, keys: &str) {
    println!("Keys: {keys}");
    for c in keys.chars() {
        let Some(key) = Key::from_char(c) else {
            continue;
        };
        let signal = engine.press(key);
        render(engine, c, &signal);
    }
}

fn print_history(engine: &Engine) {
    println!("History (newest first):");
    for (i, line) in engine.history_entries().iter().enumerate() {
        println!("  {i}: {line}");
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let first = args.next().unwrap_or_else(|| "5+3+2=".to_string());
    let second = args.next().unwrap_or_else(|| "*4=".to_string());

    println!("=== Calculator Session ===\n");

    let mut engine = Engine::new();
    play(&mut engine, &first);
    print_history(&engine);

    println!("\n--- Suspending ---");
    let json = engine.snapshot().to_json()?;
    println!("{json}");

    println!("\n--- Resuming ---");
    let mut resumed = Engine::from_snapshot(&Snapshot::from_json(&json)?)?;
    println!("Display after resume: {}", resumed.display_text());

    play(&mut resumed, &second);
    print_history(&resumed);

    Ok(())
}
