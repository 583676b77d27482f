//! Coin-Operated Turnstile
//!
//! This example drives the classic turnstile with a queue of visitors.
//!
//! Key concepts:
//! - Ambiguous conditions choose between competing candidates
//! - Non-ambiguous conditions gate optional side effects
//! - The debug flag traces every advance through `tracing`
//!
//! Run with: cargo run --example turnstile_gate

use turnstile::builder::StateMachineBuilder;
use turnstile::core::{action, always, ambiguous, noop, when};
use turnstile::table::Guard;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default)]
struct Gate {
    /// Coins held by each waiting visitor, front first
    queue: Vec<u32>,
    admitted: u32,
    turned_away: u32,
    revenue: u32,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
        .init();

    println!("=== Turnstile Example ===\n");

    let machine = StateMachineBuilder::new()
        .name("turnstile")
        .initial("locked")
        .debug(true)
        // Nobody left: shut down
        .on("locked", ambiguous(|g: &Gate| g.queue.is_empty()), noop(), "end")
        // Visitor with a coin: take it and unlock
        .guarded(
            "locked",
            vec![
                Guard::check(ambiguous(|g: &Gate| g.queue.first().is_some_and(|c| *c > 0))),
                Guard::new(always(), action(|g: &mut Gate| g.revenue += 1)),
            ],
            "unlocked",
        )
        // Visitor without a coin: turn them away
        .on(
            "locked",
            always(),
            action(|g: &mut Gate| {
                g.queue.remove(0);
                g.turned_away += 1;
            }),
            "locked",
        )
        // Push through; regulars with spare coins get a thank-you
        .guarded(
            "unlocked",
            vec![
                Guard::new(
                    when(|g: &Gate| g.queue.first().is_some_and(|c| *c > 1)),
                    action(|_: &mut Gate| println!("  thanks for coming back!")),
                ),
                Guard::new(
                    always(),
                    action(|g: &mut Gate| {
                        g.queue.remove(0);
                        g.admitted += 1;
                    }),
                ),
            ],
            "locked",
        )
        .build()
        .unwrap();

    let mut gate = Gate {
        queue: vec![1, 0, 3, 2, 0],
        ..Gate::default()
    };

    if machine.validate().is_success() {
        println!("Table validated");
    }

    let report = machine.run(&mut gate).unwrap();

    println!("\nAdmitted: {}", gate.admitted);
    println!("Turned away: {}", gate.turned_away);
    println!("Revenue: {}", gate.revenue);
    println!("Steps: {}", report.steps);
    println!("Path: {:?}", report.history.path());

    println!("\n=== Example Complete ===");
}
