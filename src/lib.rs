//! Turnstile: a condition-gated finite state machine engine
//!
//! A machine is described as a table mapping each named state to an ordered
//! list of candidates. Each candidate is a list of guards (a condition plus
//! the transitions it authorizes) and a target state. Running the machine
//! repeatedly picks a candidate for the current state until the terminal
//! state, named `"end"` in any letter case, is reached.
//!
//! # Core Concepts
//!
//! - **State**: a name; equality, ordering and hashing go by that name
//! - **Condition**: predicate over the caller's context with an `ambiguous` flag
//! - **Transition**: side-effecting action on the caller's context
//! - **Candidate selection**: a failed ambiguous condition rejects the whole
//!   candidate and the next one is tried; a failed non-ambiguous condition
//!   only skips its own transitions
//!
//! # Example
//!
//! ```rust
//! use turnstile::builder::StateMachineBuilder;
//! use turnstile::core::{action, ambiguous, noop, when, State};
//!
//! #[derive(Default)]
//! struct Order {
//!     paid: bool,
//!     notes: Vec<&'static str>,
//! }
//!
//! let machine = StateMachineBuilder::new()
//!     .name("orders")
//!     .initial("review")
//!     .on("review", ambiguous(|o: &Order| o.paid), action(|o: &mut Order| o.notes.push("shipped")), "end")
//!     .on("review", when(|o: &Order| !o.paid), action(|o: &mut Order| o.notes.push("reminder sent")), "waiting")
//!     .on("waiting", when(|_: &Order| true), noop(), "END")
//!     .build()
//!     .unwrap();
//!
//! let mut order = Order::default();
//! let report = machine.run(&mut order).unwrap();
//!
//! assert_eq!(order.notes, vec!["reminder sent"]);
//! assert_eq!(report.final_state, State::new("END"));
//! ```

pub mod builder;
pub mod core;
pub mod engine;
pub mod error;
pub mod table;

// Re-export commonly used types
pub use crate::core::{Condition, State, Transition};
pub use engine::{MachineConfig, StateMachine};
pub use error::EngineError;
pub use table::{Declaration, Guard};
