//! Core building blocks of a machine.
//!
//! - `State`: named, comparable by name, terminal when named "end"
//! - `Condition`: predicate over the caller's context, optionally ambiguous
//! - `Transition`: side-effecting action on the caller's context
//! - `RunHistory`: record of the steps one run took

mod condition;
mod history;
mod state;
mod transition;

pub use condition::{always, ambiguous, when, Always, Condition, FnCondition};
pub use history::{RunHistory, StepRecord};
pub use state::{State, TERMINAL};
pub use transition::{action, noop, FnTransition, Noop, Transition};
