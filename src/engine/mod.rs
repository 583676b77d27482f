//! Machine execution.
//!
//! `StateMachine::advance` performs one selection cycle against the
//! transition table; `StateMachine::run` repeats it from the initial state
//! until the terminal state. Configuration is passed in explicitly through
//! `MachineConfig` rather than read from process-wide state.

mod config;
mod definition;
mod machine;

pub use config::MachineConfig;
pub use definition::MachineDefinition;
pub use machine::{Phase, RunReport, StateMachine};
