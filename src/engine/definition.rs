//! Declarative machine definitions.

use crate::core::State;
use crate::engine::config::MachineConfig;
use crate::engine::machine::StateMachine;
use crate::table::{DeclarationDef, Registry};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A machine described entirely by names.
///
/// Conditions and transitions are referenced by the names they are
/// registered under in a [`Registry`]; guard shapes are only checked when
/// the machine first advances from the state that declares them.
///
/// # Example
///
/// ```rust
/// use turnstile::core::{action, ambiguous, State};
/// use turnstile::engine::MachineDefinition;
/// use turnstile::table::Registry;
///
/// let definition: MachineDefinition = serde_json::from_value(serde_json::json!({
///     "name": "countdown",
///     "initial": "tick",
///     "declarations": [
///         { "from": "tick", "guards": ["positive", "decrement"], "to": "tick" },
///         { "from": "tick", "guards": ["always", "noop"], "to": "end" }
///     ]
/// }))
/// .unwrap();
///
/// let registry = Registry::new()
///     .condition("positive", ambiguous(|n: &u32| *n > 0))
///     .transition("decrement", action(|n: &mut u32| *n -= 1));
///
/// let machine = definition.into_machine(registry);
/// let mut n = 3;
/// let report = machine.run(&mut n).unwrap();
///
/// assert_eq!(n, 0);
/// assert_eq!(report.steps, 4);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MachineDefinition {
    pub name: String,
    pub initial: State,
    #[serde(default)]
    pub declarations: Vec<DeclarationDef>,
    #[serde(default)]
    pub config: MachineConfig,
}

impl MachineDefinition {
    /// Build a machine whose guards resolve against `registry`.
    pub fn into_machine<C>(self, registry: Registry<C>) -> StateMachine<C> {
        let registry = Arc::new(registry);
        let declarations = self
            .declarations
            .into_iter()
            .map(|declaration| declaration.into_declaration(&registry))
            .collect::<Vec<_>>();

        StateMachine::with_config(self.name, self.initial, declarations, self.config)
    }
}
