//! Builder for constructing state machines.

use crate::builder::error::BuildError;
use crate::core::{Condition, State, Transition};
use crate::engine::{MachineConfig, StateMachine};
use crate::table::{Declaration, Guard};

/// Builder for constructing state machines with a fluent API.
pub struct StateMachineBuilder<C> {
    name: Option<String>,
    initial: Option<State>,
    declarations: Vec<Declaration<C>>,
    config: MachineConfig,
}

impl<C> StateMachineBuilder<C> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            name: None,
            initial: None,
            declarations: Vec::new(),
            config: MachineConfig::default(),
        }
    }

    /// Set the machine name used in errors and log lines (required).
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: impl Into<State>) -> Self {
        self.initial = Some(state.into());
        self
    }

    /// Replace the configuration.
    pub fn config(mut self, config: MachineConfig) -> Self {
        self.config = config;
        self
    }

    /// Toggle the per-advance debug line.
    pub fn debug(mut self, enabled: bool) -> Self {
        self.config.debug = enabled;
        self
    }

    /// Add a single-guard candidate.
    pub fn on<K, T>(
        self,
        from: impl Into<State>,
        condition: K,
        transition: T,
        to: impl Into<State>,
    ) -> Self
    where
        K: Condition<C> + 'static,
        T: Transition<C> + 'static,
    {
        self.declare(Declaration::new(from, condition, transition, to))
    }

    /// Add a candidate with several guards.
    pub fn guarded(self, from: impl Into<State>, guards: Vec<Guard<C>>, to: impl Into<State>) -> Self {
        self.declare(Declaration::guarded(from, guards, to))
    }

    /// Add a pre-built declaration.
    pub fn declare(mut self, declaration: Declaration<C>) -> Self {
        self.declarations.push(declaration);
        self
    }

    /// Add multiple declarations at once.
    pub fn declarations<I>(mut self, declarations: I) -> Self
    where
        I: IntoIterator<Item = Declaration<C>>,
    {
        self.declarations.extend(declarations);
        self
    }

    /// Build the state machine.
    /// Returns an error if required fields are missing.
    pub fn build(self) -> Result<StateMachine<C>, BuildError> {
        let name = self.name.ok_or(BuildError::MissingName)?;
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        if self.declarations.is_empty() {
            return Err(BuildError::NoDeclarations);
        }

        Ok(StateMachine::with_config(
            name,
            initial,
            self.declarations,
            self.config,
        ))
    }
}

impl<C> Default for StateMachineBuilder<C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{action, always, ambiguous, noop, when};

    #[test]
    fn builder_validates_required_fields() {
        let result = StateMachineBuilder::<()>::new().initial("a").build();
        assert_eq!(result.unwrap_err(), BuildError::MissingName);

        let result = StateMachineBuilder::<()>::new().name("m").build();
        assert_eq!(result.unwrap_err(), BuildError::MissingInitialState);
    }

    #[test]
    fn builder_requires_declarations() {
        let result = StateMachineBuilder::<()>::new().name("m").initial("a").build();
        assert_eq!(result.unwrap_err(), BuildError::NoDeclarations);
    }

    #[test]
    fn fluent_api_builds_machine() {
        let machine = StateMachineBuilder::new()
            .name("counter")
            .initial("count")
            .debug(true)
            .on("count", ambiguous(|n: &u8| *n < 3), action(|n: &mut u8| *n += 1), "count")
            .guarded(
                "count",
                vec![
                    Guard::new(when(|n: &u8| *n == 3), action(|n: &mut u8| *n *= 10)),
                    Guard::new(always(), noop()),
                ],
                "end",
            )
            .build()
            .unwrap();

        assert_eq!(machine.name(), "counter");
        assert!(machine.config().debug);

        let mut n = 0;
        let report = machine.run(&mut n).unwrap();
        assert_eq!(n, 30);
        assert_eq!(report.steps, 4);
    }

    #[test]
    fn add_multiple_declarations() {
        let machine = StateMachineBuilder::<()>::new()
            .name("m")
            .initial("a")
            .declarations(vec![
                Declaration::new("a", always(), noop(), "b"),
                Declaration::new("b", always(), noop(), "end"),
            ])
            .build()
            .unwrap();

        assert_eq!(machine.table().len(), 2);
        assert_eq!(machine.initial_state(), &State::new("a"));
    }
}
