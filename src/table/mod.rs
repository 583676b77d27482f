//! Transition tables and candidate selection.
//!
//! A table maps each source state to its candidates in declaration order.
//! Selecting from a state walks those candidates first to last:
//!
//! - a guard whose condition holds runs its transitions;
//! - a failed **non-ambiguous** guard only skips its own transitions;
//! - a failed **ambiguous** guard deflects the whole candidate, and the
//!   next candidate is tried.
//!
//! The first candidate that is not deflected wins and its target is
//! returned.
//!
//! Candidate evaluation is not atomic. Guards that precede a deflecting
//! guard in the same candidate have already run their transitions by the
//! time the candidate is rejected, and those effects are kept.

mod declaration;
mod guard;
mod validate;

pub use declaration::{Declaration, DeclarationDef, Registry};
pub use guard::Guard;
pub use validate::TableIssue;

use crate::core::State;
use crate::error::EngineError;
use declaration::GuardSet;
use guard::GuardOutcome;
use std::borrow::Cow;
use std::collections::HashMap;

/// One possible way out of a state: guards plus a target.
pub struct Candidate<C> {
    guards: GuardSet<C>,
    target: State,
}

impl<C> Candidate<C> {
    pub fn target(&self) -> &State {
        &self.target
    }
}

/// Immutable mapping from a state to its ordered candidates.
///
/// # Example
///
/// ```rust
/// use turnstile::core::{always, noop, State};
/// use turnstile::table::{Declaration, TransitionTable};
///
/// let table: TransitionTable<()> = TransitionTable::new(vec![
///     Declaration::new("a", always(), noop(), "b"),
///     Declaration::new("b", always(), noop(), "end"),
///     Declaration::new("a", always(), noop(), "end"),
/// ]);
///
/// // Grouped by source, declaration order kept
/// let targets: Vec<_> = table
///     .candidates(&State::new("a"))
///     .iter()
///     .map(|c| c.target().as_str())
///     .collect();
/// assert_eq!(targets, vec!["b", "end"]);
/// ```
pub struct TransitionTable<C> {
    entries: Vec<(State, Vec<Candidate<C>>)>,
    index: HashMap<State, usize>,
}

impl<C> TransitionTable<C> {
    /// Group a flat sequence of declarations by source state.
    pub fn new<I>(declarations: I) -> Self
    where
        I: IntoIterator<Item = Declaration<C>>,
    {
        let mut entries: Vec<(State, Vec<Candidate<C>>)> = Vec::new();
        let mut index: HashMap<State, usize> = HashMap::new();

        for declaration in declarations {
            let candidate = Candidate {
                guards: declaration.guards,
                target: declaration.target,
            };
            match index.get(&declaration.source) {
                Some(&slot) => entries[slot].1.push(candidate),
                None => {
                    index.insert(declaration.source.clone(), entries.len());
                    entries.push((declaration.source, vec![candidate]));
                }
            }
        }

        Self { entries, index }
    }

    /// Candidates declared for `state`, in declaration order.
    pub fn candidates(&self, state: &State) -> &[Candidate<C>] {
        self.index
            .get(state)
            .map(|&slot| self.entries[slot].1.as_slice())
            .unwrap_or(&[])
    }

    pub fn contains(&self, state: &State) -> bool {
        self.index.contains_key(state)
    }

    /// Source states in the order they were first declared.
    pub fn states(&self) -> impl Iterator<Item = &State> {
        self.entries.iter().map(|(state, _)| state)
    }

    /// Number of source states.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Select a candidate for `state` and run the transitions it authorizes.
    ///
    /// Returns the accepted candidate's target, the state itself if it is
    /// terminal (no lookup happens), or `None` if every candidate was
    /// deflected or none exist. All guard shapes of the state are normalized
    /// before any guard is evaluated.
    pub fn select(&self, state: &State, ctx: &mut C) -> Result<Option<State>, EngineError> {
        if state.is_terminal() {
            return Ok(Some(state.clone()));
        }

        let candidates = self.candidates(state);
        let resolved = candidates
            .iter()
            .map(|candidate| candidate.guards.resolve())
            .collect::<Result<Vec<Cow<'_, [Guard<C>]>>, _>>()
            .map_err(|reason| EngineError::Configuration {
                state: state.to_string(),
                reason,
            })?;

        'candidates: for (position, (candidate, guards)) in
            candidates.iter().zip(&resolved).enumerate()
        {
            for (slot, guard) in guards.iter().enumerate() {
                match guard.evaluate(ctx) {
                    GuardOutcome::Fired => {}
                    GuardOutcome::Skipped => {
                        tracing::trace!(
                            state = %state,
                            candidate = position,
                            guard = slot,
                            "guard skipped"
                        );
                    }
                    GuardOutcome::Deflected => {
                        tracing::trace!(
                            state = %state,
                            candidate = position,
                            guard = slot,
                            target = %candidate.target,
                            "candidate deflected"
                        );
                        continue 'candidates;
                    }
                }
            }
            return Ok(Some(candidate.target.clone()));
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{action, always, ambiguous, noop, when};
    use serde_json::json;
    use std::sync::Arc;

    type Log = Vec<&'static str>;

    fn push(tag: &'static str) -> impl crate::core::Transition<Log> {
        action(move |log: &mut Log| log.push(tag))
    }

    #[test]
    fn grouping_preserves_first_declared_order() {
        let table: TransitionTable<Log> = TransitionTable::new(vec![
            Declaration::new("x", always(), noop(), "y"),
            Declaration::new("y", always(), noop(), "end"),
            Declaration::new("x", always(), noop(), "z"),
        ]);

        assert_eq!(table.len(), 2);
        let states: Vec<_> = table.states().map(State::as_str).collect();
        assert_eq!(states, vec!["x", "y"]);

        let targets: Vec<_> = table
            .candidates(&State::new("x"))
            .iter()
            .map(|c| c.target().as_str())
            .collect();
        assert_eq!(targets, vec!["y", "z"]);
    }

    #[test]
    fn unknown_state_has_no_candidates() {
        let table: TransitionTable<Log> = TransitionTable::new(Vec::new());
        assert!(table.is_empty());
        assert!(table.candidates(&State::new("nowhere")).is_empty());
        assert!(!table.contains(&State::new("nowhere")));
    }

    #[test]
    fn deflected_candidate_falls_through_to_next() {
        let table = TransitionTable::new(vec![
            Declaration::new("a", ambiguous(|_: &Log| false), push("t1"), "b"),
            Declaration::new("a", when(|_: &Log| true), push("t2"), "c"),
        ]);

        let mut log = Log::new();
        let next = table.select(&State::new("a"), &mut log).unwrap();
        assert_eq!(next, Some(State::new("c")));
        assert_eq!(log, vec!["t2"]);
    }

    #[test]
    fn failed_plain_guard_keeps_candidate() {
        let table = TransitionTable::new(vec![Declaration::guarded(
            "a",
            vec![
                Guard::new(when(|_: &Log| false), push("t1")),
                Guard::new(when(|_: &Log| true), push("t2")),
            ],
            "b",
        )]);

        let mut log = Log::new();
        let next = table.select(&State::new("a"), &mut log).unwrap();
        assert_eq!(next, Some(State::new("b")));
        assert_eq!(log, vec!["t2"]);
    }

    #[test]
    fn effects_before_deflection_are_kept() {
        let table = TransitionTable::new(vec![
            Declaration::guarded(
                "a",
                vec![
                    Guard::new(always(), push("early")),
                    Guard::new(ambiguous(|_: &Log| false), push("never")),
                ],
                "b",
            ),
            Declaration::new("a", always(), push("fallback"), "c"),
        ]);

        let mut log = Log::new();
        let next = table.select(&State::new("a"), &mut log).unwrap();
        assert_eq!(next, Some(State::new("c")));
        assert_eq!(log, vec!["early", "fallback"]);
    }

    #[test]
    fn all_deflected_yields_none() {
        let table = TransitionTable::new(vec![Declaration::new(
            "a",
            ambiguous(|_: &Log| false),
            push("t1"),
            "b",
        )]);

        let mut log = Log::new();
        assert_eq!(table.select(&State::new("a"), &mut log).unwrap(), None);
        assert!(log.is_empty());
    }

    #[test]
    fn terminal_state_skips_lookup() {
        let table = TransitionTable::new(vec![Declaration::new("END", always(), push("t"), "a")]);

        let mut log = Log::new();
        let next = table.select(&State::new("END"), &mut log).unwrap();
        assert_eq!(next, Some(State::new("END")));
        assert!(log.is_empty());
    }

    #[test]
    fn empty_guard_list_is_accepted() {
        let table: TransitionTable<Log> =
            TransitionTable::new(vec![Declaration::guarded("a", Vec::new(), "end")]);

        let mut log = Log::new();
        assert_eq!(
            table.select(&State::new("a"), &mut log).unwrap(),
            Some(State::end())
        );
    }

    #[test]
    fn malformed_shape_fails_before_any_guard_runs() {
        let registry = Arc::new(Registry::new().transition("t", push("t")));
        let table = TransitionTable::new(vec![
            Declaration::from_shape("a", json!(["always", "t"]), "b", Arc::clone(&registry)),
            Declaration::from_shape("a", json!(["always"]), "c", Arc::clone(&registry)),
            Declaration::from_shape("b", json!(["always", "t"]), "end", registry),
        ]);

        let mut log = Log::new();
        let err = table.select(&State::new("a"), &mut log).unwrap_err();
        assert!(matches!(err, EngineError::Configuration { ref state, .. } if state == "a"));
        assert!(log.is_empty());

        // Other states are unaffected
        let next = table.select(&State::new("b"), &mut log).unwrap();
        assert_eq!(next, Some(State::end()));
        assert_eq!(log, vec!["t"]);
    }
}
