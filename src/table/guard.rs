//! Guards: one condition paired with the transitions it authorizes.

use crate::core::{Condition, Transition};
use std::fmt;
use std::sync::Arc;

/// What evaluating a guard did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum GuardOutcome {
    /// Condition held and every transition ran.
    Fired,
    /// Non-ambiguous condition failed; transitions were skipped.
    Skipped,
    /// Ambiguous condition failed; the enclosing candidate is rejected.
    Deflected,
}

/// A condition paired with one or more transitions.
///
/// The condition is always evaluated. The transitions run, in order, only
/// if it holds.
///
/// # Example
///
/// ```rust
/// use turnstile::core::{action, when};
/// use turnstile::table::Guard;
///
/// let guard = Guard::new(when(|n: &i32| *n > 0), action(|n: &mut i32| *n *= 2))
///     .then(action(|n: &mut i32| *n += 1));
///
/// assert_eq!(guard.transition_count(), 2);
/// assert!(!guard.is_ambiguous());
/// ```
pub struct Guard<C> {
    condition: Arc<dyn Condition<C>>,
    transitions: Vec<Arc<dyn Transition<C>>>,
}

impl<C> Guard<C> {
    /// Pair a condition with a single transition.
    pub fn new<K, T>(condition: K, transition: T) -> Self
    where
        K: Condition<C> + 'static,
        T: Transition<C> + 'static,
    {
        Self {
            condition: Arc::new(condition),
            transitions: vec![Arc::new(transition)],
        }
    }

    /// A guard whose condition authorizes nothing. Useful for ambiguous
    /// selectors that only decide whether a candidate applies.
    pub fn check<K>(condition: K) -> Self
    where
        K: Condition<C> + 'static,
    {
        Self {
            condition: Arc::new(condition),
            transitions: Vec::new(),
        }
    }

    /// Append another transition, run after the existing ones.
    pub fn then<T>(mut self, transition: T) -> Self
    where
        T: Transition<C> + 'static,
    {
        self.transitions.push(Arc::new(transition));
        self
    }

    /// Build a guard from shared parts.
    pub fn from_parts(
        condition: Arc<dyn Condition<C>>,
        transitions: Vec<Arc<dyn Transition<C>>>,
    ) -> Self {
        Self {
            condition,
            transitions,
        }
    }

    pub fn is_ambiguous(&self) -> bool {
        self.condition.is_ambiguous()
    }

    pub fn transition_count(&self) -> usize {
        self.transitions.len()
    }

    pub(crate) fn evaluate(&self, ctx: &mut C) -> GuardOutcome {
        if self.condition.evaluate(&*ctx) {
            for transition in &self.transitions {
                transition.run(ctx);
            }
            GuardOutcome::Fired
        } else if self.condition.is_ambiguous() {
            GuardOutcome::Deflected
        } else {
            GuardOutcome::Skipped
        }
    }
}

impl<C> Clone for Guard<C> {
    fn clone(&self) -> Self {
        Self {
            condition: Arc::clone(&self.condition),
            transitions: self.transitions.clone(),
        }
    }
}

impl<C> fmt::Debug for Guard<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard")
            .field("ambiguous", &self.is_ambiguous())
            .field("transitions", &self.transitions.len())
            .finish()
    }
}
