//! Conditions that gate transitions.
//!
//! A condition is a predicate over the caller's context. Whether a false
//! result rejects the whole candidate or only skips the guard's actions is
//! decided by the condition's `ambiguous` flag, which is plain data rather
//! than a separate type.

/// Predicate evaluated against the caller's context.
///
/// Implementations should not mutate observable state. The engine calls
/// `evaluate` exactly once per guard evaluation and never caches results.
///
/// An **ambiguous** condition decides between competing candidates: when it
/// fails, the candidate is deflected and the next one is tried. A
/// **non-ambiguous** condition only gates an optional side effect inside an
/// already chosen candidate.
///
/// # Example
///
/// ```rust
/// use turnstile::core::Condition;
///
/// struct HasCoin;
///
/// impl Condition<u32> for HasCoin {
///     fn evaluate(&self, coins: &u32) -> bool {
///         *coins > 0
///     }
///
///     fn is_ambiguous(&self) -> bool {
///         true
///     }
/// }
///
/// assert!(HasCoin.evaluate(&1));
/// assert!(!HasCoin.evaluate(&0));
/// ```
pub trait Condition<C>: Send + Sync {
    /// Evaluate the predicate for the given context.
    fn evaluate(&self, ctx: &C) -> bool;

    /// Whether a false result deflects the whole candidate.
    ///
    /// Default implementation returns `false`.
    fn is_ambiguous(&self) -> bool {
        false
    }
}

/// Condition that always holds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Always {
    ambiguous: bool,
}

impl Always {
    /// Non-ambiguous always-true condition.
    pub fn new() -> Self {
        Self { ambiguous: false }
    }

    /// Ambiguous always-true condition. Since it never fails it never
    /// deflects, but it reads as an explicit "this candidate applies".
    pub fn ambiguous() -> Self {
        Self { ambiguous: true }
    }
}

impl<C> Condition<C> for Always {
    fn evaluate(&self, _ctx: &C) -> bool {
        true
    }

    fn is_ambiguous(&self) -> bool {
        self.ambiguous
    }
}

/// Condition backed by a closure.
///
/// # Example
///
/// ```rust
/// use turnstile::core::{Condition, FnCondition};
///
/// let positive = FnCondition::new(|n: &i32| *n > 0);
/// assert!(positive.evaluate(&3));
/// assert!(!positive.is_ambiguous());
///
/// let selector = FnCondition::ambiguous(|n: &i32| *n > 0);
/// assert!(selector.is_ambiguous());
/// ```
pub struct FnCondition<C> {
    predicate: Box<dyn Fn(&C) -> bool + Send + Sync>,
    ambiguous: bool,
}

impl<C> FnCondition<C> {
    /// Create a non-ambiguous condition from a predicate.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        Self {
            predicate: Box::new(predicate),
            ambiguous: false,
        }
    }

    /// Create an ambiguous condition from a predicate.
    pub fn ambiguous<F>(predicate: F) -> Self
    where
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        Self {
            predicate: Box::new(predicate),
            ambiguous: true,
        }
    }
}

impl<C> Condition<C> for FnCondition<C> {
    fn evaluate(&self, ctx: &C) -> bool {
        (self.predicate)(ctx)
    }

    fn is_ambiguous(&self) -> bool {
        self.ambiguous
    }
}

/// Shorthand for [`Always::new`].
pub fn always() -> Always {
    Always::new()
}

/// Shorthand for [`FnCondition::new`].
pub fn when<C, F>(predicate: F) -> FnCondition<C>
where
    F: Fn(&C) -> bool + Send + Sync + 'static,
{
    FnCondition::new(predicate)
}

/// Shorthand for [`FnCondition::ambiguous`].
pub fn ambiguous<C, F>(predicate: F) -> FnCondition<C>
where
    F: Fn(&C) -> bool + Send + Sync + 'static,
{
    FnCondition::ambiguous(predicate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn always_holds_for_any_context() {
        assert!(Condition::<i32>::evaluate(&always(), &0));
        assert!(Condition::<String>::evaluate(&always(), &String::new()));
    }

    #[test]
    fn always_ambiguity_is_selectable() {
        assert!(!Condition::<()>::is_ambiguous(&Always::new()));
        assert!(Condition::<()>::is_ambiguous(&Always::ambiguous()));
    }

    #[test]
    fn closure_condition_reads_context() {
        let even = when(|n: &u8| n % 2 == 0);
        assert!(even.evaluate(&4));
        assert!(!even.evaluate(&5));
        assert!(!even.is_ambiguous());
    }

    #[test]
    fn ambiguous_closure_condition_carries_flag() {
        let selector = ambiguous(|s: &String| s.starts_with('a'));
        assert!(selector.is_ambiguous());
        assert!(selector.evaluate(&"abc".to_string()));
        assert!(!selector.evaluate(&"xyz".to_string()));
    }

    #[test]
    fn condition_is_deterministic() {
        let cond = when(|n: &i64| *n > 10);
        assert_eq!(cond.evaluate(&11), cond.evaluate(&11));
    }
}
