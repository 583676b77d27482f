//! Side-effecting actions run when a guard holds.

/// Action run against the caller's context.
///
/// Transitions are how a machine produces effects: the engine itself never
/// touches the context. A transition runs zero or one time per step,
/// depending on its guard's condition.
pub trait Transition<C>: Send + Sync {
    /// Apply the action to the context.
    fn run(&self, ctx: &mut C);
}

/// Transition that does nothing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Noop;

impl<C> Transition<C> for Noop {
    fn run(&self, _ctx: &mut C) {}
}

/// Transition backed by a closure.
///
/// # Example
///
/// ```rust
/// use turnstile::core::{FnTransition, Transition};
///
/// let push = FnTransition::new(|log: &mut Vec<&'static str>| log.push("ran"));
/// let mut log = Vec::new();
/// push.run(&mut log);
/// assert_eq!(log, vec!["ran"]);
/// ```
pub struct FnTransition<C> {
    action: Box<dyn Fn(&mut C) + Send + Sync>,
}

impl<C> FnTransition<C> {
    pub fn new<F>(action: F) -> Self
    where
        F: Fn(&mut C) + Send + Sync + 'static,
    {
        Self {
            action: Box::new(action),
        }
    }
}

impl<C> Transition<C> for FnTransition<C> {
    fn run(&self, ctx: &mut C) {
        (self.action)(ctx)
    }
}

/// Shorthand for [`Noop`].
pub fn noop() -> Noop {
    Noop
}

/// Shorthand for [`FnTransition::new`].
pub fn action<C, F>(f: F) -> FnTransition<C>
where
    F: Fn(&mut C) + Send + Sync + 'static,
{
    FnTransition::new(f)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_leaves_context_untouched() {
        let mut value = 7;
        noop().run(&mut value);
        assert_eq!(value, 7);
    }

    #[test]
    fn closure_transition_mutates_context() {
        let increment = action(|n: &mut i32| *n += 1);
        let mut value = 1;
        increment.run(&mut value);
        increment.run(&mut value);
        assert_eq!(value, 3);
    }
}
