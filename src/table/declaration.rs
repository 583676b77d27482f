//! Table declarations and the registry behind declarative guard shapes.
//!
//! A declaration names a source state, the guards of one candidate and the
//! candidate's target. Guards are given either as typed values or as a JSON
//! shape naming conditions and transitions held in a [`Registry`]. Shapes
//! are only normalized when the table first selects from the source state,
//! so a malformed one surfaces as a configuration error at that point.

use super::guard::Guard;
use crate::core::{Always, Condition, Noop, State, Transition};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Arc;

/// Named conditions and transitions referenced by declarative shapes.
///
/// New registries come with `"always"`, `"always?"` (the ambiguous variant)
/// and `"noop"` pre-registered.
///
/// # Example
///
/// ```rust
/// use turnstile::core::{action, ambiguous};
/// use turnstile::table::Registry;
///
/// let registry = Registry::new()
///     .condition("has_coin", ambiguous(|coins: &u32| *coins > 0))
///     .transition("take_coin", action(|coins: &mut u32| *coins -= 1));
///
/// assert!(registry.has_condition("has_coin"));
/// assert!(registry.has_transition("noop"));
/// ```
pub struct Registry<C> {
    conditions: HashMap<String, Arc<dyn Condition<C>>>,
    transitions: HashMap<String, Arc<dyn Transition<C>>>,
}

impl<C> Registry<C> {
    pub fn new() -> Self {
        let mut conditions: HashMap<String, Arc<dyn Condition<C>>> = HashMap::new();
        conditions.insert("always".to_string(), Arc::new(Always::new()));
        conditions.insert("always?".to_string(), Arc::new(Always::ambiguous()));

        let mut transitions: HashMap<String, Arc<dyn Transition<C>>> = HashMap::new();
        transitions.insert("noop".to_string(), Arc::new(Noop));

        Self {
            conditions,
            transitions,
        }
    }

    /// Register a condition under a name, replacing any previous one.
    pub fn condition<K>(mut self, name: impl Into<String>, condition: K) -> Self
    where
        K: Condition<C> + 'static,
    {
        self.conditions.insert(name.into(), Arc::new(condition));
        self
    }

    /// Register a transition under a name, replacing any previous one.
    pub fn transition<T>(mut self, name: impl Into<String>, transition: T) -> Self
    where
        T: Transition<C> + 'static,
    {
        self.transitions.insert(name.into(), Arc::new(transition));
        self
    }

    pub fn has_condition(&self, name: &str) -> bool {
        self.conditions.contains_key(name)
    }

    pub fn has_transition(&self, name: &str) -> bool {
        self.transitions.contains_key(name)
    }

    /// Normalize a guard shape into guards.
    ///
    /// Accepted shapes are a single pair `["cond", "t"]` or
    /// `["cond", ["t1", "t2"]]`, or a list of such pairs. Anything else is
    /// rejected with a description of what was found.
    pub(crate) fn resolve(&self, shape: &Value) -> Result<Vec<Guard<C>>, String> {
        let items = shape.as_array().ok_or_else(|| {
            format!("expected a guard pair or a list of guard pairs, found {shape}")
        })?;

        if let [Value::String(condition), transitions] = items.as_slice() {
            return Ok(vec![self.guard(condition, transitions)?]);
        }

        items
            .iter()
            .map(|pair| match pair.as_array().map(Vec::as_slice) {
                Some([Value::String(condition), transitions]) => {
                    self.guard(condition, transitions)
                }
                _ => Err(format!(
                    "expected a [condition, transition(s)] pair, found {pair}"
                )),
            })
            .collect()
    }

    fn guard(&self, condition: &str, transitions: &Value) -> Result<Guard<C>, String> {
        let condition = self
            .conditions
            .get(condition)
            .cloned()
            .ok_or_else(|| format!("unknown condition '{condition}'"))?;

        let names = match transitions {
            Value::String(name) => vec![name.as_str()],
            Value::Array(list) => list
                .iter()
                .map(|v| {
                    v.as_str()
                        .ok_or_else(|| format!("transition names must be strings, found {v}"))
                })
                .collect::<Result<Vec<_>, _>>()?,
            other => {
                return Err(format!(
                    "expected a transition name or a list of names, found {other}"
                ))
            }
        };

        let transitions = names
            .into_iter()
            .map(|name| {
                self.transitions
                    .get(name)
                    .cloned()
                    .ok_or_else(|| format!("unknown transition '{name}'"))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Guard::from_parts(condition, transitions))
    }
}

impl<C> Default for Registry<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Guards of one candidate, either ready or awaiting normalization.
pub(crate) enum GuardSet<C> {
    Resolved(Vec<Guard<C>>),
    Deferred {
        shape: Value,
        registry: Arc<Registry<C>>,
    },
}

impl<C> GuardSet<C> {
    pub(crate) fn resolve(&self) -> Result<Cow<'_, [Guard<C>]>, String> {
        match self {
            Self::Resolved(guards) => Ok(Cow::Borrowed(guards.as_slice())),
            Self::Deferred { shape, registry } => registry.resolve(shape).map(Cow::Owned),
        }
    }
}

/// One entry of a transition table: a candidate way out of `source`.
///
/// # Example
///
/// ```rust
/// use turnstile::core::{action, always, ambiguous, noop};
/// use turnstile::table::{Declaration, Guard};
///
/// // One-guard shorthand
/// let simple: Declaration<i32> = Declaration::new("start", always(), noop(), "end");
///
/// // Several guards for one candidate
/// let multi = Declaration::guarded(
///     "start",
///     vec![
///         Guard::check(ambiguous(|n: &i32| *n > 0)),
///         Guard::new(always(), action(|n: &mut i32| *n -= 1)),
///     ],
///     "start",
/// );
///
/// assert_eq!(simple.target().as_str(), "end");
/// assert_eq!(multi.source().as_str(), "start");
/// ```
pub struct Declaration<C> {
    pub(crate) source: State,
    pub(crate) guards: GuardSet<C>,
    pub(crate) target: State,
}

impl<C> Declaration<C> {
    /// Shorthand for a candidate with a single guard.
    pub fn new<K, T>(
        source: impl Into<State>,
        condition: K,
        transition: T,
        target: impl Into<State>,
    ) -> Self
    where
        K: Condition<C> + 'static,
        T: Transition<C> + 'static,
    {
        Self::guarded(source, vec![Guard::new(condition, transition)], target)
    }

    /// A candidate with an explicit, ordered list of guards.
    pub fn guarded(source: impl Into<State>, guards: Vec<Guard<C>>, target: impl Into<State>) -> Self {
        Self {
            source: source.into(),
            guards: GuardSet::Resolved(guards),
            target: target.into(),
        }
    }

    /// A candidate whose guards are given as a shape over `registry`.
    ///
    /// The shape is not inspected here; see [`Registry`] for what is
    /// accepted.
    pub fn from_shape(
        source: impl Into<State>,
        shape: Value,
        target: impl Into<State>,
        registry: Arc<Registry<C>>,
    ) -> Self {
        Self {
            source: source.into(),
            guards: GuardSet::Deferred { shape, registry },
            target: target.into(),
        }
    }

    pub fn source(&self) -> &State {
        &self.source
    }

    pub fn target(&self) -> &State {
        &self.target
    }
}

/// Serializable form of a declarative declaration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeclarationDef {
    pub from: State,
    pub guards: Value,
    pub to: State,
}

impl DeclarationDef {
    pub fn into_declaration<C>(self, registry: &Arc<Registry<C>>) -> Declaration<C> {
        Declaration::from_shape(self.from, self.guards, self.to, Arc::clone(registry))
    }
}
