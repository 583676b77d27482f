//! Named states.
//!
//! A state is nothing more than its name. Equality, ordering and hashing
//! all derive from the name, so two states built from the same string are
//! interchangeable as table keys and transition targets.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of the terminal state. Compared case-insensitively.
pub const TERMINAL: &str = "end";

/// A named state of a machine.
///
/// States are immutable values created by the caller while describing the
/// machine. The state named `"end"` (in any letter case) is terminal: a run
/// halts as soon as it reaches it.
///
/// # Example
///
/// ```rust
/// use turnstile::core::State;
///
/// let idle = State::new("idle");
/// assert_eq!(idle.to_string(), "idle");
/// assert!(!idle.is_terminal());
///
/// assert!(State::new("END").is_terminal());
/// assert_eq!(State::end(), State::new("end"));
/// ```
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct State {
    name: String,
}

impl State {
    /// Create a state from its name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The canonical terminal state.
    pub fn end() -> Self {
        Self::new(TERMINAL)
    }

    /// Get the state's name.
    pub fn as_str(&self) -> &str {
        &self.name
    }

    /// Check if this is the terminal state.
    ///
    /// Any state whose name equals `"end"` ignoring ASCII case is terminal,
    /// so `"End"` and `"END"` halt a run just like `"end"`.
    pub fn is_terminal(&self) -> bool {
        self.name.eq_ignore_ascii_case(TERMINAL)
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl From<&str> for State {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for State {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl AsRef<str> for State {
    fn as_ref(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeSet, HashSet};

    #[test]
    fn display_returns_name() {
        assert_eq!(State::new("waiting").to_string(), "waiting");
        assert_eq!(State::new("waiting").as_str(), "waiting");
    }

    #[test]
    fn terminal_ignores_case() {
        assert!(State::new("end").is_terminal());
        assert!(State::new("End").is_terminal());
        assert!(State::new("END").is_terminal());
        assert!(!State::new("ending").is_terminal());
        assert!(!State::new("start").is_terminal());
    }

    #[test]
    fn equality_is_by_name() {
        assert_eq!(State::new("a"), State::from("a"));
        assert_eq!(State::from(String::from("a")), State::new("a"));
        assert_ne!(State::new("a"), State::new("A"));
    }

    #[test]
    fn hashing_and_ordering_follow_name() {
        let set: HashSet<State> = ["b", "a", "b"].into_iter().map(State::from).collect();
        assert_eq!(set.len(), 2);

        let ordered: Vec<State> = ["c", "a", "b"]
            .into_iter()
            .map(State::from)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        assert_eq!(
            ordered,
            vec![State::new("a"), State::new("b"), State::new("c")]
        );
    }

    #[test]
    fn state_serializes_as_plain_string() {
        let state = State::new("processing");
        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(json, "\"processing\"");

        let deserialized: State = serde_json::from_str(&json).unwrap();
        assert_eq!(state, deserialized);
    }
}
