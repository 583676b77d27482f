//! Run history tracking.
//!
//! Records the sequence of steps a run took, one entry per `advance` call
//! that moved the machine.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single step.
///
/// # Example
///
/// ```rust
/// use turnstile::core::{State, StepRecord};
/// use chrono::Utc;
///
/// let step = StepRecord {
///     from: State::new("locked"),
///     to: State::new("unlocked"),
///     timestamp: Utc::now(),
///     step: 1,
/// };
/// assert_eq!(step.to.as_str(), "unlocked");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    /// The state the step started in
    pub from: State,
    /// The target of the accepted candidate
    pub to: State,
    /// When the step completed
    pub timestamp: DateTime<Utc>,
    /// 1-based index of the step within its run
    pub step: usize,
}

/// Ordered history of the steps of one run.
///
/// # Example
///
/// ```rust
/// use turnstile::core::{RunHistory, State, StepRecord};
/// use chrono::Utc;
///
/// let history = RunHistory::new()
///     .record(StepRecord {
///         from: State::new("a"),
///         to: State::new("b"),
///         timestamp: Utc::now(),
///         step: 1,
///     })
///     .record(StepRecord {
///         from: State::new("b"),
///         to: State::end(),
///         timestamp: Utc::now(),
///         step: 2,
///     });
///
/// let path = history.path();
/// assert_eq!(path.len(), 3); // a -> b -> end
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RunHistory {
    steps: Vec<StepRecord>,
}

impl RunHistory {
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Record a step, returning the extended history.
    pub fn record(mut self, step: StepRecord) -> Self {
        self.steps.push(step);
        self
    }

    /// Get the path of states traversed.
    ///
    /// Returns the starting state of the first step followed by the target
    /// of every step. Empty when nothing was recorded.
    pub fn path(&self) -> Vec<&State> {
        let mut path = Vec::with_capacity(self.steps.len() + 1);
        if let Some(first) = self.steps.first() {
            path.push(&first.from);
        }
        path.extend(self.steps.iter().map(|s| &s.to));
        path
    }

    /// Time between the first and last recorded step.
    ///
    /// Returns `None` if there are no steps.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.steps.first()?, self.steps.last()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    pub fn steps(&self) -> &[StepRecord] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(from: &str, to: &str, n: usize) -> StepRecord {
        StepRecord {
            from: State::new(from),
            to: State::new(to),
            timestamp: Utc::now(),
            step: n,
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history = RunHistory::new();
        assert!(history.is_empty());
        assert!(history.path().is_empty());
        assert!(history.duration().is_none());
    }

    #[test]
    fn path_returns_state_sequence() {
        let history = RunHistory::new()
            .record(step("initial", "processing", 1))
            .record(step("processing", "end", 2));

        let path = history.path();
        assert_eq!(path.len(), 3);
        assert_eq!(path[0].as_str(), "initial");
        assert_eq!(path[1].as_str(), "processing");
        assert_eq!(path[2].as_str(), "end");
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn duration_calculates_elapsed_time() {
        let history = RunHistory::new().record(step("a", "b", 1));

        std::thread::sleep(Duration::from_millis(10));

        let history = history.record(step("b", "end", 2));
        let duration = history.duration().unwrap();
        assert!(duration >= Duration::from_millis(10));
    }

    #[test]
    fn single_step_has_zero_duration() {
        let history = RunHistory::new().record(step("a", "end", 1));
        assert_eq!(history.duration(), Some(Duration::from_secs(0)));
    }

    #[test]
    fn history_serializes_correctly() {
        let history = RunHistory::new().record(step("a", "b", 1));

        let json = serde_json::to_string(&history).unwrap();
        let deserialized: RunHistory = serde_json::from_str(&json).unwrap();

        assert_eq!(history, deserialized);
    }
}
