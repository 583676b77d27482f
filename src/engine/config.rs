//! Runtime configuration for a machine.

use serde::{Deserialize, Serialize};

/// Settings passed explicitly to a machine at construction.
///
/// Missing fields take their defaults when deserializing, so `{}` is a
/// valid configuration.
///
/// # Example
///
/// ```rust
/// use turnstile::engine::MachineConfig;
///
/// let config = MachineConfig::default().with_debug(true).with_max_steps(100);
/// assert!(config.debug);
/// assert_eq!(config.max_steps, Some(100));
///
/// let parsed: MachineConfig = serde_json::from_str(r#"{"debug": true}"#).unwrap();
/// assert!(parsed.debug);
/// assert!(parsed.record_history);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Emit a `"{machine} - state={state}"` debug event on every advance
    pub debug: bool,

    /// Fail a run after this many advances. Unbounded when `None`.
    pub max_steps: Option<usize>,

    /// Record each step in the run report's history
    pub record_history: bool,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            debug: false,
            max_steps: None,
            record_history: true,
        }
    }
}

impl MachineConfig {
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_max_steps(mut self, limit: usize) -> Self {
        self.max_steps = Some(limit);
        self
    }

    pub fn with_history(mut self, record: bool) -> Self {
        self.record_history = record;
        self
    }
}
