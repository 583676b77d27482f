//! State machine that runs a transition table to completion.

use crate::core::{RunHistory, State, StepRecord};
use crate::engine::config::MachineConfig;
use crate::error::EngineError;
use crate::table::{Declaration, TableIssue, TransitionTable};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use uuid::Uuid;

const CONSTRUCTED: u8 = 0;
const RUNNING: u8 = 1;
const HALTED: u8 = 2;

/// Lifecycle of a machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Built, never run
    Constructed,
    /// Inside `run`
    Running,
    /// Last run reached the terminal state or failed
    Halted,
}

impl Phase {
    fn from_raw(raw: u8) -> Self {
        match raw {
            CONSTRUCTED => Self::Constructed,
            RUNNING => Self::Running,
            _ => Self::Halted,
        }
    }
}

/// Marks a machine as running for as long as it is alive.
struct RunGuard<'a> {
    phase: &'a AtomicU8,
}

impl<'a> RunGuard<'a> {
    /// Returns `None` if the machine is already running.
    fn enter(phase: &'a AtomicU8) -> Option<Self> {
        (phase.swap(RUNNING, Ordering::AcqRel) != RUNNING).then(|| Self { phase })
    }
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.phase.store(HALTED, Ordering::Release);
    }
}

/// Outcome of a completed run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub machine: String,
    /// The terminal state the run stopped at
    pub final_state: State,
    /// Number of `advance` calls made
    pub steps: usize,
    /// Empty unless history recording is enabled
    pub history: RunHistory,
}

/// Condition-gated state machine.
///
/// Holds an initial state and an immutable transition table. `run` starts
/// from the initial state and keeps advancing until the terminal state is
/// reached. All effects happen through the transitions, which mutate the
/// caller's context.
///
/// # Example
///
/// ```rust
/// use turnstile::core::{action, ambiguous, when, State};
/// use turnstile::engine::StateMachine;
/// use turnstile::table::Declaration;
///
/// #[derive(Default)]
/// struct Gate {
///     coins: u32,
///     passed: u32,
/// }
///
/// let machine = StateMachine::new(
///     "gate",
///     "locked",
///     vec![
///         Declaration::new("locked", ambiguous(|g: &Gate| g.coins > 0), action(|g: &mut Gate| g.coins -= 1), "unlocked"),
///         Declaration::new("locked", when(|_: &Gate| true), action(|_: &mut Gate| {}), "end"),
///         Declaration::new("unlocked", when(|_: &Gate| true), action(|g: &mut Gate| g.passed += 1), "locked"),
///     ],
/// );
///
/// let mut gate = Gate { coins: 2, passed: 0 };
/// let report = machine.run(&mut gate).unwrap();
///
/// assert_eq!(gate.passed, 2);
/// assert_eq!(gate.coins, 0);
/// assert_eq!(report.final_state, State::end());
/// assert_eq!(report.steps, 5);
/// ```
pub struct StateMachine<C> {
    name: String,
    initial: State,
    table: TransitionTable<C>,
    config: MachineConfig,
    phase: AtomicU8,
}

impl<C> StateMachine<C> {
    /// Create a machine with the default configuration.
    pub fn new<I>(name: impl Into<String>, initial: impl Into<State>, declarations: I) -> Self
    where
        I: IntoIterator<Item = Declaration<C>>,
    {
        Self::with_config(name, initial, declarations, MachineConfig::default())
    }

    /// Create a machine with an explicit configuration.
    pub fn with_config<I>(
        name: impl Into<String>,
        initial: impl Into<State>,
        declarations: I,
        config: MachineConfig,
    ) -> Self
    where
        I: IntoIterator<Item = Declaration<C>>,
    {
        Self {
            name: name.into(),
            initial: initial.into(),
            table: TransitionTable::new(declarations),
            config,
            phase: AtomicU8::new(CONSTRUCTED),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn initial_state(&self) -> &State {
        &self.initial
    }

    pub fn table(&self) -> &TransitionTable<C> {
        &self.table
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        Phase::from_raw(self.phase.load(Ordering::Acquire))
    }

    /// Validate the table and the initial state, accumulating ALL issues.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<TableIssue>> {
        let initial = if self.initial.is_terminal() || self.table.contains(&self.initial) {
            Validation::success(())
        } else {
            Validation::fail(TableIssue::InitialWithoutCandidates {
                state: self.initial.to_string(),
            })
        };

        Validation::all_vec(vec![initial, self.table.validate()]).map(|_| ())
    }

    /// Execute one selection cycle from `state`.
    ///
    /// A terminal state is returned unchanged without a lookup. Otherwise
    /// the first candidate that is not deflected is accepted, the
    /// transitions its guards authorize are run, and its target is
    /// returned.
    pub fn advance(&self, state: &State, ctx: &mut C) -> Result<State, EngineError> {
        if self.config.debug {
            tracing::debug!(machine = %self.name, state = %state, "{} - state={}", self.name, state);
        }

        self.table
            .select(state, ctx)?
            .ok_or_else(|| EngineError::NoMatch {
                machine: self.name.clone(),
                state: state.to_string(),
            })
    }

    /// Advance from the initial state until the terminal state is reached.
    ///
    /// The run is all-or-nothing: the first error aborts it, leaving
    /// whatever effects the transitions already applied to `ctx`. Calling
    /// `run` on a machine that is already running (for example from inside
    /// one of its own transitions) fails with
    /// [`EngineError::AlreadyRunning`] without touching `ctx`.
    pub fn run(&self, ctx: &mut C) -> Result<RunReport, EngineError> {
        let _running = RunGuard::enter(&self.phase).ok_or_else(|| EngineError::AlreadyRunning {
            machine: self.name.clone(),
        })?;

        let run_id = Uuid::new_v4();
        let span = tracing::debug_span!("run", machine = %self.name, run_id = %run_id);
        let _entered = span.enter();

        let mut current = self.initial.clone();
        let mut history = RunHistory::new();
        let mut steps = 0;

        while !current.is_terminal() {
            if let Some(limit) = self.config.max_steps {
                if steps >= limit {
                    tracing::warn!(limit, state = %current, "step limit reached");
                    return Err(EngineError::StepLimitExceeded {
                        machine: self.name.clone(),
                        limit,
                    });
                }
            }

            let next = self.advance(&current, ctx)?;
            steps += 1;

            let from = std::mem::replace(&mut current, next);
            if self.config.record_history {
                history = history.record(StepRecord {
                    from,
                    to: current.clone(),
                    timestamp: Utc::now(),
                    step: steps,
                });
            }
        }

        tracing::debug!(steps, final_state = %current, "run complete");

        Ok(RunReport {
            run_id,
            machine: self.name.clone(),
            final_state: current,
            steps,
            history,
        })
    }
}

impl<C> fmt::Debug for StateMachine<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateMachine")
            .field("name", &self.name)
            .field("initial", &self.initial)
            .field("states", &self.table.len())
            .field("config", &self.config)
            .field("phase", &self.phase())
            .finish()
    }
}
