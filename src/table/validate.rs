//! Eager table validation.
//!
//! Selection only discovers problems when it reaches them. Validation walks
//! the whole table up front and accumulates every issue it finds instead of
//! stopping at the first one.

use super::TransitionTable;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// A problem found while validating a table.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TableIssue {
    #[error("State '{from}' targets '{to}', which is neither terminal nor declared")]
    DanglingTarget { from: String, to: String },

    #[error("Malformed guard declaration for state '{state}': {reason}")]
    MalformedGuards { state: String, reason: String },

    #[error("Initial state '{state}' is not terminal and has no candidates")]
    InitialWithoutCandidates { state: String },
}

impl<C> TransitionTable<C> {
    /// Check every candidate of every state, accumulating ALL issues.
    ///
    /// Returns `Validation::Success(())` when every guard shape normalizes
    /// and every target is either terminal or declared as a source.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<TableIssue>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<TableIssue>>> = Vec::new();

        for (state, candidates) in &self.entries {
            for candidate in candidates {
                if let Err(reason) = candidate.guards.resolve() {
                    checks.push(Validation::fail(TableIssue::MalformedGuards {
                        state: state.to_string(),
                        reason,
                    }));
                }

                if !candidate.target.is_terminal() && !self.contains(&candidate.target) {
                    checks.push(Validation::fail(TableIssue::DanglingTarget {
                        from: state.to_string(),
                        to: candidate.target.to_string(),
                    }));
                }
            }
        }

        Validation::all_vec(checks).map(|_| ())
    }
}
