//! Execution states

use serde::{Deserialize, Serialize};
use std::fmt;

/// State of an execution result.
///
/// A result starts in `Executing` and ends in one of the four terminal
/// states. `Computed` is transient: setting it triggers aggregation over
/// the child results and is immediately resolved to a terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutionState {
    /// Work is in progress
    Executing,
    /// Work completed successfully
    Success,
    /// Work completed with a failed outcome (e.g. a failed test)
    Failure,
    /// Work terminated with an unexpected error
    Error,
    /// Work was interrupted by cancellation or the continuation policy
    Interrupted,
    /// Transient marker: resolve the state from the child results
    Computed,
}

impl ExecutionState {
    /// Check if the state is one of the four resting terminal states
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Success | Self::Failure | Self::Error | Self::Interrupted
        )
    }
}

impl fmt::Display for ExecutionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Executing => "executing",
            Self::Success => "success",
            Self::Failure => "failure",
            Self::Error => "error",
            Self::Interrupted => "interrupted",
            Self::Computed => "computed",
        };
        write!(f, "{label}")
    }
}
