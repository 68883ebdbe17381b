//! Continuation policy controlling whether execution proceeds after failure

use crate::result::ResultId;
use std::cell::{Cell, RefCell};

/// Reference to the first result that failed under a policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedResult {
    /// Id of the failed result within its tree
    pub id: ResultId,
    /// Description of the failed result
    pub description: String,
}

/// Policy deciding whether processing may continue after a failure
/// or cancellation.
///
/// A policy is created together with the root execution result and
/// shared by every result added under that root. `continue_execution`
/// holds iff the policy isn't cancelled and either continue-on-failure
/// is enabled or no failure has been recorded yet.
///
/// The continue-on-failure directive latches: it defaults to enabled,
/// and only the first explicit enable or disable takes effect. Later
/// directives are ignored.
#[derive(Debug)]
pub struct ContinuationPolicy {
    continue_on_failure: Cell<Option<bool>>,
    cancelled: Cell<bool>,
    failed: RefCell<Option<FailedResult>>,
}

impl ContinuationPolicy {
    /// Create a policy with continue-on-failure enabled and not cancelled
    pub fn new() -> Self {
        Self {
            continue_on_failure: Cell::new(None),
            cancelled: Cell::new(false),
            failed: RefCell::new(None),
        }
    }

    /// Direct execution to continue when a failure is recorded.
    /// Ignored once the directive has been set either way.
    pub fn enable_continue_on_failure(&self) {
        if self.continue_on_failure.get().is_none() {
            self.continue_on_failure.set(Some(true));
        }
    }

    /// Direct execution to stop at the first recorded failure.
    /// Ignored once the directive has been set either way.
    pub fn disable_continue_on_failure(&self) {
        if self.continue_on_failure.get().is_none() {
            self.continue_on_failure.set(Some(false));
        }
    }

    /// Check the continue-on-failure directive
    pub fn is_continue_on_failure(&self) -> bool {
        self.continue_on_failure.get().unwrap_or(true)
    }

    /// Mark the policy as cancelled
    pub fn set_cancelled(&self) {
        self.cancelled.set(true);
    }

    /// Check if the policy is cancelled
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }

    /// Record a failed result. Only the first failure is retained.
    pub fn record_failure(&self, id: ResultId, description: &str) {
        let mut failed = self.failed.borrow_mut();
        if failed.is_none() {
            *failed = Some(FailedResult {
                id,
                description: description.to_string(),
            });
        }
    }

    /// Get the first failed result recorded on this policy
    pub fn failed_result(&self) -> Option<FailedResult> {
        self.failed.borrow().clone()
    }

    /// Check whether execution may continue under this policy
    pub fn continue_execution(&self) -> bool {
        if self.cancelled.get() {
            return false;
        }
        self.is_continue_on_failure() || self.failed.borrow().is_none()
    }
}

impl Default for ContinuationPolicy {
    fn default() -> Self {
        Self::new()
    }
}
