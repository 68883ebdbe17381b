//! Result repository observer port
//!
//! The repository is the subject side of an observer pattern: it receives
//! a notification on every result state change (including construction)
//! and forwards it to interested parties such as progress or UI layers.

use crate::result::{ExecutionResult, ResultId};
use crate::state::ExecutionState;
use std::cell::RefCell;

/// Observer of execution result state changes.
///
/// Implementations must not propagate errors back into the core and
/// should not block the caller; buffer and hand off if delivery is slow.
pub trait ResultRepository {
    /// Called on result construction and on every state change
    fn notify_of_result_state_change(&self, result: &ExecutionResult);
}

/// No-op repository
pub struct NullRepository;

impl ResultRepository for NullRepository {
    fn notify_of_result_state_change(&self, _result: &ExecutionResult) {}
}

/// One observed state-change notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultEvent {
    /// Id of the result within its tree
    pub id: ResultId,
    /// Description of the result at notification time
    pub description: String,
    /// State of the result at notification time
    pub state: ExecutionState,
}

/// Repository that buffers every notification in order.
///
/// Useful for tests and for transports that drain events asynchronously.
#[derive(Debug, Default)]
pub struct RecordingRepository {
    events: RefCell<Vec<ResultEvent>>,
}

impl RecordingRepository {
    /// Create an empty recording repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded events in notification order
    pub fn events(&self) -> Vec<ResultEvent> {
        self.events.borrow().clone()
    }

    /// Number of recorded events
    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    /// Check if no events were recorded
    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }
}

impl ResultRepository for RecordingRepository {
    fn notify_of_result_state_change(&self, result: &ExecutionResult) {
        self.events.borrow_mut().push(ResultEvent {
            id: result.id(),
            description: result.description(),
            state: result.state(),
        });
    }
}
