//! # Execution
//!
//! Hierarchical execution result tracking for long-running operations.
//!
//! This crate provides the building blocks for recording the outcome of
//! a composite operation as a tree of results:
//!
//! - **ExecutionResult**: One node of the result tree, with a state
//!   machine, timing, and attached messages
//! - **ContinuationPolicy**: Shared per-tree policy deciding whether
//!   execution continues after failure or cancellation
//! - **ResultRepository**: Observer port notified on every state change
//! - **MessageCatalog**: Key-to-template message lookup with positional
//!   argument substitution
//!
//! ## Example
//!
//! ```
//! use execution::{ExecutionResult, ExecutionState};
//!
//! let root = ExecutionResult::new("Deploy application");
//! let step = root.add_child("Copy artifacts")?;
//! step.set_state(ExecutionState::Success);
//!
//! // Aggregate child outcomes into the root state
//! root.set_state(ExecutionState::Computed);
//! assert!(root.is_success());
//! # Ok::<(), execution::Error>(())
//! ```
//!
//! A result completes either directly through [`ExecutionResult::set_state`]
//! or through the `complete_as_*` helpers which also attach catalog
//! messages. Setting [`ExecutionState::Computed`] aggregates the child
//! states with error dominating interruption, interruption dominating
//! failure, and failure dominating success.

pub mod catalog;
pub mod error;
pub mod messages;
pub mod policy;
pub mod repository;
pub mod result;
pub mod state;

// Re-export main types at crate root
pub use catalog::{MessageCatalog, MessageProvider};
pub use error::{Error, Result, error_chain};
pub use messages::{
    MSG_COMPOSITE, MSG_ERROR_MESSAGE, MSG_MESSAGE, MSG_REPORT, MSG_STACKTRACE, MessageBag,
};
pub use policy::{ContinuationPolicy, FailedResult};
pub use repository::{NullRepository, RecordingRepository, ResultEvent, ResultRepository};
pub use result::{ExecutionResult, ResultId};
pub use state::ExecutionState;
