//! Error types for the reconcile crate

use thiserror::Error;

/// Errors that can occur during model resolution.
///
/// "Attribute not found" is not an error at this level: resolvers report
/// it as a failed participant so traversal of siblings continues. Only
/// introspection failures of the model node itself surface here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Introspection of a model node failed
    #[error("model resolution failed: {0}")]
    ResolutionFailed(String),
}

/// Result type for reconciliation operations
pub type Result<T> = std::result::Result<T, Error>;
