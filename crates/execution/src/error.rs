//! Error types for the execution crate

use thiserror::Error;

/// Errors that can occur while recording execution results
#[derive(Error, Debug)]
pub enum Error {
    /// Execution was interrupted by the continuation policy,
    /// either through cancellation or a prior failure with
    /// continue-on-failure disabled.
    #[error("execution is interrupted: {0}")]
    Interrupted(String),
}

/// Result type for execution operations
pub type Result<T> = std::result::Result<T, Error>;

/// Render an error and its source chain as a multi-line string.
///
/// Stands in for a stack trace in result messages: the first line is the
/// error itself, each following line one `caused by:` entry.
pub fn error_chain(error: &(dyn std::error::Error + 'static)) -> String {
    let mut rendered = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        rendered.push('\n');
        rendered.push_str("caused by: ");
        rendered.push_str(&cause.to_string());
        source = cause.source();
    }
    rendered
}
