//! Executor error types.

use thiserror::Error;

/// Errors that can occur while carrying out a parsed command.
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("parameter '{key}' is missing or is not a {expected}")]
    InvalidParameter {
        key: &'static str,
        expected: &'static str,
    },

    #[error("CAD backend error: {0}")]
    Backend(String),
}

/// Convenience alias for executor results.
pub type ExecResult<T> = Result<T, ExecError>;
