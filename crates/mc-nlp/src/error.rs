//! Interpretation error types.

use thiserror::Error;

use crate::classify::CommandFamily;

/// Why a sentence could not be turned into a command.
///
/// Every variant is terminal for the current `parse` call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InterpretError {
    /// No command family, or no shape within a draw command, was found.
    #[error("cannot interpret '{text}': {reason}")]
    AmbiguousInput { text: String, reason: String },

    /// Strict mode only: a required field had no textual match.
    #[error("missing required parameter '{field}'")]
    MissingParameter { field: &'static str },

    /// The family is recognized but has no command parser.
    #[error("'{family}' commands are not supported")]
    UnsupportedOperation { family: CommandFamily },
}

impl InterpretError {
    pub(crate) fn ambiguous(text: &str, reason: impl Into<String>) -> Self {
        Self::AmbiguousInput {
            text: text.to_string(),
            reason: reason.into(),
        }
    }
}

/// Convenience alias for interpretation results.
pub type InterpretResult<T> = Result<T, InterpretError>;
