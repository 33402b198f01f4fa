//! Error types for building instances.

use crate::validation::ValidationError;
use thiserror::Error;

/// Errors raised while constructing or parsing an [`Instance`].
///
/// [`Instance`]: crate::models::Instance
#[derive(Debug, Error)]
pub enum InstanceError {
    /// A line of instance text could not be read.
    #[error("line {line}: {message}")]
    Parse {
        /// 1-based line number in the source text.
        line: usize,
        /// What went wrong.
        message: String,
    },

    /// The text ended before every job line was read.
    #[error("instance text ended after {found} of {expected} jobs")]
    Truncated {
        /// Jobs announced by the header.
        expected: usize,
        /// Job lines actually present.
        found: usize,
    },

    /// The instance is structurally invalid.
    #[error("invalid instance: {}", join_messages(.0))]
    Invalid(Vec<ValidationError>),
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
