//! Errors raised while interpreting recommendation requests.
#![forbid(unsafe_code)]

use thiserror::Error;

/// A `max_results` value that is neither absent, `null`, nor an integer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MaxResultsError {
    /// The value was a float, string, boolean, array or object.
    #[error("max_results must be an integer, got {found}")]
    NotAnInteger {
        /// JSON rendering of the rejected value.
        found: String,
    },
}
