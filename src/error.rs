//! Error types for predicate-argument extraction.

use thiserror::Error;

/// Errors that can occur while constructing a [`crate::token::Parse`] or
/// running extraction over one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PredPattError {
    /// An extraction precondition was violated by the input parse: a token
    /// whose outgoing-edge list was never initialized, a governor index out
    /// of range, or a token unreachable from the syntactic root.
    #[error("malformed parse at position {position}: {reason}")]
    MalformedParse { position: i64, reason: String },

    /// The configured UD schema version is neither v1 nor v2.
    #[error("unsupported UD schema version: {0}")]
    UnsupportedSchema(String),

    /// An engine-internal invariant was violated. This is a programming
    /// error, not a user error, and is never silently recovered from.
    #[error("internal invariant violated: {0}")]
    InvariantViolation(String),
}

/// Result type for predpatt operations.
pub type PredPattResult<T> = Result<T, PredPattError>;
