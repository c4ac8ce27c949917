// error.rs — Error types for directory store calls.
//
// Uses `thiserror` to derive the standard Rust `Error` trait.
// `Unavailable` covers every transport-level failure of the remote
// store; callers propagate it to the invocation boundary and let the
// triggering collaborator apply its own retry policy.

use thiserror::Error;

/// Errors returned by [`crate::DirectoryStore`] operations.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// The id does not resolve to an entity of the expected kind.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    /// The caller's deadline was spent before the call could run.
    #[error("deadline exceeded before {operation}")]
    DeadlineExceeded { operation: &'static str },

    /// The remote store could not be reached or rejected the call.
    #[error("directory store unavailable: {reason}")]
    Unavailable { reason: String },
}

impl DirectoryError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        DirectoryError::NotFound {
            entity,
            id: id.into(),
        }
    }
}
