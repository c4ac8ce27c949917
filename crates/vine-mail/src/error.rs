// error.rs — Error types for mail processing.
//
// The split matters here: store and transport failures propagate to the
// invocation boundary (the trigger's own retry policy takes over);
// routing-local problems — malformed command addresses, unroutable
// messages — are logged and absorbed, because a bad email must not be
// redelivered forever.

use thiserror::Error;
use vine_directory::DirectoryError;
use vine_tree::TreeError;

/// Errors that fail a mail invocation.
#[derive(Debug, Error)]
pub enum MailError {
    /// Directory store failure.
    #[error(transparent)]
    Directory(#[from] DirectoryError),

    /// Tree construction failure.
    #[error(transparent)]
    Tree(#[from] TreeError),

    /// Outbound send failure.
    #[error("mail send failed: {reason}")]
    Send { reason: String },

    /// Attachment persistence failure.
    #[error("attachment save failed: {reason}")]
    Attachments { reason: String },

    /// URL shortener failure.
    #[error("url shortening failed: {reason}")]
    Shorten { reason: String },
}
