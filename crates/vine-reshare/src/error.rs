// error.rs — Error types for reshare generation.

use thiserror::Error;
use vine_directory::DirectoryError;
use vine_mail::MailError;
use vine_tree::TreeError;

/// Errors from [`crate::ReshareGenerator`].
#[derive(Debug, Error)]
pub enum ReshareError {
    /// Challenge lookup or other store failure.
    #[error(transparent)]
    Directory(#[from] DirectoryError),

    /// Child transaction creation failure.
    #[error(transparent)]
    Tree(#[from] TreeError),

    /// Link shortening failure.
    #[error(transparent)]
    Mail(#[from] MailError),
}
