// error.rs — Error types for tree construction and traversal.

use thiserror::Error;
use vine_directory::DirectoryError;

/// Errors from [`crate::TreeBuilder`] operations.
#[derive(Debug, Error)]
pub enum TreeError {
    /// A parent reference did not resolve while walking a chain. Parent
    /// existence is checked lazily — the store offers no existence probe
    /// cheaper than a full fetch — so a child created against a bad
    /// parent id surfaces here, not at creation.
    #[error("parent transaction {parent_id} not found (referenced by {child_id})")]
    ParentNotFound { parent_id: String, child_id: String },

    /// A transaction id reappeared while walking its own ancestry.
    /// Construction cannot produce this; corrupted store data can.
    #[error("cycle detected at transaction {transaction_id}")]
    CycleDetected { transaction_id: String },

    /// The transaction create failed after its share action was already
    /// persisted. The store has no multi-entity transactions; the orphan
    /// is left in place, identified here for the caller to clean up.
    #[error("transaction create failed, share action {share_action_id} orphaned: {source}")]
    OrphanedShareAction {
        share_action_id: String,
        source: DirectoryError,
    },

    /// Any other store failure.
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}
