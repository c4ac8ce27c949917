// transaction.rs — Transaction: a node in the referral forest.
//
// Each transaction wraps exactly one share action and optionally points
// at a parent transaction. No parent means tree root (the origin
// challenge-share). Children are only ever minted with a fresh store id
// referencing a pre-existing parent id, so construction cannot form a
// cycle; the tree crate still defends against corrupted store data.
//
// The wrapped share action is embedded in the snapshot — the store
// resolves it on every read, graph-query style — so one get_transaction
// is enough to see the current status and user assignment.

use serde::{Deserialize, Serialize};

use crate::share::ShareAction;

/// A transaction snapshot from the directory store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Transaction {
    /// Store-minted identifier.
    pub id: String,

    /// Parent transaction id; `None` for forest roots.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,

    /// The share action this transaction wraps, resolved at read time.
    pub action: ShareAction,
}

impl Transaction {
    /// Roots are origin challenge-shares.
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Input for `create_transaction`. The store mints the id; the share
/// action must already exist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTransactionInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    pub share_action_id: String,
}
