// builder.rs — TreeBuilder: create and walk referral transactions.
//
// Creation is always two remote calls: share action first, transaction
// second. There is no compensation on partial failure — an orphaned
// share action is an acceptable, detectable byproduct (see TreeError).
//
// Generic over `D: DirectoryStore` so production and test stores plug in
// without changing this code.

use std::collections::HashSet;

use tracing::debug;
use vine_directory::{Deadline, DirectoryError, DirectoryStore};
use vine_model::{CreateShareActionInput, CreateTransactionInput, ShareAction, Transaction};

use crate::error::TreeError;

/// Builds and walks the referral forest through a directory store.
pub struct TreeBuilder<'a, D: DirectoryStore> {
    directory: &'a D,
}

impl<'a, D: DirectoryStore> TreeBuilder<'a, D> {
    pub fn new(directory: &'a D) -> Self {
        Self { directory }
    }

    /// Create a forest root for a challenge: a share action in CREATED,
    /// wrapped by a parentless transaction.
    pub fn create_root(
        &self,
        challenge_id: &str,
        deadline: &Deadline,
    ) -> Result<(ShareAction, Transaction), TreeError> {
        let action = self.create_action(challenge_id, deadline)?;
        let transaction = self.create_transaction(None, &action, deadline)?;
        debug!(
            transaction_id = %transaction.id,
            share_action_id = %action.id,
            challenge_id,
            "created root transaction"
        );
        Ok((action, transaction))
    }

    /// Create a child transaction under `parent_transaction_id`, with a
    /// fresh share action in CREATED.
    ///
    /// The parent id is not validated here: the store has no existence
    /// probe cheaper than a full fetch, so a dangling parent surfaces
    /// later from [`TreeBuilder::resolve_chain`] as `ParentNotFound`.
    pub fn create_child(
        &self,
        parent_transaction_id: &str,
        challenge_id: &str,
        deadline: &Deadline,
    ) -> Result<Transaction, TreeError> {
        let action = self.create_action(challenge_id, deadline)?;
        let transaction =
            self.create_transaction(Some(parent_transaction_id), &action, deadline)?;
        debug!(
            transaction_id = %transaction.id,
            parent_id = parent_transaction_id,
            challenge_id,
            "created child transaction"
        );
        Ok(transaction)
    }

    /// Resolve the ancestor chain of a transaction, root first.
    ///
    /// Walks parent references until none remains. A dangling parent is
    /// `ParentNotFound`; a revisited id is `CycleDetected` — construction
    /// cannot create cycles, but corrupted store data can.
    pub fn resolve_chain(
        &self,
        transaction_id: &str,
        deadline: &Deadline,
    ) -> Result<Vec<Transaction>, TreeError> {
        let mut chain = Vec::new();
        let mut visited = HashSet::new();

        let mut current = self.directory.get_transaction(transaction_id, deadline)?;
        loop {
            if !visited.insert(current.id.clone()) {
                return Err(TreeError::CycleDetected {
                    transaction_id: current.id,
                });
            }
            chain.push(current.clone());

            let Some(parent_id) = current.parent_id.clone() else {
                break;
            };
            if visited.contains(&parent_id) {
                return Err(TreeError::CycleDetected {
                    transaction_id: parent_id,
                });
            }
            current = match self.directory.get_transaction(&parent_id, deadline) {
                Ok(parent) => parent,
                Err(DirectoryError::NotFound { .. }) => {
                    return Err(TreeError::ParentNotFound {
                        parent_id,
                        child_id: current.id,
                    });
                }
                Err(e) => return Err(e.into()),
            };
        }

        chain.reverse();
        Ok(chain)
    }

    /// Whether a share action has no transaction wrapping it — the
    /// detectable byproduct of a failed two-step create.
    pub fn is_orphaned(
        &self,
        share_action_id: &str,
        deadline: &Deadline,
    ) -> Result<bool, TreeError> {
        let wrapping = self
            .directory
            .list_transactions_by_share_action(share_action_id, deadline)?;
        Ok(wrapping.is_empty())
    }

    fn create_action(
        &self,
        challenge_id: &str,
        deadline: &Deadline,
    ) -> Result<ShareAction, TreeError> {
        Ok(self.directory.create_share_action(
            CreateShareActionInput {
                challenge_id: challenge_id.to_string(),
            },
            deadline,
        )?)
    }

    fn create_transaction(
        &self,
        parent_id: Option<&str>,
        action: &ShareAction,
        deadline: &Deadline,
    ) -> Result<Transaction, TreeError> {
        self.directory
            .create_transaction(
                CreateTransactionInput {
                    parent_id: parent_id.map(str::to_string),
                    share_action_id: action.id.clone(),
                },
                deadline,
            )
            .map_err(|source| TreeError::OrphanedShareAction {
                share_action_id: action.id.clone(),
                source,
            })
    }
}
