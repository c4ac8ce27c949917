// store.rs — DirectoryStore: the remote graph store interface.
//
// One trait method per remote operation the engine uses, nothing more.
// Every method takes the caller's Deadline and returns a typed failure.
// The production implementation is a remote client owned elsewhere; the
// in-repo implementation is MemoryDirectory (memory.rs).

use vine_model::{
    Challenge, CreateChallengeInput, CreateShareActionContactInput, CreateShareActionInput,
    CreateTransactionInput, CreateUserInput, ShareAction, ShareActionContact, Transaction,
    UpdateShareActionInput, UpdateUserInput, User,
};

use crate::deadline::Deadline;
use crate::error::DirectoryError;

/// The narrow interface to the remote directory store.
///
/// Implementations must treat each call as an independent remote
/// round-trip: no caching, no cross-call state. Entity ids are minted by
/// the store on create.
pub trait DirectoryStore {
    fn create_user(
        &self,
        input: CreateUserInput,
        deadline: &Deadline,
    ) -> Result<User, DirectoryError>;

    fn update_user(
        &self,
        input: UpdateUserInput,
        deadline: &Deadline,
    ) -> Result<User, DirectoryError>;

    fn get_user(&self, id: &str, deadline: &Deadline) -> Result<User, DirectoryError>;

    /// Users whose email set intersects `emails`. Addresses are matched
    /// lowercased.
    fn list_users_by_emails(
        &self,
        emails: &[String],
        deadline: &Deadline,
    ) -> Result<Vec<User>, DirectoryError>;

    fn create_challenge(
        &self,
        input: CreateChallengeInput,
        deadline: &Deadline,
    ) -> Result<Challenge, DirectoryError>;

    fn get_challenge(&self, id: &str, deadline: &Deadline) -> Result<Challenge, DirectoryError>;

    fn create_share_action(
        &self,
        input: CreateShareActionInput,
        deadline: &Deadline,
    ) -> Result<ShareAction, DirectoryError>;

    /// Last-write-wins partial update. Concurrent writers are not
    /// serialized; the engine accepts overwritten assignments.
    fn update_share_action(
        &self,
        input: UpdateShareActionInput,
        deadline: &Deadline,
    ) -> Result<ShareAction, DirectoryError>;

    fn create_share_action_contact(
        &self,
        input: CreateShareActionContactInput,
        deadline: &Deadline,
    ) -> Result<ShareActionContact, DirectoryError>;

    fn create_transaction(
        &self,
        input: CreateTransactionInput,
        deadline: &Deadline,
    ) -> Result<Transaction, DirectoryError>;

    fn get_transaction(&self, id: &str, deadline: &Deadline)
        -> Result<Transaction, DirectoryError>;

    fn list_share_actions_by_challenge_and_user(
        &self,
        challenge_id: &str,
        user_id: &str,
        deadline: &Deadline,
    ) -> Result<Vec<ShareAction>, DirectoryError>;

    fn list_transactions_by_share_action(
        &self,
        share_action_id: &str,
        deadline: &Deadline,
    ) -> Result<Vec<Transaction>, DirectoryError>;
}
