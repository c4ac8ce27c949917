// memory.rs — MemoryDirectory: in-memory DirectoryStore.
//
// Mutex-guarded maps, UUID-minted ids. Used by the test suites and the
// daemon's local mode. Checks the caller's deadline on entry to every
// call, the same place a remote client would fail its request.
//
// Transactions are stored as flat records and materialized on read:
// the embedded share action is resolved fresh each time, the way the
// production graph store resolves nested fields.
//
// update_share_action is last-write-wins: the engine's read-then-write
// races are resolved by whoever writes last, matching the production
// store's behavior.

use std::collections::HashMap;
use std::sync::Mutex;

use uuid::Uuid;
use vine_model::{
    ActionStatus, Challenge, CreateChallengeInput, CreateShareActionContactInput,
    CreateShareActionInput, CreateTransactionInput, CreateUserInput, ShareAction,
    ShareActionContact, Transaction, UpdateShareActionInput, UpdateUserInput, User,
};

use crate::deadline::Deadline;
use crate::error::DirectoryError;
use crate::store::DirectoryStore;

/// Flat transaction row; the share action is joined at read time.
#[derive(Clone)]
struct TransactionRecord {
    id: String,
    parent_id: Option<String>,
    share_action_id: String,
}

#[derive(Default)]
struct Tables {
    users: HashMap<String, User>,
    challenges: HashMap<String, Challenge>,
    share_actions: HashMap<String, ShareAction>,
    share_action_contacts: HashMap<String, ShareActionContact>,
    transactions: HashMap<String, TransactionRecord>,
}

impl Tables {
    fn materialize(&self, record: &TransactionRecord) -> Result<Transaction, DirectoryError> {
        let action = self
            .share_actions
            .get(&record.share_action_id)
            .cloned()
            .ok_or_else(|| DirectoryError::not_found("share action", &record.share_action_id))?;
        Ok(Transaction {
            id: record.id.clone(),
            parent_id: record.parent_id.clone(),
            action,
        })
    }
}

/// In-memory reference implementation of [`DirectoryStore`].
#[derive(Default)]
pub struct MemoryDirectory {
    tables: Mutex<Tables>,
}

impl MemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    fn mint_id() -> String {
        Uuid::new_v4().to_string()
    }

    fn check(deadline: &Deadline, operation: &'static str) -> Result<(), DirectoryError> {
        if deadline.is_expired() {
            return Err(DirectoryError::DeadlineExceeded { operation });
        }
        Ok(())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Tables>, DirectoryError> {
        self.tables.lock().map_err(|_| DirectoryError::Unavailable {
            reason: "store mutex poisoned".to_string(),
        })
    }
}

impl DirectoryStore for MemoryDirectory {
    fn create_user(
        &self,
        input: CreateUserInput,
        deadline: &Deadline,
    ) -> Result<User, DirectoryError> {
        Self::check(deadline, "create_user")?;
        let user = User {
            id: Self::mint_id(),
            identity: input.identity,
            emails: input.emails.iter().map(|e| e.to_lowercase()).collect(),
            names: input.names,
            phone_numbers: input.phone_numbers,
            pictures: input.pictures,
            token: input.token,
            etag: input.etag,
        };
        self.lock()?.users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    fn update_user(
        &self,
        input: UpdateUserInput,
        deadline: &Deadline,
    ) -> Result<User, DirectoryError> {
        Self::check(deadline, "update_user")?;
        let mut tables = self.lock()?;
        let user = tables
            .users
            .get_mut(&input.id)
            .ok_or_else(|| DirectoryError::not_found("user", &input.id))?;
        if let Some(identity) = input.identity {
            user.identity = Some(identity);
        }
        if !input.emails.is_empty() {
            user.emails = input.emails.iter().map(|e| e.to_lowercase()).collect();
        }
        if !input.names.is_empty() {
            user.names = input.names;
        }
        if !input.phone_numbers.is_empty() {
            user.phone_numbers = input.phone_numbers;
        }
        if !input.pictures.is_empty() {
            user.pictures = input.pictures;
        }
        if let Some(token) = input.token {
            user.token = Some(token);
        }
        if let Some(etag) = input.etag {
            user.etag = Some(etag);
        }
        Ok(user.clone())
    }

    fn get_user(&self, id: &str, deadline: &Deadline) -> Result<User, DirectoryError> {
        Self::check(deadline, "get_user")?;
        self.lock()?
            .users
            .get(id)
            .cloned()
            .ok_or_else(|| DirectoryError::not_found("user", id))
    }

    fn list_users_by_emails(
        &self,
        emails: &[String],
        deadline: &Deadline,
    ) -> Result<Vec<User>, DirectoryError> {
        Self::check(deadline, "list_users_by_emails")?;
        let wanted: Vec<String> = emails.iter().map(|e| e.to_lowercase()).collect();
        let tables = self.lock()?;
        let mut found: Vec<User> = tables
            .users
            .values()
            .filter(|u| u.emails.iter().any(|e| wanted.contains(e)))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(found)
    }

    fn create_challenge(
        &self,
        input: CreateChallengeInput,
        deadline: &Deadline,
    ) -> Result<Challenge, DirectoryError> {
        Self::check(deadline, "create_challenge")?;
        let challenge = Challenge {
            id: Self::mint_id(),
            name: input.name,
            sponsor_name: input.sponsor_name,
            description: input.description,
            attachment_url: input.attachment_url,
            active: true,
            off_chain: false,
            max_shares: input.max_shares,
            max_shares_per_received_share: input.max_shares_per_received_share,
            max_depth: input.max_depth,
            max_nodes: input.max_nodes,
            max_reward: input.max_reward,
            expiration: input.expiration,
        };
        self.lock()?
            .challenges
            .insert(challenge.id.clone(), challenge.clone());
        Ok(challenge)
    }

    fn get_challenge(&self, id: &str, deadline: &Deadline) -> Result<Challenge, DirectoryError> {
        Self::check(deadline, "get_challenge")?;
        self.lock()?
            .challenges
            .get(id)
            .cloned()
            .ok_or_else(|| DirectoryError::not_found("challenge", id))
    }

    fn create_share_action(
        &self,
        input: CreateShareActionInput,
        deadline: &Deadline,
    ) -> Result<ShareAction, DirectoryError> {
        Self::check(deadline, "create_share_action")?;
        let action = ShareAction {
            id: Self::mint_id(),
            challenge_id: input.challenge_id,
            user_id: None,
            status: ActionStatus::Created,
            attempt_counter: 0,
        };
        self.lock()?
            .share_actions
            .insert(action.id.clone(), action.clone());
        Ok(action)
    }

    fn update_share_action(
        &self,
        input: UpdateShareActionInput,
        deadline: &Deadline,
    ) -> Result<ShareAction, DirectoryError> {
        Self::check(deadline, "update_share_action")?;
        let mut tables = self.lock()?;
        let action = tables
            .share_actions
            .get_mut(&input.id)
            .ok_or_else(|| DirectoryError::not_found("share action", &input.id))?;
        if let Some(user_id) = input.user_id {
            action.user_id = Some(user_id);
        }
        if let Some(status) = input.status {
            action.status = status;
        }
        Ok(action.clone())
    }

    fn create_share_action_contact(
        &self,
        input: CreateShareActionContactInput,
        deadline: &Deadline,
    ) -> Result<ShareActionContact, DirectoryError> {
        Self::check(deadline, "create_share_action_contact")?;
        let contact = ShareActionContact {
            id: Self::mint_id(),
            share_action_id: input.share_action_id,
            contact_id: input.contact_id,
        };
        self.lock()?
            .share_action_contacts
            .insert(contact.id.clone(), contact.clone());
        Ok(contact)
    }

    fn create_transaction(
        &self,
        input: CreateTransactionInput,
        deadline: &Deadline,
    ) -> Result<Transaction, DirectoryError> {
        Self::check(deadline, "create_transaction")?;
        let mut tables = self.lock()?;
        let record = TransactionRecord {
            id: Self::mint_id(),
            parent_id: input.parent_id,
            share_action_id: input.share_action_id,
        };
        let materialized = tables.materialize(&record)?;
        tables.transactions.insert(record.id.clone(), record);
        Ok(materialized)
    }

    fn get_transaction(
        &self,
        id: &str,
        deadline: &Deadline,
    ) -> Result<Transaction, DirectoryError> {
        Self::check(deadline, "get_transaction")?;
        let tables = self.lock()?;
        let record = tables
            .transactions
            .get(id)
            .cloned()
            .ok_or_else(|| DirectoryError::not_found("transaction", id))?;
        tables.materialize(&record)
    }

    fn list_share_actions_by_challenge_and_user(
        &self,
        challenge_id: &str,
        user_id: &str,
        deadline: &Deadline,
    ) -> Result<Vec<ShareAction>, DirectoryError> {
        Self::check(deadline, "list_share_actions_by_challenge_and_user")?;
        let tables = self.lock()?;
        let mut found: Vec<ShareAction> = tables
            .share_actions
            .values()
            .filter(|a| a.challenge_id == challenge_id && a.user_id.as_deref() == Some(user_id))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(found)
    }

    fn list_transactions_by_share_action(
        &self,
        share_action_id: &str,
        deadline: &Deadline,
    ) -> Result<Vec<Transaction>, DirectoryError> {
        Self::check(deadline, "list_transactions_by_share_action")?;
        let tables = self.lock()?;
        let mut records: Vec<TransactionRecord> = tables
            .transactions
            .values()
            .filter(|t| t.share_action_id == share_action_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| a.id.cmp(&b.id));
        records.iter().map(|r| tables.materialize(r)).collect()
    }
}

// Test-only mutation helpers. The real store has no delete; these exist
// so tree tests can corrupt data the way a bad backfill would.
impl MemoryDirectory {
    #[doc(hidden)]
    pub fn overwrite_transaction_parent(&self, id: &str, parent_id: Option<String>) {
        if let Ok(mut tables) = self.tables.lock() {
            if let Some(record) = tables.transactions.get_mut(id) {
                record.parent_id = parent_id;
            }
        }
    }

    #[doc(hidden)]
    pub fn remove_transaction(&self, id: &str) {
        if let Ok(mut tables) = self.tables.lock() {
            tables.transactions.remove(id);
        }
    }
}
