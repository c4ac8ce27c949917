// users.rs — User upsert paths.
//
// Two ways a user record comes to exist:
//
// - sparse_user: first observation of an email address on an inbound
//   message. Lookup by lowercased email; create with just the email on
//   miss. Idempotent — re-observing the same address returns the
//   existing record, never a duplicate.
//
// - create_or_update_user: the sign-in enrichment path. The OAuth
//   handshake itself happens elsewhere; this function receives the
//   resulting profile and either fills in an existing (possibly sparse)
//   record or creates a complete one.

use serde::{Deserialize, Serialize};
use tracing::debug;
use vine_directory::{Deadline, DirectoryStore};
use vine_model::{CreateUserInput, UpdateUserInput, User};

use crate::error::MailError;

/// Profile fields obtained from a completed sign-in.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SignInProfile {
    pub identity: String,
    pub emails: Vec<String>,
    pub names: Vec<String>,
    pub phone_numbers: Vec<String>,
    pub pictures: Vec<String>,
    pub refresh_token: Option<String>,
    pub etag: Option<String>,
}

/// Find-or-create a user from nothing but an email address.
pub fn sparse_user<D: DirectoryStore>(
    directory: &D,
    email: &str,
    deadline: &Deadline,
) -> Result<User, MailError> {
    let email = email.to_lowercase();
    let existing = directory.list_users_by_emails(&[email.clone()], deadline)?;
    if let Some(user) = existing.into_iter().next() {
        return Ok(user);
    }

    debug!(email = %email, "creating sparse user");
    Ok(directory.create_user(CreateUserInput::sparse(email), deadline)?)
}

/// Apply a sign-in profile: update the matching user, or create one.
///
/// Returns the user and whether it was newly created — callers send the
/// welcome notification only on first creation.
pub fn create_or_update_user<D: DirectoryStore>(
    directory: &D,
    profile: SignInProfile,
    deadline: &Deadline,
) -> Result<(User, bool), MailError> {
    let existing = directory.list_users_by_emails(&profile.emails, deadline)?;

    if let Some(user) = existing.into_iter().next() {
        debug!(user_id = %user.id, "enriching existing user from sign-in");
        let updated = directory.update_user(
            UpdateUserInput {
                id: user.id,
                identity: Some(profile.identity),
                emails: profile.emails,
                names: profile.names,
                phone_numbers: profile.phone_numbers,
                pictures: profile.pictures,
                token: profile.refresh_token,
                etag: profile.etag,
            },
            deadline,
        )?;
        return Ok((updated, false));
    }

    debug!("creating user from sign-in");
    let created = directory.create_user(
        CreateUserInput {
            emails: profile.emails,
            identity: Some(profile.identity),
            names: profile.names,
            phone_numbers: profile.phone_numbers,
            pictures: profile.pictures,
            token: profile.refresh_token,
            etag: profile.etag,
        },
        deadline,
    )?;
    Ok((created, true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use vine_directory::MemoryDirectory;

    #[test]
    fn sparse_user_creates_once_then_reuses() {
        let store = MemoryDirectory::new();
        let deadline = Deadline::none();

        let first = sparse_user(&store, "Kirk@Example.com", &deadline).unwrap();
        let second = sparse_user(&store, "kirk@example.com", &deadline).unwrap();
        assert_eq!(first.id, second.id);
        assert!(first.is_sparse());
    }

    #[test]
    fn sign_in_enriches_a_sparse_user_in_place() {
        let store = MemoryDirectory::new();
        let deadline = Deadline::none();

        let sparse = sparse_user(&store, "ada@example.com", &deadline).unwrap();

        let (enriched, created) = create_or_update_user(
            &store,
            SignInProfile {
                identity: "auth0|42".to_string(),
                emails: vec!["ada@example.com".to_string()],
                names: vec!["Ada Lovelace".to_string()],
                refresh_token: Some("refresh-token".to_string()),
                ..SignInProfile::default()
            },
            &deadline,
        )
        .unwrap();

        assert!(!created);
        assert_eq!(enriched.id, sparse.id);
        assert_eq!(enriched.identity.as_deref(), Some("auth0|42"));
        assert_eq!(enriched.names, vec!["Ada Lovelace"]);
        assert!(!enriched.is_sparse());
    }

    #[test]
    fn sign_in_with_unknown_email_creates_a_full_user() {
        let store = MemoryDirectory::new();
        let deadline = Deadline::none();

        let (user, created) = create_or_update_user(
            &store,
            SignInProfile {
                identity: "auth0|7".to_string(),
                emails: vec!["new@example.com".to_string()],
                names: vec!["New Person".to_string()],
                ..SignInProfile::default()
            },
            &deadline,
        )
        .unwrap();

        assert!(created);
        assert_eq!(user.emails, vec!["new@example.com"]);
        assert!(!user.is_sparse());
    }
}
