// user.rs — User: a person known to the directory store.
//
// Users enter the system two ways:
// - Sparse: created from nothing but an observed email address on an
//   inbound message. Everything except `emails` is empty.
// - Enriched: filled in via OAuth sign-in (identity, display names,
//   phone numbers, photos, refresh token).
//
// Re-creation by email must update, never duplicate — the upsert lives
// in the mail crate's sparse-user path; this crate only defines shapes.

use serde::{Deserialize, Serialize};

/// A user snapshot from the directory store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    /// Store-minted identifier.
    pub id: String,

    /// External auth subject (set on OAuth sign-in, absent for sparse users).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity: Option<String>,

    /// Email addresses. The unique lookup key; lowercased on write.
    pub emails: Vec<String>,

    /// Display names.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub names: Vec<String>,

    /// Phone numbers.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub phone_numbers: Vec<String>,

    /// Profile photo URLs.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pictures: Vec<String>,

    /// Opaque OAuth refresh credential. Never interpreted here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Version tag from the contact source, used on re-import.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
}

impl User {
    /// Primary email, if the user has any.
    pub fn primary_email(&self) -> Option<&str> {
        self.emails.first().map(String::as_str)
    }

    /// A user is sparse until sign-in attaches an identity.
    pub fn is_sparse(&self) -> bool {
        self.identity.is_none()
    }
}

/// Input for `create_user`. The store mints the id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateUserInput {
    pub emails: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub names: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub phone_numbers: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pictures: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
}

impl CreateUserInput {
    /// Input for a sparse user: one email, nothing else.
    pub fn sparse(email: impl Into<String>) -> Self {
        Self {
            emails: vec![email.into()],
            ..Self::default()
        }
    }
}

/// Input for `update_user`. Only supplied fields are touched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUserInput {
    /// Id of the user to update.
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub emails: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub names: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub phone_numbers: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pictures: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sparse_input_carries_only_the_email() {
        let input = CreateUserInput::sparse("kirk@example.com");
        assert_eq!(input.emails, vec!["kirk@example.com"]);
        assert!(input.identity.is_none());
        assert!(input.names.is_empty());
        assert!(input.token.is_none());
    }

    #[test]
    fn sparse_user_reports_sparse_until_identity_set() {
        let mut user = User {
            id: "u1".to_string(),
            identity: None,
            emails: vec!["a@example.com".to_string()],
            names: Vec::new(),
            phone_numbers: Vec::new(),
            pictures: Vec::new(),
            token: None,
            etag: None,
        };
        assert!(user.is_sparse());
        user.identity = Some("auth0|123".to_string());
        assert!(!user.is_sparse());
    }

    #[test]
    fn empty_optional_fields_omitted_from_json() {
        let user = User {
            id: "u1".to_string(),
            identity: None,
            emails: vec!["a@example.com".to_string()],
            names: Vec::new(),
            phone_numbers: Vec::new(),
            pictures: Vec::new(),
            token: None,
            etag: None,
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("identity"));
        assert!(!json.contains("token"));
        assert!(!json.contains("names"));
    }
}
