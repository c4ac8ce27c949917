// message.rs — Normalized inbound message.
//
// Raw parsing (MIME, headers, encodings) happens in the external mail
// collaborator; by the time a message reaches this crate it is already
// a clean structure of addresses, subject, body, and attachments.

use serde::{Deserialize, Serialize};

/// One mailbox address from an envelope field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Address {
    /// The addr-spec, e.g. `share+tx1@redb.ai`.
    pub address: String,

    /// Display name, when the envelope carried one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Address {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            name: None,
        }
    }

    /// The part before `@`, lowercased. `None` when there is no `@`.
    pub fn local_part(&self) -> Option<String> {
        self.address
            .split_once('@')
            .map(|(local, _)| local.to_lowercase())
    }
}

/// An already-extracted attachment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Attachment {
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// A normalized inbound email, ready for routing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundMessage {
    /// To recipients, in envelope order. The first is the primary.
    pub to: Vec<Address>,
    pub from: Address,
    #[serde(default)]
    pub bcc: Vec<Address>,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub body: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
}

impl InboundMessage {
    /// First line of the body, trimmed of the trailing newline only.
    pub fn first_body_line(&self) -> &str {
        self.body.lines().next().unwrap_or("")
    }
}
