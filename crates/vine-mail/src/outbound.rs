// outbound.rs — Trait seams for the external send-side collaborators.
//
// Real transports (SMTP/API send, blob storage, the shortening service)
// live outside this repository. Each seam ships with an in-memory
// double so the engine is testable end to end without any of them.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use vine_directory::Deadline;

use crate::error::MailError;
use crate::message::Attachment;

/// An outbound email handed to the mail transport.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutboundEmail {
    pub recipient: String,
    pub sender: String,
    pub subject: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Outbound mail transport.
pub trait Mailer: Send + Sync {
    fn send(&self, email: &OutboundEmail, deadline: &Deadline) -> Result<(), MailError>;
}

/// Attachment persistence: save each attachment, return one URL each.
pub trait AttachmentStore: Send + Sync {
    fn save(
        &self,
        attachments: &[Attachment],
        deadline: &Deadline,
    ) -> Result<Vec<String>, MailError>;
}

/// The link-shortening collaborator.
pub trait UrlShortener: Send + Sync {
    fn shorten(&self, url: &str, deadline: &Deadline) -> Result<String, MailError>;
}

/// Collects outbound emails in memory. Test double.
#[derive(Default)]
pub struct MemoryMailer {
    sent: Mutex<Vec<OutboundEmail>>,
}

impl MemoryMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<OutboundEmail> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

impl Mailer for MemoryMailer {
    fn send(&self, email: &OutboundEmail, _deadline: &Deadline) -> Result<(), MailError> {
        self.sent
            .lock()
            .map_err(|_| MailError::Send {
                reason: "mailer mutex poisoned".to_string(),
            })?
            .push(email.clone());
        Ok(())
    }
}

/// Pretends every attachment was stored, minting a URL from its name.
#[derive(Default)]
pub struct MemoryAttachmentStore {
    base_url: String,
}

impl MemoryAttachmentStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl AttachmentStore for MemoryAttachmentStore {
    fn save(
        &self,
        attachments: &[Attachment],
        _deadline: &Deadline,
    ) -> Result<Vec<String>, MailError> {
        Ok(attachments
            .iter()
            .map(|a| format!("{}/{}", self.base_url, a.filename))
            .collect())
    }
}

/// Returns URLs unshortened. Stand-in for the external shortener.
#[derive(Default)]
pub struct PassthroughShortener;

impl UrlShortener for PassthroughShortener {
    fn shorten(&self, url: &str, _deadline: &Deadline) -> Result<String, MailError> {
        Ok(url.to_string())
    }
}
