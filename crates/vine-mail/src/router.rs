// router.rs — MailRouter: dispatch inbound email commands.
//
// Routing rule, in priority order, all case-insensitive on local-parts:
//   1. primary recipient starts with "start"  → create a challenge
//   2. any bcc starts with "share"            → record a reshare
//   3. otherwise                              → unroutable, logged, ok
//
// Store and transport failures fail the invocation; command-decoding
// failures never do. A malformed share address or an unroutable message
// is logged and absorbed — redelivering a bad email forever helps
// no one.

use serde::Serialize;
use tracing::{info, warn};
use vine_directory::{Deadline, DirectoryStore};
use vine_model::{
    Challenge, CreateChallengeInput, CreateShareActionContactInput, Transaction,
    UpdateShareActionInput,
};
use vine_tree::TreeBuilder;

use crate::command::{parse_command, MailCommand};
use crate::error::MailError;
use crate::message::{Address, InboundMessage};
use crate::notify::send_start_email;
use crate::outbound::{AttachmentStore, Mailer, UrlShortener};
use crate::users::sparse_user;

/// Settings shared by the router and the notifications it sends.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Domain of the command addresses this deployment owns.
    pub mail_domain: String,
    /// Sender address for engine-composed notifications.
    pub sender: String,
    /// Base URL of the reshare landing endpoint.
    pub api_url: String,
    /// Base URL of the client application (apply links, learn-more).
    pub app_url: String,
}

/// What an inbound message amounted to.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RouteOutcome {
    /// A challenge was created with its root transaction.
    ChallengeStarted {
        challenge: Challenge,
        root_transaction: Transaction,
    },

    /// A reshare was recorded against an existing transaction.
    ReshareRecorded {
        transaction_id: String,
        contacts_recorded: usize,
    },

    /// No command found (or an undecodable one). Not a failure.
    Unroutable,
}

/// Inspects inbound messages and runs the command they encode.
pub struct MailRouter<'a, D, M, A, S>
where
    D: DirectoryStore,
    M: Mailer,
    A: AttachmentStore,
    S: UrlShortener,
{
    directory: &'a D,
    mailer: &'a M,
    attachments: &'a A,
    shortener: &'a S,
    config: RouterConfig,
}

impl<'a, D, M, A, S> MailRouter<'a, D, M, A, S>
where
    D: DirectoryStore,
    M: Mailer,
    A: AttachmentStore,
    S: UrlShortener,
{
    pub fn new(
        directory: &'a D,
        mailer: &'a M,
        attachments: &'a A,
        shortener: &'a S,
        config: RouterConfig,
    ) -> Self {
        Self {
            directory,
            mailer,
            attachments,
            shortener,
            config,
        }
    }

    /// Route one normalized inbound message.
    pub fn route(
        &self,
        message: &InboundMessage,
        deadline: &Deadline,
    ) -> Result<RouteOutcome, MailError> {
        if let Some(primary) = message.to.first() {
            if matches!(parse_command(primary), Ok(MailCommand::Start)) {
                return self.handle_start(message, deadline);
            }
        }

        if let Some(bcc) = self.share_bcc(message) {
            return match parse_command(bcc) {
                Ok(MailCommand::Share { transaction_id }) => {
                    self.handle_share(message, &transaction_id, deadline)
                }
                Err(malformed) => {
                    // Lenient by contract: mail clients in the field
                    // produce odd addresses; log and absorb.
                    warn!(address = %bcc.address, "undecodable share address: {}", malformed);
                    Ok(RouteOutcome::Unroutable)
                }
                Ok(MailCommand::Start) => Ok(RouteOutcome::Unroutable),
            };
        }

        warn!(
            to = ?message.to.first().map(|a| a.address.as_str()),
            from = %message.from.address,
            "no route for inbound message"
        );
        Ok(RouteOutcome::Unroutable)
    }

    /// First bcc whose local-part looks share-shaped, decodable or not.
    fn share_bcc<'m>(&self, message: &'m InboundMessage) -> Option<&'m Address> {
        message
            .bcc
            .iter()
            .find(|a| a.local_part().is_some_and(|l| l.starts_with("share")))
    }

    /// Challenge creation: attachments, sparse creator, challenge, root
    /// transaction, start notification.
    fn handle_start(
        &self,
        message: &InboundMessage,
        deadline: &Deadline,
    ) -> Result<RouteOutcome, MailError> {
        let attachment_url = if message.attachments.is_empty() {
            None
        } else {
            match self.attachments.save(&message.attachments, deadline) {
                Ok(urls) => urls.into_iter().next(),
                Err(e) => {
                    // The challenge is worth more than its attachment.
                    warn!("failed to save attachments: {}", e);
                    None
                }
            }
        };

        let creator = sparse_user(self.directory, &message.from.address, deadline)?;

        let challenge = self.directory.create_challenge(
            CreateChallengeInput {
                name: message.first_body_line().to_string(),
                sponsor_name: message.subject.clone(),
                description: message.body.clone(),
                attachment_url,
                ..CreateChallengeInput::default()
            },
            deadline,
        )?;

        let tree = TreeBuilder::new(self.directory);
        let (_, root_transaction) = tree.create_root(&challenge.id, deadline)?;

        send_start_email(
            self.mailer,
            self.shortener,
            &self.config,
            &creator,
            &challenge,
            &root_transaction.id,
            deadline,
        )?;

        info!(
            challenge_id = %challenge.id,
            root_transaction_id = %root_transaction.id,
            "challenge started"
        );
        Ok(RouteOutcome::ChallengeStarted {
            challenge,
            root_transaction,
        })
    }

    /// Reshare recording: attach the sender to the share action
    /// (first touch only), then one contact record per To recipient.
    fn handle_share(
        &self,
        message: &InboundMessage,
        transaction_id: &str,
        deadline: &Deadline,
    ) -> Result<RouteOutcome, MailError> {
        let sharer = sparse_user(self.directory, &message.from.address, deadline)?;

        let transaction = self.directory.get_transaction(transaction_id, deadline)?;
        let action = transaction.action;

        // First touch only. A re-forwarded mail or a duplicate delivery
        // must be a no-op, not an error; concurrent first touches are
        // last-write-wins at the store.
        if action.user_id.is_none() {
            self.directory.update_share_action(
                UpdateShareActionInput {
                    id: action.id.clone(),
                    user_id: Some(sharer.id.clone()),
                    status: None,
                },
                deadline,
            )?;
        }

        let mut contacts_recorded = 0;
        for recipient in &message.to {
            let contact = sparse_user(self.directory, &recipient.address, deadline)?;
            self.directory.create_share_action_contact(
                CreateShareActionContactInput {
                    share_action_id: action.id.clone(),
                    contact_id: contact.id,
                },
                deadline,
            )?;
            contacts_recorded += 1;
        }

        info!(transaction_id, contacts_recorded, "reshare recorded");
        Ok(RouteOutcome::ReshareRecorded {
            transaction_id: transaction_id.to_string(),
            contacts_recorded,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vine_directory::MemoryDirectory;
    use vine_model::ActionStatus;

    use crate::message::Attachment;
    use crate::outbound::{MemoryAttachmentStore, MemoryMailer, PassthroughShortener};

    struct Fixture {
        directory: MemoryDirectory,
        mailer: MemoryMailer,
        attachments: MemoryAttachmentStore,
        shortener: PassthroughShortener,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                directory: MemoryDirectory::new(),
                mailer: MemoryMailer::new(),
                attachments: MemoryAttachmentStore::new("https://files.test"),
                shortener: PassthroughShortener,
            }
        }

        fn router(
            &self,
        ) -> MailRouter<'_, MemoryDirectory, MemoryMailer, MemoryAttachmentStore, PassthroughShortener>
        {
            MailRouter::new(
                &self.directory,
                &self.mailer,
                &self.attachments,
                &self.shortener,
                RouterConfig {
                    mail_domain: "redb.ai".to_string(),
                    sender: "no-reply@redb.ai".to_string(),
                    api_url: "https://api.test".to_string(),
                    app_url: "https://app.test".to_string(),
                },
            )
        }
    }

    fn start_message(to: &str) -> InboundMessage {
        InboundMessage {
            to: vec![Address::new(to)],
            from: Address::new("founder@acme.com"),
            bcc: Vec::new(),
            subject: "Acme Inc".to_string(),
            body: "Find a backend engineer\nWe need help hiring.".to_string(),
            attachments: Vec::new(),
        }
    }

    #[test]
    fn start_email_creates_challenge_root_and_notification() {
        let fx = Fixture::new();
        let deadline = Deadline::none();

        let outcome = fx.router().route(&start_message("start@redb.ai"), &deadline).unwrap();
        let RouteOutcome::ChallengeStarted {
            challenge,
            root_transaction,
        } = outcome
        else {
            panic!("expected ChallengeStarted");
        };

        assert_eq!(challenge.name, "Find a backend engineer");
        assert_eq!(challenge.sponsor_name, "Acme Inc");
        assert_eq!(challenge.description, "Find a backend engineer\nWe need help hiring.");
        assert!(root_transaction.is_root());
        assert_eq!(root_transaction.action.status, ActionStatus::Created);

        // Exactly one start notification, to the creator.
        let sent = fx.mailer.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].recipient, "founder@acme.com");
        assert!(sent[0]
            .html
            .as_deref()
            .unwrap()
            .contains(&root_transaction.id));
    }

    #[test]
    fn start_prefix_matches_case_insensitively() {
        for to in ["START@redb.ai", "start+anything@redb.ai", "Start-hiring@redb.ai"] {
            let fx = Fixture::new();
            let outcome = fx.router().route(&start_message(to), &Deadline::none()).unwrap();
            assert!(matches!(outcome, RouteOutcome::ChallengeStarted { .. }));
        }
    }

    #[test]
    fn start_email_keeps_first_attachment_url() {
        let fx = Fixture::new();
        let mut message = start_message("start@redb.ai");
        message.attachments = vec![Attachment {
            filename: "role.pdf".to_string(),
            content_type: "application/pdf".to_string(),
            data: vec![1],
        }];

        let outcome = fx.router().route(&message, &Deadline::none()).unwrap();
        let RouteOutcome::ChallengeStarted { challenge, .. } = outcome else {
            panic!("expected ChallengeStarted");
        };
        assert_eq!(
            challenge.attachment_url.as_deref(),
            Some("https://files.test/role.pdf")
        );
    }

    #[test]
    fn share_bcc_records_contacts_and_first_touch_user() {
        let fx = Fixture::new();
        let deadline = Deadline::none();

        // Seed a challenge with a root transaction.
        let outcome = fx.router().route(&start_message("start@redb.ai"), &deadline).unwrap();
        let RouteOutcome::ChallengeStarted {
            root_transaction, ..
        } = outcome
        else {
            panic!("expected ChallengeStarted");
        };

        let share = InboundMessage {
            to: vec![
                Address::new("friend-one@example.com"),
                Address::new("friend-two@example.com"),
            ],
            from: Address::new("sharer@example.com"),
            bcc: vec![Address::new(format!(
                "share+{}@redb.ai",
                root_transaction.id
            ))],
            subject: "Check this out".to_string(),
            body: "Worth a look.".to_string(),
            attachments: Vec::new(),
        };

        let outcome = fx.router().route(&share, &deadline).unwrap();
        let RouteOutcome::ReshareRecorded {
            transaction_id,
            contacts_recorded,
        } = outcome
        else {
            panic!("expected ReshareRecorded");
        };
        assert_eq!(transaction_id, root_transaction.id);
        assert_eq!(contacts_recorded, 2);

        // The sharer got first-touch on the share action.
        let reread = fx
            .directory
            .get_transaction(&root_transaction.id, &deadline)
            .unwrap();
        let sharer_id = reread.action.user_id.clone().unwrap();

        // A second delivery of the same share is an idempotent no-op on
        // the user assignment.
        let again = InboundMessage {
            from: Address::new("someone-else@example.com"),
            ..share.clone()
        };
        fx.router().route(&again, &deadline).unwrap();
        let reread = fx
            .directory
            .get_transaction(&root_transaction.id, &deadline)
            .unwrap();
        assert_eq!(reread.action.user_id.as_deref(), Some(sharer_id.as_str()));
    }

    #[test]
    fn malformed_share_address_is_absorbed() {
        let fx = Fixture::new();
        let message = InboundMessage {
            to: vec![Address::new("friend@example.com")],
            from: Address::new("sharer@example.com"),
            bcc: vec![Address::new("shared@redb.ai")],
            subject: String::new(),
            body: String::new(),
            attachments: Vec::new(),
        };

        // No '+' in the bcc: logged, swallowed, invocation succeeds.
        let outcome = fx.router().route(&message, &Deadline::none()).unwrap();
        assert!(matches!(outcome, RouteOutcome::Unroutable));
    }

    #[test]
    fn share_of_unknown_transaction_fails_the_invocation() {
        let fx = Fixture::new();
        let message = InboundMessage {
            to: vec![Address::new("friend@example.com")],
            from: Address::new("sharer@example.com"),
            bcc: vec![Address::new("share+missing@redb.ai")],
            subject: String::new(),
            body: String::new(),
            attachments: Vec::new(),
        };

        let result = fx.router().route(&message, &Deadline::none());
        assert!(matches!(result, Err(MailError::Directory(_))));
    }

    #[test]
    fn plain_mail_is_unroutable_but_ok() {
        let fx = Fixture::new();
        let message = InboundMessage {
            to: vec![Address::new("someone@redb.ai")],
            from: Address::new("other@example.com"),
            bcc: Vec::new(),
            subject: "hello".to_string(),
            body: "just a message".to_string(),
            attachments: Vec::new(),
        };

        let outcome = fx.router().route(&message, &Deadline::none()).unwrap();
        assert!(matches!(outcome, RouteOutcome::Unroutable));
        assert!(fx.mailer.sent().is_empty());
    }
}
