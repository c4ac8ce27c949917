//! # vine-mail
//!
//! The email side of Vine: an ordinary mail client is the transport.
//!
//! Commands ride inside envelope addresses — a recipient local-part
//! starting with `start` opens a challenge; a bcc of the form
//! `share+<transaction-id>@<domain>` records who reshared what. The
//! [`MailRouter`] inspects a normalized inbound message and dispatches
//! accordingly; [`command`] owns the address grammar in both directions
//! so the wire contract has exactly one definition.
//!
//! Outbound concerns (send, attachment storage, URL shortening) are
//! trait seams with in-memory doubles; real transports live outside
//! this repository.

pub mod command;
pub mod error;
pub mod message;
pub mod notify;
pub mod outbound;
pub mod router;
pub mod users;

pub use command::{parse_command, share_address, MailCommand, MalformedAddress};
pub use error::MailError;
pub use message::{Address, Attachment, InboundMessage};
pub use outbound::{
    AttachmentStore, Mailer, MemoryAttachmentStore, MemoryMailer, OutboundEmail,
    PassthroughShortener, UrlShortener,
};
pub use router::{MailRouter, RouteOutcome, RouterConfig};
