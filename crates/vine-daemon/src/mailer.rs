// mailer.rs — TracingMailer: the local-mode outbound transport.
//
// Real delivery (SMTP, provider API) is an external collaborator. In
// local mode the daemon logs each outbound email instead of sending it,
// which is enough to drive the full flow end to end.

use tracing::info;
use vine_directory::Deadline;
use vine_mail::{MailError, Mailer, OutboundEmail};

pub struct TracingMailer;

impl Mailer for TracingMailer {
    fn send(&self, email: &OutboundEmail, _deadline: &Deadline) -> Result<(), MailError> {
        info!(
            recipient = %email.recipient,
            sender = %email.sender,
            subject = %email.subject,
            "outbound email (local mode, not delivered)"
        );
        Ok(())
    }
}
