// notify.rs — Outbound notifications composed by the engine.
//
// Two of them: the "start" email confirming a freshly created challenge
// (carrying the reshare link for its root transaction), and the welcome
// email sent once on first full sign-up. Both are plain template fills;
// the mailto machinery lives in the reshare crate.

use vine_directory::Deadline;
use vine_model::{Challenge, User};

use crate::error::MailError;
use crate::outbound::{Mailer, OutboundEmail, UrlShortener};
use crate::router::RouterConfig;

/// Send the challenge creator their start confirmation.
///
/// The reshare link points at the root transaction minted for this
/// challenge, so the creator's first forward already re-enters the
/// router with a valid parent.
pub fn send_start_email<M: Mailer, S: UrlShortener>(
    mailer: &M,
    shortener: &S,
    config: &RouterConfig,
    creator: &User,
    challenge: &Challenge,
    root_transaction_id: &str,
    deadline: &Deadline,
) -> Result<(), MailError> {
    let Some(recipient) = creator.primary_email() else {
        return Err(MailError::Send {
            reason: "challenge creator has no email".to_string(),
        });
    };

    let reshare_link = shortener.shorten(
        &format!(
            "{}/reshare?transactionId={}&challengeId={}",
            config.api_url, root_transaction_id, challenge.id
        ),
        deadline,
    )?;

    let html = format!(
        "<p>Thank you for using Vine to help find your {}!</p>\
         <p><a href=\"{}\">Click here to start your search</a></p>\
         <p>To learn more about how Vine works <a href=\"{}\">click here</a></p>",
        challenge.name, reshare_link, config.app_url
    );

    mailer.send(
        &OutboundEmail {
            recipient: recipient.to_string(),
            sender: config.sender.clone(),
            subject: format!(
                "Start recruiting now: {} {}",
                challenge.sponsor_name, challenge.name
            ),
            html: Some(html),
            text: None,
        },
        deadline,
    )
}

/// Send the one-time welcome email after a first full sign-up.
pub fn send_welcome_email<M: Mailer>(
    mailer: &M,
    config: &RouterConfig,
    user: &User,
    deadline: &Deadline,
) -> Result<(), MailError> {
    let Some(recipient) = user.primary_email() else {
        return Err(MailError::Send {
            reason: "user has no email".to_string(),
        });
    };
    let first_name = user
        .names
        .first()
        .and_then(|n| n.split_whitespace().next())
        .unwrap_or("there");

    let html = format!(
        "<p>Welcome {}, thank you for signing up!</p>\
         <p>Vine helps you and your network surface the best referrals \
         from within one another's networks, and makes sure every \
         contribution along the chain is measured and recognized.</p>\
         <p><a href=\"{}\">See how it works</a></p>",
        first_name, config.app_url
    );

    mailer.send(
        &OutboundEmail {
            recipient: recipient.to_string(),
            sender: config.sender.clone(),
            subject: "You're in!".to_string(),
            html: Some(html),
            text: None,
        },
        deadline,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outbound::{MemoryMailer, PassthroughShortener};

    fn config() -> RouterConfig {
        RouterConfig {
            mail_domain: "redb.ai".to_string(),
            sender: "no-reply@redb.ai".to_string(),
            api_url: "https://api.test".to_string(),
            app_url: "https://app.test".to_string(),
        }
    }

    fn creator() -> User {
        User {
            id: "u1".to_string(),
            identity: None,
            emails: vec!["founder@acme.com".to_string()],
            names: vec!["Grace Hopper".to_string()],
            phone_numbers: Vec::new(),
            pictures: Vec::new(),
            token: None,
            etag: None,
        }
    }

    fn challenge() -> Challenge {
        Challenge {
            id: "ch1".to_string(),
            name: "Find a backend engineer".to_string(),
            sponsor_name: "Acme Inc".to_string(),
            description: "We need help hiring.".to_string(),
            attachment_url: None,
            active: true,
            off_chain: false,
            max_shares: None,
            max_shares_per_received_share: None,
            max_depth: None,
            max_nodes: None,
            max_reward: None,
            expiration: None,
        }
    }

    #[test]
    fn start_email_links_the_root_transaction() {
        let mailer = MemoryMailer::new();
        send_start_email(
            &mailer,
            &PassthroughShortener,
            &config(),
            &creator(),
            &challenge(),
            "root-tx",
            &Deadline::none(),
        )
        .unwrap();

        let sent = mailer.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].recipient, "founder@acme.com");
        assert!(sent[0].subject.contains("Acme Inc"));
        let html = sent[0].html.as_deref().unwrap();
        assert!(html.contains("transactionId=root-tx"));
        assert!(html.contains("challengeId=ch1"));
    }

    #[test]
    fn welcome_email_greets_by_first_name() {
        let mailer = MemoryMailer::new();
        send_welcome_email(&mailer, &config(), &creator(), &Deadline::none()).unwrap();

        let sent = mailer.sent();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].html.as_deref().unwrap().contains("Welcome Grace"));
    }
}
