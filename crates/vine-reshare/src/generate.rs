// generate.rs — ReshareGenerator: child transaction + mailto payload.
//
// generate() is one landing-page hit: fetch the challenge, mint a child
// transaction under the given parent, compose the mailto URI, wrap it
// in the redirect page. The templates are fixed; only the minted id and
// the shortener's outputs vary between calls with the same inputs.

use tracing::info;
use urlencoding::encode;
use vine_directory::{Deadline, DirectoryStore};
use vine_mail::{share_address, UrlShortener};
use vine_tree::TreeBuilder;

use crate::error::ReshareError;
use crate::page::render_page;

/// Settings for reshare composition.
#[derive(Debug, Clone)]
pub struct ReshareConfig {
    /// Domain of the command addresses this deployment owns.
    pub mail_domain: String,
    /// Base URL of the reshare landing endpoint.
    pub api_url: String,
    /// Base URL of the client application (apply links).
    pub app_url: String,
}

/// Produces the reshare payload for a (challenge, transaction) pair.
pub struct ReshareGenerator<'a, D: DirectoryStore, S: UrlShortener> {
    directory: &'a D,
    shortener: &'a S,
    config: ReshareConfig,
}

impl<'a, D: DirectoryStore, S: UrlShortener> ReshareGenerator<'a, D, S> {
    pub fn new(directory: &'a D, shortener: &'a S, config: ReshareConfig) -> Self {
        Self {
            directory,
            shortener,
            config,
        }
    }

    /// Mint a child of `parent_transaction_id` and render the landing
    /// page that opens a pre-filled mail client.
    ///
    /// The bcc command address references the freshly minted child —
    /// never the parent — so each forward extends the tree by one node.
    pub fn generate(
        &self,
        challenge_id: &str,
        parent_transaction_id: &str,
        deadline: &Deadline,
    ) -> Result<String, ReshareError> {
        let challenge = self.directory.get_challenge(challenge_id, deadline)?;

        let tree = TreeBuilder::new(self.directory);
        let child = tree.create_child(parent_transaction_id, challenge_id, deadline)?;

        let reshare_link = self.shortener.shorten(
            &format!(
                "{}/reshare?transactionId={}&challengeId={}",
                self.config.api_url, child.id, challenge.id
            ),
            deadline,
        )?;
        let apply_link = self.shortener.shorten(
            &format!("{}/apply/{}", self.config.app_url, child.id),
            deadline,
        )?;

        let subject = format!(
            "Love this startup - can you help them find a {}?",
            challenge.name
        );
        let body = format!(
            "I immediately thought of you. Please share this with your \
             network {} and your contribution will actually be measured \
             and recognized.\n\nThanks! (to see how this works, or to \
             apply, check out: {})",
            reshare_link, apply_link
        );

        let bcc = share_address(&child.id, &self.config.mail_domain);
        let mailto = format!(
            "mailto:?bcc={}&subject={}&body={}",
            encode(&bcc),
            encode(&subject),
            encode(&body)
        );

        info!(
            challenge_id,
            parent_transaction_id,
            child_transaction_id = %child.id,
            "generated reshare payload"
        );
        Ok(render_page(&mailto))
    }
}
