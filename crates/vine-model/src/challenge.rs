// challenge.rs — Challenge: a referral campaign.
//
// A challenge is created once per originating "start" email and is
// immutable afterwards. The reward/limit parameters are declared on the
// model but enforced nowhere in this engine — the fields exist so the
// store schema and future reward logic have somewhere to live.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A challenge snapshot from the directory store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Challenge {
    /// Store-minted identifier.
    pub id: String,

    /// Campaign title, taken from the first line of the start email body.
    pub name: String,

    /// Sponsor display name, taken from the start email subject.
    pub sponsor_name: String,

    /// Full description — the whole start email body.
    pub description: String,

    /// URL of the first saved attachment, if the start email carried any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment_url: Option<String>,

    /// Whether the campaign is accepting shares.
    #[serde(default = "default_active")]
    pub active: bool,

    /// Whether rewards settle off-chain. Declared, not interpreted here.
    #[serde(default)]
    pub off_chain: bool,

    // Limit parameters: declared stubs. Nothing in this engine reads them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_shares: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_shares_per_received_share: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_nodes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_reward: Option<u32>,

    /// Campaign expiration, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration: Option<DateTime<Utc>>,
}

fn default_active() -> bool {
    true
}

/// Input for `create_challenge`. The store mints the id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateChallengeInput {
    pub name: String,
    pub sponsor_name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_shares: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_shares_per_received_share: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_nodes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_reward: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration: Option<DateTime<Utc>>,
}
