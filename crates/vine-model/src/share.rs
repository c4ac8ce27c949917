// share.rs — ShareAction: one referral attempt within a challenge.
//
// A share action is created in CREATED with no user attached; `user_id`
// is set once, when the referral is acted upon. Status transitions are
// owned by the lifecycle crate — this module only defines the enum and
// which states are terminal.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle status of a [`ShareAction`].
///
/// Serialized in the store's wire form (`"CREATED"`, `"SCHEDULED"`, ...).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionStatus {
    Created,
    Scheduled,
    Attempted,
    Completed,
    Cancelled,
}

impl ActionStatus {
    /// Terminal states admit no further transitions.
    pub fn is_terminal(self) -> bool {
        matches!(self, ActionStatus::Completed | ActionStatus::Cancelled)
    }
}

impl fmt::Display for ActionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ActionStatus::Created => "CREATED",
            ActionStatus::Scheduled => "SCHEDULED",
            ActionStatus::Attempted => "ATTEMPTED",
            ActionStatus::Completed => "COMPLETED",
            ActionStatus::Cancelled => "CANCELLED",
        };
        write!(f, "{}", s)
    }
}

/// A share action snapshot from the directory store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShareAction {
    /// Store-minted identifier.
    pub id: String,

    /// The challenge this share belongs to.
    pub challenge_id: String,

    /// The user who performed the share. Unset at creation; first-touch
    /// assigned when the reshare command is recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    /// Current lifecycle status.
    pub status: ActionStatus,

    /// Delivery attempt counter. Declared, not incremented by this engine.
    #[serde(default)]
    pub attempt_counter: u32,
}

/// Associates a share action with one contact the referral was forwarded to.
/// Fan-out: many records per share action are expected.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShareActionContact {
    /// Store-minted identifier.
    pub id: String,
    pub share_action_id: String,
    pub contact_id: String,
}

/// Input for `create_share_action`. Status starts at CREATED.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateShareActionInput {
    pub challenge_id: String,
}

/// Input for `update_share_action`. Only supplied fields are touched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateShareActionInput {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ActionStatus>,
}

/// Input for `create_share_action_contact`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateShareActionContactInput {
    pub share_action_id: String,
    pub contact_id: String,
}
