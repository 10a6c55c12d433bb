/// Operator actions
use crate::{
    error::{RelayError, RelayResult},
    identity::PlayerId,
    permission::Privilege,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_BAN_REASON: &str = "No reason provided";
pub const DEFAULT_KICK_REASON: &str = "Kicked by moderator";
pub const DEFAULT_SHUTDOWN_REASON: &str = "Server shutdown by moderator";

/// Name of an action, independent of its arguments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Ban,
    Unban,
    Kick,
    Announce,
    Whitelist,
    Unwhitelist,
    #[serde(rename = "checkban")]
    CheckStatus,
    Shutdown,
    Lookup,
}

impl ActionKind {
    pub const ALL: [ActionKind; 9] = [
        ActionKind::Ban,
        ActionKind::Unban,
        ActionKind::Kick,
        ActionKind::Announce,
        ActionKind::Whitelist,
        ActionKind::Unwhitelist,
        ActionKind::CheckStatus,
        ActionKind::Shutdown,
        ActionKind::Lookup,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Ban => "ban",
            ActionKind::Unban => "unban",
            ActionKind::Kick => "kick",
            ActionKind::Announce => "announce",
            ActionKind::Whitelist => "whitelist",
            ActionKind::Unwhitelist => "unwhitelist",
            ActionKind::CheckStatus => "checkban",
            ActionKind::Shutdown => "shutdown",
            ActionKind::Lookup => "lookup",
        }
    }

    pub fn from_str(s: &str) -> RelayResult<Self> {
        ActionKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s.to_lowercase())
            .ok_or_else(|| RelayError::Validation(format!("Unknown command: {}", s)))
    }

    pub fn required_privilege(&self) -> Privilege {
        match self {
            ActionKind::CheckStatus | ActionKind::Lookup => Privilege::Public,
            _ => Privilege::Moderator,
        }
    }

    /// Phrase completing "Failed to ..."
    pub fn failure_phrase(&self) -> &'static str {
        match self {
            ActionKind::Ban => "ban player",
            ActionKind::Unban => "unban player",
            ActionKind::Kick => "kick player",
            ActionKind::Announce => "send announcement",
            ActionKind::Whitelist => "whitelist player",
            ActionKind::Unwhitelist => "remove whitelist",
            ActionKind::CheckStatus => "check ban status",
            ActionKind::Shutdown => "initiate shutdown",
            ActionKind::Lookup => "look up user",
        }
    }
}

/// A fully-typed operator command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModerationAction {
    Ban {
        player_id: PlayerId,
        reason: String,
        /// Zero or negative means permanent
        duration_minutes: i64,
    },
    Unban {
        player_id: PlayerId,
    },
    Kick {
        player_id: PlayerId,
        reason: String,
    },
    Announce {
        message: String,
    },
    Whitelist {
        player_id: PlayerId,
    },
    Unwhitelist {
        player_id: PlayerId,
    },
    CheckStatus {
        player_id: PlayerId,
    },
    Shutdown {
        reason: String,
    },
    Lookup {
        player_id: PlayerId,
    },
}

fn or_default(reason: Option<String>, default: &str) -> String {
    reason
        .filter(|r| !r.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

impl ModerationAction {
    /// Missing duration means permanent
    pub fn ban(player_id: PlayerId, reason: Option<String>, duration_minutes: Option<i64>) -> Self {
        ModerationAction::Ban {
            player_id,
            reason: or_default(reason, DEFAULT_BAN_REASON),
            duration_minutes: duration_minutes.unwrap_or(0),
        }
    }

    pub fn kick(player_id: PlayerId, reason: Option<String>) -> Self {
        ModerationAction::Kick {
            player_id,
            reason: or_default(reason, DEFAULT_KICK_REASON),
        }
    }

    pub fn shutdown(reason: Option<String>) -> Self {
        ModerationAction::Shutdown {
            reason: or_default(reason, DEFAULT_SHUTDOWN_REASON),
        }
    }

    pub fn announce(message: String) -> RelayResult<Self> {
        if message.trim().is_empty() {
            return Err(RelayError::Validation(
                "Announcement message cannot be empty".to_string(),
            ));
        }
        Ok(ModerationAction::Announce { message })
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            ModerationAction::Ban { .. } => ActionKind::Ban,
            ModerationAction::Unban { .. } => ActionKind::Unban,
            ModerationAction::Kick { .. } => ActionKind::Kick,
            ModerationAction::Announce { .. } => ActionKind::Announce,
            ModerationAction::Whitelist { .. } => ActionKind::Whitelist,
            ModerationAction::Unwhitelist { .. } => ActionKind::Unwhitelist,
            ModerationAction::CheckStatus { .. } => ActionKind::CheckStatus,
            ModerationAction::Shutdown { .. } => ActionKind::Shutdown,
            ModerationAction::Lookup { .. } => ActionKind::Lookup,
        }
    }

    pub fn player_id(&self) -> Option<PlayerId> {
        match self {
            ModerationAction::Ban { player_id, .. }
            | ModerationAction::Unban { player_id }
            | ModerationAction::Kick { player_id, .. }
            | ModerationAction::Whitelist { player_id }
            | ModerationAction::Unwhitelist { player_id }
            | ModerationAction::CheckStatus { player_id }
            | ModerationAction::Lookup { player_id } => Some(*player_id),
            ModerationAction::Announce { .. } | ModerationAction::Shutdown { .. } => None,
        }
    }
}
