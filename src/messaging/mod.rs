/// Live Notification System
///
/// Best-effort path to running game servers. Envelopes are published to a
/// topic and reach zero or more subscribers; delivery is never confirmed
/// and never retried.

pub mod client;

pub use client::OpenCloudMessagingClient;

use crate::{config::MessagingConfig, error::RelayResult, identity::PlayerId};
use async_trait::async_trait;
use serde::Serialize;

/// Which of the two fixed topics an envelope goes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    /// Targeted commands: ban, unban, kick, whitelist, unwhitelist, shutdown
    Commands,
    /// Broadcast announcements
    Announce,
}

impl Topic {
    pub fn label(&self) -> &'static str {
        match self {
            Topic::Commands => "commands",
            Topic::Announce => "announce",
        }
    }

    pub fn name<'a>(&self, config: &'a MessagingConfig) -> &'a str {
        match self {
            Topic::Commands => &config.commands_topic,
            Topic::Announce => &config.announce_topic,
        }
    }
}

/// Command consumed by live servers on the commands topic
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "command", rename_all = "lowercase")]
pub enum CommandEnvelope {
    #[serde(rename_all = "camelCase")]
    Ban {
        user_id: PlayerId,
        reason: String,
        /// Seconds, or -1 for permanent
        duration: i64,
        moderator: String,
    },
    #[serde(rename_all = "camelCase")]
    Unban { user_id: PlayerId, moderator: String },
    #[serde(rename_all = "camelCase")]
    Kick {
        user_id: PlayerId,
        reason: String,
        moderator: String,
    },
    #[serde(rename_all = "camelCase")]
    Whitelist { user_id: PlayerId, moderator: String },
    #[serde(rename_all = "camelCase")]
    Unwhitelist { user_id: PlayerId, moderator: String },
    Shutdown { reason: String, moderator: String },
}

/// Broadcast shown by live servers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Announcement {
    pub message: String,
    pub moderator: String,
}

/// Anything publishable, paired with its topic
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Envelope {
    Command(CommandEnvelope),
    Announcement(Announcement),
}

impl Envelope {
    pub fn topic(&self) -> Topic {
        match self {
            Envelope::Command(_) => Topic::Commands,
            Envelope::Announcement(_) => Topic::Announce,
        }
    }

    /// Serialized message text placed inside the publish body
    pub fn to_message(&self) -> RelayResult<String> {
        let json = match self {
            Envelope::Command(command) => serde_json::to_string(command),
            Envelope::Announcement(announcement) => serde_json::to_string(announcement),
        };
        json.map_err(|e| crate::error::RelayError::Internal(format!("Envelope encoding: {}", e)))
    }
}

impl From<CommandEnvelope> for Envelope {
    fn from(command: CommandEnvelope) -> Self {
        Envelope::Command(command)
    }
}

impl From<Announcement> for Envelope {
    fn from(announcement: Announcement) -> Self {
        Envelope::Announcement(announcement)
    }
}

/// Outcome of a best-effort publish. Never an error for the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "lowercase")]
pub enum Delivery {
    /// Upstream accepted the message for fan-out
    Published,
    /// The publish failed; the reason is kept for logs only
    Dropped(String),
}

impl Delivery {
    pub fn is_published(&self) -> bool {
        matches!(self, Delivery::Published)
    }
}

/// Topic publisher
#[async_trait]
pub trait MessagePublisher: Send + Sync {
    /// Publish once. Errors are reported to the caller, who decides to
    /// discard them.
    async fn publish(&self, topic: Topic, envelope: &Envelope) -> RelayResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn player() -> PlayerId {
        PlayerId::new(1234).unwrap()
    }

    #[test]
    fn test_ban_envelope_shape() {
        let envelope = Envelope::from(CommandEnvelope::Ban {
            user_id: player(),
            reason: "cheating".to_string(),
            duration: -1,
            moderator: "mod#1".to_string(),
        });
        let value: serde_json::Value =
            serde_json::from_str(&envelope.to_message().unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "command": "ban",
                "userId": 1234,
                "reason": "cheating",
                "duration": -1,
                "moderator": "mod#1"
            })
        );
        assert_eq!(envelope.topic(), Topic::Commands);
    }

    #[test]
    fn test_shutdown_envelope_has_no_user() {
        let envelope = Envelope::from(CommandEnvelope::Shutdown {
            reason: "maintenance".to_string(),
            moderator: "mod#1".to_string(),
        });
        let value: serde_json::Value =
            serde_json::from_str(&envelope.to_message().unwrap()).unwrap();
        assert_eq!(
            value,
            json!({ "command": "shutdown", "reason": "maintenance", "moderator": "mod#1" })
        );
    }

    #[test]
    fn test_unwhitelist_tag() {
        let envelope = Envelope::from(CommandEnvelope::Unwhitelist {
            user_id: player(),
            moderator: "mod#1".to_string(),
        });
        assert!(envelope.to_message().unwrap().contains("\"command\":\"unwhitelist\""));
    }

    #[test]
    fn test_announcement_goes_to_announce_topic() {
        let envelope = Envelope::from(Announcement {
            message: "Server restart in 5".to_string(),
            moderator: "mod#1".to_string(),
        });
        assert_eq!(envelope.topic(), Topic::Announce);
        let config = MessagingConfig::default();
        assert_eq!(envelope.topic().name(&config), "SentinelAC_Announce");
        assert_eq!(Topic::Commands.name(&config), "SentinelAC_Commands");
    }
}
