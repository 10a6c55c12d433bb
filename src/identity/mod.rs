/// Player Identity Resolution
///
/// Maps numeric player identifiers to display identity through the
/// platform's read-only directory. Purely informational: lookups that
/// fail degrade to a placeholder instead of aborting the action.

pub mod resolver;

pub use resolver::{HttpPlayerDirectory, IdentityResolver};

use crate::error::{RelayError, RelayResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Name shown when the directory cannot tell us who a player is
pub const UNKNOWN_PLAYER_NAME: &str = "Unknown";

/// Platform-assigned player identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(u64);

impl PlayerId {
    /// Player identifiers are strictly positive
    pub fn new(raw: i64) -> RelayResult<Self> {
        if raw <= 0 {
            return Err(RelayError::Validation(format!(
                "Player ID must be a positive integer, got {}",
                raw
            )));
        }
        Ok(Self(raw as u64))
    }

    pub fn get(&self) -> u64 {
        self.0
    }

    pub fn profile_url(&self) -> String {
        format!("https://www.roblox.com/users/{}/profile", self.0)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Profile fields returned by the directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerProfile {
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Resolved display identity, possibly a placeholder
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerIdentity {
    pub player_id: PlayerId,
    pub name: String,
    pub display_name: Option<String>,
    pub created: Option<DateTime<Utc>>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    /// False when the directory lookup failed and `name` is the placeholder
    pub resolved: bool,
}

impl PlayerIdentity {
    pub fn placeholder(player_id: PlayerId) -> Self {
        Self {
            player_id,
            name: UNKNOWN_PLAYER_NAME.to_string(),
            display_name: None,
            created: None,
            bio: None,
            avatar_url: None,
            resolved: false,
        }
    }

    pub fn from_profile(player_id: PlayerId, profile: PlayerProfile) -> Self {
        Self {
            player_id,
            name: profile.name,
            display_name: profile.display_name.filter(|n| !n.is_empty()),
            created: profile.created,
            bio: profile.description.filter(|d| !d.is_empty()),
            avatar_url: None,
            resolved: true,
        }
    }

    /// Display name if set, otherwise the account name
    pub fn shown_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }
}

/// Read-only player directory
///
/// `Ok(None)` means the directory answered and has no such player.
#[async_trait]
pub trait PlayerDirectory: Send + Sync {
    /// Fetch a player's profile
    async fn profile(&self, player_id: PlayerId) -> RelayResult<Option<PlayerProfile>>;

    /// Fetch a player's avatar headshot URL
    async fn avatar_url(&self, player_id: PlayerId) -> RelayResult<Option<String>>;
}
