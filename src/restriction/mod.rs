/// Player Restriction System
///
/// The authoritative enforcement path. Restriction records live in the
/// platform's user-restrictions API, which is the single source of truth:
/// nothing here is cached, and every query round-trips upstream.

pub mod client;
pub mod duration;

pub use client::OpenCloudRestrictionClient;
pub use duration::{RestrictionDuration, PERMANENT_DURATION_SECONDS};

use crate::{error::RelayResult, identity::PlayerId};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

/// Every ban also restricts the player's alternate accounts.
// TODO: expose as a RelayConfig option once operators need per-universe alt policy
pub const EXCLUDE_ALT_ACCOUNTS: bool = false;

/// Current state of a player's game-join restriction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestrictionRecord {
    pub active: bool,
    /// `None` when upstream omitted the lifetime
    pub duration: Option<RestrictionDuration>,
    /// Audit-only text: timestamp, reason and moderator
    pub private_reason: Option<String>,
    /// Text shown to the restricted player
    pub display_reason: Option<String>,
    pub exclude_alt_accounts: bool,
    pub start_time: Option<DateTime<Utc>>,
}

impl RestrictionRecord {
    pub fn inactive() -> Self {
        Self {
            active: false,
            duration: None,
            private_reason: None,
            display_reason: None,
            exclude_alt_accounts: EXCLUDE_ALT_ACCOUNTS,
            start_time: None,
        }
    }

    /// Human-readable lifetime: "Permanent", "Xh Ym total", or "Unknown"
    pub fn duration_text(&self) -> String {
        self.duration
            .map(|d| d.to_string())
            .unwrap_or_else(|| "Unknown".to_string())
    }
}

/// Result of a restriction query that reached upstream
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    Found(RestrictionRecord),
    /// Upstream definitively holds no record for the player
    NotFound,
}

/// Audit reason stored alongside a restriction. The moderator string is
/// copied unmodified.
pub fn private_reason(applied_at: DateTime<Utc>, reason: &str, moderator: &str) -> String {
    format!(
        "[{}] {} | Mod: {}",
        applied_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        reason,
        moderator
    )
}

/// Reason shown to the restricted player
pub fn display_reason(reason: &str) -> String {
    format!("Banned: {}", reason)
}

/// Authoritative restriction store
#[async_trait]
pub trait RestrictionApi: Send + Sync {
    /// Apply (or overwrite) an active restriction. Zero or negative
    /// `duration_seconds` applies it permanently.
    async fn apply(
        &self,
        player_id: PlayerId,
        reason: &str,
        duration_seconds: i64,
        moderator: &str,
    ) -> RelayResult<RestrictionRecord>;

    /// Deactivate the restriction, keeping its history. Clearing an
    /// unrestricted player succeeds.
    async fn clear(&self, player_id: PlayerId) -> RelayResult<()>;

    /// Read the current restriction
    async fn query(&self, player_id: PlayerId) -> RelayResult<QueryOutcome>;
}
