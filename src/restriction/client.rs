/// Open Cloud user-restrictions client
use crate::{
    config::{HttpConfig, OpenCloudConfig},
    error::{RelayError, RelayResult},
    identity::PlayerId,
    restriction::{
        display_reason, private_reason, QueryOutcome, RestrictionApi, RestrictionDuration,
        RestrictionRecord, EXCLUDE_ALT_ACCOUNTS,
    },
    upstream::{self, API_KEY_HEADER},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

const SERVICE: &str = "restrictions";

/// PATCH body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RestrictionPatch {
    game_join_restriction: GameJoinRestriction,
}

/// Wire form of a game-join restriction, shared by requests and responses
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GameJoinRestriction {
    #[serde(default)]
    active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    start_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    private_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    display_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    exclude_alt_accounts: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserRestrictionResponse {
    #[serde(default)]
    game_join_restriction: Option<GameJoinRestriction>,
}

impl GameJoinRestriction {
    fn into_record(self) -> RelayResult<RestrictionRecord> {
        let duration = self
            .duration
            .as_deref()
            .map(RestrictionDuration::decode)
            .transpose()?;

        Ok(RestrictionRecord {
            active: self.active,
            duration,
            private_reason: self.private_reason.filter(|r| !r.is_empty()),
            display_reason: self.display_reason.filter(|r| !r.is_empty()),
            exclude_alt_accounts: self.exclude_alt_accounts.unwrap_or(EXCLUDE_ALT_ACCOUNTS),
            start_time: self.start_time,
        })
    }
}

/// Restriction client for one universe
#[derive(Clone)]
pub struct OpenCloudRestrictionClient {
    http_client: reqwest::Client,
    config: OpenCloudConfig,
}

impl OpenCloudRestrictionClient {
    pub fn new(config: OpenCloudConfig, http: &HttpConfig) -> RelayResult<Self> {
        Ok(Self {
            http_client: upstream::build_http_client(http)?,
            config,
        })
    }

    fn restriction_url(&self, player_id: PlayerId) -> String {
        format!(
            "{}/cloud/v2/universes/{}/user-restrictions/{}",
            self.config.base_url, self.config.universe_id, player_id
        )
    }

    async fn patch(
        &self,
        player_id: PlayerId,
        restriction: GameJoinRestriction,
    ) -> RelayResult<RestrictionRecord> {
        let body = RestrictionPatch {
            game_join_restriction: restriction,
        };
        let request = self
            .http_client
            .patch(self.restriction_url(player_id))
            .header(API_KEY_HEADER, &self.config.api_key)
            .json(&body);

        let response = upstream::send(SERVICE, request).await?;
        if !response.status().is_success() {
            return Err(upstream::rejection(response).await);
        }

        decode_record(response).await
    }
}

async fn decode_record(response: reqwest::Response) -> RelayResult<RestrictionRecord> {
    let body = response
        .json::<UserRestrictionResponse>()
        .await
        .map_err(|e| RelayError::Decode(format!("Invalid user restriction: {}", e)))?;

    match body.game_join_restriction {
        Some(restriction) => restriction.into_record(),
        None => Ok(RestrictionRecord::inactive()),
    }
}

#[async_trait]
impl RestrictionApi for OpenCloudRestrictionClient {
    async fn apply(
        &self,
        player_id: PlayerId,
        reason: &str,
        duration_seconds: i64,
        moderator: &str,
    ) -> RelayResult<RestrictionRecord> {
        let duration = RestrictionDuration::from_seconds(duration_seconds);
        info!(
            "Applying restriction to {} ({}) by {}",
            player_id, duration, moderator
        );

        let restriction = GameJoinRestriction {
            active: true,
            start_time: None,
            duration: Some(duration.encode()),
            private_reason: Some(private_reason(Utc::now(), reason, moderator)),
            display_reason: Some(display_reason(reason)),
            exclude_alt_accounts: Some(EXCLUDE_ALT_ACCOUNTS),
        };

        let mut record = self.patch(player_id, restriction).await?;
        if record.duration.is_none() {
            record.duration = Some(duration);
        }
        Ok(record)
    }

    async fn clear(&self, player_id: PlayerId) -> RelayResult<()> {
        info!("Clearing restriction for {}", player_id);

        let restriction = GameJoinRestriction {
            active: false,
            ..Default::default()
        };
        self.patch(player_id, restriction).await?;
        Ok(())
    }

    async fn query(&self, player_id: PlayerId) -> RelayResult<QueryOutcome> {
        let request = self
            .http_client
            .get(self.restriction_url(player_id))
            .header(API_KEY_HEADER, &self.config.api_key);

        let response = upstream::send(SERVICE, request).await?;
        if response.status() == StatusCode::NOT_FOUND {
            debug!("No restriction on record for {}", player_id);
            return Ok(QueryOutcome::NotFound);
        }
        if !response.status().is_success() {
            return Err(upstream::rejection(response).await);
        }

        Ok(QueryOutcome::Found(decode_record(response).await?))
    }
}
