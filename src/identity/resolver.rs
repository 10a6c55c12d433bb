/// Identity Resolver - best-effort profile and avatar lookup
use crate::{
    config::{HttpConfig, IdentityConfig},
    error::{RelayError, RelayResult},
    identity::{PlayerDirectory, PlayerId, PlayerIdentity, PlayerProfile},
    upstream,
};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

/// Player directory backed by the platform's public users and thumbnails APIs
#[derive(Clone)]
pub struct HttpPlayerDirectory {
    http_client: reqwest::Client,
    config: IdentityConfig,
}

#[derive(Deserialize)]
struct ThumbnailBatch {
    #[serde(default)]
    data: Vec<Thumbnail>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Thumbnail {
    image_url: Option<String>,
}

impl HttpPlayerDirectory {
    pub fn new(config: IdentityConfig, http: &HttpConfig) -> RelayResult<Self> {
        Ok(Self {
            http_client: upstream::build_http_client(http)?,
            config,
        })
    }
}

#[async_trait]
impl PlayerDirectory for HttpPlayerDirectory {
    async fn profile(&self, player_id: PlayerId) -> RelayResult<Option<PlayerProfile>> {
        let url = format!("{}/v1/users/{}", self.config.users_url, player_id);
        let response = upstream::send("users", self.http_client.get(&url)).await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(upstream::rejection(response).await);
        }

        let profile = response
            .json::<PlayerProfile>()
            .await
            .map_err(|e| RelayError::Decode(format!("Invalid user profile: {}", e)))?;
        Ok(Some(profile))
    }

    async fn avatar_url(&self, player_id: PlayerId) -> RelayResult<Option<String>> {
        let url = format!(
            "{}/v1/users/avatar-headshot",
            self.config.thumbnails_url
        );
        let request = self.http_client.get(&url).query(&[
            ("userIds", player_id.to_string().as_str()),
            ("size", "150x150"),
            ("format", "Png"),
            ("isCircular", "false"),
        ]);
        let response = upstream::send("thumbnails", request).await?;

        if !response.status().is_success() {
            return Err(upstream::rejection(response).await);
        }

        let batch = response
            .json::<ThumbnailBatch>()
            .await
            .map_err(|e| RelayError::Decode(format!("Invalid thumbnail batch: {}", e)))?;
        Ok(batch.data.into_iter().next().and_then(|t| t.image_url))
    }
}

/// Resolves display identity, never failing
#[derive(Clone)]
pub struct IdentityResolver {
    directory: Arc<dyn PlayerDirectory>,
}

impl IdentityResolver {
    pub fn new(directory: Arc<dyn PlayerDirectory>) -> Self {
        Self { directory }
    }

    /// Resolve profile and avatar concurrently.
    ///
    /// A failed or empty profile lookup yields the "Unknown" placeholder;
    /// a failed avatar lookup leaves the avatar unset.
    pub async fn resolve(&self, player_id: PlayerId) -> PlayerIdentity {
        let (profile, avatar) = futures::join!(
            self.directory.profile(player_id),
            self.directory.avatar_url(player_id)
        );

        let mut identity = match profile {
            Ok(Some(profile)) => PlayerIdentity::from_profile(player_id, profile),
            Ok(None) => {
                debug!("Player {} not found in directory", player_id);
                PlayerIdentity::placeholder(player_id)
            }
            Err(e) => {
                debug!("Profile lookup for {} failed: {}", player_id, e);
                PlayerIdentity::placeholder(player_id)
            }
        };

        match avatar {
            Ok(url) => identity.avatar_url = url,
            Err(e) => debug!("Avatar lookup for {} failed: {}", player_id, e),
        }

        identity
    }
}
