/// Configuration management for the moderation relay
use crate::error::{RelayError, RelayResult};
use serde::{Deserialize, Serialize};
use std::env;

/// Main relay configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    pub service: ServiceConfig,
    pub open_cloud: OpenCloudConfig,
    pub identity: IdentityConfig,
    pub permissions: PermissionConfig,
    pub messaging: MessagingConfig,
    pub http: HttpConfig,
    pub logging: LoggingConfig,
}

/// Service-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub hostname: String,
    pub port: u16,
    /// Shared secret the front end presents as a bearer token
    #[serde(skip_serializing)]
    pub api_token: String,
    pub version: String,
}

/// Credentials and location of the game platform's cloud API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenCloudConfig {
    #[serde(skip_serializing)]
    pub api_key: String,
    pub universe_id: String,
    pub base_url: String,
}

/// Public player directory endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityConfig {
    pub users_url: String,
    pub thumbnails_url: String,
}

/// Operator authorization
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PermissionConfig {
    /// Role required for privileged commands. `None` authorizes everyone.
    pub mod_role_id: Option<String>,
}

/// Live notification topics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagingConfig {
    pub commands_topic: String,
    pub announce_topic: String,
}

impl Default for MessagingConfig {
    fn default() -> Self {
        Self {
            commands_topic: "SentinelAC_Commands".to_string(),
            announce_topic: "SentinelAC_Announce".to_string(),
        }
    }
}

/// Outbound HTTP settings shared by every upstream client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            user_agent: format!("sentinel-relay/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

impl RelayConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> RelayResult<Self> {
        dotenv::dotenv().ok();

        let hostname = env::var("RELAY_HOSTNAME").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("RELAY_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|_| RelayError::Validation("Invalid port number".to_string()))?;
        let api_token = env::var("RELAY_API_TOKEN")
            .map_err(|_| RelayError::Validation("RELAY_API_TOKEN required".to_string()))?;
        let version = env!("CARGO_PKG_VERSION").to_string();

        let api_key = env::var("ROBLOX_API_KEY")
            .map_err(|_| RelayError::Validation("ROBLOX_API_KEY required".to_string()))?;
        let universe_id = env::var("ROBLOX_UNIVERSE_ID")
            .map_err(|_| RelayError::Validation("ROBLOX_UNIVERSE_ID required".to_string()))?;
        let base_url = env::var("ROBLOX_OPEN_CLOUD_URL")
            .unwrap_or_else(|_| "https://apis.roblox.com".to_string());

        let users_url = env::var("ROBLOX_USERS_URL")
            .unwrap_or_else(|_| "https://users.roblox.com".to_string());
        let thumbnails_url = env::var("ROBLOX_THUMBNAILS_URL")
            .unwrap_or_else(|_| "https://thumbnails.roblox.com".to_string());

        // Empty means unset, same as the variable being absent
        let mod_role_id = env::var("MOD_ROLE_ID")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let defaults = MessagingConfig::default();
        let commands_topic =
            env::var("RELAY_COMMANDS_TOPIC").unwrap_or(defaults.commands_topic);
        let announce_topic =
            env::var("RELAY_ANNOUNCE_TOPIC").unwrap_or(defaults.announce_topic);

        let timeout_secs = env::var("RELAY_HTTP_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .map_err(|_| RelayError::Validation("Invalid HTTP timeout".to_string()))?;
        let user_agent = env::var("RELAY_USER_AGENT").unwrap_or(HttpConfig::default().user_agent);

        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_json = env::var("RELAY_LOG_FORMAT")
            .map(|f| f.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        Ok(RelayConfig {
            service: ServiceConfig {
                hostname,
                port,
                api_token,
                version,
            },
            open_cloud: OpenCloudConfig {
                api_key,
                universe_id,
                base_url: trim_base(base_url),
            },
            identity: IdentityConfig {
                users_url: trim_base(users_url),
                thumbnails_url: trim_base(thumbnails_url),
            },
            permissions: PermissionConfig { mod_role_id },
            messaging: MessagingConfig {
                commands_topic,
                announce_topic,
            },
            http: HttpConfig {
                timeout_secs,
                user_agent,
            },
            logging: LoggingConfig {
                level: log_level,
                json: log_json,
            },
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> RelayResult<()> {
        if self.service.hostname.is_empty() {
            return Err(RelayError::Validation("Hostname cannot be empty".to_string()));
        }

        if self.service.api_token.len() < 32 {
            return Err(RelayError::Validation(
                "API token must be at least 32 characters".to_string(),
            ));
        }

        if self.open_cloud.api_key.is_empty() {
            return Err(RelayError::Validation("API key cannot be empty".to_string()));
        }

        if self.open_cloud.universe_id.is_empty()
            || !self.open_cloud.universe_id.chars().all(|c| c.is_ascii_digit())
        {
            return Err(RelayError::Validation(format!(
                "Universe ID must be numeric, got {:?}",
                self.open_cloud.universe_id
            )));
        }

        if self.messaging.commands_topic.is_empty() || self.messaging.announce_topic.is_empty() {
            return Err(RelayError::Validation("Topic names cannot be empty".to_string()));
        }

        if self.http.timeout_secs == 0 {
            return Err(RelayError::Validation(
                "HTTP timeout must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

fn trim_base(url: String) -> String {
    url.trim_end_matches('/').to_string()
}
