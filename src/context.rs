/// Application context and dependency injection
use crate::{
    config::RelayConfig,
    error::RelayResult,
    identity::{HttpPlayerDirectory, IdentityResolver},
    messaging::OpenCloudMessagingClient,
    orchestrator::ModerationOrchestrator,
    permission::PermissionGate,
    restriction::OpenCloudRestrictionClient,
};
use std::sync::Arc;

/// Application context holding all shared services
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<RelayConfig>,
    pub orchestrator: Arc<ModerationOrchestrator>,
}

impl AppContext {
    /// Create a new application context from configuration
    pub fn new(config: RelayConfig) -> RelayResult<Self> {
        // Validate configuration
        config.validate()?;

        let directory = HttpPlayerDirectory::new(config.identity.clone(), &config.http)?;
        let restrictions = OpenCloudRestrictionClient::new(config.open_cloud.clone(), &config.http)?;
        let publisher = OpenCloudMessagingClient::new(
            config.open_cloud.clone(),
            config.messaging.clone(),
            &config.http,
        )?;

        let orchestrator = ModerationOrchestrator::new(
            PermissionGate::new(&config.permissions),
            IdentityResolver::new(Arc::new(directory)),
            Arc::new(restrictions),
            Arc::new(publisher),
        );

        Ok(Self::with_orchestrator(config, orchestrator))
    }

    /// Assemble a context around an existing orchestrator
    pub fn with_orchestrator(config: RelayConfig, orchestrator: ModerationOrchestrator) -> Self {
        Self {
            config: Arc::new(config),
            orchestrator: Arc::new(orchestrator),
        }
    }

    /// Get service URL
    pub fn service_url(&self) -> String {
        format!(
            "http://{}:{}",
            self.config.service.hostname, self.config.service.port
        )
    }
}
