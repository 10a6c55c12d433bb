/// Sentinel Relay - moderation command relay for live game backends
///
/// Turns operator commands into authoritative player restrictions plus
/// best-effort notifications to running game servers.

pub mod api;
pub mod config;
pub mod context;
pub mod error;
pub mod identity;
pub mod messaging;
pub mod metrics;
pub mod orchestrator;
pub mod permission;
pub mod restriction;
pub mod server;
pub mod upstream;

pub use config::RelayConfig;
pub use context::AppContext;
pub use error::{RelayError, RelayResult};
pub use orchestrator::{ActionResult, ModerationAction, ModerationOrchestrator};
