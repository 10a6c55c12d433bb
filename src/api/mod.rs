/// API routes and handlers
pub mod auth;
pub mod commands;
pub mod render;

use crate::context::AppContext;
use axum::Router;

/// Build API routes
pub fn routes() -> Router<AppContext> {
    Router::new().merge(commands::routes())
}
