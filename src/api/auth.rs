/// Front-end authentication
use crate::{context::AppContext, error::RelayError};
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};

/// Extract bearer token from Authorization header
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(|token| token.trim().to_string())
}

/// Proof that the caller is the trusted front end holding the relay token
#[derive(Debug, Clone, Copy)]
pub struct RelayAuth;

#[async_trait]
impl FromRequestParts<AppContext> for RelayAuth {
    type Rejection = RelayError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppContext,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_bearer_token(&parts.headers)
            .ok_or_else(|| RelayError::Authentication("Missing authorization header".to_string()))?;

        if token != state.config.service.api_token {
            tracing::warn!("Rejected command request with invalid relay token");
            return Err(RelayError::Authentication("Invalid relay token".to_string()));
        }

        Ok(RelayAuth)
    }
}
