/// Unified error types for the moderation relay
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for the relay
#[derive(Error, Debug)]
pub enum RelayError {
    /// Invalid configuration or operator input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Front end failed to authenticate against the relay
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Upstream answered with a non-2xx status. The message is the
    /// upstream's own text so operators see it verbatim.
    #[error("{message}")]
    RemoteRejected { status: u16, message: String },

    /// Network failure or timeout talking to an upstream service
    #[error("Network error: {0}")]
    Transport(String),

    /// Upstream answered 2xx with a body we could not understand
    #[error("Malformed upstream response: {0}")]
    Decode(String),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for RelayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RelayError::Transport(format!("request timed out: {}", err))
        } else if err.is_decode() {
            RelayError::Decode(err.to_string())
        } else {
            RelayError::Transport(err.to_string())
        }
    }
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// Convert RelayError to HTTP response
impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            RelayError::Validation(_) => (
                StatusCode::BAD_REQUEST,
                "InvalidRequest",
                self.to_string(),
            ),
            RelayError::Authentication(_) => (
                StatusCode::UNAUTHORIZED,
                "AuthenticationRequired",
                self.to_string(),
            ),
            RelayError::RemoteRejected { .. } | RelayError::Decode(_) => (
                StatusCode::BAD_GATEWAY,
                "UpstreamError",
                self.to_string(),
            ),
            RelayError::Transport(_) => (
                StatusCode::GATEWAY_TIMEOUT,
                "UpstreamUnavailable",
                self.to_string(),
            ),
            RelayError::Internal(_) | RelayError::Io(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "InternalServerError",
                "Internal server error".to_string(), // Don't leak details
            ),
        };

        let body = Json(ErrorResponse {
            error: error_code.to_string(),
            message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for relay operations
pub type RelayResult<T> = Result<T, RelayError>;
