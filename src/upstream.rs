/// Shared plumbing for outbound calls to platform services
use crate::{
    config::HttpConfig,
    error::{RelayError, RelayResult},
    metrics,
};
use reqwest::{RequestBuilder, Response};
use serde::Deserialize;
use std::time::Instant;

/// Header carrying the cloud API key
pub const API_KEY_HEADER: &str = "x-api-key";

/// Build an HTTP client with the configured timeout and user agent.
/// Every upstream call is bounded by this timeout.
pub fn build_http_client(config: &HttpConfig) -> RelayResult<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .timeout(config.timeout())
        .build()
        .map_err(|e| RelayError::Internal(format!("Failed to create HTTP client: {}", e)))
}

/// Send a request, recording latency and status under `service`
pub async fn send(service: &str, request: RequestBuilder) -> RelayResult<Response> {
    let started = Instant::now();
    let result = request.send().await;
    let elapsed = started.elapsed().as_secs_f64();

    match result {
        Ok(response) => {
            metrics::record_upstream_request(service, Some(response.status().as_u16()), elapsed);
            Ok(response)
        }
        Err(e) => {
            metrics::record_upstream_request(service, None, elapsed);
            Err(e.into())
        }
    }
}

#[derive(Deserialize)]
struct UpstreamErrorBody {
    message: Option<String>,
}

/// Turn a non-2xx response into `RemoteRejected`, keeping the upstream
/// message when the body carries one
pub async fn rejection(response: Response) -> RelayError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    let message = serde_json::from_str::<UpstreamErrorBody>(&body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| {
            format!(
                "Request failed with status code {}",
                status.as_u16()
            )
        });

    RelayError::RemoteRejected {
        status: status.as_u16(),
        message,
    }
}
