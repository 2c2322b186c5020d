//! HTTP client for the MathNarrator API.
//!
//! Two endpoints, both relative to a configurable base URL:
//!
//! - `GET  /api/me`: identity of the bearer token's owner
//! - `POST /api/chat`: `{ "query": ... }` in, `{ "reply": ... }` out
//!
//! `ChatBackend` is the seam the rest of the app talks to, so the reducer
//! and the bootstrap logic can be exercised without a server.

use std::fmt;

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::de::DeserializeOwned;

use super::types::{ChatReply, ChatRequest, ErrorBody, Profile};

/// Errors that can occur while talking to the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Network-level failure (DNS, connection refused, reset).
    Network(String),
    /// Server answered with a non-success status.
    Api { status: u16, message: String },
    /// Body was not the JSON we expected.
    Parse(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "network error: {msg}"),
            ApiError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            ApiError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Returns the name of the backend, for logging.
    fn name(&self) -> &str;

    /// Looks up the identity behind `token`.
    async fn fetch_profile(&self, token: &str) -> Result<Profile, ApiError>;

    /// Sends one chat query. `token` is attached as a bearer credential when present.
    async fn send_chat(&self, query: &str, token: Option<&str>) -> Result<ChatReply, ApiError>;
}

/// `ChatBackend` over HTTP with reqwest.
pub struct HttpBackend {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Reads a JSON body, mapping non-success statuses to `ApiError::Api`.
///
/// A non-success status is only `Api` when the server still sent JSON.
/// Anything else (a proxy's HTML error page, an empty body) is `Parse`.
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    debug!("Response status: {}", status);

    if !status.is_success() {
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        if let Err(e) = serde_json::from_str::<serde_json::Value>(&body) {
            warn!("HTTP {} with non-JSON body: {}", status.as_u16(), e);
            return Err(ApiError::Parse(format!("HTTP {}: {}", status.as_u16(), e)));
        }
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|b| b.error)
            .unwrap_or(body);
        warn!("API error: {} - {}", status.as_u16(), message);
        return Err(ApiError::Api {
            status: status.as_u16(),
            message,
        });
    }

    let body = response
        .text()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    serde_json::from_str(&body).map_err(|e| ApiError::Parse(e.to_string()))
}

#[async_trait]
impl ChatBackend for HttpBackend {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch_profile(&self, token: &str) -> Result<Profile, ApiError> {
        info!("Fetching profile from {}", self.endpoint("/api/me"));

        let response = self
            .client
            .get(self.endpoint("/api/me"))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        read_json(response).await
    }

    async fn send_chat(&self, query: &str, token: Option<&str>) -> Result<ChatReply, ApiError> {
        let body = ChatRequest {
            query: query.to_string(),
        };

        info!(
            "Chat request: query_len={}, authenticated={}",
            query.len(),
            token.is_some()
        );

        let mut request = self.client.post(self.endpoint("/api/chat")).json(&body);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        read_json(response).await
    }
}
