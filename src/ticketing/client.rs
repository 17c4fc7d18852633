//! HTTP client for the backend ticketing API.

use super::{error::BackendError, helpers::error_message};
use crate::config::{join_url, ApiSettings};
use reqwest::Method;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

/// Thin JSON client bound to the backend base URL.
///
/// Cloning is cheap and clones share one connection pool, so a single
/// instance serves every concurrent tool call.
#[derive(Debug, Clone)]
pub struct TicketingClient {
    http: reqwest::Client,
    base_url: String,
    openapi_url: String,
}

impl TicketingClient {
    /// Builds a client for the API described by `settings`.
    pub fn new(settings: &ApiSettings) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(BackendError::Client)?;

        Ok(Self {
            http,
            base_url: settings.base_url(),
            openapi_url: settings.openapi_url(),
        })
    }

    /// Server URL plus root path.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET {base_url}{path}` with the given query string.
    pub async fn get(&self, path: &str, query: &[(String, String)]) -> Result<Value, BackendError> {
        self.request(Method::GET, path, query, None).await
    }

    /// `POST {base_url}{path}` with a JSON body.
    pub async fn post(&self, path: &str, body: &Value) -> Result<Value, BackendError> {
        self.request(Method::POST, path, &[], Some(body)).await
    }

    /// Issues one request against an endpoint under the base URL.
    ///
    /// # Errors
    ///
    /// * [`BackendError::Transport`] when no response was received.
    /// * [`BackendError::Status`] for any 4xx/5xx response.
    /// * [`BackendError::Decode`] when a successful body is not JSON.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<&Value>,
    ) -> Result<Value, BackendError> {
        let url = join_url(&self.base_url, path);
        self.send(method, url, query, body).await
    }

    /// Fetches the backend's OpenAPI document.
    pub async fn openapi(&self) -> Result<Value, BackendError> {
        self.send(Method::GET, self.openapi_url.clone(), &[], None)
            .await
    }

    async fn send(
        &self,
        method: Method,
        url: String,
        query: &[(String, String)],
        body: Option<&Value>,
    ) -> Result<Value, BackendError> {
        debug!(%method, %url, "backend request");

        let mut builder = self.http.request(method, &url);
        if !query.is_empty() {
            builder = builder.query(query);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(source) => {
                return Err(BackendError::Transport {
                    url,
                    source: source.without_url(),
                })
            }
        };

        let status = response.status();
        let text = match response.text().await {
            Ok(text) => text,
            Err(source) => {
                return Err(BackendError::Transport {
                    url,
                    source: source.without_url(),
                })
            }
        };

        debug!(%url, status = status.as_u16(), "backend response");

        if !status.is_success() {
            return Err(BackendError::Status {
                status,
                message: error_message(status, &text),
            });
        }

        // 204 and friends carry no body
        if text.trim().is_empty() {
            return Ok(json!({}));
        }

        serde_json::from_str(&text).map_err(BackendError::Decode)
    }
}
