//! Client for the ACCESS active resource inventory.

use std::time::Duration;

use reqwest::{header, Client};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use domain::services::extract_results;

use crate::config::ResourcesConfig;
use crate::middleware::metrics::record_resource_fetch;

/// Failures of a resource fetch. The display strings are shown to users.
#[derive(Debug, Error)]
pub enum ResourceFetchError {
    #[error("Unable to fetch resources: {0}")]
    Request(String),

    #[error("API returned empty response")]
    EmptyResponse,

    #[error("Invalid JSON response: {0}")]
    InvalidJson(String),
}

impl ResourceFetchError {
    fn outcome(&self) -> &'static str {
        match self {
            ResourceFetchError::Request(_) => "request_error",
            ResourceFetchError::EmptyResponse => "empty",
            ResourceFetchError::InvalidJson(_) => "invalid_json",
        }
    }
}

/// HTTP client for the resource inventory endpoint.
#[derive(Debug, Clone)]
pub struct ResourceClient {
    client: Client,
    api_url: String,
}

impl ResourceClient {
    pub fn new(config: &ResourcesConfig) -> Result<Self, ResourceFetchError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| ResourceFetchError::Request(e.to_string()))?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
        })
    }

    /// Fetches the `results` array of the active resource listing.
    ///
    /// No retries. Connection failures, timeouts and non-2xx statuses are
    /// all `Request` errors.
    pub async fn fetch_active(&self) -> Result<Vec<Value>, ResourceFetchError> {
        let result = self.fetch_inner().await;
        match &result {
            Ok(results) => {
                debug!(count = results.len(), "Fetched active resources");
                record_resource_fetch("ok");
            }
            Err(e) => {
                warn!(url = %self.api_url, error = %e, "Resource fetch failed");
                record_resource_fetch(e.outcome());
            }
        }
        result
    }

    async fn fetch_inner(&self) -> Result<Vec<Value>, ResourceFetchError> {
        let response = self
            .client
            .get(&self.api_url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| ResourceFetchError::Request(e.to_string()))?;

        let body = response
            .bytes()
            .await
            .map_err(|e| ResourceFetchError::Request(e.to_string()))?;

        if body.is_empty() {
            return Err(ResourceFetchError::EmptyResponse);
        }

        let document: Value = serde_json::from_slice(&body)
            .map_err(|e| ResourceFetchError::InvalidJson(e.to_string()))?;

        extract_results(document).map_err(ResourceFetchError::InvalidJson)
    }
}
