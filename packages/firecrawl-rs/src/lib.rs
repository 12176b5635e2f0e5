//! Client for the Firecrawl extract API.
//!
//! Sends a set of URLs plus a natural-language prompt and a JSON schema hint
//! to the `/v1/extract` endpoint and returns whatever structured payload the
//! service produced.
//!
//! # Example
//!
//! ```rust,ignore
//! use firecrawl_extract::FirecrawlClient;
//!
//! let client = FirecrawlClient::new(api_key)?;
//! let response = client.extract(&urls, prompt, schema).await?;
//! if response.success {
//!     let records = response.data.get("properties");
//! }
//! ```

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const FIRECRAWL_API_URL: &str = "https://api.firecrawl.dev/v1";

/// Result type for Firecrawl client operations.
pub type Result<T> = std::result::Result<T, ExtractError>;

/// Firecrawl client errors.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Network error (connection failed, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// API error (non-2xx response, rate limit, invalid request)
    #[error("Firecrawl API error: {0}")]
    Api(String),

    /// Parse error (unexpected response shape)
    #[error("Parse error: {0}")]
    Parse(String),
}

#[derive(Serialize)]
struct ExtractRequest<'a> {
    urls: &'a [String],
    prompt: &'a str,
    schema: serde_json::Value,
}

/// Outcome of an extract call.
///
/// Only `success == true` carries a usable payload; callers treat anything
/// else as zero records. `data` is left as raw JSON because its shape is
/// whatever the caller's schema hint asked for.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractResponse {
    pub success: bool,
    #[serde(default)]
    pub data: serde_json::Value,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, rename = "expiresAt")]
    pub expires_at: Option<String>,
}

/// Client for the Firecrawl extract endpoint.
pub struct FirecrawlClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl FirecrawlClient {
    /// Create a new client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| ExtractError::Network(e.to_string()))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: FIRECRAWL_API_URL.to_string(),
        })
    }

    /// Set a custom base URL (proxies, test servers).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Run one extraction over the given URLs.
    ///
    /// `schema` is forwarded verbatim as the structured-output hint. The call
    /// is a single blocking round trip; timeout handling is whatever the
    /// underlying HTTP client enforces.
    pub async fn extract(
        &self,
        urls: &[String],
        prompt: &str,
        schema: serde_json::Value,
    ) -> Result<ExtractResponse> {
        tracing::debug!(url_count = urls.len(), "Starting Firecrawl extract");

        let request = ExtractRequest {
            urls,
            prompt,
            schema,
        };

        let response = self
            .client
            .post(format!("{}/extract", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| ExtractError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, error = %text, "Firecrawl API error");
            return Err(ExtractError::Api(format!("{} - {}", status, text)));
        }

        let extract_response: ExtractResponse = response
            .json()
            .await
            .map_err(|e| ExtractError::Parse(e.to_string()))?;

        tracing::debug!(
            success = extract_response.success,
            status = ?extract_response.status,
            "Firecrawl extract finished"
        );

        Ok(extract_response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builder() {
        let client = FirecrawlClient::new("fc-test")
            .unwrap()
            .with_base_url("https://custom.api.com");

        assert_eq!(client.api_key, "fc-test");
        assert_eq!(client.base_url, "https://custom.api.com");
    }

    #[test]
    fn test_response_deserialization() {
        let raw = r#"{
            "success": true,
            "data": {"properties": [{"building_name": "Sunrise Towers"}]},
            "status": "completed",
            "expiresAt": "2025-01-01T00:00:00Z"
        }"#;

        let response: ExtractResponse = serde_json::from_str(raw).unwrap();
        assert!(response.success);
        assert_eq!(response.status.as_deref(), Some("completed"));
        assert_eq!(response.expires_at.as_deref(), Some("2025-01-01T00:00:00Z"));
        assert!(response.data.get("properties").is_some());
    }

    #[test]
    fn test_response_deserialization_minimal() {
        // Failure responses may carry nothing but the flag.
        let response: ExtractResponse = serde_json::from_str(r#"{"success": false}"#).unwrap();
        assert!(!response.success);
        assert!(response.data.is_null());
        assert!(response.status.is_none());
        assert!(response.expires_at.is_none());
    }

    #[test]
    fn test_request_serialization() {
        let urls = vec!["https://example.com/a".to_string()];
        let request = ExtractRequest {
            urls: &urls,
            prompt: "Extract things",
            schema: serde_json::json!({"type": "object"}),
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["urls"][0], "https://example.com/a");
        assert_eq!(value["prompt"], "Extract things");
        assert_eq!(value["schema"]["type"], "object");
    }
}
