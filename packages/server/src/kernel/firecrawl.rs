use anyhow::{Context, Result};
use async_trait::async_trait;
use firecrawl_extract::{ExtractResponse, FirecrawlClient};

use super::BaseExtractor;

/// Firecrawl implementation of BaseExtractor
pub struct FirecrawlExtractor {
    client: FirecrawlClient,
}

impl FirecrawlExtractor {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let client = FirecrawlClient::new(api_key).context("Failed to create Firecrawl client")?;

        Ok(Self { client })
    }
}

#[async_trait]
impl BaseExtractor for FirecrawlExtractor {
    async fn extract(
        &self,
        urls: &[String],
        prompt: &str,
        schema: serde_json::Value,
    ) -> Result<ExtractResponse> {
        self.client
            .extract(urls, prompt, schema)
            .await
            .context("Firecrawl extract failed")
    }
}
