// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Prompt construction and record shaping live in the property domain.
//
// Naming convention: Base* for trait names (e.g., BaseChatModel)

use anyhow::Result;
use async_trait::async_trait;
use firecrawl_extract::ExtractResponse;

// =============================================================================
// Chat Model Trait (Infrastructure - text generation)
// =============================================================================

#[async_trait]
pub trait BaseChatModel: Send + Sync {
    /// Complete a prompt with an LLM (returns raw text content).
    /// May fail; callers decide whether that is fatal for their pipeline.
    async fn complete(&self, prompt: &str) -> Result<String>;
}

// =============================================================================
// Extractor Trait (Infrastructure - schema-guided web extraction)
// =============================================================================

#[async_trait]
pub trait BaseExtractor: Send + Sync {
    /// Run one schema-guided extraction over the given URLs.
    ///
    /// A response with `success == false` is a valid outcome, not an error;
    /// only transport/API failures return `Err`.
    async fn extract(
        &self,
        urls: &[String],
        prompt: &str,
        schema: serde_json::Value,
    ) -> Result<ExtractResponse>;
}
