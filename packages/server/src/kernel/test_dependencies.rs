// Mock implementations for testing
//
// Recording doubles for the two infrastructure traits, injectable anywhere
// the real clients would go.

use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use firecrawl_extract::ExtractResponse;

use super::{BaseChatModel, BaseExtractor};

// =============================================================================
// Mock Chat Model
// =============================================================================

pub struct MockChatModel {
    responses: Arc<Mutex<Vec<String>>>,
    calls: Arc<Mutex<Vec<String>>>,
    fail: bool,
}

impl MockChatModel {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail: false,
        }
    }

    /// A model whose every call fails.
    pub fn failing() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail: true,
        }
    }

    /// Add a text response to the queue
    pub fn with_response(self, response: impl Into<String>) -> Self {
        self.responses.lock().unwrap().push(response.into());
        self
    }

    /// Get all prompts that were sent to the model
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Get the last prompt sent to the model
    pub fn last_prompt(&self) -> Option<String> {
        self.calls.lock().unwrap().last().cloned()
    }

    /// Check if a prompt containing the given text was sent
    pub fn was_called_with(&self, text: &str) -> bool {
        self.calls.lock().unwrap().iter().any(|p| p.contains(text))
    }

    /// Get the number of times the model was called
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Default for MockChatModel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseChatModel for MockChatModel {
    async fn complete(&self, prompt: &str) -> Result<String> {
        // Record the call
        self.calls.lock().unwrap().push(prompt.to_string());

        if self.fail {
            return Err(anyhow!("mock chat model failure"));
        }

        let mut responses = self.responses.lock().unwrap();
        if !responses.is_empty() {
            Ok(responses.remove(0))
        } else {
            Ok("Mock model response".to_string())
        }
    }
}

// =============================================================================
// Mock Extractor
// =============================================================================

/// Arguments captured from an extract call
#[derive(Debug, Clone)]
pub struct ExtractCallArgs {
    pub urls: Vec<String>,
    pub prompt: String,
    pub schema: serde_json::Value,
}

pub struct MockExtractor {
    responses: Arc<Mutex<Vec<ExtractResponse>>>,
    calls: Arc<Mutex<Vec<ExtractCallArgs>>>,
    fail: bool,
}

impl MockExtractor {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail: false,
        }
    }

    /// An extractor whose every call fails at the transport level.
    pub fn failing() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail: true,
        }
    }

    /// Add a full response to the queue
    pub fn with_response(self, response: ExtractResponse) -> Self {
        self.responses.lock().unwrap().push(response);
        self
    }

    /// Add a successful response carrying the given payload
    pub fn with_success_data(self, data: serde_json::Value) -> Self {
        self.with_response(ExtractResponse {
            success: true,
            data,
            status: Some("completed".to_string()),
            expires_at: None,
        })
    }

    /// Add an unsuccessful response (extraction declined, not an error)
    pub fn with_failure(self) -> Self {
        self.with_response(ExtractResponse {
            success: false,
            data: serde_json::Value::Null,
            status: Some("failed".to_string()),
            expires_at: None,
        })
    }

    /// Get all extract calls with their arguments
    pub fn calls(&self) -> Vec<ExtractCallArgs> {
        self.calls.lock().unwrap().clone()
    }

    /// Get the number of times extract was called
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Check if any extract call covered the given URL
    pub fn was_called_for(&self, url: &str) -> bool {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .any(|c| c.urls.iter().any(|u| u == url))
    }
}

impl Default for MockExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseExtractor for MockExtractor {
    async fn extract(
        &self,
        urls: &[String],
        prompt: &str,
        schema: serde_json::Value,
    ) -> Result<ExtractResponse> {
        // Record the call with all arguments
        self.calls.lock().unwrap().push(ExtractCallArgs {
            urls: urls.to_vec(),
            prompt: prompt.to_string(),
            schema,
        });

        if self.fail {
            return Err(anyhow!("mock extractor failure"));
        }

        let mut responses = self.responses.lock().unwrap();
        if !responses.is_empty() {
            Ok(responses.remove(0))
        } else {
            Ok(ExtractResponse {
                success: true,
                data: serde_json::json!({}),
                status: Some("completed".to_string()),
                expires_at: None,
            })
        }
    }
}
