// OpenAI chat-completions implementation of BaseChatModel.
//
// This is the infrastructure implementation; the prompts themselves are
// built by the property domain.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::BaseChatModel;

const OPENAI_API_URL: &str = "https://api.openai.com/v1";

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponseRaw {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

/// OpenAI implementation of chat completion.
#[derive(Clone)]
pub struct OpenAIChatModel {
    http_client: reqwest::Client,
    api_key: String,
    model_id: String,
    base_url: String,
}

impl OpenAIChatModel {
    pub fn new(api_key: impl Into<String>, model_id: impl Into<String>) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            api_key: api_key.into(),
            model_id: model_id.into(),
            base_url: OPENAI_API_URL.to_string(),
        }
    }

    /// Set a custom base URL (for Azure, proxies, etc.).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

#[async_trait]
impl BaseChatModel for OpenAIChatModel {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let start = std::time::Instant::now();

        let request = ChatRequest {
            model: &self.model_id,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        tracing::debug!(
            model = %self.model_id,
            prompt_length = prompt.len(),
            "Calling chat completions"
        );

        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .context("Failed to send chat completion request")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, error = %error_text, "OpenAI API error");
            return Err(anyhow!("OpenAI API error: {}", error_text));
        }

        let chat_response: ChatResponseRaw = response
            .json()
            .await
            .context("Failed to parse chat completion response")?;

        let content = chat_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| anyhow!("No response from OpenAI"))?;

        tracing::debug!(
            model = %self.model_id,
            duration_ms = start.elapsed().as_millis(),
            response_length = content.len(),
            "Chat completion received"
        );

        Ok(content)
    }
}
