use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// API keys for the two external services the assistant delegates to.
///
/// Both are optional at load time: the process still starts and serves the
/// webhook, but the assembler refuses query requests until both are present.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub firecrawl_api_key: Option<String>,
    pub openai_api_key: Option<String>,
}

impl Credentials {
    /// True when both required keys are configured.
    pub fn complete(&self) -> bool {
        self.firecrawl_api_key.is_some() && self.openai_api_key.is_some()
    }
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub credentials: Credentials,
    pub openai_model_id: String,
    pub whatsapp_access_token: String,
    pub whatsapp_phone_number_id: String,
    pub whatsapp_api_version: String,
    pub webhook_verify_token: String,
    /// Include the fourth (nobroker) listing source in extraction requests.
    pub enable_nobroker_source: bool,
    /// Append the locality price-trends section to replies.
    pub include_location_trends: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            credentials: Credentials {
                firecrawl_api_key: env::var("FIRECRAWL_API_KEY").ok(),
                openai_api_key: env::var("OPENAI_API_KEY").ok(),
            },
            openai_model_id: env::var("OPENAI_MODEL_ID")
                .unwrap_or_else(|_| "gpt-3.5-turbo".to_string()),
            whatsapp_access_token: env::var("WHATSAPP_ACCESS_TOKEN")
                .context("WHATSAPP_ACCESS_TOKEN must be set")?,
            whatsapp_phone_number_id: env::var("WHATSAPP_PHONE_NUMBER_ID")
                .context("WHATSAPP_PHONE_NUMBER_ID must be set")?,
            whatsapp_api_version: env::var("WHATSAPP_API_VERSION")
                .unwrap_or_else(|_| "v18.0".to_string()),
            webhook_verify_token: env::var("WEBHOOK_VERIFY_TOKEN")
                .context("WEBHOOK_VERIFY_TOKEN must be set")?,
            enable_nobroker_source: bool_var("ENABLE_NOBROKER_SOURCE"),
            include_location_trends: bool_var("INCLUDE_LOCATION_TRENDS"),
        })
    }
}

fn bool_var(name: &str) -> bool {
    env::var(name)
        .unwrap_or_else(|_| "false".to_string())
        .parse::<bool>()
        .unwrap_or(false)
}
