//! Reply assembly: the linear pipeline behind `generate_response`.
//!
//! Each fatal condition is a distinct [`ReplyError`] variant; rendering the
//! outward-facing string is a final, separate step. The caller always gets a
//! string back, never an error.

use std::sync::Arc;

use thiserror::Error;

use super::{interpreter, listings, trends};
use crate::config::Credentials;
use crate::kernel::{BaseChatModel, BaseExtractor};

const SECTION_RULE: &str = "--------------------------------------------------";

/// Fatal conditions in the reply pipeline.
#[derive(Debug, Error)]
pub enum ReplyError {
    #[error("extraction or generation API key is not configured")]
    MissingCredentials,

    #[error("empty query")]
    EmptyQuery,

    #[error("could not determine a city from the query")]
    UnknownCity,

    #[error(transparent)]
    Pipeline(#[from] anyhow::Error),
}

impl ReplyError {
    /// The fixed string delivered to the user for this failure. Underlying
    /// causes never reach the messaging channel.
    pub fn user_message(&self) -> &'static str {
        match self {
            ReplyError::MissingCredentials => {
                "❌ Error: Missing API keys. Please set FIRECRAWL_API_KEY and OPENAI_API_KEY in your .env file."
            }
            ReplyError::EmptyQuery => "❌ Please provide a search query!",
            ReplyError::UnknownCity => {
                "❌ Couldn't determine which city you're interested in. Please specify a city."
            }
            ReplyError::Pipeline(_) => {
                "❌ An error occurred while processing your request. Please try again later."
            }
        }
    }
}

/// Feature switches for the optional parts of the reply pipeline.
#[derive(Debug, Clone, Default)]
pub struct AssemblerFlags {
    /// Include the fourth (nobroker) listing source in extraction requests.
    pub enable_nobroker_source: bool,
    /// Append the locality price-trends section to replies.
    pub include_location_trends: bool,
}

/// Orchestrates interpretation, listing search, and summarization into one
/// reply string. Built once from configuration and shared across requests;
/// holds no per-request state.
pub struct ResponseAssembler {
    chat: Arc<dyn BaseChatModel>,
    extractor: Arc<dyn BaseExtractor>,
    credentials: Credentials,
    flags: AssemblerFlags,
}

impl ResponseAssembler {
    pub fn new(
        chat: Arc<dyn BaseChatModel>,
        extractor: Arc<dyn BaseExtractor>,
        credentials: Credentials,
        flags: AssemblerFlags,
    ) -> Self {
        Self {
            chat,
            extractor,
            credentials,
            flags,
        }
    }

    /// Entry point for the message gateway. Always returns a string; every
    /// failure is folded into one of the fixed user-facing messages.
    pub async fn generate_response(&self, message: &str) -> String {
        match self.reply(message).await {
            Ok(text) => text,
            Err(error) => {
                if let ReplyError::Pipeline(ref cause) = error {
                    tracing::error!(error = %cause, "Error generating response");
                }
                error.user_message().to_string()
            }
        }
    }

    async fn reply(&self, message: &str) -> Result<String, ReplyError> {
        // Credential gate first: no network call is made without both keys.
        if !self.credentials.complete() {
            return Err(ReplyError::MissingCredentials);
        }

        if message.trim().is_empty() {
            return Err(ReplyError::EmptyQuery);
        }

        let params = interpreter::interpret_query(self.chat.as_ref(), message)
            .await
            .filter(|p| !p.city.trim().is_empty())
            .ok_or(ReplyError::UnknownCity)?;

        tracing::info!(
            city = %params.city,
            max_price = params.max_price,
            category = %params.property_category,
            property_type = %params.property_type,
            "Searching properties"
        );

        let listing_report = listings::find_properties(
            self.extractor.as_ref(),
            self.chat.as_ref(),
            &params,
            self.flags.enable_nobroker_source,
        )
        .await?;

        let mut response = format!(
            "\n🏘️ PROPERTY RECOMMENDATIONS\n{SECTION_RULE}\n{listing_report}\n"
        );

        if self.flags.include_location_trends {
            let trends_report = trends::get_location_trends(
                self.extractor.as_ref(),
                self.chat.as_ref(),
                &params.city,
            )
            .await?;

            response.push_str(&format!(
                "\n📈 LOCATION TRENDS ANALYSIS\n{SECTION_RULE}\n{trends_report}\n"
            ));
        }

        Ok(response)
    }
}
