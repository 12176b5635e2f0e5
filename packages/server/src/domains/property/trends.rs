//! Locality price trends: one extraction request against the price-trends
//! source, then one analysis call producing the four-section report.

use anyhow::Result;

use super::prompts;
use super::types::{locations_schema, LocationTrend};
use crate::kernel::{BaseChatModel, BaseExtractor};

/// Fixed reply when the trends source yields nothing usable.
pub const NO_TRENDS_MESSAGE: &str = "No price trends data available";

/// Fetch locality price trends for a city and produce the analysis report.
///
/// Unlike listing search, an unsuccessful extraction here short-circuits to a
/// fixed sentinel instead of running the analysis over nothing.
pub async fn get_location_trends(
    extractor: &dyn BaseExtractor,
    chat: &dyn BaseChatModel,
    city: &str,
) -> Result<String> {
    let urls = vec![format!(
        "https://www.99acres.com/property-rates-and-price-trends-in-{}-prffid/*",
        city.to_lowercase()
    )];

    let response = extractor
        .extract(&urls, prompts::trends_extraction_prompt(), locations_schema())
        .await?;

    if !response.success {
        tracing::warn!(city = %city, status = ?response.status, "Trends extraction unsuccessful");
        return Ok(NO_TRENDS_MESSAGE.to_string());
    }

    let locations = parse_locations(&response.data);
    tracing::debug!(city = %city, count = locations.len(), "Locality trends extracted");

    let locations_json = serde_json::to_string_pretty(&locations)?;
    chat.complete(&prompts::trends_analysis_prompt(city, &locations_json))
        .await
}

/// Pull the `locations` array out of the extraction payload; any other shape
/// counts as zero localities.
fn parse_locations(data: &serde_json::Value) -> Vec<LocationTrend> {
    data.get("locations")
        .cloned()
        .and_then(|value| serde_json::from_value(value).ok())
        .unwrap_or_default()
}
