//! Listing search: one extraction request over the configured sources, then
//! one analysis call over whatever came back.

use anyhow::Result;

use super::prompts;
use super::types::{properties_schema, PropertyRecord, SearchParameters};
use crate::kernel::{BaseChatModel, BaseExtractor};

/// Source URL patterns for property listings, parameterized by city slug.
/// The nobroker source ships behind a flag.
pub fn source_urls(city: &str, include_nobroker: bool) -> Vec<String> {
    let slug = city.to_lowercase();

    let mut urls = vec![
        format!("https://www.squareyards.com/sale/property-for-sale-in-{slug}/*"),
        format!("https://www.99acres.com/property-in-{slug}-ffid/*"),
        format!("https://housing.com/in/buy/{slug}/{slug}"),
    ];

    if include_nobroker {
        urls.push(format!("https://www.nobroker.in/property/sale/{city}/{slug}"));
    }

    urls
}

/// Fetch candidate listings and produce the analysis report.
///
/// An unsuccessful extraction is not an error: the analysis still runs over
/// an empty record list. Transport failures from either collaborator
/// propagate to the caller.
pub async fn find_properties(
    extractor: &dyn BaseExtractor,
    chat: &dyn BaseChatModel,
    params: &SearchParameters,
    include_nobroker: bool,
) -> Result<String> {
    let urls = source_urls(&params.city, include_nobroker);

    let response = extractor
        .extract(
            &urls,
            &prompts::listing_extraction_prompt(params),
            properties_schema(),
        )
        .await?;

    let properties = if response.success {
        parse_records(&response.data)
    } else {
        tracing::warn!(
            city = %params.city,
            status = ?response.status,
            "Extraction unsuccessful, continuing with zero records"
        );
        Vec::new()
    };

    tracing::debug!(city = %params.city, count = properties.len(), "Properties extracted");

    let properties_json = serde_json::to_string_pretty(&properties)?;
    chat.complete(&prompts::listing_analysis_prompt(&properties_json, params))
        .await
}

/// Pull the `properties` array out of the extraction payload. Anything that
/// does not match the expected shape counts as zero records; there is no
/// partial-record recovery.
fn parse_records(data: &serde_json::Value) -> Vec<PropertyRecord> {
    data.get("properties")
        .cloned()
        .and_then(|value| serde_json::from_value(value).ok())
        .unwrap_or_default()
}
