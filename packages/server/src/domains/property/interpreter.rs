//! Query interpretation: one chat call plus best-effort parsing of its output.

use lazy_static::lazy_static;
use regex::Regex;

use super::prompts;
use super::types::{RawSearchParameters, SearchParameters};
use crate::kernel::BaseChatModel;

lazy_static! {
    // Last-resort scan for a city token in non-JSON model output.
    static ref CITY_RE: Regex =
        Regex::new(r#"(?i)city["\s:]+([^",\s}]+)"#).expect("city fallback regex is valid");
}

/// One-shot interpretation of a free-text query into search parameters.
///
/// Returns `None` when the model call fails or no city can be recovered from
/// its output; the caller treats that as "cannot proceed". Single attempt, no
/// retry.
pub async fn interpret_query(chat: &dyn BaseChatModel, query: &str) -> Option<SearchParameters> {
    let content = match chat.complete(&prompts::interpreter_prompt(query)).await {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!(error = %e, "Query interpretation call failed");
            return None;
        }
    };

    let params = parse_search_parameters(&content);
    if params.is_none() {
        tracing::warn!(raw = %content, "Could not parse search parameters from model output");
    }
    params
}

/// Parse model output into search parameters.
///
/// Strict decode of the brace-delimited JSON substring first; on failure,
/// fall back to a bare city scan with hard defaults for the remaining fields
/// via [`SearchParameters::for_city`].
pub fn parse_search_parameters(content: &str) -> Option<SearchParameters> {
    if let Some(json) = brace_delimited(content) {
        if let Ok(raw) = serde_json::from_str::<RawSearchParameters>(json) {
            if !raw.city.trim().is_empty() {
                return Some(raw.into_parameters());
            }
        }
    }

    fallback_city(content).map(SearchParameters::for_city)
}

/// The substring from the first `{` to the last `}`, if any.
fn brace_delimited(content: &str) -> Option<&str> {
    let start = content.find('{')?;
    let end = content.rfind('}')?;
    (end > start).then(|| &content[start..=end])
}

/// Scan free text for a `city` value. Returns the first token following a
/// "city" label, stripped of quoting.
pub fn fallback_city(content: &str) -> Option<String> {
    let captures = CITY_RE.captures(content)?;
    let city = captures.get(1)?.as_str().trim_matches(&['"', '\''][..]);
    (!city.is_empty()).then(|| city.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::property::types::{PropertyCategory, PropertyType};

    #[test]
    fn test_parse_literal_json_round_trip() {
        let content =
            r#"{"city":"Pune","max_price":2,"property_category":"Residential","property_type":"Flat"}"#;

        let params = parse_search_parameters(content).unwrap();
        assert_eq!(params.city, "Pune");
        assert_eq!(params.max_price, 2.0);
        assert_eq!(params.property_category, PropertyCategory::Residential);
        assert_eq!(params.property_type, PropertyType::Flat);
    }

    #[test]
    fn test_parse_fenced_output() {
        let content = "Here are the parameters:\n```json\n{\"city\": \"Mumbai\", \"max_price\": null, \"property_category\": \"Commercial\", \"property_type\": \"Individual House\"}\n```";

        let params = parse_search_parameters(content).unwrap();
        assert_eq!(params.city, "Mumbai");
        assert_eq!(params.max_price, 5.0);
        assert_eq!(params.property_category, PropertyCategory::Commercial);
        assert_eq!(params.property_type, PropertyType::IndividualHouse);
    }

    #[test]
    fn test_empty_object_yields_none() {
        assert!(parse_search_parameters("{}").is_none());
    }

    #[test]
    fn test_blank_city_yields_none() {
        assert!(parse_search_parameters(r#"{"city": "   "}"#).is_none());
    }

    #[test]
    fn test_unknown_category_takes_fallback_path() {
        // "Industrial" fails the strict decode; the city scan still recovers
        // Pune and everything else takes defaults.
        let content = r#"{"city":"Pune","property_category":"Industrial"}"#;

        let params = parse_search_parameters(content).unwrap();
        assert_eq!(params.city, "Pune");
        assert_eq!(params.max_price, 5.0);
        assert_eq!(params.property_category, PropertyCategory::Residential);
    }

    #[test]
    fn test_fallback_city_from_label() {
        let content = "city: Delhi (everything else unspecified)";
        assert_eq!(fallback_city(content).as_deref(), Some("Delhi"));

        let params = parse_search_parameters(content).unwrap();
        assert_eq!(params.city, "Delhi");
        assert_eq!(params.property_type, PropertyType::Flat);
    }

    #[test]
    fn test_no_city_anywhere() {
        assert!(parse_search_parameters("I could not determine anything useful").is_none());
        assert!(fallback_city("no location mentioned").is_none());
    }
}
