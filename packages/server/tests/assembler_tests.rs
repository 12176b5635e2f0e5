//! End-to-end pipeline tests over the recording mocks: one assembler, both
//! collaborators scripted, assertions on the final reply string and on what
//! was (or was not) called.

use std::sync::Arc;

use serde_json::json;

use assistant_core::config::Credentials;
use assistant_core::domains::property::{AssemblerFlags, ResponseAssembler};
use assistant_core::kernel::{MockChatModel, MockExtractor};

const PARAMS_JSON: &str =
    r#"{"city":"Pune","max_price":2,"property_category":"Residential","property_type":"Flat"}"#;

fn creds() -> Credentials {
    Credentials {
        firecrawl_api_key: Some("fc-test".to_string()),
        openai_api_key: Some("sk-test".to_string()),
    }
}

fn assembler(
    chat: &Arc<MockChatModel>,
    extractor: &Arc<MockExtractor>,
    flags: AssemblerFlags,
) -> ResponseAssembler {
    ResponseAssembler::new(chat.clone(), extractor.clone(), creds(), flags)
}

fn sample_properties() -> serde_json::Value {
    json!({
        "properties": [
            {
                "building_name": "Sunrise Towers",
                "property_type": "Flat",
                "location_address": "Baner, Pune",
                "price": "1.8 Cr",
                "description": "3 BHK with park view"
            },
            {
                "building_name": "Gokhale Heights",
                "property_type": "Flat",
                "location_address": "Kothrud, Pune",
                "price": "1.5 Cr",
                "description": "2 BHK near metro"
            }
        ]
    })
}

#[tokio::test]
async fn test_missing_keys_short_circuit() {
    let chat = Arc::new(MockChatModel::new());
    let extractor = Arc::new(MockExtractor::new());
    let assembler = ResponseAssembler::new(
        chat.clone(),
        extractor.clone(),
        Credentials {
            firecrawl_api_key: Some("fc-test".to_string()),
            openai_api_key: None,
        },
        AssemblerFlags::default(),
    );

    let reply = assembler.generate_response("flats in Pune").await;

    assert_eq!(
        reply,
        "❌ Error: Missing API keys. Please set FIRECRAWL_API_KEY and OPENAI_API_KEY in your .env file."
    );
    // No network activity of any kind before the credential gate
    assert_eq!(chat.call_count(), 0);
    assert_eq!(extractor.call_count(), 0);
}

#[tokio::test]
async fn test_blank_query_rejected() {
    let chat = Arc::new(MockChatModel::new());
    let extractor = Arc::new(MockExtractor::new());
    let assembler = assembler(&chat, &extractor, AssemblerFlags::default());

    let reply = assembler.generate_response("   \n  ").await;

    assert_eq!(reply, "❌ Please provide a search query!");
    assert_eq!(chat.call_count(), 0);
    assert_eq!(extractor.call_count(), 0);
}

#[tokio::test]
async fn test_uninterpretable_query_asks_for_city() {
    let chat = Arc::new(MockChatModel::new().with_response("{}"));
    let extractor = Arc::new(MockExtractor::new());
    let assembler = assembler(&chat, &extractor, AssemblerFlags::default());

    let reply = assembler.generate_response("something nice please").await;

    assert_eq!(
        reply,
        "❌ Couldn't determine which city you're interested in. Please specify a city."
    );
    assert_eq!(chat.call_count(), 1);
    assert_eq!(extractor.call_count(), 0);
}

#[tokio::test]
async fn test_chat_model_failure_asks_for_city() {
    let chat = Arc::new(MockChatModel::failing());
    let extractor = Arc::new(MockExtractor::new());
    let assembler = assembler(&chat, &extractor, AssemblerFlags::default());

    let reply = assembler.generate_response("flats in Pune").await;

    assert_eq!(
        reply,
        "❌ Couldn't determine which city you're interested in. Please specify a city."
    );
    assert_eq!(extractor.call_count(), 0);
}

#[tokio::test]
async fn test_happy_path_listing_reply() {
    let chat = Arc::new(
        MockChatModel::new()
            .with_response(PARAMS_JSON)
            .with_response("Here are the top picks in Pune."),
    );
    let extractor = Arc::new(MockExtractor::new().with_success_data(sample_properties()));
    let assembler = assembler(&chat, &extractor, AssemblerFlags::default());

    let reply = assembler.generate_response("3 BHK flats in Pune under 2 crore").await;

    assert!(reply.contains("🏘️ PROPERTY RECOMMENDATIONS"));
    assert!(reply.contains("Here are the top picks in Pune."));
    let header = reply.find("PROPERTY RECOMMENDATIONS").unwrap();
    let content = reply.find("Here are the top picks").unwrap();
    assert!(header < content);

    // Interpretation plus analysis, nothing else
    assert_eq!(chat.call_count(), 2);
    // Extracted records are handed to the analysis prompt verbatim
    assert!(chat.last_prompt().unwrap().contains("Sunrise Towers"));

    assert_eq!(extractor.call_count(), 1);
    assert!(extractor.was_called_for("https://www.squareyards.com/sale/property-for-sale-in-pune/*"));
    assert!(extractor.was_called_for("https://www.99acres.com/property-in-pune-ffid/*"));
    assert!(extractor.was_called_for("https://housing.com/in/buy/pune/pune"));
    assert!(!extractor.was_called_for("https://www.nobroker.in/property/sale/Pune/pune"));
}

#[tokio::test]
async fn test_nobroker_source_behind_flag() {
    let chat = Arc::new(
        MockChatModel::new()
            .with_response(PARAMS_JSON)
            .with_response("analysis"),
    );
    let extractor = Arc::new(MockExtractor::new().with_success_data(sample_properties()));
    let assembler = assembler(
        &chat,
        &extractor,
        AssemblerFlags {
            enable_nobroker_source: true,
            include_location_trends: false,
        },
    );

    assembler.generate_response("flats in Pune").await;

    assert_eq!(extractor.calls()[0].urls.len(), 4);
    assert!(extractor.was_called_for("https://www.nobroker.in/property/sale/Pune/pune"));
}

#[tokio::test]
async fn test_unsuccessful_extraction_analyzes_empty_list() {
    let chat = Arc::new(
        MockChatModel::new()
            .with_response(PARAMS_JSON)
            .with_response("No properties matched your criteria."),
    );
    let extractor = Arc::new(MockExtractor::new().with_failure());
    let assembler = assembler(&chat, &extractor, AssemblerFlags::default());

    let reply = assembler.generate_response("flats in Pune").await;

    // The pipeline continues: analysis runs over an empty record list
    assert!(reply.contains("No properties matched your criteria."));
    assert_eq!(chat.call_count(), 2);
    assert!(chat.last_prompt().unwrap().contains("[]"));
}

#[tokio::test]
async fn test_extractor_transport_failure_is_generic_error() {
    let chat = Arc::new(MockChatModel::new().with_response(PARAMS_JSON));
    let extractor = Arc::new(MockExtractor::failing());
    let assembler = assembler(&chat, &extractor, AssemblerFlags::default());

    let reply = assembler.generate_response("flats in Pune").await;

    assert_eq!(
        reply,
        "❌ An error occurred while processing your request. Please try again later."
    );
}

#[tokio::test]
async fn test_trends_section_appended_when_enabled() {
    let chat = Arc::new(
        MockChatModel::new()
            .with_response(PARAMS_JSON)
            .with_response("Listing analysis here.")
            .with_response("Baner leads on appreciation."),
    );
    let extractor = Arc::new(
        MockExtractor::new()
            .with_success_data(sample_properties())
            .with_success_data(json!({
                "locations": [
                    {"location": "Baner", "price_per_sqft": 9500.0, "percent_increase": 6.2, "rental_yield": 3.1}
                ]
            })),
    );
    let assembler = assembler(
        &chat,
        &extractor,
        AssemblerFlags {
            enable_nobroker_source: false,
            include_location_trends: true,
        },
    );

    let reply = assembler.generate_response("flats in Pune").await;

    assert!(reply.contains("🏘️ PROPERTY RECOMMENDATIONS"));
    assert!(reply.contains("📈 LOCATION TRENDS ANALYSIS"));
    assert!(reply.contains("Baner leads on appreciation."));

    assert_eq!(chat.call_count(), 3);
    assert_eq!(extractor.call_count(), 2);
    assert!(extractor
        .was_called_for("https://www.99acres.com/property-rates-and-price-trends-in-pune-prffid/*"));
}

#[tokio::test]
async fn test_trends_extraction_failure_yields_sentinel() {
    let chat = Arc::new(
        MockChatModel::new()
            .with_response(PARAMS_JSON)
            .with_response("Listing analysis here."),
    );
    let extractor = Arc::new(
        MockExtractor::new()
            .with_success_data(sample_properties())
            .with_failure(),
    );
    let assembler = assembler(
        &chat,
        &extractor,
        AssemblerFlags {
            enable_nobroker_source: false,
            include_location_trends: true,
        },
    );

    let reply = assembler.generate_response("flats in Pune").await;

    assert!(reply.contains("📈 LOCATION TRENDS ANALYSIS"));
    assert!(reply.contains("No price trends data available"));
    // No analysis call is made for an empty trends payload
    assert_eq!(chat.call_count(), 2);
}
