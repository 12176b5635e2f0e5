//! WhatsApp Cloud API webhook endpoints.
//!
//! `GET /webhook` answers Meta's verification handshake; `POST /webhook`
//! receives event envelopes, runs the reply pipeline for text messages, and
//! delivers the result back to the sender. Processing is synchronous: the
//! handler acknowledges only after the reply has been attempted.

use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    Json,
};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;

use crate::server::app::AppState;

// =============================================================================
// Verification handshake
// =============================================================================

/// Query parameters of Meta's webhook verification handshake.
#[derive(Debug, Deserialize)]
pub struct VerifyParams {
    #[serde(rename = "hub.mode")]
    pub mode: Option<String>,
    #[serde(rename = "hub.verify_token")]
    pub verify_token: Option<String>,
    #[serde(rename = "hub.challenge")]
    pub challenge: Option<String>,
}

pub async fn verify_webhook(
    Extension(state): Extension<AppState>,
    Query(params): Query<VerifyParams>,
) -> (StatusCode, String) {
    match (
        params.mode.as_deref(),
        params.verify_token.as_deref(),
        params.challenge,
    ) {
        (Some("subscribe"), Some(token), Some(challenge)) if token == state.verify_token => {
            tracing::info!("Webhook verified");
            (StatusCode::OK, challenge)
        }
        _ => {
            tracing::warn!("Webhook verification failed");
            (StatusCode::FORBIDDEN, "verification failed".to_string())
        }
    }
}

// =============================================================================
// Inbound event envelope (entry -> changes -> value -> contacts/messages)
// =============================================================================

// Everything is optional: status updates and other non-message events arrive
// on the same endpoint and are acknowledged without processing.

#[derive(Debug, Deserialize)]
pub struct WebhookEvent {
    #[serde(default)]
    pub object: Option<String>,
    #[serde(default)]
    pub entry: Vec<Entry>,
}

#[derive(Debug, Deserialize)]
pub struct Entry {
    #[serde(default)]
    pub changes: Vec<Change>,
}

#[derive(Debug, Deserialize)]
pub struct Change {
    #[serde(default)]
    pub value: Option<ChangeValue>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ChangeValue {
    #[serde(default)]
    pub contacts: Vec<Contact>,
    #[serde(default)]
    pub messages: Vec<InboundMessage>,
}

#[derive(Debug, Deserialize)]
pub struct Contact {
    pub wa_id: String,
    #[serde(default)]
    pub profile: Option<Profile>,
}

#[derive(Debug, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct InboundMessage {
    #[serde(default)]
    pub text: Option<TextContent>,
}

#[derive(Debug, Deserialize)]
pub struct TextContent {
    pub body: String,
}

/// Pull the sender id and text body out of an event, if it carries a valid
/// text message.
fn text_message(event: &WebhookEvent) -> Option<(String, String)> {
    event.object.as_ref()?;
    let value = event.entry.first()?.changes.first()?.value.as_ref()?;
    let contact = value.contacts.first()?;
    let message = value.messages.first()?;
    let text = message.text.as_ref()?;
    Some((contact.wa_id.clone(), text.body.clone()))
}

// =============================================================================
// Inbound handler
// =============================================================================

pub async fn receive_webhook(
    Extension(state): Extension<AppState>,
    Json(event): Json<WebhookEvent>,
) -> StatusCode {
    let Some((wa_id, body)) = text_message(&event) else {
        // Delivery receipts, status updates, and other non-message events
        return StatusCode::OK;
    };

    tracing::info!(wa_id = %wa_id, "Processing inbound message");

    let reply = state.assembler.generate_response(&body).await;
    let reply = format_for_whatsapp(&reply);

    if let Err(e) = state.whatsapp.send_text(&wa_id, &reply).await {
        tracing::error!(error = %e, wa_id = %wa_id, "Failed to deliver reply");
    }

    StatusCode::OK
}

lazy_static! {
    static ref CITATION_RE: Regex = Regex::new(r"【.*?】").expect("citation regex is valid");
    static ref BOLD_RE: Regex = Regex::new(r"\*\*(.*?)\*\*").expect("bold regex is valid");
}

/// Rewrite model output for the WhatsApp channel: drop citation brackets and
/// convert markdown bold to WhatsApp bold.
pub fn format_for_whatsapp(text: &str) -> String {
    let stripped = CITATION_RE.replace_all(text, "");
    let trimmed = stripped.trim();
    BOLD_RE.replace_all(trimmed, "*$1*").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_event() -> serde_json::Value {
        json!({
            "object": "whatsapp_business_account",
            "entry": [{
                "id": "1234567890",
                "changes": [{
                    "field": "messages",
                    "value": {
                        "messaging_product": "whatsapp",
                        "contacts": [{
                            "wa_id": "15551234567",
                            "profile": {"name": "Asha"}
                        }],
                        "messages": [{
                            "from": "15551234567",
                            "id": "wamid.XYZ",
                            "type": "text",
                            "text": {"body": "3 BHK flats in Pune under 2 crore"}
                        }]
                    }
                }]
            }]
        })
    }

    #[test]
    fn test_text_message_extraction() {
        let event: WebhookEvent = serde_json::from_value(sample_event()).unwrap();
        let (wa_id, body) = text_message(&event).unwrap();

        assert_eq!(wa_id, "15551234567");
        assert_eq!(body, "3 BHK flats in Pune under 2 crore");
    }

    #[test]
    fn test_status_event_is_ignored() {
        // Delivery receipts carry `statuses`, not `messages`.
        let event: WebhookEvent = serde_json::from_value(json!({
            "object": "whatsapp_business_account",
            "entry": [{
                "changes": [{
                    "value": {"statuses": [{"id": "wamid.XYZ", "status": "delivered"}]}
                }]
            }]
        }))
        .unwrap();

        assert!(text_message(&event).is_none());
    }

    #[test]
    fn test_empty_envelope_is_ignored() {
        let event: WebhookEvent = serde_json::from_value(json!({})).unwrap();
        assert!(text_message(&event).is_none());
    }

    #[test]
    fn test_format_for_whatsapp_bold() {
        assert_eq!(
            format_for_whatsapp("Here is **Sunrise Towers** at **1.8 Cr**"),
            "Here is *Sunrise Towers* at *1.8 Cr*"
        );
    }

    #[test]
    fn test_format_for_whatsapp_citations_and_trim() {
        assert_eq!(
            format_for_whatsapp("  Good pick【4:2†source】 overall  "),
            "Good pick overall"
        );
    }
}
