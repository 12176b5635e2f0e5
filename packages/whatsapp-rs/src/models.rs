use serde::{Deserialize, Serialize};

/// Outbound text message payload for the Cloud API `/messages` endpoint.
#[derive(Debug, Serialize)]
pub struct TextMessageRequest {
    pub messaging_product: &'static str,
    pub recipient_type: &'static str,
    pub to: String,
    #[serde(rename = "type")]
    pub message_type: &'static str,
    pub text: TextBody,
}

#[derive(Debug, Serialize)]
pub struct TextBody {
    pub preview_url: bool,
    pub body: String,
}

impl TextMessageRequest {
    pub fn new(to: &str, body: &str) -> Self {
        Self {
            messaging_product: "whatsapp",
            recipient_type: "individual",
            to: to.to_string(),
            message_type: "text",
            text: TextBody {
                preview_url: false,
                body: body.to_string(),
            },
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SendMessageResponse {
    #[serde(default)]
    pub messaging_product: Option<String>,
    #[serde(default)]
    pub contacts: Vec<SentContact>,
    #[serde(default)]
    pub messages: Vec<SentMessage>,
}

#[derive(Debug, Deserialize)]
pub struct SentContact {
    #[serde(default)]
    pub input: Option<String>,
    #[serde(default)]
    pub wa_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SentMessage {
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_message_request_shape() {
        let request = TextMessageRequest::new("15551234567", "Hello there");
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["messaging_product"], "whatsapp");
        assert_eq!(value["recipient_type"], "individual");
        assert_eq!(value["to"], "15551234567");
        assert_eq!(value["type"], "text");
        assert_eq!(value["text"]["preview_url"], false);
        assert_eq!(value["text"]["body"], "Hello there");
    }

    #[test]
    fn test_send_response_deserialization() {
        let raw = r#"{
            "messaging_product": "whatsapp",
            "contacts": [{"input": "15551234567", "wa_id": "15551234567"}],
            "messages": [{"id": "wamid.ABCD"}]
        }"#;

        let response: SendMessageResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.messages[0].id, "wamid.ABCD");
        assert_eq!(response.contacts[0].wa_id.as_deref(), Some("15551234567"));
    }
}
