// WhatsApp Cloud API client.
//
// Covers the one operation this service needs: sending a text message back
// to the sender of an inbound conversation.

use std::time::Duration;

pub mod models;

use reqwest::{header, Client};

use crate::models::{SendMessageResponse, TextMessageRequest};

const GRAPH_API_BASE: &str = "https://graph.facebook.com";

/// Outbound delivery timeout. A slow Graph API call surfaces as a delivery
/// failure, never a retry.
const SEND_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct WhatsAppOptions {
    pub access_token: String,
    pub phone_number_id: String,
    pub api_version: String,
}

#[derive(Debug, Clone)]
pub struct WhatsAppService {
    options: WhatsAppOptions,
    client: Client,
}

impl WhatsAppService {
    pub fn new(options: WhatsAppOptions) -> Self {
        Self {
            options,
            client: Client::new(),
        }
    }

    /// Send a plain text message to a WhatsApp ID.
    pub async fn send_text(
        &self,
        recipient: &str,
        body: &str,
    ) -> Result<SendMessageResponse, &'static str> {
        let url = format!(
            "{}/{}/{}/messages",
            GRAPH_API_BASE, self.options.api_version, self.options.phone_number_id
        );

        let request = TextMessageRequest::new(recipient, body);

        let res = self
            .client
            .post(url)
            .bearer_auth(&self.options.access_token)
            .header(header::CONTENT_TYPE, "application/json")
            .json(&request)
            .timeout(SEND_TIMEOUT)
            .send()
            .await;

        match res {
            Ok(response) => {
                let status = response.status();
                if !status.is_success() {
                    let error_body = response.text().await.unwrap_or_default();
                    tracing::error!(%status, error = %error_body, "WhatsApp API returned an error");
                    return Err("WhatsApp API returned an error");
                }

                match response.json::<SendMessageResponse>().await {
                    Ok(data) => Ok(data),
                    Err(e) => {
                        tracing::error!(error = %e, "Failed to parse WhatsApp send response");
                        Err("Error parsing send message response")
                    }
                }
            }
            Err(e) if e.is_timeout() => {
                tracing::error!("Timeout occurred while sending message");
                Err("Request timed out")
            }
            Err(e) => {
                tracing::error!(error = %e, "Request to WhatsApp failed");
                Err("Failed to send message")
            }
        }
    }
}
