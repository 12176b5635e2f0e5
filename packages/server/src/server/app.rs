//! Application setup and router construction.

use std::sync::Arc;

use axum::{extract::Extension, routing::get, Router};
use tower_http::trace::TraceLayer;
use whatsapp::WhatsAppService;

use crate::domains::property::ResponseAssembler;
use crate::server::routes::{health_handler, receive_webhook, verify_webhook};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub assembler: Arc<ResponseAssembler>,
    pub whatsapp: Arc<WhatsAppService>,
    pub verify_token: String,
}

/// Build the Axum application router
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/webhook", get(verify_webhook).post(receive_webhook))
        .route("/health", get(health_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
}
