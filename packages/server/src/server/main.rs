//! WhatsApp property assistant server.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use whatsapp::{WhatsAppOptions, WhatsAppService};

use assistant_core::config::Config;
use assistant_core::domains::property::{AssemblerFlags, ResponseAssembler};
use assistant_core::kernel::{BaseChatModel, BaseExtractor, FirecrawlExtractor, OpenAIChatModel};
use assistant_core::server::app::{build_app, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,assistant_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();

    let config = Config::from_env()?;

    tracing::info!(
        firecrawl_key_present = config.credentials.firecrawl_api_key.is_some(),
        openai_key_present = config.credentials.openai_api_key.is_some(),
        model = %config.openai_model_id,
        nobroker_source = config.enable_nobroker_source,
        location_trends = config.include_location_trends,
        "Starting property assistant"
    );

    // Clients are constructed with whatever keys are present; the assembler
    // refuses query requests until both are configured.
    let chat: Arc<dyn BaseChatModel> = Arc::new(OpenAIChatModel::new(
        config.credentials.openai_api_key.clone().unwrap_or_default(),
        config.openai_model_id.clone(),
    ));
    let extractor: Arc<dyn BaseExtractor> = Arc::new(FirecrawlExtractor::new(
        config
            .credentials
            .firecrawl_api_key
            .clone()
            .unwrap_or_default(),
    )?);

    let assembler = Arc::new(ResponseAssembler::new(
        chat,
        extractor,
        config.credentials.clone(),
        AssemblerFlags {
            enable_nobroker_source: config.enable_nobroker_source,
            include_location_trends: config.include_location_trends,
        },
    ));

    let whatsapp = Arc::new(WhatsAppService::new(WhatsAppOptions {
        access_token: config.whatsapp_access_token.clone(),
        phone_number_id: config.whatsapp_phone_number_id.clone(),
        api_version: config.whatsapp_api_version.clone(),
    }));

    let app = build_app(AppState {
        assembler,
        whatsapp,
        verify_token: config.webhook_verify_token.clone(),
    });

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind server address")?;
    axum::serve(listener, app).await.context("Server exited")?;

    Ok(())
}
