//! API contract generator web server

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use apicontract::{
    api::{self, AppState},
    config::Config,
    services::{
        contract::ContractService, export::ExportWriter, generation::OpenAiGenerator,
        markdown::MarkdownRenderer,
    },
    templates::PageRenderer,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "apicontract=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting API contract generator...");

    // Load configuration
    let config = Config::load_with_env(Path::new("config.yml"))?;
    tracing::info!("Configuration loaded");

    if config.generation.api_key.is_empty() {
        tracing::warn!("No generation API key configured; generation requests will be rejected by the service");
    }

    let generator = Arc::new(OpenAiGenerator::new(&config.generation));
    tracing::info!("Generation client ready: model {}", config.generation.model);

    let exporter = ExportWriter::from_config(&config.export);
    if !exporter.dir().is_dir() {
        tracing::warn!("Export directory {} does not exist; exports will fail", exporter.dir().display());
    }

    let pages = PageRenderer::new()?;
    tracing::info!("Page templates loaded");

    let state = AppState {
        contract_service: Arc::new(ContractService::new(generator, exporter)),
        markdown: Arc::new(MarkdownRenderer::new()),
        pages: Arc::new(pages),
    };

    // Build router
    let app = api::build_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
