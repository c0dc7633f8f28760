use helpdesk_triage::{
    api::{build_router, AppState},
    config::Config,
    integrations::{DirectoryClient, HelpdeskClient},
    ml::{ModelLoader, TicketPredictor},
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::load()?;

    // Initialize tracing
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.observability.log_level.clone().into());
    if config.observability.json_logs {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!("Starting helpdesk-triage v{}", env!("CARGO_PKG_VERSION"));

    // Load all model artifacts up front. A missing or inconsistent artifact
    // aborts startup; the service never runs with partial models.
    let loader = ModelLoader::new(config.artifacts.clone());
    let bundle = loader.load()?;
    let predictor = Arc::new(TicketPredictor::new(bundle));
    tracing::info!("✅ Classification models loaded");

    // Upstream clients
    let helpdesk = HelpdeskClient::new(config.helpdesk.clone())?;
    let directory = DirectoryClient::new(config.directory.clone())?;
    tracing::info!("✅ Upstream clients initialized");

    // Build and serve the HTTP API
    let state = AppState::new(predictor, helpdesk, directory);
    let router = build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.http_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("🚀 HTTP server listening on {}", addr);

    axum::serve(listener, router).await?;

    Ok(())
}
