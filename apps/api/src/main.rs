mod analysis;
mod config;
mod errors;
mod gemini;
mod models;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::service::CareerAnalysisService;
use crate::config::Config;
use crate::gemini::GeminiClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Counsel API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the Gemini gateway
    let gateway = GeminiClient::new(&config);
    if gateway.is_configured() {
        info!("Gemini gateway initialized (model: {})", config.gemini_model);
    } else {
        warn!("GEMINI_API_KEY not set; every analysis will serve fallback content");
    }

    // Initialize the analysis orchestrator with its recommendation cache
    let service = Arc::new(CareerAnalysisService::new(
        Arc::new(gateway),
        Duration::from_secs(config.cache_ttl_secs),
        config.cache_capacity,
    ));
    info!(
        "Analysis service initialized (cache ttl: {}s, capacity: {})",
        config.cache_ttl_secs, config.cache_capacity
    );

    // Build app state
    let state = AppState {
        service,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
