mod analysis;
mod config;
mod db;
mod errors;
mod extraction;
mod history;
mod llm_client;
mod models;
mod routes;
mod state;

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::orchestrator::Analyzer;
use crate::config::Config;
use crate::db::{create_pool, ensure_schema};
use crate::history::store::{HistoryStore, PgHistoryStore};
use crate::llm_client::{CompletionService, GeminiClient};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Tools API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;
    ensure_schema(&db).await?;
    let history: Arc<dyn HistoryStore> = Arc::new(PgHistoryStore::new(db));

    // Initialize completion client (absent key => analyze requests fail with 500)
    let completion = match &config.gemini_api_key {
        Some(key) => {
            info!("Completion client initialized (model: {})", llm_client::MODEL);
            Some(Arc::new(GeminiClient::new(key.clone())) as Arc<dyn CompletionService>)
        }
        None => {
            warn!("GEMINI_API_KEY is not set; analysis requests will be rejected");
            None
        }
    };

    let state = AppState {
        analyzer: Analyzer::new(completion),
        history,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(build_cors(&config)?);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Permissive unless `CORS_ALLOW_ORIGIN` pins a single origin.
fn build_cors(config: &Config) -> Result<CorsLayer> {
    match &config.cors_allow_origin {
        Some(origin) => {
            let origin: HeaderValue = origin
                .parse()
                .context("CORS_ALLOW_ORIGIN must be a valid header value")?;
            Ok(CorsLayer::new()
                .allow_origin(origin)
                .allow_methods(Any)
                .allow_headers(Any))
        }
        None => Ok(CorsLayer::permissive()),
    }
}
