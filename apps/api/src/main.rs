mod config;
mod errors;
mod evaluation;
mod llm_client;
mod rasterizer;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::GeminiClient;
use crate::rasterizer::PopplerRasterizer;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing GOOGLE_API_KEY)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume screener v{}", env!("CARGO_PKG_VERSION"));

    // Initialize rasterizer (Poppler from POPPLER_PATH, else PATH)
    let rasterizer = PopplerRasterizer::from_config(&config);
    info!(
        "Rasterizer: {} at {} dpi, JPEG quality {}",
        rasterizer.binary().display(),
        config.raster_dpi,
        config.jpeg_quality
    );

    // Initialize model client; the API key is bound here and never changes
    let model = GeminiClient::new(&config)?;
    info!("Model client initialized (model: {})", model.model());

    let state = AppState {
        rasterizer: Arc::new(rasterizer),
        model: Arc::new(model),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
