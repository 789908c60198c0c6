use std::sync::Arc;

use crate::llm_client::ModelClient;
use crate::rasterizer::Rasterizer;

/// Shared application state injected into all route handlers via Axum extractors.
/// Built once at startup and never mutated.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable rasterizer. Default: PopplerRasterizer.
    pub rasterizer: Arc<dyn Rasterizer>,
    /// Pluggable model client. Default: GeminiClient.
    pub model: Arc<dyn ModelClient>,
}
