//! Health check handler.

use axum::Json;
use axum::extract::State;

use cyclops_core::traits::CacheProvider;

use crate::dto::HealthResponse;
use crate::state::AppState;

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let cache = state.cache.health_check().await.unwrap_or(false);
    let storage = state.images_dir.health_check().await.unwrap_or(false);

    Json(HealthResponse {
        status: if cache && storage { "ok" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        cache,
        storage,
        ocr_engine: state.ocr.name().to_string(),
    })
}
