//! Route definitions for the Cyclops HTTP surface.
//!
//! Routes are mounted under the configured base path. The router receives
//! `AppState` and passes it to all handlers via Axum's `State` extractor.

use std::time::Duration;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::StatusCode,
    middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_upload = state.config.storage.max_upload_size_bytes as usize;
    let timeout = Duration::from_secs(state.config.server.request_timeout_seconds);

    let tool_routes = Router::new()
        .merge(lti_routes())
        .merge(picker_routes())
        .merge(upload_routes())
        .merge(embed_routes())
        .merge(health_routes());

    let mounted = match state.paths.nest_prefix() {
        Some(prefix) => Router::new().nest(prefix, tool_routes),
        None => tool_routes,
    };

    mounted
        .layer(DefaultBodyLimit::max(max_upload))
        .layer(RequestBodyLimitLayer::new(max_upload))
        .layer(middleware::compression::build_compression_layer())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            timeout,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::cors::build_cors_layer(&state.config.server.cors))
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// OIDC login, launch, tool configuration and icon.
fn lti_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/login/",
            get(handlers::lti::login_get).post(handlers::lti::login_post),
        )
        .route("/launch/", post(handlers::lti::launch))
        .route("/config/{key_id}/json", get(handlers::lti::config_json))
        .route("/icon/", get(handlers::lti::icon))
}

/// Course file picker.
fn picker_routes() -> Router<AppState> {
    Router::new()
        .route("/select/", get(handlers::picker::select))
        .route("/select/back/", post(handlers::picker::back))
}

/// Upload page and form target.
fn upload_routes() -> Router<AppState> {
    Router::new()
        .route("/upload/", get(handlers::upload::upload_page))
        .route("/uploader", post(handlers::upload::uploader))
        .route("/upload/back/", post(handlers::picker::back))
}

/// Load, recognize, respond.
fn embed_routes() -> Router<AppState> {
    Router::new()
        .route("/load/", get(handlers::embed::load))
        .route("/embed/", get(handlers::embed::embed))
        .route("/test/", get(handlers::embed::test))
}

/// Liveness.
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
