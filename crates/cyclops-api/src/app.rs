//! Server bootstrap: wires infrastructure, state and router, then serves.

use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::sync::watch;
use tracing::{info, warn};

use cyclops_cache::CacheManager;
use cyclops_core::config::AppConfig;
use cyclops_core::error::AppError;
use cyclops_core::result::AppResult;
use cyclops_core::traits::OcrEngine;
use cyclops_database::{DatabasePool, RegistrationRepository};
use cyclops_lti::RegistrationStore;
use cyclops_ocr::TesseractEngine;

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}

/// Runs the Cyclops server until Ctrl+C.
pub async fn run_server(config: AppConfig, db: DatabasePool) -> AppResult<()> {
    info!("Starting Cyclops server...");

    info!(provider = %config.cache.provider, "Initializing cache");
    let cache = CacheManager::new(&config.cache).await?;

    let registrations: Arc<dyn RegistrationStore> =
        Arc::new(RegistrationRepository::new(db.pool().clone()));

    let ocr: Arc<dyn OcrEngine> = Arc::new(TesseractEngine::new(config.ocr.clone()));
    match ocr.health_check().await {
        Ok(true) => info!(engine = ocr.name(), "OCR engine available"),
        _ => warn!(engine = ocr.name(), "OCR engine did not answer --version"),
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    let state = AppState::new(config, cache, registrations, ocr).await?;
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    info!(%addr, "Cyclops server listening");

    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            let _ = shutdown_tx.send(true);
        })
        .into_future();

    tokio::select! {
        result = server => {
            result.map_err(|e| AppError::internal(format!("Server error: {e}")))?;
        }
        _ = async move {
            let _ = shutdown_rx.wait_for(|stopping| *stopping).await;
            tokio::time::sleep(grace).await;
        } => {
            warn!(grace_seconds = grace.as_secs(), "Open connections outlived the shutdown grace period");
        }
    }

    db.close().await;
    info!("Cyclops server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
