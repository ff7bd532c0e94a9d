//! Cyclops server: LTI 1.3 text recognition tool.
//!
//! Loads layered configuration, initializes logging, connects to the
//! registration database and serves the HTTP application.

use tracing_subscriber::{EnvFilter, fmt};

use cyclops_core::config::AppConfig;
use cyclops_core::error::AppError;
use cyclops_database::DatabasePool;
use cyclops_database::migration::run_migrations;

#[tokio::main]
async fn main() {
    let env = std::env::var("CYCLOPS_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(%env, version = env!("CARGO_PKG_VERSION"), "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Initialize tracing. `RUST_LOG` wins over the configured level.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "pretty" => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
    }
}

async fn run(config: AppConfig) -> Result<(), AppError> {
    tokio::fs::create_dir_all(&config.storage.image_dir)
        .await
        .map_err(|e| {
            AppError::storage(format!(
                "Failed to create image dir '{}': {e}",
                config.storage.image_dir
            ))
        })?;

    let db = DatabasePool::connect(&config.database).await?;

    tracing::info!("Running database migrations...");
    run_migrations(db.pool()).await?;

    cyclops_api::run_server(config, db).await
}
