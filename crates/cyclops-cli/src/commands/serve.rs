//! Start the Cyclops server.

use clap::Args;

use cyclops_core::error::AppError;
use cyclops_database::connection::mask_password;
use cyclops_database::migration::run_migrations;

use crate::output;

/// Arguments for the serve command
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Override the server port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Override the server host
    #[arg(long)]
    pub host: Option<String>,

    /// Run database migrations on startup
    #[arg(long)]
    pub auto_migrate: bool,
}

/// Execute the serve command
pub async fn execute(args: &ServeArgs, config_path: &str) -> Result<(), AppError> {
    let mut config = super::load_config(config_path)?;

    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(ref host) = args.host {
        config.server.host = host.clone();
    }

    println!("Starting Cyclops server...");
    output::print_kv("Host", &config.server.host);
    output::print_kv("Port", &config.server.port.to_string());
    output::print_kv("Base path", &config.server.base_path);
    output::print_kv("Database", &mask_password(&config.database.url));

    let db = super::connect_db(&config).await?;

    if args.auto_migrate {
        println!("Running database migrations...");
        run_migrations(db.pool()).await?;
        output::print_success("Migrations applied.");
    }

    cyclops_api::run_server(config, db).await
}
