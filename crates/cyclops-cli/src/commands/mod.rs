//! CLI command definitions and dispatch.

pub mod config;
pub mod migrate;
pub mod ocr;
pub mod registration;
pub mod serve;
pub mod tree;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use cyclops_core::config::AppConfig;
use cyclops_core::error::AppError;
use cyclops_database::DatabasePool;

/// Cyclops: recognize text in course images from inside the LMS
#[derive(Debug, Parser)]
#[command(name = "cyclops", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the Cyclops server
    Serve(serve::ServeArgs),
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// LTI platform registrations
    Registration(registration::RegistrationArgs),
    /// Configuration inspection
    Config(config::ConfigArgs),
    /// Recognize the text of a local image
    Ocr(ocr::OcrArgs),
    /// Print the file picker markup of a course
    Tree(tree::TreeArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Serve(args) => serve::execute(args, &self.config).await,
            Commands::Migrate(args) => migrate::execute(args, &self.config).await,
            Commands::Registration(args) => {
                registration::execute(args, &self.config, self.format).await
            }
            Commands::Config(args) => config::execute(args, &self.config, self.format).await,
            Commands::Ocr(args) => ocr::execute(args, &self.config).await,
            Commands::Tree(args) => tree::execute(args, &self.config).await,
        }
    }
}

/// Helper: load configuration from file
pub fn load_config(config_path: &str) -> Result<AppConfig, AppError> {
    AppConfig::load_file(config_path)
}

/// Helper: connect to the database named in the configuration
pub async fn connect_db(config: &AppConfig) -> Result<DatabasePool, AppError> {
    DatabasePool::connect(&config.database).await
}
