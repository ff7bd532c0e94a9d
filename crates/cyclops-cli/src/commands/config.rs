//! Configuration inspection commands.

use clap::{Args, Subcommand};

use cyclops_core::config::AppConfig;
use cyclops_core::error::AppError;
use cyclops_database::connection::mask_password;

use crate::output::{self, OutputFormat};

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration, secrets masked
    Show,
    /// Validate the configuration file
    Validate,
}

/// Execute config commands
pub async fn execute(
    args: &ConfigArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => {
            let config = redacted(super::load_config(config_path)?);
            match format {
                OutputFormat::Json => output::print_json(&config),
                OutputFormat::Table => println!("{config:#?}"),
            }
        }
        ConfigCommand::Validate => {
            let config = match super::load_config(config_path) {
                Ok(config) => config,
                Err(e) => {
                    output::print_error(&format!("Configuration invalid: {e}"));
                    return Err(e);
                }
            };

            let problems = problems(&config);
            if !problems.is_empty() {
                for problem in &problems {
                    output::print_error(problem);
                }
                return Err(AppError::configuration(format!(
                    "{} problem(s) in '{config_path}'",
                    problems.len()
                )));
            }

            output::print_success(&format!("Configuration '{config_path}' is valid"));
            output::print_kv(
                "Server",
                &format!("{}:{}{}", config.server.host, config.server.port, config.server.base_path),
            );
            output::print_kv("Database", &mask_password(&config.database.url));
            output::print_kv("Cache", &config.cache.provider);
            output::print_kv("LMS", &config.lms.api_url);
            output::print_kv("OCR", &format!("{} ({})", config.ocr.command, config.ocr.language));
            output::print_kv("Images", &config.storage.image_dir);
        }
    }

    Ok(())
}

/// Mask credentials so the configuration can be printed.
fn redacted(mut config: AppConfig) -> AppConfig {
    config.database.url = mask_password(&config.database.url);
    config.cache.redis.url = mask_password(&config.cache.redis.url);
    if !config.lms.api_key.is_empty() {
        config.lms.api_key = "****".to_string();
    }
    config
}

/// Settings that load fine but cannot work at runtime.
fn problems(config: &AppConfig) -> Vec<String> {
    let mut problems = Vec::new();

    if config.lms.api_url.is_empty() {
        problems.push("lms.api_url is not set".to_string());
    }
    if config.lms.api_key.is_empty() {
        problems.push("lms.api_key is not set".to_string());
    }
    if !config.server.base_path.starts_with('/') || !config.server.base_path.ends_with('/') {
        problems.push(format!(
            "server.base_path '{}' must begin and end with '/'",
            config.server.base_path
        ));
    }
    if !matches!(config.cache.provider.as_str(), "memory" | "redis") {
        problems.push(format!("cache.provider '{}' is unknown", config.cache.provider));
    }
    if !matches!(config.logging.format.as_str(), "json" | "pretty") {
        problems.push(format!("logging.format '{}' is unknown", config.logging.format));
    }
    if config.storage.max_upload_size_bytes == 0 {
        problems.push("storage.max_upload_size_bytes must be positive".to_string());
    }

    problems
}
