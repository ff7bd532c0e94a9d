//! LTI platform registration commands.

use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use cyclops_core::error::AppError;
use cyclops_database::RegistrationRepository;
use cyclops_entity::registration::{LtiRegistration, NewRegistration};

use crate::output::{self, OutputFormat};

/// Arguments for registration commands
#[derive(Debug, Args)]
pub struct RegistrationArgs {
    /// Registration subcommand
    #[command(subcommand)]
    pub command: RegistrationCommand,
}

/// Registration subcommands
#[derive(Debug, Subcommand)]
pub enum RegistrationCommand {
    /// List all registrations
    List,
    /// Show one registration
    Show {
        /// Registration ID
        id: i64,
    },
    /// Register a platform
    Add(AddRegistration),
    /// Remove a registration
    Remove {
        /// Registration ID
        id: i64,
        /// Skip confirmation prompt
        #[arg(long)]
        force: bool,
    },
}

/// Flags for `registration add`
#[derive(Debug, Args)]
pub struct AddRegistration {
    /// Platform issuer, e.g. https://canvas.instructure.com
    #[arg(long)]
    pub iss: String,
    /// Client ID the platform assigned to the tool
    #[arg(long)]
    pub client_id: String,
    /// Platform OIDC authorization endpoint
    #[arg(long)]
    pub auth_login_url: String,
    /// Platform OAuth2 token endpoint
    #[arg(long)]
    pub auth_token_url: String,
    /// Platform JWKS endpoint
    #[arg(long)]
    pub key_set_url: String,
    /// Deployment ID
    #[arg(long)]
    pub deployment_id: String,
    /// Tool private key (PEM file)
    #[arg(long)]
    pub private_key: PathBuf,
    /// Tool public key (PEM file)
    #[arg(long)]
    pub public_key: PathBuf,
    /// Tool public key as a JWK (JSON file); must carry a `kid`
    #[arg(long)]
    pub public_jwk: PathBuf,
}

/// Registration display row
#[derive(Debug, Serialize, Tabled)]
struct RegistrationRow {
    /// Registration ID
    id: i64,
    /// Issuer
    iss: String,
    /// Client ID
    client_id: String,
    /// Deployment ID
    deployment_id: String,
    /// Key ID
    key_id: String,
    /// Created at
    created_at: String,
}

impl From<&LtiRegistration> for RegistrationRow {
    fn from(reg: &LtiRegistration) -> Self {
        Self {
            id: reg.id,
            iss: reg.iss.clone(),
            client_id: reg.client_id.clone(),
            deployment_id: reg.deployment_id.clone(),
            key_id: reg.key_id().unwrap_or_else(|| "-".to_string()),
            created_at: reg.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Detail row, including the platform endpoints
#[derive(Debug, Serialize, Tabled)]
struct RegistrationDetail {
    id: i64,
    iss: String,
    client_id: String,
    deployment_id: String,
    key_id: String,
    auth_login_url: String,
    auth_token_url: String,
    key_set_url: String,
    created_at: String,
}

impl From<&LtiRegistration> for RegistrationDetail {
    fn from(reg: &LtiRegistration) -> Self {
        Self {
            id: reg.id,
            iss: reg.iss.clone(),
            client_id: reg.client_id.clone(),
            deployment_id: reg.deployment_id.clone(),
            key_id: reg.key_id().unwrap_or_else(|| "-".to_string()),
            auth_login_url: reg.auth_login_url.clone(),
            auth_token_url: reg.auth_token_url.clone(),
            key_set_url: reg.key_set_url.clone(),
            created_at: reg.created_at.to_rfc3339(),
        }
    }
}

/// Execute registration commands
pub async fn execute(
    args: &RegistrationArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let db = super::connect_db(&config).await?;
    let repo = RegistrationRepository::new(db.pool().clone());

    match &args.command {
        RegistrationCommand::List => {
            let registrations = repo.find_all().await?;
            let rows: Vec<RegistrationRow> = registrations.iter().map(Into::into).collect();
            output::print_list(&rows, format);
        }
        RegistrationCommand::Show { id } => {
            let reg = find(&repo, *id).await?;
            output::print_item(&RegistrationDetail::from(&reg), format);
        }
        RegistrationCommand::Add(add) => {
            let data = read_new_registration(add).await?;
            let reg = repo.create(&data).await?;
            output::print_success(&format!(
                "Registered '{}' (client {}) with id {}",
                reg.iss, reg.client_id, reg.id
            ));
            output::print_kv("Config URL", &format!("/config/{}/json", reg.id));
        }
        RegistrationCommand::Remove { id, force } => {
            let reg = find(&repo, *id).await?;

            if !force {
                let confirm = dialoguer::Confirm::new()
                    .with_prompt(format!(
                        "Remove registration {} for '{}' (client {})?",
                        reg.id, reg.iss, reg.client_id
                    ))
                    .default(false)
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {e}")))?;

                if !confirm {
                    println!("Cancelled.");
                    return Ok(());
                }
            }

            if repo.delete(reg.id).await? {
                output::print_success(&format!("Registration {} removed", reg.id));
            } else {
                output::print_warning(&format!("Registration {} was already gone", reg.id));
            }
        }
    }

    db.close().await;
    Ok(())
}

async fn find(repo: &RegistrationRepository, id: i64) -> Result<LtiRegistration, AppError> {
    repo.find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Registration {id} not found")))
}

async fn read_new_registration(add: &AddRegistration) -> Result<NewRegistration, AppError> {
    let private_key = read_file(&add.private_key).await?;
    let public_key = read_file(&add.public_key).await?;
    let public_jwk = read_file(&add.public_jwk).await?;

    let jwk: serde_json::Value = serde_json::from_str(&public_jwk)
        .map_err(|e| AppError::validation(format!("Public JWK is not valid JSON: {e}")))?;
    if jwk.get("kid").and_then(|k| k.as_str()).is_none() {
        return Err(AppError::validation("Public JWK has no \"kid\""));
    }

    Ok(NewRegistration {
        iss: add.iss.clone(),
        client_id: add.client_id.clone(),
        auth_login_url: add.auth_login_url.clone(),
        auth_token_url: add.auth_token_url.clone(),
        key_set_url: add.key_set_url.clone(),
        private_key,
        public_key,
        public_jwk: jwk.to_string(),
        deployment_id: add.deployment_id.clone(),
    })
}

async fn read_file(path: &Path) -> Result<String, AppError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| AppError::validation(format!("Cannot read '{}': {e}", path.display())))
}
