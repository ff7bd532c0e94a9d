//! LTI registration entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A platform registration: everything the tool needs to accept launches
/// from one `(iss, client_id)` pair and to sign responses back to it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LtiRegistration {
    /// Row ID.
    pub id: i64,
    /// Platform issuer.
    pub iss: String,
    /// Client ID assigned to the tool by the platform.
    pub client_id: String,
    /// Platform OIDC authorization endpoint.
    pub auth_login_url: String,
    /// Platform OAuth2 token endpoint.
    pub auth_token_url: String,
    /// Platform JWKS endpoint.
    pub key_set_url: String,
    /// Tool private key (PEM) used to sign deep-linking responses.
    #[serde(skip_serializing)]
    pub private_key: String,
    /// Tool public key (PEM).
    pub public_key: String,
    /// Tool public key as a JWK (JSON text), published in the tool
    /// configuration.
    pub public_jwk: String,
    /// Deployment ID the platform is expected to send.
    pub deployment_id: String,
    /// When the registration was created.
    pub created_at: DateTime<Utc>,
}

impl LtiRegistration {
    /// Parse the stored public JWK.
    pub fn public_jwk_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_str(&self.public_jwk)
    }

    /// Key ID of the tool's signing key, taken from the public JWK.
    pub fn key_id(&self) -> Option<String> {
        self.public_jwk_value()
            .ok()
            .and_then(|jwk| jwk.get("kid").and_then(|k| k.as_str()).map(str::to_string))
    }
}

/// Data for inserting a new registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRegistration {
    /// Platform issuer.
    pub iss: String,
    /// Client ID.
    pub client_id: String,
    /// OIDC authorization endpoint.
    pub auth_login_url: String,
    /// OAuth2 token endpoint.
    pub auth_token_url: String,
    /// JWKS endpoint.
    pub key_set_url: String,
    /// Private key (PEM).
    pub private_key: String,
    /// Public key (PEM).
    pub public_key: String,
    /// Public JWK (JSON text).
    pub public_jwk: String,
    /// Deployment ID.
    pub deployment_id: String,
}
