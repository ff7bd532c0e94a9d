//! OIDC third-party login initiation.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use cyclops_cache::CacheManager;
use cyclops_cache::keys;
use cyclops_core::config::LtiConfig;
use cyclops_core::result::AppResult;
use cyclops_core::traits::CacheProvider;

use crate::error::LtiError;
use crate::registry::RegistrationStore;

/// Parameters of a login initiation request (query string or form).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    /// Platform issuer.
    pub iss: Option<String>,
    /// Opaque user hint, echoed to the platform.
    pub login_hint: Option<String>,
    /// Where the platform should post the id_token.
    pub target_link_uri: Option<String>,
    /// Client ID, absent on some platforms.
    pub client_id: Option<String>,
    /// Opaque message hint, echoed to the platform.
    pub lti_message_hint: Option<String>,
}

/// What is remembered about a login until the launch arrives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingLogin {
    /// Platform issuer.
    pub iss: String,
    /// Client ID of the resolved registration.
    pub client_id: String,
    /// Nonce the id_token must carry.
    pub nonce: String,
    /// Redirect URI sent to the platform.
    pub target_link_uri: String,
    /// When the login started.
    pub created_at: DateTime<Utc>,
}

/// Redirect to the platform's authorization endpoint.
#[derive(Debug, Clone)]
pub struct LoginRedirect {
    /// Full authorization URL.
    pub url: String,
    /// State value that keys the pending login.
    pub state: String,
}

/// Starts OIDC logins.
#[derive(Debug, Clone)]
pub struct OidcLogin {
    registrations: Arc<dyn RegistrationStore>,
    cache: CacheManager,
    state_ttl: Duration,
}

impl OidcLogin {
    /// Create a login handler.
    pub fn new(
        registrations: Arc<dyn RegistrationStore>,
        cache: CacheManager,
        config: &LtiConfig,
    ) -> Self {
        Self {
            registrations,
            cache,
            state_ttl: Duration::from_secs(config.state_ttl_seconds),
        }
    }

    /// Validate the login request, remember a fresh state and nonce, and
    /// build the redirect to the platform.
    pub async fn initiate(&self, request: &LoginRequest) -> AppResult<LoginRedirect> {
        let iss = non_empty(&request.iss).ok_or(LtiError::MissingParam("iss"))?;
        let login_hint =
            non_empty(&request.login_hint).ok_or(LtiError::MissingParam("login_hint"))?;
        let target_link_uri = non_empty(&request.target_link_uri)
            .ok_or(LtiError::MissingParam("target_link_uri"))?;
        let client_id = non_empty(&request.client_id);

        let registration = self
            .registrations
            .find_registration(iss, client_id)
            .await?
            .ok_or_else(|| LtiError::UnknownRegistration {
                iss: iss.to_string(),
            })?;

        let state = format!("state-{}", Uuid::new_v4());
        let nonce = Uuid::new_v4().simple().to_string();

        let pending = PendingLogin {
            iss: registration.iss.clone(),
            client_id: registration.client_id.clone(),
            nonce: nonce.clone(),
            target_link_uri: target_link_uri.to_string(),
            created_at: Utc::now(),
        };
        self.cache
            .set_json(&keys::oidc_state(&state), &pending, self.state_ttl)
            .await?;

        let mut params: Vec<(&str, &str)> = vec![
            ("scope", "openid"),
            ("response_type", "id_token"),
            ("response_mode", "form_post"),
            ("prompt", "none"),
            ("client_id", registration.client_id.as_str()),
            ("redirect_uri", target_link_uri),
            ("state", state.as_str()),
            ("nonce", nonce.as_str()),
            ("login_hint", login_hint),
        ];
        if let Some(hint) = non_empty(&request.lti_message_hint) {
            params.push(("lti_message_hint", hint));
        }

        let url = append_query(&registration.auth_login_url, &params);

        info!(
            iss = %registration.iss,
            client_id = %registration.client_id,
            "OIDC login initiated"
        );

        Ok(LoginRedirect { url, state })
    }

    /// Consume a pending login. A state can be used once.
    pub async fn take_pending(&self, state: &str) -> AppResult<PendingLogin> {
        self.cache
            .take_json::<PendingLogin>(&keys::oidc_state(state))
            .await?
            .ok_or_else(|| LtiError::InvalidState.into())
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Append URL-encoded query parameters to a URL that may already have some.
pub(crate) fn append_query(base: &str, params: &[(&str, &str)]) -> String {
    let query = params
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");
    let separator = if base.contains('?') { '&' } else { '?' };
    format!("{base}{separator}{query}")
}
