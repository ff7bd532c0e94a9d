//! id_token launch validation.

use std::sync::Arc;

use chrono::Utc;
use jsonwebtoken::{Algorithm, Validation, decode, decode_header};
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use cyclops_core::config::LtiConfig;
use cyclops_core::result::AppResult;
use cyclops_entity::launch::{LAUNCH_ID_PREFIX, LaunchContext, LtiMessageType};
use cyclops_entity::registration::LtiRegistration;

use crate::claims::{LTI_VERSION, LaunchClaims};
use crate::error::LtiError;
use crate::jwks::PlatformKeys;
use crate::oidc::{OidcLogin, PendingLogin};
use crate::registry::RegistrationStore;

/// Allowed clock skew when checking `exp`, in seconds.
const LEEWAY_SECONDS: u64 = 60;

/// Form posted by the platform to the launch URL.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LaunchRequest {
    /// Signed launch message.
    pub id_token: Option<String>,
    /// State issued at login.
    pub state: Option<String>,
}

/// Validates launches and turns them into a [`LaunchContext`].
#[derive(Debug, Clone)]
pub struct LaunchValidator {
    registrations: Arc<dyn RegistrationStore>,
    login: OidcLogin,
    keys: PlatformKeys,
    nonce_exempt_issuers: Vec<String>,
}

impl LaunchValidator {
    /// Create a validator.
    pub fn new(
        registrations: Arc<dyn RegistrationStore>,
        login: OidcLogin,
        keys: PlatformKeys,
        config: &LtiConfig,
    ) -> Self {
        Self {
            registrations,
            login,
            keys,
            nonce_exempt_issuers: config.nonce_exempt_issuers.clone(),
        }
    }

    /// Validate a launch form and build the context later requests resume.
    pub async fn validate(&self, request: &LaunchRequest) -> AppResult<LaunchContext> {
        let state = request
            .state
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or(LtiError::MissingParam("state"))?;
        let id_token = request
            .id_token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or(LtiError::MissingParam("id_token"))?;

        let pending = self.login.take_pending(state).await?;

        let registration = self
            .registrations
            .find_registration(&pending.iss, Some(&pending.client_id))
            .await?
            .ok_or_else(|| LtiError::UnknownRegistration {
                iss: pending.iss.clone(),
            })?;

        let header = decode_header(id_token).map_err(LtiError::from)?;
        let kid = header.kid.ok_or(LtiError::MissingKeyId)?;
        let key = self.keys.decoding_key(&registration, &kid).await?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.leeway = LEEWAY_SECONDS;
        validation.set_audience(&[&registration.client_id]);
        validation.set_issuer(&[&registration.iss]);
        validation.set_required_spec_claims(&["exp", "iss", "aud"]);

        let claims = decode::<LaunchClaims>(id_token, &key, &validation)
            .map_err(LtiError::from)?
            .claims;

        let context = self.check_claims(&registration, &pending, claims)?;

        info!(
            launch_id = %context.launch_id,
            iss = %context.iss,
            message_type = %context.message_type,
            course_id = ?context.course_id,
            "LTI launch validated"
        );

        Ok(context)
    }

    fn check_claims(
        &self,
        registration: &LtiRegistration,
        pending: &PendingLogin,
        claims: LaunchClaims,
    ) -> Result<LaunchContext, LtiError> {
        if claims.aud.len() > 1 && claims.azp.as_deref() != Some(registration.client_id.as_str())
        {
            return Err(LtiError::InvalidClaim {
                claim: "azp",
                reason: "must be the client ID when there are several audiences".to_string(),
            });
        }

        let message_type = parse_message_type(claims.message_type.as_deref())?;

        let exempt = message_type == LtiMessageType::DeepLinking
            && self.nonce_exempt_issuers.iter().any(|i| *i == claims.iss);
        if exempt {
            warn!(iss = %claims.iss, "Skipping nonce validation for deep-linking launch");
        } else if claims.nonce.as_deref() != Some(pending.nonce.as_str()) {
            return Err(LtiError::InvalidNonce);
        }

        match claims.deployment_id.as_deref() {
            Some(id) if id == registration.deployment_id => {}
            _ => return Err(LtiError::UnknownDeployment),
        }

        if claims.version.as_deref() != Some(LTI_VERSION) {
            return Err(LtiError::InvalidClaim {
                claim: "version",
                reason: format!("expected {LTI_VERSION}"),
            });
        }

        let deep_link = claims.deep_linking_settings.clone();
        if message_type == LtiMessageType::DeepLinking && deep_link.is_none() {
            return Err(LtiError::InvalidClaim {
                claim: "deep_linking_settings",
                reason: "required on deep-linking launches".to_string(),
            });
        }

        Ok(LaunchContext {
            launch_id: format!("{LAUNCH_ID_PREFIX}{}", Uuid::new_v4()),
            registration_id: registration.id,
            iss: registration.iss.clone(),
            client_id: registration.client_id.clone(),
            deployment_id: registration.deployment_id.clone(),
            message_type,
            user_id: claims.sub.clone(),
            course_id: claims.course_id(),
            deep_link,
            created_at: Utc::now(),
        })
    }
}

fn parse_message_type(value: Option<&str>) -> Result<LtiMessageType, LtiError> {
    match value {
        Some("LtiResourceLinkRequest") => Ok(LtiMessageType::ResourceLink),
        Some("LtiDeepLinkingRequest") => Ok(LtiMessageType::DeepLinking),
        Some(other) => Err(LtiError::InvalidClaim {
            claim: "message_type",
            reason: format!("unsupported message type '{other}'"),
        }),
        None => Err(LtiError::InvalidClaim {
            claim: "message_type",
            reason: "missing".to_string(),
        }),
    }
}
