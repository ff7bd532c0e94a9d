//! LTI message errors.

use thiserror::Error;

use cyclops_core::error::{AppError, ErrorKind};

/// Errors raised while handling LTI messages.
#[derive(Debug, Error)]
pub enum LtiError {
    /// A required request parameter is absent.
    #[error("Missing \"{0}\" param")]
    MissingParam(&'static str),

    /// No registration matches the issuer (and client ID).
    #[error("No LTI registration for issuer '{iss}'")]
    UnknownRegistration {
        /// Issuer that was looked up.
        iss: String,
    },

    /// The OIDC state is unknown, expired or already used.
    #[error("State not found or expired")]
    InvalidState,

    /// The id_token header carries no key ID.
    #[error("JWT header has no \"kid\"")]
    MissingKeyId,

    /// The platform key set has no key with the token's key ID.
    #[error("No platform key with kid '{0}'")]
    KeyNotFound(String),

    /// The platform key set could not be fetched or parsed.
    #[error("Failed to fetch platform key set: {0}")]
    KeySet(String),

    /// Signature, expiry, issuer or audience validation failed.
    #[error("Invalid id_token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    /// The nonce does not match the one issued at login.
    #[error("Invalid nonce")]
    InvalidNonce,

    /// The deployment ID is not the registered one.
    #[error("Unable to find deployment")]
    UnknownDeployment,

    /// A claim is missing or has an unexpected value.
    #[error("Invalid \"{claim}\" claim: {reason}")]
    InvalidClaim {
        /// Claim name.
        claim: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// The launch cannot return a deep-linking response.
    #[error("Launch is not a deep-linking launch")]
    NotDeepLinkLaunch,

    /// The tool's signing key is unusable.
    #[error("Invalid tool key: {0}")]
    ToolKey(String),
}

impl From<LtiError> for AppError {
    fn from(err: LtiError) -> Self {
        let kind = match &err {
            LtiError::MissingParam(_) => ErrorKind::Validation,
            LtiError::UnknownRegistration { .. } => ErrorKind::NotFound,
            LtiError::KeySet(_) => ErrorKind::ExternalService,
            LtiError::ToolKey(_) => ErrorKind::Configuration,
            _ => ErrorKind::Authentication,
        };
        AppError::with_source(kind, err.to_string(), err)
    }
}
