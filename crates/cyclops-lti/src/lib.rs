//! # cyclops-lti
//!
//! Tool-side LTI 1.3 message handling: OIDC third-party login initiation,
//! id_token launch validation against the platform's key set, signed
//! deep-linking responses, and the Canvas developer-key configuration.
//!
//! Registrations are looked up through [`RegistrationStore`], implemented
//! for the PostgreSQL repository.

pub mod claims;
pub mod deep_link;
pub mod error;
pub mod jwks;
pub mod launch;
pub mod oidc;
pub mod registry;
pub mod tool_config;

pub use deep_link::{DeepLinkResource, DeepLinkResponder};
pub use error::LtiError;
pub use jwks::PlatformKeys;
pub use launch::{LaunchRequest, LaunchValidator};
pub use oidc::{LoginRedirect, LoginRequest, OidcLogin, PendingLogin};
pub use registry::RegistrationStore;
pub use tool_config::tool_configuration;

#[cfg(test)]
pub(crate) mod test_support;
