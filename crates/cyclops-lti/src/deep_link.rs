//! Signed deep-linking responses.

use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use cyclops_core::config::LtiConfig;
use cyclops_core::html::escape;
use cyclops_core::result::AppResult;
use cyclops_entity::launch::LaunchContext;
use cyclops_entity::registration::LtiRegistration;

use crate::claims::{DEEP_LINKING_RESPONSE, LTI_VERSION};
use crate::error::LtiError;

/// A content item returned to the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeepLinkResource {
    /// Content item type (`html`, `link`, ...).
    #[serde(rename = "type")]
    pub kind: String,
    /// Title shown by the platform.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// HTML fragment, for `html` items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    /// Target URL, for `link` items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl DeepLinkResource {
    /// An `html` content item.
    pub fn html(title: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            kind: "html".to_string(),
            title: Some(title.into()),
            html: Some(html.into()),
            url: None,
        }
    }
}

/// Claims of the `LtiDeepLinkingResponse` message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeepLinkResponseClaims {
    /// The tool's client ID.
    pub iss: String,
    /// The platform issuer.
    pub aud: String,
    /// Expiry.
    pub exp: i64,
    /// Issued at.
    pub iat: i64,
    /// Fresh nonce.
    pub nonce: String,
    /// Deployment ID of the launch.
    #[serde(rename = "https://purl.imsglobal.org/spec/lti/claim/deployment_id")]
    pub deployment_id: String,
    /// Always `LtiDeepLinkingResponse`.
    #[serde(rename = "https://purl.imsglobal.org/spec/lti/claim/message_type")]
    pub message_type: String,
    /// Always `1.3.0`.
    #[serde(rename = "https://purl.imsglobal.org/spec/lti/claim/version")]
    pub version: String,
    /// Returned items.
    #[serde(rename = "https://purl.imsglobal.org/spec/lti-dl/claim/content_items")]
    pub content_items: Vec<DeepLinkResource>,
    /// `data` from the launch's deep-linking settings, echoed back.
    #[serde(
        rename = "https://purl.imsglobal.org/spec/lti-dl/claim/data",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub data: Option<String>,
}

/// Signs deep-linking responses with the registration's tool key.
#[derive(Debug, Clone)]
pub struct DeepLinkResponder {
    ttl_seconds: i64,
}

impl DeepLinkResponder {
    /// Create a responder.
    pub fn new(config: &LtiConfig) -> Self {
        Self {
            ttl_seconds: config.response_ttl_seconds as i64,
        }
    }

    /// Build and sign the response JWT.
    pub fn sign(
        &self,
        registration: &LtiRegistration,
        launch: &LaunchContext,
        resources: Vec<DeepLinkResource>,
    ) -> Result<String, LtiError> {
        let settings = launch
            .deep_link
            .as_ref()
            .filter(|_| launch.is_deep_link_launch())
            .ok_or(LtiError::NotDeepLinkLaunch)?;

        let now = Utc::now().timestamp();
        let claims = DeepLinkResponseClaims {
            iss: registration.client_id.clone(),
            aud: registration.iss.clone(),
            exp: now + self.ttl_seconds,
            iat: now,
            nonce: Uuid::new_v4().simple().to_string(),
            deployment_id: launch.deployment_id.clone(),
            message_type: DEEP_LINKING_RESPONSE.to_string(),
            version: LTI_VERSION.to_string(),
            content_items: resources,
            data: settings.data.clone(),
        };

        let key = EncodingKey::from_rsa_pem(registration.private_key.as_bytes())
            .map_err(|e| LtiError::ToolKey(e.to_string()))?;
        let mut header = Header::new(Algorithm::RS256);
        header.kid = registration.key_id();

        Ok(encode(&header, &claims, &key)?)
    }

    /// Sign the response and wrap it in an auto-submitting form that posts
    /// it to the platform's return URL.
    pub fn respond(
        &self,
        registration: &LtiRegistration,
        launch: &LaunchContext,
        resources: Vec<DeepLinkResource>,
    ) -> AppResult<String> {
        let jwt = self.sign(registration, launch, resources)?;
        let return_url = launch
            .deep_link
            .as_ref()
            .map(|s| s.deep_link_return_url.as_str())
            .ok_or(LtiError::NotDeepLinkLaunch)?;

        info!(launch_id = %launch.launch_id, "Deep-linking response signed");
        Ok(response_form(return_url, &jwt))
    }
}

/// HTML page that immediately posts `jwt` as the `JWT` field to `return_url`.
pub fn response_form(return_url: &str, jwt: &str) -> String {
    format!(
        r#"<form id="lti13_deep_link_auto_submit" action="{action}" method="POST"><input type="hidden" name="JWT" value="{jwt}" /></form><script type="text/javascript">document.getElementById('lti13_deep_link_auto_submit').submit();</script>"#,
        action = escape(return_url),
        jwt = escape(jwt),
    )
}
