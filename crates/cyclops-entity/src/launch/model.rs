//! Launch context entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cyclops_core::types::CourseId;

/// Prefix of every launch identifier.
pub const LAUNCH_ID_PREFIX: &str = "lti1p3-launch-";

/// LTI message types the tool accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LtiMessageType {
    /// A plain resource-link launch.
    #[serde(rename = "LtiResourceLinkRequest")]
    ResourceLink,
    /// A deep-linking (content selection) launch.
    #[serde(rename = "LtiDeepLinkingRequest")]
    DeepLinking,
}

impl LtiMessageType {
    /// Claim value for this message type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ResourceLink => "LtiResourceLinkRequest",
            Self::DeepLinking => "LtiDeepLinkingRequest",
        }
    }
}

impl std::fmt::Display for LtiMessageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `deep_linking_settings` claim of a deep-linking launch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeepLinkSettings {
    /// Where the signed response must be posted.
    pub deep_link_return_url: String,
    /// Content item types the platform accepts.
    #[serde(default)]
    pub accept_types: Vec<String>,
    /// Presentation targets the platform accepts.
    #[serde(default)]
    pub accept_presentation_document_targets: Vec<String>,
    /// Whether more than one item may be returned.
    #[serde(default)]
    pub accept_multiple: Option<bool>,
    /// Opaque value that must be echoed back in the response.
    #[serde(default)]
    pub data: Option<String>,
}

/// Everything a later request needs to resume a validated launch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaunchContext {
    /// Launch identifier (`lti1p3-launch-<uuid>`).
    pub launch_id: String,
    /// Registration the launch was validated against.
    pub registration_id: i64,
    /// Platform issuer.
    pub iss: String,
    /// Tool client ID.
    pub client_id: String,
    /// Deployment ID.
    pub deployment_id: String,
    /// Message type of the launch.
    pub message_type: LtiMessageType,
    /// Subject (platform user ID).
    pub user_id: Option<String>,
    /// Course, from the `canvas_course_id` custom claim.
    pub course_id: Option<CourseId>,
    /// Deep-linking settings, present on deep-linking launches.
    pub deep_link: Option<DeepLinkSettings>,
    /// When the launch was validated.
    pub created_at: DateTime<Utc>,
}

impl LaunchContext {
    /// Whether this launch may return a deep-linking response.
    pub fn is_deep_link_launch(&self) -> bool {
        self.message_type == LtiMessageType::DeepLinking && self.deep_link.is_some()
    }
}
