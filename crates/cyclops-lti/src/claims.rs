//! id_token claims of an LTI 1.3 launch.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use cyclops_core::types::CourseId;
use cyclops_entity::launch::DeepLinkSettings;

/// LTI version the tool speaks.
pub const LTI_VERSION: &str = "1.3.0";

/// Message type of the tool's deep-linking response.
pub const DEEP_LINKING_RESPONSE: &str = "LtiDeepLinkingResponse";

/// Custom parameter carrying the Canvas course ID.
pub const COURSE_ID_PARAM: &str = "canvas_course_id";

/// `aud` may be a single string or an array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Audience {
    /// Single audience.
    One(String),
    /// Several audiences.
    Many(Vec<String>),
}

impl Audience {
    /// Whether `client_id` is one of the audiences.
    pub fn contains(&self, client_id: &str) -> bool {
        match self {
            Self::One(aud) => aud == client_id,
            Self::Many(auds) => auds.iter().any(|a| a == client_id),
        }
    }

    /// Number of audiences.
    pub fn len(&self) -> usize {
        match self {
            Self::One(_) => 1,
            Self::Many(auds) => auds.len(),
        }
    }

    /// Whether there is no audience at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Claims of a launch id_token that the tool reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaunchClaims {
    /// Platform issuer.
    pub iss: String,
    /// Audience, must contain the client ID.
    pub aud: Audience,
    /// Authorized party, required when there are several audiences.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub azp: Option<String>,
    /// Platform user ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    /// Expiry (seconds since the epoch).
    pub exp: i64,
    /// Issued-at (seconds since the epoch).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    /// Nonce issued at login.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<String>,
    /// Message type.
    #[serde(
        rename = "https://purl.imsglobal.org/spec/lti/claim/message_type",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub message_type: Option<String>,
    /// LTI version.
    #[serde(
        rename = "https://purl.imsglobal.org/spec/lti/claim/version",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub version: Option<String>,
    /// Deployment ID.
    #[serde(
        rename = "https://purl.imsglobal.org/spec/lti/claim/deployment_id",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub deployment_id: Option<String>,
    /// Custom parameters.
    #[serde(
        rename = "https://purl.imsglobal.org/spec/lti/claim/custom",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub custom: Option<HashMap<String, serde_json::Value>>,
    /// Deep-linking settings.
    #[serde(
        rename = "https://purl.imsglobal.org/spec/lti-dl/claim/deep_linking_settings",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub deep_linking_settings: Option<DeepLinkSettings>,
}

impl LaunchClaims {
    /// Course ID from the `canvas_course_id` custom parameter.
    ///
    /// Canvas sends the substituted value as a string; an unsubstituted
    /// `$Canvas.course.id` (launch outside a course) yields `None`.
    pub fn course_id(&self) -> Option<CourseId> {
        match self.custom.as_ref()?.get(COURSE_ID_PARAM)? {
            serde_json::Value::String(s) => s.parse().ok(),
            serde_json::Value::Number(n) => n.as_u64().map(CourseId::new),
            _ => None,
        }
    }
}
