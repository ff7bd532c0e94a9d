//! LTI 1.3 message handling and tool presentation configuration.

use serde::{Deserialize, Serialize};

/// LTI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LtiConfig {
    /// How long an OIDC login state stays valid, in seconds.
    #[serde(default = "default_state_ttl")]
    pub state_ttl_seconds: u64,
    /// How long a validated launch can be resumed, in seconds.
    #[serde(default = "default_launch_ttl")]
    pub launch_ttl_seconds: u64,
    /// How long a fetched platform key set is reused, in seconds.
    #[serde(default = "default_jwks_ttl")]
    pub jwks_ttl_seconds: u64,
    /// Lifetime of the signed deep-linking response, in seconds.
    #[serde(default = "default_response_ttl")]
    pub response_ttl_seconds: u64,
    /// Issuers whose deep-linking launches skip nonce validation.
    ///
    /// The IMS reference implementation sends an invalid nonce on deep-link
    /// launches.
    #[serde(default = "default_nonce_exempt_issuers")]
    pub nonce_exempt_issuers: Vec<String>,
    /// Presentation of the tool in the generated developer-key configuration.
    #[serde(default)]
    pub tool: ToolPresentation,
}

impl Default for LtiConfig {
    fn default() -> Self {
        Self {
            state_ttl_seconds: default_state_ttl(),
            launch_ttl_seconds: default_launch_ttl(),
            jwks_ttl_seconds: default_jwks_ttl(),
            response_ttl_seconds: default_response_ttl(),
            nonce_exempt_issuers: default_nonce_exempt_issuers(),
            tool: ToolPresentation::default(),
        }
    }
}

/// Title, description and placement of the tool inside the LMS.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolPresentation {
    /// Tool title.
    #[serde(default = "default_title")]
    pub title: String,
    /// Tool description.
    #[serde(default = "default_description")]
    pub description: String,
    /// Label of the editor button placement.
    #[serde(default = "default_placement_text")]
    pub placement_text: String,
    /// Platform identifier used in the configuration extensions.
    #[serde(default = "default_platform")]
    pub platform: String,
    /// Width of the selection dialog.
    #[serde(default = "default_selection_width")]
    pub selection_width: u32,
    /// Height of the selection dialog.
    #[serde(default = "default_selection_height")]
    pub selection_height: u32,
    /// Path of the PNG icon served at `/icon/`.
    #[serde(default = "default_icon_path")]
    pub icon_path: String,
}

impl Default for ToolPresentation {
    fn default() -> Self {
        Self {
            title: default_title(),
            description: default_description(),
            placement_text: default_placement_text(),
            platform: default_platform(),
            selection_width: default_selection_width(),
            selection_height: default_selection_height(),
            icon_path: default_icon_path(),
        }
    }
}

fn default_state_ttl() -> u64 {
    600
}

fn default_launch_ttl() -> u64 {
    7200
}

fn default_jwks_ttl() -> u64 {
    3600
}

fn default_response_ttl() -> u64 {
    600
}

fn default_nonce_exempt_issuers() -> Vec<String> {
    vec!["http://imsglobal.org".to_string()]
}

fn default_title() -> String {
    "Cyclops LTI 1.3".to_string()
}

fn default_description() -> String {
    "Recognize text from images".to_string()
}

fn default_placement_text() -> String {
    "Cyclops: Text Recognition".to_string()
}

fn default_platform() -> String {
    "canvas.instructure.com".to_string()
}

fn default_selection_width() -> u32 {
    590
}

fn default_selection_height() -> u32 {
    490
}

fn default_icon_path() -> String {
    "static/favicon.png".to_string()
}
