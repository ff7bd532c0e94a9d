//! LMS (Canvas) REST API configuration.

use serde::{Deserialize, Serialize};

/// Connection settings for the LMS REST API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LmsConfig {
    /// Base URL of the LMS, without the `/api/v1` suffix.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// API access token sent as a bearer token.
    #[serde(default)]
    pub api_key: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// Page size requested from paginated list endpoints.
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

impl Default for LmsConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            api_key: String::new(),
            timeout_seconds: default_timeout(),
            per_page: default_per_page(),
        }
    }
}

fn default_api_url() -> String {
    "https://canvas.instructure.com".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_per_page() -> u32 {
    100
}
