//! Public paths of the tool's routes, under the configured base path.

use cyclops_core::config::ServerConfig;

/// Route paths as seen by the browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePaths {
    /// Mount prefix, always ending in `/`.
    pub base: String,
    /// OIDC login initiation.
    pub login: String,
    /// Launch endpoint.
    pub launch: String,
    /// Tool icon.
    pub icon: String,
    /// File picker.
    pub select: String,
    /// Picker back button.
    pub select_back: String,
    /// Upload page.
    pub upload: String,
    /// Upload form target.
    pub uploader: String,
    /// Upload page back button.
    pub upload_back: String,
    /// Image load action.
    pub load: String,
    /// Recognition and deep-linking response.
    pub embed: String,
}

impl RoutePaths {
    /// Compute every path from the server configuration.
    pub fn new(server: &ServerConfig) -> Self {
        Self {
            base: server.route_path(""),
            login: server.route_path("login/"),
            launch: server.route_path("launch/"),
            icon: server.route_path("icon/"),
            select: server.route_path("select/"),
            select_back: server.route_path("select/back/"),
            upload: server.route_path("upload/"),
            uploader: server.route_path("uploader"),
            upload_back: server.route_path("upload/back/"),
            load: server.route_path("load/"),
            embed: server.route_path("embed/"),
        }
    }

    /// Router nesting prefix, or `None` when mounted at `/`.
    pub fn nest_prefix(&self) -> Option<&str> {
        let prefix = self.base.trim_end_matches('/');
        (!prefix.is_empty()).then_some(prefix)
    }
}

/// Append URL-encoded query parameters to a path.
pub fn with_query(path: &str, params: &[(&str, &str)]) -> String {
    let query = params
        .iter()
        .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");
    format!("{path}?{query}")
}
