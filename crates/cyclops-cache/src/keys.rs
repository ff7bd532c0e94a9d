//! Cache key builders for all Cyclops cache entries.
//!
//! Centralising key construction prevents typos and makes it easy
//! to find every key the application uses.

/// Prefix applied to all Cyclops cache keys.
const PREFIX: &str = "cyclops";

/// Cache key for a pending OIDC login, keyed by its `state` value.
pub fn oidc_state(state: &str) -> String {
    format!("{PREFIX}:lti:state:{state}")
}

/// Cache key for a validated launch.
pub fn launch(launch_id: &str) -> String {
    format!("{PREFIX}:lti:launch:{launch_id}")
}

/// Cache key for a platform key set.
pub fn platform_jwks(iss: &str, client_id: &str) -> String {
    format!("{PREFIX}:lti:jwks:{iss}:{client_id}")
}
