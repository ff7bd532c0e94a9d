//! Validated launch state carried between requests.

pub mod model;

pub use model::{DeepLinkSettings, LAUNCH_ID_PREFIX, LaunchContext, LtiMessageType};
