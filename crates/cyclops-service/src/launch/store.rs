//! Validated launches, kept in the cache under their launch ID.

use std::time::Duration;

use tracing::debug;

use cyclops_cache::{CacheManager, keys};
use cyclops_core::config::LtiConfig;
use cyclops_core::error::AppError;
use cyclops_core::result::AppResult;
use cyclops_core::traits::CacheProvider;
use cyclops_entity::launch::{LAUNCH_ID_PREFIX, LaunchContext};

/// Stores and resumes [`LaunchContext`]s.
#[derive(Debug, Clone)]
pub struct LaunchStore {
    cache: CacheManager,
    ttl: Duration,
}

impl LaunchStore {
    /// Create a store whose entries live for the configured launch TTL.
    pub fn new(cache: CacheManager, config: &LtiConfig) -> Self {
        Self {
            cache,
            ttl: Duration::from_secs(config.launch_ttl_seconds),
        }
    }

    /// Remember a launch.
    pub async fn save(&self, launch: &LaunchContext) -> AppResult<()> {
        self.cache
            .set_json(&keys::launch(&launch.launch_id), launch, self.ttl)
            .await?;
        debug!(launch_id = %launch.launch_id, "Launch stored");
        Ok(())
    }

    /// Resume a launch.
    pub async fn load(&self, launch_id: &str) -> AppResult<LaunchContext> {
        if !launch_id.starts_with(LAUNCH_ID_PREFIX) {
            return Err(AppError::authentication("Launch expired or unknown"));
        }
        self.cache
            .get_json::<LaunchContext>(&keys::launch(launch_id))
            .await?
            .ok_or_else(|| AppError::authentication("Launch expired or unknown"))
    }
}
