//! Platform key set retrieval and caching.

use std::time::Duration;

use jsonwebtoken::DecodingKey;
use jsonwebtoken::jwk::JwkSet;
use tracing::{debug, info};

use cyclops_cache::CacheManager;
use cyclops_cache::keys;
use cyclops_core::config::LtiConfig;
use cyclops_core::error::{AppError, ErrorKind};
use cyclops_core::result::AppResult;
use cyclops_core::traits::CacheProvider;
use cyclops_entity::registration::LtiRegistration;

use crate::error::LtiError;

/// Fetches platform JWKS documents and keeps them in the cache.
#[derive(Debug, Clone)]
pub struct PlatformKeys {
    http: reqwest::Client,
    cache: CacheManager,
    ttl: Duration,
}

impl PlatformKeys {
    /// Create a key fetcher.
    pub fn new(cache: CacheManager, config: &LtiConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Failed to build JWKS client", e)
            })?;
        Ok(Self {
            http,
            cache,
            ttl: Duration::from_secs(config.jwks_ttl_seconds),
        })
    }

    /// Download a key set.
    pub async fn fetch(&self, url: &str) -> Result<JwkSet, LtiError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| LtiError::KeySet(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LtiError::KeySet(format!("{url} returned {status}")));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| LtiError::KeySet(e.to_string()))?;
        let set: JwkSet =
            serde_json::from_slice(&body).map_err(|e| LtiError::KeySet(e.to_string()))?;

        info!(url, keys = set.keys.len(), "Fetched platform key set");
        Ok(set)
    }

    /// Decoding key for `kid` from the registration's platform.
    ///
    /// A cached set that lacks `kid` is refreshed once, so rotated keys are
    /// picked up before the cache entry expires.
    pub async fn decoding_key(
        &self,
        registration: &LtiRegistration,
        kid: &str,
    ) -> AppResult<DecodingKey> {
        let cache_key = keys::platform_jwks(&registration.iss, &registration.client_id);

        if let Some(cached) = self.cache.get_json::<JwkSet>(&cache_key).await? {
            if let Some(jwk) = cached.find(kid) {
                debug!(kid, "Platform key served from cache");
                return Ok(DecodingKey::from_jwk(jwk).map_err(LtiError::from)?);
            }
        }

        let set = self.fetch(&registration.key_set_url).await?;
        self.cache.set_json(&cache_key, &set, self.ttl).await?;

        let jwk = set
            .find(kid)
            .ok_or_else(|| LtiError::KeyNotFound(kid.to_string()))?;
        Ok(DecodingKey::from_jwk(jwk).map_err(LtiError::from)?)
    }
}
