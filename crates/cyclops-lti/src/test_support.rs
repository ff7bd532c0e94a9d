//! Shared fixtures for this crate's unit tests.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};

use cyclops_cache::CacheManager;
use cyclops_cache::memory::MemoryCacheProvider;
use cyclops_core::config::cache::MemoryCacheConfig;
use cyclops_core::result::AppResult;
use cyclops_entity::registration::LtiRegistration;

use crate::registry::RegistrationStore;

macro_rules! fixture {
    ($name:literal) => {
        include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/../../tests/fixtures/",
            $name
        ))
    };
}

pub const PLATFORM_PRIVATE_KEY: &str = fixture!("platform_private.pem");
pub const PLATFORM_JWK: &str = fixture!("platform_jwk.json");
pub const TOOL_PRIVATE_KEY: &str = fixture!("tool_private.pem");
pub const TOOL_PUBLIC_KEY: &str = fixture!("tool_public.pem");
pub const TOOL_JWK: &str = fixture!("tool_jwk.json");

#[derive(Debug, Default)]
pub struct MemoryRegistrations {
    registrations: Vec<LtiRegistration>,
}

impl MemoryRegistrations {
    pub fn with(registration: LtiRegistration) -> Self {
        Self {
            registrations: vec![registration],
        }
    }
}

#[async_trait]
impl RegistrationStore for MemoryRegistrations {
    async fn find_registration(
        &self,
        iss: &str,
        client_id: Option<&str>,
    ) -> AppResult<Option<LtiRegistration>> {
        Ok(self
            .registrations
            .iter()
            .find(|r| r.iss == iss && client_id.is_none_or(|c| c == r.client_id))
            .cloned())
    }

    async fn find_registration_by_id(&self, id: i64) -> AppResult<Option<LtiRegistration>> {
        Ok(self.registrations.iter().find(|r| r.id == id).cloned())
    }
}

pub fn memory_cache() -> CacheManager {
    CacheManager::from_provider(Arc::new(MemoryCacheProvider::new(
        &MemoryCacheConfig::default(),
        60,
    )))
}

pub fn registration(key_set_url: &str) -> LtiRegistration {
    LtiRegistration {
        id: 1,
        iss: "https://canvas.instructure.com".to_string(),
        client_id: "10001".to_string(),
        auth_login_url: "https://canvas.instructure.com/api/lti/authorize_redirect".to_string(),
        auth_token_url: "https://canvas.instructure.com/login/oauth2/token".to_string(),
        key_set_url: key_set_url.to_string(),
        private_key: TOOL_PRIVATE_KEY.to_string(),
        public_key: TOOL_PUBLIC_KEY.to_string(),
        public_jwk: TOOL_JWK.to_string(),
        deployment_id: "1:abc".to_string(),
        created_at: Utc::now(),
    }
}

pub fn launch_claims(nonce: &str, message_type: &str) -> serde_json::Value {
    let now = Utc::now().timestamp();
    serde_json::json!({
        "iss": "https://canvas.instructure.com",
        "aud": "10001",
        "sub": "user-1",
        "iat": now,
        "exp": now + 300,
        "nonce": nonce,
        "https://purl.imsglobal.org/spec/lti/claim/message_type": message_type,
        "https://purl.imsglobal.org/spec/lti/claim/version": "1.3.0",
        "https://purl.imsglobal.org/spec/lti/claim/deployment_id": "1:abc",
        "https://purl.imsglobal.org/spec/lti/claim/custom": {
            "canvas_course_id": "1234",
            "canvas_user_id": "42"
        },
        "https://purl.imsglobal.org/spec/lti-dl/claim/deep_linking_settings": {
            "deep_link_return_url": "https://canvas.instructure.com/courses/1234/deep_linking_response",
            "accept_types": ["html"],
            "data": "opaque-platform-data"
        }
    })
}

pub fn sign_platform_token(claims: &serde_json::Value) -> String {
    let mut header = Header::new(Algorithm::RS256);
    header.kid = Some("platform-key-1".to_string());
    let key = EncodingKey::from_rsa_pem(PLATFORM_PRIVATE_KEY.as_bytes()).unwrap();
    encode(&header, claims, &key).unwrap()
}
