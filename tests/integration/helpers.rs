//! Shared test harness: the full router over in-memory infrastructure,
//! a mock LMS, a mock platform key set and a stub OCR engine.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use cyclops_api::{AppState, build_app};
use cyclops_cache::CacheManager;
use cyclops_core::config::AppConfig;
use cyclops_core::result::AppResult;
use cyclops_core::traits::OcrEngine;
use cyclops_entity::registration::LtiRegistration;
use cyclops_lti::RegistrationStore;

pub const PLATFORM_PRIVATE_KEY: &str = include_str!("../fixtures/platform_private.pem");
pub const PLATFORM_JWK: &str = include_str!("../fixtures/platform_jwk.json");
pub const TOOL_PRIVATE_KEY: &str = include_str!("../fixtures/tool_private.pem");
pub const TOOL_PUBLIC_KEY: &str = include_str!("../fixtures/tool_public.pem");
pub const TOOL_JWK: &str = include_str!("../fixtures/tool_jwk.json");

pub const ISSUER: &str = "https://canvas.instructure.com";
pub const CLIENT_ID: &str = "10001";
pub const AUTH_LOGIN_URL: &str = "https://canvas.instructure.com/api/lti/authorize_redirect";
pub const RETURN_URL: &str = "https://canvas.instructure.com/courses/1234/deep_linking_response";
pub const HOST: &str = "tools.example.edu";

/// Text the stub engine "recognizes".
pub const RECOGNIZED: &str = "Mitochondria <b>power</b> the cell";

pub const DEEP_LINKING: &str = "LtiDeepLinkingRequest";
pub const RESOURCE_LINK: &str = "LtiResourceLinkRequest";

/// Registrations held in memory.
#[derive(Debug)]
pub struct MemoryRegistrations(Vec<LtiRegistration>);

#[async_trait]
impl RegistrationStore for MemoryRegistrations {
    async fn find_registration(
        &self,
        iss: &str,
        client_id: Option<&str>,
    ) -> AppResult<Option<LtiRegistration>> {
        Ok(self
            .0
            .iter()
            .find(|r| r.iss == iss && client_id.is_none_or(|c| c == r.client_id))
            .cloned())
    }

    async fn find_registration_by_id(&self, id: i64) -> AppResult<Option<LtiRegistration>> {
        Ok(self.0.iter().find(|r| r.id == id).cloned())
    }
}

/// OCR engine that returns [`RECOGNIZED`] for any existing file.
#[derive(Debug)]
pub struct StubOcr;

#[async_trait]
impl OcrEngine for StubOcr {
    fn name(&self) -> &str {
        "stub"
    }

    async fn recognize(&self, path: &Path) -> AppResult<String> {
        assert!(path.exists(), "recognize called on a missing file");
        Ok(RECOGNIZED.to_string())
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}

/// A response with its body collected.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// The `Location` header of a redirect.
    pub fn location(&self) -> &str {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .expect("response has no Location header")
    }

    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).expect("response body is not JSON")
    }
}

/// Test application context.
pub struct TestApp {
    pub router: Router,
    pub config: AppConfig,
    /// Mock Canvas REST API.
    pub lms: MockServer,
    /// Mock platform serving its key set.
    pub platform: MockServer,
    pub images: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    pub async fn with_config(customize: impl FnOnce(&mut AppConfig)) -> Self {
        let lms = MockServer::start().await;
        let platform = MockServer::start().await;
        let images = TempDir::new().unwrap();

        let jwk: Value = serde_json::from_str(PLATFORM_JWK).unwrap();
        Mock::given(method("GET"))
            .and(path("/api/lti/security/jwks"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "keys": [jwk] })))
            .mount(&platform)
            .await;

        let mut config = AppConfig::default();
        config.lms.api_url = lms.uri();
        config.lms.api_key = "test-token".to_string();
        config.storage.image_dir = images.path().to_string_lossy().into_owned();
        config.lti.tool.icon_path = concat!(env!("CARGO_MANIFEST_DIR"), "/static/favicon.png").to_string();
        customize(&mut config);

        let cache = CacheManager::new(&config.cache).await.unwrap();
        let registrations: Arc<dyn RegistrationStore> = Arc::new(MemoryRegistrations(vec![
            registration(&format!("{}/api/lti/security/jwks", platform.uri())),
        ]));

        let state = AppState::new(config.clone(), cache, registrations, Arc::new(StubOcr))
            .await
            .unwrap();

        Self {
            router: build_app(state),
            config,
            lms,
            platform,
            images,
        }
    }

    /// Send a request with the `Host` header set.
    pub async fn send(&self, mut request: Request<Body>) -> TestResponse {
        request
            .headers_mut()
            .entry(header::HOST)
            .or_insert(header::HeaderValue::from_static(HOST));

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    pub async fn post_form(&self, uri: &str, form: &[(&str, &str)]) -> TestResponse {
        let body = form
            .iter()
            .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        self.send(
            Request::post(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
    }

    /// Start an OIDC login and return `(state, nonce)` from the redirect.
    pub async fn login(&self) -> (String, String) {
        let uri = format!(
            "{}?iss={}&login_hint=user-1&target_link_uri={}&client_id={CLIENT_ID}",
            self.config.server.route_path("login/"),
            urlencoding::encode(ISSUER),
            urlencoding::encode(&format!("https://{HOST}/launch/")),
        );
        let response = self.get(&uri).await;
        assert_eq!(response.status, StatusCode::SEE_OTHER, "{}", response.body);

        let location = response.location();
        (
            query_value(location, "state").expect("no state in redirect"),
            query_value(location, "nonce").expect("no nonce in redirect"),
        )
    }

    /// Run a full login and launch, returning the launch ID.
    pub async fn launch(&self, message_type: &str) -> String {
        let (state, nonce) = self.login().await;
        let token = sign_platform_token(&launch_claims(&nonce, message_type));
        let response = self
            .post_form(
                &self.config.server.route_path("launch/"),
                &[("id_token", &token), ("state", &state)],
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.body);
        launch_id_in(&response.body).expect("start page carries no launch id")
    }

    /// Serve course 1234 from the mock LMS.
    pub async fn mount_course(&self, folders: Value, files: Value) {
        Mock::given(method("GET"))
            .and(path("/api/v1/courses/1234"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"id": 1234, "name": "Cell Biology"})),
            )
            .mount(&self.lms)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/courses/1234/folders"))
            .respond_with(ResponseTemplate::new(200).set_body_json(folders))
            .mount(&self.lms)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/courses/1234/files"))
            .and(query_param("content_types[]", "image"))
            .respond_with(ResponseTemplate::new(200).set_body_json(files))
            .mount(&self.lms)
            .await;
    }

    /// Where images of a launch are stored.
    pub fn image_path(&self, launch_id: &str, name: &str) -> PathBuf {
        self.images.path().join(launch_id).join(name)
    }

    /// Place an image in a launch's directory, as an earlier upload would.
    pub fn put_image(&self, launch_id: &str, name: &str) {
        let path = self.image_path(launch_id, name);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, b"png").unwrap();
    }

    /// Whether a launch's image directory holds `name`.
    pub fn has_image(&self, launch_id: &str, name: &str) -> bool {
        self.image_path(launch_id, name).exists()
    }
}

pub fn registration(key_set_url: &str) -> LtiRegistration {
    LtiRegistration {
        id: 1,
        iss: ISSUER.to_string(),
        client_id: CLIENT_ID.to_string(),
        auth_login_url: AUTH_LOGIN_URL.to_string(),
        auth_token_url: "https://canvas.instructure.com/login/oauth2/token".to_string(),
        key_set_url: key_set_url.to_string(),
        private_key: TOOL_PRIVATE_KEY.to_string(),
        public_key: TOOL_PUBLIC_KEY.to_string(),
        public_jwk: TOOL_JWK.to_string(),
        deployment_id: "1:abc".to_string(),
        created_at: Utc::now(),
    }
}

pub fn launch_claims(nonce: &str, message_type: &str) -> Value {
    let now = Utc::now().timestamp();
    json!({
        "iss": ISSUER,
        "aud": CLIENT_ID,
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
            "deep_link_return_url": RETURN_URL,
            "accept_types": ["html"],
            "data": "opaque-platform-data"
        }
    })
}

pub fn sign_platform_token(claims: &Value) -> String {
    let mut header = Header::new(Algorithm::RS256);
    header.kid = Some("platform-key-1".to_string());
    let key = EncodingKey::from_rsa_pem(PLATFORM_PRIVATE_KEY.as_bytes()).unwrap();
    encode(&header, claims, &key).unwrap()
}

/// Decoded value of a query parameter in a URL or path.
pub fn query_value(url: &str, name: &str) -> Option<String> {
    let query = url.split_once('?')?.1;
    query.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        (key == name).then(|| urlencoding::decode(value).map(|v| v.into_owned()).ok())?
    })
}

/// The launch ID in a page's hidden form field.
pub fn launch_id_in(html: &str) -> Option<String> {
    let re = regex::Regex::new(r#"name="launch_id" value="([^"]+)""#).unwrap();
    re.captures(html).map(|c| c[1].to_string())
}
