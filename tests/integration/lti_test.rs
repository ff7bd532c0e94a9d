//! OIDC login, launch validation, tool configuration and icon.

use axum::body::Body;
use axum::http::{Request, StatusCode, header};

use crate::helpers::{
    self, AUTH_LOGIN_URL, CLIENT_ID, DEEP_LINKING, HOST, ISSUER, TestApp, launch_claims,
    query_value, sign_platform_token,
};

#[tokio::test]
async fn test_login_redirects_to_platform() {
    let app = TestApp::new().await;
    let uri = format!(
        "/login/?iss={}&login_hint=user-1&target_link_uri={}&lti_message_hint=hint-42",
        urlencoding::encode(ISSUER),
        urlencoding::encode("https://tools.example.edu/launch/"),
    );

    let response = app.get(&uri).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);

    let location = response.location();
    assert!(location.starts_with(AUTH_LOGIN_URL));
    assert_eq!(query_value(location, "scope").as_deref(), Some("openid"));
    assert_eq!(query_value(location, "response_type").as_deref(), Some("id_token"));
    assert_eq!(query_value(location, "response_mode").as_deref(), Some("form_post"));
    assert_eq!(query_value(location, "prompt").as_deref(), Some("none"));
    assert_eq!(query_value(location, "client_id").as_deref(), Some(CLIENT_ID));
    assert_eq!(
        query_value(location, "redirect_uri").as_deref(),
        Some("https://tools.example.edu/launch/")
    );
    assert_eq!(query_value(location, "login_hint").as_deref(), Some("user-1"));
    assert_eq!(query_value(location, "lti_message_hint").as_deref(), Some("hint-42"));
}

#[tokio::test]
async fn test_login_by_form_post() {
    let app = TestApp::new().await;
    let response = app
        .post_form(
            "/login/",
            &[
                ("iss", ISSUER),
                ("login_hint", "user-1"),
                ("target_link_uri", "https://tools.example.edu/launch/"),
                ("client_id", CLIENT_ID),
            ],
        )
        .await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert!(query_value(response.location(), "state").is_some());
}

#[tokio::test]
async fn test_login_without_target_link_uri() {
    let app = TestApp::new().await;
    let uri = format!("/login/?iss={}&login_hint=user-1", urlencoding::encode(ISSUER));

    let response = app.get(&uri).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body, "<p>Missing &quot;target_link_uri&quot; param</p>");
}

#[tokio::test]
async fn test_login_for_unknown_issuer() {
    let app = TestApp::new().await;
    let uri = format!(
        "/login/?iss={}&login_hint=u&target_link_uri={}",
        urlencoding::encode("https://elsewhere.example.org"),
        urlencoding::encode("https://tools.example.edu/launch/"),
    );

    let response = app.get(&uri).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_launch_renders_start_page() {
    let app = TestApp::new().await;
    let launch_id = app.launch(DEEP_LINKING).await;

    assert!(launch_id.starts_with("lti1p3-launch-"));

    let response = app
        .get(&format!("/upload/?launch_id={launch_id}"))
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_start_page_offers_both_sources() {
    let app = TestApp::new().await;
    let (state, nonce) = app.login().await;
    let token = sign_platform_token(&launch_claims(&nonce, DEEP_LINKING));

    let response = app
        .post_form("/launch/", &[("id_token", &token), ("state", &state)])
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains(r#"action="/select/" method="GET""#));
    assert!(response.body.contains(r#"action="/upload/" method="GET""#));
}

#[tokio::test]
async fn test_launch_state_is_single_use() {
    let app = TestApp::new().await;
    let (state, nonce) = app.login().await;
    let token = sign_platform_token(&launch_claims(&nonce, DEEP_LINKING));
    let form = [("id_token", token.as_str()), ("state", state.as_str())];

    assert_eq!(app.post_form("/launch/", &form).await.status, StatusCode::OK);

    let replay = app.post_form("/launch/", &form).await;
    assert_eq!(replay.status, StatusCode::UNAUTHORIZED);
    assert_eq!(replay.body, "<p>State not found or expired</p>");
}

#[tokio::test]
async fn test_launch_with_wrong_nonce() {
    let app = TestApp::new().await;
    let (state, _) = app.login().await;
    let token = sign_platform_token(&launch_claims("not-the-nonce", helpers::RESOURCE_LINK));

    let response = app
        .post_form("/launch/", &[("id_token", &token), ("state", &state)])
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body, "<p>Invalid nonce</p>");
}

#[tokio::test]
async fn test_launch_with_wrong_deployment() {
    let app = TestApp::new().await;
    let (state, nonce) = app.login().await;
    let mut claims = launch_claims(&nonce, DEEP_LINKING);
    claims["https://purl.imsglobal.org/spec/lti/claim/deployment_id"] = "9:other".into();
    let token = sign_platform_token(&claims);

    let response = app
        .post_form("/launch/", &[("id_token", &token), ("state", &state)])
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body, "<p>Unable to find deployment</p>");
}

#[tokio::test]
async fn test_launch_without_state() {
    let app = TestApp::new().await;
    let response = app.post_form("/launch/", &[("id_token", "x")]).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_tool_configuration_json() {
    let app = TestApp::new().await;
    let response = app
        .send(
            Request::get("/config/1/json")
                .header(header::HOST, HOST)
                .header("x-forwarded-proto", "https")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let config = response.json();
    assert_eq!(config["title"], "Cyclops LTI 1.3");
    assert_eq!(config["description"], "Recognize text from images");
    assert_eq!(config["target_link_uri"], "https://tools.example.edu/launch/");
    assert_eq!(config["oidc_initiation_url"], "https://tools.example.edu/login/");
    assert_eq!(config["public_jwk"]["kid"], "tool-key-1");

    let placement = &config["extensions"][0]["settings"]["placements"][0];
    assert_eq!(placement["placement"], "editor_button");
    assert_eq!(placement["message_type"], DEEP_LINKING);
    assert_eq!(placement["selection_width"], 590);
    assert_eq!(placement["selection_height"], 490);
    assert_eq!(placement["icon_url"], "https://tools.example.edu/icon/");
}

#[tokio::test]
async fn test_tool_configuration_without_forwarded_proto() {
    let app = TestApp::new().await;
    let response = app.get("/config/1/json").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.json()["target_link_uri"],
        "http://tools.example.edu/launch/"
    );
}

#[tokio::test]
async fn test_tool_configuration_unknown_key() {
    let app = TestApp::new().await;
    assert_eq!(app.get("/config/99/json").await.status, StatusCode::NOT_FOUND);
    assert_eq!(app.get("/config/abc/json").await.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_icon_is_png() {
    let app = TestApp::new().await;
    let response = app
        .send(Request::get("/icon/").body(Body::empty()).unwrap())
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.headers[header::CONTENT_TYPE], "image/png");
}
