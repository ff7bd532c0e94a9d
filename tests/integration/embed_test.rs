//! Loading images, recognition and the deep-linking response.

use axum::http::StatusCode;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, decode_header};
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::helpers::{
    CLIENT_ID, DEEP_LINKING, ISSUER, RECOGNIZED, RESOURCE_LINK, RETURN_URL, TOOL_PUBLIC_KEY,
    TestApp, query_value,
};

/// Serve file 10 of course 1234 and its download.
async fn mount_file(app: &TestApp) {
    Mock::given(method("GET"))
        .and(path("/api/v1/courses/1234/files/10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 10,
            "display_name": "cat.png",
            "filename": "cat.png",
            "folder_id": 2,
            "url": format!("{}/files/10/download", app.lms.uri()),
        })))
        .mount(&app.lms)
        .await;
    Mock::given(method("GET"))
        .and(path("/files/10/download"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"\x89PNG cat".to_vec()))
        .mount(&app.lms)
        .await;
}

/// Verify the response JWT in an auto-submit form and return its claims.
fn response_claims(form: &str) -> Value {
    let re = regex::Regex::new(r#"name="JWT" value="([^"]+)""#).unwrap();
    let jwt = re.captures(form).expect("form carries no JWT")[1].to_string();

    let header = decode_header(&jwt).unwrap();
    assert_eq!(header.kid.as_deref(), Some("tool-key-1"));

    let mut validation = Validation::new(Algorithm::RS256);
    validation.set_audience(&[ISSUER]);
    validation.set_issuer(&[CLIENT_ID]);
    let key = DecodingKey::from_rsa_pem(TOOL_PUBLIC_KEY.as_bytes()).unwrap();
    decode::<Value>(&jwt, &key, &validation).unwrap().claims
}

#[tokio::test]
async fn test_load_downloads_from_lms() {
    let app = TestApp::new().await;
    mount_file(&app).await;
    let launch_id = app.launch(DEEP_LINKING).await;

    let response = app
        .get(&format!("/load/?filename=cat.png&fileid=10&launch_id={launch_id}"))
        .await;

    assert_eq!(response.status, StatusCode::SEE_OTHER, "{}", response.body);
    assert_eq!(
        response.location(),
        format!("/embed/?filename=cat.png&launch_id={launch_id}")
    );
    assert_eq!(
        std::fs::read(app.image_path(&launch_id, "cat.png")).unwrap(),
        b"\x89PNG cat"
    );
}

#[tokio::test]
async fn test_load_unknown_lms_file() {
    let app = TestApp::new().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/courses/1234/files/77"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({"errors": [{"message": "The specified resource does not exist."}]})),
        )
        .mount(&app.lms)
        .await;
    let launch_id = app.launch(DEEP_LINKING).await;

    let response = app
        .get(&format!("/load/?filename=x.png&fileid=77&launch_id={launch_id}"))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_load_rejects_bad_parameters() {
    let app = TestApp::new().await;
    let launch_id = app.launch(DEEP_LINKING).await;

    let missing = app.get(&format!("/load/?fileid=10&launch_id={launch_id}")).await;
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);
    assert_eq!(missing.body, "<p>Missing &quot;filename&quot; param</p>");

    let bad_id = app
        .get(&format!("/load/?filename=a.png&fileid=ten&launch_id={launch_id}"))
        .await;
    assert_eq!(bad_id.status, StatusCode::BAD_REQUEST);

    let not_uploaded = app
        .get(&format!("/load/?filename=a.png&fileid=upload&launch_id={launch_id}"))
        .await;
    assert_eq!(not_uploaded.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_embed_returns_deep_link_response() {
    let app = TestApp::new().await;
    mount_file(&app).await;
    let launch_id = app.launch(DEEP_LINKING).await;

    let load = app
        .get(&format!("/load/?filename=cat.png&fileid=10&launch_id={launch_id}"))
        .await;
    let response = app.get(load.location()).await;

    assert_eq!(response.status, StatusCode::OK, "{}", response.body);
    assert!(response.body.contains(&format!(
        r#"<form id="lti13_deep_link_auto_submit" action="{RETURN_URL}" method="POST">"#
    )));
    assert!(!app.has_image(&launch_id, "cat.png"));

    let claims = response_claims(&response.body);
    assert_eq!(
        claims["https://purl.imsglobal.org/spec/lti/claim/message_type"],
        "LtiDeepLinkingResponse"
    );
    assert_eq!(claims["https://purl.imsglobal.org/spec/lti/claim/deployment_id"], "1:abc");
    assert_eq!(
        claims["https://purl.imsglobal.org/spec/lti-dl/claim/data"],
        "opaque-platform-data"
    );
    assert_eq!(
        claims["https://purl.imsglobal.org/spec/lti-dl/claim/content_items"],
        json!([{
            "type": "html",
            "title": "file",
            "html": "Mitochondria &lt;b&gt;power&lt;/b&gt; the cell",
        }])
    );
}

#[tokio::test]
async fn test_upload_flow_ends_in_deep_link_response() {
    let app = TestApp::new().await;
    let launch_id = app.launch(DEEP_LINKING).await;
    app.put_image(&launch_id, "board.png");

    let load = app
        .get(&format!("/load/?filename=board.png&fileid=upload&launch_id={launch_id}"))
        .await;
    assert_eq!(load.status, StatusCode::SEE_OTHER);
    assert_eq!(query_value(load.location(), "filename").as_deref(), Some("board.png"));

    let response = app.get(load.location()).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(!app.has_image(&launch_id, "board.png"));
}

#[tokio::test]
async fn test_launches_loading_same_filename_stay_isolated() {
    let app = TestApp::new().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/courses/1234/files/10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 10,
            "display_name": "scan.png",
            "filename": "scan.png",
            "folder_id": 2,
            "url": format!("{}/files/10/download", app.lms.uri()),
        })))
        .mount(&app.lms)
        .await;
    Mock::given(method("GET"))
        .and(path("/files/10/download"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"first".to_vec()))
        .up_to_n_times(1)
        .mount(&app.lms)
        .await;
    Mock::given(method("GET"))
        .and(path("/files/10/download"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"second".to_vec()))
        .mount(&app.lms)
        .await;

    let first = app.launch(DEEP_LINKING).await;
    let second = app.launch(DEEP_LINKING).await;
    assert_ne!(first, second);

    for launch_id in [&first, &second] {
        let response = app
            .get(&format!("/load/?filename=scan.png&fileid=10&launch_id={launch_id}"))
            .await;
        assert_eq!(response.status, StatusCode::SEE_OTHER, "{}", response.body);
    }
    assert_eq!(std::fs::read(app.image_path(&first, "scan.png")).unwrap(), b"first");
    assert_eq!(std::fs::read(app.image_path(&second, "scan.png")).unwrap(), b"second");

    let response = app
        .get(&format!("/embed/?filename=scan.png&launch_id={second}"))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(app.has_image(&first, "scan.png"));
    assert!(!app.has_image(&second, "scan.png"));
}

#[tokio::test]
async fn test_upload_is_private_to_its_launch() {
    let app = TestApp::new().await;
    let owner = app.launch(DEEP_LINKING).await;
    let other = app.launch(DEEP_LINKING).await;
    app.put_image(&owner, "private.png");

    let response = app
        .get(&format!("/load/?filename=private.png&fileid=upload&launch_id={other}"))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app
        .get(&format!("/embed/?filename=private.png&launch_id={other}"))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(app.has_image(&owner, "private.png"));
}

#[tokio::test]
async fn test_embed_missing_image() {
    let app = TestApp::new().await;
    let launch_id = app.launch(DEEP_LINKING).await;

    let response = app
        .get(&format!("/embed/?filename=nothing.png&launch_id={launch_id}"))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_embed_from_resource_link_launch() {
    let app = TestApp::new().await;
    let launch_id = app.launch(RESOURCE_LINK).await;
    app.put_image(&launch_id, "page.png");

    let response = app
        .get(&format!("/embed/?filename=page.png&launch_id={launch_id}"))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body, "<p>Launch is not a deep-linking launch</p>");
    assert!(!app.has_image(&launch_id, "page.png"));
}

#[tokio::test]
async fn test_debug_route_is_disabled_by_default() {
    let app = TestApp::new().await;
    std::fs::write(app.images.path().join("page.png"), b"png").unwrap();

    let response = app.get("/test/?filename=page.png").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_debug_route_recognizes_stored_image() {
    let app = TestApp::with_config(|c| c.ocr.enable_test_route = true).await;
    std::fs::write(app.images.path().join("page.png"), b"png").unwrap();

    let response = app.get("/test/?filename=page.png").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, RECOGNIZED);
    assert!(app.images.path().join("page.png").exists());
}
