//! Liveness and mounting under a base path.

use axum::http::StatusCode;

use crate::helpers::{DEEP_LINKING, TestApp, launch_id_in};

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;

    let response = app.get("/health").await;
    assert_eq!(response.status, StatusCode::OK);

    let health = response.json();
    assert_eq!(health["status"], "ok");
    assert_eq!(health["cache"], true);
    assert_eq!(health["storage"], true);
    assert_eq!(health["ocr_engine"], "stub");
}

#[tokio::test]
async fn test_mounted_under_base_path() {
    let app = TestApp::with_config(|c| c.server.base_path = "/cyclops/".to_string()).await;

    assert_eq!(app.get("/cyclops/health").await.status, StatusCode::OK);
    assert_eq!(app.get("/health").await.status, StatusCode::NOT_FOUND);

    let launch_id = app.launch(DEEP_LINKING).await;
    let response = app
        .post_form("/cyclops/select/back/", &[("launch_id", &launch_id)])
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains(r#"action="/cyclops/select/""#));
    assert!(response.body.contains(r#"action="/cyclops/upload/""#));
    assert_eq!(launch_id_in(&response.body).as_deref(), Some(launch_id.as_str()));

    let config = app.get("/cyclops/config/1/json").await.json();
    assert_eq!(config["target_link_uri"], "http://tools.example.edu/cyclops/launch/");
}
