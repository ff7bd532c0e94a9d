//! Course file picker and start-page navigation.

use axum::http::StatusCode;
use serde_json::json;
use wiremock::matchers::method;
use wiremock::{Mock, ResponseTemplate};

use crate::helpers::{DEEP_LINKING, RESOURCE_LINK, TestApp, launch_id_in};

#[tokio::test]
async fn test_select_renders_course_tree() {
    let app = TestApp::new().await;
    app.mount_course(
        json!([
            {"id": 1, "name": "course files", "parent_folder_id": null},
            {"id": 2, "name": "Pics", "parent_folder_id": 1},
            {"id": 3, "name": "Empty", "parent_folder_id": 1}
        ]),
        json!([
            {"id": 10, "display_name": "cat.png", "filename": "cat.png", "folder_id": 2},
            {"id": 11, "display_name": "Cover & Back.jpg", "filename": "cover.jpg", "folder_id": 1}
        ]),
    )
    .await;
    let launch_id = app.launch(DEEP_LINKING).await;

    let response = app.get(&format!("/select/?launch_id={launch_id}")).await;
    assert_eq!(response.status, StatusCode::OK, "{}", response.body);

    let body = &response.body;
    assert!(body.contains("<h2>Cell Biology</h2>"));
    assert!(body.contains(r#"<label for="folder-1">course files</label>"#));
    assert!(body.contains(r#"<label for="folder-2">Pics</label>"#));
    assert!(body.contains(r#"<label for="folder-3">Empty</label>"#));
    assert!(body.contains(&format!(
        "/load/?filename=cat.png&amp;fileid=10&amp;launch_id={launch_id}"
    )));
    assert!(body.contains(">Cover &amp; Back.jpg</a>"));
    assert_eq!(launch_id_in(body).as_deref(), Some(launch_id.as_str()));
}

#[tokio::test]
async fn test_select_with_two_root_folders() {
    let app = TestApp::new().await;
    app.mount_course(
        json!([
            {"id": 1, "name": "course files", "parent_folder_id": null},
            {"id": 2, "name": "other root", "parent_folder_id": null}
        ]),
        json!([]),
    )
    .await;
    let launch_id = app.launch(DEEP_LINKING).await;

    let response = app.get(&format!("/select/?launch_id={launch_id}")).await;
    assert_eq!(response.status, StatusCode::BAD_GATEWAY);
    assert!(response.body.starts_with("<p>Unable to list course files: "));
}

#[tokio::test]
async fn test_select_with_file_in_unknown_folder() {
    let app = TestApp::new().await;
    app.mount_course(
        json!([{"id": 1, "name": "course files", "parent_folder_id": null}]),
        json!([{"id": 5, "display_name": "x.png", "filename": "x.png", "folder_id": 99}]),
    )
    .await;
    let launch_id = app.launch(RESOURCE_LINK).await;

    let response = app.get(&format!("/select/?launch_id={launch_id}")).await;
    assert_eq!(response.status, StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_select_reports_lms_error() {
    let app = TestApp::new().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"errors": [{"message": "Invalid access token."}]})),
        )
        .mount(&app.lms)
        .await;
    let launch_id = app.launch(DEEP_LINKING).await;

    let response = app.get(&format!("/select/?launch_id={launch_id}")).await;
    assert_eq!(response.status, StatusCode::BAD_GATEWAY);
    assert_eq!(response.body, "<p>Invalid access token.</p>");
}

#[tokio::test]
async fn test_select_requires_launch_id() {
    let app = TestApp::new().await;

    let response = app.get("/select/").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body, "<p>Missing &quot;launch_id&quot; param</p>");
}

#[tokio::test]
async fn test_select_with_unknown_launch() {
    let app = TestApp::new().await;

    let response = app.get("/select/?launch_id=lti1p3-launch-unknown").await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body, "<p>Launch expired or unknown</p>");
}

#[tokio::test]
async fn test_back_returns_to_start_page() {
    let app = TestApp::new().await;
    let launch_id = app.launch(DEEP_LINKING).await;

    for path in ["/select/back/", "/upload/back/"] {
        let response = app.post_form(path, &[("launch_id", &launch_id)]).await;
        assert_eq!(response.status, StatusCode::OK);
        assert!(response.body.contains("Select from course files"));
        assert_eq!(launch_id_in(&response.body).as_deref(), Some(launch_id.as_str()));
    }
}
