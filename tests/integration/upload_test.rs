//! Upload page and multipart uploads.

use axum::body::Body;
use axum::http::{Request, StatusCode, header};

use crate::helpers::{DEEP_LINKING, TestApp, TestResponse, query_value};

const BOUNDARY: &str = "cyclops-test-boundary";

/// Build a multipart body with a launch ID and an optional file part.
fn multipart_body(launch_id: &str, file: Option<(&str, &[u8])>) -> Vec<u8> {
    let mut body = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"launch_id\"\r\n\r\n{launch_id}\r\n"
    )
    .into_bytes();

    if let Some((filename, data)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"userfile\"; filename=\"{filename}\"\r\nContent-Type: image/png\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

async fn upload(app: &TestApp, launch_id: &str, file: Option<(&str, &[u8])>) -> TestResponse {
    app.send(
        Request::post("/uploader")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(multipart_body(launch_id, file)))
            .unwrap(),
    )
    .await
}

#[tokio::test]
async fn test_upload_page() {
    let app = TestApp::new().await;
    let launch_id = app.launch(DEEP_LINKING).await;

    let response = app.get(&format!("/upload/?launch_id={launch_id}")).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains(r#"action="/uploader" method="POST" enctype="multipart/form-data""#));
    assert!(response.body.contains(r#"name="userfile""#));
    assert!(response.body.contains(r#"action="/upload/back/""#));
}

#[tokio::test]
async fn test_upload_saves_and_redirects_to_load() {
    let app = TestApp::new().await;
    let launch_id = app.launch(DEEP_LINKING).await;

    let response = upload(&app, &launch_id, Some(("notes.png", b"\x89PNG fake"))).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER, "{}", response.body);

    let location = response.location();
    assert!(location.starts_with("/load/?"));
    assert_eq!(query_value(location, "filename").as_deref(), Some("notes.png"));
    assert_eq!(query_value(location, "fileid").as_deref(), Some("upload"));
    assert_eq!(query_value(location, "launch_id").as_deref(), Some(launch_id.as_str()));
    assert!(app.has_image(&launch_id, "notes.png"));
}

#[tokio::test]
async fn test_upload_sanitizes_filename() {
    let app = TestApp::new().await;
    let launch_id = app.launch(DEEP_LINKING).await;

    let response = upload(&app, &launch_id, Some(("../../etc/scan.png", b"data"))).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);

    let stored = query_value(response.location(), "filename").unwrap();
    assert_eq!(stored, "etc_scan.png");
    assert!(app.has_image(&launch_id, &stored));
}

#[tokio::test]
async fn test_empty_upload_returns_to_upload_page() {
    let app = TestApp::new().await;
    let launch_id = app.launch(DEEP_LINKING).await;

    let response = upload(&app, &launch_id, None).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), format!("/upload/?launch_id={launch_id}"));

    let response = upload(&app, &launch_id, Some(("", b""))).await;
    assert_eq!(response.location(), format!("/upload/?launch_id={launch_id}"));
}

#[tokio::test]
async fn test_upload_with_unknown_launch() {
    let app = TestApp::new().await;
    let response = upload(&app, "lti1p3-launch-missing", Some(("a.png", b"data"))).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_upload_over_size_limit() {
    let app = TestApp::with_config(|c| c.storage.max_upload_size_bytes = 4096).await;
    let launch_id = app.launch(DEEP_LINKING).await;

    let response = upload(&app, &launch_id, Some(("big.png", &[0u8; 16 * 1024]))).await;
    assert!(response.status.is_client_error());
    assert!(!app.has_image(&launch_id, "big.png"));
}
