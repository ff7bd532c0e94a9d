//! Image upload.

use axum::extract::{Multipart, Query, State};
use axum::response::{Html, Redirect};
use bytes::Bytes;
use tracing::debug;

use cyclops_core::error::AppError;
use cyclops_service::image::UPLOAD_FILE_ID;

use crate::dto::{LaunchParams, validated};
use crate::error::ApiResult;
use crate::paths::with_query;
use crate::state::AppState;
use crate::views;

/// Multipart field holding the image.
const FILE_FIELD: &str = "userfile";

/// GET /upload/
pub async fn upload_page(
    State(state): State<AppState>,
    Query(params): Query<LaunchParams>,
) -> ApiResult<Html<String>> {
    let params = validated(params)?;
    let launch = state.launches.load(&params.launch_id).await?;
    Ok(Html(views::upload_page(&state.paths, &launch.launch_id)))
}

/// POST /uploader
///
/// Saves the image and continues to the load action. An empty submission
/// goes back to the upload page.
pub async fn uploader(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Redirect> {
    let mut launch_id = String::new();
    let mut upload: Option<(String, Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Invalid upload: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("launch_id") => {
                launch_id = field
                    .text()
                    .await
                    .map_err(|e| AppError::validation(format!("Invalid upload: {e}")))?;
            }
            Some(FILE_FIELD) => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::validation(format!("Invalid upload: {e}")))?;
                upload = Some((filename, data));
            }
            other => debug!(field = ?other, "Ignoring multipart field"),
        }
    }

    let params = validated(LaunchParams { launch_id })?;
    let launch = state.launches.load(&params.launch_id).await?;

    let (filename, data) = match upload {
        Some((filename, data)) if !filename.is_empty() && !data.is_empty() => (filename, data),
        _ => {
            return Ok(Redirect::to(&with_query(
                &state.paths.upload,
                &[("launch_id", launch.launch_id.as_str())],
            )));
        }
    };

    let stored = state.images.upload(&launch, &filename, data).await?;
    Ok(Redirect::to(&with_query(
        &state.paths.load,
        &[
            ("filename", stored.as_str()),
            ("fileid", UPLOAD_FILE_ID),
            ("launch_id", launch.launch_id.as_str()),
        ],
    )))
}
