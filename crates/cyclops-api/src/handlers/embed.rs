//! Loading the chosen image, recognizing it and answering the platform.

use axum::extract::{Query, State};
use axum::response::{Html, Redirect};

use cyclops_core::error::AppError;

use crate::dto::{EmbedParams, LoadParams, TestParams, validated};
use crate::error::ApiResult;
use crate::paths::with_query;
use crate::state::AppState;

/// GET /load/
pub async fn load(
    State(state): State<AppState>,
    Query(params): Query<LoadParams>,
) -> ApiResult<Redirect> {
    let params = validated(params)?;
    let launch = state.launches.load(&params.launch_id).await?;
    let stored = state
        .images
        .load(&launch, &params.filename, &params.fileid)
        .await?;

    Ok(Redirect::to(&with_query(
        &state.paths.embed,
        &[
            ("filename", stored.as_str()),
            ("launch_id", launch.launch_id.as_str()),
        ],
    )))
}

/// GET /embed/
pub async fn embed(
    State(state): State<AppState>,
    Query(params): Query<EmbedParams>,
) -> ApiResult<Html<String>> {
    let params = validated(params)?;
    let launch = state.launches.load(&params.launch_id).await?;
    let form = state.embed.embed(&launch, &params.filename).await?;
    Ok(Html(form))
}

/// GET /test/
///
/// Recognizes an image already in the image directory. Disabled unless
/// `ocr.enable_test_route` is set.
pub async fn test(
    State(state): State<AppState>,
    Query(params): Query<TestParams>,
) -> ApiResult<String> {
    if !state.config.ocr.enable_test_route {
        return Err(AppError::not_found("Not found").into());
    }
    let params = validated(params)?;
    Ok(state.embed.recognize(&params.filename).await?)
}
