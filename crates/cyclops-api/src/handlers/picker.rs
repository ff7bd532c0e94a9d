//! Start page navigation and the course file picker.

use axum::Form;
use axum::extract::{Query, State};
use axum::response::Html;

use crate::dto::{LaunchParams, validated};
use crate::error::ApiResult;
use crate::state::AppState;
use crate::views;

/// GET /select/
pub async fn select(
    State(state): State<AppState>,
    Query(params): Query<LaunchParams>,
) -> ApiResult<Html<String>> {
    let params = validated(params)?;
    let launch = state.launches.load(&params.launch_id).await?;
    let picker = state.picker.picker(&launch).await?;

    Ok(Html(views::picker_page(
        &state.paths,
        &launch.launch_id,
        &picker.course.name,
        &picker.markup,
    )))
}

/// POST /select/back/ and POST /upload/back/
pub async fn back(
    State(state): State<AppState>,
    Form(params): Form<LaunchParams>,
) -> ApiResult<Html<String>> {
    let params = validated(params)?;
    let launch = state.launches.load(&params.launch_id).await?;
    Ok(Html(views::start_page(&state.paths, &launch.launch_id)))
}
