//! LTI endpoints: login, launch, tool configuration, icon.

use axum::Form;
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, header};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::TypedHeader;
use axum_extra::headers::Host;
use tracing::info;

use cyclops_core::error::AppError;
use cyclops_lti::{LaunchRequest, LoginRequest, tool_configuration};

use crate::error::ApiResult;
use crate::state::AppState;
use crate::views;

/// GET /login/
pub async fn login_get(
    State(state): State<AppState>,
    Query(request): Query<LoginRequest>,
) -> ApiResult<Redirect> {
    login(&state, &request).await
}

/// POST /login/
pub async fn login_post(
    State(state): State<AppState>,
    Form(request): Form<LoginRequest>,
) -> ApiResult<Redirect> {
    login(&state, &request).await
}

async fn login(state: &AppState, request: &LoginRequest) -> ApiResult<Redirect> {
    let redirect = state.login.initiate(request).await?;
    Ok(Redirect::to(&redirect.url))
}

/// POST /launch/
pub async fn launch(
    State(state): State<AppState>,
    Form(request): Form<LaunchRequest>,
) -> ApiResult<Html<String>> {
    let context = state.launch_validator.validate(&request).await?;
    state.launches.save(&context).await?;
    Ok(Html(views::start_page(&state.paths, &context.launch_id)))
}

/// GET /config/{key_id}/json
pub async fn config_json(
    State(state): State<AppState>,
    Path(key_id): Path<String>,
    TypedHeader(host): TypedHeader<Host>,
    headers: HeaderMap,
) -> ApiResult<Json<serde_json::Value>> {
    let id: i64 = key_id
        .parse()
        .map_err(|_| AppError::validation(format!("Invalid key id: '{key_id}'")))?;
    let registration = state
        .registrations
        .find_registration_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("No LTI registration with id {id}")))?;
    let public_jwk = registration.public_jwk_value().map_err(AppError::from)?;

    let base_url = base_url(&state, &host, &headers);
    info!(registration_id = id, %base_url, "Serving tool configuration");

    Ok(Json(tool_configuration(
        &state.config.lti.tool,
        &base_url,
        public_jwk,
    )))
}

/// Absolute URL the tool is reachable at, as seen by the LMS.
fn base_url(state: &AppState, host: &Host, headers: &HeaderMap) -> String {
    let scheme = state
        .config
        .server
        .trust_forwarded_proto
        .then(|| headers.get("x-forwarded-proto"))
        .flatten()
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or("http");

    let authority = match host.port() {
        Some(port) => format!("{}:{port}", host.hostname()),
        None => host.hostname().to_string(),
    };

    format!("{scheme}://{authority}{}", state.paths.base)
}

/// GET /icon/
pub async fn icon(State(state): State<AppState>) -> ApiResult<Response> {
    let path = &state.config.lti.tool.icon_path;
    let data = tokio::fs::read(path)
        .await
        .map_err(|_| AppError::not_found("Icon not found"))?;
    Ok(([(header::CONTENT_TYPE, "image/png")], data).into_response())
}
