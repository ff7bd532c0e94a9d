//! Maps domain `AppError` to HTTP responses.
//!
//! The tool runs inside an LMS iframe, so errors are returned as a small
//! HTML fragment rather than JSON.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use cyclops_core::error::{AppError, ErrorKind};
use cyclops_core::html::escape;

/// Handler error: an [`AppError`] rendered as `<p>message</p>`.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl ApiError {
    /// HTTP status for the error kind.
    pub fn status(&self) -> StatusCode {
        match self.0.kind {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Authentication => StatusCode::UNAUTHORIZED,
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::ExternalService => StatusCode::BAD_GATEWAY,
            ErrorKind::Internal
            | ErrorKind::Database
            | ErrorKind::Cache
            | ErrorKind::Storage
            | ErrorKind::Configuration
            | ErrorKind::Serialization => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(kind = %self.0.kind, error = %self.0.message, "Request failed");
        } else {
            tracing::warn!(kind = %self.0.kind, error = %self.0.message, "Request rejected");
        }

        (status, Html(format!("<p>{}</p>", escape(&self.0.message)))).into_response()
    }
}

/// Result type of the HTML handlers.
pub type ApiResult<T> = Result<T, ApiError>;
