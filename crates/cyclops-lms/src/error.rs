//! LMS client errors.

use serde::Deserialize;
use thiserror::Error;

use cyclops_core::error::{AppError, ErrorKind};
use cyclops_core::types::FileId;

/// Errors returned by [`CanvasClient`](crate::CanvasClient).
#[derive(Debug, Error)]
pub enum LmsError {
    /// The LMS answered with an error status. `message` is the LMS's own
    /// error text when it sent one.
    #[error("{message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message.
        message: String,
    },
    /// The request could not be sent or the body could not be read.
    #[error("LMS request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The response body was not what the API documents.
    #[error("Unexpected LMS response: {0}")]
    Decode(String),
    /// The file lookup carried no download URL.
    #[error("File {0} has no download URL")]
    MissingDownloadUrl(FileId),
}

impl From<LmsError> for AppError {
    fn from(err: LmsError) -> Self {
        let kind = match &err {
            LmsError::Api { status: 404, .. } => ErrorKind::NotFound,
            _ => ErrorKind::ExternalService,
        };
        AppError::with_source(kind, err.to_string(), err)
    }
}

/// Canvas error body: `{"errors": [{"message": "..."}]}`, or a bare
/// `{"message": "..."}` on some endpoints.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: Vec<ErrorEntry>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEntry {
    message: String,
}

/// Extract the LMS's error message from a response body.
pub(crate) fn error_message(status: u16, body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.errors.into_iter().next().map(|e| e.message).or(b.message))
        .unwrap_or_else(|| format!("LMS request failed with status {status}"))
}
