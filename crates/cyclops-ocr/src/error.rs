//! OCR errors.

use thiserror::Error;

use cyclops_core::error::{AppError, ErrorKind};

/// Errors from preparing an image or running the OCR process.
#[derive(Debug, Error)]
pub enum OcrError {
    /// The OCR executable was not found.
    #[error("OCR command not found: {0}")]
    CommandNotFound(String),

    /// The OCR process did not finish in time.
    #[error("OCR timed out after {0} seconds")]
    Timeout(u64),

    /// The OCR process exited with a non-zero code.
    #[error("OCR failed with exit code {code}: {stderr}")]
    ProcessFailed {
        /// Exit code, `-1` when killed by a signal.
        code: i32,
        /// Captured standard error.
        stderr: String,
    },

    /// The file is not an image the engine can read.
    #[error("Unsupported image: {0}")]
    UnsupportedImage(String),

    /// I/O error while preparing or running.
    #[error("I/O error during OCR: {0}")]
    Io(#[from] std::io::Error),

    /// The blocking preparation task panicked or was cancelled.
    #[error("Image preparation task failed: {0}")]
    Task(String),
}

impl From<OcrError> for AppError {
    fn from(err: OcrError) -> Self {
        let kind = match &err {
            OcrError::UnsupportedImage(_) => ErrorKind::Validation,
            OcrError::Io(e) if e.kind() == std::io::ErrorKind::NotFound => ErrorKind::NotFound,
            _ => ErrorKind::ExternalService,
        };
        AppError::with_source(kind, err.to_string(), err)
    }
}
