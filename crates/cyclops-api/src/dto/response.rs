//! Response DTOs.

use serde::{Deserialize, Serialize};

/// `GET /health` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `ok` or `degraded`.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Whether the cache answers.
    pub cache: bool,
    /// Whether the image directory is usable.
    pub storage: bool,
    /// OCR engine in use.
    pub ocr_engine: String,
}
