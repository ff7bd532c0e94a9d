//! OCR engine trait.

use std::path::Path;

use async_trait::async_trait;

use crate::result::AppResult;

/// Converts the pixels of an image file into text.
///
/// The production implementation shells out to tesseract; tests substitute
/// a stub.
#[async_trait]
pub trait OcrEngine: Send + Sync + std::fmt::Debug + 'static {
    /// Short engine name used in logs.
    fn name(&self) -> &str;

    /// Recognize the text in the image at `path`.
    async fn recognize(&self, path: &Path) -> AppResult<String>;

    /// Check that the engine can be invoked.
    async fn health_check(&self) -> AppResult<bool>;
}
