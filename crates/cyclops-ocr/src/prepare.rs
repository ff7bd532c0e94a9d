//! Image validation and normalization ahead of recognition.

use std::path::{Path, PathBuf};

use image::{ImageFormat, ImageReader};
use tracing::debug;
use uuid::Uuid;

use crate::error::OcrError;

/// Formats tesseract reads directly.
const NATIVE_FORMATS: &[ImageFormat] = &[
    ImageFormat::Png,
    ImageFormat::Jpeg,
    ImageFormat::Tiff,
    ImageFormat::Bmp,
    ImageFormat::Gif,
    ImageFormat::Pnm,
];

/// An image ready to hand to the OCR process.
#[derive(Debug)]
pub struct PreparedImage {
    path: PathBuf,
    temporary: bool,
}

impl PreparedImage {
    /// Path to pass to the OCR process.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the image was re-encoded into a temporary file.
    pub fn is_converted(&self) -> bool {
        self.temporary
    }
}

impl Drop for PreparedImage {
    fn drop(&mut self) {
        if self.temporary {
            let _ = std::fs::remove_file(&self.path);
        }
    }
}

/// Decode the image to make sure it is valid, re-encoding it to a
/// temporary PNG when the format is not one tesseract reads.
///
/// Blocking; run it on the blocking pool.
pub fn prepare_image(path: &Path) -> Result<PreparedImage, OcrError> {
    let reader = ImageReader::open(path)?
        .with_guessed_format()
        .map_err(OcrError::Io)?;

    let format = reader
        .format()
        .ok_or_else(|| OcrError::UnsupportedImage(format!("{}: unknown format", path.display())))?;

    let decoded = reader
        .decode()
        .map_err(|e| OcrError::UnsupportedImage(format!("{}: {e}", path.display())))?;

    if NATIVE_FORMATS.contains(&format) {
        return Ok(PreparedImage {
            path: path.to_path_buf(),
            temporary: false,
        });
    }

    let converted = std::env::temp_dir().join(format!("cyclops-ocr-{}.png", Uuid::new_v4()));
    decoded
        .save_with_format(&converted, ImageFormat::Png)
        .map_err(|e| OcrError::UnsupportedImage(format!("{}: {e}", path.display())))?;

    debug!(
        source = %path.display(),
        ?format,
        converted = %converted.display(),
        "Re-encoded image to PNG"
    );

    Ok(PreparedImage {
        path: converted,
        temporary: true,
    })
}
