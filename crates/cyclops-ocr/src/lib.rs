//! # cyclops-ocr
//!
//! Optical character recognition through an external `tesseract` process.
//! Images are checked and, when necessary, re-encoded before the process
//! is started.

pub mod error;
pub mod executor;
pub mod prepare;

pub use error::OcrError;
pub use executor::TesseractEngine;
