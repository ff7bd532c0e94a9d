//! Core traits defined in `cyclops-core` and implemented by other crates.

pub mod cache;
pub mod ocr;

pub use cache::CacheProvider;
pub use ocr::OcrEngine;
