//! # cyclops-core
//!
//! Core crate for Cyclops. Contains the configuration schemas, typed LMS
//! identifiers, HTML escaping, the traits implemented by the cache and OCR
//! crates, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Cyclops crates.

pub mod config;
pub mod error;
pub mod html;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
