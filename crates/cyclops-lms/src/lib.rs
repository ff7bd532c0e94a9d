//! # cyclops-lms
//!
//! The handful of read-only Canvas REST calls Cyclops makes: look up a
//! course, list its folders and image files, look up a single file and
//! download it.

pub mod client;
pub mod error;
pub mod pagination;

pub use client::CanvasClient;
pub use error::LmsError;
