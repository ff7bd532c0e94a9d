//! Getting images into the image directory.

pub mod service;

pub use service::{ImageService, UPLOAD_FILE_ID};
