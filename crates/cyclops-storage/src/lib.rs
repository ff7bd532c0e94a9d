//! # cyclops-storage
//!
//! Local directory holding images between the moment they are uploaded or
//! fetched from the LMS and the moment they have been recognized.

pub mod filename;
pub mod images;

pub use filename::sanitize_filename;
pub use images::ImageStore;
