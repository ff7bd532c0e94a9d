//! # cyclops-service
//!
//! Use cases behind the Cyclops HTTP handlers. Each service is built once at
//! startup from its collaborators and shared through `Arc`s.
//!
//! - [`LaunchStore`]: resumes a validated LTI launch from its launch ID
//! - [`PickerService`]: course folders and image files as a rendered tree
//! - [`ImageService`]: brings an uploaded or LMS-hosted image into the image
//!   directory
//! - [`EmbedService`]: recognizes an image and answers the deep-linking
//!   request with the text

pub mod embed;
pub mod image;
pub mod launch;
pub mod picker;

pub use embed::EmbedService;
pub use image::ImageService;
pub use launch::LaunchStore;
pub use picker::{MalformedTreeError, PickerService, TreeRenderer, build_tree};
