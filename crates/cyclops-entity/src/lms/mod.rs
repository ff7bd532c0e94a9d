//! LMS course content entities.

pub mod record;
pub mod tree;

pub use record::{Course, FileRecord, FolderRecord};
pub use tree::FolderNode;
