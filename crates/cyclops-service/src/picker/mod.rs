//! Course file picker: tree assembly, markup and the service tying them to
//! the LMS.

pub mod render;
pub mod service;
pub mod tree;

pub use render::TreeRenderer;
pub use service::{Picker, PickerService};
pub use tree::{MalformedTreeError, build_tree};
