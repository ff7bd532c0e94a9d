//! Launch continuity across requests.

pub mod store;

pub use store::LaunchStore;
