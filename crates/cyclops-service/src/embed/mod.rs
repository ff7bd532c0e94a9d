//! Recognition and the deep-linking answer.

pub mod service;

pub use service::EmbedService;
