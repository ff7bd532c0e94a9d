//! Request and response DTOs.

pub mod request;
pub mod response;

pub use request::{EmbedParams, LaunchParams, LoadParams, TestParams, validated};
pub use response::HealthResponse;
