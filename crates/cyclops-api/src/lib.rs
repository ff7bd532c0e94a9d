//! # cyclops-api
//!
//! HTTP layer for Cyclops built on Axum.
//!
//! Serves the LTI endpoints (login, launch, tool configuration), the pages
//! shown inside the LMS editor dialog (start, picker, upload) and the
//! actions behind them (load, embed). Pages are small HTML fragments and
//! errors are rendered the same way.

pub mod app;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod paths;
pub mod router;
pub mod state;
pub mod views;

pub use app::{build_app, run_server};
pub use error::ApiError;
pub use state::AppState;
