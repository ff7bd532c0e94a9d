//! Convenience result type alias for Cyclops.

use crate::error::AppError;

/// A specialized `Result` type for Cyclops operations.
pub type AppResult<T> = Result<T, AppError>;
