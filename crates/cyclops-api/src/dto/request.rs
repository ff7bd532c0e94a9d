//! Query and form parameters with validation.
//!
//! Fields default to empty so a missing parameter is reported by
//! validation with a readable message instead of an extractor rejection.

use serde::Deserialize;
use validator::Validate;

use cyclops_core::error::AppError;

/// Parameters carrying only the launch ID.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct LaunchParams {
    /// Launch to resume.
    #[serde(default)]
    #[validate(length(min = 1, message = "Missing \"launch_id\" param"))]
    pub launch_id: String,
}

/// `GET /load/` parameters.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct LoadParams {
    /// Launch to resume.
    #[serde(default)]
    #[validate(length(min = 1, message = "Missing \"launch_id\" param"))]
    pub launch_id: String,
    /// Storage filename of the image.
    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "Missing \"filename\" param"))]
    pub filename: String,
    /// LMS file ID, or `upload`.
    #[serde(default)]
    #[validate(length(min = 1, message = "Missing \"fileid\" param"))]
    pub fileid: String,
}

/// `GET /embed/` parameters.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct EmbedParams {
    /// Launch to resume.
    #[serde(default)]
    #[validate(length(min = 1, message = "Missing \"launch_id\" param"))]
    pub launch_id: String,
    /// Stored image to recognize.
    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "Missing \"filename\" param"))]
    pub filename: String,
}

/// `GET /test/` parameters.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct TestParams {
    /// Stored image to recognize.
    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "Missing \"filename\" param"))]
    pub filename: String,
}

/// Validate a DTO, turning the first failure into a validation error.
pub fn validated<T: Validate>(value: T) -> Result<T, AppError> {
    if let Err(errors) = value.validate() {
        let message = errors
            .field_errors()
            .into_values()
            .flat_map(|errs| errs.iter())
            .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| "Invalid request parameters".to_string());
        return Err(AppError::validation(message));
    }
    Ok(value)
}
