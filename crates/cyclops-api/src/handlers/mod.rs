//! Route handlers organized by flow step.

pub mod embed;
pub mod health;
pub mod lti;
pub mod picker;
pub mod upload;
