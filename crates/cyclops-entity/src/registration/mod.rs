//! LTI platform registration entities.

pub mod model;

pub use model::{LtiRegistration, NewRegistration};
