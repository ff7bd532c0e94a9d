//! Workspace integration tests: the HTTP application end to end.

mod embed_test;
mod health_test;
mod helpers;
mod lti_test;
mod picker_test;
mod upload_test;
