//! # cyclops-entity
//!
//! Domain entity models for Cyclops. LMS records mirror the Canvas REST
//! payloads the tool reads, registrations are database rows, and the
//! launch context is the value kept in the launch-data cache between
//! requests. All entities derive `Debug`, `Clone`, `Serialize` and
//! `Deserialize`; database entities additionally derive `sqlx::FromRow`.

pub mod launch;
pub mod lms;
pub mod registration;
