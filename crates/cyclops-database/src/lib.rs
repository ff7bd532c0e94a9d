//! # cyclops-database
//!
//! PostgreSQL connection management, migrations and the repository for
//! LTI platform registrations.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use repositories::RegistrationRepository;
