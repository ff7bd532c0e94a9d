//! # cyclops-cache
//!
//! Cache provider implementations for Cyclops. The cache holds short-lived
//! LTI data: OIDC login states, validated launches and platform key sets.
//! Supports two modes:
//!
//! - **memory**: In-process cache using [moka](https://crates.io/crates/moka)
//! - **redis**: Redis-backed cache using the [redis](https://crates.io/crates/redis) crate,
//!   required when several server instances share launches
//!
//! The provider is selected at runtime based on configuration.

pub mod keys;
#[cfg(feature = "memory")]
pub mod memory;
pub mod provider;
#[cfg(feature = "redis-backend")]
pub mod redis;

pub use provider::CacheManager;
