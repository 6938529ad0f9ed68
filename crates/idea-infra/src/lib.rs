//! # Idea Infrastructure
//!
//! Concrete implementations of the ports defined in `idea-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external services, in-memory store only
//! - `postgres` - PostgreSQL idea store via SeaORM
//! - `rate-limit` - Per-client rate limiting via governor

pub mod database;

#[cfg(feature = "rate-limit")]
pub mod rate_limit;

pub use database::{DatabaseConfig, InMemoryIdeaRepository};

#[cfg(feature = "postgres")]
pub use database::{DatabasePool, PostgresIdeaRepository};

#[cfg(feature = "rate-limit")]
pub use rate_limit::InMemoryRateLimiter;
