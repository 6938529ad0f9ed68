//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod rate_limit;
mod repository;

pub use rate_limit::{RateLimitConfig, RateLimitError, RateLimitResult, RateLimiter};
pub use repository::{BaseRepository, IdeaRepository};
