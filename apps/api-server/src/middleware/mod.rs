//! Middleware modules.

pub mod cors;
pub mod error;
pub mod rate_limit;
pub mod security_headers;
