//! # Idea Shared
//!
//! Wire types shared between the API server and its clients.
//! The `Idea` record itself is defined once in `idea-core` and re-exported
//! here so both sides serialize the same shape.

pub mod dto;
pub mod response;

pub use dto::{CreateIdeaRequest, DbHealth, HealthInfo, UpdateIdeaRequest};
pub use idea_core::{Idea, ListIdeas, SortBy, SortOrder};
pub use response::{ApiResponse, ErrorCode};
