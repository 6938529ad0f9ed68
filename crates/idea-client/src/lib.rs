//! # Idea Client
//!
//! Consumer side of the idea board API:
//!
//! - [`ApiClient`] - typed wrapper over the HTTP endpoints
//! - [`IdeaBoard`] - list state with polling and a local fallback when the
//!   service is unreachable
//! - [`view`] - text rendering helpers

pub mod api;
pub mod board;
pub mod config;
pub mod mock;
pub mod view;

pub use api::{ApiClient, ClientError, IdeaApi};
pub use board::{BoardState, IdeaBoard, Poller, Sourced};
pub use config::ClientConfig;
