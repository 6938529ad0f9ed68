//! # Idea Core
//!
//! The domain layer of the idea board.
//! This crate contains the idea record, its validation rules and the ports
//! the infrastructure layer implements. It has no infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;

pub use domain::{Idea, IdeaChanges, ListIdeas, NewIdea, SortBy, SortOrder};
pub use error::{DomainError, RepoError};
