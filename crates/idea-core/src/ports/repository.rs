use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Idea, IdeaChanges, ListIdeas};
use crate::error::RepoError;

/// Generic repository trait defining the basic record operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert a new entity and return it as stored.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID. `RepoError::NotFound` if nothing matched.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Idea store.
///
/// Every mutation is a single statement against the store; callers never
/// read a row back to write it again.
#[async_trait]
pub trait IdeaRepository: BaseRepository<Idea, String> {
    /// One page of ideas in the requested order.
    async fn list(&self, query: ListIdeas) -> Result<Vec<Idea>, RepoError>;

    /// Atomically add one vote and stamp `updated_at`.
    /// `RepoError::NotFound` if no row matched.
    async fn increment_upvotes(&self, id: &str, at: DateTime<Utc>) -> Result<Idea, RepoError>;

    /// Overwrite the provided fields and stamp `updated_at`.
    /// `RepoError::NotFound` if no row matched.
    async fn update(
        &self,
        id: &str,
        changes: &IdeaChanges,
        at: DateTime<Utc>,
    ) -> Result<Idea, RepoError>;

    /// Connectivity check.
    async fn ping(&self) -> Result<(), RepoError>;
}
