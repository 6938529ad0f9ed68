//! In-memory idea store - used when Postgres is not compiled in, and in tests.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use idea_core::error::RepoError;
use idea_core::ports::{BaseRepository, IdeaRepository};
use idea_core::{Idea, IdeaChanges, ListIdeas};

/// Idea store backed by a `HashMap` behind an async `RwLock`.
///
/// Each mutation happens under a single write-lock acquisition, giving the
/// same no-lost-update guarantee as the single-statement SQL updates.
/// Data is lost on process restart.
pub struct InMemoryIdeaRepository {
    rows: RwLock<HashMap<String, Idea>>,
}

impl InMemoryIdeaRepository {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(HashMap::new()),
        }
    }

    /// Pre-populated store.
    pub fn with_ideas(ideas: impl IntoIterator<Item = Idea>) -> Self {
        Self {
            rows: RwLock::new(ideas.into_iter().map(|i| (i.id.clone(), i)).collect()),
        }
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

impl Default for InMemoryIdeaRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Idea, String> for InMemoryIdeaRepository {
    async fn find_by_id(&self, id: String) -> Result<Option<Idea>, RepoError> {
        Ok(self.rows.read().await.get(&id).cloned())
    }

    async fn insert(&self, idea: Idea) -> Result<Idea, RepoError> {
        let mut rows = self.rows.write().await;
        if rows.contains_key(&idea.id) {
            return Err(RepoError::Constraint(format!(
                "idea {} already exists",
                idea.id
            )));
        }
        rows.insert(idea.id.clone(), idea.clone());
        Ok(idea)
    }

    async fn delete(&self, id: String) -> Result<(), RepoError> {
        self.rows
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl IdeaRepository for InMemoryIdeaRepository {
    async fn list(&self, query: ListIdeas) -> Result<Vec<Idea>, RepoError> {
        let snapshot: Vec<Idea> = self.rows.read().await.values().cloned().collect();
        Ok(query.page(snapshot))
    }

    async fn increment_upvotes(&self, id: &str, at: DateTime<Utc>) -> Result<Idea, RepoError> {
        let mut rows = self.rows.write().await;
        let idea = rows.get_mut(id).ok_or(RepoError::NotFound)?;
        idea.upvote(at);
        Ok(idea.clone())
    }

    async fn update(
        &self,
        id: &str,
        changes: &IdeaChanges,
        at: DateTime<Utc>,
    ) -> Result<Idea, RepoError> {
        let mut rows = self.rows.write().await;
        let idea = rows.get_mut(id).ok_or(RepoError::NotFound)?;
        idea.apply(changes, at);
        Ok(idea.clone())
    }

    async fn ping(&self) -> Result<(), RepoError> {
        Ok(())
    }
}
