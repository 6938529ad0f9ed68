//! Board state: the idea list as the user sees it.
//!
//! Every mutation is tried against the service first. When the call fails
//! the same change is applied to the local list instead, so the board stays
//! usable offline. Entries remember where they came from.

use std::sync::Arc;
use std::time::Duration;

use idea_core::domain::{generate_id, now};
use idea_core::{DomainError, Idea, IdeaChanges, ListIdeas, NewIdea};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};

use crate::api::IdeaApi;
use crate::config::ClientConfig;
use crate::mock::mock_ideas;

/// Prefix of ids minted by the local fallback.
pub const LOCAL_ID_PREFIX: &str = "local-";

/// A value tagged with where it was produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sourced<T> {
    /// Returned by the service.
    Remote(T),
    /// Produced by the local fallback; the service has not seen it.
    LocalOnly(T),
}

impl<T> Sourced<T> {
    pub fn get(&self) -> &T {
        match self {
            Sourced::Remote(value) | Sourced::LocalOnly(value) => value,
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(self, Sourced::LocalOnly(_))
    }
}

/// Snapshot of the board.
#[derive(Debug, Clone, Default)]
pub struct BoardState {
    pub ideas: Vec<Sourced<Idea>>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Holds the idea list and keeps it in sync with the service.
pub struct IdeaBoard {
    api: Arc<dyn IdeaApi>,
    state: RwLock<BoardState>,
}

impl IdeaBoard {
    pub fn new(api: Arc<dyn IdeaApi>) -> Self {
        Self {
            api,
            state: RwLock::new(BoardState {
                loading: true,
                ..BoardState::default()
            }),
        }
    }

    pub async fn snapshot(&self) -> BoardState {
        self.state.read().await.clone()
    }

    pub async fn ideas(&self) -> Vec<Sourced<Idea>> {
        self.state.read().await.ideas.clone()
    }

    /// Replace the list with the service's current one.
    ///
    /// On failure an empty board is filled with the built-in sample ideas
    /// and a populated board is left as it is.
    pub async fn refresh(&self) {
        self.state.write().await.loading = true;

        let fetched = self.api.list_ideas(&ListIdeas::default()).await;

        let mut state = self.state.write().await;
        match fetched {
            Ok(ideas) => {
                state.ideas = ideas.into_iter().map(Sourced::Remote).collect();
            }
            Err(e) => {
                tracing::warn!(error = %e, "Idea service unavailable, keeping local ideas");
                if state.ideas.is_empty() {
                    state.ideas = mock_ideas(now()).into_iter().map(Sourced::LocalOnly).collect();
                }
            }
        }
        state.error = None;
        state.loading = false;
    }

    /// Submit a new idea. The entry is added to the top of the list.
    pub async fn create(&self, title: &str, description: &str) -> Result<Sourced<Idea>, DomainError> {
        let input = NewIdea::parse(title, description)?;

        let entry = match self
            .api
            .create_idea(input.title(), input.description())
            .await
        {
            Ok(idea) => Sourced::Remote(idea),
            Err(e) => {
                tracing::warn!(error = %e, "Create failed, keeping idea locally");
                let id = format!("{LOCAL_ID_PREFIX}{}", generate_id());
                Sourced::LocalOnly(Idea::with_id(id, input, now()))
            }
        };

        self.state.write().await.ideas.insert(0, entry.clone());
        Ok(entry)
    }

    /// Add a vote. `None` if the idea is neither on the service nor local.
    pub async fn upvote(&self, id: &str) -> Option<Sourced<Idea>> {
        match self.api.upvote_idea(id).await {
            Ok(idea) => Some(self.replace(Sourced::Remote(idea)).await),
            Err(e) => {
                tracing::warn!(error = %e, idea_id = id, "Upvote failed, applying locally");
                self.modify_local(id, |idea| idea.upvote(now())).await
            }
        }
    }

    /// Edit an idea's title and/or description.
    pub async fn update(
        &self,
        id: &str,
        title: Option<&str>,
        description: Option<&str>,
    ) -> Result<Option<Sourced<Idea>>, DomainError> {
        let changes = IdeaChanges::parse(title, description)?;

        let entry = match self
            .api
            .update_idea(id, changes.title(), changes.description())
            .await
        {
            Ok(idea) => Some(self.replace(Sourced::Remote(idea)).await),
            Err(e) => {
                tracing::warn!(error = %e, idea_id = id, "Update failed, applying locally");
                self.modify_local(id, |idea| idea.apply(&changes, now()))
                    .await
            }
        };

        Ok(entry)
    }

    /// Remove an idea. The flag says whether it was on the board.
    pub async fn delete(&self, id: &str) -> Sourced<bool> {
        let outcome = self.api.delete_idea(id).await;
        if let Err(e) = &outcome {
            tracing::warn!(error = %e, idea_id = id, "Delete failed, removing locally");
        }

        let mut state = self.state.write().await;
        let before = state.ideas.len();
        state.ideas.retain(|entry| entry.get().id != id);
        let removed = state.ideas.len() != before;

        match outcome {
            Ok(()) => Sourced::Remote(removed),
            Err(_) => Sourced::LocalOnly(removed),
        }
    }

    /// Fetch now, then keep polling in the background if enabled.
    pub async fn start(self: &Arc<Self>, config: &ClientConfig) -> Option<Poller> {
        if config.real_time_updates {
            Some(self.spawn_polling(config.refresh_interval))
        } else {
            self.refresh().await;
            None
        }
    }

    /// Poll the service every `every`. The first poll runs immediately.
    ///
    /// A poll that outlasts the interval delays the next one rather than
    /// overlapping it.
    pub fn spawn_polling(self: &Arc<Self>, every: Duration) -> Poller {
        let board = Arc::clone(self);
        let handle = tokio::spawn(async move {
            let mut ticker = interval(every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                board.refresh().await;
            }
        });

        Poller { handle }
    }

    async fn replace(&self, entry: Sourced<Idea>) -> Sourced<Idea> {
        let mut state = self.state.write().await;
        if let Some(slot) = state
            .ideas
            .iter_mut()
            .find(|e| e.get().id == entry.get().id)
        {
            *slot = entry.clone();
        }
        entry
    }

    async fn modify_local<F>(&self, id: &str, change: F) -> Option<Sourced<Idea>>
    where
        F: FnOnce(&mut Idea),
    {
        let mut state = self.state.write().await;
        let slot = state.ideas.iter_mut().find(|e| e.get().id == id)?;

        let mut idea = slot.get().clone();
        change(&mut idea);
        *slot = Sourced::LocalOnly(idea);
        Some(slot.clone())
    }
}

/// Background poll task. Dropping it stops polling.
#[derive(Debug)]
pub struct Poller {
    handle: JoinHandle<()>,
}

impl Poller {
    pub fn stop(self) {}

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
