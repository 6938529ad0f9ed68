use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::text::{DESCRIPTION_MAX_CHARS, TITLE_MAX_CHARS, clean_field};
use crate::error::DomainError;

/// Idea entity - one anonymously submitted idea and its vote count.
///
/// This is the single schema for the record: the store maps its rows into
/// it, the API serializes it, and the client deserializes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Idea {
    pub id: String,
    pub title: String,
    pub description: String,
    pub upvotes: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Idea {
    /// Create a new idea with a generated ID and both timestamps set to now.
    pub fn new(input: NewIdea) -> Self {
        Self::with_id(generate_id(), input, now())
    }

    /// Create an idea with an explicit ID and creation instant.
    pub fn with_id(id: String, input: NewIdea, at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: input.title,
            description: input.description,
            upvotes: 0,
            created_at: at,
            updated_at: at,
        }
    }

    /// Add one vote.
    pub fn upvote(&mut self, at: DateTime<Utc>) {
        self.upvotes = self.upvotes.saturating_add(1);
        self.updated_at = at;
    }

    /// Overwrite the fields present in `changes`.
    pub fn apply(&mut self, changes: &IdeaChanges, at: DateTime<Utc>) {
        if let Some(title) = &changes.title {
            self.title = title.clone();
        }
        if let Some(description) = &changes.description {
            self.description = description.clone();
        }
        self.updated_at = at;
    }
}

/// Current time at the precision the store persists (microseconds).
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Random fixed-length (32 char) lowercase hex identifier.
pub fn generate_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Validated input for creating an idea.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIdea {
    title: String,
    description: String,
}

impl NewIdea {
    /// Sanitize and validate raw user input.
    pub fn parse(title: &str, description: &str) -> Result<Self, DomainError> {
        Ok(Self {
            title: clean_field("title", title, TITLE_MAX_CHARS)?,
            description: clean_field("description", description, DESCRIPTION_MAX_CHARS)?,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Validated partial edit of an idea. At least one field is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdeaChanges {
    title: Option<String>,
    description: Option<String>,
}

impl IdeaChanges {
    pub fn parse(title: Option<&str>, description: Option<&str>) -> Result<Self, DomainError> {
        if title.is_none() && description.is_none() {
            return Err(DomainError::Validation(
                "At least one of title or description is required".to_string(),
            ));
        }

        Ok(Self {
            title: title
                .map(|t| clean_field("title", t, TITLE_MAX_CHARS))
                .transpose()?,
            description: description
                .map(|d| clean_field("description", d, DESCRIPTION_MAX_CHARS))
                .transpose()?,
        })
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}
