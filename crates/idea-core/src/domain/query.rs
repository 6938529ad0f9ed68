//! Listing parameters: paging and ordering.

use std::cmp::Ordering;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use super::Idea;

/// Page size used when the caller does not supply one.
pub const DEFAULT_LIMIT: u64 = 50;

/// Largest accepted `limit` or `offset`. SQL binds both as signed 64-bit.
pub const MAX_PAGE_VALUE: u64 = i64::MAX as u64;

/// Column to order the list by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortBy {
    #[default]
    #[serde(rename = "createdAt", alias = "created_at")]
    CreatedAt,
    #[serde(rename = "upvotes")]
    Upvotes,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// A page request over the idea list.
///
/// Deserializes directly from the `limit`, `offset`, `sortBy` and `order`
/// query parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListIdeas {
    #[serde(default = "default_limit", deserialize_with = "bounded")]
    pub limit: u64,
    #[serde(default, deserialize_with = "bounded")]
    pub offset: u64,
    #[serde(default)]
    pub sort_by: SortBy,
    #[serde(default)]
    pub order: SortOrder,
}

fn default_limit() -> u64 {
    DEFAULT_LIMIT
}

fn bounded<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let value = u64::deserialize(deserializer)?;
    if value > MAX_PAGE_VALUE {
        return Err(D::Error::custom(format!(
            "must not exceed {MAX_PAGE_VALUE}"
        )));
    }
    Ok(value)
}

impl Default for ListIdeas {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
            sort_by: SortBy::default(),
            order: SortOrder::default(),
        }
    }
}

impl ListIdeas {
    /// Ordering of two ideas under this request.
    ///
    /// Ties on the sort column fall back to `created_at`, then `id`, in the
    /// same direction, matching the store's `ORDER BY`.
    pub fn compare(&self, a: &Idea, b: &Idea) -> Ordering {
        let primary = match self.sort_by {
            SortBy::CreatedAt => a.created_at.cmp(&b.created_at),
            SortBy::Upvotes => a.upvotes.cmp(&b.upvotes),
        };
        let ascending = primary
            .then_with(|| a.created_at.cmp(&b.created_at))
            .then_with(|| a.id.cmp(&b.id));

        match self.order {
            SortOrder::Asc => ascending,
            SortOrder::Desc => ascending.reverse(),
        }
    }

    /// Sort `ideas` and cut out the requested page.
    pub fn page(&self, mut ideas: Vec<Idea>) -> Vec<Idea> {
        ideas.sort_by(|a, b| self.compare(a, b));
        ideas
            .into_iter()
            .skip(usize::try_from(self.offset).unwrap_or(usize::MAX))
            .take(usize::try_from(self.limit).unwrap_or(usize::MAX))
            .collect()
    }
}
