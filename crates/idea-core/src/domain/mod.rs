//! Domain entities - the core business objects.

mod idea;
mod query;
mod text;

pub use idea::{Idea, IdeaChanges, NewIdea, generate_id, now};
pub use query::{DEFAULT_LIMIT, ListIdeas, SortBy, SortOrder};
pub use text::{DESCRIPTION_MAX_CHARS, TITLE_MAX_CHARS, sanitize_text};
