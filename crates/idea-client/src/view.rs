//! Plain-text presentation of board entries.

use chrono::{DateTime, Utc};
use idea_core::Idea;
use idea_core::domain::{DESCRIPTION_MAX_CHARS, TITLE_MAX_CHARS};

use crate::board::Sourced;

/// `"1 vote"`, `"2 votes"`.
pub fn pluralize(count: u32, word: &str) -> String {
    if count == 1 {
        format!("{count} {word}")
    } else {
        format!("{count} {word}s")
    }
}

/// Age of `ts` relative to `now`, coarsened to the largest whole unit.
///
/// Anything older than a week is shown as a calendar date.
pub fn format_relative(ts: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(ts);

    if elapsed.num_minutes() < 1 {
        "just now".to_string()
    } else if elapsed.num_hours() < 1 {
        format!("{}m ago", elapsed.num_minutes())
    } else if elapsed.num_days() < 1 {
        format!("{}h ago", elapsed.num_hours())
    } else if elapsed.num_days() <= 7 {
        format!("{}d ago", elapsed.num_days())
    } else {
        ts.format("%b %-d, %Y").to_string()
    }
}

/// Render one entry as a text card.
pub fn render_card(entry: &Sourced<Idea>, now: DateTime<Utc>) -> String {
    let idea = entry.get();
    let mut header = format!(
        "[{}] {}",
        pluralize(idea.upvotes, "vote"),
        idea.title
    );
    if entry.is_local() {
        header.push_str(" (offline)");
    }

    format!(
        "{header}\n{}\n{}",
        idea.description,
        format_relative(idea.created_at, now)
    )
}

/// Why an idea form cannot be submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormError {
    Empty,
    TooLong,
}

/// Input state of the "new idea" form.
///
/// The form collects one block of text; the first line becomes the title
/// and the rest the description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdeaForm {
    pub text: String,
}

impl IdeaForm {
    pub const MAX_CHARS: usize = DESCRIPTION_MAX_CHARS;

    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn validate(&self) -> Result<(), FormError> {
        let trimmed = self.text.trim();
        if trimmed.is_empty() {
            Err(FormError::Empty)
        } else if trimmed.chars().count() > Self::MAX_CHARS {
            Err(FormError::TooLong)
        } else {
            Ok(())
        }
    }

    /// Characters left before the limit; negative once over it.
    pub fn remaining_chars(&self) -> i64 {
        Self::MAX_CHARS as i64 - self.text.chars().count() as i64
    }

    /// Split the text into `(title, description)`.
    ///
    /// A single line is used for both. Titles are cut to the title limit.
    pub fn split(&self) -> Result<(String, String), FormError> {
        self.validate()?;
        let trimmed = self.text.trim();

        let (title, description) = match trimmed.split_once('\n') {
            Some((title, rest)) if !rest.trim().is_empty() => (title.trim(), rest.trim()),
            _ => (trimmed, trimmed),
        };
        let title: String = title.chars().take(TITLE_MAX_CHARS).collect();

        Ok((title.trim_end().to_string(), description.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(secs_ago: i64, now: DateTime<Utc>) -> DateTime<Utc> {
        now - Duration::seconds(secs_ago)
    }

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize(0, "vote"), "0 votes");
        assert_eq!(pluralize(1, "vote"), "1 vote");
        assert_eq!(pluralize(2, "vote"), "2 votes");
    }

    #[test]
    fn test_format_relative() {
        let now = Utc.with_ymd_and_hms(2025, 3, 20, 12, 0, 0).unwrap();

        assert_eq!(format_relative(at(30, now), now), "just now");
        assert_eq!(format_relative(at(5 * 60, now), now), "5m ago");
        assert_eq!(format_relative(at(3 * 3600, now), now), "3h ago");
        assert_eq!(format_relative(at(2 * 86_400, now), now), "2d ago");
        assert_eq!(format_relative(at(7 * 86_400, now), now), "7d ago");
        assert_eq!(format_relative(at(30 * 86_400, now), now), "Feb 18, 2025");
    }

    #[test]
    fn test_render_card_marks_offline_entries() {
        let now = Utc.with_ymd_and_hms(2025, 3, 20, 12, 0, 0).unwrap();
        let idea = Idea {
            id: "1".to_string(),
            title: "Coffee Shop Finder".to_string(),
            description: "Find coffee".to_string(),
            upvotes: 1,
            created_at: at(120, now),
            updated_at: at(120, now),
        };

        let remote = render_card(&Sourced::Remote(idea.clone()), now);
        assert_eq!(remote, "[1 vote] Coffee Shop Finder\nFind coffee\n2m ago");

        let local = render_card(&Sourced::LocalOnly(idea), now);
        assert!(local.starts_with("[1 vote] Coffee Shop Finder (offline)\n"));
    }

    #[test]
    fn test_form_validation() {
        assert_eq!(IdeaForm::new("   ").validate(), Err(FormError::Empty));
        assert_eq!(IdeaForm::new("x".repeat(500)).validate(), Ok(()));
        assert_eq!(IdeaForm::new("x".repeat(501)).validate(), Err(FormError::TooLong));
        assert_eq!(IdeaForm::new("hello").remaining_chars(), 495);
        assert_eq!(IdeaForm::new("x".repeat(502)).remaining_chars(), -2);
    }

    #[test]
    fn test_form_split() {
        let (title, description) = IdeaForm::new("Title\n\nLonger pitch").split().unwrap();
        assert_eq!(title, "Title");
        assert_eq!(description, "Longer pitch");

        let (title, description) = IdeaForm::new("  One liner ").split().unwrap();
        assert_eq!(title, "One liner");
        assert_eq!(description, "One liner");

        let (title, description) = IdeaForm::new("y".repeat(300)).split().unwrap();
        assert_eq!(title.chars().count(), TITLE_MAX_CHARS);
        assert_eq!(description.len(), 300);
    }
}
