//! Text sanitization and length rules for user-submitted fields.

use crate::error::DomainError;

/// Maximum length of an idea title, in characters.
pub const TITLE_MAX_CHARS: usize = 100;

/// Maximum length of an idea description, in characters.
pub const DESCRIPTION_MAX_CHARS: usize = 500;

/// Strip markup and normalise whitespace.
///
/// Complete `<...>` sequences are removed first, then any stray angle
/// bracket. Whitespace runs collapse to a single space and the result is
/// trimmed, so `"  a   b<script>  "` becomes `"a b"`.
pub fn sanitize_text(input: &str) -> String {
    let mut stripped = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(open) = rest.find('<') {
        stripped.push_str(&rest[..open]);
        let after_open = &rest[open + 1..];
        rest = match after_open.find('>') {
            Some(close) => &after_open[close + 1..],
            None => after_open,
        };
    }
    stripped.push_str(rest);
    stripped.retain(|c| c != '<' && c != '>');

    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Sanitize a field and check it holds between 1 and `max` characters.
pub(crate) fn clean_field(label: &str, raw: &str, max: usize) -> Result<String, DomainError> {
    let cleaned = sanitize_text(raw);
    let len = cleaned.chars().count();

    if len == 0 {
        return Err(DomainError::Validation(format!("Idea {label} is required")));
    }
    if len > max {
        return Err(DomainError::Validation(format!(
            "Idea {label} must be {max} characters or less"
        )));
    }

    Ok(cleaned)
}
