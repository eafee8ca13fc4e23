//! Utility functions and helpers.

pub mod id;

/// Title-case a trimmed string: first character upper, remainder lower.
pub fn title_case(raw: &str) -> String {
    let trimmed = raw.trim();
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Lowercase and trim a search term.
pub fn to_key(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Drop one trailing `s`, if present.
pub fn strip_plural(key: &str) -> Option<&str> {
    key.strip_suffix('s').filter(|stem| !stem.is_empty())
}
