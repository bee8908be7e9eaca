//! Catalog name rules shared by tracks, artists and mixes.
//!
//! Titles are compared case-insensitively after trimming. Substring search
//! uses SQL `ILIKE`, so user input is escaped before being wrapped in `%`.

use crate::error::CoreError;

/// Maximum length for a track title.
pub const MAX_TITLE_LEN: usize = 300;

/// Maximum length for an artist name or mix title.
pub const MAX_NAME_LEN: usize = 200;

/// Maximum number of rows returned by a catalog search.
pub const SEARCH_RESULT_LIMIT: i64 = 50;

/// Trim a title and check it is non-empty and within `max_len` characters.
fn normalize(value: &str, what: &'static str, max_len: usize) -> Result<String, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::RequiredField { field: what });
    }
    let len = trimmed.chars().count();
    if len > max_len {
        return Err(CoreError::Validation(format!(
            "{what} too long: {len} chars (max {max_len})"
        )));
    }
    Ok(trimmed.to_string())
}

/// Normalize a track title for storage.
pub fn normalize_title(title: &str) -> Result<String, CoreError> {
    normalize(title, "title", MAX_TITLE_LEN)
}

/// Normalize an artist name for storage.
pub fn normalize_artist_name(name: &str) -> Result<String, CoreError> {
    normalize(name, "artist", MAX_NAME_LEN)
}

/// Normalize a mix title for storage.
pub fn normalize_mix_title(title: &str) -> Result<String, CoreError> {
    normalize(title, "mix", MAX_NAME_LEN)
}

/// Case-insensitive title equality after trimming.
pub fn titles_match(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

/// Whether any of `titles` exactly matches the search text.
///
/// Callers use this to offer the existing track instead of "Create new".
pub fn has_exact_match<'a>(titles: impl IntoIterator<Item = &'a str>, query: &str) -> bool {
    let query = query.trim();
    !query.is_empty() && titles.into_iter().any(|title| titles_match(title, query))
}

/// Build an `ILIKE` substring pattern, escaping `\`, `%` and `_`.
pub fn like_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for ch in query.trim().chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}
