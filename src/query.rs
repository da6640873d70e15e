//! Search query normalization.

use std::fmt;

/// A normalized search term: trimmed and lowercased.
///
/// This is the only form in which user input reaches the denylist or the
/// upstream API.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchQuery {
    normalized: String,
}

impl SearchQuery {
    /// Normalize raw user input.
    pub fn new(raw: &str) -> Self {
        Self { normalized: normalize(raw) }
    }

    pub fn as_str(&self) -> &str {
        &self.normalized
    }

    /// True when nothing but whitespace was typed.
    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.normalized)
    }
}

impl AsRef<str> for SearchQuery {
    fn as_ref(&self) -> &str {
        &self.normalized
    }
}

/// Trim surrounding whitespace and case-fold to lowercase.
pub(crate) fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}
