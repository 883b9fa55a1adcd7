//! In-session search history.

use std::collections::HashSet;

/// Insertion-ordered, deduplicated search history.
///
/// Entries are deduplicated by exact text and kept most-recent-last. A term
/// searched again keeps its original position. The history lives with the
/// presentation layer for the duration of a session and only feeds terms
/// back into new searches; it is never persisted.
#[derive(Debug, Default)]
pub struct SearchHistory {
    seen: HashSet<String>,
    entries: Vec<String>,
}

impl SearchHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `text`. Returns false when the exact term is already present
    /// or the trimmed text is empty.
    pub fn record(&mut self, text: &str) -> bool {
        let trimmed = text.trim();
        if trimmed.is_empty() || !self.seen.insert(trimmed.to_string()) {
            return false;
        }
        self.entries.push(trimmed.to_string());
        true
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
