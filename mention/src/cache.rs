use std::collections::HashMap;

use wiki_user_search::UserSummary;

/// Search results keyed by lowercased query.
///
/// Entries live for the whole process and are never invalidated; results
/// for the same query are assumed stable within a session.
#[derive(Debug, Default)]
pub struct SuggestionCache {
    entries: HashMap<String, Vec<UserSummary>>,
}

impl SuggestionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, query: &str) -> Option<&[UserSummary]> {
        self.entries.get(&query.to_lowercase()).map(Vec::as_slice)
    }

    /// Last writer wins.
    pub fn insert(&mut self, query: &str, users: Vec<UserSummary>) {
        self.entries.insert(query.to_lowercase(), users);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
