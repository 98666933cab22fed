//! Per-surface interaction state and its transitions.
//!
//! Nothing in here performs I/O; [`crate::MentionAutocomplete`] drives these
//! transitions in response to input, timers and search results.

use wiki_user_search::UserSummary;

use crate::surface::SurfaceId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Idle,
    /// Waiting for the debounce timer or for search results.
    Pending,
    Showing,
    Error,
}

/// The text typed after `@` on a particular surface.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MentionQuery {
    pub prefix: String,
    pub source: SurfaceId,
}

impl MentionQuery {
    pub fn new(prefix: impl Into<String>, source: SurfaceId) -> Self {
        Self {
            prefix: prefix.into(),
            source,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InteractionState {
    pub status: Status,
    pub active_query: Option<MentionQuery>,
    /// Empty unless `status` is `Showing`.
    pub candidates: Vec<UserSummary>,
    /// Meaningful only while `Showing`.
    pub highlighted_index: usize,
    pub bound_surface: Option<SurfaceId>,
}

impl InteractionState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Start tracking `query`, superseding whatever was tracked before.
    pub fn begin_query(&mut self, query: MentionQuery) {
        self.status = Status::Pending;
        self.bound_surface = Some(query.source);
        self.active_query = Some(query);
        self.candidates.clear();
        self.highlighted_index = 0;
    }

    /// Whether results for `query` may still be applied.
    pub fn is_current(&self, query: &MentionQuery) -> bool {
        self.status != Status::Idle && self.active_query.as_ref() == Some(query)
    }

    /// Show `candidates` with the first one highlighted. An empty list has
    /// nothing to offer, so the state goes back to idle instead.
    pub fn show(&mut self, candidates: Vec<UserSummary>) {
        if candidates.is_empty() {
            self.reset();
            return;
        }
        self.status = Status::Showing;
        self.candidates = candidates;
        self.highlighted_index = 0;
    }

    pub fn fail(&mut self) {
        self.status = Status::Error;
        self.candidates.clear();
        self.highlighted_index = 0;
    }

    pub fn move_down(&mut self) {
        let last = self.candidates.len().saturating_sub(1);
        self.highlighted_index = (self.highlighted_index + 1).min(last);
    }

    pub fn move_up(&mut self) {
        self.highlighted_index = self.highlighted_index.saturating_sub(1);
    }

    pub fn highlighted(&self) -> Option<&UserSummary> {
        if self.status != Status::Showing {
            return None;
        }
        self.candidates.get(self.highlighted_index)
    }
}
