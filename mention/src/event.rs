use tokio::sync::mpsc::UnboundedSender;
use wiki_user_search::SearchError;
use wiki_user_search::UserSummary;

use crate::state::MentionQuery;

/// Completions of the autocomplete's background work. The owner of the
/// event loop feeds these back through
/// [`crate::MentionAutocomplete::handle_event`].
#[derive(Debug)]
pub enum MentionEvent {
    /// The quiet period for `query` ended without a newer keystroke.
    DebounceElapsed(MentionQuery),

    /// A search issued for `query` finished.
    SearchCompleted {
        query: MentionQuery,
        result: Result<Vec<UserSummary>, SearchError>,
    },
}

#[derive(Clone, Debug)]
pub struct MentionEventSender {
    tx: UnboundedSender<MentionEvent>,
}

impl MentionEventSender {
    pub fn new(tx: UnboundedSender<MentionEvent>) -> Self {
        Self { tx }
    }

    /// Send an event to the owner's channel. If it fails, we swallow the
    /// error and log it.
    pub fn send(&self, event: MentionEvent) {
        if let Err(e) = self.tx.send(event) {
            tracing::error!("failed to send mention event: {e}");
        }
    }
}
