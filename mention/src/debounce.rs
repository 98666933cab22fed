//! Per-surface debounce for `@` lookups.
//!
//! Every keystroke that changes a surface's `@token` schedules a lookup. A
//! newer schedule for the same surface aborts the older timer, so only the
//! latest query survives the quiet period. Searches already in flight are
//! not touched; their results are filtered by the caller.

use std::collections::HashMap;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::event::MentionEvent;
use crate::event::MentionEventSender;
use crate::state::MentionQuery;
use crate::surface::SurfaceId;

/// Handle to a timer started by [`schedule`]. Dropping it leaves the timer
/// running; call [`ScheduledTask::cancel`] to stop it.
#[derive(Debug)]
pub struct ScheduledTask {
    handle: JoinHandle<()>,
}

impl ScheduledTask {
    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

/// Deliver `event` through `tx` once `delay` has passed.
///
/// Must be called from within a tokio runtime.
pub fn schedule(delay: Duration, event: MentionEvent, tx: MentionEventSender) -> ScheduledTask {
    let handle = tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        tx.send(event);
    });
    ScheduledTask { handle }
}

pub(crate) struct Debouncer {
    pending: HashMap<SurfaceId, ScheduledTask>,
    tx: MentionEventSender,
}

impl Debouncer {
    pub(crate) fn new(tx: MentionEventSender) -> Self {
        Self {
            pending: HashMap::new(),
            tx,
        }
    }

    /// Replace any pending lookup for `query.source` with one for `query`.
    pub(crate) fn schedule(&mut self, query: MentionQuery, delay: Duration) {
        let surface = query.source;
        self.cancel(surface);
        let task = schedule(delay, MentionEvent::DebounceElapsed(query), self.tx.clone());
        self.pending.insert(surface, task);
    }

    pub(crate) fn cancel(&mut self, surface: SurfaceId) {
        if let Some(task) = self.pending.remove(&surface) {
            task.cancel();
        }
    }

    /// Forget the timer for `surface` after its event was delivered.
    pub(crate) fn finish(&mut self, surface: SurfaceId) {
        if self
            .pending
            .get(&surface)
            .is_some_and(ScheduledTask::is_finished)
        {
            self.pending.remove(&surface);
        }
    }

    #[cfg(test)]
    pub(crate) fn has_pending(&self, surface: SurfaceId) -> bool {
        self.pending.get(&surface).is_some_and(|t| !t.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        for task in self.pending.values() {
            task.cancel();
        }
    }
}
