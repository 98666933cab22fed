//! The `@mention` autocomplete state machine.
//!
//! `MentionAutocomplete` turns input changes into debounced, cached user
//! lookups and lets the user pick a result by keyboard or pointer. All of its
//! methods are called from the owner's event loop; the debounce timer and the
//! search run as tokio tasks and report back as [`MentionEvent`]s, which the
//! owner hands to [`MentionAutocomplete::handle_event`].
//!
//! Guarantees:
//!
//! 1. A bare `@` is resolved immediately; longer queries wait for the
//!    debounce window and only the latest query per surface is looked up.
//! 2. A cached query (case-insensitive) never hits the network.
//! 3. Results are applied only while the query they were issued for is
//!    still the surface's active query.
//! 4. Only one surface owns the suggestion list at a time.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;
use tracing::warn;
use wiki_user_search::SearchError;
use wiki_user_search::UserSearchService;
use wiki_user_search::UserSummary;

use crate::cache::SuggestionCache;
use crate::config::MentionConfig;
use crate::debounce::Debouncer;
use crate::event::MentionEvent;
use crate::event::MentionEventSender;
use crate::key::KeyDisposition;
use crate::key::MentionKey;
use crate::placement::AnchorRect;
use crate::state::InteractionState;
use crate::state::MentionQuery;
use crate::state::Status;
use crate::surface::SurfaceId;
use crate::surface::TextInputSurface;
use crate::token::mention_edit;
use crate::token::mention_token_before_cursor;
use crate::view::SuggestionListView;

/// Where a pointer press landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    Surface(SurfaceId),
    SuggestionList,
    Elsewhere,
}

pub struct MentionAutocomplete<V: SuggestionListView> {
    config: MentionConfig,
    service: Arc<dyn UserSearchService>,
    view: V,
    cache: SuggestionCache,
    states: HashMap<SurfaceId, InteractionState>,
    anchors: HashMap<SurfaceId, AnchorRect>,
    debouncer: Debouncer,
    app_tx: MentionEventSender,
    /// Surface the suggestion list is currently attached to.
    view_owner: Option<SurfaceId>,
}

impl<V: SuggestionListView> MentionAutocomplete<V> {
    pub fn new(
        config: MentionConfig,
        service: Arc<dyn UserSearchService>,
        view: V,
        tx: MentionEventSender,
    ) -> Self {
        Self {
            config,
            service,
            view,
            cache: SuggestionCache::new(),
            states: HashMap::new(),
            anchors: HashMap::new(),
            debouncer: Debouncer::new(tx.clone()),
            app_tx: tx,
            view_owner: None,
        }
    }

    pub fn config(&self) -> &MentionConfig {
        &self.config
    }

    pub fn state(&self, surface: SurfaceId) -> Option<&InteractionState> {
        self.states.get(&surface)
    }

    pub fn status(&self, surface: SurfaceId) -> Status {
        self.states
            .get(&surface)
            .map(|s| s.status)
            .unwrap_or_default()
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn cache(&self) -> &SuggestionCache {
        &self.cache
    }

    /// Surface the suggestion list is attached to, if it is open.
    pub fn bound_surface(&self) -> Option<SurfaceId> {
        self.view_owner
    }

    /// Convenience wrapper over [`Self::on_input_changed`] that reads the
    /// surface directly and ignores text before its completion floor.
    pub fn on_surface_changed(&mut self, surface: &dyn TextInputSurface) {
        let id = surface.id();
        self.anchors.insert(id, surface.caret_anchor());
        let text = surface.text();
        let cursor = surface.cursor().min(text.len());
        let floor = surface.completion_floor().min(cursor);
        match text.get(floor..) {
            Some(tail) => self.on_input_changed(id, tail, cursor - floor),
            None => self.on_input_changed(id, text, cursor),
        }
    }

    /// React to new content on `surface`.
    pub fn on_input_changed(&mut self, surface: SurfaceId, text: &str, cursor: usize) {
        let Some(token) = mention_token_before_cursor(text, cursor) else {
            self.dismiss(surface);
            return;
        };
        if token.prefix.chars().count() < self.config.min_query_chars {
            self.dismiss(surface);
            return;
        }

        let query = MentionQuery::new(token.prefix, surface);
        let state = self.states.entry(surface).or_default();
        if state.is_current(&query) {
            // Cursor moved or an unrelated edit; the token is unchanged.
            return;
        }
        let was_open = matches!(state.status, Status::Showing | Status::Error);
        state.begin_query(query.clone());
        self.attach_view(surface);

        if query.prefix.is_empty() {
            self.debouncer.cancel(surface);
            let anchor = self.anchor(surface);
            self.view.render_loading();
            self.view.show(anchor);
            self.resolve_query(query);
        } else {
            if was_open {
                // Older candidates or the error no longer match the token.
                self.view.render_loading();
            }
            debug!("debouncing mention lookup for {:?}", query.prefix);
            self.debouncer.schedule(query, self.config.debounce());
        }
    }

    /// Look `query` up in the cache, falling back to the search service.
    pub fn resolve_query(&mut self, query: MentionQuery) {
        if !self.is_current(&query) {
            debug!("skipping lookup for superseded query {:?}", query.prefix);
            return;
        }
        if let Some(users) = self.cache.get(&query.prefix) {
            debug!("mention cache hit for {:?}", query.prefix);
            let users = users.to_vec();
            self.apply_candidates(&query, users);
            return;
        }
        self.spawn_search(query);
    }

    pub fn handle_event(&mut self, event: MentionEvent) {
        match event {
            MentionEvent::DebounceElapsed(query) => {
                self.debouncer.finish(query.source);
                self.resolve_query(query);
            }
            MentionEvent::SearchCompleted { query, result } => {
                self.on_search_completed(query, result);
            }
        }
    }

    /// Returns whether the key was consumed. Only a showing list intercepts
    /// keys.
    pub fn on_key_down(
        &mut self,
        surface: &mut dyn TextInputSurface,
        key: MentionKey,
    ) -> KeyDisposition {
        let id = surface.id();
        let Some(state) = self.states.get_mut(&id) else {
            return KeyDisposition::PassThrough;
        };
        if state.status != Status::Showing {
            return KeyDisposition::PassThrough;
        }

        match key {
            MentionKey::ArrowDown => {
                state.move_down();
                self.view.render(&state.candidates, state.highlighted_index);
                KeyDisposition::Consumed
            }
            MentionKey::ArrowUp => {
                state.move_up();
                self.view.render(&state.candidates, state.highlighted_index);
                KeyDisposition::Consumed
            }
            MentionKey::Enter | MentionKey::Tab => {
                if let Some(candidate) = state.highlighted().cloned() {
                    self.commit_selection(surface, &candidate);
                }
                KeyDisposition::Consumed
            }
            MentionKey::Escape => {
                self.dismiss(id);
                KeyDisposition::Consumed
            }
            MentionKey::Other => KeyDisposition::PassThrough,
        }
    }

    /// A row of the suggestion list was clicked.
    pub fn on_item_clicked(&mut self, surface: &mut dyn TextInputSurface, index: usize) {
        let candidate = self
            .states
            .get(&surface.id())
            .filter(|s| s.status == Status::Showing)
            .and_then(|s| s.candidates.get(index))
            .cloned();
        match candidate {
            Some(candidate) => self.commit_selection(surface, &candidate),
            None => debug!("ignoring click on suggestion {index}"),
        }
    }

    /// Replace the in-progress token on `surface` with `@username `.
    pub fn commit_selection(&mut self, surface: &mut dyn TextInputSurface, candidate: &UserSummary) {
        let id = surface.id();
        let bound = self.states.get(&id).and_then(|s| s.bound_surface);
        if bound != Some(id) {
            warn!("commit for {id:?} without a bound suggestion list; ignoring");
            return;
        }
        match mention_edit(surface.text(), surface.cursor(), &candidate.username) {
            Some(edit) => surface.insert_mention(&edit),
            None => warn!("no @token before the cursor on {id:?}; nothing to replace"),
        }
        self.dismiss(id);
    }

    pub fn on_pointer_down(&mut self, target: PointerTarget) {
        match target {
            PointerTarget::SuggestionList => {}
            PointerTarget::Surface(id) if self.view_owner == Some(id) => {}
            PointerTarget::Surface(_) | PointerTarget::Elsewhere => {
                if let Some(owner) = self.view_owner {
                    self.dismiss(owner);
                }
            }
        }
    }

    fn on_search_completed(
        &mut self,
        query: MentionQuery,
        result: Result<Vec<UserSummary>, SearchError>,
    ) {
        match result {
            Ok(mut users) => {
                if users.len() > self.config.max_results {
                    debug!(
                        "trimming {} users for {:?} to {}",
                        users.len(),
                        query.prefix,
                        self.config.max_results
                    );
                    users.truncate(self.config.max_results);
                }
                self.cache.insert(&query.prefix, users.clone());
                self.apply_candidates(&query, users);
            }
            Err(err) => {
                warn!("user search for {:?} failed: {err}", query.prefix);
                if !self.is_current(&query) {
                    return;
                }
                if let Some(state) = self.states.get_mut(&query.source) {
                    state.fail();
                }
                let anchor = self.anchor(query.source);
                self.view.render_error();
                self.view.show(anchor);
            }
        }
    }

    fn apply_candidates(&mut self, query: &MentionQuery, users: Vec<UserSummary>) {
        if !self.is_current(query) {
            debug!("dropping stale results for {:?}", query.prefix);
            return;
        }
        if users.is_empty() {
            self.dismiss(query.source);
            return;
        }
        let anchor = self.anchor(query.source);
        if let Some(state) = self.states.get_mut(&query.source) {
            state.show(users);
            self.view.render(&state.candidates, state.highlighted_index);
            self.view.show(anchor);
        }
    }

    fn spawn_search(&self, query: MentionQuery) {
        debug!("searching users for {:?}", query.prefix);
        let service = Arc::clone(&self.service);
        let tx = self.app_tx.clone();
        let limit = self.config.max_results;
        tokio::spawn(async move {
            let result = service.search(&query.prefix, limit).await;
            tx.send(MentionEvent::SearchCompleted { query, result });
        });
    }

    fn is_current(&self, query: &MentionQuery) -> bool {
        self.states
            .get(&query.source)
            .is_some_and(|s| s.is_current(query))
    }

    fn anchor(&self, surface: SurfaceId) -> AnchorRect {
        self.anchors.get(&surface).copied().unwrap_or_default()
    }

    /// Point the shared list at `surface`, releasing whichever surface had it.
    fn attach_view(&mut self, surface: SurfaceId) {
        match self.view_owner {
            Some(previous) if previous != surface => {
                self.debouncer.cancel(previous);
                if let Some(state) = self.states.get_mut(&previous) {
                    state.reset();
                }
                self.view.hide();
            }
            _ => {}
        }
        self.view_owner = Some(surface);
    }

    fn dismiss(&mut self, surface: SurfaceId) {
        self.debouncer.cancel(surface);
        if let Some(state) = self.states.get_mut(&surface) {
            state.reset();
        }
        if self.view_owner == Some(surface) {
            self.view.hide();
            self.view_owner = None;
        }
    }
}
