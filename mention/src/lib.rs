//! `@mention` autocomplete for text inputs.
//!
//! [`MentionAutocomplete`] watches one or more [`TextInputSurface`]s, looks
//! up users through a [`wiki_user_search::UserSearchService`] and drives a
//! [`SuggestionListView`]. [`MentionPopup`] is a ratatui rendering of that
//! view.

mod autocomplete;
mod cache;
mod config;
pub mod debounce;
mod event;
mod key;
mod mentions;
mod placement;
mod popup;
mod state;
mod surface;
mod textarea;
mod token;
mod view;

pub use autocomplete::MentionAutocomplete;
pub use autocomplete::PointerTarget;
pub use cache::SuggestionCache;
pub use config::ConfigError;
pub use config::DEFAULT_API_BASE_URL;
pub use config::DEFAULT_DEBOUNCE_MS;
pub use config::DEFAULT_MAX_RESULTS;
pub use config::MentionConfig;
pub use event::MentionEvent;
pub use event::MentionEventSender;
pub use key::KeyDisposition;
pub use key::MentionKey;
pub use mentions::extract_mentions;
pub use mentions::linkify_mentions;
pub use placement::AnchorRect;
pub use placement::Placement;
pub use placement::place_popup;
pub use popup::MAX_POPUP_ROWS;
pub use popup::MentionPopup;
pub use state::InteractionState;
pub use state::MentionQuery;
pub use state::Status;
pub use surface::PlainTextSurface;
pub use surface::SurfaceId;
pub use surface::TextInputSurface;
pub use textarea::MentionTextArea;
pub use token::MentionEdit;
pub use token::MentionToken;
pub use token::clamp_to_char_boundary;
pub use token::mention_edit;
pub use token::mention_token_before_cursor;
pub use view::SuggestionListView;
pub use wiki_user_search::UserSummary;
