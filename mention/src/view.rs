use wiki_user_search::UserSummary;

use crate::placement::AnchorRect;

/// The floating list of suggestions. Clicks on an item are reported back
/// through [`crate::MentionAutocomplete::on_item_clicked`].
pub trait SuggestionListView {
    fn render(&mut self, candidates: &[UserSummary], highlighted_index: usize);

    /// Placeholder shown while a bare `@` is being resolved.
    fn render_loading(&mut self);

    fn render_error(&mut self);

    fn show(&mut self, anchor: AnchorRect);

    fn hide(&mut self);
}
