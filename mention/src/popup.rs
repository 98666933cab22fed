use ratatui::buffer::Buffer;
use ratatui::layout::Constraint;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::style::Style;
use ratatui::style::Stylize;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Cell;
use ratatui::widgets::Row;
use ratatui::widgets::Table;
use ratatui::widgets::Widget;
use ratatui::widgets::WidgetRef;
use wiki_user_search::UserSummary;

use crate::placement::AnchorRect;
use crate::view::SuggestionListView;

/// Maximum number of suggestions shown in the popup.
pub const MAX_POPUP_ROWS: usize = 10;

const LOADING_TEXT: &str = "Searching users…";
const ERROR_TEXT: &str = "Search failed, try again";

#[derive(Debug, Clone, PartialEq)]
enum PopupContent {
    Loading,
    Error,
    Users {
        users: Vec<UserSummary>,
        highlighted: usize,
        /// First row drawn; keeps `highlighted` inside the visible window.
        scroll_top: usize,
    },
}

fn scroll_top_for(previous: usize, highlighted: usize, len: usize) -> usize {
    let visible = len.min(MAX_POPUP_ROWS);
    if visible == 0 {
        return 0;
    }
    let top = if highlighted < previous {
        highlighted
    } else if highlighted >= previous + visible {
        highlighted + 1 - visible
    } else {
        previous
    };
    top.min(len - visible)
}

/// Terminal rendering of the suggestion list.
#[derive(Debug, Clone, PartialEq)]
pub struct MentionPopup {
    content: PopupContent,
    anchor: Option<AnchorRect>,
}

impl Default for MentionPopup {
    fn default() -> Self {
        Self::new()
    }
}

impl MentionPopup {
    pub fn new() -> Self {
        Self {
            content: PopupContent::Loading,
            anchor: None,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.anchor.is_some()
    }

    pub fn anchor(&self) -> Option<AnchorRect> {
        self.anchor
    }

    /// Username on the highlighted row, if a list is displayed.
    pub fn highlighted_username(&self) -> Option<&str> {
        match &self.content {
            PopupContent::Users {
                users, highlighted, ..
            } => users.get(*highlighted).map(|u| u.username.as_str()),
            _ => None,
        }
    }

    /// Preferred height (rows) for the popup including borders.
    pub fn calculate_required_height(&self) -> u16 {
        let rows = match &self.content {
            PopupContent::Users { users, .. } => users.len().clamp(1, MAX_POPUP_ROWS),
            PopupContent::Loading | PopupContent::Error => 1,
        };
        rows as u16 + 2 /* border */
    }
}

impl SuggestionListView for MentionPopup {
    fn render(&mut self, candidates: &[UserSummary], highlighted_index: usize) {
        let previous = match &self.content {
            PopupContent::Users { scroll_top, .. } => *scroll_top,
            PopupContent::Loading | PopupContent::Error => 0,
        };
        self.content = PopupContent::Users {
            users: candidates.to_vec(),
            highlighted: highlighted_index,
            scroll_top: scroll_top_for(previous, highlighted_index, candidates.len()),
        };
    }

    fn render_loading(&mut self) {
        self.content = PopupContent::Loading;
    }

    fn render_error(&mut self) {
        self.content = PopupContent::Error;
    }

    fn show(&mut self, anchor: AnchorRect) {
        self.anchor = Some(anchor);
    }

    fn hide(&mut self) {
        self.anchor = None;
    }
}

impl WidgetRef for MentionPopup {
    fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        if !self.is_visible() {
            return;
        }

        let rows: Vec<Row> = match &self.content {
            PopupContent::Loading => vec![Row::new(vec![Cell::from(LOADING_TEXT).italic()])],
            PopupContent::Error => vec![Row::new(vec![Cell::from(ERROR_TEXT).red()])],
            PopupContent::Users {
                users,
                highlighted,
                scroll_top,
            } => users
                .iter()
                .enumerate()
                .skip(*scroll_top)
                .take(MAX_POPUP_ROWS)
                .map(|(idx, user)| {
                    let label = match &user.display_name {
                        Some(name) => format!("@{} ({name})", user.username),
                        None => format!("@{}", user.username),
                    };
                    let mut cell = Cell::from(label);
                    if idx == *highlighted {
                        cell = cell.reversed();
                    }
                    Row::new(vec![cell])
                })
                .collect(),
        };

        let table = Table::new(rows, &[Constraint::Percentage(100)])
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .column_spacing(1);

        table.render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use ratatui::style::Modifier;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (1..buf.area.width - 1)
            .map(|x| buf[(x, y)].symbol())
            .collect::<String>()
            .trim_end()
            .to_string()
    }

    fn rendered(popup: &MentionPopup, width: u16) -> Buffer {
        let area = Rect::new(0, 0, width, popup.calculate_required_height());
        let mut buf = Buffer::empty(area);
        popup.render_ref(area, &mut buf);
        buf
    }

    #[test]
    fn hidden_popup_draws_nothing() {
        let popup = MentionPopup::new();
        let buf = rendered(&popup, 20);
        assert_eq!(buf, Buffer::empty(buf.area));
    }

    #[test]
    fn renders_users_and_highlights_selection() {
        let mut popup = MentionPopup::new();
        SuggestionListView::render(
            &mut popup,
            &[
                UserSummary::new("alice").with_display_name("Alice"),
                UserSummary::new("bob"),
            ],
            1,
        );
        popup.show(AnchorRect::default());

        let buf = rendered(&popup, 24);
        assert_eq!(row_text(&buf, 1), "@alice (Alice)");
        assert_eq!(row_text(&buf, 2), "@bob");
        assert!(buf[(1, 2)].modifier.contains(Modifier::REVERSED));
        assert!(!buf[(1, 1)].modifier.contains(Modifier::REVERSED));
        assert_eq!(popup.highlighted_username(), Some("bob"));
    }

    #[test]
    fn renders_loading_and_error_placeholders() {
        let mut popup = MentionPopup::new();
        popup.show(AnchorRect::default());
        popup.render_loading();
        assert_eq!(row_text(&rendered(&popup, 30), 1), LOADING_TEXT);

        popup.render_error();
        assert_eq!(row_text(&rendered(&popup, 30), 1), ERROR_TEXT);
        assert_eq!(popup.calculate_required_height(), 3);
    }

    #[test]
    fn long_lists_are_capped() {
        let users: Vec<UserSummary> = (0..15).map(|i| UserSummary::new(format!("u{i}"))).collect();
        let mut popup = MentionPopup::new();
        SuggestionListView::render(&mut popup, &users, 0);
        assert_eq!(popup.calculate_required_height(), MAX_POPUP_ROWS as u16 + 2);
    }

    #[test]
    fn highlight_past_window_scrolls_into_view() {
        let users: Vec<UserSummary> = (0..15).map(|i| UserSummary::new(format!("u{i}"))).collect();
        let mut popup = MentionPopup::new();
        popup.show(AnchorRect::default());
        for idx in 0..=14 {
            SuggestionListView::render(&mut popup, &users, idx);
        }

        let buf = rendered(&popup, 12);
        assert_eq!(row_text(&buf, 1), "@u5");
        assert_eq!(row_text(&buf, MAX_POPUP_ROWS as u16), "@u14");
        assert!(
            buf[(1, MAX_POPUP_ROWS as u16)]
                .modifier
                .contains(Modifier::REVERSED)
        );
        assert_eq!(popup.highlighted_username(), Some("u14"));

        // Moving back up only scrolls once the highlight leaves the window.
        SuggestionListView::render(&mut popup, &users, 6);
        assert_eq!(row_text(&rendered(&popup, 12), 1), "@u5");
        SuggestionListView::render(&mut popup, &users, 2);
        assert_eq!(row_text(&rendered(&popup, 12), 1), "@u2");
    }
}
