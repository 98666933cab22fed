//! Rich text input where committed mentions behave as single atomic units.
//!
//! Once a mention is inserted it is tracked as an element: the cursor never
//! lands inside it, an edit that touches it swallows the whole element, and
//! Backspace right after it removes it in one step.

use std::ops::Range;

use crate::placement::AnchorRect;
use crate::surface::SurfaceId;
use crate::surface::TextInputSurface;
use crate::token::MentionEdit;
use crate::token::clamp_to_char_boundary;

#[derive(Debug, Clone, PartialEq)]
pub struct MentionTextArea {
    id: SurfaceId,
    text: String,
    cursor_pos: usize,
    /// Byte ranges of committed mentions, sorted and non-overlapping.
    elements: Vec<Range<usize>>,
    anchor: AnchorRect,
}

impl MentionTextArea {
    pub fn new(id: SurfaceId) -> Self {
        Self {
            id,
            text: String::new(),
            cursor_pos: 0,
            elements: Vec::new(),
            anchor: AnchorRect::default(),
        }
    }

    pub fn set_anchor(&mut self, anchor: AnchorRect) {
        self.anchor = anchor;
    }

    /// Usernames of the committed mentions, in text order.
    pub fn mentions(&self) -> Vec<&str> {
        self.elements
            .iter()
            .map(|r| &self.text[r.start + 1..r.end])
            .collect()
    }

    pub fn insert_str(&mut self, text: &str) {
        let pos = self.clamp_pos_to_nearest_boundary(self.cursor_pos);
        self.replace_range_raw(pos..pos, text);
        self.cursor_pos = pos + text.len();
    }

    /// Delete one char before the cursor, or the whole mention that ends
    /// exactly at the cursor.
    pub fn delete_backward(&mut self) {
        if self.cursor_pos == 0 {
            return;
        }
        let start = match self.elements.iter().find(|e| e.end == self.cursor_pos) {
            Some(element) => element.start,
            None => self.text[..self.cursor_pos]
                .char_indices()
                .next_back()
                .map(|(idx, _)| idx)
                .unwrap_or(0),
        };
        let end = self.cursor_pos;
        self.replace_range_raw(start..end, "");
    }

    fn element_containing(&self, pos: usize) -> Option<&Range<usize>> {
        self.elements.iter().find(|e| e.start < pos && pos < e.end)
    }

    fn clamp_pos_to_nearest_boundary(&self, pos: usize) -> usize {
        match self.element_containing(pos) {
            Some(e) if pos - e.start <= e.end - pos => e.start,
            Some(e) => e.end,
            None => pos,
        }
    }

    fn expand_range_to_element_boundaries(&self, range: Range<usize>) -> Range<usize> {
        let start = self
            .element_containing(range.start)
            .map_or(range.start, |e| e.start);
        let end = self
            .element_containing(range.end)
            .map_or(range.end, |e| e.end);
        start..end.max(start)
    }

    fn replace_range_raw(&mut self, range: Range<usize>, text: &str) {
        let start = clamp_to_char_boundary(&self.text, range.start);
        let end = clamp_to_char_boundary(&self.text, range.end.max(start));
        let removed_len = end - start;
        let inserted_len = text.len();
        if removed_len == 0 && inserted_len == 0 {
            return;
        }

        self.text.replace_range(start..end, text);
        self.update_elements_after_replace(start, end, inserted_len);

        self.cursor_pos = if self.cursor_pos < start {
            self.cursor_pos
        } else if self.cursor_pos <= end {
            start + inserted_len
        } else {
            self.cursor_pos + inserted_len - removed_len
        }
        .min(self.text.len());
        self.cursor_pos = self.clamp_pos_to_nearest_boundary(self.cursor_pos);
    }

    fn update_elements_after_replace(&mut self, start: usize, end: usize, inserted_len: usize) {
        let removed_len = end - start;
        self.elements
            .retain(|e| removed_len == 0 || e.end <= start || e.start >= end);
        for e in &mut self.elements {
            if e.start >= end {
                e.start = e.start + inserted_len - removed_len;
                e.end = e.end + inserted_len - removed_len;
            }
        }
    }
}

impl TextInputSurface for MentionTextArea {
    fn id(&self) -> SurfaceId {
        self.id
    }

    fn text(&self) -> &str {
        &self.text
    }

    fn cursor(&self) -> usize {
        self.cursor_pos
    }

    fn replace_range(&mut self, range: Range<usize>, text: &str) {
        let range = self.expand_range_to_element_boundaries(range);
        self.replace_range_raw(range, text);
    }

    fn set_cursor(&mut self, pos: usize) {
        let pos = clamp_to_char_boundary(&self.text, pos);
        self.cursor_pos = self.clamp_pos_to_nearest_boundary(pos);
    }

    fn caret_anchor(&self) -> AnchorRect {
        self.anchor
    }

    fn completion_floor(&self) -> usize {
        self.elements
            .iter()
            .map(|e| e.end)
            .filter(|&end| end <= self.cursor_pos)
            .max()
            .unwrap_or(0)
    }

    fn insert_mention(&mut self, edit: &MentionEdit) {
        let range = self.expand_range_to_element_boundaries(edit.range.clone());
        let start = range.start;
        self.replace_range_raw(range, &edit.replacement());
        let element = start..start + 1 + edit.username.len();
        let idx = self.elements.partition_point(|e| e.start < element.start);
        self.elements.insert(idx, element);
        self.set_cursor(start + edit.replacement().len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::mention_edit;
    use pretty_assertions::assert_eq;

    fn with_mention(before: &str, username: &str) -> MentionTextArea {
        let mut area = MentionTextArea::new(SurfaceId(7));
        area.insert_str(before);
        let edit = mention_edit(area.text(), area.cursor(), username)
            .unwrap_or_else(|| panic!("no token in {before:?}"));
        area.insert_mention(&edit);
        area
    }

    #[test]
    fn committed_mention_becomes_element() {
        let area = with_mention("hi @bo", "bob");
        assert_eq!(area.text(), "hi @bob ");
        assert_eq!(area.cursor(), 8);
        assert_eq!(area.mentions(), vec!["bob"]);
    }

    #[test]
    fn backspace_after_mention_removes_it_whole() {
        let mut area = with_mention("hi @bo", "bob");
        area.delete_backward(); // trailing space
        assert_eq!(area.text(), "hi @bob");
        area.delete_backward();
        assert_eq!(area.text(), "hi ");
        assert_eq!(area.cursor(), 3);
        assert!(area.mentions().is_empty());
    }

    #[test]
    fn cursor_never_lands_inside_mention() {
        let mut area = with_mention("@al", "alice");
        area.set_cursor(2);
        assert_eq!(area.cursor(), 0);
        area.set_cursor(5);
        assert_eq!(area.cursor(), 6);
    }

    #[test]
    fn completion_floor_skips_finished_mention() {
        let mut area = with_mention("@bo", "bob");
        area.delete_backward();
        assert_eq!(area.text(), "@bob");
        assert_eq!(area.completion_floor(), 4);
    }

    #[test]
    fn edits_before_mention_shift_it() {
        let mut area = with_mention("@ca", "carol");
        area.set_cursor(0);
        area.insert_str("cc ");
        assert_eq!(area.text(), "cc @carol ");
        assert_eq!(area.mentions(), vec!["carol"]);
    }

    #[test]
    fn replace_touching_mention_expands_to_whole_element() {
        let mut area = with_mention("@da", "dave");
        area.replace_range(2..3, "");
        assert_eq!(area.text(), " ");
        assert!(area.mentions().is_empty());
    }
}
