use std::ops::Range;

use crate::placement::AnchorRect;
use crate::token::MentionEdit;
use crate::token::clamp_to_char_boundary;

/// Identity of a text input taking part in mention completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(pub u64);

/// The editable text the autocomplete reads from and writes back to.
///
/// Offsets are byte offsets into [`TextInputSurface::text`].
pub trait TextInputSurface {
    fn id(&self) -> SurfaceId;

    fn text(&self) -> &str;

    fn cursor(&self) -> usize;

    fn replace_range(&mut self, range: Range<usize>, text: &str);

    fn set_cursor(&mut self, pos: usize);

    /// Caret rectangle used to anchor the suggestion list.
    fn caret_anchor(&self) -> AnchorRect {
        AnchorRect::default()
    }

    /// Offset before which text can no longer be part of an `@token`.
    /// Surfaces with atomic mentions report the end of the one touching the
    /// cursor so a finished mention is not completed again.
    fn completion_floor(&self) -> usize {
        0
    }

    /// Splice a finished mention over the in-progress token.
    fn insert_mention(&mut self, edit: &MentionEdit) {
        self.replace_range(edit.range.clone(), &edit.replacement());
        self.set_cursor(edit.cursor_after());
    }
}

/// Plain text box: a string and a cursor.
#[derive(Debug, Clone, PartialEq)]
pub struct PlainTextSurface {
    id: SurfaceId,
    text: String,
    cursor_pos: usize,
    anchor: AnchorRect,
}

impl PlainTextSurface {
    pub fn new(id: SurfaceId) -> Self {
        Self {
            id,
            text: String::new(),
            cursor_pos: 0,
            anchor: AnchorRect::default(),
        }
    }

    /// Surface holding `text` with the cursor at its end.
    pub fn with_text(id: SurfaceId, text: &str) -> Self {
        Self {
            id,
            text: text.to_string(),
            cursor_pos: text.len(),
            anchor: AnchorRect::default(),
        }
    }

    pub fn set_anchor(&mut self, anchor: AnchorRect) {
        self.anchor = anchor;
    }

    pub fn insert_str(&mut self, text: &str) {
        let pos = self.cursor_pos;
        self.text.insert_str(pos, text);
        self.cursor_pos = pos + text.len();
    }
}

impl TextInputSurface for PlainTextSurface {
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
        let start = clamp_to_char_boundary(&self.text, range.start);
        let end = clamp_to_char_boundary(&self.text, range.end.max(start));
        let inserted_len = text.len();
        let removed_len = end - start;
        self.text.replace_range(start..end, text);

        // Update the cursor position to account for the edit.
        self.cursor_pos = if self.cursor_pos < start {
            self.cursor_pos
        } else if self.cursor_pos <= end {
            start + inserted_len
        } else {
            self.cursor_pos + inserted_len - removed_len
        }
        .min(self.text.len());
    }

    fn set_cursor(&mut self, pos: usize) {
        self.cursor_pos = clamp_to_char_boundary(&self.text, pos);
    }

    fn caret_anchor(&self) -> AnchorRect {
        self.anchor
    }
}
