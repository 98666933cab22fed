//! Locating the in-progress `@token` and splicing a chosen username over it.
//!
//! Word characters follow the ASCII `\w` class (`[0-9A-Za-z_]`); anything
//! else, whitespace included, ends a token.

use std::ops::Range;
use std::sync::LazyLock;

use regex_lite::Regex;

#[allow(clippy::expect_used)]
static TRAILING_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@(\w*)$").expect("valid mention token regex"));

/// Same token, plus whatever whitespace the user left after it. Replacing
/// this span keeps exactly one space after the inserted mention.
#[allow(clippy::expect_used)]
static TRAILING_TOKEN_WITH_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@\w*\s*$").expect("valid mention replace regex"));

/// An `@token` that ends at the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MentionToken {
    /// Byte offset of the `@`.
    pub start: usize,
    /// Byte offset of the cursor (exclusive end of the token).
    pub end: usize,
    /// Text after the `@`; may be empty.
    pub prefix: String,
}

/// Adjust `cursor` to the nearest char boundary at or before it.
pub fn clamp_to_char_boundary(text: &str, cursor: usize) -> usize {
    let mut pos = cursor.min(text.len());
    while pos > 0 && !text.is_char_boundary(pos) {
        pos -= 1;
    }
    pos
}

/// Extract the `@token` that ends exactly at `cursor`, if any.
///
/// `"hi @bo|b"` yields `bo`; `"hi @ bo|"` yields nothing because whitespace
/// separates the `@` from the cursor.
pub fn mention_token_before_cursor(text: &str, cursor: usize) -> Option<MentionToken> {
    let cursor = clamp_to_char_boundary(text, cursor);
    let caps = TRAILING_TOKEN.captures(&text[..cursor])?;
    let whole = caps.get(0)?;
    Some(MentionToken {
        start: whole.start(),
        end: cursor,
        prefix: caps
            .get(1)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default(),
    })
}

/// A pending replacement of the in-progress token by a finished mention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MentionEdit {
    pub range: Range<usize>,
    pub username: String,
}

impl MentionEdit {
    /// Text inserted in place of `range`.
    pub fn replacement(&self) -> String {
        format!("@{} ", self.username)
    }

    /// Cursor position right after the inserted boundary space.
    pub fn cursor_after(&self) -> usize {
        self.range.start + self.replacement().len()
    }

    pub fn apply(&self, text: &str) -> String {
        let replacement = self.replacement();
        let mut new_text =
            String::with_capacity(text.len() - self.range.len() + replacement.len());
        new_text.push_str(&text[..self.range.start]);
        new_text.push_str(&replacement);
        new_text.push_str(&text[self.range.end..]);
        new_text
    }
}

/// Plan the edit that turns the token ending at `cursor` into `@username `.
///
/// Text after the cursor is preserved. Returns `None` when there is no token
/// to replace.
pub fn mention_edit(text: &str, cursor: usize, username: &str) -> Option<MentionEdit> {
    let cursor = clamp_to_char_boundary(text, cursor);
    let found = TRAILING_TOKEN_WITH_SPACE.find(&text[..cursor])?;
    Some(MentionEdit {
        range: found.start()..cursor,
        username: username.to_string(),
    })
}
