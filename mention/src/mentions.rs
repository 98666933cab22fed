//! Mentions inside finished comment text.

use std::borrow::Cow;
use std::collections::HashSet;
use std::sync::LazyLock;

use regex_lite::Captures;
use regex_lite::Regex;

#[allow(clippy::expect_used)]
static MENTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@(\w+)").expect("valid mention regex"));

/// Distinct usernames mentioned in `content`, in order of first appearance.
///
/// `exclude` (typically the comment's author) is never reported so people do
/// not notify themselves.
pub fn extract_mentions(content: &str, exclude: Option<&str>) -> Vec<String> {
    let mut seen = HashSet::new();
    MENTION
        .captures_iter(content)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|name| Some(*name) != exclude)
        .filter(|name| seen.insert(*name))
        .map(str::to_string)
        .collect()
}

/// Rewrite every `@name` into a link to the user's profile page.
pub fn linkify_mentions(html: &str) -> Cow<'_, str> {
    MENTION.replace_all(html, |caps: &Captures<'_>| {
        let name = &caps[1];
        format!(r#"<a href="/user/{name}" class="mention">@{name}</a>"#)
    })
}
