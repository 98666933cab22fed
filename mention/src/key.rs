use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;

/// Keys the suggestion list reacts to. Everything else is `Other` and is
/// left to the text input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MentionKey {
    ArrowDown,
    ArrowUp,
    Enter,
    Tab,
    Escape,
    Other,
}

/// Whether the autocomplete swallowed a key or the surface should apply its
/// default behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDisposition {
    Consumed,
    PassThrough,
}

impl From<KeyCode> for MentionKey {
    fn from(code: KeyCode) -> Self {
        match code {
            KeyCode::Down => MentionKey::ArrowDown,
            KeyCode::Up => MentionKey::ArrowUp,
            KeyCode::Enter => MentionKey::Enter,
            KeyCode::Tab => MentionKey::Tab,
            KeyCode::Esc => MentionKey::Escape,
            _ => MentionKey::Other,
        }
    }
}

impl From<KeyEvent> for MentionKey {
    /// Modified keys (Shift+Enter for a newline, Shift+Up for selection) and
    /// key releases keep their normal editing meaning.
    fn from(event: KeyEvent) -> Self {
        if event.kind == KeyEventKind::Release || event.modifiers != KeyModifiers::NONE {
            return MentionKey::Other;
        }
        event.code.into()
    }
}
