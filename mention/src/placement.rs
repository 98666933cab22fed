//! Where the floating suggestion list goes relative to the caret.

/// Gap between the caret and the list.
const CARET_GAP: f64 = 5.0;

/// Distance kept from the viewport edge when the list has to be pinned.
const EDGE_MARGIN: f64 = 10.0;

/// A rectangle in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnchorRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl AnchorRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }
}

/// Top-left corner chosen for the list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub top: f64,
    pub left: f64,
}

/// Place a `popup_width` x `popup_height` list next to `caret` inside
/// `viewport` (the visible part of the page, scroll offset included).
///
/// The list opens below the caret. If it would run past the bottom it flips
/// above the caret, and if there is no room there either it is pinned near
/// the top. Horizontal overflow is handled the same way on the right, and the
/// left edge always keeps a margin.
pub fn place_popup(
    caret: AnchorRect,
    popup_width: f64,
    popup_height: f64,
    viewport: AnchorRect,
) -> Placement {
    let mut top = caret.bottom() + CARET_GAP;
    let mut left = caret.x;

    if top + popup_height > viewport.bottom() {
        top = caret.bottom() - popup_height - CARET_GAP;
        if top < viewport.y {
            top = viewport.y + EDGE_MARGIN;
        }
    }

    if left + popup_width > viewport.right() {
        left = caret.x - popup_width;
        if left < viewport.x {
            left = viewport.right() - popup_width - EDGE_MARGIN;
        }
    }

    if left < viewport.x {
        left = viewport.x + EDGE_MARGIN;
    }

    Placement { top, left }
}
