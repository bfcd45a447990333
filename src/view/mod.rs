//! Headless view layer: the element tree animated by timelines.

mod text;
mod tree;

pub use text::{split_chars, CHAR_CLASS};
pub use tree::{ElementId, ViewTree};

/// Document-space rectangle
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn offset(&self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// Visible region of the document
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    /// Distance scrolled from the top of the document
    pub scroll_y: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            scroll_y: 0.0,
        }
    }

    /// Position of a document-space rect relative to the top of the viewport
    pub fn relative(&self, rect: Rect) -> Rect {
        rect.offset(0.0, -self.scroll_y)
    }
}
