//! Screen geometry for anchored overlays.

use serde::{Deserialize, Serialize};

/// A viewport-relative rectangle, in CSS pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }
}

/// Document scroll offset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrollOffset {
    pub x: f32,
    pub y: f32,
}

impl ScrollOffset {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Document-relative placement of an overlay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OverlayPosition {
    pub top: f32,
    pub left: f32,
    pub width: f32,
}

impl OverlayPosition {
    /// Directly below `anchor`, matching its width.
    pub fn below(anchor: Rect, scroll: ScrollOffset) -> Self {
        Self {
            top: anchor.bottom() + scroll.y,
            left: anchor.left + scroll.x,
            width: anchor.width,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_below_adds_scroll() {
        let anchor = Rect::new(100.0, 200.0, 150.0, 30.0);
        let pos = OverlayPosition::below(anchor, ScrollOffset::new(0.0, 50.0));
        assert_eq!(
            pos,
            OverlayPosition {
                top: 280.0,
                left: 100.0,
                width: 150.0
            }
        );
    }

    #[test]
    fn test_rect_edges() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.right(), 40.0);
        assert_eq!(r.bottom(), 60.0);
    }
}
