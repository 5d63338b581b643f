//! What an open dropdown renders.

use serde::{Deserialize, Serialize};

use crate::geometry::OverlayPosition;

/// Body of the suggestion list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OverlayContent {
    /// Matching options in their original order
    Rows(Vec<String>),
    /// Placeholder row when nothing matches; not selectable
    NoResults(String),
}

/// Snapshot of the floating list, positioned in document coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayView {
    pub position: OverlayPosition,
    /// Height cap; the list scrolls beyond it
    pub max_height: f32,
    pub content: OverlayContent,
}

impl OverlayView {
    /// Selectable rows, empty when showing the placeholder.
    pub fn rows(&self) -> &[String] {
        match &self.content {
            OverlayContent::Rows(rows) => rows,
            OverlayContent::NoResults(_) => &[],
        }
    }

    pub fn is_no_results(&self) -> bool {
        matches!(self.content, OverlayContent::NoResults(_))
    }
}
