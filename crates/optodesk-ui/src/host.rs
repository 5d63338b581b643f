//! The surface an overlay widget runs against.
//!
//! A host measures the anchor element, reports the document scroll offset
//! and owns global listeners. Widgets subscribe only while they need events,
//! so a closed widget holds no listeners.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::geometry::{Rect, ScrollOffset};

/// Document-level events an open overlay listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GlobalEvent {
    /// Any scroll, including nested scroll containers
    Scroll,
    Resize,
    PointerDown,
}

impl GlobalEvent {
    pub const ALL: [GlobalEvent; 3] = [
        GlobalEvent::Scroll,
        GlobalEvent::Resize,
        GlobalEvent::PointerDown,
    ];
}

pub trait OverlayHost {
    /// Current viewport rectangle of the anchor, `None` if it is detached.
    fn measure_anchor(&self) -> Option<Rect>;

    fn scroll_offset(&self) -> ScrollOffset;

    fn subscribe(&mut self, event: GlobalEvent);

    fn unsubscribe(&mut self, event: GlobalEvent);
}

/// In-memory host for tests and embedding layers that push state in.
#[derive(Debug, Clone, Default)]
pub struct HeadlessHost {
    pub anchor: Option<Rect>,
    pub scroll: ScrollOffset,
    listeners: HashMap<GlobalEvent, usize>,
}

impl HeadlessHost {
    pub fn new(anchor: Rect) -> Self {
        Self {
            anchor: Some(anchor),
            ..Self::default()
        }
    }

    /// Live subscriptions for one event.
    pub fn listener_count(&self, event: GlobalEvent) -> usize {
        self.listeners.get(&event).copied().unwrap_or(0)
    }

    /// Live subscriptions across all events.
    pub fn total_listeners(&self) -> usize {
        self.listeners.values().sum()
    }
}

impl OverlayHost for HeadlessHost {
    fn measure_anchor(&self) -> Option<Rect> {
        self.anchor
    }

    fn scroll_offset(&self) -> ScrollOffset {
        self.scroll
    }

    fn subscribe(&mut self, event: GlobalEvent) {
        *self.listeners.entry(event).or_insert(0) += 1;
    }

    fn unsubscribe(&mut self, event: GlobalEvent) {
        if let Some(count) = self.listeners.get_mut(&event) {
            *count = count.saturating_sub(1);
            if *count == 0 {
                self.listeners.remove(&event);
            }
        }
    }
}
