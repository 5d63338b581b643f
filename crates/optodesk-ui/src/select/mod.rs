//! Searchable dropdown.
//!
//! A controlled text input whose suggestion list floats in an overlay
//! anchored below the input. The widget is headless: the embedding layer
//! forwards input, focus, pointer and scroll/resize events and renders the
//! [`OverlayView`] it gets back.
//!
//! ```text
//!            input (non-empty) / focus (non-empty)
//!   Closed ─────────────────────────────────────────▶ Open
//!     ▲                                               │ │
//!     │   outside pointer-down, text cleared,         │ │ input: refilter
//!     └── row committed, unmount ─────────────────────┘ │ scroll/resize:
//!                                                       │ reposition
//!                                                       ▼
//! ```
//!
//! Global scroll, resize and pointer-down listeners are held only while
//! open.

mod overlay;

pub use overlay::{OverlayContent, OverlayView};

use std::fmt;

use optodesk_core::config::{DropdownConfig, DEFAULT_MAX_HEIGHT_PX, DEFAULT_NO_RESULTS_LABEL};

use crate::geometry::OverlayPosition;
use crate::host::{GlobalEvent, OverlayHost};

/// Options containing `query`, case-insensitive, in original order.
pub fn filter_options<'a>(options: &'a [String], query: &str) -> Vec<&'a str> {
    filter_indices(options, query)
        .into_iter()
        .map(|i| options[i].as_str())
        .collect()
}

/// Positions in `options` of the entries [`filter_options`] keeps.
pub fn filter_indices(options: &[String], query: &str) -> Vec<usize> {
    let needle = query.to_lowercase();
    options
        .iter()
        .enumerate()
        .filter(|(_, option)| option.to_lowercase().contains(&needle))
        .map(|(i, _)| i)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectState {
    Closed,
    Open,
}

/// Where a pointer-down landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    Input,
    /// The n-th visible row of the overlay
    OverlayRow(usize),
    /// Overlay chrome or the "no results" row
    Overlay,
    Outside,
}

type ChangeHandler = Box<dyn FnMut(&str)>;

pub struct SearchableSelect {
    /// Last externally supplied value
    value: Option<String>,
    input_text: String,
    state: SelectState,
    position: OverlayPosition,
    placeholder: String,
    no_results_label: String,
    max_height: f32,
    on_change: Option<ChangeHandler>,
}

impl fmt::Debug for SearchableSelect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchableSelect")
            .field("value", &self.value)
            .field("input_text", &self.input_text)
            .field("state", &self.state)
            .field("position", &self.position)
            .field("placeholder", &self.placeholder)
            .finish_non_exhaustive()
    }
}

impl Default for SearchableSelect {
    fn default() -> Self {
        Self::new(None)
    }
}

impl SearchableSelect {
    /// Mount with the current controlled value.
    pub fn new(value: Option<&str>) -> Self {
        Self {
            value: value.map(str::to_string),
            input_text: value.unwrap_or_default().to_string(),
            state: SelectState::Closed,
            position: OverlayPosition::default(),
            placeholder: String::new(),
            no_results_label: DEFAULT_NO_RESULTS_LABEL.to_string(),
            max_height: DEFAULT_MAX_HEIGHT_PX,
            on_change: None,
        }
    }

    pub fn with_config(mut self, config: &DropdownConfig) -> Self {
        self.no_results_label = config.no_results_label.clone();
        self.max_height = config.max_height_px;
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Called once per commit with the chosen option.
    pub fn on_change(mut self, handler: impl FnMut(&str) + 'static) -> Self {
        self.on_change = Some(Box::new(handler));
        self
    }

    pub fn input_text(&self) -> &str {
        &self.input_text
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn state(&self) -> SelectState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == SelectState::Open
    }

    /// Last computed overlay position.
    pub fn position(&self) -> OverlayPosition {
        self.position
    }

    /// Follow the controlled value. Text is reset only when it changed.
    pub fn sync_value(&mut self, value: Option<&str>) {
        if self.value.as_deref() == value {
            return;
        }
        self.value = value.map(str::to_string);
        self.input_text = value.unwrap_or_default().to_string();
    }

    /// The user edited the input text.
    pub fn input(&mut self, host: &mut impl OverlayHost, text: &str) {
        self.input_text = text.to_string();
        if self.input_text.is_empty() {
            self.close(host);
        } else {
            self.open(host);
        }
    }

    pub fn focus(&mut self, host: &mut impl OverlayHost) {
        if !self.input_text.is_empty() {
            self.open(host);
        }
    }

    /// Handle a document pointer-down. Returns the committed option, if any.
    pub fn pointer_down(
        &mut self,
        host: &mut impl OverlayHost,
        target: HitTarget,
        options: &[String],
    ) -> Option<String> {
        if !self.is_open() {
            return None;
        }

        match target {
            HitTarget::Input | HitTarget::Overlay => None,
            HitTarget::Outside => {
                self.close(host);
                None
            }
            HitTarget::OverlayRow(index) => {
                let chosen = self.matches(options).get(index).map(|s| s.to_string())?;
                self.commit(host, chosen.clone());
                Some(chosen)
            }
        }
    }

    /// Select a match by index without a pointer event.
    pub fn select(
        &mut self,
        host: &mut impl OverlayHost,
        index: usize,
        options: &[String],
    ) -> Option<String> {
        self.pointer_down(host, HitTarget::OverlayRow(index), options)
    }

    pub fn on_scroll(&mut self, host: &impl OverlayHost) {
        if self.is_open() {
            self.reposition(host);
        }
    }

    pub fn on_resize(&mut self, host: &impl OverlayHost) {
        if self.is_open() {
            self.reposition(host);
        }
    }

    /// Tear down; releases any listeners still held.
    pub fn unmount(&mut self, host: &mut impl OverlayHost) {
        self.close(host);
    }

    /// Options matching the current text.
    pub fn matches<'a>(&self, options: &'a [String]) -> Vec<&'a str> {
        filter_options(options, &self.input_text)
    }

    /// Positions in `options` of the current matches.
    pub fn match_indices(&self, options: &[String]) -> Vec<usize> {
        filter_indices(options, &self.input_text)
    }

    /// The overlay to render, `None` while closed.
    pub fn overlay(&self, options: &[String]) -> Option<OverlayView> {
        if !self.is_open() {
            return None;
        }

        let matches = self.matches(options);
        let content = if matches.is_empty() {
            OverlayContent::NoResults(self.no_results_label.clone())
        } else {
            OverlayContent::Rows(matches.into_iter().map(str::to_string).collect())
        };

        Some(OverlayView {
            position: self.position,
            max_height: self.max_height,
            content,
        })
    }

    fn open(&mut self, host: &mut impl OverlayHost) {
        if self.is_open() {
            return;
        }
        self.state = SelectState::Open;
        self.reposition(host);
        for event in GlobalEvent::ALL {
            host.subscribe(event);
        }
        tracing::debug!(event = "ui.select.opened", text = %self.input_text);
    }

    fn close(&mut self, host: &mut impl OverlayHost) {
        if !self.is_open() {
            return;
        }
        self.state = SelectState::Closed;
        for event in GlobalEvent::ALL {
            host.unsubscribe(event);
        }
        tracing::debug!(event = "ui.select.closed");
    }

    fn commit(&mut self, host: &mut impl OverlayHost, chosen: String) {
        self.input_text = chosen;
        if let Some(handler) = self.on_change.as_mut() {
            handler(&self.input_text);
        }
        self.close(host);
        tracing::debug!(event = "ui.select.committed", value = %self.input_text);
    }

    fn reposition(&mut self, host: &impl OverlayHost) {
        // Detached anchors keep the last known position
        if let Some(anchor) = host.measure_anchor() {
            self.position = OverlayPosition::below(anchor, host.scroll_offset());
        }
    }
}
