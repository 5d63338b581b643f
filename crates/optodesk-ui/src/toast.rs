//! Transient success/error notifications.

use std::collections::VecDeque;

use optodesk_core::config::{ToastConfig, DEFAULT_MAX_TOASTS};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

/// Bounded toast queue; the oldest toast is dropped when full.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toaster {
    queue: VecDeque<Toast>,
    max_visible: usize,
}

impl Default for Toaster {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TOASTS)
    }
}

impl Toaster {
    pub fn new(max_visible: usize) -> Self {
        let max_visible = max_visible.max(1);
        Self {
            queue: VecDeque::with_capacity(max_visible),
            max_visible,
        }
    }

    pub fn from_config(config: &ToastConfig) -> Self {
        Self::new(config.max_visible)
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Success, message.into());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Error, message.into());
    }

    fn push(&mut self, kind: ToastKind, message: String) {
        match kind {
            ToastKind::Success => tracing::info!(event = "ui.toast.shown", kind = "success", message = %message),
            ToastKind::Error => tracing::warn!(event = "ui.toast.shown", kind = "error", message = %message),
        }
        if self.queue.len() == self.max_visible {
            self.queue.pop_front();
        }
        self.queue.push_back(Toast { kind, message });
    }

    /// Visible toasts, oldest first.
    pub fn visible(&self) -> impl Iterator<Item = &Toast> {
        self.queue.iter()
    }

    pub fn latest(&self) -> Option<&Toast> {
        self.queue.back()
    }

    /// Remove the oldest toast, as its timer expires.
    pub fn dismiss_oldest(&mut self) -> Option<Toast> {
        self.queue.pop_front()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
