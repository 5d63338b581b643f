//! Optodesk UI Library
//!
//! Headless widgets and page controllers for the clinic desk. Nothing here
//! draws; an embedding layer forwards user events in and renders the state
//! and views it reads back.
//!
//! # Modules
//!
//! - [`select`]: Searchable dropdown with an anchored overlay
//! - [`host`]: Anchor measurement and global listener ownership
//! - [`geometry`]: Rectangles and overlay placement
//! - [`table`]: Editable row tables
//! - [`textarea`]: Auto-growing text cells
//! - [`toast`]: Success/error notifications
//! - [`screens`]: Page controllers (patients, bills, reference data)

pub mod geometry;
pub mod host;
pub mod screens;
pub mod select;
pub mod table;
pub mod textarea;
pub mod toast;

// Re-export commonly used types
pub use geometry::{OverlayPosition, Rect, ScrollOffset};
pub use host::{GlobalEvent, HeadlessHost, OverlayHost};
pub use select::{
    filter_indices, filter_options, HitTarget, OverlayContent, OverlayView, SearchableSelect,
};
pub use table::{EditableRow, RowTable, TableError};
pub use toast::{Toast, ToastKind, Toaster};
