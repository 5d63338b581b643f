//! Domain models for the clinic desk.

mod bill;
mod patient;
mod reference;

pub use bill::*;
pub use patient::*;
pub use reference::*;
