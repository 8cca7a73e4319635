//! Command types for IPC messages.

mod editor;
mod paint;

pub use editor::*;
pub use paint::*;
