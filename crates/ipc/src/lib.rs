//! IPC message protocol for Blockskin
//!
//! Defines all message types exchanged between the painting core and a UI
//! front-end. Messages travel as one JSON object per line; binary images
//! travel as base64-encoded PNG strings.

mod commands;
mod error;
mod input;
mod messages;
mod png;
mod types;

pub use commands::*;
pub use error::IpcError;
pub use input::*;
pub use messages::*;
pub use png::*;
pub use types::*;
