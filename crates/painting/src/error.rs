//! Error types for the fallible edges of the painting crate.
//!
//! Painting itself never fails: out-of-range cells, unresolvable hits and
//! empty history are silent no-ops. Only decoding, encoding and persistence
//! report errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ColorParseError {
    #[error("Invalid color length: expected 3, 6 or 8 hex digits, got {0}")]
    InvalidLength(usize),
    #[error("Invalid hex digit in color {0:?}")]
    InvalidDigit(String),
}

#[derive(Debug, Error)]
#[error("Unknown body part: {0:?}")]
pub struct PartParseError(pub String);

#[derive(Debug, Error)]
#[error("Unknown editor tool: {0:?}")]
pub struct ToolParseError(pub String);

#[derive(Debug, Error)]
#[error("Unknown paint mode: {0:?}")]
pub struct ModeParseError(pub String);

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Failed to decode template image: {0}")]
    Decode(#[source] image::ImageError),
    #[error("Failed to encode template image: {0}")]
    Encode(#[source] image::ImageError),
    #[error("Template must be {expected}x{expected}, got {width}x{height}")]
    Dimensions {
        expected: u32,
        width: u32,
        height: u32,
    },
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Color store I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Color store is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Color store entry for {part} is invalid: {source}")]
    InvalidColor {
        part: String,
        #[source]
        source: ColorParseError,
    },
}
