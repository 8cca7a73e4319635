//! Type definitions for IPC messages.

mod hit;

pub use hit::*;

use serde::{Deserialize, Serialize};

/// Body part identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Part {
    Head,
    Body,
    LeftArm,
    RightArm,
    LeftLeg,
    RightLeg,
}

/// What a click on the model does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaintMode {
    /// Recolor the whole part
    #[default]
    Color,
    /// Paint cells with the brush
    Pixel,
}

/// Raster editor tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorTool {
    #[default]
    Pencil,
    Eraser,
    Eyedropper,
    Fill,
}

/// Stored color of one part.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartColor {
    pub part: Part,
    /// `#rrggbb`
    pub color: String,
}

/// Session settings sent to the UI on startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionInfo {
    pub mode: PaintMode,
    pub tool: EditorTool,
    pub brush_size: u32,
    pub brush_range: [u32; 2],
    /// `#rrggbb` or `#rrggbbaa`
    pub color: String,
    pub parts: Vec<PartColor>,
}

/// Editor view state after an editor action.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EditorState {
    pub pixel_size: f32,
    pub can_undo: bool,
    pub can_redo: bool,
}
