//! Front-end session state for the 3D painter

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::{DEFAULT_BRUSH_SIZE, MAX_BRUSH_SIZE, MIN_BRUSH_SIZE};
use crate::editor::EditorTool;
use crate::error::ModeParseError;
use crate::types::{PartId, Rgba};

/// What a click on the model does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaintMode {
    /// Recolor the whole part
    #[default]
    Color,
    /// Paint cells with the brush
    Pixel,
}

impl PaintMode {
    pub fn name(self) -> &'static str {
        match self {
            PaintMode::Color => "color",
            PaintMode::Pixel => "pixel",
        }
    }
}

impl fmt::Display for PaintMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PaintMode {
    type Err = ModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "color" => Ok(PaintMode::Color),
            "pixel" => Ok(PaintMode::Pixel),
            _ => Err(ModeParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub mode: PaintMode,
    /// Active editor tool, mirrored for the UI
    pub tool: EditorTool,
    brush_size: u32,
    /// Part most recently clicked or painted
    pub active_part: Option<PartId>,
    pub color: Rgba,
    /// True while the composite is stale. Front-ends keep it in step with
    /// `PaintEngine::is_template_dirty`.
    pub template_dirty: bool,
}

impl SessionState {
    pub fn new(brush_size: u32) -> Self {
        Self {
            mode: PaintMode::default(),
            tool: EditorTool::default(),
            brush_size: brush_size.clamp(MIN_BRUSH_SIZE, MAX_BRUSH_SIZE),
            active_part: None,
            color: Rgba::BLACK,
            template_dirty: true,
        }
    }

    pub fn brush_size(&self) -> u32 {
        self.brush_size
    }

    /// Set the brush size, clamped to the supported range. Returns the applied size.
    pub fn set_brush_size(&mut self, size: u32) -> u32 {
        self.brush_size = size.clamp(MIN_BRUSH_SIZE, MAX_BRUSH_SIZE);
        debug!("Brush size: {}", self.brush_size);
        self.brush_size
    }

    pub fn set_mode(&mut self, mode: PaintMode) {
        if self.mode != mode {
            debug!("Paint mode: {}", mode);
        }
        self.mode = mode;
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(DEFAULT_BRUSH_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brush_size_is_clamped() {
        let mut state = SessionState::new(0);
        assert_eq!(state.brush_size(), MIN_BRUSH_SIZE);
        assert_eq!(state.set_brush_size(25), MAX_BRUSH_SIZE);
        assert_eq!(state.set_brush_size(4), 4);
    }

    #[test]
    fn test_defaults() {
        let state = SessionState::default();
        assert_eq!(state.mode, PaintMode::Color);
        assert_eq!(state.tool, EditorTool::Pencil);
        assert_eq!(state.brush_size(), DEFAULT_BRUSH_SIZE);
        assert!(state.active_part.is_none());
    }

    #[test]
    fn test_mode_names() {
        assert_eq!("pixel".parse::<PaintMode>().unwrap(), PaintMode::Pixel);
        assert_eq!(PaintMode::Color.to_string(), "color");
        assert!("sculpt".parse::<PaintMode>().is_err());
        assert_eq!(serde_json::to_string(&PaintMode::Pixel).unwrap(), "\"pixel\"");
    }
}
