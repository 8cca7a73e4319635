//! Editor tool selection

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ToolParseError;

/// Tool applied by pointer presses in the raster editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorTool {
    #[default]
    Pencil,
    Eraser,
    /// Picks the cell color, then hands control back to the pencil
    Eyedropper,
    Fill,
}

impl EditorTool {
    pub const ALL: [EditorTool; 4] = [
        EditorTool::Pencil,
        EditorTool::Eraser,
        EditorTool::Eyedropper,
        EditorTool::Fill,
    ];

    pub fn name(self) -> &'static str {
        match self {
            EditorTool::Pencil => "pencil",
            EditorTool::Eraser => "eraser",
            EditorTool::Eyedropper => "eyedropper",
            EditorTool::Fill => "fill",
        }
    }

    /// Whether dragging keeps applying the tool after the press
    pub fn is_continuous(self) -> bool {
        matches!(self, EditorTool::Pencil | EditorTool::Eraser)
    }
}

impl fmt::Display for EditorTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EditorTool {
    type Err = ToolParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EditorTool::ALL
            .into_iter()
            .find(|tool| tool.name() == s)
            .ok_or_else(|| ToolParseError(s.to_string()))
    }
}
