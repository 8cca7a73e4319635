//! Main IPC message enums for communication between the core and the UI.

use serde::{Deserialize, Serialize};

use crate::commands::{EditorCommand, PaintCommand};
use crate::error::IpcError;
use crate::input::{KeyboardEvent, PointerInput};
use crate::types::{EditorState, EditorTool, Part, RayHitInfo, SessionInfo};

/// Messages from the UI to the painting core.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum UiToCore {
    /// Single click on the model: recolor in color mode, one brush dab in pixel mode
    PaintHit(RayHitInfo),

    /// Pointer input over the 3D view with the hit under it, for brush strokes
    Pointer {
        input: PointerInput,
        hit: Option<RayHitInfo>,
    },

    /// Session commands (mode, brush, color, recolor)
    PaintCommand(PaintCommand),

    /// Raster editor commands
    EditorCommand(EditorCommand),

    /// Pointer input over the editor canvas, in canvas pixels
    EditorPointer(PointerInput),

    /// Keyboard input (editor shortcuts)
    Keyboard(KeyboardEvent),

    /// Export the flat skin
    ExportSkin,

    /// Export the skin with editing guides
    ExportTemplate,

    /// Stop the session
    Shutdown,
}

/// Messages from the painting core to the UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum CoreToUi {
    /// Initial state sync when the session starts
    Initialize { session: SessionInfo },

    /// The editor saved: the composite was replaced
    TemplateUpdated { png: String },

    /// Part rasters changed and their textures should be refreshed
    PartsChanged { parts: Vec<Part> },

    /// Backing surface of one part
    PartTexture { part: Part, png: String },

    SkinExported { png: String },

    TemplateExported { png: String },

    /// The editor finished loading and accepts input
    EditorOpened { png: String, state: EditorState },

    EditorClosed,

    /// Zoom or history availability changed
    EditorStateChanged { state: EditorState },

    /// Eyedropper picked a color (`#rrggbb` or `#rrggbbaa`)
    ColorPicked { color: String },

    ToolChanged { tool: EditorTool },

    /// Error notification
    Error { code: String, message: String },
}

impl UiToCore {
    /// Parse one JSON message
    pub fn from_json(line: &str) -> Result<Self, IpcError> {
        let line = line.trim();
        if line.is_empty() {
            return Err(IpcError::InvalidFormat("empty message".to_string()));
        }
        Ok(serde_json::from_str(line)?)
    }
}

impl CoreToUi {
    pub fn error(code: &str, message: impl Into<String>) -> Self {
        CoreToUi::Error {
            code: code.to_string(),
            message: message.into(),
        }
    }

    /// Serialize as a single JSON line without the trailing newline
    pub fn to_json(&self) -> Result<String, IpcError> {
        Ok(serde_json::to_string(self)?)
    }
}
