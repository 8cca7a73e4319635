//! Commands for the raster editor.

use serde::{Deserialize, Serialize};

use crate::types::EditorTool;

/// Commands for the standalone pixel editor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EditorCommand {
    /// Open on a base64 PNG, or on the current composite if omitted
    Open { png: Option<String> },
    Close,
    /// Write the edited image back into the parts and close
    Save,
    SetTool { tool: EditorTool },
    SetColor { color: String },
    ZoomIn,
    ZoomOut,
    ResetZoom,
    Undo,
    Redo,
}
