//! Commands for the 3D painter.

use serde::{Deserialize, Serialize};

use crate::types::{PaintMode, Part};

/// Commands for controlling the painting session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PaintCommand {
    /// Switch between whole-part recolor and brush painting
    SetMode { mode: PaintMode },
    /// Set brush edge length in cells (clamped to 1-10)
    SetBrushSize { size: u32 },
    /// Set the active color (`#rgb`, `#rrggbb` or `#rrggbbaa`)
    SetColor { color: String },
    /// Fill a whole part, with the active color if none is given
    Recolor { part: Part, color: Option<String> },
    /// Request a part's backing surface as PNG
    RequestPartTexture { part: Part },
}
