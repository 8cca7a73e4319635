//! Ray hit reported by the UI's 3D view.

use serde::{Deserialize, Serialize};

use super::Part;

/// 3D transform with position, rotation, and scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transform3D {
    pub position: [f32; 3],
    pub rotation: [f32; 4], // Quaternion (x, y, z, w)
    pub scale: [f32; 3],
}

impl Default for Transform3D {
    fn default() -> Self {
        Self {
            position: [0.0; 3],
            rotation: [0.0, 0.0, 0.0, 1.0],
            scale: [1.0; 3],
        }
    }
}

/// Intersection of a pointer ray with a part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RayHitInfo {
    pub part: Part,
    /// World-space hit position
    #[serde(default)]
    pub point: [f32; 3],
    /// Face normal in the part's local frame
    pub normal: Option<[f32; 3]>,
    /// Texture coordinate, origin bottom-left
    pub uv: Option<[f32; 2]>,
    /// Part transform (identity if omitted)
    #[serde(default)]
    pub transform: Option<Transform3D>,
}
