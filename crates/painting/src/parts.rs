//! Static description of the six body parts and the 64x64 skin layout.
//!
//! Every part lists its faces in slot order. The slot is what the compositor
//! uses to pick the part's surface slice, so the order here is load-bearing.

use crate::types::{PartId, Rect, Rgba};

/// One face of a part and where it lands in the flat template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceRegion {
    pub label: &'static str,
    pub rect: Rect,
}

const fn face(label: &'static str, x: u32, y: u32, w: u32, h: u32) -> FaceRegion {
    FaceRegion {
        label,
        rect: Rect::new(x, y, w, h),
    }
}

/// Static part description
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartSpec {
    pub id: PartId,
    /// Logical paint grid width, in cells
    pub grid_width: u32,
    /// Logical paint grid height, in cells
    pub grid_height: u32,
    /// Faces in slot order
    pub faces: &'static [FaceRegion],
    pub base_color: Rgba,
}

const HEAD_FACES: [FaceRegion; 6] = [
    face("front", 8, 8, 8, 8),
    face("top", 8, 0, 8, 8),
    face("right", 0, 8, 8, 8),
    face("bottom", 16, 0, 8, 8),
    face("back", 24, 8, 8, 8),
    face("left", 16, 8, 8, 8),
];

const BODY_FACES: [FaceRegion; 2] = [face("front", 20, 20, 8, 12), face("back", 32, 20, 8, 12)];

const LEFT_ARM_FACES: [FaceRegion; 6] = [
    face("front", 44, 20, 4, 12),
    face("outer", 48, 20, 4, 12),
    face("back", 52, 20, 4, 12),
    face("inner", 40, 20, 4, 12),
    face("top", 44, 16, 4, 4),
    face("bottom", 48, 16, 4, 4),
];

const RIGHT_ARM_FACES: [FaceRegion; 6] = [
    face("front", 36, 52, 4, 12),
    face("outer", 32, 52, 4, 12),
    face("back", 44, 52, 4, 12),
    face("inner", 40, 52, 4, 12),
    face("top", 36, 48, 4, 4),
    face("bottom", 40, 48, 4, 4),
];

const LEFT_LEG_FACES: [FaceRegion; 6] = [
    face("front", 4, 20, 4, 12),
    face("outer", 8, 20, 4, 12),
    face("back", 12, 20, 4, 12),
    face("inner", 0, 20, 4, 12),
    face("top", 4, 16, 4, 4),
    face("bottom", 8, 16, 4, 4),
];

const RIGHT_LEG_FACES: [FaceRegion; 6] = [
    face("front", 20, 52, 4, 12),
    face("outer", 16, 52, 4, 12),
    face("back", 28, 52, 4, 12),
    face("inner", 24, 52, 4, 12),
    face("top", 20, 48, 4, 4),
    face("bottom", 24, 48, 4, 4),
];

/// All parts, in [`PartId::ALL`] order
pub static PART_SPECS: [PartSpec; 6] = [
    PartSpec {
        id: PartId::Head,
        grid_width: 8,
        grid_height: 8,
        faces: &HEAD_FACES,
        base_color: Rgba::rgb(0xff, 0xcc, 0xaa),
    },
    PartSpec {
        id: PartId::Body,
        grid_width: 8,
        grid_height: 12,
        faces: &BODY_FACES,
        base_color: Rgba::rgb(0x00, 0xaa, 0x00),
    },
    PartSpec {
        id: PartId::LeftArm,
        grid_width: 4,
        grid_height: 12,
        faces: &LEFT_ARM_FACES,
        base_color: Rgba::rgb(0x00, 0x00, 0xff),
    },
    PartSpec {
        id: PartId::RightArm,
        grid_width: 4,
        grid_height: 12,
        faces: &RIGHT_ARM_FACES,
        base_color: Rgba::rgb(0x00, 0x00, 0xff),
    },
    PartSpec {
        id: PartId::LeftLeg,
        grid_width: 4,
        grid_height: 12,
        faces: &LEFT_LEG_FACES,
        base_color: Rgba::rgb(0x00, 0x00, 0x00),
    },
    PartSpec {
        id: PartId::RightLeg,
        grid_width: 4,
        grid_height: 12,
        faces: &RIGHT_LEG_FACES,
        base_color: Rgba::rgb(0x00, 0x00, 0x00),
    },
];

impl PartId {
    /// Static layout and grid description for this part
    pub fn spec(self) -> &'static PartSpec {
        match self {
            PartId::Head => &PART_SPECS[0],
            PartId::Body => &PART_SPECS[1],
            PartId::LeftArm => &PART_SPECS[2],
            PartId::RightArm => &PART_SPECS[3],
            PartId::LeftLeg => &PART_SPECS[4],
            PartId::RightLeg => &PART_SPECS[5],
        }
    }
}

/// Second-layer (hat, jacket, sleeve, pants) regions. Only outlined in the
/// annotated template; the engine never paints them.
pub static OVERLAY_OUTLINES: [Rect; 24] = [
    // Hat
    Rect::new(40, 8, 8, 8),
    Rect::new(48, 8, 8, 8),
    Rect::new(56, 8, 8, 8),
    Rect::new(32, 8, 8, 8),
    Rect::new(40, 0, 8, 8),
    Rect::new(48, 0, 8, 8),
    // Jacket
    Rect::new(20, 36, 8, 12),
    Rect::new(32, 36, 8, 12),
    // Left sleeve
    Rect::new(44, 36, 4, 12),
    Rect::new(48, 36, 4, 12),
    Rect::new(52, 36, 4, 12),
    Rect::new(40, 36, 4, 12),
    // Right sleeve
    Rect::new(36, 36, 4, 12),
    Rect::new(32, 36, 4, 12),
    Rect::new(28, 36, 4, 12),
    Rect::new(24, 36, 4, 12),
    // Left pants
    Rect::new(4, 36, 4, 12),
    Rect::new(8, 36, 4, 12),
    Rect::new(12, 36, 4, 12),
    Rect::new(0, 36, 4, 12),
    // Right pants
    Rect::new(4, 52, 4, 12),
    Rect::new(8, 52, 4, 12),
    Rect::new(12, 52, 4, 12),
    Rect::new(0, 52, 4, 12),
];

/// Orientation labels drawn on the annotated template (text, top-left corner)
pub static REGION_LABELS: [(&str, u32, u32); 6] = [
    ("HEAD", 9, 9),
    ("BODY", 21, 22),
    ("L ARM", 44, 22),
    ("R ARM", 36, 54),
    ("L LEG", 4, 22),
    ("R LEG", 20, 54),
];
