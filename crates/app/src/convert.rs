//! Conversions between wire types and painting types

use blockskin_ipc as ipc;
use glam::{Affine3A, Quat, Vec2, Vec3};
use painting::{EditorTool, PaintMode, PartId, PointerEvent, RayHit, TouchPhase};

pub fn part_id(part: ipc::Part) -> PartId {
    match part {
        ipc::Part::Head => PartId::Head,
        ipc::Part::Body => PartId::Body,
        ipc::Part::LeftArm => PartId::LeftArm,
        ipc::Part::RightArm => PartId::RightArm,
        ipc::Part::LeftLeg => PartId::LeftLeg,
        ipc::Part::RightLeg => PartId::RightLeg,
    }
}

pub fn wire_part(part: PartId) -> ipc::Part {
    match part {
        PartId::Head => ipc::Part::Head,
        PartId::Body => ipc::Part::Body,
        PartId::LeftArm => ipc::Part::LeftArm,
        PartId::RightArm => ipc::Part::RightArm,
        PartId::LeftLeg => ipc::Part::LeftLeg,
        PartId::RightLeg => ipc::Part::RightLeg,
    }
}

pub fn paint_mode(mode: ipc::PaintMode) -> PaintMode {
    match mode {
        ipc::PaintMode::Color => PaintMode::Color,
        ipc::PaintMode::Pixel => PaintMode::Pixel,
    }
}

pub fn wire_mode(mode: PaintMode) -> ipc::PaintMode {
    match mode {
        PaintMode::Color => ipc::PaintMode::Color,
        PaintMode::Pixel => ipc::PaintMode::Pixel,
    }
}

pub fn editor_tool(tool: ipc::EditorTool) -> EditorTool {
    match tool {
        ipc::EditorTool::Pencil => EditorTool::Pencil,
        ipc::EditorTool::Eraser => EditorTool::Eraser,
        ipc::EditorTool::Eyedropper => EditorTool::Eyedropper,
        ipc::EditorTool::Fill => EditorTool::Fill,
    }
}

pub fn wire_tool(tool: EditorTool) -> ipc::EditorTool {
    match tool {
        EditorTool::Pencil => ipc::EditorTool::Pencil,
        EditorTool::Eraser => ipc::EditorTool::Eraser,
        EditorTool::Eyedropper => ipc::EditorTool::Eyedropper,
        EditorTool::Fill => ipc::EditorTool::Fill,
    }
}

pub fn transform(transform: &ipc::Transform3D) -> Affine3A {
    let rotation = Quat::from_array(transform.rotation);
    // Unnormalized quaternions from the UI are accepted, zero ones are not
    let rotation = if rotation.length_squared() > f32::EPSILON {
        rotation.normalize()
    } else {
        Quat::IDENTITY
    };
    Affine3A::from_scale_rotation_translation(
        Vec3::from_array(transform.scale),
        rotation,
        Vec3::from_array(transform.position),
    )
}

pub fn ray_hit(hit: &ipc::RayHitInfo) -> RayHit {
    let mut ray_hit = RayHit::new(
        part_id(hit.part),
        hit.normal.map(Vec3::from_array),
        hit.uv.map(Vec2::from_array),
    );
    ray_hit.point = Vec3::from_array(hit.point);
    match &hit.transform {
        Some(t) => ray_hit.with_transform(transform(t)),
        None => ray_hit,
    }
}

/// Fold mouse and touch input into a pointer event.
///
/// Only the primary mouse button draws; other buttons yield None.
pub fn pointer_event(input: &ipc::PointerInput) -> Option<PointerEvent> {
    match input {
        ipc::PointerInput::Mouse(mouse) => match *mouse {
            ipc::MouseEvent::ButtonDown {
                button: ipc::MouseButton::Left,
                x,
                y,
            } => Some(PointerEvent::Down {
                pos: Vec2::new(x, y),
            }),
            ipc::MouseEvent::ButtonUp {
                button: ipc::MouseButton::Left,
                ..
            } => Some(PointerEvent::Up),
            ipc::MouseEvent::Move { x, y } => Some(PointerEvent::Move {
                pos: Vec2::new(x, y),
            }),
            ipc::MouseEvent::Leave => Some(PointerEvent::Leave),
            ipc::MouseEvent::ButtonDown { .. } | ipc::MouseEvent::ButtonUp { .. } => None,
        },
        ipc::PointerInput::Touch(touch) => {
            let phase = match touch.phase {
                ipc::TouchPhase::Start => TouchPhase::Start,
                ipc::TouchPhase::Move => TouchPhase::Move,
                ipc::TouchPhase::End => TouchPhase::End,
                ipc::TouchPhase::Cancel => TouchPhase::Cancel,
            };
            let touches: Vec<Vec2> = touch.touches.iter().copied().map(Vec2::from_array).collect();
            Some(PointerEvent::from_touch(phase, &touches))
        }
    }
}
