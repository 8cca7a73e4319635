//! Resolve a 3D ray hit on a part into a face and grid cell.
//!
//! Faces are picked from the sign of the dominant world-space normal axis,
//! not from UV islands: the parts are axis-aligned boxes, so the normal alone
//! identifies the face. UV only selects the cell inside the part's grid.

use glam::{Affine3A, Mat3, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::types::{CellCoord, CubeFace, PartId};

/// Ray intersection reported by the scene collaborator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RayHit {
    /// Part that was hit
    pub part: PartId,
    /// World-space hit position
    pub point: Vec3,
    /// Face normal in the part's local frame, if the intersector provided one
    pub normal: Option<Vec3>,
    /// Texture coordinate at the hit (origin bottom-left), if available
    pub uv: Option<Vec2>,
    /// Local-to-world transform of the hit part
    pub transform: Affine3A,
}

impl RayHit {
    /// A hit on an untransformed part
    pub fn new(part: PartId, normal: Option<Vec3>, uv: Option<Vec2>) -> Self {
        Self {
            part,
            point: Vec3::ZERO,
            normal,
            uv,
            transform: Affine3A::IDENTITY,
        }
    }

    pub fn with_transform(mut self, transform: Affine3A) -> Self {
        self.transform = transform;
        self
    }
}

/// Where a hit lands: part, cube face and grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolvedCell {
    pub part: PartId,
    pub face: CubeFace,
    pub cell: CellCoord,
}

/// Transform a local normal into world space using the normal matrix
/// (inverse transpose of the linear part). None for degenerate transforms.
pub fn world_normal(transform: &Affine3A, local: Vec3) -> Option<Vec3> {
    let linear = Mat3::from(transform.matrix3);
    if linear.determinant().abs() < f32::EPSILON {
        return None;
    }
    let normal = linear.inverse().transpose() * local;
    normal.is_finite().then_some(normal)
}

/// Face whose outward normal matches the dominant axis of `normal`.
///
/// Equal magnitudes resolve in x, y, z priority. The choice is arbitrary but
/// fixed, so identical inputs always pick the same face.
pub fn dominant_face(normal: Vec3) -> Option<CubeFace> {
    if !normal.is_finite() || normal == Vec3::ZERO {
        return None;
    }

    let abs = normal.abs();
    let face = if abs.x >= abs.y && abs.x >= abs.z {
        if normal.x > 0.0 {
            CubeFace::Right
        } else {
            CubeFace::Left
        }
    } else if abs.y >= abs.z {
        if normal.y > 0.0 {
            CubeFace::Top
        } else {
            CubeFace::Bottom
        }
    } else if normal.z > 0.0 {
        CubeFace::Front
    } else {
        CubeFace::Back
    };
    Some(face)
}

/// Grid cell under a UV coordinate.
///
/// V is flipped: UV origin is bottom-left while the grid origin is top-left.
/// Coordinates are clamped into the grid so `uv == 1.0` lands in the last cell.
pub fn grid_cell(uv: Vec2, grid_width: u32, grid_height: u32) -> Option<CellCoord> {
    if !uv.is_finite() || grid_width == 0 || grid_height == 0 {
        return None;
    }
    let u = uv.x.clamp(0.0, 1.0);
    let v = uv.y.clamp(0.0, 1.0);

    let x = ((u * grid_width as f32).floor() as u32).min(grid_width - 1);
    let y = (((1.0 - v) * grid_height as f32).floor() as u32).min(grid_height - 1);
    Some(CellCoord::new(x, y))
}

/// Resolve a hit to a face and cell of its part's grid.
///
/// Returns None when the hit is unresolvable (no normal, no UV, or a
/// degenerate normal); callers skip the paint in that case.
pub fn resolve(hit: &RayHit) -> Option<ResolvedCell> {
    let normal = hit.normal?;
    let uv = hit.uv?;

    let face = dominant_face(world_normal(&hit.transform, normal)?)?;
    let spec = hit.part.spec();
    let cell = grid_cell(uv, spec.grid_width, spec.grid_height)?;

    Some(ResolvedCell {
        part: hit.part,
        face,
        cell,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Quat;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_axis_faces() {
        assert_eq!(dominant_face(Vec3::X), Some(CubeFace::Right));
        assert_eq!(dominant_face(Vec3::NEG_X), Some(CubeFace::Left));
        assert_eq!(dominant_face(Vec3::Y), Some(CubeFace::Top));
        assert_eq!(dominant_face(Vec3::NEG_Y), Some(CubeFace::Bottom));
        assert_eq!(dominant_face(Vec3::Z), Some(CubeFace::Front));
        assert_eq!(dominant_face(Vec3::NEG_Z), Some(CubeFace::Back));
        assert_eq!(dominant_face(Vec3::new(0.2, -0.9, 0.3)), Some(CubeFace::Bottom));
    }

    #[test]
    fn test_tie_break_priority() {
        // x wins over y and z, y wins over z
        assert_eq!(dominant_face(Vec3::new(1.0, 1.0, 1.0)), Some(CubeFace::Right));
        assert_eq!(dominant_face(Vec3::new(-1.0, 1.0, 0.0)), Some(CubeFace::Left));
        assert_eq!(dominant_face(Vec3::new(0.0, -1.0, 1.0)), Some(CubeFace::Bottom));
        assert_eq!(dominant_face(Vec3::new(0.5, 0.0, -0.5)), Some(CubeFace::Right));
    }

    #[test]
    fn test_degenerate_normals() {
        assert_eq!(dominant_face(Vec3::ZERO), None);
        assert_eq!(dominant_face(Vec3::new(f32::NAN, 0.0, 1.0)), None);
    }

    #[test]
    fn test_grid_cell_flips_v() {
        // Top-left texel of the grid is at uv (0, 1)
        assert_eq!(grid_cell(Vec2::new(0.0, 1.0), 8, 8), Some(CellCoord::new(0, 0)));
        assert_eq!(grid_cell(Vec2::new(0.99, 0.01), 8, 8), Some(CellCoord::new(7, 7)));
        assert_eq!(grid_cell(Vec2::new(0.5, 0.5), 4, 12), Some(CellCoord::new(2, 6)));
        // Edges clamp into the grid
        assert_eq!(grid_cell(Vec2::new(1.0, 0.0), 4, 12), Some(CellCoord::new(3, 11)));
        assert_eq!(grid_cell(Vec2::new(f32::INFINITY, 0.0), 4, 12), None);
    }

    #[test]
    fn test_resolve_identity() {
        let hit = RayHit::new(PartId::Head, Some(Vec3::Z), Some(Vec2::new(0.3, 0.8)));
        let resolved = resolve(&hit).unwrap();
        assert_eq!(resolved.part, PartId::Head);
        assert_eq!(resolved.face, CubeFace::Front);
        // floor(0.3 * 8) = 2, floor(0.2 * 8) = 1
        assert_eq!(resolved.cell, CellCoord::new(2, 1));
    }

    #[test]
    fn test_resolve_uses_world_normal() {
        // Part rotated a quarter turn about Y: local +Z now faces world +X
        let transform = Affine3A::from_quat(Quat::from_rotation_y(FRAC_PI_2));
        let hit = RayHit::new(PartId::LeftArm, Some(Vec3::Z), Some(Vec2::new(0.1, 0.9)))
            .with_transform(transform);
        assert_eq!(resolve(&hit).unwrap().face, CubeFace::Right);

        // Non-uniform scale must not tilt the normal into the wrong face
        let scaled = Affine3A::from_scale(Vec3::new(0.5, 1.5, 0.5));
        let hit = RayHit::new(PartId::LeftArm, Some(Vec3::new(0.0, 0.0, -1.0)), Some(Vec2::ZERO))
            .with_transform(scaled);
        assert_eq!(resolve(&hit).unwrap().face, CubeFace::Back);
    }

    #[test]
    fn test_unresolvable_hits() {
        assert!(resolve(&RayHit::new(PartId::Body, None, Some(Vec2::ZERO))).is_none());
        assert!(resolve(&RayHit::new(PartId::Body, Some(Vec3::Z), None)).is_none());

        let flat = Affine3A::from_scale(Vec3::new(1.0, 0.0, 1.0));
        let hit = RayHit::new(PartId::Body, Some(Vec3::Z), Some(Vec2::ZERO)).with_transform(flat);
        assert!(resolve(&hit).is_none());
    }

    #[test]
    fn test_resolve_is_pure() {
        let hit = RayHit::new(PartId::RightLeg, Some(Vec3::new(0.7, 0.7, 0.0)), Some(Vec2::new(0.6, 0.4)));
        let first = resolve(&hit);
        for _ in 0..10 {
            assert_eq!(resolve(&hit), first);
        }
    }
}
