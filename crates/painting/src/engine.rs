//! Paint engine: owns every part raster and the cached composite.
//!
//! All mutation of part rasters goes through here so the composite cache is
//! invalidated in exactly one place.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::compositor::{self, CompositeTemplate};
use crate::constants::{MAX_BRUSH_SIZE, MIN_BRUSH_SIZE, PART_SURFACE_SIZE};
use crate::face::{self, RayHit, ResolvedCell};
use crate::raster::PartRaster;
use crate::store::ColorStore;
use crate::types::{CellCoord, CubeFace, PartId, Rgba};

pub struct PaintEngine {
    rasters: HashMap<PartId, PartRaster>,
    store: Box<dyn ColorStore>,
    /// None means dirty: regenerate on next request
    cached_template: Option<CompositeTemplate>,
}

impl PaintEngine {
    /// Create rasters for all six parts with the default surface size
    pub fn new(store: Box<dyn ColorStore>) -> Self {
        Self::with_surface_size(store, PART_SURFACE_SIZE)
    }

    /// Create rasters for all six parts. Each starts from its stored color,
    /// falling back to the part's base color.
    pub fn with_surface_size(store: Box<dyn ColorStore>, surface_size: u32) -> Self {
        let rasters = PartId::ALL
            .into_iter()
            .map(|part| {
                let color = store.load(part).unwrap_or(part.spec().base_color);
                debug!("Creating {} raster with {}", part, color);
                (part, PartRaster::new(part, surface_size, color))
            })
            .collect();

        Self {
            rasters,
            store,
            cached_template: None,
        }
    }

    /// Raster of a part. Every part has one for the engine's whole lifetime.
    pub fn raster(&self, part: PartId) -> &PartRaster {
        self.rasters
            .get(&part)
            .unwrap_or_else(|| panic!("no backing surface for part {part}"))
    }

    fn raster_mut(&mut self, part: PartId) -> &mut PartRaster {
        self.rasters
            .get_mut(&part)
            .unwrap_or_else(|| panic!("no backing surface for part {part}"))
    }

    /// Rasters in [`PartId::ALL`] order
    pub fn rasters(&self) -> impl Iterator<Item = &PartRaster> {
        PartId::ALL.into_iter().map(|part| self.raster(part))
    }

    fn invalidate(&mut self) {
        if self.cached_template.take().is_some() {
            debug!("Composite template invalidated");
        }
    }

    /// True when the next [`template`](Self::template) call will regenerate
    pub fn is_template_dirty(&self) -> bool {
        self.cached_template.is_none()
    }

    /// Paint one grid cell of a part as seen from `face`.
    ///
    /// Off-grid cells are ignored and return false. On limbs the face is
    /// recorded as the cell's owner and the raster is reconciled so every
    /// tracked cell shows its owning face's paint.
    pub fn paint(&mut self, part: PartId, face: CubeFace, cell: CellCoord, color: Rgba) -> bool {
        let raster = self.raster_mut(part);
        if !raster.fill_cell(cell, color) {
            debug!("{} cell ({}, {}) is off-grid, skipping", part, cell.x, cell.y);
            return false;
        }

        if part.is_limb() {
            raster.record_face_paint(cell, face, color);
            raster.reconcile_provenance();
        }

        self.invalidate();
        true
    }

    /// Resolve a ray hit and paint the cell under it.
    ///
    /// Unresolvable hits change nothing and return None.
    pub fn paint_hit(&mut self, hit: &RayHit, color: Rgba) -> Option<ResolvedCell> {
        let Some(resolved) = face::resolve(hit) else {
            debug!("Unresolvable hit on {}, skipping paint", hit.part);
            return None;
        };
        self.paint(resolved.part, resolved.face, resolved.cell, color)
            .then_some(resolved)
    }

    /// Paint a square brush of `size` cells centered on a resolved cell.
    ///
    /// Even sizes extend one cell further right and down. Cells falling off
    /// the grid are skipped. Returns the number of cells painted.
    pub fn paint_brush(&mut self, target: ResolvedCell, size: u32, color: Rgba) -> usize {
        let size = size.clamp(MIN_BRUSH_SIZE, MAX_BRUSH_SIZE) as i64;
        let before = (size - 1) / 2;
        let after = size / 2;

        let mut painted = 0;
        for dy in -before..=after {
            for dx in -before..=after {
                let x = target.cell.x as i64 + dx;
                let y = target.cell.y as i64 + dy;
                if x < 0 || y < 0 {
                    continue;
                }
                let cell = CellCoord::new(x as u32, y as u32);
                if self.paint(target.part, target.face, cell, color) {
                    painted += 1;
                }
            }
        }
        painted
    }

    /// Fill a whole part with one color and persist it as the part's color
    pub fn recolor(&mut self, part: PartId, color: Rgba) {
        self.raster_mut(part).clear(color);
        if let Err(e) = self.store.save(part, color) {
            warn!("Failed to persist color for {}: {}", part, e);
        }
        info!("Recolored {} to {}", part, color);
        self.invalidate();
    }

    /// Current composite, regenerated if any raster changed since the last call
    pub fn template(&mut self) -> &CompositeTemplate {
        if self.cached_template.is_none() {
            info!("Regenerating composite template");
        }
        let rasters = &self.rasters;
        self.cached_template.get_or_insert_with(|| {
            compositor::export_template(PartId::ALL.iter().filter_map(|part| rasters.get(part)))
        })
    }

    /// Composite with guides for human editing. Never cached.
    pub fn annotated_template(&self) -> CompositeTemplate {
        compositor::export_annotated_template(self.rasters())
    }

    /// Write a flat template back into all part rasters
    pub fn import_template(&mut self, template: &CompositeTemplate) {
        compositor::import_template(template, self.rasters.values_mut());
        self.invalidate();
    }

    /// Import an edited template and keep it as the current composite.
    ///
    /// The slicing is lossy, so the edited image itself stays the export
    /// until the next raster mutation invalidates it.
    pub fn adopt_template(&mut self, template: CompositeTemplate) {
        self.import_template(&template);
        self.cached_template = Some(template);
        info!("Adopted edited template");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compositor::slice_rect;
    use crate::store::MemoryColorStore;
    use crate::types::Rect;
    use glam::{Vec2, Vec3};

    const RED: Rgba = Rgba::rgb(255, 0, 0);
    const BLUE: Rgba = Rgba::rgb(0, 0, 255);

    fn engine() -> PaintEngine {
        PaintEngine::new(Box::new(MemoryColorStore::new()))
    }

    /// Store whose writes can be inspected after it is boxed into the engine
    #[derive(Clone, Default)]
    struct SharedStore(std::rc::Rc<std::cell::RefCell<MemoryColorStore>>);

    impl ColorStore for SharedStore {
        fn load(&self, part: PartId) -> Option<Rgba> {
            self.0.borrow().load(part)
        }

        fn save(&mut self, part: PartId, color: Rgba) -> Result<(), crate::error::StoreError> {
            self.0.borrow_mut().save(part, color)
        }
    }

    #[test]
    fn test_rasters_start_from_store_or_base() {
        let mut store = MemoryColorStore::new();
        store.save(PartId::Body, RED).unwrap();
        let engine = PaintEngine::new(Box::new(store));

        assert_eq!(engine.raster(PartId::Body).cell_color(CellCoord::new(0, 0)), Some(RED));
        assert_eq!(
            engine.raster(PartId::Head).cell_color(CellCoord::new(0, 0)),
            Some(PartId::Head.spec().base_color)
        );
    }

    #[test]
    fn test_paint_fills_exactly_one_cell() {
        for part in PartId::ALL {
            let mut engine = engine();
            let base = part.spec().base_color;
            let (gw, gh) = (part.spec().grid_width, part.spec().grid_height);
            let cell = CellCoord::new(gw - 1, gh / 2);

            assert!(engine.paint(part, CubeFace::Front, cell, RED));

            let raster = engine.raster(part);
            let rect = raster.cell_rect(cell).unwrap();
            let surface = raster.surface();
            for y in 0..surface.height {
                for x in 0..surface.width {
                    let expected = if rect.contains(x, y) { RED } else { base };
                    assert_eq!(surface.get_pixel(x, y), Some(expected), "{part} at ({x}, {y})");
                }
            }
        }
    }

    #[test]
    fn test_out_of_range_is_noop() {
        let mut engine = engine();
        let _ = engine.template();
        assert!(!engine.paint(PartId::Head, CubeFace::Front, CellCoord::new(8, 0), RED));
        assert!(!engine.paint(PartId::LeftArm, CubeFace::Front, CellCoord::new(0, 12), RED));
        assert!(!engine.is_template_dirty());
        assert!(engine.raster(PartId::LeftArm).provenance(CellCoord::new(0, 12)).is_none());
    }

    #[test]
    fn test_limb_provenance_last_face_wins() {
        let mut engine = engine();
        let cell = CellCoord::new(1, 3);

        engine.paint(PartId::LeftArm, CubeFace::Front, cell, RED);
        engine.paint(PartId::LeftArm, CubeFace::Right, cell, BLUE);
        let raster = engine.raster(PartId::LeftArm);
        assert_eq!(raster.cell_color(cell), Some(BLUE));
        assert_eq!(raster.face_paint(cell, CubeFace::Front), Some(RED));

        engine.paint(PartId::LeftArm, CubeFace::Front, cell, RED);
        let raster = engine.raster(PartId::LeftArm);
        assert_eq!(raster.cell_color(cell), Some(RED));
        assert_eq!(raster.provenance(cell).unwrap().owner, CubeFace::Front);
    }

    #[test]
    fn test_limb_reconcile_keeps_untracked_cells() {
        let mut engine = engine();
        let base = PartId::RightLeg.spec().base_color;
        engine.paint(PartId::RightLeg, CubeFace::Back, CellCoord::new(0, 0), RED);
        engine.paint(PartId::RightLeg, CubeFace::Left, CellCoord::new(3, 11), BLUE);

        let raster = engine.raster(PartId::RightLeg);
        assert_eq!(raster.cell_color(CellCoord::new(0, 0)), Some(RED));
        assert_eq!(raster.cell_color(CellCoord::new(3, 11)), Some(BLUE));
        assert_eq!(raster.cell_color(CellCoord::new(2, 6)), Some(base));
    }

    #[test]
    fn test_head_has_no_provenance() {
        let mut engine = engine();
        let cell = CellCoord::new(4, 4);
        engine.paint(PartId::Head, CubeFace::Top, cell, RED);
        assert!(engine.raster(PartId::Head).provenance(cell).is_none());
    }

    #[test]
    fn test_paint_hit() {
        let mut engine = engine();
        let hit = RayHit::new(PartId::Body, Some(Vec3::Z), Some(Vec2::new(0.01, 0.99)));
        let resolved = engine.paint_hit(&hit, RED).unwrap();
        assert_eq!(resolved.cell, CellCoord::new(0, 0));
        assert_eq!(resolved.face, CubeFace::Front);
        assert_eq!(engine.raster(PartId::Body).cell_color(CellCoord::new(0, 0)), Some(RED));

        // Missing UV: nothing happens
        let _ = engine.template();
        let hit = RayHit::new(PartId::Body, Some(Vec3::Z), None);
        assert!(engine.paint_hit(&hit, BLUE).is_none());
        assert!(!engine.is_template_dirty());
    }

    #[test]
    fn test_paint_brush_clips_to_grid() {
        let mut engine = engine();
        let target = ResolvedCell {
            part: PartId::Head,
            face: CubeFace::Front,
            cell: CellCoord::new(0, 0),
        };
        // 3x3 centered on a corner: only the 2x2 inside the grid lands
        assert_eq!(engine.paint_brush(target, 3, RED), 4);
        assert_eq!(engine.paint_brush(target, 1, BLUE), 1);
        // Oversized brushes are clamped
        assert_eq!(engine.paint_brush(target, 50, RED), 36);
    }

    #[test]
    fn test_recolor_persists_and_resets() {
        let store = SharedStore::default();
        let mut engine = PaintEngine::new(Box::new(store.clone()));
        let cell = CellCoord::new(0, 0);
        engine.paint(PartId::LeftLeg, CubeFace::Front, cell, RED);

        engine.recolor(PartId::LeftLeg, BLUE);
        let raster = engine.raster(PartId::LeftLeg);
        assert!(raster.surface().rect_is(Rect::new(0, 0, 64, 64), BLUE));
        assert!(raster.provenance(cell).is_none());
        assert_eq!(store.load(PartId::LeftLeg), Some(BLUE));
    }

    #[test]
    fn test_template_cache_invalidation() {
        let mut engine = engine();
        assert!(engine.is_template_dirty());
        let _ = engine.template();
        assert!(!engine.is_template_dirty());

        engine.paint(PartId::Head, CubeFace::Front, CellCoord::new(0, 0), RED);
        assert!(engine.is_template_dirty());

        let _ = engine.template();
        engine.recolor(PartId::Body, RED);
        assert!(engine.is_template_dirty());
    }

    #[test]
    fn test_recolor_export_import_end_to_end() {
        let mut engine = engine();
        engine.recolor(PartId::Head, Rgba::from_hex("#ff0000").unwrap());

        let template = engine.template().clone();
        assert_eq!(template.pixel(8, 8), Some(RED));

        engine.import_template(&template);
        let head = engine.raster(PartId::Head);
        assert!(head.surface().rect_is(slice_rect(64, 64, 0), RED));
        assert_eq!(engine.template(), &template);
    }

    #[test]
    fn test_adopt_template_keeps_edits() {
        let mut engine = engine();
        let mut surface = engine.template().surface().clone();
        // A single-pixel edit the thirds slicing cannot reproduce on its own
        surface.set_pixel(9, 9, RED);
        let edited = CompositeTemplate::from_surface(surface).unwrap();

        engine.adopt_template(edited.clone());
        assert!(!engine.is_template_dirty());
        assert_eq!(engine.template(), &edited);

        engine.paint(PartId::Body, CubeFace::Front, CellCoord::new(0, 0), BLUE);
        assert!(engine.is_template_dirty());
    }
}
