//! Per-part paint grid over a fixed-resolution backing surface.
//!
//! The logical grid (8x8 head, 8x12 body, 4x12 limbs) is mapped onto the
//! surface by integer division, so cells tile the surface exactly:
//! cell `g` of `G` spans `[g * S / G, (g + 1) * S / G)` along each axis.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::parts::PartSpec;
use crate::surface::Surface;
use crate::types::{CellCoord, CubeFace, PartId, Rect, Rgba};

/// Which faces have painted a shared limb cell, and which one currently owns it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellProvenance {
    /// Face whose paint is currently visible
    pub owner: CubeFace,
    /// Last paint recorded per face
    pub paints: BTreeMap<CubeFace, Rgba>,
}

impl CellProvenance {
    /// Color the cell should show: the owner's recorded paint
    pub fn visible(&self) -> Option<Rgba> {
        self.paints.get(&self.owner).copied()
    }
}

/// One body part's paint state
#[derive(Debug, Clone)]
pub struct PartRaster {
    spec: &'static PartSpec,
    surface: Surface,
    /// Limb-only face provenance, keyed by grid cell
    provenance: HashMap<CellCoord, CellProvenance>,
}

impl PartRaster {
    /// Create a raster with a square backing surface cleared to `color`
    pub fn new(part: PartId, surface_size: u32, color: Rgba) -> Self {
        Self {
            spec: part.spec(),
            surface: Surface::filled(surface_size, surface_size, color),
            provenance: HashMap::new(),
        }
    }

    #[inline]
    pub fn part(&self) -> PartId {
        self.spec.id
    }

    #[inline]
    pub fn spec(&self) -> &'static PartSpec {
        self.spec
    }

    #[inline]
    pub fn grid_width(&self) -> u32 {
        self.spec.grid_width
    }

    #[inline]
    pub fn grid_height(&self) -> u32 {
        self.spec.grid_height
    }

    #[inline]
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    #[inline]
    pub(crate) fn surface_mut(&mut self) -> &mut Surface {
        &mut self.surface
    }

    #[inline]
    pub fn contains_cell(&self, cell: CellCoord) -> bool {
        cell.x < self.grid_width() && cell.y < self.grid_height()
    }

    /// Surface rectangle covered by a grid cell, or None if the cell is off-grid
    pub fn cell_rect(&self, cell: CellCoord) -> Option<Rect> {
        if !self.contains_cell(cell) {
            return None;
        }
        let (sw, sh) = (self.surface.width, self.surface.height);
        let (gw, gh) = (self.grid_width(), self.grid_height());

        let x0 = cell.x * sw / gw;
        let x1 = (cell.x + 1) * sw / gw;
        let y0 = cell.y * sh / gh;
        let y1 = (cell.y + 1) * sh / gh;
        Some(Rect::new(x0, y0, x1 - x0, y1 - y0))
    }

    /// Color of a cell, read from its top-left surface pixel
    pub fn cell_color(&self, cell: CellCoord) -> Option<Rgba> {
        let rect = self.cell_rect(cell)?;
        self.surface.get_pixel(rect.x, rect.y)
    }

    /// Fill a single cell. Returns false for off-grid cells.
    pub fn fill_cell(&mut self, cell: CellCoord, color: Rgba) -> bool {
        match self.cell_rect(cell) {
            Some(rect) => {
                self.surface.fill_rect(rect, color);
                true
            }
            None => false,
        }
    }

    /// Clear the whole surface and forget all face provenance
    pub fn clear(&mut self, color: Rgba) {
        self.surface.clear(color);
        self.provenance.clear();
    }

    pub(crate) fn reset_provenance(&mut self) {
        self.provenance.clear();
    }

    /// Provenance record for a cell, if any face has painted it
    pub fn provenance(&self, cell: CellCoord) -> Option<&CellProvenance> {
        self.provenance.get(&cell)
    }

    /// Last paint a particular face left on a cell, even if another face now owns it
    pub fn face_paint(&self, cell: CellCoord, face: CubeFace) -> Option<Rgba> {
        self.provenance.get(&cell)?.paints.get(&face).copied()
    }

    /// Record that `face` just painted `cell` and make it the cell's owner
    pub(crate) fn record_face_paint(&mut self, cell: CellCoord, face: CubeFace, color: Rgba) {
        let entry = self.provenance.entry(cell).or_insert_with(|| CellProvenance {
            owner: face,
            paints: BTreeMap::new(),
        });
        if entry.owner != face {
            debug!(
                "{} cell ({}, {}) moves from {:?} to {:?}",
                self.spec.id, cell.x, cell.y, entry.owner, face
            );
        }
        entry.owner = face;
        entry.paints.insert(face, color);
    }

    /// Repaint every tracked cell from its owning face. Untracked cells keep their pixels.
    pub(crate) fn reconcile_provenance(&mut self) {
        let cells: Vec<(CellCoord, Rgba)> = self
            .provenance
            .iter()
            .filter_map(|(cell, record)| record.visible().map(|color| (*cell, color)))
            .collect();

        for (cell, color) in cells {
            self.fill_cell(cell, color);
        }
    }
}
