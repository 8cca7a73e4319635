//! Zoomable on-screen rendering of the editor buffer.
//!
//! The view is derived state: it is redrawn from the logical buffer whenever
//! the scale changes, so zooming never resamples stored pixels.

use glam::{IVec2, Vec2};

use crate::constants::SECTION_CELLS;
use crate::surface::Surface;
use crate::types::{CellCoord, Rect, Rgba};

const BACKGROUND: Rgba = Rgba::WHITE;
const GRID_LIGHT: Rgba = Rgba::rgb(224, 224, 224);
/// Section dividers every [`SECTION_CELLS`] cells
const GRID_DARK: Rgba = Rgba::rgb(160, 160, 160);

#[derive(Debug, Clone)]
pub struct EditorView {
    pixel_size: f32,
    cells: u32,
    canvas: Surface,
}

impl EditorView {
    /// A view of a `cells` x `cells` grid with an empty buffer drawn
    pub fn new(pixel_size: f32, cells: u32) -> Self {
        let mut view = Self {
            pixel_size,
            cells,
            canvas: Surface::new(0, 0),
        };
        view.redraw(&Surface::new(cells, cells));
        view
    }

    pub fn pixel_size(&self) -> f32 {
        self.pixel_size
    }

    /// Rendered canvas, one grid line wider than the cells it covers
    pub fn canvas(&self) -> &Surface {
        &self.canvas
    }

    /// Change scale and redraw `buffer` at the new size
    pub fn set_pixel_size(&mut self, pixel_size: f32, buffer: &Surface) {
        self.pixel_size = pixel_size;
        self.redraw(buffer);
    }

    #[inline]
    fn edge(&self, index: u32) -> u32 {
        (index as f32 * self.pixel_size).floor() as u32
    }

    /// Canvas pixels covered by a cell. The left column and top row carry grid lines.
    pub fn cell_rect(&self, cell: CellCoord) -> Rect {
        let (x0, y0) = (self.edge(cell.x), self.edge(cell.y));
        Rect::new(
            x0,
            y0,
            self.edge(cell.x + 1) - x0,
            self.edge(cell.y + 1) - y0,
        )
    }

    /// Grid cell under a canvas position. May be out of range.
    pub fn cell_at(&self, pos: Vec2) -> IVec2 {
        (pos / self.pixel_size).floor().as_ivec2()
    }

    /// Rebuild the whole canvas from the logical buffer
    pub fn redraw(&mut self, buffer: &Surface) {
        let size = self.edge(self.cells) + 1;
        self.canvas = Surface::filled(size, size, BACKGROUND);

        for y in 0..self.cells {
            for x in 0..self.cells {
                let cell = CellCoord::new(x, y);
                match buffer.get_pixel(x, y) {
                    Some(color) if !color.is_transparent() => self.draw_cell(cell, color),
                    _ => self.erase_cell(cell),
                }
            }
        }

        // Closing lines on the far edges
        let end = self.edge(self.cells);
        let far = if self.cells % SECTION_CELLS == 0 {
            GRID_DARK
        } else {
            GRID_LIGHT
        };
        self.canvas.fill_rect(Rect::new(end, 0, 1, size), far);
        self.canvas.fill_rect(Rect::new(0, end, size, 1), far);
    }

    /// Paint a cell over its empty rendering
    pub fn draw_cell(&mut self, cell: CellCoord, color: Rgba) {
        self.erase_cell(cell);
        let rect = self.cell_rect(cell);
        for y in rect.y..rect.bottom() {
            for x in rect.x..rect.right() {
                self.canvas.blend_pixel(x, y, color);
            }
        }
    }

    /// Clear a cell to the background and restore its grid lines
    pub fn erase_cell(&mut self, cell: CellCoord) {
        let rect = self.cell_rect(cell);
        self.canvas.fill_rect(rect, BACKGROUND);

        let line = |index: u32| {
            if index % SECTION_CELLS == 0 {
                GRID_DARK
            } else {
                GRID_LIGHT
            }
        };
        self.canvas
            .fill_rect(Rect::new(rect.x, rect.y, 1, rect.h), line(cell.x));
        self.canvas
            .fill_rect(Rect::new(rect.x, rect.y, rect.w, 1), line(cell.y));
        // Corner pixel takes the heavier of the two lines
        if cell.x % SECTION_CELLS == 0 || cell.y % SECTION_CELLS == 0 {
            self.canvas.set_pixel(rect.x, rect.y, GRID_DARK);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba = Rgba::rgb(255, 0, 0);

    #[test]
    fn test_canvas_size_follows_pixel_size() {
        let mut view = EditorView::new(10.0, 64);
        assert_eq!(view.canvas().width, 641);

        view.set_pixel_size(2.0, &Surface::new(64, 64));
        assert_eq!(view.canvas().width, 129);
        assert_eq!(view.canvas().height, 129);
    }

    #[test]
    fn test_cell_at_floors() {
        let view = EditorView::new(10.0, 64);
        assert_eq!(view.cell_at(Vec2::new(0.0, 9.9)), IVec2::new(0, 0));
        assert_eq!(view.cell_at(Vec2::new(10.0, 25.0)), IVec2::new(1, 2));
        assert_eq!(view.cell_at(Vec2::new(-0.5, 700.0)), IVec2::new(-1, 70));
    }

    #[test]
    fn test_grid_lines() {
        let view = EditorView::new(10.0, 64);
        let canvas = view.canvas();
        assert_eq!(canvas.get_pixel(10, 5), Some(GRID_LIGHT));
        assert_eq!(canvas.get_pixel(80, 5), Some(GRID_DARK));
        assert_eq!(canvas.get_pixel(5, 0), Some(GRID_DARK));
        assert_eq!(canvas.get_pixel(15, 15), Some(BACKGROUND));
        assert_eq!(canvas.get_pixel(640, 640), Some(GRID_DARK));
    }

    #[test]
    fn test_erase_restores_cell() {
        let mut view = EditorView::new(10.0, 64);
        let pristine = view.canvas().clone();

        let cell = CellCoord::new(8, 3);
        view.draw_cell(cell, RED);
        assert_eq!(view.canvas().get_pixel(85, 35), Some(RED));
        assert_ne!(view.canvas(), &pristine);

        view.erase_cell(cell);
        assert_eq!(view.canvas(), &pristine);
    }

    #[test]
    fn test_fractional_pixel_size_tiles() {
        let view = EditorView::new(7.5, 64);
        let a = view.cell_rect(CellCoord::new(0, 0));
        let b = view.cell_rect(CellCoord::new(1, 0));
        assert_eq!(a.right(), b.x);
        assert_eq!(view.cell_rect(CellCoord::new(63, 63)).right(), 480);
    }
}
