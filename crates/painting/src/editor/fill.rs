//! Iterative 4-connected flood fill over the logical buffer

use tracing::debug;

use crate::surface::Surface;
use crate::types::{CellCoord, Rgba};

/// Replace the region of cells exactly equal to the start cell's color.
///
/// Returns the number of cells changed. Out-of-range starts and fills whose
/// target already has the fill color change nothing.
pub fn flood_fill(buffer: &mut Surface, start: CellCoord, color: Rgba) -> usize {
    let Some(target) = buffer.get_pixel(start.x, start.y) else {
        return 0;
    };
    if target == color {
        debug!("Fill target already {}, nothing to do", color);
        return 0;
    }

    let (width, height) = (buffer.width, buffer.height);
    let mut visited = vec![false; (width as usize) * (height as usize)];
    let mut work = vec![start];
    let mut filled = 0;

    while let Some(cell) = work.pop() {
        let index = (cell.y as usize) * (width as usize) + (cell.x as usize);
        if visited[index] {
            continue;
        }
        visited[index] = true;

        if buffer.get_pixel(cell.x, cell.y) != Some(target) {
            continue;
        }
        buffer.set_pixel(cell.x, cell.y, color);
        filled += 1;

        if cell.x > 0 {
            work.push(CellCoord::new(cell.x - 1, cell.y));
        }
        if cell.x + 1 < width {
            work.push(CellCoord::new(cell.x + 1, cell.y));
        }
        if cell.y > 0 {
            work.push(CellCoord::new(cell.x, cell.y - 1));
        }
        if cell.y + 1 < height {
            work.push(CellCoord::new(cell.x, cell.y + 1));
        }
    }

    debug!("Filled {} cells from ({}, {})", filled, start.x, start.y);
    filled
}
