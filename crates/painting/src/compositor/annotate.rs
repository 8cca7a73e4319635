//! Orientation guides for the annotated template

use crate::constants::{SECTION_CELLS, TEMPLATE_SIZE};
use crate::parts::{OVERLAY_OUTLINES, REGION_LABELS};
use crate::surface::Surface;
use crate::types::{Rect, Rgba};

const GRID_COLOR: Rgba = Rgba::rgba(200, 200, 200, 51);
const OUTLINE_COLOR: Rgba = Rgba::rgba(0, 0, 0, 77);
const LABEL_COLOR: Rgba = Rgba::rgba(0, 0, 0, 128);

/// 3x5 glyphs, one row per byte, high bit on the left
const GLYPH_WIDTH: u32 = 3;
const GLYPH_ADVANCE: u32 = GLYPH_WIDTH + 1;

fn glyph(c: char) -> Option<[u8; 5]> {
    let rows = match c {
        'A' => [0b010, 0b101, 0b111, 0b101, 0b101],
        'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'E' => [0b111, 0b100, 0b110, 0b100, 0b111],
        'G' => [0b011, 0b100, 0b101, 0b101, 0b011],
        'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'M' => [0b101, 0b111, 0b111, 0b101, 0b101],
        'O' => [0b010, 0b101, 0b101, 0b101, 0b010],
        'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        'Y' => [0b101, 0b101, 0b010, 0b010, 0b010],
        _ => return None,
    };
    Some(rows)
}

/// Faint lines every section, drawn first so faces cover them
pub(super) fn draw_section_grid(surface: &mut Surface) {
    for i in (0..TEMPLATE_SIZE).step_by(SECTION_CELLS as usize) {
        for j in 0..TEMPLATE_SIZE {
            surface.blend_pixel(i, j, GRID_COLOR);
            // Crossings were already covered by the vertical line
            if j % SECTION_CELLS != 0 {
                surface.blend_pixel(j, i, GRID_COLOR);
            }
        }
    }
}

fn stroke_rect(surface: &mut Surface, rect: Rect, color: Rgba) {
    if rect.is_empty() {
        return;
    }
    let (right, bottom) = (rect.right() - 1, rect.bottom() - 1);
    for x in rect.x..=right {
        surface.blend_pixel(x, rect.y, color);
        if bottom != rect.y {
            surface.blend_pixel(x, bottom, color);
        }
    }
    for y in rect.y + 1..bottom {
        surface.blend_pixel(rect.x, y, color);
        if right != rect.x {
            surface.blend_pixel(right, y, color);
        }
    }
}

pub(super) fn draw_overlay_outlines(surface: &mut Surface) {
    for rect in &OVERLAY_OUTLINES {
        stroke_rect(surface, *rect, OUTLINE_COLOR);
    }
}

fn draw_text(surface: &mut Surface, text: &str, x: u32, y: u32, color: Rgba) {
    let mut pen = x;
    for c in text.chars() {
        if let Some(rows) = glyph(c) {
            for (dy, row) in rows.iter().enumerate() {
                for dx in 0..GLYPH_WIDTH {
                    if row & (0b100 >> dx) != 0 {
                        surface.blend_pixel(pen + dx, y + dy as u32, color);
                    }
                }
            }
        }
        pen += GLYPH_ADVANCE;
    }
}

pub(super) fn draw_labels(surface: &mut Surface) {
    for (text, x, y) in REGION_LABELS {
        draw_text(surface, text, x, y, LABEL_COLOR);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_glyphs_exist() {
        for (text, _, _) in REGION_LABELS {
            for c in text.chars().filter(|c| *c != ' ') {
                assert!(glyph(c).is_some(), "missing glyph {c:?}");
            }
        }
    }

    #[test]
    fn test_grid_blends_once_per_pixel() {
        let mut surface = Surface::new(TEMPLATE_SIZE, TEMPLATE_SIZE);
        draw_section_grid(&mut surface);
        // Crossing points are not darkened twice
        assert_eq!(surface.get_pixel(8, 8), Some(GRID_COLOR));
        assert_eq!(surface.get_pixel(8, 3), Some(GRID_COLOR));
        assert_eq!(surface.get_pixel(3, 3), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn test_stroke_rect_border_only() {
        let mut surface = Surface::new(8, 8);
        stroke_rect(&mut surface, Rect::new(1, 1, 4, 4), Rgba::BLACK);
        assert_eq!(surface.get_pixel(1, 1), Some(Rgba::BLACK));
        assert_eq!(surface.get_pixel(4, 4), Some(Rgba::BLACK));
        assert_eq!(surface.get_pixel(2, 2), Some(Rgba::TRANSPARENT));
        assert_eq!(surface.pixels().iter().filter(|p| **p == Rgba::BLACK).count(), 12);
    }
}
