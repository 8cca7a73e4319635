//! CPU pixel surface backing every part texture, the composite and the editor canvas

use std::io::Cursor;

use image::{ImageFormat, RgbaImage};

use crate::error::TemplateError;
use crate::types::{Rect, Rgba};

/// An 8-bit RGBA CPU surface
/// Stores pixels row-major as [`Rgba`] so the data can be uploaded or encoded as-is
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    /// Surface dimensions
    pub width: u32,
    pub height: u32,
    pixels: Vec<Rgba>,
}

impl Surface {
    /// Create a new surface with the given dimensions, initialized to transparent
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Rgba::TRANSPARENT)
    }

    /// Create a surface cleared to a solid color
    pub fn filled(width: u32, height: u32, color: Rgba) -> Self {
        let pixel_count = (width as usize) * (height as usize);
        Self {
            width,
            height,
            pixels: vec![color; pixel_count],
        }
    }

    /// Clear the surface to a solid color
    pub fn clear(&mut self, color: Rgba) {
        self.pixels.fill(color);
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    /// Get a pixel at the given coordinates
    /// Returns None if coordinates are out of bounds
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Set a pixel at the given coordinates
    /// Does nothing if coordinates are out of bounds
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgba) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    /// Composite a color over an existing pixel (source-over)
    #[inline]
    pub fn blend_pixel(&mut self, x: u32, y: u32, color: Rgba) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = self.pixels[i].blend(color);
        }
    }

    /// Overwrite every pixel of `rect` (clipped to the surface) with `color`
    pub fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        let rect = rect.clip(self.width, self.height);
        for y in rect.y..rect.bottom() {
            let row = (y as usize) * (self.width as usize);
            let start = row + rect.x as usize;
            let end = row + rect.right() as usize;
            self.pixels[start..end].fill(color);
        }
    }

    /// True if every pixel in `rect` equals `color`
    pub fn rect_is(&self, rect: Rect, color: Rgba) -> bool {
        let rect = rect.clip(self.width, self.height);
        (rect.y..rect.bottom())
            .all(|y| (rect.x..rect.right()).all(|x| self.get_pixel(x, y) == Some(color)))
    }

    /// Nearest-neighbor copy of `src_rect` of this surface into `dst_rect` of `dst`.
    ///
    /// Each destination pixel samples `src.x + dx * src.w / dst.w` (integer floor),
    /// so hard pixel edges survive any scale factor.
    pub fn blit_scaled(&self, src_rect: Rect, dst: &mut Surface, dst_rect: Rect) {
        if src_rect.is_empty() || dst_rect.is_empty() {
            return;
        }

        for dy in 0..dst_rect.h {
            let sy = src_rect.y + dy * src_rect.h / dst_rect.h;
            for dx in 0..dst_rect.w {
                let sx = src_rect.x + dx * src_rect.w / dst_rect.w;
                if let Some(color) = self.get_pixel(sx, sy) {
                    dst.set_pixel(dst_rect.x + dx, dst_rect.y + dy, color);
                }
            }
        }
    }

    /// Get raw pixel data for upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Get the total number of pixels
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    #[inline]
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [Rgba] {
        &mut self.pixels
    }

    /// Copy into an `image` buffer for encoding
    pub fn to_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width, self.height, |x, y| {
            self.get_pixel(x, y).unwrap_or(Rgba::TRANSPARENT).into()
        })
    }

    /// Encode as a lossless PNG
    pub fn encode_png(&self) -> Result<Vec<u8>, TemplateError> {
        let mut bytes = Vec::new();
        self.to_image()
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(TemplateError::Encode)?;
        Ok(bytes)
    }

    pub fn from_image(image: &RgbaImage) -> Self {
        let pixels = image.pixels().map(|p| Rgba::from(*p)).collect();
        Self {
            width: image.width(),
            height: image.height(),
            pixels,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_surface() {
        let surface = Surface::new(64, 64);
        assert_eq!(surface.width, 64);
        assert_eq!(surface.height, 64);
        assert_eq!(surface.pixel_count(), 4096);
        assert_eq!(surface.get_pixel(0, 0), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn test_get_set_pixel() {
        let mut surface = Surface::new(10, 10);
        let color = Rgba::rgb(255, 128, 64);

        surface.set_pixel(5, 5, color);
        assert_eq!(surface.get_pixel(5, 5), Some(color));

        // Out of bounds reads None and writes are dropped
        assert_eq!(surface.get_pixel(100, 100), None);
        surface.set_pixel(10, 0, color);
        assert_eq!(surface.pixels().iter().filter(|p| **p == color).count(), 1);
    }

    #[test]
    fn test_fill_rect_clips() {
        let mut surface = Surface::new(8, 8);
        let red = Rgba::rgb(255, 0, 0);

        surface.fill_rect(Rect::new(6, 6, 4, 4), red);
        assert!(surface.rect_is(Rect::new(6, 6, 2, 2), red));
        assert_eq!(surface.pixels().iter().filter(|p| **p == red).count(), 4);
    }

    #[test]
    fn test_blit_scaled_nearest() {
        // 2x1 source stretched to 4x2: each source pixel becomes a 2x2 block
        let mut src = Surface::new(2, 1);
        src.set_pixel(0, 0, Rgba::BLACK);
        src.set_pixel(1, 0, Rgba::WHITE);

        let mut dst = Surface::new(4, 2);
        src.blit_scaled(Rect::new(0, 0, 2, 1), &mut dst, Rect::new(0, 0, 4, 2));

        assert!(dst.rect_is(Rect::new(0, 0, 2, 2), Rgba::BLACK));
        assert!(dst.rect_is(Rect::new(2, 0, 2, 2), Rgba::WHITE));
    }

    #[test]
    fn test_image_conversion() {
        let mut surface = Surface::new(3, 2);
        surface.set_pixel(2, 1, Rgba::rgb(1, 2, 3));

        let image = surface.to_image();
        assert_eq!(image.get_pixel(2, 1).0, [1, 2, 3, 255]);
        assert_eq!(Surface::from_image(&image), surface);
    }

    #[test]
    fn test_as_bytes() {
        let surface = Surface::new(2, 2);
        // 4 pixels * 4 bytes
        assert_eq!(surface.as_bytes().len(), 16);
    }
}
