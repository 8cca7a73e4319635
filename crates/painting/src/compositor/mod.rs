//! Flat 64x64 skin template <-> per-part backing surfaces.
//!
//! Export reads one slice of each part surface per face and scales it,
//! nearest-neighbor, into that face's fixed template rectangle. Import runs
//! the same mapping backwards.
//!
//! The slice for face slot `s` is the `s % 3` column and `s / 3` row of a
//! 3x2 split of the surface. This is an approximation of the real UV layout
//! of a box: it does not follow the grid cells painted from 3D, and scaled
//! slices are only reproduced exactly by an export/import round trip when
//! they are uniform in color. The approximation is kept so templates stay
//! compatible with earlier exports.

mod annotate;

use image::RgbaImage;
use tracing::debug;

use crate::constants::{SLICE_COLUMNS, SLICE_ROWS, TEMPLATE_SIZE};
use crate::error::TemplateError;
use crate::raster::PartRaster;
use crate::surface::Surface;
use crate::types::{Rect, Rgba};

/// The exported 64x64 skin image. Always derived from the part rasters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeTemplate {
    surface: Surface,
}

impl CompositeTemplate {
    /// Fully transparent template
    pub fn blank() -> Self {
        Self {
            surface: Surface::new(TEMPLATE_SIZE, TEMPLATE_SIZE),
        }
    }

    pub fn from_surface(surface: Surface) -> Result<Self, TemplateError> {
        if surface.width != TEMPLATE_SIZE || surface.height != TEMPLATE_SIZE {
            return Err(TemplateError::Dimensions {
                expected: TEMPLATE_SIZE,
                width: surface.width,
                height: surface.height,
            });
        }
        Ok(Self { surface })
    }

    pub fn from_image(image: &RgbaImage) -> Result<Self, TemplateError> {
        Self::from_surface(Surface::from_image(image))
    }

    /// Decode a PNG (or any format the `image` crate sniffs) into a template
    pub fn decode(bytes: &[u8]) -> Result<Self, TemplateError> {
        let image = image::load_from_memory(bytes)
            .map_err(TemplateError::Decode)?
            .to_rgba8();
        Self::from_image(&image)
    }

    /// Encode as a lossless PNG
    pub fn encode_png(&self) -> Result<Vec<u8>, TemplateError> {
        self.surface.encode_png()
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
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        self.surface.get_pixel(x, y)
    }

    pub fn to_image(&self) -> RgbaImage {
        self.surface.to_image()
    }
}

/// Surface slice sampled for face slot `slot`
pub fn slice_rect(surface_width: u32, surface_height: u32, slot: usize) -> Rect {
    let w = surface_width / SLICE_COLUMNS;
    let h = surface_height / SLICE_ROWS;
    let column = slot as u32 % SLICE_COLUMNS;
    let row = slot as u32 / SLICE_COLUMNS;
    Rect::new(column * w, row * h, w, h)
}

/// Scale every face of `raster` into its template rectangle
fn draw_faces(raster: &PartRaster, target: &mut Surface) {
    let surface = raster.surface();
    for (slot, face) in raster.spec().faces.iter().enumerate() {
        let src = slice_rect(surface.width, surface.height, slot);
        surface.blit_scaled(src, target, face.rect);
    }
}

/// Build the flat skin from all part rasters
pub fn export_template<'a>(rasters: impl IntoIterator<Item = &'a PartRaster>) -> CompositeTemplate {
    let mut template = CompositeTemplate::blank();
    let mut parts = 0;
    for raster in rasters {
        draw_faces(raster, &mut template.surface);
        parts += 1;
    }
    debug!("Exported template from {} parts", parts);
    template
}

/// Build the flat skin with orientation guides (section grid, overlay-layer
/// outlines, part labels). The guides are cosmetic and not meant to be imported.
pub fn export_annotated_template<'a>(
    rasters: impl IntoIterator<Item = &'a PartRaster>,
) -> CompositeTemplate {
    let mut template = CompositeTemplate::blank();
    annotate::draw_section_grid(&mut template.surface);
    for raster in rasters {
        draw_faces(raster, &mut template.surface);
    }
    annotate::draw_overlay_outlines(&mut template.surface);
    annotate::draw_labels(&mut template.surface);
    template
}

/// Write the template's face rectangles back into one part's surface slices.
///
/// Face provenance of the part is discarded: after an import the surface
/// pixels are the only truth.
pub fn import_into(template: &CompositeTemplate, raster: &mut PartRaster) {
    let spec = raster.spec();
    let (width, height) = (raster.surface().width, raster.surface().height);
    for (slot, face) in spec.faces.iter().enumerate() {
        let dst = slice_rect(width, height, slot);
        template.surface.blit_scaled(face.rect, raster.surface_mut(), dst);
    }
    raster.reset_provenance();
    debug!("Imported template faces into {}", spec.id);
}

/// Import the template into every raster
pub fn import_template<'a>(
    template: &CompositeTemplate,
    rasters: impl IntoIterator<Item = &'a mut PartRaster>,
) {
    for raster in rasters {
        import_into(template, raster);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::ImageFormat;
    use std::io::Cursor;
    use crate::constants::PART_SURFACE_SIZE;
    use crate::types::PartId;

    fn rasters() -> Vec<PartRaster> {
        PartId::ALL
            .into_iter()
            .map(|part| PartRaster::new(part, PART_SURFACE_SIZE, part.spec().base_color))
            .collect()
    }

    #[test]
    fn test_slice_rects() {
        assert_eq!(slice_rect(64, 64, 0), Rect::new(0, 0, 21, 32));
        assert_eq!(slice_rect(64, 64, 2), Rect::new(42, 0, 21, 32));
        assert_eq!(slice_rect(64, 64, 3), Rect::new(0, 32, 21, 32));
        assert_eq!(slice_rect(64, 64, 5), Rect::new(42, 32, 21, 32));
    }

    #[test]
    fn test_export_places_base_colors() {
        let rasters = rasters();
        let template = export_template(&rasters);

        for raster in &rasters {
            for face in raster.spec().faces {
                assert!(
                    template.surface().rect_is(face.rect, raster.spec().base_color),
                    "{} {} not filled",
                    raster.part(),
                    face.label
                );
            }
        }
        // Unused space stays transparent
        assert_eq!(template.pixel(0, 0), Some(Rgba::TRANSPARENT));
        assert_eq!(template.pixel(60, 60), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn test_export_samples_face_slices() {
        let mut rasters = rasters();
        let red = Rgba::rgb(255, 0, 0);
        // Paint the head's slot-1 slice (template top face) red
        let slice = slice_rect(64, 64, 1);
        rasters[0].surface_mut().fill_rect(slice, red);

        let template = export_template(&rasters);
        assert!(template.surface().rect_is(Rect::new(8, 0, 8, 8), red));
        assert!(template.surface().rect_is(Rect::new(8, 8, 8, 8), PartId::Head.spec().base_color));
    }

    #[test]
    fn test_roundtrip_uniform_slices() {
        let mut rasters = rasters();
        let colors = [
            Rgba::rgb(10, 20, 30),
            Rgba::rgb(40, 50, 60),
            Rgba::rgb(70, 80, 90),
            Rgba::rgb(100, 110, 120),
            Rgba::rgb(130, 140, 150),
            Rgba::rgb(160, 170, 180),
        ];
        for raster in rasters.iter_mut() {
            for slot in 0..raster.spec().faces.len() {
                let slice = slice_rect(64, 64, slot);
                raster.surface_mut().fill_rect(slice, colors[slot]);
            }
        }
        let before: Vec<Surface> = rasters.iter().map(|r| r.surface().clone()).collect();

        let template = export_template(&rasters);
        import_template(&template, rasters.iter_mut());

        for (raster, original) in rasters.iter().zip(&before) {
            assert_eq!(raster.surface(), original, "{} changed", raster.part());
        }
    }

    #[test]
    fn test_import_writes_edits_back() {
        let mut rasters = rasters();
        let mut template = export_template(&rasters);
        let green = Rgba::rgb(0, 255, 0);
        // Body back face lives at (32, 20, 8, 12) and maps to slice 1
        template.surface.fill_rect(Rect::new(32, 20, 8, 12), green);

        import_template(&template, rasters.iter_mut());
        let body = &rasters[1];
        assert!(body.surface().rect_is(slice_rect(64, 64, 1), green));
        assert!(body.surface().rect_is(slice_rect(64, 64, 0), PartId::Body.spec().base_color));
    }

    #[test]
    fn test_png_roundtrip() {
        let template = export_template(&rasters());
        let png = template.encode_png().unwrap();
        assert_eq!(&png[1..4], b"PNG");
        assert_eq!(CompositeTemplate::decode(&png).unwrap(), template);
    }

    #[test]
    fn test_decode_rejects_wrong_size() {
        let image = RgbaImage::new(64, 32);
        let mut png = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .unwrap();
        assert!(matches!(
            CompositeTemplate::decode(&png),
            Err(TemplateError::Dimensions { width: 64, height: 32, .. })
        ));
        assert!(matches!(
            CompositeTemplate::decode(b"not an image"),
            Err(TemplateError::Decode(_))
        ));
    }

    #[test]
    fn test_annotated_template_keeps_faces() {
        let rasters = rasters();
        let plain = export_template(&rasters);
        let annotated = export_annotated_template(&rasters);

        // Grid shows through in empty space only
        assert_eq!(plain.pixel(0, 0), Some(Rgba::TRANSPARENT));
        assert_ne!(annotated.pixel(0, 0), Some(Rgba::TRANSPARENT));
        // Head front interior is untouched apart from the label
        assert_eq!(annotated.pixel(15, 15), plain.pixel(15, 15));
    }
}
