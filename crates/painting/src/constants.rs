/// Width and height of the flat skin template, in logical pixels.
pub const TEMPLATE_SIZE: u32 = 64;

/// Default resolution of each part's backing surface. Independent of the part's grid size.
pub const PART_SURFACE_SIZE: u32 = 64;

/// Section divider spacing in the template and in the editor grid.
pub const SECTION_CELLS: u32 = 8;

/// Columns and rows of the per-face slicing used when compositing a backing surface.
pub const SLICE_COLUMNS: u32 = 3;
pub const SLICE_ROWS: u32 = 2;

/// Maximum number of undo snapshots kept by the raster editor.
pub const MAX_HISTORY: usize = 20;

/// Editor zoom: on-screen pixels per logical cell.
pub const DEFAULT_PIXEL_SIZE: f32 = 10.0;
pub const MIN_PIXEL_SIZE: f32 = 2.0;
pub const MAX_PIXEL_SIZE: f32 = 20.0;

/// Zoom factors used by the zoom in / zoom out commands.
pub const ZOOM_IN_FACTOR: f32 = 1.5;
pub const ZOOM_OUT_FACTOR: f32 = 0.75;

/// Brush size range for 3D cell painting, in grid cells.
pub const MIN_BRUSH_SIZE: u32 = 1;
pub const MAX_BRUSH_SIZE: u32 = 10;
pub const DEFAULT_BRUSH_SIZE: u32 = 1;
