//! Blockskin painting engine - per-part rasters and the flat skin template
//!
//! This crate provides the core of the bidirectional skin painter:
//! - [`face`] - Resolve ray hits on a part into a cube face and grid cell
//! - [`raster`] - Per-part paint grids with limb face provenance
//! - [`compositor`] - Export/import of the 64x64 flat template
//! - [`engine`] - Owns all rasters and the cached composite
//! - [`editor`] - Pixel-grid editor over the flat template with undo/redo
//! - [`input`] - Pointer normalization and stroke tracking
//! - [`session`] - Paint mode, tool and brush state shared by front-ends
//! - [`store`] - Persisted per-part colors

pub mod compositor;
pub mod constants;
pub mod editor;
pub mod engine;
pub mod error;
pub mod face;
pub mod input;
pub mod parts;
pub mod raster;
pub mod session;
pub mod store;
pub mod surface;
pub mod types;

pub use compositor::{CompositeTemplate, slice_rect};
pub use constants::*;
pub use editor::{EditorEvent, EditorOptions, EditorStatus, EditorTool, RasterEditor};
pub use engine::PaintEngine;
pub use error::*;
pub use face::{RayHit, ResolvedCell};
pub use input::{PointerEvent, StrokeEvent, StrokeTracker, TouchPhase};
pub use raster::{CellProvenance, PartRaster};
pub use session::{PaintMode, SessionState};
pub use store::{ColorStore, JsonColorStore, MemoryColorStore};
pub use surface::Surface;
pub use types::*;
