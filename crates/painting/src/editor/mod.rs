//! Standalone pixel editor over the flat 64x64 template
//!
//! This module provides the raster editor that lets a user touch up the
//! composite directly:
//! - A persistent logical buffer, one cell per template pixel
//! - Pencil, eraser, eyedropper and fill tools (see [`EditorTool`])
//! - Snapshot undo/redo bounded to a fixed depth
//! - A zoomable rendered view that never resamples the buffer
//!
//! Opening is two-phase: [`RasterEditor::begin_load`] puts the editor in
//! [`EditorStatus::Loading`] while the template decodes elsewhere, and
//! [`RasterEditor::finish_load`] populates the buffer. Input arriving in
//! between is dropped.

mod fill;
mod history;
mod line;
mod stroke;
mod tool;
mod view;

use glam::IVec2;
use tracing::{debug, info, warn};

use crate::compositor::CompositeTemplate;
use crate::constants::{
    DEFAULT_PIXEL_SIZE, MAX_HISTORY, MAX_PIXEL_SIZE, MIN_PIXEL_SIZE, TEMPLATE_SIZE,
    ZOOM_IN_FACTOR, ZOOM_OUT_FACTOR,
};
use crate::surface::Surface;
use crate::types::{CellCoord, Rgba};

pub use fill::flood_fill;
pub use history::EditorHistory;
pub use line::LineCells;
pub use tool::EditorTool;
pub use view::EditorView;

/// Zoom and history limits for the editor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditorOptions {
    pub initial_pixel_size: f32,
    pub min_pixel_size: f32,
    pub max_pixel_size: f32,
    pub history_depth: usize,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            initial_pixel_size: DEFAULT_PIXEL_SIZE,
            min_pixel_size: MIN_PIXEL_SIZE,
            max_pixel_size: MAX_PIXEL_SIZE,
            history_depth: MAX_HISTORY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorStatus {
    #[default]
    Closed,
    /// Waiting for the template decode to complete
    Loading,
    Ready,
}

/// Side effects of editor input the host UI should reflect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorEvent {
    ColorPicked(Rgba),
    ToolChanged(EditorTool),
}

pub struct RasterEditor {
    pub(crate) options: EditorOptions,
    pub(crate) status: EditorStatus,
    pub(crate) tool: EditorTool,
    /// Active drawing color
    pub(crate) color: Rgba,
    /// Logical 64x64 buffer, the editor's only source of truth
    pub(crate) buffer: Surface,
    pub(crate) view: EditorView,
    pub(crate) history: EditorHistory,
    /// Last cell of the stroke in progress (None if not drawing)
    pub(crate) stroke: Option<IVec2>,
}

impl RasterEditor {
    pub fn new(options: EditorOptions) -> Self {
        let pixel_size = options
            .initial_pixel_size
            .clamp(options.min_pixel_size, options.max_pixel_size);
        Self {
            options,
            status: EditorStatus::Closed,
            tool: EditorTool::Pencil,
            color: Rgba::BLACK,
            buffer: Surface::new(TEMPLATE_SIZE, TEMPLATE_SIZE),
            view: EditorView::new(pixel_size, TEMPLATE_SIZE),
            history: EditorHistory::new(options.history_depth),
            stroke: None,
        }
    }

    pub fn status(&self) -> EditorStatus {
        self.status
    }

    /// Open or loading
    pub fn is_open(&self) -> bool {
        self.status != EditorStatus::Closed
    }

    pub fn is_ready(&self) -> bool {
        self.status == EditorStatus::Ready
    }

    pub fn is_drawing(&self) -> bool {
        self.stroke.is_some()
    }

    pub fn tool(&self) -> EditorTool {
        self.tool
    }

    pub fn set_tool(&mut self, tool: EditorTool) {
        if self.tool != tool {
            debug!("Editor tool: {}", tool);
        }
        self.tool = tool;
    }

    pub fn color(&self) -> Rgba {
        self.color
    }

    pub fn set_color(&mut self, color: Rgba) {
        self.color = color;
    }

    pub fn buffer(&self) -> &Surface {
        &self.buffer
    }

    pub fn cell_color(&self, cell: CellCoord) -> Option<Rgba> {
        self.buffer.get_pixel(cell.x, cell.y)
    }

    pub fn view(&self) -> &EditorView {
        &self.view
    }

    pub fn pixel_size(&self) -> f32 {
        self.view.pixel_size()
    }

    /// Enter the loading state. The buffer is populated by [`finish_load`](Self::finish_load).
    pub fn begin_load(&mut self) {
        self.status = EditorStatus::Loading;
        self.stroke = None;
        info!("Editor opening, waiting for template");
    }

    /// Complete a load started with [`begin_load`](Self::begin_load).
    ///
    /// Takes the initial history snapshot. Returns false and ignores the
    /// template if the editor is no longer loading (closed meanwhile).
    pub fn finish_load(&mut self, template: CompositeTemplate) -> bool {
        if self.status != EditorStatus::Loading {
            warn!("Discarding decoded template: editor is {:?}", self.status);
            return false;
        }
        self.buffer = template.surface().clone();
        self.history.reset(self.buffer.clone());
        self.view.redraw(&self.buffer);
        self.status = EditorStatus::Ready;
        info!("Editor ready");
        true
    }

    /// Open synchronously on an already decoded template
    pub fn open(&mut self, template: CompositeTemplate) {
        self.begin_load();
        self.finish_load(template);
    }

    /// Open on a fully transparent buffer
    pub fn open_blank(&mut self) {
        self.open(CompositeTemplate::blank());
    }

    /// Stop input dispatch. The buffer is kept until the next open.
    pub fn close(&mut self) {
        if self.status == EditorStatus::Closed {
            return;
        }
        self.status = EditorStatus::Closed;
        self.stroke = None;
        info!("Editor closed");
    }

    /// Copy the buffer into a fresh template and close the editor.
    ///
    /// Transparent cells are left empty. Returns None unless the editor is ready.
    pub fn save(&mut self) -> Option<CompositeTemplate> {
        if !self.accepts_input("save") {
            return None;
        }

        let mut template = CompositeTemplate::blank();
        let output = template.surface_mut();
        for y in 0..self.buffer.height {
            for x in 0..self.buffer.width {
                match self.buffer.get_pixel(x, y) {
                    Some(color) if !color.is_transparent() => output.set_pixel(x, y, color),
                    _ => {}
                }
            }
        }

        info!("Editor saved");
        self.close();
        Some(template)
    }

    /// Scale the view by `factor`, clamped to the configured range
    pub fn zoom(&mut self, factor: f32) {
        let pixel_size = (self.view.pixel_size() * factor)
            .clamp(self.options.min_pixel_size, self.options.max_pixel_size);
        self.set_pixel_size(pixel_size);
    }

    pub fn zoom_in(&mut self) {
        self.zoom(ZOOM_IN_FACTOR);
    }

    pub fn zoom_out(&mut self) {
        self.zoom(ZOOM_OUT_FACTOR);
    }

    /// Return to the configured initial scale
    pub fn reset_zoom(&mut self) {
        let pixel_size = self
            .options
            .initial_pixel_size
            .clamp(self.options.min_pixel_size, self.options.max_pixel_size);
        self.set_pixel_size(pixel_size);
    }

    fn set_pixel_size(&mut self, pixel_size: f32) {
        if pixel_size == self.view.pixel_size() {
            return;
        }
        self.view.set_pixel_size(pixel_size, &self.buffer);
        debug!("Editor pixel size: {}", pixel_size);
    }

    /// Gate for user actions. Loading drops input with a warning.
    pub(crate) fn accepts_input(&self, action: &str) -> bool {
        match self.status {
            EditorStatus::Ready => true,
            EditorStatus::Loading => {
                warn!("Dropping editor {} while the template is loading", action);
                false
            }
            EditorStatus::Closed => {
                debug!("Ignoring editor {} while closed", action);
                false
            }
        }
    }
}

impl Default for RasterEditor {
    fn default() -> Self {
        Self::new(EditorOptions::default())
    }
}
