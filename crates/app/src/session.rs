//! Headless painting session: dispatches UI messages to the engine and editor

use blockskin_config::Config;
use blockskin_ipc::{
    self as ipc, CoreToUi, EditorCommand, EditorState, PaintCommand, PartColor, SessionInfo,
    UiToCore,
};
use painting::{
    ColorStore, CompositeTemplate, EditorEvent, EditorOptions, PaintEngine, PaintMode, PartId,
    PointerEvent, RasterEditor, Rgba, SessionState, StrokeEvent, StrokeTracker, TemplateError,
};
use tracing::{debug, info, warn};

use crate::convert;
use crate::hotkeys::{EditorShortcut, editor_shortcut};

/// Work the event loop must do on behalf of the session
#[derive(Debug)]
pub enum Effect {
    Send(CoreToUi),
    /// Decode PNG bytes off the loop, then call [`Session::editor_loaded`]
    Decode(Vec<u8>),
    Shutdown,
}

pub struct Session {
    engine: PaintEngine,
    editor: RasterEditor,
    state: SessionState,
    strokes: StrokeTracker,
    brush_range: (u32, u32),
}

impl Session {
    pub fn new(config: &Config, store: Box<dyn ColorStore>) -> Self {
        let editor = RasterEditor::new(EditorOptions {
            initial_pixel_size: config.editor.initial_pixel_size,
            min_pixel_size: config.editor.min_pixel_size,
            max_pixel_size: config.editor.max_pixel_size,
            history_depth: config.editor.history_depth,
        });
        let brush_range = (config.brush.min_size, config.brush.max_size);
        let state = SessionState::new(config.brush.default_size);

        Self {
            engine: PaintEngine::with_surface_size(store, config.paint.surface_size),
            editor,
            state,
            strokes: StrokeTracker::new(),
            brush_range,
        }
    }

    pub fn engine(&self) -> &PaintEngine {
        &self.engine
    }

    pub fn editor(&self) -> &RasterEditor {
        &self.editor
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Startup sync message
    pub fn initialize(&self) -> CoreToUi {
        let parts = PartId::ALL
            .into_iter()
            .map(|part| PartColor {
                part: convert::wire_part(part),
                color: self
                    .engine
                    .raster(part)
                    .cell_color(painting::CellCoord::new(0, 0))
                    .unwrap_or(part.spec().base_color)
                    .to_hex(),
            })
            .collect();

        CoreToUi::Initialize {
            session: SessionInfo {
                mode: convert::wire_mode(self.state.mode),
                tool: convert::wire_tool(self.state.tool),
                brush_size: self.state.brush_size(),
                brush_range: [self.brush_range.0, self.brush_range.1],
                color: self.state.color.to_hex(),
                parts,
            },
        }
    }

    /// Parse and dispatch one JSON line
    pub fn handle_line(&mut self, line: &str) -> Vec<Effect> {
        if line.trim().is_empty() {
            return Vec::new();
        }
        match UiToCore::from_json(line) {
            Ok(message) => self.handle(message),
            Err(e) => {
                warn!("Rejected message: {}", e);
                vec![send_error("invalid_message", e.to_string())]
            }
        }
    }

    pub fn handle(&mut self, message: UiToCore) -> Vec<Effect> {
        let effects = self.dispatch(message);
        self.sync_dirty();
        effects
    }

    /// The engine's composite cache is the only source of the dirty flag
    fn sync_dirty(&mut self) {
        self.state.template_dirty = self.engine.is_template_dirty();
    }

    fn dispatch(&mut self, message: UiToCore) -> Vec<Effect> {
        match message {
            UiToCore::PaintHit(hit) => self.paint_hit(&hit),
            UiToCore::Pointer { input, hit } => self.pointer(&input, hit.as_ref()),
            UiToCore::PaintCommand(command) => self.paint_command(command),
            UiToCore::EditorCommand(command) => self.editor_command(command),
            UiToCore::EditorPointer(input) => self.editor_pointer(&input),
            UiToCore::Keyboard(event) => match editor_shortcut(&event) {
                Some(shortcut) if self.editor.is_open() => self.editor_shortcut(shortcut),
                _ => Vec::new(),
            },
            UiToCore::ExportSkin => self.export_skin(),
            UiToCore::ExportTemplate => self.export_template(),
            UiToCore::Shutdown => vec![Effect::Shutdown],
        }
    }

    fn paint_hit(&mut self, hit: &ipc::RayHitInfo) -> Vec<Effect> {
        if self.editor.is_open() {
            debug!("Ignoring 3D click while the editor is open");
            return Vec::new();
        }
        let hit = convert::ray_hit(hit);
        self.state.active_part = Some(hit.part);

        match self.state.mode {
            PaintMode::Color => {
                self.engine.recolor(hit.part, self.state.color);
                self.parts_changed(vec![hit.part])
            }
            PaintMode::Pixel => self.brush(&hit),
        }
    }

    fn pointer(&mut self, input: &ipc::PointerInput, hit: Option<&ipc::RayHitInfo>) -> Vec<Effect> {
        if self.editor.is_open() || self.state.mode != PaintMode::Pixel {
            self.strokes.reset();
            return Vec::new();
        }
        let Some(event) = convert::pointer_event(input) else {
            return Vec::new();
        };
        let hit = hit.map(convert::ray_hit);

        match self.strokes.handle(event, hit.as_ref()) {
            Some(StrokeEvent::Begin(hit)) => {
                self.state.active_part = Some(hit.part);
                self.brush(&hit)
            }
            Some(StrokeEvent::Move(hit)) => self.brush(&hit),
            Some(StrokeEvent::End) | Some(StrokeEvent::Cancel) | None => Vec::new(),
        }
    }

    fn brush(&mut self, hit: &painting::RayHit) -> Vec<Effect> {
        let Some(target) = painting::face::resolve(hit) else {
            debug!("Unresolvable hit on {}, skipping", hit.part);
            return Vec::new();
        };
        let painted = self
            .engine
            .paint_brush(target, self.state.brush_size(), self.state.color);
        if painted == 0 {
            return Vec::new();
        }
        self.parts_changed(vec![target.part])
    }

    fn parts_changed(&self, parts: Vec<PartId>) -> Vec<Effect> {
        vec![Effect::Send(CoreToUi::PartsChanged {
            parts: parts.into_iter().map(convert::wire_part).collect(),
        })]
    }

    fn paint_command(&mut self, command: PaintCommand) -> Vec<Effect> {
        match command {
            PaintCommand::SetMode { mode } => {
                self.state.set_mode(convert::paint_mode(mode));
                self.strokes.reset();
                Vec::new()
            }
            PaintCommand::SetBrushSize { size } => {
                let (min, max) = self.brush_range;
                self.state.set_brush_size(size.clamp(min, max));
                Vec::new()
            }
            PaintCommand::SetColor { color } => match parse_color(&color) {
                Ok(color) => {
                    self.state.color = color;
                    Vec::new()
                }
                Err(effect) => vec![effect],
            },
            PaintCommand::Recolor { part, color } => {
                let color = match color.as_deref().map(parse_color).transpose() {
                    Ok(color) => color.unwrap_or(self.state.color),
                    Err(effect) => return vec![effect],
                };
                let part = convert::part_id(part);
                self.engine.recolor(part, color);
                self.parts_changed(vec![part])
            }
            PaintCommand::RequestPartTexture { part } => {
                let part = convert::part_id(part);
                match self.engine.raster(part).surface().encode_png() {
                    Ok(bytes) => vec![Effect::Send(CoreToUi::PartTexture {
                        part: convert::wire_part(part),
                        png: ipc::encode_png(&bytes),
                    })],
                    Err(e) => vec![send_error("encode", e.to_string())],
                }
            }
        }
    }

    fn editor_command(&mut self, command: EditorCommand) -> Vec<Effect> {
        match command {
            EditorCommand::Open { png } => self.open_editor(png),
            EditorCommand::Close => self.close_editor(),
            EditorCommand::Save => self.save_editor(),
            EditorCommand::SetTool { tool } => {
                let tool = convert::editor_tool(tool);
                self.editor.set_tool(tool);
                self.state.tool = tool;
                vec![Effect::Send(CoreToUi::ToolChanged {
                    tool: convert::wire_tool(tool),
                })]
            }
            EditorCommand::SetColor { color } => match parse_color(&color) {
                Ok(color) => {
                    self.editor.set_color(color);
                    Vec::new()
                }
                Err(effect) => vec![effect],
            },
            EditorCommand::ZoomIn => {
                self.editor.zoom_in();
                self.editor_state_changed()
            }
            EditorCommand::ZoomOut => {
                self.editor.zoom_out();
                self.editor_state_changed()
            }
            EditorCommand::ResetZoom => {
                self.editor.reset_zoom();
                self.editor_state_changed()
            }
            EditorCommand::Undo => self.editor_shortcut(EditorShortcut::Undo),
            EditorCommand::Redo => self.editor_shortcut(EditorShortcut::Redo),
        }
    }

    fn editor_shortcut(&mut self, shortcut: EditorShortcut) -> Vec<Effect> {
        match shortcut {
            EditorShortcut::Undo => {
                if self.editor.undo() {
                    return self.editor_state_changed();
                }
                Vec::new()
            }
            EditorShortcut::Redo => {
                if self.editor.redo() {
                    return self.editor_state_changed();
                }
                Vec::new()
            }
            EditorShortcut::Close => self.close_editor(),
        }
    }

    /// Start loading the editor. The bytes are decoded by the event loop.
    fn open_editor(&mut self, png: Option<String>) -> Vec<Effect> {
        let bytes = match png {
            Some(payload) => match ipc::decode_png(&payload) {
                Ok(bytes) => bytes,
                Err(e) => return vec![send_error("invalid_png", e.to_string())],
            },
            None => match self.engine.template().encode_png() {
                Ok(bytes) => bytes,
                Err(e) => return vec![send_error("encode", e.to_string())],
            },
        };

        self.strokes.reset();
        self.editor.begin_load();
        vec![Effect::Decode(bytes)]
    }

    /// Completion of a decode requested with [`Effect::Decode`].
    ///
    /// `None` means the decode task died without reporting.
    pub fn editor_loaded(
        &mut self,
        result: Option<Result<CompositeTemplate, TemplateError>>,
    ) -> Vec<Effect> {
        let template = match result {
            Some(Ok(template)) => template,
            Some(Err(e)) => {
                warn!("Editor template failed to decode: {}", e);
                return self.abort_load(Some(send_error("decode", e.to_string())));
            }
            None => {
                warn!("Editor template decode was abandoned");
                return self.abort_load(None);
            }
        };

        let png = match template.encode_png() {
            Ok(bytes) => ipc::encode_png(&bytes),
            Err(e) => {
                warn!("Editor template failed to encode: {}", e);
                return self.abort_load(Some(send_error("encode", e.to_string())));
            }
        };
        if !self.editor.finish_load(template) {
            return Vec::new();
        }
        vec![Effect::Send(CoreToUi::EditorOpened {
            png,
            state: self.editor_state(),
        })]
    }

    /// Leave the loading state after a failed load, reporting `error` first
    fn abort_load(&mut self, error: Option<Effect>) -> Vec<Effect> {
        self.editor.close();
        let mut effects: Vec<Effect> = error.into_iter().collect();
        effects.push(Effect::Send(CoreToUi::EditorClosed));
        effects
    }

    fn close_editor(&mut self) -> Vec<Effect> {
        if !self.editor.is_open() {
            return Vec::new();
        }
        self.editor.close();
        vec![Effect::Send(CoreToUi::EditorClosed)]
    }

    fn save_editor(&mut self) -> Vec<Effect> {
        let Some(template) = self.editor.save() else {
            return Vec::new();
        };
        let png = match template.encode_png() {
            Ok(bytes) => ipc::encode_png(&bytes),
            Err(e) => return vec![send_error("encode", e.to_string())],
        };

        self.engine.adopt_template(template);
        info!("Editor changes applied to all parts");

        let mut effects = vec![Effect::Send(CoreToUi::TemplateUpdated { png })];
        effects.extend(self.parts_changed(PartId::ALL.to_vec()));
        effects.push(Effect::Send(CoreToUi::EditorClosed));
        effects
    }

    fn editor_pointer(&mut self, input: &ipc::PointerInput) -> Vec<Effect> {
        if !self.editor.is_open() {
            return Vec::new();
        }
        let Some(event) = convert::pointer_event(input) else {
            return Vec::new();
        };

        match event {
            PointerEvent::Down { pos } => {
                let mut effects: Vec<Effect> = self
                    .editor
                    .pointer_down(pos)
                    .into_iter()
                    .map(|event| self.editor_event(event))
                    .collect();
                if self.editor.is_ready() {
                    effects.extend(self.editor_state_changed());
                }
                effects
            }
            PointerEvent::Move { pos } => {
                self.editor.pointer_move(pos);
                Vec::new()
            }
            PointerEvent::Up | PointerEvent::Leave | PointerEvent::Cancel => {
                self.editor.pointer_up();
                Vec::new()
            }
        }
    }

    fn editor_event(&mut self, event: EditorEvent) -> Effect {
        match event {
            EditorEvent::ColorPicked(color) => Effect::Send(CoreToUi::ColorPicked {
                color: color.to_hex(),
            }),
            EditorEvent::ToolChanged(tool) => {
                self.state.tool = tool;
                Effect::Send(CoreToUi::ToolChanged {
                    tool: convert::wire_tool(tool),
                })
            }
        }
    }

    fn editor_state(&self) -> EditorState {
        EditorState {
            pixel_size: self.editor.pixel_size(),
            can_undo: self.editor.can_undo(),
            can_redo: self.editor.can_redo(),
        }
    }

    fn editor_state_changed(&self) -> Vec<Effect> {
        vec![Effect::Send(CoreToUi::EditorStateChanged {
            state: self.editor_state(),
        })]
    }

    fn export_skin(&mut self) -> Vec<Effect> {
        match self.engine.template().encode_png() {
            Ok(bytes) => {
                info!("Exported skin ({} bytes)", bytes.len());
                vec![Effect::Send(CoreToUi::SkinExported {
                    png: ipc::encode_png(&bytes),
                })]
            }
            Err(e) => vec![send_error("encode", e.to_string())],
        }
    }

    fn export_template(&mut self) -> Vec<Effect> {
        match self.engine.annotated_template().encode_png() {
            Ok(bytes) => {
                info!("Exported annotated template ({} bytes)", bytes.len());
                vec![Effect::Send(CoreToUi::TemplateExported {
                    png: ipc::encode_png(&bytes),
                })]
            }
            Err(e) => vec![send_error("encode", e.to_string())],
        }
    }
}

fn send_error(code: &str, message: String) -> Effect {
    Effect::Send(CoreToUi::error(code, message))
}

fn parse_color(color: &str) -> Result<Rgba, Effect> {
    Rgba::from_hex(color).map_err(|e| {
        warn!("Rejected color {:?}: {}", color, e);
        send_error("invalid_color", e.to_string())
    })
}
