//! Tool dispatch for presses and drags

use glam::{IVec2, Vec2};
use tracing::debug;

use crate::types::{CellCoord, Rgba};

use super::fill::flood_fill;
use super::line::{LineCells, clip_to_grid};
use super::{EditorEvent, EditorTool, RasterEditor};

impl RasterEditor {
    /// Cell inside the buffer, or None for out-of-range positions
    fn in_range(&self, cell: IVec2) -> Option<CellCoord> {
        let inside = cell.x >= 0
            && cell.y >= 0
            && (cell.x as u32) < self.buffer.width
            && (cell.y as u32) < self.buffer.height;
        inside.then(|| CellCoord::new(cell.x as u32, cell.y as u32))
    }

    /// Apply the active tool at a cell.
    ///
    /// Takes a history snapshot first. Out-of-range presses are ignored and
    /// start no stroke.
    pub fn press(&mut self, cell: IVec2) -> Vec<EditorEvent> {
        if !self.accepts_input("press") {
            return Vec::new();
        }
        let Some(target) = self.in_range(cell) else {
            debug!("Press outside the grid at ({}, {})", cell.x, cell.y);
            return Vec::new();
        };

        self.history.record(self.buffer.clone());
        self.stroke = self.tool.is_continuous().then_some(cell);

        match self.tool {
            EditorTool::Pencil => {
                self.draw(target);
                Vec::new()
            }
            EditorTool::Eraser => {
                self.erase(target);
                Vec::new()
            }
            EditorTool::Eyedropper => self.pick(target),
            EditorTool::Fill => {
                if flood_fill(&mut self.buffer, target, self.color) > 0 {
                    self.view.redraw(&self.buffer);
                }
                Vec::new()
            }
        }
    }

    /// Continue the stroke to a cell, covering every cell in between
    pub fn drag(&mut self, cell: IVec2) {
        if !self.is_ready() {
            return;
        }
        let Some(last) = self.stroke else {
            return;
        };
        if last == cell {
            return;
        }

        let (width, height) = (self.buffer.width, self.buffer.height);
        let Some((from, to)) = clip_to_grid(last, cell, width, height) else {
            self.stroke = Some(cell);
            return;
        };
        // A clipped start lies outside the grid, so skipping it loses nothing
        for point in LineCells::new(from, to).skip(1) {
            let Some(target) = self.in_range(point) else {
                continue;
            };
            match self.tool {
                EditorTool::Pencil => self.draw(target),
                EditorTool::Eraser => self.erase(target),
                EditorTool::Eyedropper | EditorTool::Fill => {}
            }
        }
        self.stroke = Some(cell);
    }

    /// End the stroke in progress, if any
    pub fn release(&mut self) {
        self.stroke = None;
    }

    pub fn pointer_down(&mut self, pos: Vec2) -> Vec<EditorEvent> {
        let cell = self.view.cell_at(pos);
        self.press(cell)
    }

    pub fn pointer_move(&mut self, pos: Vec2) {
        let cell = self.view.cell_at(pos);
        self.drag(cell);
    }

    pub fn pointer_up(&mut self) {
        self.release();
    }

    fn draw(&mut self, cell: CellCoord) {
        self.buffer.set_pixel(cell.x, cell.y, self.color);
        self.view.draw_cell(cell, self.color);
    }

    fn erase(&mut self, cell: CellCoord) {
        self.buffer.set_pixel(cell.x, cell.y, Rgba::TRANSPARENT);
        self.view.erase_cell(cell);
    }

    /// Adopt the cell color if it has one, then go back to the pencil
    fn pick(&mut self, cell: CellCoord) -> Vec<EditorEvent> {
        let mut events = Vec::new();
        match self.buffer.get_pixel(cell.x, cell.y) {
            Some(color) if !color.is_transparent() => {
                debug!("Picked {} at ({}, {})", color, cell.x, cell.y);
                self.color = color;
                events.push(EditorEvent::ColorPicked(color));
            }
            _ => debug!("Picked a transparent cell, keeping {}", self.color),
        }
        self.tool = EditorTool::Pencil;
        events.push(EditorEvent::ToolChanged(EditorTool::Pencil));
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba = Rgba::rgb(255, 0, 0);
    const GREEN: Rgba = Rgba::rgb(0, 255, 0);

    fn ready_editor() -> RasterEditor {
        let mut editor = RasterEditor::default();
        editor.open_blank();
        editor.set_color(RED);
        editor
    }

    fn painted(editor: &RasterEditor) -> Vec<(u32, u32)> {
        let buffer = editor.buffer();
        let mut cells = Vec::new();
        for y in 0..buffer.height {
            for x in 0..buffer.width {
                if buffer.get_pixel(x, y).is_some_and(|c| !c.is_transparent()) {
                    cells.push((x, y));
                }
            }
        }
        cells
    }

    #[test]
    fn test_pencil_drag_has_no_gaps() {
        let mut editor = ready_editor();
        editor.press(IVec2::new(0, 0));
        editor.drag(IVec2::new(5, 0));
        editor.release();

        assert_eq!(
            painted(&editor),
            vec![(0, 0), (1, 0), (2, 0), (3, 0), (4, 0), (5, 0)]
        );
    }

    #[test]
    fn test_drag_without_press_does_nothing() {
        let mut editor = ready_editor();
        editor.drag(IVec2::new(3, 3));
        assert!(painted(&editor).is_empty());

        editor.press(IVec2::new(0, 0));
        editor.release();
        editor.drag(IVec2::new(3, 0));
        assert_eq!(painted(&editor), vec![(0, 0)]);
    }

    #[test]
    fn test_out_of_range_is_ignored() {
        let mut editor = ready_editor();
        assert!(editor.press(IVec2::new(-1, 0)).is_empty());
        assert!(editor.press(IVec2::new(0, 64)).is_empty());
        assert!(!editor.is_drawing());
        assert!(!editor.can_undo());
        assert!(painted(&editor).is_empty());
    }

    #[test]
    fn test_drag_off_grid_clips() {
        let mut editor = ready_editor();
        editor.press(IVec2::new(61, 10));
        editor.drag(IVec2::new(66, 10));
        editor.drag(IVec2::new(66, 11));
        editor.release();
        assert_eq!(painted(&editor), vec![(61, 10), (62, 10), (63, 10)]);
    }

    #[test]
    fn test_drag_to_far_positions_stays_on_grid() {
        let mut editor = ready_editor();
        editor.pointer_down(Vec2::new(5.0, 5.0));
        editor.pointer_move(Vec2::new(5.0, -1.0e12));
        assert_eq!(painted(&editor), vec![(0, 0)]);

        editor.pointer_move(Vec2::new(-1.0e12, 5.0));
        editor.pointer_up();
        assert_eq!(painted(&editor), vec![(0, 0)]);

        editor.pointer_down(Vec2::new(5.0, 15.0));
        editor.pointer_move(Vec2::new(1.0e9, 15.0));
        editor.pointer_move(Vec2::new(1.0e12, 1.0e12));
        editor.pointer_up();
        let row: Vec<(u32, u32)> = (0..64).map(|x| (x, 1)).collect();
        let mut expected = vec![(0, 0)];
        expected.extend(row);
        assert_eq!(painted(&editor), expected);
    }

    #[test]
    fn test_eraser() {
        let mut editor = ready_editor();
        editor.press(IVec2::new(0, 0));
        editor.drag(IVec2::new(4, 0));
        editor.release();
        let pristine = {
            let mut other = RasterEditor::default();
            other.open_blank();
            other.view().canvas().clone()
        };

        editor.set_tool(EditorTool::Eraser);
        editor.press(IVec2::new(0, 0));
        editor.drag(IVec2::new(4, 0));
        editor.release();

        assert!(painted(&editor).is_empty());
        assert_eq!(editor.view().canvas(), &pristine);
    }

    #[test]
    fn test_eyedropper_picks_and_switches_back() {
        let mut editor = ready_editor();
        editor.set_color(GREEN);
        editor.press(IVec2::new(7, 7));
        editor.release();

        editor.set_color(RED);
        editor.set_tool(EditorTool::Eyedropper);
        let events = editor.press(IVec2::new(7, 7));
        editor.release();
        assert_eq!(
            events,
            vec![
                EditorEvent::ColorPicked(GREEN),
                EditorEvent::ToolChanged(EditorTool::Pencil)
            ]
        );
        assert_eq!(editor.color(), GREEN);
        assert_eq!(editor.tool(), EditorTool::Pencil);
    }

    #[test]
    fn test_eyedropper_on_transparent_keeps_color() {
        let mut editor = ready_editor();
        editor.set_tool(EditorTool::Eyedropper);
        let events = editor.press(IVec2::new(0, 0));
        assert_eq!(events, vec![EditorEvent::ToolChanged(EditorTool::Pencil)]);
        assert_eq!(editor.color(), RED);
        assert!(!editor.is_drawing());
    }

    #[test]
    fn test_fill_isolated_cell_changes_one_cell() {
        let mut editor = ready_editor();
        // Ring of red around (10, 10)
        for (x, y) in [(9, 10), (11, 10), (10, 9), (10, 11)] {
            editor.press(IVec2::new(x, y));
            editor.release();
        }
        let before = painted(&editor).len();

        editor.set_color(GREEN);
        editor.set_tool(EditorTool::Fill);
        editor.press(IVec2::new(10, 10));
        editor.release();

        assert_eq!(painted(&editor).len(), before + 1);
        assert_eq!(editor.cell_color(CellCoord::new(10, 10)), Some(GREEN));
        assert_eq!(editor.cell_color(CellCoord::new(9, 10)), Some(RED));
    }

    #[test]
    fn test_fill_whole_buffer_and_undo() {
        let mut editor = ready_editor();
        editor.set_tool(EditorTool::Fill);
        editor.press(IVec2::new(30, 30));
        assert_eq!(painted(&editor).len(), 64 * 64);

        assert!(editor.undo());
        assert!(painted(&editor).is_empty());
    }
}
