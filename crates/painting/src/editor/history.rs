//! Snapshot undo/redo for the raster editor

use std::collections::VecDeque;

use tracing::debug;

use crate::surface::Surface;

use super::RasterEditor;

/// Bounded stacks of full-buffer snapshots.
///
/// The undo stack holds the buffer as it was before each press, on top of the
/// state the editor was opened with. The bottom entry is never popped.
#[derive(Debug, Clone)]
pub struct EditorHistory {
    undo: VecDeque<Surface>,
    redo: Vec<Surface>,
    capacity: usize,
}

impl EditorHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            undo: VecDeque::new(),
            redo: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    /// Drop everything and start over from `initial`
    pub fn reset(&mut self, initial: Surface) {
        self.undo.clear();
        self.redo.clear();
        self.undo.push_back(initial);
    }

    /// Record the buffer before a new action. Invalidates redo.
    pub fn record(&mut self, snapshot: Surface) {
        self.redo.clear();
        self.push_undo(snapshot);
    }

    fn push_undo(&mut self, snapshot: Surface) {
        self.undo.push_back(snapshot);
        while self.undo.len() > self.capacity {
            self.undo.pop_front();
        }
    }

    /// Swap `current` for the most recent snapshot
    pub fn undo(&mut self, current: &Surface) -> Option<Surface> {
        if self.undo.len() <= 1 {
            return None;
        }
        let snapshot = self.undo.pop_back()?;
        self.redo.push(current.clone());
        Some(snapshot)
    }

    /// Swap `current` for the most recently undone state
    pub fn redo(&mut self, current: &Surface) -> Option<Surface> {
        let snapshot = self.redo.pop()?;
        self.push_undo(current.clone());
        Some(snapshot)
    }

    pub fn can_undo(&self) -> bool {
        self.undo.len() > 1
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }
}

impl RasterEditor {
    pub fn can_undo(&self) -> bool {
        self.is_ready() && self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.is_ready() && self.history.can_redo()
    }

    /// Restore the buffer to before the last press.
    ///
    /// Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        if !self.accepts_input("undo") {
            return false;
        }
        let Some(snapshot) = self.history.undo(&self.buffer) else {
            debug!("Undo: no entries available");
            return false;
        };
        self.restore(snapshot);
        debug!(
            "Undo ({} left, {} redoable)",
            self.history.undo_len() - 1,
            self.history.redo_len()
        );
        true
    }

    /// Reapply the last undone press.
    ///
    /// Returns false when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        if !self.accepts_input("redo") {
            return false;
        }
        let Some(snapshot) = self.history.redo(&self.buffer) else {
            debug!("Redo: no entries available");
            return false;
        };
        self.restore(snapshot);
        debug!("Redo ({} redoable)", self.history.redo_len());
        true
    }

    fn restore(&mut self, snapshot: Surface) {
        self.buffer = snapshot;
        self.view.redraw(&self.buffer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Rgba;

    fn state(tag: u8) -> Surface {
        Surface::filled(2, 2, Rgba::rgb(tag, 0, 0))
    }

    #[test]
    fn test_underflow_is_noop() {
        let mut history = EditorHistory::new(20);
        history.reset(state(0));
        assert!(!history.can_undo());
        assert!(history.undo(&state(0)).is_none());
        assert!(history.redo(&state(0)).is_none());
    }

    #[test]
    fn test_linear_undo_redo() {
        let mut history = EditorHistory::new(20);
        history.reset(state(0));
        // Two actions: 0 -> 1 -> 2
        history.record(state(0));
        history.record(state(1));

        assert_eq!(history.undo(&state(2)), Some(state(1)));
        assert_eq!(history.undo(&state(1)), Some(state(0)));
        assert!(history.undo(&state(0)).is_none());

        assert_eq!(history.redo(&state(0)), Some(state(1)));
        assert_eq!(history.redo(&state(1)), Some(state(2)));
        assert!(!history.can_redo());
    }

    #[test]
    fn test_record_clears_redo() {
        let mut history = EditorHistory::new(20);
        history.reset(state(0));
        history.record(state(0));
        history.undo(&state(1));
        assert!(history.can_redo());

        history.record(state(0));
        assert!(!history.can_redo());
    }

    #[test]
    fn test_capacity_drops_oldest() {
        let mut history = EditorHistory::new(20);
        history.reset(state(0));
        for tag in 0..30 {
            history.record(state(tag));
        }
        assert_eq!(history.undo_len(), 20);

        let mut undone = 0;
        let mut current = state(30);
        while let Some(previous) = history.undo(&current) {
            current = previous;
            undone += 1;
        }
        assert_eq!(undone, 19);
        // The oldest surviving snapshot is the bottom entry
        assert_eq!(current, state(11));
    }
}
