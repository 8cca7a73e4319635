//! Input event types for mouse, touch and keyboard.

use serde::{Deserialize, Serialize};

/// Mouse input events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum MouseEvent {
    Move { x: f32, y: f32 },
    ButtonDown { button: MouseButton, x: f32, y: f32 },
    ButtonUp { button: MouseButton, x: f32, y: f32 },
    /// Pointer left the canvas
    Leave,
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Touch gesture phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TouchPhase {
    Start,
    Move,
    End,
    Cancel,
}

/// Touch input event with every active touch point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TouchEvent {
    pub phase: TouchPhase,
    /// Active touch positions, `[x, y]`
    #[serde(default)]
    pub touches: Vec<[f32; 2]>,
}

/// Mouse or touch input over a canvas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PointerInput {
    Mouse(MouseEvent),
    Touch(TouchEvent),
}

/// Keyboard input event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyboardEvent {
    pub key: String,
    pub pressed: bool,
    #[serde(default)]
    pub modifiers: Modifiers,
}

/// Keyboard modifier keys state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl, or Cmd on macOS
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}
