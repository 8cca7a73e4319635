//! Editor keyboard shortcuts
//!
//! Only active while the raster editor is open:
//! - Ctrl+Z: Undo
//! - Ctrl+Y or Ctrl+Shift+Z: Redo
//! - Escape: Close without saving

use blockskin_ipc::KeyboardEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorShortcut {
    Undo,
    Redo,
    Close,
}

/// Map a key press to an editor shortcut. Releases never trigger.
pub fn editor_shortcut(event: &KeyboardEvent) -> Option<EditorShortcut> {
    if !event.pressed {
        return None;
    }

    let command = event.modifiers.command();
    let shift = event.modifiers.shift;
    match event.key.as_str() {
        "Escape" => Some(EditorShortcut::Close),
        "z" | "Z" if command && shift => Some(EditorShortcut::Redo),
        "z" | "Z" if command => Some(EditorShortcut::Undo),
        "y" | "Y" if command => Some(EditorShortcut::Redo),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockskin_ipc::Modifiers;

    fn key(key: &str, ctrl: bool, shift: bool) -> KeyboardEvent {
        KeyboardEvent {
            key: key.to_string(),
            pressed: true,
            modifiers: Modifiers {
                ctrl,
                shift,
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_shortcuts() {
        assert_eq!(editor_shortcut(&key("z", true, false)), Some(EditorShortcut::Undo));
        assert_eq!(editor_shortcut(&key("Z", true, true)), Some(EditorShortcut::Redo));
        assert_eq!(editor_shortcut(&key("y", true, false)), Some(EditorShortcut::Redo));
        assert_eq!(editor_shortcut(&key("Escape", false, false)), Some(EditorShortcut::Close));
        assert_eq!(editor_shortcut(&key("z", false, false)), None);
        assert_eq!(editor_shortcut(&key("a", true, false)), None);
    }

    #[test]
    fn test_release_is_ignored() {
        let mut event = key("z", true, false);
        event.pressed = false;
        assert_eq!(editor_shortcut(&event), None);
    }
}
