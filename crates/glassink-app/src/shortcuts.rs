//! Keyboard shortcut registry and documentation.

use crate::hotkey::CLICK_THROUGH_HOTKEY;

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    pub ctrl: bool,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(key: &'static str, ctrl: bool, description: &'static str) -> Self {
        Self {
            key,
            ctrl,
            description,
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl/Cmd+Z").
    pub fn format(&self) -> String {
        if self.ctrl {
            format!("Ctrl/Cmd+{}", self.key)
        } else {
            self.key.to_string()
        }
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        vec![
            Shortcut::new("F1", false, "Pencil tool"),
            Shortcut::new("F2", false, "Selector tool"),
            Shortcut::new("F3", false, "Clear all strokes"),
            Shortcut::new("F5", false, "Toggle click-through (overlay focused)"),
            Shortcut::new(CLICK_THROUGH_HOTKEY, false, "Toggle click-through (anywhere)"),
            Shortcut::new("F12", false, "Show this help"),
            Shortcut::new("Backspace", false, "Delete selected strokes (Selector)"),
            Shortcut::new("Z", true, "Undo"),
            Shortcut::new("Y", true, "Redo"),
            Shortcut::new("1-4", false, "Red, blue, yellow, green"),
            Shortcut::new("Space+Drag", false, "Pan"),
            Shortcut::new("Middle Drag", false, "Pan"),
            Shortcut::new("Wheel", false, "Zoom at pointer"),
            Shortcut::new("Escape", false, "Quit"),
        ]
    }

    /// Print all shortcuts to console.
    pub fn print_all() {
        println!("\n=== Keyboard Shortcuts ===");
        for shortcut in Self::all() {
            println!("  {:20} {}", shortcut.format(), shortcut.description);
        }
        println!();
    }
}
