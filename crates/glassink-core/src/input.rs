//! Input event types for mouse/keyboard/resize.

use crate::geometry::ScreenPoint;
use serde::{Deserialize, Serialize};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on Linux/Windows, Cmd on macOS. Either one is accepted.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Keys the canvas reacts to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    F1,
    F2,
    F3,
    Backspace,
    Space,
    /// A printable character, as produced by the keyboard layout.
    Character(String),
    /// Anything else; ignored by the canvas.
    Other,
}

impl Key {
    /// Build a character key (convenience for tests and shells).
    pub fn char(c: char) -> Self {
        Key::Character(c.to_string())
    }

    /// Whether this is the given letter, ignoring case.
    pub fn is_letter(&self, letter: char) -> bool {
        match self {
            Key::Character(s) => {
                let mut chars = s.chars();
                matches!((chars.next(), chars.next()), (Some(c), None) if c.eq_ignore_ascii_case(&letter))
            }
            _ => false,
        }
    }

    /// Digit value for `0`..`9` character keys.
    pub fn digit(&self) -> Option<u32> {
        match self {
            Key::Character(s) if s.chars().count() == 1 => s.chars().next()?.to_digit(10),
            _ => None,
        }
    }
}

/// Everything the canvas can be told about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    PointerDown {
        position: ScreenPoint,
        button: MouseButton,
    },
    PointerMove {
        position: ScreenPoint,
    },
    PointerUp {
        position: ScreenPoint,
        button: MouseButton,
    },
    /// Vertical wheel delta; positive scrolls down.
    Wheel {
        position: ScreenPoint,
        delta: f64,
    },
    KeyDown {
        key: Key,
        modifiers: Modifiers,
    },
    KeyUp {
        key: Key,
    },
    /// The drawing surface changed size (physical pixels).
    Resize {
        width: f64,
        height: f64,
    },
}
