//! Glassink Core Library
//!
//! Platform-agnostic state and logic for the Glassink drawing overlay:
//! strokes with undo/redo, the camera, tools and the input state machine.

pub mod camera;
pub mod canvas;
pub mod config;
pub mod document;
pub mod geometry;
pub mod input;
pub mod tools;

pub use camera::Camera;
pub use canvas::{Canvas, CursorIcon};
pub use config::{CanvasConfig, ConfigError};
pub use document::{Stroke, StrokeDocument, UNDO_LIMIT};
pub use geometry::ScreenPoint;
pub use input::{InputEvent, Key, Modifiers, MouseButton};
pub use tools::{ToolKind, ToolManager, ToolState};
