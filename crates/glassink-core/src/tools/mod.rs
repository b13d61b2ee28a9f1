//! Tool system and per-gesture state.

use crate::geometry::{self, ScreenPoint};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    /// Freehand drawing.
    #[default]
    Pencil,
    /// Rectangle selection and moving of strokes.
    Selector,
    /// Left-drag pans the view.
    Pan,
}

impl ToolKind {
    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Pencil => "Pencil",
            ToolKind::Selector => "Selector",
            ToolKind::Pan => "Pan",
        }
    }
}

/// State of the pointer gesture in progress.
///
/// Exists only between pointer-down and pointer-up; a tool change throws it
/// away without applying anything.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ToolState {
    #[default]
    Idle,
    /// Collecting points for a new stroke (world space).
    Drawing { points: Vec<Point> },
    /// Rubber-band selection, kept in screen space for the overlay.
    RectSelecting {
        anchor: ScreenPoint,
        current: ScreenPoint,
    },
    /// Moving the selected strokes.
    DraggingSelection {
        /// Last world position the drag was applied up to.
        anchor: Point,
        /// Whether the pre-drag snapshot is already on the undo stack.
        recorded: bool,
    },
    /// Moving the camera.
    Panning { anchor: ScreenPoint },
}

/// Manages the current tool and its gesture state.
#[derive(Debug, Clone, Default)]
pub struct ToolManager {
    /// Currently selected tool.
    pub current_tool: ToolKind,
    /// Current gesture.
    pub state: ToolState,
}

impl ToolManager {
    /// Create a new tool manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the current tool, discarding any gesture in progress.
    pub fn set_tool(&mut self, tool: ToolKind) {
        if self.current_tool != tool {
            log::debug!("Tool changed: {} -> {}", self.current_tool.name(), tool.name());
        }
        self.current_tool = tool;
        self.cancel();
    }

    /// Drop the current gesture.
    pub fn cancel(&mut self) {
        self.state = ToolState::Idle;
    }

    /// Check if a gesture is active.
    pub fn is_active(&self) -> bool {
        !matches!(self.state, ToolState::Idle)
    }

    pub fn is_panning(&self) -> bool {
        matches!(self.state, ToolState::Panning { .. })
    }

    /// Points of the stroke being drawn, if any.
    pub fn in_progress_points(&self) -> Option<&[Point]> {
        match &self.state {
            ToolState::Drawing { points } => Some(points),
            _ => None,
        }
    }

    /// Normalized selection rectangle in screen space, if one is being dragged.
    pub fn selection_rect(&self) -> Option<Rect> {
        match self.state {
            ToolState::RectSelecting { anchor, current } => {
                Some(geometry::rect_from_points(anchor.0, current.0))
            }
            _ => None,
        }
    }
}
