//! Canvas state and the input state machine.
//!
//! [`Canvas`] owns everything the engine knows: the stroke document with its
//! history, the camera, the active tool and gesture, the selection and the
//! current color. Every input goes through [`Canvas::handle_event`], which
//! returns whether the surface needs to be redrawn.

use crate::camera::Camera;
use crate::config::CanvasConfig;
use crate::document::{Stroke, StrokeDocument};
use crate::geometry::{self, ScreenPoint};
use crate::input::{InputEvent, Key, Modifiers, MouseButton};
use crate::tools::{ToolKind, ToolManager, ToolState};
use kurbo::{Point, Size, Vec2};
use std::collections::BTreeSet;

/// Pointer cursor the shell should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorIcon {
    Crosshair,
    Pointer,
    Grab,
    Grabbing,
}

/// Runtime canvas state.
#[derive(Debug, Clone)]
pub struct Canvas {
    /// Committed strokes and their undo/redo history.
    pub document: StrokeDocument,
    /// Camera for view transform.
    pub camera: Camera,
    /// Tool manager.
    pub tool_manager: ToolManager,
    /// Indices of selected strokes, valid against the current document only.
    selection: BTreeSet<usize>,
    /// Surface size in pixels.
    pub viewport_size: Size,
    /// Color for new strokes.
    color: String,
    /// Whether the space bar is held (left-drag pans).
    space_held: bool,
    config: CanvasConfig,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    /// Create a new canvas with the default configuration.
    pub fn new() -> Self {
        Self::with_config(CanvasConfig::default())
    }

    /// Create a canvas with a custom configuration.
    ///
    /// A configuration that fails [`CanvasConfig::validate`] is logged and
    /// replaced by the defaults.
    pub fn with_config(config: CanvasConfig) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(e) => {
                log::warn!("Invalid canvas config ({e}), using defaults");
                CanvasConfig::default()
            }
        };
        Self {
            document: StrokeDocument::with_limit(config.undo_limit),
            camera: Camera::with_zoom_bounds(config.min_zoom, config.max_zoom),
            tool_manager: ToolManager::new(),
            selection: BTreeSet::new(),
            viewport_size: Size::ZERO,
            color: config.default_color.clone(),
            space_held: false,
            config,
        }
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    /// Dispatch one input event. Returns true if a redraw is needed.
    pub fn handle_event(&mut self, event: InputEvent) -> bool {
        match event {
            InputEvent::PointerDown { position, button } => self.pointer_down(position, button),
            InputEvent::PointerMove { position } => self.pointer_move(position),
            InputEvent::PointerUp { position, button } => self.pointer_up(position, button),
            InputEvent::Wheel { position, delta } => self.wheel(position, delta),
            InputEvent::KeyDown { key, modifiers } => self.key_down(&key, modifiers),
            InputEvent::KeyUp { key } => self.key_up(&key),
            InputEvent::Resize { width, height } => self.resize(width, height),
        }
    }

    /// Handle a button press at a screen position.
    pub fn pointer_down(&mut self, position: ScreenPoint, button: MouseButton) -> bool {
        let tool = self.tool_manager.current_tool;
        let wants_pan = button == MouseButton::Middle
            || (button == MouseButton::Left && (self.space_held || tool == ToolKind::Pan));

        if wants_pan {
            if self.tool_manager.is_active() && !self.tool_manager.is_panning() {
                log::debug!("Pan pre-empts {:?}", self.tool_manager.state);
            }
            self.tool_manager.state = ToolState::Panning { anchor: position };
            return true;
        }

        if button != MouseButton::Left {
            return false;
        }

        let world = self.camera.screen_to_world(position);
        self.tool_manager.state = match tool {
            ToolKind::Pencil => ToolState::Drawing {
                points: vec![world],
            },
            ToolKind::Selector if self.hits_selection(world) => ToolState::DraggingSelection {
                anchor: world,
                recorded: false,
            },
            ToolKind::Selector => ToolState::RectSelecting {
                anchor: position,
                current: position,
            },
            ToolKind::Pan => return false,
        };
        true
    }

    /// Handle pointer motion.
    pub fn pointer_move(&mut self, position: ScreenPoint) -> bool {
        let world = self.camera.screen_to_world(position);

        match &mut self.tool_manager.state {
            ToolState::Idle => false,
            ToolState::Drawing { points } => {
                points.push(world);
                true
            }
            ToolState::RectSelecting { current, .. } => {
                *current = position;
                true
            }
            ToolState::DraggingSelection { anchor, recorded } => {
                let delta = world - *anchor;
                if delta == Vec2::ZERO {
                    return false;
                }
                if *recorded {
                    self.document.translate_recorded(&self.selection, delta);
                } else {
                    // The first move of a drag is the one history step for the whole gesture.
                    self.document.translate_indices(&self.selection, delta);
                    *recorded = true;
                }
                *anchor = world;
                true
            }
            ToolState::Panning { anchor } => {
                self.camera.pan(position.delta_from(*anchor));
                *anchor = position;
                true
            }
        }
    }

    /// Handle a button release. Any release ends the current gesture.
    pub fn pointer_up(&mut self, _position: ScreenPoint, _button: MouseButton) -> bool {
        match std::mem::take(&mut self.tool_manager.state) {
            ToolState::Idle => false,
            ToolState::Drawing { points } => {
                let count = points.len();
                if self.document.commit_stroke(Stroke::new(points, self.color.clone())) {
                    log::debug!("Committed stroke #{} ({} points)", self.document.len() - 1, count);
                }
                true
            }
            ToolState::RectSelecting { anchor, current } => {
                self.select_in_screen_rect(anchor, current);
                true
            }
            ToolState::DraggingSelection { .. } | ToolState::Panning { .. } => true,
        }
    }

    /// Handle a wheel event: zoom around the pointer.
    pub fn wheel(&mut self, position: ScreenPoint, delta: f64) -> bool {
        self.camera.zoom_for_wheel(position, delta)
    }

    /// Handle a key press.
    pub fn key_down(&mut self, key: &Key, modifiers: Modifiers) -> bool {
        if modifiers.command() {
            if key.is_letter('z') {
                return self.undo();
            }
            if key.is_letter('y') {
                return self.redo();
            }
        }

        match key {
            Key::Space => {
                let changed = !self.space_held;
                self.space_held = true;
                changed
            }
            Key::F1 => {
                self.set_tool(ToolKind::Pencil);
                true
            }
            Key::F2 => {
                self.set_tool(ToolKind::Selector);
                true
            }
            Key::F3 => self.clear_all(),
            Key::Backspace if self.tool_manager.current_tool == ToolKind::Selector => {
                self.delete_selected()
            }
            Key::Character(_) => match key.digit().and_then(|d| self.config.palette_color(d)) {
                Some(color) => {
                    let color = color.to_string();
                    self.set_color(color);
                    true
                }
                None => false,
            },
            _ => false,
        }
    }

    /// Handle a key release. Releasing space ends any pan in progress.
    pub fn key_up(&mut self, key: &Key) -> bool {
        if *key != Key::Space {
            return false;
        }
        self.space_held = false;
        if self.tool_manager.is_panning() {
            self.tool_manager.cancel();
        }
        true
    }

    /// Record the new surface size.
    pub fn resize(&mut self, width: f64, height: f64) -> bool {
        self.viewport_size = Size::new(width.max(0.0), height.max(0.0));
        true
    }

    /// Set the current tool, discarding any gesture in progress.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.tool_manager.set_tool(tool);
    }

    pub fn tool(&self) -> ToolKind {
        self.tool_manager.current_tool
    }

    /// Color used for strokes committed from now on.
    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn set_color(&mut self, color: impl Into<String>) {
        self.color = color.into();
        log::debug!("Color set to {}", self.color);
    }

    /// Currently selected stroke indices.
    pub fn selection(&self) -> &BTreeSet<usize> {
        &self.selection
    }

    /// Check if a stroke is selected.
    pub fn is_selected(&self, index: usize) -> bool {
        self.selection.contains(&index)
    }

    /// Replace the selection with every stroke that has a point inside the
    /// screen rectangle spanned by `a` and `b`.
    pub fn select_in_screen_rect(&mut self, a: ScreenPoint, b: ScreenPoint) {
        let screen_rect = geometry::rect_from_points(a.0, b.0);
        let world_rect = geometry::rect_from_points(
            self.camera.screen_to_world(ScreenPoint::new(screen_rect.x0, screen_rect.y0)),
            self.camera.screen_to_world(ScreenPoint::new(screen_rect.x1, screen_rect.y1)),
        );

        self.selection = self
            .document
            .strokes()
            .iter()
            .enumerate()
            .filter(|(_, stroke)| geometry::stroke_in_rect(stroke, world_rect))
            .map(|(i, _)| i)
            .collect();
        log::debug!("Selected {} stroke(s)", self.selection.len());
    }

    /// Whether `world` lies within the hit tolerance of a selected stroke.
    pub fn hits_selection(&self, world: Point) -> bool {
        let tolerance = self.config.hit_tolerance / self.camera.zoom;
        self.selection
            .iter()
            .filter_map(|&i| self.document.get(i))
            .any(|stroke| geometry::distance_to_polyline(world, &stroke.points) <= tolerance)
    }

    /// Undo the last edit. Clears the selection since indices may shift.
    pub fn undo(&mut self) -> bool {
        if !self.document.undo() {
            return false;
        }
        self.after_history_jump();
        true
    }

    /// Redo the last undone edit. Clears the selection since indices may shift.
    pub fn redo(&mut self) -> bool {
        if !self.document.redo() {
            return false;
        }
        self.after_history_jump();
        true
    }

    /// Delete selected strokes as one undoable step.
    pub fn delete_selected(&mut self) -> bool {
        if self.selection.is_empty() {
            return false;
        }
        let removed = self.document.remove_indices(&self.selection);
        self.selection.clear();
        self.end_drag();
        removed
    }

    /// Remove every stroke as one undoable step and clear the selection.
    pub fn clear_all(&mut self) -> bool {
        let had_selection = !self.selection.is_empty();
        self.selection.clear();
        self.end_drag();
        self.document.clear() || had_selection
    }

    /// Cursor hint for the shell.
    pub fn cursor(&self) -> CursorIcon {
        if self.tool_manager.is_panning() {
            return CursorIcon::Grabbing;
        }
        if self.space_held {
            return CursorIcon::Grab;
        }
        match self.tool_manager.current_tool {
            ToolKind::Pencil => CursorIcon::Crosshair,
            ToolKind::Selector => CursorIcon::Pointer,
            ToolKind::Pan => CursorIcon::Grab,
        }
    }

    fn after_history_jump(&mut self) {
        self.selection.clear();
        self.end_drag();
    }

    /// A drag only makes sense against the indices it started with.
    fn end_drag(&mut self) {
        if matches!(self.tool_manager.state, ToolState::DraggingSelection { .. }) {
            self.tool_manager.cancel();
        }
    }
}
