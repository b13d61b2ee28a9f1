//! Renderer trait abstraction and the backend-independent render pass.

use crate::color::color_or_black;
use glassink_core::{Canvas, ToolKind};
use kurbo::{Affine, BezPath, Point, Rect, Size};
use peniko::Color;
use thiserror::Error;

/// Errors from bringing up or driving a GPU backend.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Initialization failed: {0}")]
    InitFailed(String),
    #[error("Render failed: {0}")]
    RenderFailed(String),
    #[error("Surface error: {0}")]
    Surface(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// The canvas to render.
    pub canvas: &'a Canvas,
    /// Viewport size in physical pixels.
    pub viewport_size: Size,
    /// Clear color. Transparent so the desktop shows through.
    pub background_color: Color,
    /// Stroke width in screen pixels, independent of zoom.
    pub stroke_width: f64,
    /// Overlay drawn over selected strokes.
    pub highlight_color: Color,
    pub highlight_width: f64,
    /// Color of the rubber-band rectangle.
    pub selection_color: Color,
    pub selection_stroke_width: f64,
    pub selection_dashes: [f64; 2],
    pub selection_stroke_alpha: f32,
    pub selection_fill_alpha: f32,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(canvas: &'a Canvas, viewport_size: Size) -> Self {
        Self {
            canvas,
            viewport_size,
            background_color: Color::TRANSPARENT,
            stroke_width: 3.0,
            highlight_color: Color::from_rgba8(0, 0, 255, 255).with_alpha(0.3),
            highlight_width: 5.0,
            selection_color: Color::from_rgba8(0, 0, 255, 255),
            selection_stroke_width: 1.5,
            selection_dashes: [6.0, 4.0],
            selection_stroke_alpha: 0.7,
            selection_fill_alpha: 0.15,
        }
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    /// Whether there is anything to draw into.
    pub fn has_area(&self) -> bool {
        self.viewport_size.width > 0.0 && self.viewport_size.height > 0.0
    }
}

/// Which part of the canvas a path belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathRole {
    /// Committed stroke at this index.
    Stroke(usize),
    /// The stroke being drawn.
    InProgress,
    /// Selection overlay for the stroke at this index.
    Highlight(usize),
}

/// One step of a frame, in paint order.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Clear the surface.
    Clear(Color),
    /// Enter world space.
    PushTransform(Affine),
    /// Stroke a polyline in the current space.
    Path {
        role: PathRole,
        path: BezPath,
        color: Color,
        width: f64,
    },
    /// Back to screen space.
    PopTransform,
    /// Dashed, translucent rubber-band rectangle in screen space.
    SelectionRect {
        rect: Rect,
        stroke_color: Color,
        fill_color: Color,
        width: f64,
        dashes: [f64; 2],
    },
}

impl DrawCommand {
    pub fn role(&self) -> Option<PathRole> {
        match self {
            DrawCommand::Path { role, .. } => Some(*role),
            _ => None,
        }
    }
}

/// Build a polyline path. A lone point becomes a zero-length segment so a
/// round cap still shows it.
pub fn polyline_path(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    let Some((&first, rest)) = points.split_first() else {
        return path;
    };
    path.move_to(first);
    if rest.is_empty() {
        path.line_to(first);
    }
    for &p in rest {
        path.line_to(p);
    }
    path
}

/// Compute the frame for the canvas. Pure: reads the canvas, never mutates it.
///
/// Returns nothing when the surface has no area.
pub fn render_commands(ctx: &RenderContext) -> Vec<DrawCommand> {
    if !ctx.has_area() {
        return Vec::new();
    }

    let canvas = ctx.canvas;
    let zoom = canvas.camera.zoom;
    let strokes = canvas.document.strokes();
    let mut commands = Vec::with_capacity(strokes.len() + canvas.selection().len() + 5);

    commands.push(DrawCommand::Clear(ctx.background_color));
    commands.push(DrawCommand::PushTransform(canvas.camera.transform()));

    for (i, stroke) in strokes.iter().enumerate() {
        commands.push(DrawCommand::Path {
            role: PathRole::Stroke(i),
            path: polyline_path(&stroke.points),
            color: color_or_black(&stroke.color),
            width: ctx.stroke_width / zoom,
        });
    }

    if let Some(points) = canvas.tool_manager.in_progress_points() {
        commands.push(DrawCommand::Path {
            role: PathRole::InProgress,
            path: polyline_path(points),
            color: color_or_black(canvas.color()),
            width: ctx.stroke_width / zoom,
        });
    }

    if canvas.tool() == ToolKind::Selector {
        for &i in canvas.selection() {
            let Some(stroke) = strokes.get(i) else {
                continue;
            };
            commands.push(DrawCommand::Path {
                role: PathRole::Highlight(i),
                path: polyline_path(&stroke.points),
                color: ctx.highlight_color,
                width: ctx.highlight_width / zoom,
            });
        }
    }

    commands.push(DrawCommand::PopTransform);

    if let Some(rect) = canvas.tool_manager.selection_rect() {
        commands.push(DrawCommand::SelectionRect {
            rect,
            stroke_color: ctx.selection_color.with_alpha(ctx.selection_stroke_alpha),
            fill_color: ctx.selection_color.with_alpha(ctx.selection_fill_alpha),
            width: ctx.selection_stroke_width,
            dashes: ctx.selection_dashes,
        });
    }

    commands
}

/// Trait for rendering backends.
///
/// Implementations can use Vello, a command recorder for tests, or other
/// rendering engines.
pub trait Renderer: Send + Sync {
    /// Build the scene/command buffer for a frame.
    ///
    /// This method is called once per frame and should prepare all drawing commands.
    fn build_scene(&mut self, ctx: &RenderContext);
}

/// Redraw if there is a surface to draw into. Returns whether a frame was built.
pub fn redraw<R: Renderer>(renderer: Option<&mut R>, ctx: &RenderContext) -> bool {
    let Some(renderer) = renderer else {
        log::debug!("Skipping redraw: no surface yet");
        return false;
    };
    if !ctx.has_area() {
        log::debug!("Skipping redraw: zero-area surface {:?}", ctx.viewport_size);
        return false;
    }
    renderer.build_scene(ctx);
    true
}
