//! Vello-based renderer implementation.

use crate::renderer::{DrawCommand, RenderContext, Renderer, render_commands};
use kurbo::{Affine, BezPath, Cap, Join, Point, Rect, Stroke};
use peniko::{Color, Fill};
use vello::Scene;

/// Vello-based renderer for GPU-accelerated 2D graphics.
pub struct VelloRenderer {
    /// The Vello scene being built.
    scene: Scene,
    /// Clear color of the last frame, to be used as the render base color.
    background: Color,
}

impl Default for VelloRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl VelloRenderer {
    /// Create a new Vello renderer.
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
            background: Color::TRANSPARENT,
        }
    }

    /// Get the built scene for rendering.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Take ownership of the scene (resets internal scene).
    pub fn take_scene(&mut self) -> Scene {
        std::mem::take(&mut self.scene)
    }

    /// Base color to pass in `RenderParams`.
    pub fn background(&self) -> Color {
        self.background
    }

    fn render_path(&mut self, path: &BezPath, color: Color, width: f64, transform: Affine) {
        let stroke = Stroke::new(width).with_caps(Cap::Round).with_join(Join::Round);
        self.scene.stroke(&stroke, transform, color, None, path);
    }

    /// Render a selection rectangle (marquee) in screen space.
    fn render_selection_rect(
        &mut self,
        rect: Rect,
        stroke_color: Color,
        fill_color: Color,
        width: f64,
        dashes: [f64; 2],
    ) {
        let mut path = BezPath::new();
        path.move_to(Point::new(rect.x0, rect.y0));
        path.line_to(Point::new(rect.x1, rect.y0));
        path.line_to(Point::new(rect.x1, rect.y1));
        path.line_to(Point::new(rect.x0, rect.y1));
        path.close_path();

        self.scene.fill(Fill::NonZero, Affine::IDENTITY, fill_color, None, &path);

        let stroke = Stroke::new(width).with_dashes(0.0, dashes);
        self.scene.stroke(&stroke, Affine::IDENTITY, stroke_color, None, &path);
    }
}

impl Renderer for VelloRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) {
        self.scene.reset();

        let mut stack = vec![Affine::IDENTITY];
        for command in render_commands(ctx) {
            let transform = stack.last().copied().unwrap_or(Affine::IDENTITY);
            match command {
                DrawCommand::Clear(color) => self.background = color,
                DrawCommand::PushTransform(affine) => stack.push(transform * affine),
                DrawCommand::Path {
                    path, color, width, ..
                } => self.render_path(&path, color, width, transform),
                DrawCommand::PopTransform => {
                    if stack.len() > 1 {
                        stack.pop();
                    }
                }
                DrawCommand::SelectionRect {
                    rect,
                    stroke_color,
                    fill_color,
                    width,
                    dashes,
                } => self.render_selection_rect(rect, stroke_color, fill_color, width, dashes),
            }
        }
    }
}
