//! Backend that records the frame as plain commands.

use crate::renderer::{DrawCommand, PathRole, RenderContext, Renderer, render_commands};

/// Keeps the commands of the last frame. Handy for tests and for hosts that
/// do their own painting.
#[derive(Debug, Default)]
pub struct CommandRenderer {
    commands: Vec<DrawCommand>,
    frames: usize,
}

impl CommandRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands of the most recent frame.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of frames built so far.
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Path roles of the most recent frame, in paint order.
    pub fn roles(&self) -> Vec<PathRole> {
        self.commands.iter().filter_map(DrawCommand::role).collect()
    }
}

impl Renderer for CommandRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) {
        self.commands = render_commands(ctx);
        self.frames += 1;
    }
}
