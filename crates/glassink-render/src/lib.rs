//! Glassink Render Library
//!
//! The render pass for a Glassink canvas and the backends that consume it.
//! The default backend uses Vello for GPU-accelerated rendering.

mod color;
mod commands;
mod renderer;

#[cfg(feature = "vello-renderer")]
mod vello_impl;

pub use color::{color_or_black, parse_color};
pub use commands::CommandRenderer;
pub use renderer::{
    DrawCommand, PathRole, RenderContext, RenderResult, Renderer, RendererError, polyline_path,
    redraw, render_commands,
};

#[cfg(feature = "vello-renderer")]
pub use vello_impl::VelloRenderer;
