//! Core application state and lifecycle.

use crate::config::AppConfig;
use crate::hotkey::{AppEvent, CLICK_THROUGH_HOTKEY, GlobalToggle};
use crate::input_map;
use crate::shortcuts::ShortcutRegistry;
use glassink_core::{Canvas, CursorIcon, InputEvent, Modifiers, ScreenPoint};
use glassink_render::{
    RenderContext, RenderResult, RendererError, VelloRenderer, color_or_black, redraw,
};
use peniko::Color;
use std::sync::Arc;
use thiserror::Error;
use vello::util::RenderSurface;
use vello::wgpu::{CompositeAlphaMode, PresentMode};
use vello::{AaConfig, RenderParams, RendererOptions};
use winit::application::ApplicationHandler;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{Key as WinitKey, NamedKey};
use winit::window::{Window, WindowId, WindowLevel};

/// Errors that stop the application.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("Window creation failed: {0}")]
    Window(#[from] winit::error::OsError),
    #[error(transparent)]
    Render(#[from] RendererError),
}

/// Actions the shell takes on its own keys, before the canvas sees them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShellAction {
    Quit,
    ToggleClickThrough,
    ShowHelp,
    /// Auto-repeat of a shell key: consumed, not acted on again.
    Held,
}

/// Map a window-level key press to a shell action.
fn shell_action(key: &WinitKey, modifiers: Modifiers, repeat: bool) -> Option<ShellAction> {
    let action = match key {
        WinitKey::Named(NamedKey::Escape) => ShellAction::Quit,
        // Ctrl+Shift+F5 belongs to the global toggle.
        WinitKey::Named(NamedKey::F5) if !(modifiers.ctrl && modifiers.shift) => {
            ShellAction::ToggleClickThrough
        }
        WinitKey::Named(NamedKey::F12) => ShellAction::ShowHelp,
        _ => return None,
    };
    Some(if repeat { ShellAction::Held } else { action })
}

/// Click-through state.
///
/// Turning it on is refused unless a global toggle can turn it off again,
/// since the overlay stops receiving keys once it lets clicks through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ClickThrough {
    enabled: bool,
    global_toggle: bool,
}

impl ClickThrough {
    fn new(global_toggle: bool) -> Self {
        Self {
            enabled: false,
            global_toggle,
        }
    }

    /// Flip the state. Returns the new state, or `None` if enabling was refused.
    fn toggle(&mut self) -> Option<bool> {
        if !self.enabled && !self.global_toggle {
            log::warn!(
                "Click-through needs the {CLICK_THROUGH_HOTKEY} global hotkey, which is unavailable"
            );
            return None;
        }
        self.enabled = !self.enabled;
        Some(self.enabled)
    }
}

/// Runtime state for the application.
struct AppState {
    // Windowing
    window: Arc<Window>,
    surface: RenderSurface<'static>,

    // Rendering
    vello_renderer: vello::Renderer,
    stroke_renderer: VelloRenderer,
    /// Texture blitter for RGBA->surface format conversion
    texture_blitter: vello::wgpu::util::TextureBlitter,
    background: Color,

    // State
    canvas: Canvas,
    cursor_position: ScreenPoint,
    modifiers: Modifiers,
    click_through: ClickThrough,
}

/// Main application struct.
pub struct App {
    config: AppConfig,
    state: Option<AppState>,
    render_cx: Option<vello::util::RenderContext>,
    global_toggle: Option<GlobalToggle>,
    /// Startup failure, reported once the event loop returns.
    error: Option<AppError>,
}

impl App {
    /// Create a new application, reading the user's config if there is one.
    pub fn new() -> Self {
        Self::with_config(AppConfig::load_or_default())
    }

    /// Create a new application with custom configuration.
    pub fn with_config(config: AppConfig) -> Self {
        Self {
            config,
            state: None,
            render_cx: None,
            global_toggle: None,
            error: None,
        }
    }

    /// Run the application.
    pub async fn run() -> Result<(), AppError> {
        let event_loop = EventLoop::<AppEvent>::with_user_event().build()?;
        let mut app = App::new();
        app.global_toggle = GlobalToggle::register(event_loop.create_proxy());
        event_loop.run_app(&mut app)?;
        match app.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn create_window(&self, event_loop: &ActiveEventLoop) -> Result<Arc<Window>, AppError> {
        let mut window_attrs = Window::default_attributes()
            .with_title(&self.config.title)
            .with_transparent(true)
            .with_decorations(false)
            .with_resizable(false);

        if self.config.always_on_top {
            window_attrs = window_attrs.with_window_level(WindowLevel::AlwaysOnTop);
        }

        // Cover the whole primary monitor.
        if let Some(monitor) = event_loop.primary_monitor() {
            window_attrs = window_attrs
                .with_inner_size(monitor.size())
                .with_position(monitor.position());
        } else {
            window_attrs = window_attrs.with_maximized(true);
        }

        Ok(Arc::new(event_loop.create_window(window_attrs)?))
    }

    /// Create the surface and renderer for a fresh window.
    fn init(&mut self, window: Arc<Window>) -> Result<(), AppError> {
        let size = window.inner_size();
        let (width, height) = (size.width.max(1), size.height.max(1));
        log::info!("Surface size: {}x{}", width, height);

        let render_cx = self
            .render_cx
            .get_or_insert_with(vello::util::RenderContext::new);

        let mut surface = pollster::block_on(render_cx.create_surface(
            window.clone(),
            width,
            height,
            PresentMode::AutoVsync,
        ))
        .map_err(|e| RendererError::Surface(e.to_string()))?;

        let device_handle = &render_cx.devices[surface.dev_id];
        let device = &device_handle.device;

        // The desktop shows through only if the compositor blends our alpha.
        let alpha_modes = surface
            .surface
            .get_capabilities(device_handle.adapter())
            .alpha_modes;
        if let Some(mode) = [CompositeAlphaMode::PreMultiplied, CompositeAlphaMode::PostMultiplied]
            .into_iter()
            .find(|mode| alpha_modes.contains(mode))
        {
            surface.config.alpha_mode = mode;
            surface.surface.configure(device, &surface.config);
        } else {
            log::warn!("Surface has no blending alpha mode; the overlay will be opaque");
        }

        let vello_renderer = vello::Renderer::new(device, RendererOptions::default())
            .map_err(|e| RendererError::InitFailed(e.to_string()))?;

        // Vello renders to Rgba8Unorm; the surface format may differ.
        let texture_blitter = vello::wgpu::util::TextureBlitter::new(device, surface.config.format);

        let mut canvas = Canvas::with_config(self.config.canvas.clone());
        canvas.resize(width as f64, height as f64);

        let mut click_through = ClickThrough::new(self.global_toggle.is_some());
        if self.config.click_through {
            if let Some(enabled) = click_through.toggle() {
                set_click_through(&window, enabled);
            }
        }

        log::info!("Glassink initialized - {}x{}", width, height);
        log::info!("Press F12 for keyboard shortcuts");

        self.state = Some(AppState {
            window: window.clone(),
            surface,
            vello_renderer,
            stroke_renderer: VelloRenderer::new(),
            texture_blitter,
            background: color_or_black(&self.config.background_color),
            canvas,
            cursor_position: ScreenPoint::ZERO,
            modifiers: Modifiers::default(),
            click_through,
        });

        window.request_redraw();
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: AppError) {
        log::error!("{error}");
        self.error = Some(error);
        event_loop.exit();
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

fn set_click_through(window: &Window, enabled: bool) {
    match window.set_cursor_hittest(!enabled) {
        Ok(()) => log::info!("Click-through {}", if enabled { "on" } else { "off" }),
        Err(e) => log::warn!("Click-through not supported: {e}"),
    }
}

fn winit_cursor(icon: CursorIcon) -> winit::window::CursorIcon {
    match icon {
        CursorIcon::Crosshair => winit::window::CursorIcon::Crosshair,
        CursorIcon::Pointer => winit::window::CursorIcon::Pointer,
        CursorIcon::Grab => winit::window::CursorIcon::Grab,
        CursorIcon::Grabbing => winit::window::CursorIcon::Grabbing,
    }
}

impl AppState {
    /// Feed one event to the canvas and schedule a frame if anything changed.
    fn dispatch(&mut self, event: InputEvent) {
        if self.canvas.handle_event(event) {
            self.window.set_cursor(winit_cursor(self.canvas.cursor()));
            self.window.request_redraw();
        }
    }

    fn resize(&mut self, render_cx: &mut vello::util::RenderContext, size: PhysicalSize<u32>) {
        self.dispatch(InputEvent::Resize {
            width: size.width as f64,
            height: size.height as f64,
        });
        if size.width > 0 && size.height > 0 {
            render_cx.resize_surface(&mut self.surface, size.width, size.height);
        }
    }

    fn render(&mut self, render_cx: &vello::util::RenderContext) -> RenderResult<()> {
        let width = self.surface.config.width;
        let height = self.surface.config.height;

        let ctx = RenderContext::new(&self.canvas, self.canvas.viewport_size)
            .with_background(self.background);
        if !redraw(Some(&mut self.stroke_renderer), &ctx) {
            return Ok(());
        }
        let scene = self.stroke_renderer.take_scene();

        let device_handle = &render_cx.devices[self.surface.dev_id];
        let device = &device_handle.device;
        let queue = &device_handle.queue;

        let surface_texture = self
            .surface
            .surface
            .get_current_texture()
            .map_err(|e| RendererError::Surface(e.to_string()))?;

        let params = RenderParams {
            base_color: self.stroke_renderer.background(),
            width,
            height,
            antialiasing_method: AaConfig::Area,
        };

        // Vello's compute shaders need a storage-bindable Rgba8Unorm target.
        let render_texture = device.create_texture(&vello::wgpu::TextureDescriptor {
            label: Some("vello render texture"),
            size: vello::wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: vello::wgpu::TextureDimension::D2,
            format: vello::wgpu::TextureFormat::Rgba8Unorm,
            usage: vello::wgpu::TextureUsages::STORAGE_BINDING
                | vello::wgpu::TextureUsages::COPY_SRC
                | vello::wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let render_texture_view =
            render_texture.create_view(&vello::wgpu::TextureViewDescriptor::default());

        self.vello_renderer
            .render_to_texture(device, queue, &scene, &render_texture_view, &params)
            .map_err(|e| RendererError::RenderFailed(e.to_string()))?;

        let surface_view = surface_texture
            .texture
            .create_view(&vello::wgpu::TextureViewDescriptor::default());

        let mut blit_encoder =
            device.create_command_encoder(&vello::wgpu::CommandEncoderDescriptor {
                label: Some("blit encoder"),
            });
        self.texture_blitter
            .copy(device, &mut blit_encoder, &render_texture_view, &surface_view);
        queue.submit(std::iter::once(blit_encoder.finish()));

        surface_texture.present();
        Ok(())
    }

    fn toggle_click_through(&mut self) {
        if let Some(enabled) = self.click_through.toggle() {
            set_click_through(&self.window, enabled);
        }
    }

    /// Keys the shell handles itself. Returns true if consumed.
    fn shell_key(&mut self, event: &KeyEvent, event_loop: &ActiveEventLoop) -> bool {
        let Some(action) = shell_action(&event.logical_key, self.modifiers, event.repeat) else {
            return false;
        };
        match action {
            ShellAction::Quit => {
                log::info!("Exiting");
                event_loop.exit();
            }
            ShellAction::ToggleClickThrough => self.toggle_click_through(),
            ShellAction::ShowHelp => ShortcutRegistry::print_all(),
            ShellAction::Held => {}
        }
        true
    }
}

impl ApplicationHandler<AppEvent> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        log::info!("Creating window...");
        let result = self
            .create_window(event_loop)
            .and_then(|window| self.init(window));
        if let Err(e) = result {
            self.fail(event_loop, e);
        }
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: AppEvent) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        match event {
            AppEvent::ToggleClickThrough => state.toggle_click_through(),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(state) = self.state.as_mut() else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if let Some(render_cx) = self.render_cx.as_mut() {
                    state.resize(render_cx, size);
                }
            }

            WindowEvent::RedrawRequested => {
                if let Some(render_cx) = self.render_cx.as_ref() {
                    match state.render(render_cx) {
                        Ok(()) => {}
                        Err(e @ RendererError::Surface(_)) => log::warn!("{e}"),
                        Err(e) => log::error!("{e}"),
                    }
                }
            }

            WindowEvent::CursorMoved {
                position: PhysicalPosition { x, y },
                ..
            } => {
                state.cursor_position = ScreenPoint::new(x, y);
                state.dispatch(InputEvent::PointerMove {
                    position: state.cursor_position,
                });
            }

            WindowEvent::MouseInput {
                state: btn_state,
                button,
                ..
            } => {
                let Some(button) = input_map::mouse_button(button) else {
                    return;
                };
                let position = state.cursor_position;
                let event = match btn_state {
                    ElementState::Pressed => InputEvent::PointerDown { position, button },
                    ElementState::Released => InputEvent::PointerUp { position, button },
                };
                state.dispatch(event);
            }

            WindowEvent::MouseWheel { delta, .. } => {
                state.dispatch(InputEvent::Wheel {
                    position: state.cursor_position,
                    delta: input_map::wheel_delta(delta),
                });
            }

            WindowEvent::ModifiersChanged(modifiers) => {
                state.modifiers = input_map::modifiers(modifiers.state());
            }

            WindowEvent::KeyboardInput { event, .. } => {
                let key = input_map::key(&event.logical_key);
                match event.state {
                    ElementState::Pressed => {
                        if state.shell_key(&event, event_loop) {
                            return;
                        }
                        state.dispatch(InputEvent::KeyDown {
                            key,
                            modifiers: state.modifiers,
                        });
                    }
                    ElementState::Released => state.dispatch(InputEvent::KeyUp { key }),
                }
            }

            _ => {}
        }
    }
}
