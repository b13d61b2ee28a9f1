//! Glassink Application
//!
//! The overlay shell: a transparent, always-on-top window that feeds
//! platform input into the canvas engine and presents its frames.

mod app;
mod config;
mod hotkey;
mod input_map;
mod shortcuts;

pub use app::{App, AppError};
pub use config::AppConfig;
pub use shortcuts::{Shortcut, ShortcutRegistry};
