//! Engine configuration, loadable from JSON.

use crate::camera::{MAX_ZOOM, MIN_ZOOM};
use crate::document::UNDO_LIMIT;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Default pencil color.
pub const DEFAULT_COLOR: &str = "#ff0000";

/// Colors bound to the `1`..`4` keys.
pub const DEFAULT_PALETTE: [&str; 4] = ["#ff0000", "#0000ff", "#ffff00", "#00ff00"];

/// Hit tolerance around selected strokes, in screen pixels.
pub const HIT_TOLERANCE: f64 = 8.0;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid zoom bounds: min {min} must be positive and not above max {max}")]
    ZoomBounds { min: f64, max: f64 },
    #[error("Palette must not be empty")]
    EmptyPalette,
}

/// Tunables for a [`Canvas`](crate::Canvas).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Entries kept on each of the undo and redo stacks.
    pub undo_limit: usize,
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Screen-pixel radius for grabbing a selected stroke.
    pub hit_tolerance: f64,
    /// Color of new strokes until changed.
    pub default_color: String,
    /// Colors selected by the digit keys, starting at `1`.
    pub palette: Vec<String>,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            undo_limit: UNDO_LIMIT,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            hit_tolerance: HIT_TOLERANCE,
            default_color: DEFAULT_COLOR.to_string(),
            palette: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl CanvasConfig {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.min_zoom > 0.0 && self.min_zoom <= self.max_zoom) {
            return Err(ConfigError::ZoomBounds {
                min: self.min_zoom,
                max: self.max_zoom,
            });
        }
        if self.palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        Ok(())
    }

    /// Palette color for digit key `digit` (1-based).
    pub fn palette_color(&self, digit: u32) -> Option<&str> {
        let index = (digit as usize).checked_sub(1)?;
        self.palette.get(index).map(String::as_str)
    }
}
