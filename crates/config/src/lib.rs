//! Shared configuration for Blockskin
//!
//! Settings live in `config.toml` in the platform configuration directory.
//! Every field has a default, so a missing or partial file is valid. A few
//! settings can be overridden from the environment:
//! - `BLOCKSKIN_ZOOM` - initial editor pixel size
//! - `BLOCKSKIN_HISTORY` - editor undo depth

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Default editor pixel size (zoom level)
pub const DEFAULT_PIXEL_SIZE: f32 = 10.0;
pub const DEFAULT_MIN_PIXEL_SIZE: f32 = 2.0;
pub const DEFAULT_MAX_PIXEL_SIZE: f32 = 20.0;

/// Default number of undo snapshots kept by the editor
pub const DEFAULT_HISTORY_DEPTH: usize = 20;

pub const DEFAULT_BRUSH_SIZE: u32 = 1;
/// Brush sizes the painter supports; configured ranges are clamped into it
pub const DEFAULT_MIN_BRUSH_SIZE: u32 = 1;
pub const DEFAULT_MAX_BRUSH_SIZE: u32 = 10;

/// Default backing surface resolution per part
pub const DEFAULT_SURFACE_SIZE: u32 = 64;

pub const CONFIG_FILE: &str = "config.toml";
pub const COLOR_STORE_FILE: &str = "colors.json";

pub const ENV_ZOOM: &str = "BLOCKSKIN_ZOOM";
pub const ENV_HISTORY: &str = "BLOCKSKIN_HISTORY";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to access config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub editor: EditorConfig,
    #[serde(default)]
    pub brush: BrushConfig,
    #[serde(default)]
    pub paint: PaintConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Raster editor settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Pixel size the editor opens with and resets to (default: 10)
    #[serde(default = "default_pixel_size")]
    pub initial_pixel_size: f32,
    #[serde(default = "default_min_pixel_size")]
    pub min_pixel_size: f32,
    #[serde(default = "default_max_pixel_size")]
    pub max_pixel_size: f32,
    /// Undo depth (default: 20)
    #[serde(default = "default_history_depth")]
    pub history_depth: usize,
}

/// 3D pixel-mode brush settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrushConfig {
    /// Brush edge length in cells (default: 1, range: 1-10)
    #[serde(default = "default_brush_size")]
    pub default_size: u32,
    #[serde(default = "default_min_brush_size")]
    pub min_size: u32,
    #[serde(default = "default_max_brush_size")]
    pub max_size: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaintConfig {
    /// Backing surface edge length for each part (default: 64)
    #[serde(default = "default_surface_size")]
    pub surface_size: u32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Color store file. Defaults to `colors.json` in the data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_store: Option<PathBuf>,
}

fn default_pixel_size() -> f32 {
    DEFAULT_PIXEL_SIZE
}
fn default_min_pixel_size() -> f32 {
    DEFAULT_MIN_PIXEL_SIZE
}
fn default_max_pixel_size() -> f32 {
    DEFAULT_MAX_PIXEL_SIZE
}
fn default_history_depth() -> usize {
    DEFAULT_HISTORY_DEPTH
}
fn default_brush_size() -> u32 {
    DEFAULT_BRUSH_SIZE
}
fn default_min_brush_size() -> u32 {
    DEFAULT_MIN_BRUSH_SIZE
}
fn default_max_brush_size() -> u32 {
    DEFAULT_MAX_BRUSH_SIZE
}
fn default_surface_size() -> u32 {
    DEFAULT_SURFACE_SIZE
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            initial_pixel_size: default_pixel_size(),
            min_pixel_size: default_min_pixel_size(),
            max_pixel_size: default_max_pixel_size(),
            history_depth: default_history_depth(),
        }
    }
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            default_size: default_brush_size(),
            min_size: default_min_brush_size(),
            max_size: default_max_brush_size(),
        }
    }
}

impl Default for PaintConfig {
    fn default() -> Self {
        Self {
            surface_size: default_surface_size(),
        }
    }
}

/// Platform-specific configuration directory.
///
/// On Linux: `~/.config/blockskin`. Returns `None` if the home directory
/// cannot be determined.
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("io", "blockskin", "blockskin")
        .map(|dirs| dirs.config_dir().to_path_buf())
}

/// Platform-specific data directory, home of the color store.
///
/// On Linux: `~/.local/share/blockskin`.
pub fn data_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("io", "blockskin", "blockskin")
        .map(|dirs| dirs.data_dir().to_path_buf())
}

impl Config {
    /// Load `config.toml` from the config directory, then apply environment
    /// overrides. A missing directory or file yields defaults.
    pub fn load() -> Result<Config, ConfigError> {
        let mut config = match config_dir() {
            Some(dir) => Config::load_from(&dir.join(CONFIG_FILE))?,
            None => {
                warn!("No config directory available, using defaults");
                Config::default()
            }
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config.sanitized())
    }

    /// Read a config file. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No config at {}, using defaults", path.display());
                return Ok(Config::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        Ok(toml::from_str(&content)?)
    }

    /// Write `config.toml` to the config directory, creating it if needed
    pub fn save(&self) -> Result<(), ConfigError> {
        match config_dir() {
            Some(dir) => self.save_to(&dir.join(CONFIG_FILE)),
            None => Ok(()),
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(io_err)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(io_err)
    }

    /// Apply `BLOCKSKIN_*` overrides read through `lookup`.
    ///
    /// Unparseable values are logged and ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(value) = lookup(ENV_ZOOM) {
            match value.trim().parse::<f32>() {
                Ok(zoom) if zoom.is_finite() && zoom > 0.0 => self.editor.initial_pixel_size = zoom,
                _ => warn!("Ignoring invalid {}={:?}", ENV_ZOOM, value),
            }
        }
        if let Some(value) = lookup(ENV_HISTORY) {
            match value.trim().parse::<usize>() {
                Ok(depth) if depth > 0 => self.editor.history_depth = depth,
                _ => warn!("Ignoring invalid {}={:?}", ENV_HISTORY, value),
            }
        }
    }

    /// Fix inverted ranges and pull defaults back inside their range
    pub fn sanitized(mut self) -> Config {
        let editor = &mut self.editor;
        editor.min_pixel_size =
            positive_or("editor.min_pixel_size", editor.min_pixel_size, DEFAULT_MIN_PIXEL_SIZE);
        editor.max_pixel_size =
            positive_or("editor.max_pixel_size", editor.max_pixel_size, DEFAULT_MAX_PIXEL_SIZE);
        editor.initial_pixel_size =
            positive_or("editor.initial_pixel_size", editor.initial_pixel_size, DEFAULT_PIXEL_SIZE);
        if editor.min_pixel_size > editor.max_pixel_size {
            warn!("editor.min_pixel_size exceeds max_pixel_size, swapping");
            std::mem::swap(&mut editor.min_pixel_size, &mut editor.max_pixel_size);
        }
        editor.initial_pixel_size = editor
            .initial_pixel_size
            .clamp(editor.min_pixel_size, editor.max_pixel_size);
        editor.history_depth = editor.history_depth.max(1);

        let brush = &mut self.brush;
        if brush.min_size > brush.max_size {
            warn!("brush.min_size exceeds max_size, swapping");
            std::mem::swap(&mut brush.min_size, &mut brush.max_size);
        }
        let supported = DEFAULT_MIN_BRUSH_SIZE..=DEFAULT_MAX_BRUSH_SIZE;
        if !supported.contains(&brush.min_size) || !supported.contains(&brush.max_size) {
            warn!(
                "brush range {}-{} exceeds {}-{}, clamping",
                brush.min_size, brush.max_size, DEFAULT_MIN_BRUSH_SIZE, DEFAULT_MAX_BRUSH_SIZE
            );
        }
        brush.min_size = brush.min_size.clamp(DEFAULT_MIN_BRUSH_SIZE, DEFAULT_MAX_BRUSH_SIZE);
        brush.max_size = brush
            .max_size
            .clamp(DEFAULT_MIN_BRUSH_SIZE, DEFAULT_MAX_BRUSH_SIZE)
            .max(brush.min_size);
        brush.default_size = brush.default_size.clamp(brush.min_size, brush.max_size);

        self.paint.surface_size = self.paint.surface_size.max(1);
        self
    }

    /// Where part colors are persisted, if a location is known
    pub fn color_store_path(&self) -> Option<PathBuf> {
        self.storage
            .color_store
            .clone()
            .or_else(|| data_dir().map(|dir| dir.join(COLOR_STORE_FILE)))
    }
}

/// Pixel sizes must be finite and positive; anything else falls back to `default`
fn positive_or(name: &str, value: f32, default: f32) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        warn!("Ignoring invalid {} = {}, using {}", name, value, default);
        default
    }
}
