//! YAML configuration.
//!
//! ```yaml
//! version: 1
//! window:
//!   title: Penguin
//!   width: 800
//!   height: 600
//! render:
//!   clear_colour: [0.0, 0.0, 0.0, 1.0]
//!   draw_colour: [1.0, 1.0, 1.0, 1.0]
//!   texture_dir: assets
//! ```
//!
//! Every field is optional.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::color::Colour;
use crate::error::{Error, Result};

/// Output surface settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Window title.
    #[serde(default = "default_title")]
    pub title: String,

    /// Output width in pixels.
    #[serde(default = "default_width")]
    pub width: u32,

    /// Output height in pixels.
    #[serde(default = "default_height")]
    pub height: u32,
}

fn default_title() -> String {
    "Penguin".to_string()
}

fn default_width() -> u32 {
    800
}

fn default_height() -> u32 {
    600
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            width: default_width(),
            height: default_height(),
        }
    }
}

/// Drawing defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Colour the frame is cleared to, as `[r, g, b, a]` in `[0, 1]`.
    #[serde(default = "default_clear_colour")]
    pub clear_colour: [f32; 4],

    /// Default shape colour.
    #[serde(default = "default_draw_colour")]
    pub draw_colour: [f32; 4],

    /// Directory relative texture paths are resolved against.
    #[serde(default)]
    pub texture_dir: Option<PathBuf>,
}

fn default_clear_colour() -> [f32; 4] {
    [0.0, 0.0, 0.0, 1.0]
}

fn default_draw_colour() -> [f32; 4] {
    [1.0, 1.0, 1.0, 1.0]
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            clear_colour: default_clear_colour(),
            draw_colour: default_draw_colour(),
            texture_dir: None,
        }
    }
}

impl RenderConfig {
    /// Clear colour, clamped.
    #[must_use]
    pub fn clear_colour(&self) -> Colour {
        Colour::from(self.clear_colour)
    }

    /// Draw colour, clamped.
    #[must_use]
    pub fn draw_colour(&self) -> Colour {
        Colour::from(self.draw_colour)
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Config file version.
    #[serde(default = "default_version")]
    pub version: u32,

    /// Output surface settings.
    #[serde(default)]
    pub window: WindowConfig,

    /// Drawing defaults.
    #[serde(default)]
    pub render: RenderConfig,
}

fn default_version() -> u32 {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            window: WindowConfig::default(),
            render: RenderConfig::default(),
        }
    }
}

impl Config {
    /// Create a default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .map_err(|_| Error::ConfigNotFound(path.display().to_string()))?;

        Self::parse(&content)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid.
    pub fn parse(yaml: &str) -> Result<Self> {
        serde_yaml_ng::from_str(yaml).map_err(|e| {
            let line = e.location().map_or(0, |l| l.line());
            Error::ConfigParse {
                line,
                message: e.to_string(),
            }
        })
    }

    /// Load configuration, falling back to defaults on any error.
    #[must_use]
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        Self::load(path).unwrap_or_else(|err| {
            log::debug!("using default config ({err})");
            Self::default()
        })
    }

    /// `<config dir>/penguin/config.yaml`, if the platform has a config dir.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("penguin").join("config.yaml"))
    }

    /// Reject settings that cannot produce an output surface.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] for a zero window size.
    pub fn validate(&self) -> Result<()> {
        let WindowConfig { width, height, .. } = self.window;
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        Ok(())
    }
}
