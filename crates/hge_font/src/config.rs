//! Configuration system

pub use serde::{Serialize, Deserialize};

use crate::render::{BlendMode, Color, TextureOptions};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(ConfigError::Io)?;

        // Try different formats
        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Load options and layout parameters for a font
///
/// Missing fields take the font defaults, so a settings file only needs the
/// values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSettings {
    /// Request mipmapped atlas textures
    pub mipmap: bool,
    /// Uniform scale
    pub scale: f32,
    /// Horizontal-only scale
    pub proportion: f32,
    /// Rotation in radians
    pub rotation: f32,
    /// Extra space between glyphs
    pub tracking: f32,
    /// Line spacing multiplier
    pub spacing: f32,
    /// ARGB glyph color
    pub color: Color,
    /// Glyph depth
    pub z: f32,
    /// Blend mode
    pub blend: BlendMode,
}

impl Default for FontSettings {
    fn default() -> Self {
        Self {
            mipmap: false,
            scale: 1.0,
            proportion: 1.0,
            rotation: 0.0,
            tracking: 0.0,
            spacing: 1.0,
            color: Color::WHITE,
            z: 0.5,
            blend: BlendMode::DEFAULT,
        }
    }
}

impl FontSettings {
    /// Texture options for loading the atlas
    pub const fn texture_options(&self) -> TextureOptions {
        TextureOptions { mipmap: self.mipmap }
    }
}

impl Config for FontSettings {}
