//! Preview configuration
//!
//! ```toml
//! asset_root = "assets"
//! font = "font1.fnt"
//! width = 640
//! height = 240
//! output = "preview.png"
//!
//! [[items]]
//! x = 320.0
//! y = 20.0
//! align = "center"
//! text = "Hello, world!"
//!
//! [[items]]
//! x = 20.0
//! y = 80.0
//! align = "center-middle"
//! text = "A longer paragraph that gets wrapped inside its box."
//! bounds = { width = 300.0, height = 120.0 }
//! font = { scale = 0.75, tracking = 1.0 }
//! ```

use hge_font::config::{Config, FontSettings};
use hge_font::render::Color;
use hge_font::text::Alignment;
use serde::{Deserialize, Serialize};

/// Top-level preview settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Directory searched for the descriptor and its bitmap
    pub asset_root: String,
    /// Descriptor path, relative to `asset_root`
    pub font: String,
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// ARGB background
    pub background: Color,
    /// PNG written after rendering
    pub output: String,
    /// Settings applied to the font before any item is drawn
    pub defaults: FontSettings,
    /// Text to draw
    pub items: Vec<TextItem>,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            asset_root: ".".to_string(),
            font: "font1.fnt".to_string(),
            width: 640,
            height: 480,
            background: Color::BLACK,
            output: "preview.png".to_string(),
            defaults: FontSettings::default(),
            items: Vec::new(),
        }
    }
}

impl Config for PreviewConfig {}

/// One string to draw
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextItem {
    /// Anchor x
    pub x: f32,
    /// Anchor y
    pub y: f32,
    /// Alignment name, see [`parse_alignment`]
    #[serde(default)]
    pub align: String,
    /// Text to draw
    pub text: String,
    /// Wrap and align inside this box instead of at a point
    #[serde(default)]
    pub bounds: Option<Bounds>,
    /// Per-item font settings
    #[serde(default)]
    pub font: Option<FontSettings>,
}

/// Box size for wrapped text
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Bounds {
    /// Box width
    pub width: f32,
    /// Box height
    pub height: f32,
}

/// Parse names such as `left`, `right-bottom` or `center-middle`
///
/// Unknown words are ignored with a warning.
pub fn parse_alignment(name: &str) -> Alignment {
    name.split(['-', '|', ' '])
        .filter(|word| !word.is_empty())
        .fold(Alignment::default(), |align, word| match word.to_ascii_lowercase().as_str() {
            "left" | "top" => align,
            "right" => align | Alignment::RIGHT,
            "center" => align | Alignment::CENTER,
            "bottom" => align | Alignment::BOTTOM,
            "middle" => align | Alignment::MIDDLE,
            other => {
                log::warn!("Unknown alignment '{}' ignored", other);
                align
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use hge_font::text::{HorizontalAlign, VerticalAlign};

    #[test]
    fn test_parse_alignment_names() {
        assert_eq!(parse_alignment(""), Alignment::LEFT);
        let align = parse_alignment("Right-Bottom");
        assert_eq!(align.horizontal(), HorizontalAlign::Right);
        assert_eq!(align.vertical(), VerticalAlign::Bottom);
        assert_eq!(parse_alignment("center middle").bits(), (Alignment::CENTER | Alignment::MIDDLE).bits());
        assert_eq!(parse_alignment("sideways"), Alignment::LEFT);
    }

    #[test]
    fn test_items_from_toml() {
        assert!(PreviewConfig::load_from_file("does-not-exist.toml").is_err());

        let parsed: PreviewConfig = toml_from_str(
            "font = \"f.fnt\"\n[[items]]\nx = 1.0\ny = 2.0\ntext = \"hi\"\nbounds = { width = 10.0, height = 5.0 }\n",
        );
        assert_eq!(parsed.font, "f.fnt");
        assert_eq!(parsed.width, 640);
        assert_eq!(parsed.items.len(), 1);
        assert_eq!(parsed.items[0].bounds.unwrap().width, 10.0);
        assert!(parsed.items[0].font.is_none());
    }

    fn toml_from_str(text: &str) -> PreviewConfig {
        let path = std::env::temp_dir().join(format!("font_preview_{}.toml", std::process::id()));
        std::fs::write(&path, text).unwrap();
        let config = PreviewConfig::load_from_file(path.to_str().unwrap()).unwrap();
        std::fs::remove_file(&path).unwrap();
        config
    }
}
