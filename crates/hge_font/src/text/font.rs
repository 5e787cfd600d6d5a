//! Bitmap font loading and state

use std::path::Path;

use thiserror::Error;

use super::descriptor::{self, DescriptorError, Directive};
use super::glyph_table::{Glyph, GlyphTable};
use crate::assets::{AssetError, ResourceLoader};
use crate::config::FontSettings;
use crate::render::{BlendMode, Color, SpriteRenderer, TextureHandle, TextureOptions};

/// Errors that can occur while loading a font
#[derive(Debug, Error)]
pub enum FontError {
    /// Descriptor does not start with the `[HGEFONT]` header
    #[error("Font {name} has incorrect format")]
    Format {
        /// Descriptor name
        name: String,
    },

    /// Descriptor or bitmap could not be loaded
    #[error("Font {name}: failed to load resource: {source}")]
    Resource {
        /// Descriptor name
        name: String,
        /// Underlying loader error
        source: AssetError,
    },
}

/// A bitmap font: glyph table, atlas texture and layout parameters
///
/// Color, depth and blend mode are stored once here and applied to every
/// glyph at draw time.
#[derive(Debug, Clone)]
pub struct Font {
    pub(crate) name: String,
    pub(crate) texture: Option<TextureHandle>,
    pub(crate) glyphs: GlyphTable,
    pub(crate) height: f32,
    pub(crate) scale: f32,
    pub(crate) proportion: f32,
    pub(crate) rotation: f32,
    pub(crate) tracking: f32,
    pub(crate) spacing: f32,
    pub(crate) color: Color,
    pub(crate) z: f32,
    pub(crate) blend: BlendMode,
}

impl Font {
    /// Load a descriptor through `loader` and build the font
    ///
    /// `Bitmap=` paths are resolved relative to the descriptor's directory.
    pub fn load<L, R>(path: &str, loader: &L, renderer: &mut R, options: TextureOptions) -> Result<Self, FontError>
    where
        L: ResourceLoader + ?Sized,
        R: SpriteRenderer + ?Sized,
    {
        let bytes = loader.load(path).map_err(|source| {
            log::error!("Can't load font {}: {}", path, source);
            FontError::Resource { name: path.to_string(), source }
        })?;

        let base_dir = Path::new(path)
            .parent()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::build(path, &bytes, &base_dir, renderer, options)
    }

    /// Build a font from descriptor bytes already in memory
    ///
    /// `name` only labels diagnostics; `Bitmap=` paths are passed to the
    /// renderer unchanged.
    pub fn from_descriptor<R>(name: &str, bytes: &[u8], renderer: &mut R, options: TextureOptions) -> Result<Self, FontError>
    where
        R: SpriteRenderer + ?Sized,
    {
        Self::build(name, bytes, "", renderer, options)
    }

    fn build<R>(name: &str, bytes: &[u8], base_dir: &str, renderer: &mut R, options: TextureOptions) -> Result<Self, FontError>
    where
        R: SpriteRenderer + ?Sized,
    {
        let directives = descriptor::parse_descriptor(name, bytes).map_err(|DescriptorError::MissingHeader| {
            log::error!("Font {} has incorrect format.", name);
            FontError::Format { name: name.to_string() }
        })?;

        let mut font = Self::empty(name);
        for directive in directives {
            match directive {
                Directive::Bitmap(path) => {
                    let path = join_path(base_dir, &path);
                    let handle = renderer.load_texture(&path, options).map_err(|source| {
                        log::error!("Font {}: can't load bitmap {}: {}", name, path, source);
                        FontError::Resource { name: name.to_string(), source }
                    })?;
                    font.texture = Some(handle);
                }
                Directive::Char(def) => {
                    // Glyphs keep the texture current at the time they are read
                    let glyph = Glyph {
                        rect: def.rect,
                        pre: def.pre,
                        post: def.post,
                        texture: font.texture,
                    };
                    font.glyphs.insert(def.code, glyph);
                    font.height = font.height.max(def.rect.height);
                }
            }
        }

        log::info!(
            "Loaded font {}: {} glyphs, line height {}",
            name,
            font.glyphs.len(),
            font.height
        );
        Ok(font)
    }

    fn empty(name: &str) -> Self {
        Self {
            name: name.to_string(),
            texture: None,
            glyphs: GlyphTable::new(),
            height: 0.0,
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

    /// Apply every layout field of `settings`
    pub fn apply_settings(&mut self, settings: &FontSettings) {
        self.scale = settings.scale;
        self.proportion = settings.proportion;
        self.rotation = settings.rotation;
        self.tracking = settings.tracking;
        self.spacing = settings.spacing;
        self.color = settings.color;
        self.z = settings.z;
        self.blend = settings.blend;
    }

    /// Descriptor name the font was loaded from
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Last atlas texture bound by the descriptor
    pub fn texture(&self) -> Option<TextureHandle> {
        self.texture
    }

    /// All glyphs
    pub fn glyphs(&self) -> &GlyphTable {
        &self.glyphs
    }

    /// Glyph defined for exactly `chr`
    pub fn glyph(&self, chr: u8) -> Option<&Glyph> {
        self.glyphs.get(chr)
    }

    /// Space before `chr`, 0.0 when undefined
    pub fn pre_width(&self, chr: u8) -> f32 {
        self.glyphs.get(chr).map_or(0.0, |g| g.pre)
    }

    /// Space after `chr`, 0.0 when undefined
    pub fn post_width(&self, chr: u8) -> f32 {
        self.glyphs.get(chr).map_or(0.0, |g| g.post)
    }

    /// Line height: the tallest glyph in the descriptor
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Uniform scale
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Horizontal-only scale
    pub fn proportion(&self) -> f32 {
        self.proportion
    }

    /// Glyph rotation in radians
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Extra space between consecutive glyphs, before scaling
    pub fn tracking(&self) -> f32 {
        self.tracking
    }

    /// Line spacing multiplier
    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    /// Glyph color
    pub fn color(&self) -> Color {
        self.color
    }

    /// Glyph depth
    pub fn z(&self) -> f32 {
        self.z
    }

    /// Glyph blend mode
    pub fn blend_mode(&self) -> BlendMode {
        self.blend
    }

    /// Set the uniform scale
    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
    }

    /// Set the horizontal-only scale
    pub fn set_proportion(&mut self, proportion: f32) {
        self.proportion = proportion;
    }

    /// Set the glyph rotation in radians
    pub fn set_rotation(&mut self, rotation: f32) {
        self.rotation = rotation;
    }

    /// Set the extra space between consecutive glyphs
    pub fn set_tracking(&mut self, tracking: f32) {
        self.tracking = tracking;
    }

    /// Set the line spacing multiplier
    pub fn set_spacing(&mut self, spacing: f32) {
        self.spacing = spacing;
    }

    /// Color for every glyph drawn from now on
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Depth for every glyph drawn from now on
    pub fn set_z(&mut self, z: f32) {
        self.z = z;
    }

    /// Blend mode for every glyph drawn from now on
    pub fn set_blend_mode(&mut self, blend: BlendMode) {
        self.blend = blend;
    }
}

fn join_path(base_dir: &str, path: &str) -> String {
    if base_dir.is_empty() || Path::new(path).is_absolute() {
        path.to_string()
    } else {
        format!("{}/{}", base_dir.trim_end_matches(['/', '\\']), path)
    }
}
