//! Sprite rendering interface
//!
//! The font code issues one textured-quad draw per glyph through the
//! [`SpriteRenderer`] trait. Two backends ship with the crate:
//! [`RecordingRenderer`] captures draw calls for inspection and
//! [`SoftwareRenderer`] rasterizes them into an RGBA canvas.

pub mod recording;
pub mod software;

pub use recording::{RecordedTexture, RecordingRenderer};
pub use software::SoftwareRenderer;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::assets::AssetError;

bitflags! {
    /// Blend state for sprite drawing
    ///
    /// Each axis is a single bit; a cleared bit selects the other mode of
    /// that axis (color multiply, additive alpha, no depth write).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct BlendMode: u32 {
        /// Add vertex color to texel color instead of multiplying
        const COLOR_ADD = 1 << 0;
        /// Alpha blend instead of additive blending
        const ALPHA_BLEND = 1 << 1;
        /// Write depth
        const Z_WRITE = 1 << 2;
    }
}

impl BlendMode {
    /// Color multiply, alpha blend, no depth write
    pub const DEFAULT: Self = Self::ALPHA_BLEND;

    /// True when vertex color is added to texel color
    pub const fn is_color_add(self) -> bool {
        self.contains(Self::COLOR_ADD)
    }

    /// True when the source is alpha blended over the destination
    pub const fn is_alpha_blend(self) -> bool {
        self.contains(Self::ALPHA_BLEND)
    }

    /// True when the draw writes depth
    pub const fn writes_z(self) -> bool {
        self.contains(Self::Z_WRITE)
    }
}

impl Default for BlendMode {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// 32-bit ARGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub u32);

impl Color {
    /// Opaque white
    pub const WHITE: Self = Self(0xFFFF_FFFF);
    /// Opaque black
    pub const BLACK: Self = Self(0xFF00_0000);

    /// Build a color from separate channels
    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self(((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    /// Alpha channel
    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Red channel
    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// Green channel
    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Blue channel
    pub const fn blue(self) -> u8 {
        self.0 as u8
    }

    /// Channels in RGBA order
    pub const fn to_rgba(self) -> [u8; 4] {
        [self.red(), self.green(), self.blue(), self.alpha()]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Opaque reference to a texture owned by a renderer
///
/// The handle is only meaningful to the renderer that issued it. Dropping a
/// handle does not free the texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(slotmap::DefaultKey);

impl TextureHandle {
    /// Wrap a slot map key issued by a renderer's texture store
    pub const fn new(key: slotmap::DefaultKey) -> Self {
        Self(key)
    }

    /// Get the underlying key
    pub const fn key(self) -> slotmap::DefaultKey {
        self.0
    }
}

/// Options for texture loading
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextureOptions {
    /// Generate mipmaps for filtered sampling
    pub mipmap: bool,
}

/// Rectangle inside a texture atlas, in pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceRect {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl SourceRect {
    /// Create a new rectangle
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }
}

/// A single glyph quad draw request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphDraw {
    /// Atlas texture, `None` draws an untextured quad
    pub texture: Option<TextureHandle>,
    /// Region of the atlas to draw
    pub source: SourceRect,
    /// Destination of the quad's top-left corner
    pub x: f32,
    /// Destination of the quad's top-left corner
    pub y: f32,
    /// Rotation in radians around the top-left corner
    pub rotation: f32,
    /// Horizontal scale
    pub scale_x: f32,
    /// Vertical scale
    pub scale_y: f32,
    /// Vertex color
    pub color: Color,
    /// Depth, 0.0 is nearest
    pub z: f32,
    /// Blend state
    pub blend: BlendMode,
}

/// Backend capable of loading atlas textures and drawing glyph quads
pub trait SpriteRenderer {
    /// Load a texture and return a handle to it
    fn load_texture(&mut self, path: &str, options: TextureOptions) -> Result<TextureHandle, AssetError>;

    /// Draw one glyph quad
    fn draw_glyph(&mut self, draw: &GlyphDraw);
}

impl<T: SpriteRenderer + ?Sized> SpriteRenderer for &mut T {
    fn load_texture(&mut self, path: &str, options: TextureOptions) -> Result<TextureHandle, AssetError> {
        (**self).load_texture(path, options)
    }

    fn draw_glyph(&mut self, draw: &GlyphDraw) {
        (**self).draw_glyph(draw);
    }
}
