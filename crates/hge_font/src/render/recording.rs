//! Recording renderer
//!
//! Captures texture loads and glyph draws instead of rasterizing them.
//! Handy for layout tests and for hosts that batch draws themselves.

use std::collections::HashSet;

use slotmap::{DefaultKey, SlotMap};

use super::{GlyphDraw, SpriteRenderer, TextureHandle, TextureOptions};
use crate::assets::AssetError;

/// Texture load request seen by a [`RecordingRenderer`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedTexture {
    /// Path passed to `load_texture`
    pub path: String,
    /// Options passed to `load_texture`
    pub options: TextureOptions,
}

/// Renderer that records every call
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    textures: SlotMap<DefaultKey, RecordedTexture>,
    draws: Vec<GlyphDraw>,
    missing: HashSet<String>,
}

impl RecordingRenderer {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Make future loads of `path` fail with [`AssetError::NotFound`]
    pub fn fail_texture(&mut self, path: impl Into<String>) {
        self.missing.insert(path.into());
    }

    /// Draw calls in issue order
    pub fn draws(&self) -> &[GlyphDraw] {
        &self.draws
    }

    /// Forget recorded draws, keeping textures
    pub fn clear_draws(&mut self) {
        self.draws.clear();
    }

    /// Texture request behind a handle
    pub fn texture(&self, handle: TextureHandle) -> Option<&RecordedTexture> {
        self.textures.get(handle.key())
    }

    /// Number of textures loaded so far
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }
}

impl SpriteRenderer for RecordingRenderer {
    fn load_texture(&mut self, path: &str, options: TextureOptions) -> Result<TextureHandle, AssetError> {
        if self.missing.contains(path) {
            return Err(AssetError::NotFound(path.to_string()));
        }

        let key = self.textures.insert(RecordedTexture {
            path: path.to_string(),
            options,
        });
        Ok(TextureHandle::new(key))
    }

    fn draw_glyph(&mut self, draw: &GlyphDraw) {
        self.draws.push(*draw);
    }
}
