//! # HGE Font
//!
//! Bitmap font support for HGE-style `.fnt` descriptors: a texture atlas plus
//! a sidecar text file mapping byte-valued character codes to glyph
//! rectangles and per-glyph spacing.
//!
//! ## Features
//!
//! - **Descriptor Parsing**: Lenient line-oriented parser with header validation
//! - **Text Metrics**: Exact pixel widths for single and multi-line strings
//! - **Text Layout**: Left/center/right alignment, line spacing, tracking, scale
//! - **Boxed Text**: Word wrapping and vertical placement inside a rectangle
//! - **Pluggable Backends**: Bring your own resource loader and sprite renderer
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hge_font::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let loader = FileResourceLoader::new(vec!["assets".into()]);
//!     let mut renderer = SoftwareRenderer::new(640, 480, loader.clone());
//!
//!     let font = Font::load("font1.fnt", &loader, &mut renderer, TextureOptions::default())?;
//!     font.render(&mut renderer, 320.0, 20.0, Alignment::CENTER, "Hello, world!");
//!     renderer.save_png("hello.png")?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod assets;
pub mod render;
pub mod text;
pub mod config;

/// Common imports for library users
pub mod prelude {
    pub use crate::{
        assets::{AssetError, FileResourceLoader, MemoryResourceLoader, ResourceLoader},
        config::{Config, ConfigError, FontSettings},
        render::{
            BlendMode, Color, GlyphDraw, RecordingRenderer, SoftwareRenderer, SpriteRenderer,
            TextureHandle, TextureOptions,
        },
        text::{Alignment, Font, FontError, Glyph, GlyphRect, GlyphTable},
    };
}
