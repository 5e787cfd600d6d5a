//! Bitmap font text system
//!
//! Descriptor parsing, glyph storage, width measurement and layout.

pub mod glyph_table;
pub mod descriptor;
pub mod font;
pub mod metrics;
pub mod layout;

pub use glyph_table::{Glyph, GlyphTable, FALLBACK_CHAR};
pub use descriptor::{CharDef, DescriptorError, Directive, LineError};
pub use font::{Font, FontError};
pub use layout::{Alignment, HorizontalAlign, VerticalAlign};

/// Atlas rectangle of a glyph
pub type GlyphRect = crate::render::SourceRect;

#[cfg(test)]
mod tests;
