//! Text layout and drawing
//!
//! Walks a byte string left to right, issuing one sprite draw per glyph.
//! Horizontal alignment is decided per line from measured widths before any
//! glyph of that line is drawn.

use std::fmt;
use std::ops::BitOr;

use super::font::Font;
use super::glyph_table::Glyph;
use crate::render::{GlyphDraw, SpriteRenderer};

/// Packed horizontal and vertical alignment
///
/// The low two bits select the horizontal mode, the next two the vertical
/// mode. Combine one of each with `|`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Alignment(u32);

impl Alignment {
    /// Text starts at `x`
    pub const LEFT: Self = Self(0);
    /// Text ends at `x`
    pub const RIGHT: Self = Self(1);
    /// Text is centered on `x`
    pub const CENTER: Self = Self(2);
    /// Horizontal bits
    pub const HORIZONTAL_MASK: u32 = 0x03;

    /// Block starts at `y`
    pub const TOP: Self = Self(0);
    /// Block ends at the bottom of the box
    pub const BOTTOM: Self = Self(4);
    /// Block is centered in the box
    pub const MIDDLE: Self = Self(8);
    /// Vertical bits
    pub const VERTICAL_MASK: u32 = 0x0C;

    /// Build from raw bits, dropping anything outside both masks
    pub const fn from_bits_truncate(bits: u32) -> Self {
        Self(bits & (Self::HORIZONTAL_MASK | Self::VERTICAL_MASK))
    }

    /// Raw bits
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Horizontal mode; the unused value 3 behaves as left
    pub const fn horizontal(self) -> HorizontalAlign {
        match self.0 & Self::HORIZONTAL_MASK {
            1 => HorizontalAlign::Right,
            2 => HorizontalAlign::Center,
            _ => HorizontalAlign::Left,
        }
    }

    /// Vertical mode; the unused value 12 behaves as top
    pub const fn vertical(self) -> VerticalAlign {
        match self.0 & Self::VERTICAL_MASK {
            4 => VerticalAlign::Bottom,
            8 => VerticalAlign::Middle,
            _ => VerticalAlign::Top,
        }
    }
}

impl BitOr for Alignment {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Horizontal alignment mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalAlign {
    /// Start at the anchor
    Left,
    /// End at the anchor
    Right,
    /// Centered on the anchor
    Center,
}

/// Vertical alignment mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalAlign {
    /// Top of the box
    Top,
    /// Bottom of the box
    Bottom,
    /// Middle of the box
    Middle,
}

impl Font {
    /// Draw `text` with its first line anchored at (`x`, `y`)
    ///
    /// Only the horizontal part of `align` is used. Each `\n` moves down by
    /// `height * scale * spacing` and re-aligns against the next line's width.
    /// Bytes with neither a glyph nor a `'?'` fallback are skipped.
    pub fn render<R>(&self, renderer: &mut R, x: f32, y: f32, align: Alignment, text: impl AsRef<[u8]>)
    where
        R: SpriteRenderer + ?Sized,
    {
        let bytes = text.as_ref();
        let horizontal = align.horizontal();
        let factor = self.scale * self.proportion;

        let mut cy = y;
        let mut cx = self.line_start(x, horizontal, bytes);

        for (j, &byte) in bytes.iter().enumerate() {
            if byte == b'\n' {
                cy += self.height * self.scale * self.spacing;
                cx = self.line_start(x, horizontal, &bytes[j + 1..]);
                continue;
            }

            let Some(glyph) = self.glyphs.resolve(byte) else {
                continue;
            };
            cx += glyph.pre * factor;
            renderer.draw_glyph(&self.glyph_draw(glyph, cx, cy));
            cx += (glyph.rect.width + glyph.post + self.tracking) * factor;
        }
    }

    /// Format and draw, like [`render`](Self::render)
    ///
    /// ```rust,ignore
    /// font.print(&mut renderer, 5.0, 5.0, Alignment::LEFT, format_args!("FPS: {}", fps));
    /// ```
    pub fn print<R>(&self, renderer: &mut R, x: f32, y: f32, align: Alignment, args: fmt::Arguments<'_>)
    where
        R: SpriteRenderer + ?Sized,
    {
        self.render(renderer, x, y, align, fmt::format(args));
    }

    /// Word-wrap `text` to `width` and draw it aligned inside a box
    ///
    /// Horizontal alignment anchors on the box's left edge, right edge or
    /// center; vertical alignment places the whole block at the top, bottom
    /// or middle of the box.
    pub fn render_in_box<R>(
        &self,
        renderer: &mut R,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        align: Alignment,
        text: impl AsRef<[u8]>,
    ) where
        R: SpriteRenderer + ?Sized,
    {
        let wrapped = self.wrap_text(text, width);
        let lines = wrapped.iter().filter(|&&b| b == b'\n').count() + 1;
        let block_height = lines as f32 * self.height * self.scale * self.spacing;

        let tx = match align.horizontal() {
            HorizontalAlign::Left => x,
            HorizontalAlign::Right => x + width,
            HorizontalAlign::Center => x + width / 2.0,
        };
        let ty = match align.vertical() {
            VerticalAlign::Top => y,
            VerticalAlign::Bottom => y + height - block_height,
            VerticalAlign::Middle => y + (height - block_height) / 2.0,
        };

        self.render(renderer, tx, ty, align, &wrapped);
    }

    /// Format and draw inside a box, like [`render_in_box`](Self::render_in_box)
    pub fn print_in_box<R>(
        &self,
        renderer: &mut R,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        align: Alignment,
        args: fmt::Arguments<'_>,
    ) where
        R: SpriteRenderer + ?Sized,
    {
        self.render_in_box(renderer, x, y, width, height, align, fmt::format(args));
    }

    /// Break `text` into lines no wider than `width` where possible
    ///
    /// When a line overflows, the last space on it becomes a `\n`. Existing
    /// line breaks are kept and a single word wider than `width` stays whole.
    pub fn wrap_text(&self, text: impl AsRef<[u8]>, width: f32) -> Vec<u8> {
        let mut out = text.as_ref().to_vec();
        let factor = self.scale * self.proportion;

        let mut last_space: Option<usize> = None;
        let mut line_width = 0.0f32;
        for i in 0..out.len() {
            match out[i] {
                b'\n' => {
                    last_space = None;
                    line_width = 0.0;
                    continue;
                }
                b' ' => last_space = Some(i),
                _ => {}
            }

            line_width += self.raw_advance(out[i]) * factor;
            if line_width > width {
                if let Some(space) = last_space.take() {
                    out[space] = b'\n';
                    line_width = out[space + 1..=i].iter().map(|&b| self.raw_advance(b) * factor).sum();
                }
            }
        }
        out
    }

    fn line_start(&self, x: f32, horizontal: HorizontalAlign, rest: &[u8]) -> f32 {
        match horizontal {
            HorizontalAlign::Left => x,
            HorizontalAlign::Right => x - self.string_width(rest, false),
            HorizontalAlign::Center => x - self.string_width(rest, false) / 2.0,
        }
    }

    fn glyph_draw(&self, glyph: &Glyph, x: f32, y: f32) -> GlyphDraw {
        GlyphDraw {
            texture: glyph.texture,
            source: glyph.rect,
            x,
            y,
            rotation: self.rotation,
            scale_x: self.scale * self.proportion,
            scale_y: self.scale,
            color: self.color,
            z: self.z,
            blend: self.blend,
        }
    }
}
