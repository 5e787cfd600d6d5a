//! String width measurement

use super::font::Font;

/// Bytes that end a line when measuring
pub(crate) const fn is_line_break(byte: u8) -> bool {
    byte == b'\n' || byte == b'\r'
}

impl Font {
    /// Unscaled advance of one byte: its glyph, the `'?'` glyph, or nothing
    pub(crate) fn raw_advance(&self, byte: u8) -> f32 {
        self.glyphs.resolve(byte).map_or(0.0, |g| g.advance(self.tracking))
    }

    /// Width in pixels of `text` under the current scale, proportion and tracking
    ///
    /// With `multiline` the widest line wins; without it only the first line
    /// (up to the first `\n` or `\r`) is measured.
    pub fn string_width(&self, text: impl AsRef<[u8]>, multiline: bool) -> f32 {
        let bytes = text.as_ref();
        let factor = self.scale * self.proportion;

        let mut widest = 0.0f32;
        let mut i = 0;
        while i < bytes.len() {
            let mut line = 0.0f32;
            while i < bytes.len() && !is_line_break(bytes[i]) {
                line += self.raw_advance(bytes[i]);
                i += 1;
            }

            if !multiline {
                return line * factor;
            }
            widest = widest.max(line);

            while i < bytes.len() && is_line_break(bytes[i]) {
                i += 1;
            }
        }

        widest * factor
    }
}
