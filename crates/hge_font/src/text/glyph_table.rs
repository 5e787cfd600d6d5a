//! Glyph storage keyed by byte value

use crate::render::{SourceRect, TextureHandle};

/// Character drawn in place of bytes that have no glyph
pub const FALLBACK_CHAR: u8 = b'?';

/// One character's atlas region and spacing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glyph {
    /// Region of the atlas texture holding the glyph
    pub rect: SourceRect,
    /// Horizontal space added before the glyph is drawn
    pub pre: f32,
    /// Horizontal space added after the glyph's width
    pub post: f32,
    /// Texture the font held when this glyph was defined
    pub texture: Option<TextureHandle>,
}

impl Glyph {
    /// Unscaled horizontal advance of this glyph plus `tracking`
    pub fn advance(&self, tracking: f32) -> f32 {
        self.rect.width + self.pre + self.post + tracking
    }
}

/// Fixed 256-slot glyph table
///
/// Slot 0 never holds a glyph; byte 0 is a terminator in the descriptor
/// format.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphTable {
    slots: [Option<Glyph>; 256],
}

impl Default for GlyphTable {
    fn default() -> Self {
        Self { slots: [None; 256] }
    }
}

impl GlyphTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a glyph, replacing any previous one for `code`
    ///
    /// Returns `false` (and stores nothing) for byte 0.
    pub fn insert(&mut self, code: u8, glyph: Glyph) -> bool {
        if code == 0 {
            return false;
        }
        self.slots[usize::from(code)] = Some(glyph);
        true
    }

    /// Glyph stored for exactly `code`
    pub fn get(&self, code: u8) -> Option<&Glyph> {
        self.slots[usize::from(code)].as_ref()
    }

    /// Glyph used to draw `code`: its own, else the `'?'` glyph, else none
    pub fn resolve(&self, code: u8) -> Option<&Glyph> {
        self.get(code).or_else(|| self.get(FALLBACK_CHAR))
    }

    /// Populated slots in ascending byte order
    pub fn iter(&self) -> impl Iterator<Item = (u8, &Glyph)> + '_ {
        (0..=u8::MAX).filter_map(move |code| self.get(code).map(|g| (code, g)))
    }

    /// Number of populated slots
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// True when no slot is populated
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glyph(width: f32, height: f32) -> Glyph {
        Glyph {
            rect: SourceRect::new(0.0, 0.0, width, height),
            pre: 0.0,
            post: 0.0,
            texture: None,
        }
    }

    #[test]
    fn test_slot_zero_is_never_populated() {
        let mut table = GlyphTable::new();
        assert!(!table.insert(0, glyph(4.0, 4.0)));
        assert!(table.get(0).is_none());
        assert!(table.is_empty());
    }

    #[test]
    fn test_fallback_to_question_mark() {
        let mut table = GlyphTable::new();
        table.insert(b'A', glyph(10.0, 20.0));
        assert!(table.resolve(b'B').is_none());

        table.insert(b'?', glyph(7.0, 20.0));
        assert_eq!(table.resolve(b'A').unwrap().rect.width, 10.0);
        assert_eq!(table.resolve(b'B').unwrap().rect.width, 7.0);
        assert_eq!(table.resolve(0xE9).unwrap().rect.width, 7.0);
    }

    #[test]
    fn test_zero_sized_glyph_is_present() {
        let mut table = GlyphTable::new();
        table.insert(b' ', glyph(0.0, 0.0));
        assert!(table.get(b' ').is_some());
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_iteration_order() {
        let mut table = GlyphTable::new();
        table.insert(0xFF, glyph(1.0, 12.0));
        table.insert(b'a', glyph(1.0, 30.0));
        table.insert(b'!', glyph(1.0, 5.0));

        let codes: Vec<u8> = table.iter().map(|(c, _)| c).collect();
        assert_eq!(codes, vec![b'!', b'a', 0xFF]);

        table.insert(b'a', glyph(2.0, 8.0));
        assert_eq!(table.len(), 3);
        assert_eq!(table.get(b'a').unwrap().rect.width, 2.0);
    }

    #[test]
    fn test_advance_sums_spacing() {
        let g = Glyph {
            rect: SourceRect::new(0.0, 0.0, 10.0, 20.0),
            pre: 1.0,
            post: 2.0,
            texture: None,
        };
        assert_eq!(g.advance(0.5), 13.5);
    }
}
