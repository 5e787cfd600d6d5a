//! End-to-end behaviour of small fonts through parse, measure and render

use crate::assets::MemoryResourceLoader;
use crate::render::{RecordingRenderer, SourceRect, TextureOptions};
use crate::text::{Alignment, Font, FontError};
use approx::assert_relative_eq;

fn parse(descriptor: &[u8]) -> Result<Font, FontError> {
    let mut renderer = RecordingRenderer::new();
    Font::from_descriptor("scenario.fnt", descriptor, &mut renderer, TextureOptions::default())
}

#[test]
fn test_descriptor_without_bitmap() {
    let font = parse(b"[HGEFONT]\nChar=A,0,0,10,20,1,1\n").unwrap();

    assert!(font.texture().is_none());
    let glyph = font.glyph(b'A').unwrap();
    assert_eq!(glyph.rect, SourceRect::new(0.0, 0.0, 10.0, 20.0));
    assert_eq!((glyph.pre, glyph.post), (1.0, 1.0));
    assert!(glyph.texture.is_none());
}

#[test]
fn test_wrong_header_is_format_error() {
    let err = parse(b"NOTHGEFONT\nChar=A,0,0,10,20,1,1\n").unwrap_err();
    assert!(matches!(err, FontError::Format { ref name } if name == "scenario.fnt"));

    assert!(matches!(parse(b"").unwrap_err(), FontError::Format { .. }));
    assert!(matches!(parse(b"[HGEFONT2]\n").unwrap_err(), FontError::Format { .. }));
}

#[test]
fn test_multiline_width_is_widest_line() {
    let font = parse(b"[HGEFONT]\nChar=A,0,0,10,20,0,0\nChar=B,10,0,10,20,0,0\n").unwrap();
    assert_relative_eq!(font.string_width("AB\nA", true), 20.0);
    assert_relative_eq!(font.string_width("A\nAB", true), 20.0);
    assert_relative_eq!(font.string_width("A\nAB", false), 10.0);
}

#[test]
fn test_unmapped_line_without_fallback_draws_nothing() {
    let font = parse(b"[HGEFONT]\nChar=A,0,0,10,20,0,0\n").unwrap();
    let mut renderer = RecordingRenderer::new();
    font.render(&mut renderer, 0.0, 0.0, Alignment::LEFT, "A\n?");

    let draws = renderer.draws();
    assert_eq!(draws.len(), 1);
    assert_eq!(draws[0].source, SourceRect::new(0.0, 0.0, 10.0, 20.0));

    // The newline still advanced by one line even though nothing followed it
    font.render(&mut renderer, 0.0, 0.0, Alignment::LEFT, "\nA");
    assert_relative_eq!(renderer.draws()[1].y, 20.0);
}

#[test]
fn test_scale_doubles_width() {
    let mut font = parse(b"[HGEFONT]\nChar=A,0,0,10,20,1,2\nChar=?,0,0,7,20,0,0\n").unwrap();
    let samples = ["", "A", "AAZ", "A\nAAA\n\nA", "??\r\nA"];
    let base: Vec<f32> = samples.iter().map(|s| font.string_width(s, true)).collect();

    font.set_scale(2.0);
    for (s, w) in samples.iter().zip(base) {
        assert_relative_eq!(font.string_width(s, true), 2.0 * w);
    }
}

#[test]
fn test_malformed_lines_are_skipped() {
    let font = parse(
        b"[HGEFONT]\n\
          Char=A,0,0,10,20,0,0\n\
          Char=B,0,0,ten,20,0,0\n\
          Char=C,0,0,10\n\
          just some words\n\
          Color=FFFFFFFF\n\
          Char=D,0,0,10,30,0,0\n",
    )
    .unwrap();

    assert!(font.glyph(b'A').is_some());
    assert!(font.glyph(b'B').is_none());
    assert!(font.glyph(b'C').is_none());
    assert!(font.glyph(b'D').is_some());
    assert_eq!(font.height(), 30.0);
}

#[test]
fn test_extended_character_codes() {
    let mut descriptor = b"[HGEFONT]\nChar=".to_vec();
    descriptor.push(0xC4);
    descriptor.extend_from_slice(b",0,0,12,20,0,0\n");
    let font = parse(&descriptor).unwrap();

    assert_eq!(font.glyph(0xC4).unwrap().rect.width, 12.0);
    assert_relative_eq!(font.string_width([0xC4u8, 0xC4], true), 24.0);
}

#[test]
fn test_load_through_resource_loader() {
    let loader = MemoryResourceLoader::new()
        .with("fonts/font1.fnt", "[HGEFONT]\r\nBitmap=font1.png\r\nChar=A,0,0,10,20,0,0\r\n");
    let mut renderer = RecordingRenderer::new();
    let font = Font::load("fonts/font1.fnt", &loader, &mut renderer, TextureOptions { mipmap: true }).unwrap();

    font.render(&mut renderer, 1.0, 2.0, Alignment::LEFT, "A");
    let draw = renderer.draws()[0];
    assert_eq!(draw.texture, font.texture());
    let texture = renderer.texture(draw.texture.unwrap()).unwrap();
    assert_eq!(texture.path, "fonts/font1.png");
    assert!(texture.options.mipmap);
}
