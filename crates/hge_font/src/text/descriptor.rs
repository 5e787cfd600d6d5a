//! `.fnt` descriptor tokenizer
//!
//! A descriptor is a header line followed by `key=value` lines:
//!
//! ```text
//! [HGEFONT]
//! Bitmap=font1.png
//! Char=A,2,2,10,20,0,1
//! Char=" ",14,2,4,20,0,0
//! ```
//!
//! Input is raw bytes, since character codes may come from 8-bit code pages.
//! Lines that cannot be used are skipped and logged; only a missing header
//! fails the whole descriptor.

use thiserror::Error;

use crate::render::SourceRect;

/// Required first line of every descriptor
pub const HEADER_TAG: &[u8] = b"[HGEFONT]";
/// Key of the atlas texture directive
pub const BITMAP_TAG: &[u8] = b"Bitmap";
/// Key of the glyph directive
pub const CHAR_TAG: &[u8] = b"Char";

/// Names of the numeric fields of a `Char=` line, in file order
const CHAR_FIELDS: [&str; 6] = ["x", "y", "width", "height", "pre", "post"];

/// A glyph definition read from a `Char=` line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharDef {
    /// Byte value the glyph is drawn for
    pub code: u8,
    /// Atlas rectangle
    pub rect: SourceRect,
    /// Space before the glyph
    pub pre: f32,
    /// Space after the glyph
    pub post: f32,
}

/// A usable descriptor line
#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    /// Bind the atlas texture at this path
    Bitmap(String),
    /// Define one glyph
    Char(CharDef),
}

/// Descriptor-level failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptorError {
    /// The first line is not [`HEADER_TAG`]
    #[error("missing [HGEFONT] header")]
    MissingHeader,
}

/// Why a single line was skipped
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LineError {
    /// Non-blank line without `=`
    #[error("no '=' separator")]
    NoSeparator,

    /// `=` with nothing on one side
    #[error("empty key or value")]
    Empty,

    /// Key this parser does not understand
    #[error("unknown key '{0}'")]
    UnknownKey(String),

    /// Character token is empty or names byte 0
    #[error("invalid character code '{0}'")]
    CharCode(String),

    /// Wrong number of numeric fields after the character
    #[error("expected 6 numeric fields, found {0}")]
    FieldCount(usize),

    /// Numeric field that is not a float
    #[error("field {field} is not a number: '{value}'")]
    Number {
        /// Field name
        field: &'static str,
        /// Offending text
        value: String,
    },

    /// Negative glyph width or height
    #[error("negative glyph size {width}x{height}")]
    NegativeSize {
        /// Parsed width
        width: f32,
        /// Parsed height
        height: f32,
    },
}

/// Split descriptor bytes into trimmed lines with 1-based line numbers
///
/// `\n`, `\r\n` and a lone `\r` each end a line. Empty lines are dropped,
/// so lines made only of spaces survive as empty strings.
pub fn split_lines(content: &[u8]) -> Vec<(usize, &[u8])> {
    let mut lines = Vec::new();
    let mut number = 1;
    let mut start = 0;
    let mut i = 0;
    while i < content.len() {
        let byte = content[i];
        if byte != b'\n' && byte != b'\r' {
            i += 1;
            continue;
        }

        if i > start {
            lines.push((number, content[start..i].trim_ascii()));
        }
        if byte == b'\r' && content.get(i + 1) == Some(&b'\n') {
            i += 1;
        }
        number += 1;
        i += 1;
        start = i;
    }
    if start < content.len() {
        lines.push((number, content[start..].trim_ascii()));
    }
    lines
}

/// Split a line into trimmed key and value
///
/// Blank lines yield `Ok(None)`.
pub fn tokenize_line(line: &[u8]) -> Result<Option<(&[u8], &[u8])>, LineError> {
    let line = line.trim_ascii();
    if line.is_empty() {
        return Ok(None);
    }

    let eq = line.iter().position(|&b| b == b'=').ok_or(LineError::NoSeparator)?;
    let key = line[..eq].trim_ascii();
    let value = line[eq + 1..].trim_ascii();
    if key.is_empty() || value.is_empty() {
        return Err(LineError::Empty);
    }
    Ok(Some((key, value)))
}

/// Parse the value of a `Char=` line
///
/// The character is the first byte of the first comma-separated token, or
/// the middle byte of a quoted token such as `","`. Exactly six float fields
/// must follow; any failure rejects the whole line.
pub fn parse_char(value: &[u8]) -> Result<CharDef, LineError> {
    let (code, rest) = split_char_token(value)?;

    let fields: Vec<&[u8]> = if rest.is_empty() {
        Vec::new()
    } else {
        rest.split(|&b| b == b',').collect()
    };
    if fields.len() != CHAR_FIELDS.len() {
        return Err(LineError::FieldCount(fields.len()));
    }

    let mut numbers = [0.0f32; 6];
    for ((slot, field), name) in numbers.iter_mut().zip(&fields).zip(CHAR_FIELDS) {
        *slot = parse_float(field, name)?;
    }
    let [x, y, width, height, pre, post] = numbers;

    if width < 0.0 || height < 0.0 {
        return Err(LineError::NegativeSize { width, height });
    }

    Ok(CharDef {
        code,
        rect: SourceRect::new(x, y, width, height),
        pre,
        post,
    })
}

/// Returns the character byte and everything after the separating comma
fn split_char_token(value: &[u8]) -> Result<(u8, &[u8]), LineError> {
    let invalid = || LineError::CharCode(String::from_utf8_lossy(value).into_owned());

    let (code, rest) = match value {
        [b'"', c, b'"', rest @ ..] => (*c, rest.trim_ascii_start()),
        _ => {
            let comma = value.iter().position(|&b| b == b',').unwrap_or(value.len());
            let token = value[..comma].trim_ascii();
            let code = *token.first().ok_or_else(invalid)?;
            (code, &value[comma..])
        }
    };
    if code == 0 {
        return Err(invalid());
    }

    match rest {
        [] => Ok((code, rest)),
        [b',', tail @ ..] => Ok((code, tail)),
        _ => Err(invalid()),
    }
}

fn parse_float(field: &[u8], name: &'static str) -> Result<f32, LineError> {
    let text = std::str::from_utf8(field.trim_ascii()).ok();
    text.and_then(|t| t.parse::<f32>().ok())
        .filter(|v| v.is_finite())
        .ok_or_else(|| LineError::Number {
            field: name,
            value: String::from_utf8_lossy(field).into_owned(),
        })
}

/// Tokenize a whole descriptor
///
/// Fails only when the header is missing. Unusable lines are logged at debug
/// level and left out of the result; `name` labels those messages.
pub fn parse_descriptor(name: &str, content: &[u8]) -> Result<Vec<Directive>, DescriptorError> {
    let lines = split_lines(content);
    match lines.first() {
        Some(&(_, first)) if first == HEADER_TAG => {}
        _ => return Err(DescriptorError::MissingHeader),
    }

    let mut directives = Vec::new();
    for &(number, line) in lines.iter().skip(1) {
        match parse_line(line) {
            Ok(Some(directive)) => directives.push(directive),
            Ok(None) => {}
            Err(LineError::UnknownKey(key)) => {
                log::trace!("{}: line {}: ignoring key '{}'", name, number, key);
            }
            Err(e) => {
                log::debug!(
                    "{}: line {}: skipped ({}): {}",
                    name,
                    number,
                    e,
                    String::from_utf8_lossy(line)
                );
            }
        }
    }
    Ok(directives)
}

fn parse_line(line: &[u8]) -> Result<Option<Directive>, LineError> {
    let Some((key, value)) = tokenize_line(line)? else {
        return Ok(None);
    };

    if key == BITMAP_TAG {
        Ok(Some(Directive::Bitmap(String::from_utf8_lossy(value).into_owned())))
    } else if key == CHAR_TAG {
        parse_char(value).map(|def| Some(Directive::Char(def)))
    } else {
        Err(LineError::UnknownKey(String::from_utf8_lossy(key).into_owned()))
    }
}
