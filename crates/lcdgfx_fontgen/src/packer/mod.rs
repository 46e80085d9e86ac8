//! Font packers.
//!
//! Both formats start with a 4 byte header `[type, width, height, first char]`. Glyph groups
//! are announced by a 3 byte unicode record `[code >> 8, code & 0xFF, count]` and the image
//! ends with an all zero record.

mod free;
mod legacy;

pub use free::{jump_table, JumpEntry};

use crate::{FontError, FontSet, PackedFont, Result, MAX_CHAR_CODE, MAX_GROUP_SIZE};

/// Header type of the fixed size format without unicode records.
pub const TYPE_FIXED: u8 = 0x00;
/// Header type of the fixed size format followed by a single unicode record.
pub const TYPE_FIXED_UNICODE: u8 = 0x01;
/// Header type of the variable size format with jump tables.
pub const TYPE_FREE: u8 = 0x02;

/// Closes the list of unicode records.
pub const TERMINATOR: [u8; 3] = [0x00, 0x00, 0x00];

pub const HEADER_SIZE: usize = 4;
pub const UNICODE_RECORD_SIZE: usize = 3;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontFormat {
    /// Fixed size glyphs, a single group. Both the plain and the unicode variant are emitted,
    /// selected by `#ifdef CONFIG_SSD1306_UNICODE_ENABLE`.
    Legacy,

    /// Variable size glyphs with trailing empty rows removed, any number of groups each
    /// with its own jump table.
    #[default]
    Free,
}

impl FontFormat {
    pub fn pack(self, font: &FontSet) -> Result<PackedFont> {
        match self {
            Self::Legacy => legacy::pack(font),
            Self::Free => free::pack(font),
        }
    }

    /// Name of the generated C array.
    pub fn array_name(self, font: &FontSet) -> String {
        match self {
            Self::Legacy => font.array_name(),
            Self::Free => format!("free_{}", font.array_name()),
        }
    }
}

/// `[code_hi, code_lo, count]` record announcing a group.
pub fn unicode_record(first_char: u32, count: usize) -> Result<[u8; 3]> {
    if first_char > MAX_CHAR_CODE {
        return Err(FontError::CodeOutOfRange { code: first_char });
    }
    if count == 0 {
        return Err(FontError::EmptyFont);
    }
    if count > MAX_GROUP_SIZE {
        return Err(FontError::GroupTooLarge { count, max: MAX_GROUP_SIZE });
    }
    Ok([(first_char >> 8) as u8, (first_char & 0xFF) as u8, count as u8])
}

pub(crate) fn to_byte(field: &'static str, value: usize) -> Result<u8> {
    u8::try_from(value).map_err(|_| FontError::ByteOverflow { field, value })
}

/// Bytes written for a glyph must match the size announced for it.
pub(crate) fn check_glyph_size(code: u32, expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(FontError::GlyphSizeMismatch { code, expected, actual });
    }
    Ok(())
}

/// The accounted font size must match the bytes the image evaluates to.
pub(crate) fn check_image_size(image: &PackedFont, unicode: bool, expected: usize) -> Result<()> {
    let actual = image.to_bytes(unicode).len();
    if expected != actual {
        return Err(FontError::ImageSizeMismatch { expected, actual });
    }
    Ok(())
}
