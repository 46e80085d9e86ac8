use super::{check_glyph_size, check_image_size, to_byte, unicode_record, FontFormat, HEADER_SIZE, TERMINATOR, TYPE_FREE, UNICODE_RECORD_SIZE};
use crate::{font_set::GlyphGroup, glyph::packed_size, printable_char, FontError, FontSet, PackedFont, Result};

/// Size of a jump table entry.
pub const JUMP_ENTRY_SIZE: usize = 4;
/// Size of the data total following a jump table.
pub const GROUP_TOTAL_SIZE: usize = 2;

/// Locates one glyph inside the data block of its group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JumpEntry {
    /// Byte offset from the start of the group's glyph data
    pub offset: usize,
    pub width: usize,
    /// Height without trailing empty rows
    pub height: usize,
}

impl JumpEntry {
    /// Bytes of glyph data the entry points to.
    pub fn size(&self) -> usize {
        packed_size(self.width, self.height)
    }

    /// `[offset_hi, offset_lo, width, height]`
    pub fn to_bytes(&self) -> Result<[u8; 4]> {
        let offset = u16::try_from(self.offset).map_err(|_| FontError::ByteOverflow {
            field: "jump table offset",
            value: self.offset,
        })?;
        let [hi, lo] = offset.to_be_bytes();
        Ok([hi, lo, to_byte("width", self.width)?, to_byte("height", self.height)?])
    }
}

/// Jump table of `group` and the total size of its glyph data.
pub fn jump_table(group: &GlyphGroup) -> Result<(Vec<JumpEntry>, usize)> {
    let mut offset = 0;
    let mut entries = Vec::with_capacity(group.len());
    for glyph in group.glyphs() {
        let entry = JumpEntry {
            offset,
            width: glyph.width(),
            height: glyph.trimmed_height(),
        };
        offset += entry.size();
        entries.push(entry);
    }
    if offset > usize::from(u16::MAX) {
        return Err(FontError::GroupDataTooLarge {
            first: group.first_char(),
            size: offset,
        });
    }
    Ok((entries, offset))
}

/// Variable size format with one jump table per group.
pub(super) fn pack(font: &FontSet) -> Result<PackedFont> {
    let metrics = font.metrics();
    let mut image = PackedFont::new(FontFormat::Free.array_name(font));
    image.comment("//  type|width|height|first char");
    image.data(vec![TYPE_FREE, to_byte("width", metrics.width)?, to_byte("height", metrics.height)?, 0x00]);
    let mut total_size = HEADER_SIZE;

    for group in font.groups() {
        image.comment(format!(
            "// GROUP first '{}' total {} chars",
            printable_char(group.first_char()),
            group.len()
        ));
        image.comment("//  unicode(MSB,LSB)|count");
        image.data_with_note(unicode_record(group.first_char(), group.len())?.to_vec(), "unicode record");
        total_size += UNICODE_RECORD_SIZE;

        let (entries, data_size) = jump_table(group)?;
        for (glyph, entry) in group.glyphs().iter().zip(&entries) {
            image.data_with_note(entry.to_bytes()?.to_vec(), glyph.label());
        }
        total_size += entries.len() * JUMP_ENTRY_SIZE;

        image.data((data_size as u16).to_be_bytes().to_vec());
        total_size += GROUP_TOTAL_SIZE;

        for (glyph, entry) in group.glyphs().iter().zip(&entries) {
            let mut bytes = Vec::with_capacity(entry.size());
            let written = glyph.pack_into(entry.width, entry.height, &mut bytes);
            check_glyph_size(glyph.code, entry.size(), written)?;
            total_size += written;
            image.data_with_note(bytes, glyph.label());
        }
    }

    image.data_with_note(TERMINATOR.to_vec(), "end of unicode tables");
    total_size += TERMINATOR.len();
    image.comment(format!("    // FONT REQUIRES {total_size} BYTES"));

    check_image_size(&image, true, total_size)?;
    log::debug!("Packed {} glyphs in {} groups into '{}', {total_size} bytes", font.glyph_count(), font.groups().len(), image.name());
    Ok(image)
}
