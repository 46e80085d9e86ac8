use super::{check_glyph_size, check_image_size, to_byte, unicode_record, FontFormat, HEADER_SIZE, TERMINATOR, TYPE_FIXED, TYPE_FIXED_UNICODE, UNICODE_RECORD_SIZE};
use crate::{glyph::packed_size, packed_font::Directive, FontError, FontSet, PackedFont, Result};

/// Fixed size format: every glyph is `ceil(height / 8) * width` bytes, narrower glyphs are
/// padded with empty columns on the right.
pub(super) fn pack(font: &FontSet) -> Result<PackedFont> {
    let [group] = font.groups() else {
        return Err(FontError::LegacyMultipleGroups { count: font.groups().len() });
    };
    let metrics = font.metrics();
    let width = to_byte("width", metrics.width)?;
    let height = to_byte("height", metrics.height)?;
    let record = unicode_record(group.first_char(), group.len())?;
    if metrics.first_char > 0xFF {
        log::warn!(
            "First character 0x{:04X} does not fit the header, only the low byte is written",
            metrics.first_char
        );
    }
    let first = (metrics.first_char & 0xFF) as u8;

    let mut image = PackedFont::new(FontFormat::Legacy.array_name(font));
    image.directive(Directive::IfUnicode);
    image.comment("//  type|width|height|first char");
    image.data(vec![TYPE_FIXED_UNICODE, width, height, first]);
    image.comment("//  unicode(2B)|count");
    image.data_with_note(record.to_vec(), "unicode record");
    image.directive(Directive::Else);
    image.comment("//  type|width|height|first char");
    image.data(vec![TYPE_FIXED, width, height, first]);
    image.directive(Directive::EndIf);

    let stride = packed_size(metrics.width, metrics.height);
    for glyph in group.glyphs() {
        let mut bytes = Vec::with_capacity(stride);
        let written = glyph.pack_into(metrics.width, metrics.height, &mut bytes);
        check_glyph_size(glyph.code, stride, written)?;
        image.data_with_note(bytes, glyph.label());
    }

    image.directive(Directive::IfUnicode);
    image.data_with_note(TERMINATOR.to_vec(), "end of unicode tables");
    image.directive(Directive::EndIf);

    let glyph_data = stride * group.len();
    check_image_size(&image, false, HEADER_SIZE + glyph_data)?;
    check_image_size(&image, true, HEADER_SIZE + UNICODE_RECORD_SIZE + glyph_data + TERMINATOR.len())?;
    log::debug!("Packed {} glyphs of {stride} bytes into '{}'", group.len(), image.name());
    Ok(image)
}
