mod common;

use common::{blank, filled, font, glyph};
use lcdgfx_fontgen::{
    packer::{jump_table, JumpEntry},
    FontError, FontFormat,
};
use pretty_assertions::assert_eq;

#[test]
fn test_single_filled_glyph() {
    let font = font("test", 8, vec![vec![filled(0x41, 5, 8)]]);
    let image = FontFormat::Free.pack(&font).unwrap();
    assert_eq!(image.name(), "free_test5x8");

    let bytes = image.to_bytes(true);
    assert_eq!(&bytes[0..4], &[0x02, 0x05, 0x08, 0x00]);
    // group header
    assert_eq!(&bytes[4..7], &[0x00, 0x41, 0x01]);
    // jump entry
    assert_eq!(&bytes[7..11], &[0x00, 0x00, 0x05, 0x08]);
    // total
    assert_eq!(&bytes[11..13], &[0x00, 0x05]);
    assert_eq!(&bytes[13..18], &[0xFF; 5]);
    assert_eq!(&bytes[18..], &[0x00, 0x00, 0x00]);
    assert_eq!(bytes.len(), 21);
    // no variants in the free format
    assert_eq!(image.to_bytes(false), bytes);
}

#[test]
fn test_source_text() {
    let font = font("test", 8, vec![vec![filled(0x41, 5, 8)]]);
    let image = FontFormat::Free.pack(&font).unwrap();
    assert_eq!(
        image.to_source(&[]),
        "extern const uint8_t free_test5x8[] PROGMEM;
const uint8_t free_test5x8[] PROGMEM =
{
//  type|width|height|first char
    0x02, 0x05, 0x08, 0x00,
// GROUP first 'A' total 1 chars
//  unicode(MSB,LSB)|count
    0x00, 0x41, 0x01, // unicode record
    0x00, 0x00, 0x05, 0x08, // char 'A' (0x0041/65)
    0x00, 0x05,
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, // char 'A' (0x0041/65)
    0x00, 0x00, 0x00, // end of unicode tables
    // FONT REQUIRES 21 BYTES
};
"
    );
}

#[test]
fn test_empty_glyph() {
    let font = font("test", 8, vec![vec![blank(0x20, 3, 8), glyph(0x21, &["#", "#", "#", ".", "#"])]]);
    let image = FontFormat::Free.pack(&font).unwrap();
    let bytes = image.to_bytes(true);
    // space: offset 0, width 3, height 0
    assert_eq!(&bytes[7..11], &[0x00, 0x00, 0x03, 0x00]);
    // '!' starts at the same offset
    assert_eq!(&bytes[11..15], &[0x00, 0x00, 0x01, 0x05]);
    assert_eq!(&bytes[15..17], &[0x00, 0x01]);
    assert_eq!(bytes[17], 0b1_0111);
    assert_eq!(bytes.len(), 4 + 3 + 8 + 2 + 1 + 3);
    assert!(image.to_source(&[]).contains("    // char ' ' (0x0020/32)\n"));
}

#[test]
fn test_trimmed_glyph_spans_two_bands() {
    let mut tall = blank(0x30, 2, 16);
    tall.set_pixel(0, 0, true);
    tall.set_pixel(1, 9, true);
    let font = font("test", 16, vec![vec![tall]]);
    let (entries, total) = jump_table(&font.groups()[0]).unwrap();
    assert_eq!(
        entries,
        vec![JumpEntry {
            offset: 0,
            width: 2,
            height: 10
        }]
    );
    assert_eq!(total, 4);

    let bytes = FontFormat::Free.pack(&font).unwrap().to_bytes(true);
    assert_eq!(&bytes[11..13], &[0x00, 0x04]);
    assert_eq!(&bytes[13..17], &[0x01, 0x00, 0x00, 0x02]);
}

#[test]
fn test_offsets_accumulate_per_group() {
    let first = vec![filled(0x41, 2, 8), filled(0x42, 3, 8), blank(0x43, 4, 8), filled(0x44, 1, 3)];
    let second = vec![filled(0x410, 4, 8), filled(0x411, 4, 8)];
    let font = font("test", 8, vec![second, first]);

    // groups are ordered by first character
    assert_eq!(font.groups()[0].first_char(), 0x41);
    let (entries, total) = jump_table(&font.groups()[0]).unwrap();
    assert_eq!(entries.iter().map(|e| e.offset).collect::<Vec<_>>(), vec![0, 2, 5, 5]);
    assert!(entries.windows(2).all(|pair| pair[0].offset <= pair[1].offset));
    assert_eq!(total, entries.iter().map(JumpEntry::size).sum::<usize>());
    assert_eq!(total, 6);

    let (entries, total) = jump_table(&font.groups()[1]).unwrap();
    assert_eq!(entries[0].offset, 0);
    assert_eq!(entries[1].offset, 4);
    assert_eq!(total, 8);

    let image = FontFormat::Free.pack(&font).unwrap();
    let bytes = image.to_bytes(true);
    let expected = 4 + (3 + 4 * 4 + 2 + 6) + (3 + 2 * 4 + 2 + 8) + 3;
    assert_eq!(bytes.len(), expected);
    assert!(image.to_source(&[]).contains(&format!("// FONT REQUIRES {expected} BYTES")));

    // second group header follows the first group's data
    let second_group = 4 + 3 + 4 * 4 + 2 + 6;
    assert_eq!(&bytes[second_group..second_group + 3], &[0x04, 0x10, 0x02]);
    assert!(image.to_source(&[]).contains("// GROUP first '\u{410}' total 2 chars"));
}

#[test]
fn test_full_group_is_legal() {
    let glyphs = (0x100..0x100 + 255).map(|code| filled(code, 1, 8)).collect();
    let font = font("test", 8, vec![glyphs]);
    let bytes = FontFormat::Free.pack(&font).unwrap().to_bytes(true);
    assert_eq!(&bytes[4..7], &[0x01, 0x00, 0xFF]);
    assert_eq!(bytes.len(), 4 + 3 + 255 * 4 + 2 + 255 + 3);
}

#[test]
fn test_group_data_limit() {
    let glyphs = (0x20..0x20 + 255).map(|code| filled(code, 255, 16)).collect();
    let font = font("test", 16, vec![glyphs]);
    assert!(matches!(
        FontFormat::Free.pack(&font),
        Err(FontError::GroupDataTooLarge { first: 0x20, size: 130_050 })
    ));
}

#[test]
fn test_width_must_fit_a_byte() {
    let font = font("test", 8, vec![vec![filled(0x41, 256, 8)]]);
    assert!(matches!(
        FontFormat::Free.pack(&font),
        Err(FontError::ByteOverflow { field: "width", value: 256 })
    ));
}

#[test]
fn test_demo_preamble() {
    let font = font("test", 2, vec![vec![glyph(0x41, &["#.#", ".#."])]]);
    let image = FontFormat::Free.pack(&font).unwrap();
    let source = image.to_source(&font.demo_lines("AA"));
    assert!(source.starts_with("// # # # #\n//  #   #\nextern const uint8_t free_test3x2[] PROGMEM;\n"));
}
