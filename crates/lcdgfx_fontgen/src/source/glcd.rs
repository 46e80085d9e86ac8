//! Reader for the C source written by the MikroElektronika GLCD Font Creator.
//!
//! ```text
//! //GLCD FontName : Lucida_Console8x12
//! //GLCD FontSize : 8 x 12
//!
//! const unsigned short Lucida_Console8x12[] = {
//!         0x03, 0x00, 0x00, 0xFC, 0x01, 0x00, 0x00, ...  // Code for char !
//! ```
//! Every glyph line starts with the glyph width followed by `ceil(height / 8)` bytes per
//! column, the low band first.

use std::{collections::BTreeMap, fs, path::Path};

use regex::Regex;

use super::GlyphSource;
use crate::{glyph::BAND_HEIGHT, CharRange, FontError, Glyph, Result};

lazy_static::lazy_static! {
    static ref FONT_NAME: Regex = Regex::new(r"^\s*//\s*GLCD\s+FontName\s*:\s*(\S+)").unwrap();
    static ref FONT_SIZE: Regex = Regex::new(r"^\s*//\s*GLCD\s+FontSize\s*:\s*(\d+)\s*x\s*(\d+)").unwrap();
    static ref CODE_FOR_CHAR: Regex = Regex::new(r"^(.*?)//\s*Code for char ?(.*)$").unwrap();
    static ref CHAR_NUM: Regex = Regex::new(r"^num\s+(\d+)\s*$").unwrap();
    static ref SIZE_SUFFIX: Regex = Regex::new(r"^(.*?)_?\d+x\d+$").unwrap();
}

/// First code used when the comments do not name the characters.
const DEFAULT_FIRST_CHAR: u32 = 0x20;

#[derive(Debug, Clone)]
pub struct GlcdSource {
    name: String,
    width: usize,
    height: usize,
    glyphs: BTreeMap<u32, Glyph>,
}

impl GlcdSource {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| FontError::read_file(path, e))?;
        let stem = path.file_stem().map_or_else(|| "font".to_string(), |s| s.to_string_lossy().into_owned());
        Self::parse(&text, &stem)
    }

    /// Parses the font creator output. `fallback_name` is used when the text has no `FontName` header.
    pub fn parse(text: &str, fallback_name: &str) -> Result<Self> {
        let mut name = None;
        let mut size = None;
        let mut glyphs = BTreeMap::new();
        let mut next_code = None;

        for (i, line) in text.lines().enumerate() {
            let line_no = i + 1;
            if let Some(caps) = FONT_NAME.captures(line) {
                name = Some(caps[1].to_string());
                continue;
            }
            if let Some(caps) = FONT_SIZE.captures(line) {
                let width = parse_dimension(&caps[1], line_no)?;
                let height = parse_dimension(&caps[2], line_no)?;
                size = Some((width, height));
                continue;
            }
            let Some(caps) = CODE_FOR_CHAR.captures(line) else {
                continue;
            };
            let Some((width, height)) = size else {
                return Err(FontError::glcd(line_no, "glyph data before the '//GLCD FontSize' header"));
            };

            let code = match char_code(&caps[2], line_no)? {
                Some(code) => code,
                None => next_code.unwrap_or(DEFAULT_FIRST_CHAR),
            };
            let bytes = parse_bytes(&caps[1], line_no)?;
            let glyph = decode_glyph(code, &bytes, width, height, line_no)?;
            if glyphs.insert(code, glyph).is_some() {
                return Err(FontError::glcd(line_no, format!("character 0x{code:04X} is defined twice")));
            }
            next_code = Some(code.saturating_add(1));
        }

        let Some((width, height)) = size else {
            return Err(FontError::glcd(text.lines().count(), "missing '//GLCD FontSize : W x H' header"));
        };
        if glyphs.is_empty() {
            return Err(FontError::EmptyFont);
        }
        let name = name.map_or_else(|| fallback_name.to_string(), |n| strip_size_suffix(&n));
        log::debug!("GLCD font '{name}' {width}x{height} with {} characters", glyphs.len());
        Ok(Self { name, width, height, glyphs })
    }

    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }
}

impl GlyphSource for GlcdSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn cell_width(&self) -> usize {
        self.width
    }

    fn cell_height(&self) -> usize {
        self.height
    }

    fn glyph(&self, code: u32) -> Option<Glyph> {
        self.glyphs.get(&code).cloned()
    }

    /// Runs of consecutive codes, split into groups of at most 255 characters.
    fn available_ranges(&self) -> Vec<CharRange> {
        let mut ranges = Vec::new();
        let mut codes = self.glyphs.keys().copied();
        let Some(mut start) = codes.next() else {
            return ranges;
        };
        let mut end = start;
        for code in codes {
            if code != end + 1 {
                ranges.extend(CharRange::chunks(start, end));
                start = code;
            }
            end = code;
        }
        ranges.extend(CharRange::chunks(start, end));
        ranges
    }
}

fn parse_dimension(value: &str, line: usize) -> Result<usize> {
    value.parse().map_err(|e| FontError::glcd(line, format!("invalid font size '{value}': {e}")))
}

/// `None` when the comment does not name the character (the font creator leaves it blank for some codes).
fn char_code(comment: &str, line: usize) -> Result<Option<u32>> {
    if let Some(caps) = CHAR_NUM.captures(comment) {
        return caps[1]
            .parse()
            .map(Some)
            .map_err(|e| FontError::glcd(line, format!("invalid character number: {e}")));
    }
    let mut chars = comment.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Ok(Some(ch as u32)),
        _ => Ok(None),
    }
}

fn parse_bytes(data: &str, line: usize) -> Result<Vec<u8>> {
    data.split(',')
        .map(|token| token.trim().trim_start_matches('{').trim_end_matches(['}', ';']).trim())
        .filter(|token| !token.is_empty())
        .map(|token| {
            let hex = token
                .strip_prefix("0x")
                .or_else(|| token.strip_prefix("0X"))
                .ok_or_else(|| FontError::glcd(line, format!("expected a hex byte, got '{token}'")))?;
            u8::from_str_radix(hex, 16).map_err(|e| FontError::glcd(line, format!("invalid hex byte '{token}': {e}")))
        })
        .collect()
}

fn decode_glyph(code: u32, bytes: &[u8], cell_width: usize, height: usize, line: usize) -> Result<Glyph> {
    let Some((&width, data)) = bytes.split_first() else {
        return Err(FontError::glcd(line, "glyph line without data"));
    };
    let width = width as usize;
    if width > cell_width {
        return Err(FontError::glcd(line, format!("glyph width {width} exceeds the font width {cell_width}")));
    }
    let bands = height.div_ceil(BAND_HEIGHT);
    if data.len() < width * bands {
        return Err(FontError::glcd(
            line,
            format!("glyph needs {} bytes, line holds {}", width * bands, data.len()),
        ));
    }

    let mut glyph = Glyph::new(code, width, height);
    for x in 0..width {
        for band in 0..bands {
            let byte = data[x * bands + band];
            for bit in 0..BAND_HEIGHT {
                if byte & (1 << bit) != 0 {
                    glyph.set_pixel(x, band * BAND_HEIGHT + bit, true);
                }
            }
        }
    }
    Ok(glyph)
}

/// `Lucida_Console8x12` -> `Lucida_Console`, the array name gets the size appended again.
fn strip_size_suffix(name: &str) -> String {
    match SIZE_SUFFIX.captures(name) {
        Some(caps) if !caps[1].is_empty() => caps[1].to_string(),
        _ => name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL_FONT: &str = "\
//GLCD FontName : Tiny3x10
//GLCD FontSize : 3 x 10

const unsigned short Tiny3x10[] = {
        0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,  // Code for char
        0x02, 0xFF, 0x03, 0x01, 0x00, 0x00, 0x00,  // Code for char !
        0x03, 0x01, 0x02, 0x00, 0x00, 0x80, 0x00   // Code for char
        };
";

    #[test]
    fn test_parse_header_and_glyphs() {
        let font = GlcdSource::parse(SMALL_FONT, "fallback").unwrap();
        assert_eq!(font.name(), "Tiny");
        assert_eq!(font.cell_width(), 3);
        assert_eq!(font.cell_height(), 10);
        assert_eq!(font.glyph_count(), 3);
        assert_eq!(font.available_ranges(), vec![CharRange { start: 0x20, end: 0x22 }]);

        let space = font.glyph(0x20).unwrap();
        assert_eq!(space.width(), 1);
        assert!(space.is_empty());

        let excl = font.glyph(0x21).unwrap();
        assert_eq!(excl.width(), 2);
        assert_eq!(excl.height(), 10);
        // column 0: rows 0..=9 set, column 1: row 0 only
        assert!((0..10).all(|y| excl.get_pixel(0, y)));
        assert!(excl.get_pixel(1, 0));
        assert!(!excl.get_pixel(1, 1));
        assert_eq!(excl.trimmed_height(), 10);

        // the unnamed third character follows '!'
        let quote = font.glyph(0x22).unwrap();
        assert_eq!(quote.width(), 3);
        assert!(quote.get_pixel(0, 0));
        assert!(quote.get_pixel(0, 9));
        assert!(quote.get_pixel(2, 7));
    }

    #[test]
    fn test_char_num_comment() {
        let text = "//GLCD FontSize : 1 x 8\n 0x01, 0x81  // Code for char num 1040\n 0x01, 0x01  // Code for char\n";
        let font = GlcdSource::parse(text, "cyr").unwrap();
        assert_eq!(font.name(), "cyr");
        assert!(font.glyph(0x410).is_some());
        assert!(font.glyph(0x411).is_some());
    }

    #[test]
    fn test_missing_size_header() {
        let text = "0x01, 0x00  // Code for char A\n";
        assert!(matches!(GlcdSource::parse(text, "x"), Err(FontError::GlcdParse { line: 1, .. })));
        assert!(matches!(GlcdSource::parse("//GLCD FontName : x\n", "x"), Err(FontError::GlcdParse { .. })));
    }

    #[test]
    fn test_malformed_bytes() {
        let text = "//GLCD FontSize : 2 x 8\n0x02, 0x01, 0xZZ  // Code for char A\n";
        assert!(matches!(GlcdSource::parse(text, "x"), Err(FontError::GlcdParse { line: 2, .. })));
        let short = "//GLCD FontSize : 2 x 8\n0x02, 0x01  // Code for char A\n";
        assert!(matches!(GlcdSource::parse(short, "x"), Err(FontError::GlcdParse { line: 2, .. })));
        let wide = "//GLCD FontSize : 2 x 8\n0x03, 0x01, 0x01, 0x01  // Code for char A\n";
        assert!(matches!(GlcdSource::parse(wide, "x"), Err(FontError::GlcdParse { line: 2, .. })));
    }

    #[test]
    fn test_ranges_split_on_gaps() {
        let text = "//GLCD FontSize : 1 x 8\n0x01, 0x01 // Code for char A\n0x01, 0x01 // Code for char B\n0x01, 0x01 // Code for char Z\n";
        let font = GlcdSource::parse(text, "x").unwrap();
        assert_eq!(
            font.available_ranges(),
            vec![CharRange { start: 0x41, end: 0x42 }, CharRange { start: 0x5A, end: 0x5A }]
        );
    }

    #[test]
    fn test_strip_size_suffix() {
        assert_eq!(strip_size_suffix("Lucida_Console8x12"), "Lucida_Console");
        assert_eq!(strip_size_suffix("Font_6x8"), "Font");
        assert_eq!(strip_size_suffix("8x8"), "8x8");
        assert_eq!(strip_size_suffix("Terminal"), "Terminal");
    }
}
