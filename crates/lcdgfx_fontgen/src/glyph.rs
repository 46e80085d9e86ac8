//! Monochrome glyph bitmaps and the column band packing used by lcdgfx fonts.
//!
//! Glyphs are stored as `Vec<Vec<bool>>` (rows top to bottom, columns left to right).
//! On the display side a glyph is addressed in 8 pixel high bands: every byte holds
//! one column of a band, bit 0 being the topmost row of that band.

/// Number of pixel rows packed into a single byte.
pub const BAND_HEIGHT: usize = 8;

/// Number of bytes needed for a `width` x `height` bitmap in column band layout.
#[inline]
pub fn packed_size(width: usize, height: usize) -> usize {
    height.div_ceil(BAND_HEIGHT) * width
}

/// Maps a character code to something that can be shown inside a C comment.
///
/// Control characters and the non printable latin-1 positions are replaced with `.`.
pub fn printable_char(code: u32) -> char {
    match code {
        0..=31 | 129 | 141 | 143 | 144 | 157 | 160 | 173 => '.',
        _ => char::from_u32(code).unwrap_or('.'),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyph {
    /// Unicode code point
    pub code: u32,
    width: usize,
    pixels: Vec<Vec<bool>>,
}

impl Glyph {
    /// Create a blank glyph.
    pub fn new(code: u32, width: usize, height: usize) -> Self {
        Self {
            code,
            width,
            pixels: vec![vec![false; width]; height],
        }
    }

    /// Create a glyph from a pixel matrix. Short rows are padded to the widest row.
    pub fn from_pixels(code: u32, mut pixels: Vec<Vec<bool>>) -> Self {
        let width = pixels.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut pixels {
            row.resize(width, false);
        }
        Self { code, width, pixels }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.pixels.len()
    }

    pub fn pixels(&self) -> &[Vec<bool>] {
        &self.pixels
    }

    /// Returns `false` if coordinates are out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: usize, y: usize) -> bool {
        self.pixels.get(y).and_then(|row| row.get(x)).copied().unwrap_or(false)
    }

    /// Does nothing if coordinates are out of bounds.
    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, value: bool) {
        if let Some(pixel) = self.pixels.get_mut(y).and_then(|row| row.get_mut(x)) {
            *pixel = value;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.iter().all(|row| row.iter().all(|&p| !p))
    }

    /// Height without the trailing all-zero rows.
    pub fn trimmed_height(&self) -> usize {
        let mut height = self.pixels.len();
        while height > 0 && !self.pixels[height - 1].iter().any(|&p| p) {
            height -= 1;
        }
        height
    }

    /// Drops the trailing all-zero rows.
    pub fn trim(&mut self) {
        let height = self.trimmed_height();
        self.pixels.truncate(height);
    }

    /// Pads or cuts the bitmap on the right and at the bottom.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.pixels.resize(height, vec![false; width]);
        for row in &mut self.pixels {
            row.resize(width, false);
        }
        self.width = width;
    }

    /// Packs `width` columns and `height` rows in column band order into `out`.
    ///
    /// Pixels outside the bitmap are packed as zero, so a narrow glyph can be written
    /// with a wider fixed stride. Returns the number of bytes appended.
    pub fn pack_into(&self, width: usize, height: usize, out: &mut Vec<u8>) -> usize {
        let start = out.len();
        for band in 0..height.div_ceil(BAND_HEIGHT) {
            for x in 0..width {
                let mut data = 0u8;
                for i in 0..BAND_HEIGHT {
                    let y = band * BAND_HEIGHT + i;
                    if y >= height {
                        break;
                    }
                    if self.get_pixel(x, y) {
                        data |= 1 << i;
                    }
                }
                out.push(data);
            }
        }
        out.len() - start
    }

    /// Comment label used in the generated source, e.g. `char 'A' (0x0041/65)`.
    pub fn label(&self) -> String {
        format!("char '{}' (0x{:04X}/{})", printable_char(self.code), self.code, self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glyph(rows: &[&str]) -> Glyph {
        Glyph::from_pixels(0x41, rows.iter().map(|r| r.chars().map(|c| c == '#').collect()).collect())
    }

    #[test]
    fn test_trimmed_height() {
        let g = glyph(&["#..", ".#.", "...", "..#", "...", "..."]);
        assert_eq!(g.height(), 6);
        assert_eq!(g.trimmed_height(), 4);

        let empty = Glyph::new(0x20, 3, 8);
        assert_eq!(empty.trimmed_height(), 0);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_trim_is_idempotent() {
        let mut g = glyph(&["#", ".", "#", ".", "."]);
        g.trim();
        assert_eq!(g.height(), 3);
        let once = g.clone();
        g.trim();
        assert_eq!(g, once);
        assert_eq!(g.trimmed_height(), 3);
    }

    #[test]
    fn test_pack_single_band() {
        // column 0: rows 0 and 7, column 1: row 1
        let g = glyph(&["#.", ".#", "..", "..", "..", "..", "..", "#."]);
        let mut out = Vec::new();
        assert_eq!(g.pack_into(2, 8, &mut out), 2);
        assert_eq!(out, vec![0x81, 0x02]);
    }

    #[test]
    fn test_pack_two_bands() {
        let mut g = Glyph::new(0x41, 2, 10);
        g.set_pixel(0, 8, true);
        g.set_pixel(1, 9, true);
        g.set_pixel(1, 0, true);
        let mut out = Vec::new();
        assert_eq!(g.pack_into(2, 10, &mut out), 4);
        // band 0: col0, col1 - band 1: col0, col1
        assert_eq!(out, vec![0x00, 0x01, 0x01, 0x02]);
    }

    #[test]
    fn test_pack_pads_outside_bitmap() {
        let g = glyph(&["##"]);
        let mut out = Vec::new();
        assert_eq!(g.pack_into(4, 16, &mut out), packed_size(4, 16));
        assert_eq!(out, vec![0x01, 0x01, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_packed_size() {
        assert_eq!(packed_size(5, 8), 5);
        assert_eq!(packed_size(5, 9), 10);
        assert_eq!(packed_size(5, 0), 0);
        assert_eq!(packed_size(0, 16), 0);
    }

    #[test]
    fn test_resize() {
        let mut g = glyph(&["##", "##"]);
        g.resize(3, 4);
        assert_eq!(g.width(), 3);
        assert_eq!(g.height(), 4);
        assert!(g.get_pixel(1, 1));
        assert!(!g.get_pixel(2, 1));
        g.resize(1, 1);
        assert_eq!(g.pixels(), &[vec![true]]);
    }

    #[test]
    fn test_label() {
        assert_eq!(Glyph::new(0x41, 1, 1).label(), "char 'A' (0x0041/65)");
        assert_eq!(Glyph::new(0x0A, 1, 1).label(), "char '.' (0x000A/10)");
        assert_eq!(Glyph::new(0x410, 1, 1).label(), "char '\u{410}' (0x0410/1040)");
    }
}
