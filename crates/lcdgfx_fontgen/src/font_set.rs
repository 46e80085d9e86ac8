use crate::{sort_ranges, source::GlyphSource, CharRange, FontError, Glyph, Result, MAX_CHAR_CODE, MAX_GROUP_SIZE};

/// Global font metrics as written into the font header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontMetrics {
    /// Widest glyph in pixels
    pub width: usize,
    /// Cell height in pixels (before any trimming)
    pub height: usize,
    /// Lowest character code of the font
    pub first_char: u32,
}

/// A contiguous run of 1..=255 glyphs sharing one unicode record.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphGroup {
    glyphs: Vec<Glyph>,
}

impl GlyphGroup {
    pub fn new(glyphs: Vec<Glyph>) -> Result<Self> {
        let Some(first) = glyphs.first() else {
            return Err(FontError::EmptyFont);
        };
        if glyphs.len() > MAX_GROUP_SIZE {
            return Err(FontError::GroupTooLarge {
                count: glyphs.len(),
                max: MAX_GROUP_SIZE,
            });
        }
        let mut expected = first.code;
        for glyph in &glyphs {
            if glyph.code != expected {
                return Err(FontError::NonContiguousGroup {
                    expected,
                    actual: glyph.code,
                });
            }
            expected += 1;
        }
        let last = expected - 1;
        if last > MAX_CHAR_CODE {
            return Err(FontError::CodeOutOfRange { code: last });
        }
        Ok(Self { glyphs })
    }

    pub fn first_char(&self) -> u32 {
        self.glyphs[0].code
    }

    pub fn last_char(&self) -> u32 {
        self.glyphs[self.glyphs.len() - 1].code
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    pub fn range(&self) -> CharRange {
        CharRange {
            start: self.first_char(),
            end: self.last_char(),
        }
    }
}

/// The font being generated: every glyph of every requested group, all of them one cell high.
///
/// The set is owned by a single run. Sources create it, the command line options reshape it
/// (`expand_width`, `limit_height`) and the packers only borrow it.
#[derive(Debug, Clone)]
pub struct FontSet {
    name: String,
    height: usize,
    groups: Vec<GlyphGroup>,
}

impl FontSet {
    /// Groups are sorted by their first character; overlapping groups are rejected.
    pub fn new(name: impl Into<String>, height: usize, mut groups: Vec<GlyphGroup>) -> Result<Self> {
        if groups.is_empty() {
            return Err(FontError::EmptyFont);
        }
        groups.sort_by_key(GlyphGroup::first_char);
        for pair in groups.windows(2) {
            if pair[1].first_char() <= pair[0].last_char() {
                return Err(FontError::OverlappingRanges { code: pair[1].first_char() });
            }
        }
        for group in &mut groups {
            for glyph in &mut group.glyphs {
                glyph.resize(glyph.width(), height);
            }
        }
        Ok(Self {
            name: name.into(),
            height,
            groups,
        })
    }

    /// Renders every character of `ranges` with `source`.
    ///
    /// Without ranges the source decides which characters to load. Characters the source
    /// has no glyph for become blank glyphs so that every group stays contiguous.
    pub fn load(source: &dyn GlyphSource, ranges: &[CharRange]) -> Result<Self> {
        let ranges = if ranges.is_empty() {
            source.available_ranges()
        } else {
            ranges.to_vec()
        };
        let ranges = sort_ranges(&ranges)?;
        let height = source.cell_height();

        let mut groups = Vec::with_capacity(ranges.len());
        let mut missing = 0;
        for range in &ranges {
            let mut glyphs = Vec::with_capacity(range.len());
            for code in range.codes() {
                match source.glyph(code) {
                    Some(glyph) => glyphs.push(glyph),
                    None => {
                        log::debug!("No glyph for 0x{code:04X}, using a blank one");
                        missing += 1;
                        glyphs.push(Glyph::new(code, source.cell_width(), height));
                    }
                }
            }
            groups.push(GlyphGroup::new(glyphs)?);
        }
        if missing > 0 {
            log::warn!("{missing} characters are not provided by '{}', blank glyphs were used", source.name());
        }
        log::debug!("Loaded {} groups from '{}'", groups.len(), source.name());
        Self::new(source.name(), height, groups)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// C identifier of the generated array, e.g. `FreeSans8x12`.
    pub fn array_name(&self) -> String {
        let metrics = self.metrics();
        let mut name: String = format!("{}{}x{}", self.name, metrics.width, metrics.height)
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();
        if name.starts_with(|c: char| c.is_ascii_digit()) {
            name.insert(0, '_');
        }
        name
    }

    pub fn metrics(&self) -> FontMetrics {
        FontMetrics {
            width: self.glyphs().map(Glyph::width).max().unwrap_or(0),
            height: self.height,
            first_char: self.groups[0].first_char(),
        }
    }

    pub fn groups(&self) -> &[GlyphGroup] {
        &self.groups
    }

    pub fn glyphs(&self) -> impl Iterator<Item = &Glyph> {
        self.groups.iter().flat_map(|group| group.glyphs.iter())
    }

    pub fn glyph_count(&self) -> usize {
        self.groups.iter().map(GlyphGroup::len).sum()
    }

    pub fn glyph(&self, code: u32) -> Option<&Glyph> {
        let group = self.groups.iter().find(|group| group.range().contains(code))?;
        group.glyphs.get((code - group.first_char()) as usize)
    }

    /// Pads every glyph on the right to the width of the widest glyph.
    pub fn expand_width(&mut self) {
        let width = self.metrics().width;
        let height = self.height;
        for group in &mut self.groups {
            for glyph in &mut group.glyphs {
                glyph.resize(width, height);
            }
        }
    }

    /// Limits the cell height to `height` rows, the rows below are cut.
    pub fn limit_height(&mut self, height: usize) {
        if height >= self.height {
            return;
        }
        self.height = height;
        for group in &mut self.groups {
            for glyph in &mut group.glyphs {
                glyph.resize(glyph.width(), height);
            }
        }
    }

    /// Renders `text` as ASCII art comment lines, one line per pixel row.
    pub fn demo_lines(&self, text: &str) -> Vec<String> {
        let glyphs: Vec<&Glyph> = text
            .chars()
            .filter_map(|ch| {
                let glyph = self.glyph(ch as u32);
                if glyph.is_none() {
                    log::warn!("Demo text character '{ch}' is not part of the font");
                }
                glyph
            })
            .collect();

        (0..self.height)
            .map(|y| {
                let row = glyphs
                    .iter()
                    .map(|glyph| (0..glyph.width()).map(|x| if glyph.get_pixel(x, y) { '#' } else { ' ' }).collect::<String>())
                    .collect::<Vec<_>>()
                    .join(" ");
                format!("// {row}").trim_end().to_string()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Renders every code as a `code % 5 + 1` wide glyph with a filled first row.
    struct StripeSource {
        provided: CharRange,
    }

    impl GlyphSource for StripeSource {
        fn name(&self) -> &str {
            "stripes"
        }

        fn cell_width(&self) -> usize {
            3
        }

        fn cell_height(&self) -> usize {
            4
        }

        fn glyph(&self, code: u32) -> Option<Glyph> {
            if !self.provided.contains(code) {
                return None;
            }
            let width = (code % 5 + 1) as usize;
            let mut glyph = Glyph::new(code, width, 4);
            for x in 0..width {
                glyph.set_pixel(x, 0, true);
            }
            Some(glyph)
        }

        fn available_ranges(&self) -> Vec<CharRange> {
            vec![self.provided]
        }
    }

    fn source() -> StripeSource {
        StripeSource {
            provided: CharRange { start: 0x41, end: 0x5A },
        }
    }

    #[test]
    fn test_load_default_ranges() {
        let font = FontSet::load(&source(), &[]).unwrap();
        assert_eq!(font.groups().len(), 1);
        assert_eq!(font.glyph_count(), 26);
        let metrics = font.metrics();
        assert_eq!(metrics.first_char, 0x41);
        assert_eq!(metrics.height, 4);
        assert_eq!(metrics.width, 5);
    }

    #[test]
    fn test_load_sorts_groups_and_fills_missing() {
        let ranges = [CharRange { start: 0x5A, end: 0x5C }, CharRange { start: 0x30, end: 0x31 }];
        let font = FontSet::load(&source(), &ranges).unwrap();
        assert_eq!(font.groups()[0].first_char(), 0x30);
        assert_eq!(font.groups()[1].first_char(), 0x5A);
        // '0', '1', '[' and '\' are not provided
        let blank = font.glyph(0x5B).unwrap();
        assert!(blank.is_empty());
        assert_eq!(blank.width(), 3);
        assert_eq!(blank.height(), 4);
        assert!(!font.glyph(0x5A).unwrap().is_empty());
        assert!(font.glyph(0x40).is_none());
    }

    #[test]
    fn test_load_rejects_overlap() {
        let ranges = [CharRange { start: 0x41, end: 0x45 }, CharRange { start: 0x45, end: 0x46 }];
        assert!(matches!(FontSet::load(&source(), &ranges), Err(FontError::OverlappingRanges { code: 0x45 })));
    }

    #[test]
    fn test_group_must_be_contiguous() {
        let glyphs = vec![Glyph::new(0x41, 1, 1), Glyph::new(0x43, 1, 1)];
        assert!(matches!(
            GlyphGroup::new(glyphs),
            Err(FontError::NonContiguousGroup { expected: 0x42, actual: 0x43 })
        ));
        assert!(matches!(GlyphGroup::new(Vec::new()), Err(FontError::EmptyFont)));
        let too_many = (0..256).map(|code| Glyph::new(code, 1, 1)).collect();
        assert!(matches!(GlyphGroup::new(too_many), Err(FontError::GroupTooLarge { count: 256, .. })));
    }

    #[test]
    fn test_expand_width() {
        let mut font = FontSet::load(&source(), &[]).unwrap();
        assert!(font.glyphs().any(|g| g.width() != 5));
        font.expand_width();
        assert!(font.glyphs().all(|g| g.width() == 5 && g.height() == 4));
    }

    #[test]
    fn test_limit_height() {
        let mut font = FontSet::load(&source(), &[]).unwrap();
        font.limit_height(10);
        assert_eq!(font.metrics().height, 4);
        font.limit_height(2);
        assert_eq!(font.metrics().height, 2);
        assert!(font.glyphs().all(|g| g.height() == 2));
    }

    #[test]
    fn test_array_name() {
        let font = FontSet::load(&source(), &[]).unwrap();
        assert_eq!(font.array_name(), "stripes5x4");
        let font = FontSet::new("8-bit font", 1, vec![GlyphGroup::new(vec![Glyph::new(0x20, 2, 1)]).unwrap()]).unwrap();
        assert_eq!(font.array_name(), "_8_bit_font2x1");
    }

    #[test]
    fn test_demo_lines() {
        let font = FontSet::load(&source(), &[]).unwrap();
        // 'A' = 0x41 -> width 1, 'B' -> width 2, '?' is unknown
        let lines = font.demo_lines("AB?");
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "// # ##");
        assert_eq!(lines[1], "//");
    }
}
