use std::ops::RangeInclusive;

use crate::{FontError, Result};

/// Maximum number of glyphs in a single group (the count is stored in one byte).
pub const MAX_GROUP_SIZE: usize = 255;

/// Highest code point a unicode record can address.
pub const MAX_CHAR_CODE: u32 = 0xFFFF;

/// Inclusive range of character codes making up one glyph group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CharRange {
    pub start: u32,
    pub end: u32,
}

impl CharRange {
    /// Printable ASCII, used when a TrueType font is converted without explicit groups.
    pub const DEFAULT_TTF: CharRange = CharRange { start: 0x20, end: 0x7F };

    pub fn new(start: u32, end: u32) -> Result<Self> {
        if end < start {
            return Err(FontError::ReversedRange { start, end });
        }
        if end > MAX_CHAR_CODE {
            return Err(FontError::CodeOutOfRange { code: end });
        }
        let range = Self { start, end };
        if range.len() > MAX_GROUP_SIZE {
            return Err(FontError::GroupTooLarge {
                count: range.len(),
                max: MAX_GROUP_SIZE,
            });
        }
        Ok(range)
    }

    /// Parses a `-g <START> <END>` pair.
    ///
    /// `start` is a literal character, a decimal code (at least two digits) or a
    /// `0x` prefixed hex code. `end` is either a number of characters following
    /// `start` or a literal end character (inclusive).
    ///
    /// # Examples
    /// ```
    /// use lcdgfx_fontgen::CharRange;
    ///
    /// assert_eq!(CharRange::parse("0x20", "95").unwrap(), CharRange { start: 0x20, end: 0x7F });
    /// assert_eq!(CharRange::parse("A", "Z").unwrap().len(), 26);
    /// assert_eq!(CharRange::parse("1040", "31").unwrap().start, 0x410);
    /// assert!(CharRange::parse("A", "255").is_err());
    /// ```
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        let first = parse_start(start)?;
        if is_number(end) {
            let count: usize = end.parse().map_err(|e| FontError::invalid_char(end, format!("{e}")))?;
            if count + 1 > MAX_GROUP_SIZE {
                return Err(FontError::GroupTooLarge {
                    count: count + 1,
                    max: MAX_GROUP_SIZE,
                });
            }
            return Self::new(first, first.saturating_add(count as u32));
        }
        Self::new(first, single_char(end)?)
    }

    /// Splits `start..=end` into consecutive ranges of at most [`MAX_GROUP_SIZE`] codes.
    pub fn chunks(start: u32, end: u32) -> Vec<Self> {
        let mut result = Vec::new();
        let mut first = start;
        while first <= end {
            let last = end.min(first.saturating_add(MAX_GROUP_SIZE as u32 - 1));
            result.push(Self { start: first, end: last });
            if last == u32::MAX {
                break;
            }
            first = last + 1;
        }
        result
    }

    /// Number of characters in the range.
    #[inline]
    pub fn len(&self) -> usize {
        (self.end - self.start) as usize + 1
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    #[inline]
    pub fn contains(&self, code: u32) -> bool {
        (self.start..=self.end).contains(&code)
    }

    pub fn codes(&self) -> RangeInclusive<u32> {
        self.start..=self.end
    }
}

/// Sorts ranges by their first code and rejects overlapping ones.
pub fn sort_ranges(ranges: &[CharRange]) -> Result<Vec<CharRange>> {
    let mut sorted = ranges.to_vec();
    sorted.sort();
    for pair in sorted.windows(2) {
        if pair[1].start <= pair[0].end {
            return Err(FontError::OverlappingRanges { code: pair[1].start });
        }
    }
    Ok(sorted)
}

fn is_number(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

fn parse_start(s: &str) -> Result<u32> {
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        return u32::from_str_radix(hex, 16).map_err(|e| FontError::invalid_char(s, format!("{e}")));
    }
    if is_number(s) && s.len() > 1 {
        return s.parse().map_err(|e| FontError::invalid_char(s, format!("{e}")));
    }
    single_char(s)
}

fn single_char(s: &str) -> Result<u32> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Ok(ch as u32),
        (None, _) => Err(FontError::invalid_char(s, "empty character")),
        _ => Err(FontError::invalid_char(s, "expected a single character, a decimal or a 0x hex code")),
    }
}
