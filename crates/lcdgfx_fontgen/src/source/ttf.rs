use std::{collections::BTreeMap, fs, path::Path};

use ab_glyph::{point, Font, FontVec, OutlinedGlyph, PxScale, ScaleFont};

use super::GlyphSource;
use crate::{CharRange, FontError, Glyph, Result};

/// Coverage above which a rasterized pixel counts as set.
const COVERAGE_THRESHOLD: f32 = 0.5;

/// TrueType / OpenType rasterizer.
///
/// All requested characters are rendered up front: the cell height and the baseline depend on
/// the bounds of every glyph in the font.
#[derive(Debug, Clone)]
pub struct TtfSource {
    name: String,
    width: usize,
    height: usize,
    glyphs: BTreeMap<u32, Glyph>,
    ranges: Vec<CharRange>,
}

struct Rendered {
    code: u32,
    advance: f32,
    outline: Option<OutlinedGlyph>,
}

impl TtfSource {
    /// Loads `path` and renders `ranges` (printable ASCII if empty) at `size` pixels per em.
    ///
    /// With `fixed_height` the cell spans the font's full ascent and descent instead of the
    /// tight bounds of the rendered characters.
    pub fn load(path: &Path, size: u32, ranges: &[CharRange], fixed_height: bool) -> Result<Self> {
        let data = fs::read(path).map_err(|e| FontError::read_file(path, e))?;
        let font = FontVec::try_from_vec(data).map_err(|e| FontError::InvalidFont {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let name = path.file_stem().map_or_else(|| "font".to_string(), |s| s.to_string_lossy().into_owned());
        Self::from_font(&font, name, size, ranges, fixed_height)
    }

    pub fn from_font<F: Font>(font: &F, name: impl Into<String>, size: u32, ranges: &[CharRange], fixed_height: bool) -> Result<Self> {
        let ranges = if ranges.is_empty() { vec![CharRange::DEFAULT_TTF] } else { ranges.to_vec() };
        let scale = px_scale(font, size);
        let scaled = font.as_scaled(scale);

        let mut rendered = Vec::new();
        for code in ranges.iter().flat_map(CharRange::codes) {
            let Some(ch) = char::from_u32(code) else {
                continue;
            };
            let id = font.glyph_id(ch);
            if id.0 == 0 {
                log::debug!("Font has no glyph for 0x{code:04X}");
                continue;
            }
            rendered.push(Rendered {
                code,
                advance: scaled.h_advance(id),
                outline: font.outline_glyph(id.with_scale_and_position(scale, point(0.0, 0.0))),
            });
        }

        let (ascent, descent) = if fixed_height {
            (scaled.ascent().ceil(), (-scaled.descent()).ceil())
        } else {
            rendered
                .iter()
                .filter_map(|r| r.outline.as_ref())
                .map(OutlinedGlyph::px_bounds)
                .fold((0.0f32, 0.0f32), |(ascent, descent), bounds| (ascent.max(-bounds.min.y), descent.max(bounds.max.y)))
        };
        let baseline = ascent.max(0.0) as i32;
        let height = (ascent + descent).max(0.0) as usize;

        let glyphs: BTreeMap<u32, Glyph> = rendered.iter().map(|r| (r.code, rasterize(r, baseline, height))).collect();
        let width = if glyphs.is_empty() {
            0
        } else {
            glyphs.values().map(Glyph::width).sum::<usize>().div_ceil(glyphs.len())
        };

        let name = name.into();
        log::debug!("Rendered {} glyphs of '{name}' at {size}px, cell height {height}, baseline {baseline}", glyphs.len());
        Ok(Self {
            name,
            width,
            height,
            glyphs,
            ranges,
        })
    }
}

impl GlyphSource for TtfSource {
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

    fn available_ranges(&self) -> Vec<CharRange> {
        self.ranges.clone()
    }
}

/// `size` is given in pixels per em, ab_glyph scales by the line height.
fn px_scale<F: Font>(font: &F, size: u32) -> PxScale {
    let height = font.height_unscaled();
    let units_per_em = font.units_per_em().unwrap_or(height);
    PxScale::from(size as f32 * height / units_per_em)
}

fn rasterize(rendered: &Rendered, baseline: i32, height: usize) -> Glyph {
    let mut width = rendered.advance.ceil().max(0.0) as usize;
    let Some(outline) = &rendered.outline else {
        return Glyph::new(rendered.code, width, height);
    };
    let bounds = outline.px_bounds();
    width = width.max(bounds.max.x.max(0.0) as usize);

    let mut glyph = Glyph::new(rendered.code, width, height);
    outline.draw(|px, py, coverage| {
        if coverage < COVERAGE_THRESHOLD {
            return;
        }
        let x = bounds.min.x as i32 + px as i32;
        let y = baseline + bounds.min.y as i32 + py as i32;
        if x >= 0 && y >= 0 {
            glyph.set_pixel(x as usize, y as usize, true);
        }
    });
    glyph
}
