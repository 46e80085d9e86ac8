//! Glyph sources.
//!
//! A source turns some font description into cell high bitmaps, one per character code.
//! Everything after loading (width normalisation, packing) works on the
//! [`FontSet`](crate::FontSet) the source was loaded into.

mod glcd;
mod ttf;

pub use glcd::GlcdSource;
pub use ttf::TtfSource;

use crate::{CharRange, Glyph};

pub trait GlyphSource {
    /// Base name of the generated array.
    fn name(&self) -> &str;

    /// Width used for characters the source cannot render.
    fn cell_width(&self) -> usize;

    /// Height of every glyph bitmap returned by [`GlyphSource::glyph`].
    fn cell_height(&self) -> usize;

    /// Renders a single character, `None` if the source has no glyph for it.
    fn glyph(&self, code: u32) -> Option<Glyph>;

    /// Characters the source provides when no groups were requested.
    fn available_ranges(&self) -> Vec<CharRange>;
}
