#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_lossless,
    clippy::cast_precision_loss,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]
//! Bitmap font generator for the lcdgfx display library.
//!
//! Glyphs are loaded from a [`source`] into a [`FontSet`], packed by one of the
//! [`FontFormat`]s and rendered as a C byte array.

mod char_range;
pub use char_range::*;

mod error;
pub use error::*;

mod font_set;
pub use font_set::*;

mod glyph;
pub use glyph::*;

mod packed_font;
pub use packed_font::*;

pub mod packer;
pub use packer::FontFormat;

mod sink;
pub use sink::*;

pub mod source;
