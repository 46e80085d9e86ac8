//! Shared helpers for the packer tests

#![allow(dead_code)]

use std::{fs, path::PathBuf};

use lcdgfx_fontgen::{FontSet, Glyph, GlyphGroup};

/// Build a glyph from ASCII art, `#` is a set pixel.
pub fn glyph(code: u32, rows: &[&str]) -> Glyph {
    Glyph::from_pixels(code, rows.iter().map(|row| row.chars().map(|c| c == '#').collect()).collect())
}

/// Glyph with every pixel set
pub fn filled(code: u32, width: usize, height: usize) -> Glyph {
    Glyph::from_pixels(code, vec![vec![true; width]; height])
}

/// Blank glyph
pub fn blank(code: u32, width: usize, height: usize) -> Glyph {
    Glyph::new(code, width, height)
}

/// Font from already contiguous glyph runs
pub fn font(name: &str, height: usize, groups: Vec<Vec<Glyph>>) -> FontSet {
    let groups = groups.into_iter().map(|glyphs| GlyphGroup::new(glyphs).unwrap()).collect();
    FontSet::new(name, height, groups).unwrap()
}

/// Unique scratch directory below the system temp dir
pub fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("lcdgfx_fontgen_{name}_{}", std::process::id()));
    if dir.exists() {
        fs::remove_dir_all(&dir).unwrap();
    }
    fs::create_dir_all(&dir).unwrap();
    dir
}
