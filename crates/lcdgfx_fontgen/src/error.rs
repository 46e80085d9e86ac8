//! Unified error types for the font generator

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for font loading, packing and output.
#[derive(Debug, Error)]
pub enum FontError {
    // === I/O Errors ===
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read file '{path}': {message}")]
    ReadFile { path: PathBuf, message: String },

    #[error("There was an error creating the output file '{path}': {message}")]
    WriteFile { path: PathBuf, message: String },

    // === Usage Errors ===
    #[error("Invalid character '{value}': {message}")]
    InvalidChar { value: String, message: String },

    #[error("Number of characters in single block cannot be more than {max} (requested {count})")]
    GroupTooLarge { count: usize, max: usize },

    #[error("Character range ends before it starts (0x{start:04X}..0x{end:04X})")]
    ReversedRange { start: u32, end: u32 },

    #[error("Character ranges overlap at 0x{code:04X}")]
    OverlappingRanges { code: u32 },

    #[error("Characters of a group must be contiguous: expected 0x{expected:04X}, got 0x{actual:04X}")]
    NonContiguousGroup { expected: u32, actual: u32 },

    #[error("The old format supports a single character group, got {count}")]
    LegacyMultipleGroups { count: usize },

    #[error("Font has no glyphs")]
    EmptyFont,

    // === Source Errors ===
    #[error("GLCD parse error at line {line}: {message}")]
    GlcdParse { line: usize, message: String },

    #[error("Invalid font file '{path}': {message}")]
    InvalidFont { path: PathBuf, message: String },

    // === Encoding Errors ===
    #[error("{field} {value} does not fit into a single byte")]
    ByteOverflow { field: &'static str, value: usize },

    #[error("Character code 0x{code:X} does not fit into a 16 bit unicode record")]
    CodeOutOfRange { code: u32 },

    #[error("Group starting at 0x{first:04X} holds {size} bytes of glyph data, jump table offsets are limited to 65535")]
    GroupDataTooLarge { first: u32, size: usize },

    // === Internal Consistency ===
    #[error("ERROR!!!! glyph 0x{code:04X} emitted {actual} bytes, size table declares {expected}")]
    GlyphSizeMismatch { code: u32, expected: usize, actual: usize },

    #[error("ERROR!!!! font image holds {actual} bytes, size accounting expects {expected}")]
    ImageSizeMismatch { expected: usize, actual: usize },
}

/// Result type alias for font generator operations
pub type Result<T> = std::result::Result<T, FontError>;

impl FontError {
    /// Encoding bugs, as opposed to bad input. These abort generation and are never corrected.
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::GlyphSizeMismatch { .. } | Self::ImageSizeMismatch { .. })
    }

    pub fn invalid_char(value: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidChar {
            value: value.into(),
            message: message.into(),
        }
    }

    pub fn read_file(path: impl Into<PathBuf>, message: impl std::fmt::Display) -> Self {
        Self::ReadFile {
            path: path.into(),
            message: message.to_string(),
        }
    }

    pub fn write_file(path: impl Into<PathBuf>, message: impl std::fmt::Display) -> Self {
        Self::WriteFile {
            path: path.into(),
            message: message.to_string(),
        }
    }

    pub fn glcd(line: usize, message: impl Into<String>) -> Self {
        Self::GlcdParse { line, message: message.into() }
    }
}
