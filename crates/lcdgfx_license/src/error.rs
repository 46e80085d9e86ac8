//! Error types for the license stamper

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LicenseError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === File access ===
    #[error("Failed to read '{path}': {message}")]
    ReadFile { path: PathBuf, message: String },

    #[error("Failed to write '{path}': {message}")]
    WriteFile { path: PathBuf, message: String },

    #[error("Failed to walk '{path}': {message}")]
    Walk { path: PathBuf, message: String },

    // === Hash database ===
    #[error("Invalid hash db '{path}' line {line}: expected <path>:<hash>")]
    HashDb { path: PathBuf, line: usize },
}

pub type Result<T> = std::result::Result<T, LicenseError>;

impl LicenseError {
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
}
