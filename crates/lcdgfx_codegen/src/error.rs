//! Error types for the controller source generator

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodegenError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read '{path}': {message}")]
    ReadFile { path: PathBuf, message: String },

    #[error("Failed to write '{path}': {message}")]
    WriteFile { path: PathBuf, message: String },

    #[error("Invalid controller descriptor '{path}': {message}")]
    Descriptor { path: PathBuf, message: String },

    #[error("No controller descriptors found below '{path}'")]
    NoDescriptors { path: PathBuf },

    #[error("Unknown controller '{name}'")]
    UnknownController { name: String },

    #[error("Invalid resolution '{value}', expected <width>x<height>")]
    InvalidResolution { value: String },
}

pub type Result<T> = std::result::Result<T, CodegenError>;

impl CodegenError {
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
