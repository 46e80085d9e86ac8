use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use crate::{FontError, Result};

/// Destination of the generated source.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OutputSink {
    #[default]
    Stdout,
    File(PathBuf),
}

impl OutputSink {
    pub fn from_path(path: Option<PathBuf>) -> Self {
        path.map_or(Self::Stdout, Self::File)
    }

    /// Writes `text` as UTF-8.
    ///
    /// Files are written to a temporary sibling first and renamed into place, a failed
    /// write leaves the destination untouched.
    pub fn write(&self, text: &str) -> Result<()> {
        match self {
            Self::Stdout => {
                let mut out = io::stdout().lock();
                out.write_all(text.as_bytes())?;
                out.flush()?;
                Ok(())
            }
            Self::File(path) => write_atomic(path, text),
        }
    }
}

fn write_atomic(path: &Path, text: &str) -> Result<()> {
    let file_name = path
        .file_name()
        .ok_or_else(|| FontError::write_file(path, "path does not name a file"))?;
    let tmp = path.with_file_name(format!(".{}.tmp", file_name.to_string_lossy()));

    if let Err(err) = fs::write(&tmp, text) {
        fs::remove_file(&tmp).ok();
        return Err(FontError::write_file(path, err));
    }
    if let Err(err) = fs::rename(&tmp, path) {
        fs::remove_file(&tmp).ok();
        return Err(FontError::write_file(path, err));
    }
    log::debug!("Wrote {} bytes to {}", text.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("lcdgfx_fontgen_sink_{name}_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_write_file() {
        let dir = temp_dir("write");
        let path = dir.join("font.h");
        OutputSink::File(path.clone()).write("const uint8_t x[] = {};\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "const uint8_t x[] = {};\n");
        assert!(!dir.join(".font.h.tmp").exists());
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_failed_write_leaves_nothing() {
        let dir = temp_dir("fail");
        let path = dir.join("missing_dir").join("font.h");
        let err = OutputSink::File(path.clone()).write("data").unwrap_err();
        assert!(matches!(err, FontError::WriteFile { .. }));
        assert!(!path.exists());
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_from_path() {
        assert_eq!(OutputSink::from_path(None), OutputSink::Stdout);
        assert_eq!(
            OutputSink::from_path(Some(PathBuf::from("a.h"))),
            OutputSink::File(PathBuf::from("a.h"))
        );
    }
}
