use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use crate::{LicenseError, Result};

/// Default file name of the hash database, relative to the walked root.
pub const HASH_DB_NAME: &str = ".hash_db";

/// CRC-32 of a file's text as 8 lower case hex digits.
pub fn content_hash(text: &str) -> String {
    format!("{:08x}", crc32fast::hash(text.as_bytes()))
}

/// Content hashes of the files seen on the last run, one `path:hash` line per file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HashDb {
    entries: BTreeMap<String, String>,
}

impl HashDb {
    /// Loads the database, a missing file is an empty database.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No hash db at '{}'", path.display());
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path).map_err(|e| LicenseError::read_file(path, e))?;
        Self::parse(&text, path)
    }

    pub fn parse(text: &str, path: &Path) -> Result<Self> {
        let mut entries = BTreeMap::new();
        for (i, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let Some((file, hash)) = line.rsplit_once(':') else {
                return Err(LicenseError::HashDb {
                    path: PathBuf::from(path),
                    line: i + 1,
                });
            };
            entries.insert(file.to_string(), hash.trim().to_string());
        }
        Ok(Self { entries })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_text()).map_err(|e| LicenseError::write_file(path, e))
    }

    pub fn to_text(&self) -> String {
        self.entries.iter().map(|(file, hash)| format!("{file}:{hash}\n")).collect()
    }

    pub fn get(&self, file: &str) -> Option<&str> {
        self.entries.get(file).map(String::as_str)
    }

    pub fn insert(&mut self, file: impl Into<String>, hash: impl Into<String>) {
        self.entries.insert(file.into(), hash.into());
    }

    /// A file counts as modified when a stored hash exists and differs. Unknown files are unmodified.
    pub fn is_modified(&self, file: &str, hash: &str) -> bool {
        self.get(file).is_some_and(|stored| stored != hash)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
