use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use walkdir::WalkDir;

use crate::{content_hash, FileKind, HashDb, LicenseError, Result, Stamp, HASH_DB_NAME};

/// Directories below the root that are never stamped.
pub const EXCLUDED_DIRS: [&str; 3] = [".git", ".travis", "tools/templates"];

/// Outcome of a run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StampReport {
    pub scanned: usize,
    /// Files that got a new or updated header, relative to the root
    pub updated: Vec<String>,
    /// Files skipped because they are not UTF-8
    pub skipped: Vec<String>,
}

pub struct Stamper {
    root: PathBuf,
    hash_db: PathBuf,
    stamp: Stamp,
}

impl Stamper {
    pub fn new(root: impl Into<PathBuf>, stamp: Stamp) -> Self {
        let root = root.into();
        Self {
            hash_db: root.join(HASH_DB_NAME),
            root,
            stamp,
        }
    }

    #[must_use]
    pub fn with_hash_db(mut self, path: impl Into<PathBuf>) -> Self {
        self.hash_db = path.into();
        self
    }

    /// Stamps every source file below the root and rewrites the hash db.
    pub fn run(&self) -> Result<StampReport> {
        let mut db = HashDb::load(&self.hash_db)?;
        let mut report = StampReport::default();

        for (path, kind) in self.source_files()? {
            let key = self.db_key(&path);
            report.scanned += 1;
            let text = match fs::read_to_string(&path) {
                Ok(text) => text,
                Err(err) if err.kind() == ErrorKind::InvalidData => {
                    log::warn!("Skipping '{}', not UTF-8", path.display());
                    report.skipped.push(key);
                    continue;
                }
                Err(err) => return Err(LicenseError::read_file(&path, err)),
            };
            let hash = content_hash(&text);
            let modified = db.is_modified(&key, &hash);

            if let Some(stamped) = self.stamp.apply(&text, kind, modified) {
                fs::write(&path, &stamped).map_err(|e| LicenseError::write_file(&path, e))?;
                log::info!("Updated license of {key}");
                db.insert(key.clone(), content_hash(&stamped));
                report.updated.push(key);
            } else {
                log::debug!("{key} is up to date");
                db.insert(key, hash);
            }
        }

        db.save(&self.hash_db)?;
        Ok(report)
    }

    /// Source files below the root in walk order, excluded directories left out.
    pub fn source_files(&self) -> Result<Vec<(PathBuf, FileKind)>> {
        let mut files = Vec::new();
        let walker = WalkDir::new(&self.root).sort_by_file_name().into_iter();
        for entry in walker.filter_entry(|e| !self.is_excluded(e.path())) {
            let entry = entry.map_err(|err| LicenseError::Walk {
                path: self.root.clone(),
                message: err.to_string(),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            if let Some(kind) = FileKind::from_path(entry.path()) {
                files.push((entry.into_path(), kind));
            }
        }
        Ok(files)
    }

    fn is_excluded(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        EXCLUDED_DIRS.iter().any(|dir| relative.starts_with(dir))
    }

    /// Hash db key of a file, its path relative to the root with `/` separators.
    fn db_key(&self, path: &Path) -> String {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }
}
