//! Storage layout for persisted cache files.
//!
//! Every named cache owns exactly one file at `<root>/<name>`.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{CacheError, Result};

/// Suffix of in-flight write files. Reserved: no cache name may end with it.
pub(crate) const TEMP_SUFFIX: &str = ".tmp";

/// A persisted cache file found under the storage root.
#[derive(Debug, Clone, Serialize)]
pub struct StoredFile {
    /// Cache name (also the file name).
    pub name: String,
    /// Full path to the file.
    pub path: PathBuf,
    /// Size in bytes.
    pub size_bytes: u64,
    /// Last modification time.
    pub modified: DateTime<Utc>,
}

/// Directory holding persisted cache files.
#[derive(Debug, Clone)]
pub struct CacheStore {
    /// Root directory for cache files.
    root: PathBuf,
}

impl CacheStore {
    /// Create a new cache store. Nothing is touched on disk.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Get the storage root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Ensure the storage root exists, creating intermediate directories.
    pub fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.root)?;
        Ok(())
    }

    /// Get the file path for a named cache.
    ///
    /// Names must be a single path component so the file stays under the root,
    /// and must not end in `.tmp`, which is reserved for in-flight writes.
    pub fn path_for(&self, name: &str) -> Result<PathBuf> {
        validate_name(name)?;
        Ok(self.root.join(name))
    }

    /// Read a persisted file's raw bytes, or `None` if it does not exist.
    pub fn read_raw(&self, name: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path_for(name)?;
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Remove a persisted file. Returns whether a file was deleted.
    pub fn remove(&self, name: &str) -> Result<bool> {
        remove_if_exists(&self.path_for(name)?)
    }

    /// List all persisted files, most recently modified first.
    ///
    /// A missing root lists as empty. In-flight temp files are skipped.
    pub fn list(&self) -> Result<Vec<StoredFile>> {
        let dir = match fs::read_dir(&self.root) {
            Ok(dir) => dir,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut files = Vec::new();

        for entry in dir {
            let entry = entry?;
            let metadata = entry.metadata()?;
            if !metadata.is_file() {
                continue;
            }

            let name = entry.file_name().to_string_lossy().to_string();
            if name.ends_with(TEMP_SUFFIX) {
                continue;
            }

            files.push(StoredFile {
                name,
                path: entry.path(),
                size_bytes: metadata.len(),
                modified: metadata.modified()?.into(),
            });
        }

        files.sort_by(|a, b| b.modified.cmp(&a.modified).then(a.name.cmp(&b.name)));
        Ok(files)
    }

    /// Remove every persisted file. Returns the number removed.
    pub fn clear(&self) -> Result<usize> {
        let files = self.list()?;
        let mut removed = 0;

        for file in files {
            if remove_if_exists(&file.path)? {
                removed += 1;
            }
        }

        Ok(removed)
    }

    /// Get total size of persisted files in bytes.
    pub fn total_size(&self) -> Result<u64> {
        Ok(self.list()?.iter().map(|f| f.size_bytes).sum())
    }
}

fn validate_name(name: &str) -> Result<()> {
    let invalid = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains('/')
        || name.contains('\\')
        || name.contains('\0')
        || name.ends_with(TEMP_SUFFIX);

    if invalid {
        return Err(CacheError::InvalidName {
            name: name.to_string(),
        });
    }
    Ok(())
}

pub(crate) fn remove_if_exists(path: &Path) -> Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}
