//! Cache source backed by a JSON file.

use anyhow::{Context, Result};
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

use crate::cache::CacheSource;

/// Reads a JSON array of items from a file.
///
/// With no file configured, a load from source fails, so only the
/// memory and file tiers can satisfy the cache.
#[derive(Debug, Clone, Default)]
pub struct JsonFileSource {
    path: Option<PathBuf>,
}

impl JsonFileSource {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }
}

impl CacheSource for JsonFileSource {
    type Item = Value;

    fn load_from_source(&mut self) -> Result<Vec<Value>> {
        let path = self
            .path
            .as_ref()
            .context("Cache is cold and no --from source was given")?;

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read source file {:?}", path))?;
        let items: Vec<Value> = serde_json::from_str(&content)
            .with_context(|| format!("Source file {:?} is not a JSON array", path))?;

        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn reads_json_array() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("widgets.json");
        fs::write(&path, r#"[{"id": 1}, {"id": 2}]"#).unwrap();

        let items = JsonFileSource::new(Some(path)).load_from_source().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["id"], 1);
    }

    #[test]
    fn no_path_fails() {
        let err = JsonFileSource::default().load_from_source().unwrap_err();
        assert!(err.to_string().contains("--from"));
    }

    #[test]
    fn non_array_fails() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("widgets.json");
        fs::write(&path, r#"{"id": 1}"#).unwrap();

        let err = JsonFileSource::new(Some(path)).load_from_source().unwrap_err();
        assert!(err.to_string().contains("not a JSON array"));
    }
}
