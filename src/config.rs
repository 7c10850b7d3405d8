//! Configuration loading.
//!
//! Settings come from, in increasing priority:
//! 1. Built-in defaults
//! 2. A YAML config file (`--config`, or `<config dir>/tiercache/config.yml`)
//! 3. Environment variables (`TIERCACHE_ROOT`, `TIERCACHE_IGNORE_CORRUPTION`)
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//! use tiercache::config::CacheConfig;
//!
//! let config = CacheConfig::parse("root: /var/cache/cms\nomit_header: true\n", Path::new("inline")).unwrap();
//! assert_eq!(config.root, Path::new("/var/cache/cms"));
//! assert!(config.ignore_corruption);
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::cache::{default_cache_dir, FileCodec, Format};
use crate::encoding::TextEncoding;
use crate::error::{CacheError, Result};
use crate::updaters::try_parse;

/// Environment variable overriding the storage root.
pub const ROOT_ENV: &str = "TIERCACHE_ROOT";

/// Environment variable overriding the corruption policy.
pub const IGNORE_CORRUPTION_ENV: &str = "TIERCACHE_IGNORE_CORRUPTION";

/// Settings shared by every cache the application creates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Directory holding persisted cache files.
    pub root: PathBuf,

    /// Discard and reload corrupted files instead of failing.
    pub ignore_corruption: bool,

    /// Text format of persisted files.
    pub format: Format,

    /// Character encoding of persisted files.
    pub encoding: TextEncoding,

    /// Leave out the format header.
    pub omit_header: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            root: default_cache_dir(),
            ignore_corruption: true,
            format: Format::default(),
            encoding: TextEncoding::default(),
            omit_header: false,
        }
    }
}

impl CacheConfig {
    /// Default config file location, if the platform has a config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tiercache").join("config.yml"))
    }

    /// Load configuration and apply environment overrides.
    ///
    /// # Errors
    ///
    /// Returns `ConfigNotFound` if `explicit` is given but missing.
    /// Returns `ConfigParse` if the YAML is invalid.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::load_file(path)?,
            None => match Self::default_path().filter(|p| p.exists()) {
                Some(path) => Self::load_file(&path)?,
                None => Self::default(),
            },
        };

        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load a single config file.
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                CacheError::ConfigNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                CacheError::Io(e)
            }
        })?;

        tracing::debug!("Loaded config from {:?}", path);
        Self::parse(&content, path)
    }

    /// Parse YAML content. `source_path` is only used for error reporting.
    pub fn parse(content: &str, source_path: &Path) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(content).map_err(|e| CacheError::ConfigParse {
            path: source_path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Apply environment overrides read through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(root) = lookup(ROOT_ENV).filter(|r| !r.is_empty()) {
            self.root = PathBuf::from(root);
        }

        // "true"/"false" first, then the "0"/blank tri-state flag rule.
        let ignore = lookup(IGNORE_CORRUPTION_ENV).and_then(|v| {
            try_parse::<bool>(&v).or_else(|| try_parse::<Option<bool>>(&v).flatten())
        });
        if let Some(ignore) = ignore {
            self.ignore_corruption = ignore;
        }
    }

    /// Codec for persisted files.
    pub fn codec(&self) -> FileCodec {
        FileCodec::new()
            .with_format(self.format)
            .with_encoding(self.encoding)
            .omit_header(self.omit_header)
    }
}
