//! Error types for tiercache operations.
//!
//! This module defines [`CacheError`], the primary error type used throughout
//! the library, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `CacheError` for failures callers need to tell apart (a corrupt
//!   persisted file versus a failing source, for example)
//! - Use `anyhow::Error` inside [`CacheSource`](crate::cache::CacheSource)
//!   implementations and the CLI; it is carried through `CacheError::Source`
//!   and `CacheError::Other`

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for tiercache operations.
#[derive(Debug, Error)]
pub enum CacheError {
    /// A persisted cache file could not be decoded or parsed.
    #[error("Corrupted cache file {path}: {message}")]
    Corrupted { path: PathBuf, message: String },

    /// The upstream source failed to produce items.
    #[error("Loading '{name}' from source failed: {source}")]
    Source {
        name: String,
        #[source]
        source: anyhow::Error,
    },

    /// The memory cache reported a key but could not hand back a value of the expected type.
    #[error("Memory cache returned no usable value for key '{key}'")]
    MemoryCache { key: String },

    /// Cache names become file names and must stay inside the storage root.
    #[error("Invalid cache name '{name}'")]
    InvalidName { name: String },

    /// Text could not be represented in, or read back from, the configured encoding.
    #[error("{encoding} encoding error: {message}")]
    Encoding { encoding: String, message: String },

    /// Items could not be written in the configured format.
    #[error("Failed to serialize cache items: {message}")]
    Serialize { message: String },

    /// In-memory text could not be parsed in the configured format.
    #[error("Failed to deserialize cache items: {message}")]
    Deserialize { message: String },

    /// An explicitly requested configuration file does not exist.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    /// Zip archive error wrapper.
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CacheError {
    /// Whether this error came from a corrupt persisted file.
    pub fn is_corrupted(&self) -> bool {
        matches!(self, CacheError::Corrupted { .. })
    }
}

/// Result type alias for tiercache operations.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corrupted_displays_path_and_message() {
        let err = CacheError::Corrupted {
            path: PathBuf::from("/cache/widgets"),
            message: "unexpected end of input".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/cache/widgets"));
        assert!(msg.contains("unexpected end of input"));
        assert!(err.is_corrupted());
    }

    #[test]
    fn source_error_displays_name_and_cause() {
        let err = CacheError::Source {
            name: "widgets".into(),
            source: anyhow::anyhow!("connection refused"),
        };
        let msg = err.to_string();
        assert!(msg.contains("widgets"));
        assert!(msg.contains("connection refused"));
        assert!(!err.is_corrupted());
    }

    #[test]
    fn memory_cache_displays_key() {
        let err = CacheError::MemoryCache {
            key: "widgets".into(),
        };
        assert!(err.to_string().contains("widgets"));
    }

    #[test]
    fn invalid_name_displays_name() {
        let err = CacheError::InvalidName {
            name: "../etc".into(),
        };
        assert!(err.to_string().contains("../etc"));
    }

    #[test]
    fn config_parse_error_displays_path_and_message() {
        let err = CacheError::ConfigParse {
            path: PathBuf::from("/config.yml"),
            message: "invalid syntax".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/config.yml"));
        assert!(msg.contains("invalid syntax"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: CacheError = io_err.into();
        assert!(matches!(err, CacheError::Io(_)));
    }

    #[test]
    fn result_type_alias_works() {
        fn returns_error() -> Result<()> {
            Err(CacheError::InvalidName { name: "".into() })
        }
        assert!(returns_error().is_err());
    }
}
