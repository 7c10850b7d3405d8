//! Persisted-file codec.
//!
//! Turns a collection into human-inspectable text (YAML or JSON) in a
//! configurable character encoding, and back again. A missing file reads
//! as `None`; a malformed one is reported as [`CacheError::Corrupted`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::cache::store::TEMP_SUFFIX;
use crate::encoding::TextEncoding;
use crate::error::{CacheError, Result};

/// YAML document start marker written unless the header is omitted.
const YAML_HEADER: &str = "---\n";

/// Text format of persisted files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Yaml,
    Json,
}

/// Serializer/deserializer for persisted cache files.
///
/// # Example
///
/// ```
/// use tiercache::cache::{FileCodec, Format};
///
/// let codec = FileCodec::new().with_format(Format::Json);
/// let text = codec.serialize_to_string(&vec![1, 2, 3]).unwrap();
/// let back: Vec<i32> = codec.deserialize_from_str(&text).unwrap();
/// assert_eq!(back, vec![1, 2, 3]);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileCodec {
    format: Format,
    encoding: TextEncoding,
    omit_header: bool,
}

impl FileCodec {
    /// Create a codec writing UTF-8 YAML with a document header.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the text format.
    pub fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    /// Set the character encoding.
    pub fn with_encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Leave out the format header. Only YAML has one.
    pub fn omit_header(mut self, omit: bool) -> Self {
        self.omit_header = omit;
        self
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    /// Serialize a value to text.
    pub fn serialize_to_string<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        match self.format {
            Format::Yaml => {
                let body = serde_yaml::to_string(value).map_err(|e| CacheError::Serialize {
                    message: e.to_string(),
                })?;
                if self.omit_header {
                    Ok(body)
                } else {
                    Ok(format!("{}{}", YAML_HEADER, body))
                }
            }
            Format::Json => {
                let mut body =
                    serde_json::to_string_pretty(value).map_err(|e| CacheError::Serialize {
                        message: e.to_string(),
                    })?;
                body.push('\n');
                Ok(body)
            }
        }
    }

    /// Deserialize a value from text.
    pub fn deserialize_from_str<T: DeserializeOwned>(&self, text: &str) -> Result<T> {
        self.parse(text)
            .map_err(|message| CacheError::Deserialize { message })
    }

    /// Serialize a value to a file, replacing it atomically.
    ///
    /// The text is written to a sibling temp file and renamed over the
    /// target, so readers never observe a partially written file.
    pub fn serialize_to_file<T: Serialize + ?Sized>(&self, value: &T, path: &Path) -> Result<()> {
        let text = self.serialize_to_string(value)?;
        let bytes = self.encoding.encode(&text)?;

        let temp_path = temp_path_for(path);
        if let Err(e) = fs::write(&temp_path, &bytes).and_then(|()| fs::rename(&temp_path, path)) {
            let _ = fs::remove_file(&temp_path);
            return Err(e.into());
        }

        tracing::debug!("Wrote {} bytes to {:?}", bytes.len(), path);
        Ok(())
    }

    /// Deserialize a value from a file.
    ///
    /// Returns `Ok(None)` when the file does not exist.
    pub fn deserialize_from_file<T: DeserializeOwned>(&self, path: &Path) -> Result<Option<T>> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let corrupted = |message: String| CacheError::Corrupted {
            path: path.to_path_buf(),
            message,
        };

        let text = self
            .encoding
            .decode(&bytes)
            .map_err(|e| corrupted(e.to_string()))?;
        let value = self.parse(&text).map_err(corrupted)?;

        Ok(Some(value))
    }

    fn parse<T: DeserializeOwned>(&self, text: &str) -> std::result::Result<T, String> {
        match self.format {
            Format::Yaml => serde_yaml::from_str(text).map_err(|e| e.to_string()),
            Format::Json => serde_json::from_str(text).map_err(|e| e.to_string()),
        }
    }
}

/// Sibling path used while a file is being replaced.
pub(crate) fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(TEMP_SUFFIX);
    path.with_file_name(name)
}
