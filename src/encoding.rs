//! Text encodings for persisted cache files and in-memory streams.

use encoding_rs::WINDOWS_1252;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CacheError, Result};

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];
const UTF16LE_BOM: [u8; 2] = [0xFF, 0xFE];

/// Character encoding used when turning text into bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextEncoding {
    /// UTF-8 without a byte-order mark.
    #[default]
    Utf8,
    /// ISO-8859-1: one byte per character, code points up to U+00FF only.
    Latin1,
    /// Windows-1252: Latin-1 plus typographic marks (`€`, `’`, `“`) in 0x80-0x9F.
    #[serde(rename = "windows1252", alias = "cp1252")]
    Windows1252,
    /// UTF-16 little endian, written with a byte-order mark.
    Utf16Le,
}

impl TextEncoding {
    /// Encode text into bytes.
    ///
    /// Fails with [`CacheError::Encoding`] when a character has no
    /// representation in this encoding.
    pub fn encode(self, text: &str) -> Result<Vec<u8>> {
        match self {
            TextEncoding::Utf8 => Ok(text.as_bytes().to_vec()),
            TextEncoding::Latin1 => text
                .chars()
                .map(|c| {
                    u8::try_from(u32::from(c)).map_err(|_| CacheError::Encoding {
                        encoding: self.to_string(),
                        message: format!("character {:?} is outside Latin-1", c),
                    })
                })
                .collect(),
            TextEncoding::Windows1252 => {
                let (bytes, _, unmappable) = WINDOWS_1252.encode(text);
                if unmappable {
                    return Err(CacheError::Encoding {
                        encoding: self.to_string(),
                        message: "text has characters outside windows-1252".to_string(),
                    });
                }
                Ok(bytes.into_owned())
            }
            TextEncoding::Utf16Le => {
                let mut bytes = Vec::with_capacity(2 + text.len() * 2);
                bytes.extend_from_slice(&UTF16LE_BOM);
                for unit in text.encode_utf16() {
                    bytes.extend_from_slice(&unit.to_le_bytes());
                }
                Ok(bytes)
            }
        }
    }

    /// Decode bytes back into text, skipping a leading byte-order mark.
    pub fn decode(self, bytes: &[u8]) -> Result<String> {
        match self {
            TextEncoding::Utf8 => {
                let bytes = bytes.strip_prefix(&UTF8_BOM).unwrap_or(bytes);
                String::from_utf8(bytes.to_vec()).map_err(|e| CacheError::Encoding {
                    encoding: self.to_string(),
                    message: e.to_string(),
                })
            }
            TextEncoding::Latin1 => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
            TextEncoding::Windows1252 => {
                let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
                Ok(text.into_owned())
            }
            TextEncoding::Utf16Le => {
                let bytes = bytes.strip_prefix(&UTF16LE_BOM).unwrap_or(bytes);
                if bytes.len() % 2 != 0 {
                    return Err(CacheError::Encoding {
                        encoding: self.to_string(),
                        message: "odd number of bytes".to_string(),
                    });
                }
                let units: Vec<u16> = bytes
                    .chunks_exact(2)
                    .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
                    .collect();
                String::from_utf16(&units).map_err(|e| CacheError::Encoding {
                    encoding: self.to_string(),
                    message: e.to_string(),
                })
            }
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Latin1 => "iso-8859-1",
            TextEncoding::Windows1252 => "windows-1252",
            TextEncoding::Utf16Le => "utf-16le",
        };
        f.write_str(label)
    }
}
