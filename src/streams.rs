//! In-memory streams built from strings.

use std::io::{Cursor, Read, Seek, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::encoding::TextEncoding;
use crate::error::Result;

/// Encoding of the text stored inside compressed streams.
const ENTRY_ENCODING: TextEncoding = TextEncoding::Utf16Le;

/// Build a readable stream holding `text` in the given encoding.
pub fn stream_from_string(text: &str, encoding: TextEncoding) -> Result<Cursor<Vec<u8>>> {
    Ok(Cursor::new(encoding.encode(text)?))
}

/// Build a zip archive with a single entry `file_name` containing `text`.
///
/// The entry is deflated and holds UTF-16LE text with a byte-order mark.
/// The returned cursor is positioned at the start of the archive.
pub fn compressed_stream_from_string(file_name: &str, text: &str) -> Result<Cursor<Vec<u8>>> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    zip.start_file(file_name, options)?;
    zip.write_all(&ENTRY_ENCODING.encode(text)?)?;

    let mut cursor = zip.finish()?;
    cursor.set_position(0);
    Ok(cursor)
}

/// Read back the text of entry `file_name` from an archive made by
/// [`compressed_stream_from_string`].
pub fn read_compressed_string<R: Read + Seek>(reader: R, file_name: &str) -> Result<String> {
    let mut archive = ZipArchive::new(reader)?;
    let mut entry = archive.by_name(file_name)?;

    let mut bytes = Vec::new();
    entry.read_to_end(&mut bytes)?;

    ENTRY_ENCODING.decode(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CacheError;

    #[test]
    fn plain_stream_starts_at_zero() {
        let mut stream = stream_from_string("hello", TextEncoding::Utf8).unwrap();
        let mut out = String::new();
        stream.read_to_string(&mut out).unwrap();
        assert_eq!(out, "hello");
    }

    #[test]
    fn zip_has_single_named_entry() {
        let stream = compressed_stream_from_string("report.csv", "a,b\n1,2\n").unwrap();
        assert_eq!(stream.position(), 0);

        let archive = ZipArchive::new(stream).unwrap();
        assert_eq!(archive.len(), 1);
        assert_eq!(archive.file_names().collect::<Vec<_>>(), vec!["report.csv"]);
    }

    #[test]
    fn zip_entry_holds_utf16_text() {
        let stream = compressed_stream_from_string("notes.txt", "naïve").unwrap();

        let mut archive = ZipArchive::new(stream.clone()).unwrap();
        let mut raw = Vec::new();
        archive
            .by_name("notes.txt")
            .unwrap()
            .read_to_end(&mut raw)
            .unwrap();
        assert_eq!(&raw[..2], &[0xFF, 0xFE]);

        assert_eq!(read_compressed_string(stream, "notes.txt").unwrap(), "naïve");
    }

    #[test]
    fn missing_entry_is_zip_error() {
        let stream = compressed_stream_from_string("a.txt", "x").unwrap();
        let err = read_compressed_string(stream, "b.txt").unwrap_err();
        assert!(matches!(err, CacheError::Zip(_)));
    }
}
