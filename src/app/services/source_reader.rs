//! Reading and decoding of report export files
//!
//! The legacy system writes its exports as UTF-16LE text with a byte order
//! mark. Decoding is strict: an odd byte count or an unpaired surrogate is an
//! error rather than a replacement character.

use std::path::Path;
use tracing::debug;

use crate::config::SourceEncoding;
use crate::{Error, Result};

const BYTE_ORDER_MARK: &str = "\u{feff}";

/// Read an export file into lines without terminators
pub fn read_report_lines(path: &Path, encoding: SourceEncoding) -> Result<Vec<String>> {
    let bytes = std::fs::read(path)
        .map_err(|e| Error::io(format!("Failed to read {}", path.display()), e))?;

    let text = decode(&bytes, encoding)
        .map_err(|message| Error::decoding(path.display().to_string(), message))?;
    let lines = split_lines(&text);

    debug!(
        "Read {} lines from {} ({:?})",
        lines.len(),
        path.display(),
        encoding
    );
    Ok(lines)
}

/// Decode raw file content with the given encoding
pub fn decode(bytes: &[u8], encoding: SourceEncoding) -> std::result::Result<String, String> {
    let text = match encoding {
        SourceEncoding::Utf16Le => decode_utf16le(bytes)?,
        SourceEncoding::Utf8 => String::from_utf8(bytes.to_vec())
            .map_err(|e| format!("invalid UTF-8: {}", e))?,
    };

    Ok(match text.strip_prefix(BYTE_ORDER_MARK) {
        Some(stripped) => stripped.to_string(),
        None => text,
    })
}

fn decode_utf16le(bytes: &[u8]) -> std::result::Result<String, String> {
    if bytes.len() % 2 != 0 {
        return Err(format!(
            "odd byte count {} is not valid UTF-16LE",
            bytes.len()
        ));
    }

    let units = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]));

    char::decode_utf16(units)
        .enumerate()
        .map(|(index, unit)| {
            unit.map_err(|e| {
                format!(
                    "unpaired surrogate {:#06x} at character {}",
                    e.unpaired_surrogate(),
                    index
                )
            })
        })
        .collect()
}

/// Split text into lines, dropping `\n` and `\r\n` terminators
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn utf16le(text: &str, bom: bool) -> Vec<u8> {
        let mut bytes = Vec::new();
        if bom {
            bytes.extend_from_slice(&[0xFF, 0xFE]);
        }
        for unit in text.encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        bytes
    }

    #[test]
    fn test_decode_utf16le_strips_bom() {
        let bytes = utf16le("Valoración Coste\r\nLÓPEZ\r\n", true);

        let text = decode(&bytes, SourceEncoding::Utf16Le).unwrap();

        assert_eq!(text, "Valoración Coste\r\nLÓPEZ\r\n");
        assert_eq!(split_lines(&text), vec!["Valoración Coste", "LÓPEZ"]);
    }

    #[test]
    fn test_decode_utf16le_rejects_odd_length() {
        let mut bytes = utf16le("abc", false);
        bytes.push(0x41);

        let error = decode(&bytes, SourceEncoding::Utf16Le).unwrap_err();
        assert!(error.contains("odd byte count 7"));
    }

    #[test]
    fn test_decode_utf16le_rejects_unpaired_surrogate() {
        let bytes = [0x41, 0x00, 0x00, 0xD8, 0x41, 0x00];

        let error = decode(&bytes, SourceEncoding::Utf16Le).unwrap_err();
        assert!(error.contains("unpaired surrogate"));
        assert!(error.contains("character 1"));
    }

    #[test]
    fn test_decode_utf8_strips_bom() {
        let text = decode("\u{feff}línea\n".as_bytes(), SourceEncoding::Utf8).unwrap();
        assert_eq!(text, "línea\n");
    }

    #[test]
    fn test_split_lines_keeps_blank_lines() {
        assert_eq!(
            split_lines("a\n\n\r\nb"),
            vec!["a".to_string(), String::new(), String::new(), "b".to_string()]
        );
        assert!(split_lines("").is_empty());
    }

    #[test]
    fn test_read_report_lines_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&utf16le("uno\r\ndos\r\n", true)).unwrap();

        let lines = read_report_lines(file.path(), SourceEncoding::Utf16Le).unwrap();

        assert_eq!(lines, vec!["uno", "dos"]);
    }

    #[test]
    fn test_read_report_lines_reports_file_on_decode_failure() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[0x41, 0x00, 0x42]).unwrap();

        let error = read_report_lines(file.path(), SourceEncoding::Utf16Le).unwrap_err();

        assert!(matches!(error, Error::Decoding { .. }));
    }

    #[test]
    fn test_read_missing_file_is_io_error() {
        let error = read_report_lines(Path::new("/nonexistent/240117coste.txt"), SourceEncoding::Utf8)
            .unwrap_err();

        assert!(matches!(error, Error::Io { .. }));
    }
}
