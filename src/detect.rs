//! Format detection for source spreadsheets.

use crate::error::{Error, Result};
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

/// Magic bytes for ZIP archive (OOXML workbook)
const ZIP_MAGIC: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];

/// Magic bytes for OLE Compound File (legacy BIFF workbook)
const OLE_MAGIC: [u8; 8] = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

/// Supported source format types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatType {
    /// Office Open XML workbook (`.xlsx`)
    Xlsx,
    /// Comma-separated export (`.csv`)
    Csv,
}

impl std::fmt::Display for FormatType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatType::Xlsx => write!(f, "XLSX"),
            FormatType::Csv => write!(f, "CSV"),
        }
    }
}

/// Detect source format from a file path.
///
/// Binary signatures take precedence; text files are recognized by extension.
pub fn detect_format_from_path(path: impl AsRef<Path>) -> Result<FormatType> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::MissingSourceFile(path.to_path_buf()));
    }

    let mut file = std::fs::File::open(path)?;
    match detect_format(&mut file) {
        Err(Error::UnknownFormat) | Err(Error::InvalidData(_)) if has_csv_extension(path) => {
            Ok(FormatType::Csv)
        }
        other => other,
    }
}

/// Detect source format from a reader by its signature.
pub fn detect_format<R: Read + Seek>(reader: &mut R) -> Result<FormatType> {
    let mut buffer = [0u8; 8];

    reader.seek(SeekFrom::Start(0))?;
    let bytes_read = read_up_to(reader, &mut buffer)?;
    reader.seek(SeekFrom::Start(0))?;

    detect_format_from_bytes(&buffer[..bytes_read])
}

/// Detect source format from leading bytes.
pub fn detect_format_from_bytes(data: &[u8]) -> Result<FormatType> {
    if data.len() < 4 {
        return Err(Error::InvalidData("File too small".into()));
    }

    if data[..4] == ZIP_MAGIC {
        return Ok(FormatType::Xlsx);
    }

    if data.len() >= 8 && data[..8] == OLE_MAGIC {
        return Err(Error::UnsupportedFormat(
            "legacy BIFF .xls workbook; re-save as .xlsx".into(),
        ));
    }

    Err(Error::UnknownFormat)
}

fn has_csv_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("csv"))
        .unwrap_or(false)
}

fn read_up_to<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..])? {
            0 => break,
            n => filled += n,
        }
    }
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_zip_magic() {
        let data = [0x50, 0x4B, 0x03, 0x04, 0x14, 0x00, 0x00, 0x00];
        assert_eq!(detect_format_from_bytes(&data).unwrap(), FormatType::Xlsx);
    }

    #[test]
    fn test_detect_legacy_xls() {
        let data = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1, 0x00];
        assert!(matches!(
            detect_format_from_bytes(&data),
            Err(Error::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_detect_unknown() {
        let data = b"id,korean,english\n";
        let result = detect_format_from_bytes(data);
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_csv_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spoken.csv");
        std::fs::write(&path, "SID,원문,번역문\n1,가자,Let's go\n").unwrap();
        assert_eq!(detect_format_from_path(&path).unwrap(), FormatType::Csv);

        let tiny = dir.path().join("tiny.CSV");
        std::fs::write(&tiny, "a").unwrap();
        assert_eq!(detect_format_from_path(&tiny).unwrap(), FormatType::Csv);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = detect_format_from_path(dir.path().join("nope.xlsx"));
        assert!(matches!(result, Err(Error::MissingSourceFile(_))));
    }
}
