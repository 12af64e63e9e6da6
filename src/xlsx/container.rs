//! ZIP container wrapper for XLSX workbooks.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;
use zip::ZipArchive;

/// Workbook part paths.
pub(crate) mod paths {
    pub const CONTENT_TYPES: &str = "[Content_Types].xml";
    pub const WORKBOOK_XML: &str = "xl/workbook.xml";
    pub const WORKBOOK_RELS: &str = "xl/_rels/workbook.xml.rels";
    pub const SHARED_STRINGS: &str = "xl/sharedStrings.xml";
    pub const FIRST_SHEET: &str = "xl/worksheets/sheet1.xml";
    pub const XL_DIR: &str = "xl/";
}

/// ZIP container wrapper for XLSX files.
///
/// Parts are read on demand; sheet parts are handed out as streaming readers
/// so large sheets are never held in memory as a whole.
pub struct XlsxContainer<R: Read + Seek> {
    archive: ZipArchive<R>,
}

impl XlsxContainer<BufReader<File>> {
    /// Opens an XLSX container from a file path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => Error::MissingSourceFile(path.to_path_buf()),
            _ => Error::Io(e),
        })?;
        Self::from_reader(BufReader::new(file))
    }
}

impl XlsxContainer<Cursor<Vec<u8>>> {
    /// Opens an XLSX container from bytes.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        Self::from_reader(Cursor::new(data))
    }
}

impl<R: Read + Seek> XlsxContainer<R> {
    /// Opens an XLSX container from a seekable reader.
    pub fn from_reader(reader: R) -> Result<Self> {
        let archive = ZipArchive::new(reader)?;
        Ok(Self { archive })
    }

    /// Verifies this looks like a spreadsheet package.
    pub fn verify_content_types(&mut self) -> bool {
        match self.read_file(paths::CONTENT_TYPES) {
            Ok(content) => content.contains("spreadsheetml"),
            // Some writers omit content types; fall back to the workbook part.
            Err(_) => self.file_exists(paths::WORKBOOK_XML),
        }
    }

    /// Reads a part from the archive as UTF-8 string.
    pub fn read_file(&mut self, path: &str) -> Result<String> {
        let mut file = self
            .archive
            .by_name(path)
            .map_err(|_| Error::MissingComponent(path.to_string()))?;

        let mut content = String::new();
        file.read_to_string(&mut content)?;
        Ok(content)
    }

    /// Opens a part as a streaming reader.
    pub fn open_part(&mut self, path: &str) -> Result<Box<dyn Read + '_>> {
        let file = self
            .archive
            .by_name(path)
            .map_err(|_| Error::MissingComponent(path.to_string()))?;
        Ok(Box::new(file))
    }

    /// Checks if a part exists in the archive.
    pub fn file_exists(&mut self, path: &str) -> bool {
        self.archive.by_name(path).is_ok()
    }

    /// Lists worksheet parts by name, sorted.
    pub fn list_worksheets(&self) -> Vec<String> {
        let mut sheets: Vec<String> = self
            .archive
            .file_names()
            .filter(|name| name.starts_with("xl/worksheets/") && name.ends_with(".xml"))
            .map(str::to_string)
            .collect();
        sheets.sort();
        sheets
    }
}

/// Resolves a relationship target against the `xl/` directory.
pub(crate) fn resolve_target(target: &str) -> String {
    if let Some(absolute) = target.strip_prefix('/') {
        absolute.to_string()
    } else if target.starts_with(paths::XL_DIR) {
        target.to_string()
    } else {
        format!("{}{}", paths::XL_DIR, target.trim_start_matches("./"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_target() {
        assert_eq!(
            resolve_target("worksheets/sheet1.xml"),
            "xl/worksheets/sheet1.xml"
        );
        assert_eq!(
            resolve_target("/xl/worksheets/sheet2.xml"),
            "xl/worksheets/sheet2.xml"
        );
        assert_eq!(
            resolve_target("./worksheets/sheet3.xml"),
            "xl/worksheets/sheet3.xml"
        );
        assert_eq!(
            resolve_target("xl/worksheets/sheet4.xml"),
            "xl/worksheets/sheet4.xml"
        );
    }

    #[test]
    fn test_not_a_zip() {
        let result = XlsxContainer::from_bytes(b"definitely not a zip archive".to_vec());
        assert!(matches!(result, Err(Error::ZipArchive(_))));
    }
}
