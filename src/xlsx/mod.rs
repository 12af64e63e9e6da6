//! XLSX (Office Open XML) workbook reader.
//!
//! XLSX files are ZIP archives of SpreadsheetML parts. Only what a tabular
//! corpus needs is read: the sheet list, the shared string table and the cell
//! text of one worksheet, streamed row by row.

mod container;
mod sheet;
mod workbook;
mod xml;

pub use container::XlsxContainer;
pub use sheet::{SheetRow, SheetRows};
pub use workbook::SheetInfo;

use crate::error::{Error, Result};
use container::{paths, resolve_target};
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;

/// An opened workbook with its shared strings loaded.
pub struct XlsxWorkbook<R: Read + Seek> {
    container: XlsxContainer<R>,
    shared_strings: Vec<String>,
    sheets: Vec<SheetEntry>,
}

/// A sheet name resolved to its part path.
#[derive(Debug, Clone)]
struct SheetEntry {
    name: String,
    path: String,
}

impl XlsxWorkbook<BufReader<File>> {
    /// Opens a workbook from a file path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let container = XlsxContainer::open(path)?;
        Self::from_container(container)
    }
}

impl XlsxWorkbook<Cursor<Vec<u8>>> {
    /// Opens a workbook from bytes.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        Self::from_container(XlsxContainer::from_bytes(data)?)
    }
}

impl<R: Read + Seek> XlsxWorkbook<R> {
    /// Resolves sheets and loads the shared string table.
    pub fn from_container(mut container: XlsxContainer<R>) -> Result<Self> {
        if !container.verify_content_types() {
            return Err(Error::UnsupportedFormat(
                "ZIP archive is not a spreadsheet package".into(),
            ));
        }

        let sheets = resolve_sheets(&mut container)?;
        let shared_strings = match container.open_part(paths::SHARED_STRINGS) {
            Ok(part) => workbook::parse_shared_strings(BufReader::new(part))?,
            // Workbooks with only inline strings or numbers have no table.
            Err(Error::MissingComponent(_)) => Vec::new(),
            Err(e) => return Err(e),
        };

        log::debug!(
            "Workbook has {} sheet(s), {} shared strings",
            sheets.len(),
            shared_strings.len()
        );

        Ok(Self {
            container,
            shared_strings,
            sheets,
        })
    }

    /// Sheet names in workbook order.
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    /// Number of shared strings loaded.
    pub fn shared_string_count(&self) -> usize {
        self.shared_strings.len()
    }

    /// Streams the rows of the first sheet. Each call starts from row 1.
    pub fn rows(&mut self) -> Result<SheetRows<'_>> {
        self.rows_at(0)
    }

    /// Streams the rows of the sheet at `index`.
    pub fn rows_at(&mut self, index: usize) -> Result<SheetRows<'_>> {
        let entry = self
            .sheets
            .get(index)
            .ok_or_else(|| Error::MissingComponent(format!("sheet #{}", index + 1)))?;

        let part = self.container.open_part(&entry.path)?;
        Ok(SheetRows::new(part, &self.shared_strings))
    }
}

/// Resolves declared sheets to part paths, falling back to scanning
/// `xl/worksheets/` when the workbook part or its relationships are absent.
fn resolve_sheets<R: Read + Seek>(container: &mut XlsxContainer<R>) -> Result<Vec<SheetEntry>> {
    let mut sheets = Vec::new();

    if let (Ok(workbook_xml), Ok(rels_xml)) = (
        container.read_file(paths::WORKBOOK_XML),
        container.read_file(paths::WORKBOOK_RELS),
    ) {
        let declared = workbook::parse_sheet_list(&workbook_xml)?;
        let rels = workbook::parse_relationships(&rels_xml)?;

        for info in declared {
            if let Some(target) = rels.get(&info.rel_id) {
                sheets.push(SheetEntry {
                    name: info.name,
                    path: resolve_target(target),
                });
            }
        }
    }

    if sheets.is_empty() {
        let mut parts = container.list_worksheets();
        if parts.is_empty() && container.file_exists(paths::FIRST_SHEET) {
            parts.push(paths::FIRST_SHEET.to_string());
        }
        sheets = parts
            .into_iter()
            .map(|path| SheetEntry {
                name: path
                    .rsplit('/')
                    .next()
                    .unwrap_or(&path)
                    .trim_end_matches(".xml")
                    .to_string(),
                path,
            })
            .collect();
    }

    if sheets.is_empty() {
        return Err(Error::MissingComponent("worksheet parts".into()));
    }

    Ok(sheets)
}
