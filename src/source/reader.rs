//! Schema-validated record readers over workbook and CSV sources.

use super::csv_export::CsvSheet;
use super::SourceSchema;
use crate::detect::{detect_format_from_path, FormatType};
use crate::error::Result;
use crate::model::RawRecord;
use crate::options::HeaderCheck;
use crate::xlsx::{SheetRow, XlsxWorkbook};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Boxed row stream borrowed from an open source.
pub type RowIter<'a> = Box<dyn Iterator<Item = Result<SheetRow>> + 'a>;

/// Boxed record stream borrowed from a [`SourceReader`].
pub type RecordIter<'a> = Box<dyn Iterator<Item = Result<RawRecord>> + 'a>;

/// Rows of a source file, independent of any schema.
pub enum RowSource {
    Xlsx(XlsxWorkbook<BufReader<File>>),
    Csv(CsvSheet),
}

impl RowSource {
    /// Opens a file after detecting its format.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match detect_format_from_path(path)? {
            FormatType::Xlsx => Ok(RowSource::Xlsx(XlsxWorkbook::open(path)?)),
            FormatType::Csv => Ok(RowSource::Csv(CsvSheet::open(path)?)),
        }
    }

    pub fn format(&self) -> FormatType {
        match self {
            RowSource::Xlsx(_) => FormatType::Xlsx,
            RowSource::Csv(_) => FormatType::Csv,
        }
    }

    /// Streams every row, header included, from the top.
    pub fn rows(&mut self) -> Result<RowIter<'_>> {
        match self {
            RowSource::Xlsx(workbook) => Ok(Box::new(workbook.rows()?)),
            RowSource::Csv(sheet) => Ok(Box::new(sheet.rows()?)),
        }
    }

    /// Reads row 1 only.
    pub fn header(&mut self) -> Result<Vec<String>> {
        let first = self.rows()?.next().transpose()?;
        Ok(first.map(|row| row.cells).unwrap_or_default())
    }
}

/// Reader producing [`RawRecord`]s for one source file under one schema.
///
/// The header row is validated against the schema descriptor when the
/// reader is opened. [`SourceReader::records`] may be called repeatedly;
/// each call restarts from the first data row.
pub struct SourceReader {
    path: PathBuf,
    schema: SourceSchema,
    source: RowSource,
    header: Vec<String>,
}

impl SourceReader {
    /// Opens `path` and validates its header row against `schema`.
    ///
    /// Returns [`crate::Error::MissingSourceFile`] if the file is absent and
    /// [`crate::Error::SchemaMismatch`] if the header does not fit.
    pub fn open(path: impl AsRef<Path>, schema: SourceSchema, check: HeaderCheck) -> Result<Self> {
        let path = path.as_ref();
        let mut source = RowSource::open(path)?;
        let header = source.header()?;

        schema
            .descriptor()
            .validate_header(path, &header, check)?;

        log::info!(
            "Opened {} ({} source, {} schema)",
            path.display(),
            source.format(),
            schema
        );

        Ok(Self {
            path: path.to_path_buf(),
            schema,
            source,
            header,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn schema(&self) -> SourceSchema {
        self.schema
    }

    /// The header row as read at open time.
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Streams data rows, skipping the header row.
    pub fn records(&mut self) -> Result<RecordIter<'_>> {
        let rows = self.source.rows()?;
        Ok(Box::new(rows.skip(1).map(|row| {
            row.map(|row| RawRecord::new(row.number, row.cells))
        })))
    }
}
