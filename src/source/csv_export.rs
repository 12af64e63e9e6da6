//! CSV exports of the source spreadsheets.

use crate::error::{Error, Result};
use crate::xlsx::SheetRow;
use std::path::{Path, PathBuf};

/// A CSV file read with the same row semantics as a worksheet.
pub struct CsvSheet {
    path: PathBuf,
}

impl CsvSheet {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::MissingSourceFile(path.to_path_buf()));
        }
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    /// Streams rows from the start of the file. Ragged rows are allowed.
    pub fn rows(&mut self) -> Result<impl Iterator<Item = Result<SheetRow>>> {
        let reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&self.path)?;

        Ok(reader
            .into_byte_records()
            .enumerate()
            .map(|(i, record)| {
                let record = record?;
                let cells = record
                    .iter()
                    .map(decode_field)
                    .collect::<Result<Vec<_>>>()?;
                Ok(SheetRow {
                    number: i + 1,
                    cells,
                })
            }))
    }
}

fn decode_field(bytes: &[u8]) -> Result<String> {
    match std::str::from_utf8(bytes) {
        Ok(s) => Ok(s.to_string()),
        Err(e) => decode_legacy(bytes).ok_or_else(|| Error::Encoding(e.to_string())),
    }
}

/// Decodes EUC-KR / CP949 text, the usual encoding of Korean CSV exports.
#[cfg(feature = "legacy-encoding")]
fn decode_legacy(bytes: &[u8]) -> Option<String> {
    let (text, _, had_errors) = encoding_rs::EUC_KR.decode(bytes);
    if had_errors {
        None
    } else {
        Some(text.into_owned())
    }
}

#[cfg(not(feature = "legacy-encoding"))]
fn decode_legacy(_bytes: &[u8]) -> Option<String> {
    None
}
