//! Source schemas and their column descriptors.

use crate::error::{Error, Result};
use crate::model::RawRecord;
use crate::options::HeaderCheck;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Category assigned to spoken-corpus rows.
pub const DEFAULT_SPOKEN_CATEGORY: &str = "DAILY";

/// Column layout of an input spreadsheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceSchema {
    /// `[id, korean, english]`
    Spoken,
    /// `[major_category, minor_category, situation, set_id, speaker, korean, english]`
    Dialog,
}

impl SourceSchema {
    /// The column descriptor for this schema.
    pub fn descriptor(&self) -> &'static SchemaDescriptor {
        match self {
            SourceSchema::Spoken => &SPOKEN,
            SourceSchema::Dialog => &DIALOG,
        }
    }

    /// Category and subcategory carried by a row of this schema.
    pub fn categories(&self, raw: &RawRecord) -> (String, String) {
        match self {
            SourceSchema::Spoken => (DEFAULT_SPOKEN_CATEGORY.to_string(), String::new()),
            SourceSchema::Dialog => {
                let d = self.descriptor();
                (
                    d.extract(raw, Field::MajorCategory).trim().to_string(),
                    d.extract(raw, Field::MinorCategory).trim().to_string(),
                )
            }
        }
    }
}

impl fmt::Display for SourceSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceSchema::Spoken => write!(f, "SPOKEN"),
            SourceSchema::Dialog => write!(f, "DIALOG"),
        }
    }
}

/// Logical field names used across schemas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Id,
    MajorCategory,
    MinorCategory,
    Situation,
    SetId,
    Speaker,
    Korean,
    English,
}

impl Field {
    pub fn name(&self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::MajorCategory => "major_category",
            Field::MinorCategory => "minor_category",
            Field::Situation => "situation",
            Field::SetId => "set_id",
            Field::Speaker => "speaker",
            Field::Korean => "korean",
            Field::English => "english",
        }
    }
}

/// One column of a schema: logical field, position and accepted header labels.
#[derive(Debug)]
pub struct ColumnSpec {
    pub field: Field,
    pub index: usize,
    pub header_aliases: &'static [&'static str],
}

/// Explicit mapping from logical field to column index.
#[derive(Debug)]
pub struct SchemaDescriptor {
    pub schema: SourceSchema,
    pub columns: &'static [ColumnSpec],
}

const KOREAN_ALIASES: &[&str] = &["원문", "한국어", "korean", "ko"];
const ENGLISH_ALIASES: &[&str] = &["번역문", "영어", "english", "en"];

static SPOKEN: SchemaDescriptor = SchemaDescriptor {
    schema: SourceSchema::Spoken,
    columns: &[
        ColumnSpec {
            field: Field::Id,
            index: 0,
            header_aliases: &["SID", "ID", "번호"],
        },
        ColumnSpec {
            field: Field::Korean,
            index: 1,
            header_aliases: KOREAN_ALIASES,
        },
        ColumnSpec {
            field: Field::English,
            index: 2,
            header_aliases: ENGLISH_ALIASES,
        },
    ],
};

static DIALOG: SchemaDescriptor = SchemaDescriptor {
    schema: SourceSchema::Dialog,
    columns: &[
        ColumnSpec {
            field: Field::MajorCategory,
            index: 0,
            header_aliases: &["대분류", "major_category", "major"],
        },
        ColumnSpec {
            field: Field::MinorCategory,
            index: 1,
            header_aliases: &["소분류", "minor_category", "minor"],
        },
        ColumnSpec {
            field: Field::Situation,
            index: 2,
            header_aliases: &["상황", "situation"],
        },
        ColumnSpec {
            field: Field::SetId,
            index: 3,
            header_aliases: &["Set Nr.", "Set Nr", "set_id", "set"],
        },
        ColumnSpec {
            field: Field::Speaker,
            index: 4,
            header_aliases: &["발화자", "speaker"],
        },
        ColumnSpec {
            field: Field::Korean,
            index: 5,
            header_aliases: KOREAN_ALIASES,
        },
        ColumnSpec {
            field: Field::English,
            index: 6,
            header_aliases: ENGLISH_ALIASES,
        },
    ],
};

impl SchemaDescriptor {
    /// Number of columns the schema spans.
    pub fn width(&self) -> usize {
        self.columns.iter().map(|c| c.index + 1).max().unwrap_or(0)
    }

    /// Column index of a logical field.
    pub fn index_of(&self, field: Field) -> Option<usize> {
        self.columns
            .iter()
            .find(|c| c.field == field)
            .map(|c| c.index)
    }

    /// Value of `field` in `raw`; absent fields and short rows yield `""`.
    pub fn extract<'r>(&self, raw: &'r RawRecord, field: Field) -> &'r str {
        match self.index_of(field) {
            Some(index) => raw.cell(index),
            None => "",
        }
    }

    /// Checks a header row against this descriptor.
    pub fn validate_header(
        &self,
        path: &Path,
        header: &[String],
        check: HeaderCheck,
    ) -> Result<()> {
        let width = self.width();
        let populated = header
            .iter()
            .rposition(|h| !h.trim().is_empty())
            .map_or(0, |i| i + 1);

        if populated < width {
            return Err(Error::SchemaMismatch {
                path: path.to_path_buf(),
                message: format!(
                    "{} schema expects {} columns, header has {}",
                    self.schema, width, populated
                ),
            });
        }

        if check == HeaderCheck::Lenient {
            return Ok(());
        }

        for column in self.columns {
            // CSV exports from Excel lead with a BOM
            let label = header[column.index].trim().trim_start_matches('\u{feff}');
            let known = column
                .header_aliases
                .iter()
                .any(|alias| alias.eq_ignore_ascii_case(label));
            if !known {
                return Err(Error::SchemaMismatch {
                    path: path.to_path_buf(),
                    message: format!(
                        "column {} should hold {} (one of {:?}), found '{}'",
                        column.index + 1,
                        column.field.name(),
                        column.header_aliases,
                        label
                    ),
                });
            }
        }

        Ok(())
    }
}
