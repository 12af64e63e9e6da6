//! Input sources: schema descriptors, the source catalog and record readers.

mod catalog;
mod csv_export;
mod reader;
mod schema;

pub use catalog::SourceSpec;
pub use csv_export::CsvSheet;
pub use reader::{RecordIter, RowIter, RowSource, SourceReader};
pub use schema::{ColumnSpec, Field, SchemaDescriptor, SourceSchema, DEFAULT_SPOKEN_CATEGORY};
