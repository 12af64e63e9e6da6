//! Error types for corpclean library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for corpclean operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for corpclean library.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A configured source file does not exist.
    ///
    /// The pipeline treats this as a partial failure: the source is skipped
    /// and reported as missing.
    #[error("Source file not found: {}", .0.display())]
    MissingSourceFile(PathBuf),

    /// The file format is not recognized.
    #[error("Unknown file format")]
    UnknownFormat,

    /// The file format is recognized but not supported (e.g., BIFF `.xls`).
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The header row does not fit the schema descriptor.
    #[error("Schema mismatch in {}: {message}", path.display())]
    SchemaMismatch { path: PathBuf, message: String },

    /// Invalid or malformed data.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// ZIP archive parsing error.
    #[error("ZIP archive error: {0}")]
    ZipArchive(String),

    /// XML parsing error in a workbook part.
    #[error("XML parsing error: {0}")]
    XmlParse(String),

    /// Required workbook part is missing.
    #[error("Missing required component: {0}")]
    MissingComponent(String),

    /// Text encoding error.
    #[error("Text encoding error: {0}")]
    Encoding(String),

    /// CSV reading error.
    #[error("CSV error: {0}")]
    Csv(String),

    /// Invalid or unparsable configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The output data file or report could not be created or written.
    #[error("Cannot write {}: {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    /// Returns true for errors the pipeline recovers from by skipping a source.
    pub fn is_partial(&self) -> bool {
        matches!(self, Error::MissingSourceFile(_))
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::ZipArchive(err.to_string())
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::XmlParse(err.to_string())
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Csv(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::InvalidConfig(err.to_string())
    }
}

impl From<std::str::Utf8Error> for Error {
    fn from(err: std::str::Utf8Error) -> Self {
        Error::Encoding(err.to_string())
    }
}
