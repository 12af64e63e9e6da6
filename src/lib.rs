//! # corpclean
//!
//! Cleansing of Korean-English parallel sentence corpora: reads AI Hub style
//! spreadsheets, filters low-quality or mismatched pairs, classifies the
//! survivors by difficulty, removes duplicate English sentences and emits a
//! fixed-schema CSV plus a statistics report.
//!
//! ## Supported Sources
//!
//! - **XLSX**: Office Open XML workbooks, read straight from the ZIP container
//! - **CSV**: exports of the same two column layouts (`legacy-encoding`
//!   feature adds EUC-KR / CP949 decoding)
//!
//! ## Quick Start
//!
//! ```no_run
//! use corpclean::{Pipeline, PipelineOptions};
//!
//! fn main() -> corpclean::Result<()> {
//!     let options = PipelineOptions::discover("data")?;
//!     let output = Pipeline::new(options).run("data")?;
//!
//!     corpclean::write_records("cleansed_sentences.csv", &output.records)?;
//!     println!("{}", output.report.to_text());
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - `legacy-encoding`: decode non-UTF-8 CSV sources as EUC-KR

pub mod classify;
pub mod dedup;
pub mod detect;
pub mod error;
pub mod filter;
pub mod model;
pub mod normalize;
pub mod options;
pub mod pipeline;
pub mod report;
pub mod serialize;
pub mod source;
pub mod xlsx;

// Re-exports
pub use classify::{classify_difficulty, classify_text};
pub use dedup::deduplicate;
pub use detect::{detect_format, detect_format_from_bytes, detect_format_from_path, FormatType};
pub use error::{Error, Result};
pub use filter::{check_pair, filter_sentence, FilterReason, FilterVerdict, PairCheck};
pub use model::{CandidateSentence, Difficulty, RawRecord, SentenceRecord};
pub use normalize::normalize_text;
pub use options::{FilterOptions, HeaderCheck, NormalizeOptions, PipelineOptions, CONFIG_FILE_NAME};
pub use pipeline::{Pipeline, PipelineOutput};
pub use report::{render_text, CorpusSummary, Report, SourceOutcome, SourceStats};
pub use serialize::{write_records, OUTPUT_COLUMNS};
pub use source::{SourceReader, SourceSchema, SourceSpec};

use std::path::Path;

/// Runs the pipeline over `data_dir` with `corpclean.toml` from that
/// directory, or the defaults when there is none.
///
/// # Example
///
/// ```no_run
/// let output = corpclean::cleanse_dir("data")?;
/// println!("{} sentences", output.records.len());
/// # Ok::<(), corpclean::Error>(())
/// ```
pub fn cleanse_dir(data_dir: impl AsRef<Path>) -> Result<PipelineOutput> {
    let data_dir = data_dir.as_ref();
    let options = PipelineOptions::discover(data_dir)?;
    Pipeline::new(options).run(data_dir)
}

/// Runs the pipeline and writes the CSV output and the text report.
///
/// Returns the report so callers can inspect the counts.
pub fn cleanse_to_files(
    data_dir: impl AsRef<Path>,
    options: PipelineOptions,
    output: impl AsRef<Path>,
    report_path: impl AsRef<Path>,
) -> Result<Report> {
    let result = Pipeline::new(options).run(data_dir)?;
    write_records(output, &result.records)?;

    let report_path = report_path.as_ref();
    std::fs::write(report_path, result.report.to_text()).map_err(|source| Error::OutputWrite {
        path: report_path.to_path_buf(),
        source,
    })?;

    Ok(result.report)
}
