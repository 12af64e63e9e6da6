//! End-to-end cleansing run: read, filter, classify, deduplicate, summarize.

use crate::classify::classify_text;
use crate::dedup::deduplicate;
use crate::error::Result;
use crate::filter::{filter_sentence, FilterVerdict};
use crate::model::{CandidateSentence, RawRecord, SentenceRecord};
use crate::normalize::normalize_text;
use crate::options::PipelineOptions;
use crate::report::{Report, SourceOutcome, SourceStats};
use crate::source::{Field, SourceReader, SourceSchema, SourceSpec};
use rayon::prelude::*;
use std::path::Path;

/// Final records plus the report describing how they were produced.
#[derive(Debug)]
pub struct PipelineOutput {
    /// Deduplicated records in first-seen order.
    pub records: Vec<SentenceRecord>,
    pub report: Report,
}

/// Result of scanning one source.
#[derive(Debug)]
pub struct SourceScan {
    pub outcome: SourceOutcome,
    /// Passing records in row order.
    pub records: Vec<SentenceRecord>,
}

/// A configured cleansing run.
///
/// # Example
///
/// ```no_run
/// use corpclean::{Pipeline, PipelineOptions};
///
/// let output = Pipeline::new(PipelineOptions::default()).run("data")?;
/// corpclean::write_records("cleansed_sentences.csv", &output.records)?;
/// println!("{}", output.report.to_text());
/// # Ok::<(), corpclean::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    options: PipelineOptions,
}

impl Pipeline {
    pub fn new(options: PipelineOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Runs every configured source under `data_dir`.
    ///
    /// Missing source files are skipped and reported; any other error
    /// aborts the run.
    pub fn run(&self, data_dir: impl AsRef<Path>) -> Result<PipelineOutput> {
        let data_dir = data_dir.as_ref();
        self.options.validate()?;

        let scans: Vec<Result<SourceScan>> = if self.options.parallel {
            self.options
                .sources
                .par_iter()
                .map(|spec| self.scan_source(data_dir, spec))
                .collect()
        } else {
            self.options
                .sources
                .iter()
                .map(|spec| self.scan_source(data_dir, spec))
                .collect()
        };

        let mut outcomes = Vec::with_capacity(scans.len());
        let mut records = Vec::new();
        for scan in scans {
            let scan = scan?;
            outcomes.push(scan.outcome);
            records.extend(scan.records);
        }

        let pre_dedup = records.len();
        let records = deduplicate(records);
        log::info!(
            "Deduplicated {} -> {} sentences ({} removed)",
            pre_dedup,
            records.len(),
            pre_dedup - records.len()
        );

        let report = Report::new(self.options.filter.clone(), outcomes, pre_dedup, &records);
        Ok(PipelineOutput { records, report })
    }

    /// Reads and evaluates every data row of one source.
    pub fn scan_source(&self, data_dir: &Path, spec: &SourceSpec) -> Result<SourceScan> {
        let path = spec.path_in(data_dir);

        let mut reader = match SourceReader::open(&path, spec.schema, self.options.header_check) {
            Ok(reader) => reader,
            Err(e) if e.is_partial() => {
                log::warn!("{}; skipping {}", e, spec.label);
                return Ok(SourceScan {
                    outcome: SourceOutcome::Missing {
                        label: spec.label.clone(),
                        file: spec.file_name(),
                    },
                    records: Vec::new(),
                });
            }
            Err(e) => return Err(e),
        };

        let mut stats = SourceStats::new(&spec.label, spec.file_name());
        let mut records = Vec::new();

        for raw in reader.records()? {
            let raw = raw?;
            let (verdict, record) = evaluate_row(&raw, spec.schema, &spec.label, &self.options);
            stats.record(&verdict);
            records.extend(record);
        }

        log::info!(
            "{}: {} rows, {} passed ({:.1}%)",
            spec.label,
            stats.total,
            stats.passed,
            stats.pass_rate()
        );
        if stats.passed == 0 {
            log::warn!("{} produced no passing rows", spec.label);
        }

        Ok(SourceScan {
            outcome: SourceOutcome::Scanned(stats),
            records,
        })
    }
}

/// Evaluates one raw row: normalize, filter, then classify if it passed.
///
/// The filter sees normalized but untrimmed cell text, so whitespace-only
/// cells are told apart from absent ones.
pub fn evaluate_row(
    raw: &RawRecord,
    schema: SourceSchema,
    label: &str,
    options: &PipelineOptions,
) -> (FilterVerdict, Option<SentenceRecord>) {
    let descriptor = schema.descriptor();
    let english = normalize_text(descriptor.extract(raw, Field::English), &options.normalize);
    let korean = normalize_text(descriptor.extract(raw, Field::Korean), &options.normalize);

    let verdict = filter_sentence(&english, &korean, &options.filter);
    if !verdict.passed {
        return (verdict, None);
    }

    let (category, subcategory) = schema.categories(raw);
    let candidate = CandidateSentence::new(&english, &korean).with_category(category, subcategory);
    let record = SentenceRecord::new(
        &candidate.english_text,
        &candidate.korean_text,
        classify_text(&candidate.english_text),
        candidate.category,
        candidate.subcategory,
        label,
    );
    (verdict, record)
}
