//! Run statistics and the cleansing report.
//!
//! The report is a plain value assembled from what each stage returns.
//! [`render_text`] turns it into the human-readable report; serde turns it
//! into JSON.

mod stats;
mod summary;
mod text;

pub use stats::{SourceOutcome, SourceStats};
pub use summary::{Breakdown, BreakdownEntry, CorpusSummary};
pub use text::{render_text, thousands};

use crate::model::SentenceRecord;
use crate::options::FilterOptions;
use serde::Serialize;

/// Everything known about one pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Thresholds the run used.
    pub filter: FilterOptions,
    /// One outcome per configured source, in configured order.
    pub sources: Vec<SourceOutcome>,
    /// Passing sentences before deduplication.
    pub pre_dedup: usize,
    /// Sentences written to the output file.
    pub post_dedup: usize,
    pub summary: CorpusSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<String>,
}

impl Report {
    /// Builds a report; `records` is the deduplicated output.
    pub fn new(
        filter: FilterOptions,
        sources: Vec<SourceOutcome>,
        pre_dedup: usize,
        records: &[SentenceRecord],
    ) -> Self {
        Self {
            filter,
            sources,
            pre_dedup,
            post_dedup: records.len(),
            summary: CorpusSummary::from_records(records),
            generated_at: None,
        }
    }

    pub fn with_generated_at(mut self, timestamp: impl Into<String>) -> Self {
        self.generated_at = Some(timestamp.into());
        self
    }

    pub fn duplicates_removed(&self) -> usize {
        self.pre_dedup - self.post_dedup
    }

    /// Counters of every scanned source folded into one.
    pub fn combined_stats(&self) -> SourceStats {
        let mut combined = SourceStats::new("ALL", "");
        for stats in self.sources.iter().filter_map(SourceOutcome::stats) {
            combined.merge(stats);
        }
        combined
    }

    /// Rows seen across all scanned sources.
    pub fn total_rows(&self) -> usize {
        self.combined_stats().total
    }

    pub fn missing_sources(&self) -> impl Iterator<Item = &SourceOutcome> {
        self.sources.iter().filter(|s| s.is_missing())
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn to_text(&self) -> String {
        render_text(self)
    }
}
