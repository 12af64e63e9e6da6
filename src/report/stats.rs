//! Per-source scan counters.

use crate::filter::{FilterReason, FilterVerdict};
use serde::Serialize;
use std::collections::BTreeMap;

/// Counters for one source file, filled while its rows are scanned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SourceStats {
    pub label: String,
    pub file: String,
    /// Data rows seen (header excluded).
    pub total: usize,
    pub passed: usize,
    /// Rejection counts; `ok` never appears here.
    pub reasons: BTreeMap<FilterReason, usize>,
}

impl SourceStats {
    pub fn new(label: impl Into<String>, file: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            file: file.into(),
            ..Default::default()
        }
    }

    /// Counts one evaluated row.
    pub fn record(&mut self, verdict: &FilterVerdict) {
        self.total += 1;
        if verdict.passed {
            self.passed += 1;
        } else {
            *self.reasons.entry(verdict.reason).or_insert(0) += 1;
        }
    }

    /// Adds another worker's counters for the same source.
    pub fn merge(&mut self, other: &SourceStats) {
        self.total += other.total;
        self.passed += other.passed;
        for (reason, count) in &other.reasons {
            *self.reasons.entry(*reason).or_insert(0) += count;
        }
    }

    pub fn rejected(&self) -> usize {
        self.total - self.passed
    }

    /// Pass rate in percent; 0 for an empty source.
    pub fn pass_rate(&self) -> f64 {
        percent(self.passed, self.total)
    }

    /// Rejection reasons by descending count, ties by reason code.
    pub fn sorted_reasons(&self) -> Vec<(FilterReason, usize)> {
        let mut reasons: Vec<(FilterReason, usize)> =
            self.reasons.iter().map(|(r, c)| (*r, *c)).collect();
        reasons.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.code().cmp(b.0.code())));
        reasons
    }
}

/// What happened to one configured source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SourceOutcome {
    Scanned(SourceStats),
    /// The file was absent; it contributes zero rows.
    Missing { label: String, file: String },
}

impl SourceOutcome {
    pub fn label(&self) -> &str {
        match self {
            SourceOutcome::Scanned(stats) => &stats.label,
            SourceOutcome::Missing { label, .. } => label,
        }
    }

    pub fn stats(&self) -> Option<&SourceStats> {
        match self {
            SourceOutcome::Scanned(stats) => Some(stats),
            SourceOutcome::Missing { .. } => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, SourceOutcome::Missing { .. })
    }
}

pub(crate) fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_counts_every_row_once() {
        let mut stats = SourceStats::new("AIHUB_SPOKEN_1", "1_구어체(1).xlsx");
        stats.record(&FilterVerdict::pass());
        stats.record(&FilterVerdict::reject(FilterReason::Empty));
        stats.record(&FilterVerdict::reject(FilterReason::MixedLang));
        stats.record(&FilterVerdict::reject(FilterReason::MixedLang));

        assert_eq!(stats.total, 4);
        assert_eq!(stats.passed, 1);
        assert_eq!(stats.rejected(), 3);
        assert_eq!(stats.reasons.values().sum::<usize>(), stats.rejected());
        assert!(!stats.reasons.contains_key(&FilterReason::Ok));
        assert_eq!(stats.pass_rate(), 25.0);
    }

    #[test]
    fn test_sorted_reasons_tie_break() {
        let mut stats = SourceStats::new("X", "x.xlsx");
        for reason in [
            FilterReason::KoTooLong,
            FilterReason::EnTooLong,
            FilterReason::MixedLang,
            FilterReason::MixedLang,
        ] {
            stats.record(&FilterVerdict::reject(reason));
        }

        assert_eq!(
            stats.sorted_reasons(),
            vec![
                (FilterReason::MixedLang, 2),
                (FilterReason::EnTooLong, 1),
                (FilterReason::KoTooLong, 1),
            ]
        );
    }

    #[test]
    fn test_merge() {
        let mut a = SourceStats::new("X", "x.xlsx");
        a.record(&FilterVerdict::pass());
        let mut b = SourceStats::new("X", "x.xlsx");
        b.record(&FilterVerdict::reject(FilterReason::Empty));
        a.merge(&b);
        assert_eq!(a.total, 2);
        assert_eq!(a.reasons[&FilterReason::Empty], 1);
    }

    #[test]
    fn test_empty_source_rate() {
        assert_eq!(SourceStats::new("X", "x").pass_rate(), 0.0);
    }

    #[test]
    fn test_outcome_json_shape() {
        let missing = SourceOutcome::Missing {
            label: "AIHUB_DIALOG".into(),
            file: "2_대화체.xlsx".into(),
        };
        let json = serde_json::to_value(&missing).unwrap();
        assert_eq!(json["status"], "missing");
        assert_eq!(json["label"], "AIHUB_DIALOG");
    }
}
