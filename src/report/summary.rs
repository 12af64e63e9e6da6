//! Breakdowns of the final, deduplicated corpus.

use super::stats::percent;
use crate::model::{Difficulty, SentenceRecord};
use serde::Serialize;
use std::collections::HashMap;

/// One labelled count in a breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreakdownEntry {
    pub key: String,
    pub count: usize,
}

/// Counts per key, ordered by descending count then key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Breakdown {
    entries: Vec<BreakdownEntry>,
}

impl Breakdown {
    pub fn from_counts(counts: HashMap<String, usize>) -> Self {
        let mut entries: Vec<BreakdownEntry> = counts
            .into_iter()
            .map(|(key, count)| BreakdownEntry { key, count })
            .collect();
        entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.key.cmp(&b.key)));
        Self { entries }
    }

    pub fn entries(&self) -> &[BreakdownEntry] {
        &self.entries
    }

    pub fn get(&self, key: &str) -> Option<usize> {
        self.entries.iter().find(|e| e.key == key).map(|e| e.count)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Post-dedup distribution of the corpus.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CorpusSummary {
    pub total: usize,
    /// All five labels, zero counts included.
    pub by_difficulty: Breakdown,
    pub by_category: Breakdown,
    /// Keyed `major > minor`, or just `major` when there is no minor category.
    pub by_subcategory: Breakdown,
    pub by_source: Breakdown,
}

impl CorpusSummary {
    pub fn from_records(records: &[SentenceRecord]) -> Self {
        let mut difficulty: HashMap<String, usize> = Difficulty::ALL
            .iter()
            .map(|d| (d.as_str().to_string(), 0))
            .collect();
        let mut category: HashMap<String, usize> = HashMap::new();
        let mut subcategory: HashMap<String, usize> = HashMap::new();
        let mut source: HashMap<String, usize> = HashMap::new();

        for record in records {
            *difficulty
                .entry(record.difficulty().as_str().to_string())
                .or_insert(0) += 1;
            *category
                .entry(record.category().to_string())
                .or_insert(0) += 1;
            *subcategory.entry(subcategory_key(record)).or_insert(0) += 1;
            *source.entry(record.source().to_string()).or_insert(0) += 1;
        }

        Self {
            total: records.len(),
            by_difficulty: Breakdown::from_counts(difficulty),
            by_category: Breakdown::from_counts(category),
            by_subcategory: Breakdown::from_counts(subcategory),
            by_source: Breakdown::from_counts(source),
        }
    }

    /// Share of the corpus in percent.
    pub fn share(&self, count: usize) -> f64 {
        percent(count, self.total)
    }
}

fn subcategory_key(record: &SentenceRecord) -> String {
    if record.subcategory().is_empty() {
        record.category().to_string()
    } else {
        format!("{} > {}", record.category(), record.subcategory())
    }
}
