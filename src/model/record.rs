//! Row and sentence records.

use super::Difficulty;
use serde::Serialize;

/// Positional cell values of one spreadsheet data row.
///
/// Absent cells are stored as empty strings; indexing past the end of the row
/// also yields an empty string, so short rows never fail extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    /// 1-based row number in the source sheet (the header is row 1).
    pub row_number: usize,
    /// Cell values in column order.
    pub values: Vec<String>,
}

impl RawRecord {
    /// Creates a record from positional values.
    pub fn new(row_number: usize, values: Vec<String>) -> Self {
        Self { row_number, values }
    }

    /// Returns the cell at `index`, or `""` when the row is shorter.
    pub fn cell(&self, index: usize) -> &str {
        self.values.get(index).map(String::as_str).unwrap_or("")
    }
}

/// An English/Korean pair awaiting the filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateSentence {
    pub english_text: String,
    pub korean_text: String,
    pub category: String,
    pub subcategory: String,
}

impl CandidateSentence {
    /// Creates a candidate with both texts trimmed.
    pub fn new(english: &str, korean: &str) -> Self {
        Self {
            english_text: english.trim().to_string(),
            korean_text: korean.trim().to_string(),
            category: String::new(),
            subcategory: String::new(),
        }
    }

    /// Sets the category pair carried into the final record.
    pub fn with_category(
        mut self,
        category: impl Into<String>,
        subcategory: impl Into<String>,
    ) -> Self {
        self.category = category.into();
        self.subcategory = subcategory.into();
        self
    }
}

/// A sentence pair that passed the filter. Field order is the output column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SentenceRecord {
    english_text: String,
    korean_ref: String,
    difficulty: Difficulty,
    category: String,
    subcategory: String,
    source: String,
}

impl SentenceRecord {
    /// Creates a record, trimming both texts.
    ///
    /// Returns `None` if either text is empty after trimming.
    pub fn new(
        english_text: &str,
        korean_ref: &str,
        difficulty: Difficulty,
        category: impl Into<String>,
        subcategory: impl Into<String>,
        source: impl Into<String>,
    ) -> Option<Self> {
        let english_text = english_text.trim();
        let korean_ref = korean_ref.trim();
        if english_text.is_empty() || korean_ref.is_empty() {
            return None;
        }

        Some(Self {
            english_text: english_text.to_string(),
            korean_ref: korean_ref.to_string(),
            difficulty,
            category: category.into(),
            subcategory: subcategory.into(),
            source: source.into(),
        })
    }

    pub fn english_text(&self) -> &str {
        &self.english_text
    }

    pub fn korean_ref(&self) -> &str {
        &self.korean_ref
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn subcategory(&self) -> &str {
        &self.subcategory
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Deduplication key: lowercased, trimmed English text.
    pub fn normalized_key(&self) -> String {
        self.english_text.trim().to_lowercase()
    }
}
