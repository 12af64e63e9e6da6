//! Corpus-wide deduplication on the normalized English key.

use crate::model::SentenceRecord;
use std::collections::HashSet;

/// Keeps the first record for each `lower(trim(english_text))` key.
///
/// Later duplicates are dropped even when their Korean reference differs.
/// Retained records keep their first-seen order. Runs in O(n) with one set
/// entry per unique key.
pub fn deduplicate(records: Vec<SentenceRecord>) -> Vec<SentenceRecord> {
    let mut seen = HashSet::with_capacity(records.len());
    records
        .into_iter()
        .filter(|record| seen.insert(record.normalized_key()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Difficulty;

    fn record(en: &str, ko: &str) -> SentenceRecord {
        SentenceRecord::new(en, ko, Difficulty::Starter, "DAILY", "", "AIHUB_SPOKEN_1").unwrap()
    }

    #[test]
    fn test_case_and_whitespace_insensitive() {
        let input = vec![
            record("Hello world", "안녕 세상"),
            record("HELLO WORLD ", "안녕 세상"),
            record("Goodbye", "잘 가"),
        ];

        let output = deduplicate(input);
        assert_eq!(output.len(), 2);
        assert_eq!(output[0].english_text(), "Hello world");
        assert_eq!(output[1].english_text(), "Goodbye");
    }

    #[test]
    fn test_later_korean_reference_is_discarded() {
        // Only the first translation of an English sentence survives.
        let input = vec![
            record("Thank you", "감사합니다"),
            record("thank you", "고마워"),
        ];

        let output = deduplicate(input);
        assert_eq!(output.len(), 1);
        assert_eq!(output[0].korean_ref(), "감사합니다");
    }

    #[test]
    fn test_preserves_first_seen_order() {
        let input = vec![
            record("c", "다다"),
            record("a", "가가"),
            record("C", "다다"),
            record("b", "나나"),
            record("A", "가가"),
        ];

        let keys: Vec<_> = deduplicate(input)
            .iter()
            .map(|r| r.english_text().to_string())
            .collect();
        assert_eq!(keys, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(deduplicate(Vec::new()).is_empty());
    }
}
