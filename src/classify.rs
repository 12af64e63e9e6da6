//! Difficulty classification by English word count.

use crate::filter::count_en_words;
use crate::model::Difficulty;

/// Maps an English word count to its difficulty label.
///
/// Boundaries are closed: 1-3 STARTER, 4-8 BEGINNER, 9-15 INTERMEDIATE,
/// 16-25 ADVANCED, 26-35 CHALLENGE. The filter constrains counts to the
/// configured word range before this is called; counts above 35 fall into
/// CHALLENGE and a zero count into STARTER.
pub fn classify_difficulty(word_count: usize) -> Difficulty {
    match word_count {
        0..=3 => Difficulty::Starter,
        4..=8 => Difficulty::Beginner,
        9..=15 => Difficulty::Intermediate,
        16..=25 => Difficulty::Advanced,
        _ => Difficulty::Challenge,
    }
}

/// Classifies an English sentence.
pub fn classify_text(english: &str) -> Difficulty {
    classify_difficulty(count_en_words(english))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries() {
        let cases = [
            (1, Difficulty::Starter),
            (3, Difficulty::Starter),
            (4, Difficulty::Beginner),
            (8, Difficulty::Beginner),
            (9, Difficulty::Intermediate),
            (15, Difficulty::Intermediate),
            (16, Difficulty::Advanced),
            (25, Difficulty::Advanced),
            (26, Difficulty::Challenge),
            (35, Difficulty::Challenge),
        ];
        for (count, expected) in cases {
            assert_eq!(classify_difficulty(count), expected, "word count {}", count);
        }
    }

    #[test]
    fn test_total_over_filtered_range() {
        for count in 1..=35 {
            let label = classify_difficulty(count);
            let (lo, hi) = label.word_range();
            assert!((lo..=hi).contains(&count));
        }
    }

    #[test]
    fn test_classify_text() {
        assert_eq!(classify_text("Let's go"), Difficulty::Starter);
        assert_eq!(
            classify_text("  I would like a cup of coffee  "),
            Difficulty::Beginner
        );
    }
}
