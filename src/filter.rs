//! # Sentence Filter
//!
//! A deterministic, ordered gate over an English/Korean pair. Rules run in a
//! fixed order and stop at the first failure, so every rejected row carries
//! exactly one [`FilterReason`]:
//!
//! 1. **empty** - either text is empty
//! 2. **empty_after_strip** - either text is whitespace only
//! 3. **en_too_short / en_too_long** - English word count outside range
//! 4. **ko_too_short / ko_too_long** - Korean code-point count outside range
//! 5. **en_special_chars** - English special-character ratio too high
//! 6. **ko_special_chars** - Korean special-character ratio too high
//! 7. **mixed_lang** - Hangul inside English, or no Hangul in Korean

use crate::classify::classify_difficulty;
use crate::model::Difficulty;
use crate::options::FilterOptions;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reason code attached to a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterReason {
    Ok,
    Empty,
    EmptyAfterStrip,
    EnTooShort,
    EnTooLong,
    KoTooShort,
    KoTooLong,
    EnSpecialChars,
    KoSpecialChars,
    MixedLang,
}

impl FilterReason {
    /// Every rejection reason, in rule order.
    pub const REJECTIONS: [FilterReason; 9] = [
        FilterReason::Empty,
        FilterReason::EmptyAfterStrip,
        FilterReason::EnTooShort,
        FilterReason::EnTooLong,
        FilterReason::KoTooShort,
        FilterReason::KoTooLong,
        FilterReason::EnSpecialChars,
        FilterReason::KoSpecialChars,
        FilterReason::MixedLang,
    ];

    /// The reason code string.
    pub fn code(&self) -> &'static str {
        match self {
            FilterReason::Ok => "ok",
            FilterReason::Empty => "empty",
            FilterReason::EmptyAfterStrip => "empty_after_strip",
            FilterReason::EnTooShort => "en_too_short",
            FilterReason::EnTooLong => "en_too_long",
            FilterReason::KoTooShort => "ko_too_short",
            FilterReason::KoTooLong => "ko_too_long",
            FilterReason::EnSpecialChars => "en_special_chars",
            FilterReason::KoSpecialChars => "ko_special_chars",
            FilterReason::MixedLang => "mixed_lang",
        }
    }
}

impl fmt::Display for FilterReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Outcome of filtering one pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterVerdict {
    pub passed: bool,
    pub reason: FilterReason,
}

impl FilterVerdict {
    pub fn pass() -> Self {
        Self {
            passed: true,
            reason: FilterReason::Ok,
        }
    }

    pub fn reject(reason: FilterReason) -> Self {
        Self {
            passed: false,
            reason,
        }
    }
}

/// Evaluates the filter rules against a pair.
///
/// # Example
///
/// ```
/// use corpclean::filter::{filter_sentence, FilterReason};
/// use corpclean::FilterOptions;
///
/// let options = FilterOptions::default();
/// assert!(filter_sentence("Let's go", "가자", &options).passed);
///
/// let verdict = filter_sentence("asdf1234!!!!", "가자", &options);
/// assert_eq!(verdict.reason, FilterReason::EnSpecialChars);
/// ```
pub fn filter_sentence(english: &str, korean: &str, options: &FilterOptions) -> FilterVerdict {
    if english.is_empty() || korean.is_empty() {
        return FilterVerdict::reject(FilterReason::Empty);
    }

    let english = english.trim();
    let korean = korean.trim();

    if english.is_empty() || korean.is_empty() {
        return FilterVerdict::reject(FilterReason::EmptyAfterStrip);
    }

    let en_words = count_en_words(english);
    if en_words < options.en_word_min {
        return FilterVerdict::reject(FilterReason::EnTooShort);
    }
    if en_words > options.en_word_max {
        return FilterVerdict::reject(FilterReason::EnTooLong);
    }

    let ko_len = count_ko_chars(korean);
    if ko_len < options.ko_char_min {
        return FilterVerdict::reject(FilterReason::KoTooShort);
    }
    if ko_len > options.ko_char_max {
        return FilterVerdict::reject(FilterReason::KoTooLong);
    }

    if special_char_ratio(english) > options.special_char_ratio {
        return FilterVerdict::reject(FilterReason::EnSpecialChars);
    }
    if special_char_ratio(korean) > options.special_char_ratio {
        return FilterVerdict::reject(FilterReason::KoSpecialChars);
    }

    if has_mixed_lang(english, korean, options.mixed_lang_threshold) {
        return FilterVerdict::reject(FilterReason::MixedLang);
    }

    FilterVerdict::pass()
}

/// Number of whitespace-delimited tokens.
pub fn count_en_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Number of Unicode code points.
pub fn count_ko_chars(text: &str) -> usize {
    text.chars().count()
}

/// Share of characters that are neither alphabetic nor whitespace.
///
/// Digits and punctuation count as special. An empty string has ratio 0.
pub fn special_char_ratio(text: &str) -> f64 {
    let mut total = 0usize;
    let mut special = 0usize;
    for c in text.chars() {
        total += 1;
        if !c.is_alphabetic() && !c.is_whitespace() {
            special += 1;
        }
    }

    if total == 0 {
        return 0.0;
    }
    special as f64 / total as f64
}

/// Check if character is Korean script (Hangul syllables or any Jamo block).
pub fn is_hangul(c: char) -> bool {
    let code = c as u32;
    (0xAC00..=0xD7A3).contains(&code)     // Hangul Syllables
        || (0x1100..=0x11FF).contains(&code)  // Hangul Jamo
        || (0x3130..=0x318F).contains(&code)  // Hangul Compatibility Jamo
        || (0xA960..=0xA97F).contains(&code)  // Hangul Jamo Extended-A
        || (0xD7B0..=0xD7FF).contains(&code) // Hangul Jamo Extended-B
}

/// Cumulative length of Hangul runs in `text`.
pub fn hangul_run_length(text: &str) -> usize {
    text.chars().filter(|&c| is_hangul(c)).count()
}

/// True if the English side carries more than `threshold` Hangul characters,
/// or the Korean side has none at all.
pub fn has_mixed_lang(english: &str, korean: &str, threshold: usize) -> bool {
    if hangul_run_length(english) > threshold {
        return true;
    }
    !korean.chars().any(is_hangul)
}

/// Measurements behind a verdict, for tuning thresholds by hand.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairCheck {
    pub passed: bool,
    pub reason: FilterReason,
    pub en_words: usize,
    pub ko_chars: usize,
    pub en_special_ratio: f64,
    pub ko_special_ratio: f64,
    pub hangul_in_english: usize,
    /// Only set for passing pairs.
    pub difficulty: Option<Difficulty>,
}

/// Filters a pair and reports the measured values alongside the verdict.
pub fn check_pair(english: &str, korean: &str, options: &FilterOptions) -> PairCheck {
    let verdict = filter_sentence(english, korean, options);
    let en = english.trim();
    let ko = korean.trim();
    let en_words = count_en_words(en);

    PairCheck {
        passed: verdict.passed,
        reason: verdict.reason,
        en_words,
        ko_chars: count_ko_chars(ko),
        en_special_ratio: special_char_ratio(en),
        ko_special_ratio: special_char_ratio(ko),
        hangul_in_english: hangul_run_length(en),
        difficulty: verdict.passed.then(|| classify_difficulty(en_words)),
    }
}
