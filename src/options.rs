//! Run configuration: filter thresholds, text normalization and source catalog.
//!
//! Every value has a built-in default. A TOML file can override any subset:
//!
//! ```toml
//! header_check = "lenient"
//!
//! [filter]
//! en_word_max = 30
//! mixed_lang_threshold = 2
//!
//! [[sources]]
//! file = "1_구어체(1).xlsx"
//! label = "AIHUB_SPOKEN_1"
//! schema = "spoken"
//! ```

use crate::error::{Error, Result};
use crate::model::Difficulty;
use crate::source::SourceSpec;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default config file name looked up in the data directory.
pub const CONFIG_FILE_NAME: &str = "corpclean.toml";

/// Sentence filter thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterOptions {
    /// Minimum English word count (inclusive).
    pub en_word_min: usize,
    /// Maximum English word count (inclusive).
    pub en_word_max: usize,
    /// Minimum Korean character count (inclusive).
    pub ko_char_min: usize,
    /// Maximum Korean character count (inclusive).
    pub ko_char_max: usize,
    /// Upper bound on the non-alphabetic, non-whitespace character ratio.
    pub special_char_ratio: f64,
    /// Maximum number of Hangul characters tolerated inside English text.
    pub mixed_lang_threshold: usize,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            en_word_min: 1,
            en_word_max: 35,
            ko_char_min: 2,
            ko_char_max: 150,
            special_char_ratio: 0.25,
            mixed_lang_threshold: 4,
        }
    }
}

impl FilterOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the inclusive English word-count range.
    pub fn with_en_words(mut self, min: usize, max: usize) -> Self {
        self.en_word_min = min;
        self.en_word_max = max;
        self
    }

    /// Sets the inclusive Korean character-count range.
    pub fn with_ko_chars(mut self, min: usize, max: usize) -> Self {
        self.ko_char_min = min;
        self.ko_char_max = max;
        self
    }

    pub fn with_special_char_ratio(mut self, ratio: f64) -> Self {
        self.special_char_ratio = ratio;
        self
    }

    pub fn with_mixed_lang_threshold(mut self, threshold: usize) -> Self {
        self.mixed_lang_threshold = threshold;
        self
    }

    /// Checks that the thresholds describe non-empty ranges.
    ///
    /// The English word range must stay within the classifier's bands, so
    /// every passing sentence maps to exactly one difficulty label.
    pub fn validate(&self) -> Result<()> {
        if self.en_word_max == 0 || self.en_word_min > self.en_word_max {
            return Err(Error::InvalidConfig(format!(
                "English word range {}..={} is empty",
                self.en_word_min, self.en_word_max
            )));
        }
        let (band_min, _) = Difficulty::Starter.word_range();
        let (_, band_max) = Difficulty::Challenge.word_range();
        if self.en_word_min < band_min || self.en_word_max > band_max {
            return Err(Error::InvalidConfig(format!(
                "English word range {}..={} exceeds the difficulty bands {}..={}",
                self.en_word_min, self.en_word_max, band_min, band_max
            )));
        }
        if self.ko_char_max == 0 || self.ko_char_min > self.ko_char_max {
            return Err(Error::InvalidConfig(format!(
                "Korean character range {}..={} is empty",
                self.ko_char_min, self.ko_char_max
            )));
        }
        if !(0.0..=1.0).contains(&self.special_char_ratio) {
            return Err(Error::InvalidConfig(format!(
                "special_char_ratio must be within 0.0..=1.0, got {}",
                self.special_char_ratio
            )));
        }
        Ok(())
    }
}

/// Cell text normalization applied before filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeOptions {
    /// Unicode NFC normalization (composes decomposed Hangul jamo).
    pub nfc: bool,
    /// Remove BOM, NUL, zero-width and soft-hyphen characters.
    pub strip_control: bool,
    /// Map the ideographic space (U+3000) to a regular space.
    pub ideographic_space: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            nfc: true,
            strip_control: true,
            ideographic_space: true,
        }
    }
}

impl NormalizeOptions {
    /// Leaves cell text untouched.
    pub fn disabled() -> Self {
        Self {
            nfc: false,
            strip_control: false,
            ideographic_space: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.nfc || self.strip_control || self.ideographic_space
    }
}

/// How strictly header rows are checked against the schema descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderCheck {
    /// Every descriptor column label must match a known alias.
    #[default]
    Strict,
    /// Only the column count is checked.
    Lenient,
}

/// Complete pipeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineOptions {
    pub filter: FilterOptions,
    pub normalize: NormalizeOptions,
    pub sources: Vec<SourceSpec>,
    pub header_check: HeaderCheck,
    /// Scan sources concurrently.
    pub parallel: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            filter: FilterOptions::default(),
            normalize: NormalizeOptions::default(),
            sources: SourceSpec::aihub_defaults(),
            header_check: HeaderCheck::Strict,
            parallel: true,
        }
    }
}

impl PipelineOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses options from TOML text; missing keys keep their defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let options: PipelineOptions = toml::from_str(contents)?;
        options.validate()?;
        Ok(options)
    }

    /// Reads options from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let options = Self::from_toml_str(&contents)?;
        log::debug!("Loaded config from {}", path.display());
        Ok(options)
    }

    /// Loads `corpclean.toml` from `dir` if present, otherwise the defaults.
    pub fn discover(dir: impl AsRef<Path>) -> Result<Self> {
        let path = dir.as_ref().join(CONFIG_FILE_NAME);
        if path.is_file() {
            Self::from_file(&path)
        } else {
            log::debug!(
                "No {} in {}, using defaults",
                CONFIG_FILE_NAME,
                dir.as_ref().display()
            );
            Ok(Self::default())
        }
    }

    pub fn with_filter(mut self, filter: FilterOptions) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_normalize(mut self, normalize: NormalizeOptions) -> Self {
        self.normalize = normalize;
        self
    }

    pub fn with_sources(mut self, sources: Vec<SourceSpec>) -> Self {
        self.sources = sources;
        self
    }

    /// Only checks header column counts.
    pub fn lenient_headers(mut self) -> Self {
        self.header_check = HeaderCheck::Lenient;
        self
    }

    /// Disables parallel source scanning.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.filter.validate()?;

        let mut labels: Vec<&str> = self.sources.iter().map(|s| s.label.as_str()).collect();
        labels.sort_unstable();
        if let Some(pair) = labels.windows(2).find(|w| w[0] == w[1]) {
            return Err(Error::InvalidConfig(format!(
                "duplicate source label: {}",
                pair[0]
            )));
        }
        if self.sources.iter().any(|s| s.label.trim().is_empty()) {
            return Err(Error::InvalidConfig("source label must not be empty".into()));
        }
        Ok(())
    }
}
