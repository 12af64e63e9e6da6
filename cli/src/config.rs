//! Layering of pipeline options: flags and `CORPCLEAN_*` variables over the
//! config file over built-in defaults.

use clap::Args;
use corpclean::{FilterOptions, PipelineOptions};
use std::path::{Path, PathBuf};

/// Filter threshold overrides shared by `run` and `check`.
#[derive(Args, Debug, Default, Clone)]
pub struct ThresholdArgs {
    /// Minimum English word count
    #[arg(long, env = "CORPCLEAN_EN_WORD_MIN")]
    pub en_word_min: Option<usize>,

    /// Maximum English word count
    #[arg(long, env = "CORPCLEAN_EN_WORD_MAX")]
    pub en_word_max: Option<usize>,

    /// Minimum Korean character count
    #[arg(long, env = "CORPCLEAN_KO_CHAR_MIN")]
    pub ko_char_min: Option<usize>,

    /// Maximum Korean character count
    #[arg(long, env = "CORPCLEAN_KO_CHAR_MAX")]
    pub ko_char_max: Option<usize>,

    /// Upper bound on the special character ratio (0.0-1.0)
    #[arg(long, env = "CORPCLEAN_SPECIAL_CHAR_RATIO")]
    pub special_char_ratio: Option<f64>,

    /// Hangul characters tolerated inside English text
    #[arg(long, env = "CORPCLEAN_MIXED_LANG_THRESHOLD")]
    pub mixed_lang_threshold: Option<usize>,
}

impl ThresholdArgs {
    /// Overrides the fields that were given.
    pub fn apply(&self, mut filter: FilterOptions) -> FilterOptions {
        if let Some(v) = self.en_word_min {
            filter.en_word_min = v;
        }
        if let Some(v) = self.en_word_max {
            filter.en_word_max = v;
        }
        if let Some(v) = self.ko_char_min {
            filter.ko_char_min = v;
        }
        if let Some(v) = self.ko_char_max {
            filter.ko_char_max = v;
        }
        if let Some(v) = self.special_char_ratio {
            filter.special_char_ratio = v;
        }
        if let Some(v) = self.mixed_lang_threshold {
            filter.mixed_lang_threshold = v;
        }
        filter
    }
}

/// Loads the explicit config file, or discovers one in `data_dir`.
pub fn load_options(config: Option<&Path>, data_dir: &Path) -> corpclean::Result<PipelineOptions> {
    match config {
        Some(path) => {
            log::debug!("Loading config from {}", path.display());
            PipelineOptions::from_file(path)
        }
        None => PipelineOptions::discover(data_dir),
    }
}

/// Options for a `run`, with command-line overrides applied and validated.
pub fn resolve_options(
    config: Option<&PathBuf>,
    data_dir: &Path,
    thresholds: &ThresholdArgs,
    sequential: bool,
    lenient_headers: bool,
) -> corpclean::Result<PipelineOptions> {
    let base = load_options(config.map(PathBuf::as_path), data_dir)?;
    let filter = thresholds.apply(base.filter.clone());

    let mut options = base.with_filter(filter);
    if sequential {
        options = options.sequential();
    }
    if lenient_headers {
        options = options.lenient_headers();
    }

    options.validate()?;
    log::debug!(
        "Resolved thresholds: en {}~{} words, ko {}~{} chars, special {:.2}, mixed {}",
        options.filter.en_word_min,
        options.filter.en_word_max,
        options.filter.ko_char_min,
        options.filter.ko_char_max,
        options.filter.special_char_ratio,
        options.filter.mixed_lang_threshold
    );
    Ok(options)
}
