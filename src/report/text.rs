//! Plain-text rendering of a [`Report`].

use super::{Breakdown, CorpusSummary, Report, SourceOutcome, SourceStats};
use crate::model::Difficulty;

const RULE_WIDTH: usize = 60;

/// Renders the report as human-readable text.
///
/// Every section is derived from `report`; the optional timestamp occupies
/// a single `Generated:` line.
pub fn render_text(report: &Report) -> String {
    let mut out = String::new();
    let rule = "=".repeat(RULE_WIDTH);

    out.push_str(&rule);
    out.push_str("\nKorean-English parallel corpus cleansing\n");
    out.push_str(&rule);
    out.push('\n');
    if let Some(ts) = &report.generated_at {
        out.push_str(&format!("Generated: {}\n", ts));
    }

    let f = &report.filter;
    out.push_str(&format!(
        "English words: {}~{}\n",
        f.en_word_min, f.en_word_max
    ));
    out.push_str(&format!(
        "Korean characters: {}~{}\n",
        f.ko_char_min, f.ko_char_max
    ));
    out.push_str(&format!(
        "Special character ratio limit: {:.0}%\n",
        f.special_char_ratio * 100.0
    ));
    out.push_str(&format!(
        "Mixed-language threshold: {} Hangul characters\n",
        f.mixed_lang_threshold
    ));
    let bands: Vec<String> = Difficulty::ALL
        .iter()
        .map(|d| {
            let (lo, hi) = d.word_range();
            format!("{}({}-{})", d, lo, hi)
        })
        .collect();
    out.push_str(&format!("Difficulty: {}\n", bands.join(" / ")));

    for outcome in &report.sources {
        out.push('\n');
        match outcome {
            SourceOutcome::Scanned(stats) => {
                out.push_str(&format!("Processing: {} [{}]\n", stats.file, stats.label));
                push_counts(&mut out, "  total", stats);
                out.push_str("  rejection reasons:\n");
                for (reason, count) in stats.sorted_reasons() {
                    out.push_str(&format!("    {}: {}\n", reason, thousands(count)));
                }
            }
            SourceOutcome::Missing { label, file } => {
                out.push_str(&format!("File not found: {} [{}]\n", file, label));
            }
        }
    }

    out.push('\n');
    out.push_str(&rule);
    out.push('\n');
    push_counts(&mut out, "All sources", &report.combined_stats());
    out.push_str(&format!(
        "Before deduplication: {} sentences\n",
        thousands(report.pre_dedup)
    ));
    out.push_str(&format!(
        "After deduplication: {} sentences\n",
        thousands(report.post_dedup)
    ));

    let summary = &report.summary;
    let sections = [
        ("Difficulty distribution", &summary.by_difficulty, 15),
        ("Category distribution", &summary.by_category, 15),
        ("Subcategory distribution", &summary.by_subcategory, 25),
        ("Source distribution", &summary.by_source, 20),
    ];
    for (title, breakdown, key_width) in sections {
        push_breakdown(&mut out, title, breakdown, summary, key_width);
    }

    out
}

fn push_counts(out: &mut String, prefix: &str, stats: &SourceStats) {
    out.push_str(&format!(
        "{}: {} rows -> passed: {} rows ({:.1}%)\n",
        prefix,
        thousands(stats.total),
        thousands(stats.passed),
        stats.pass_rate()
    ));
}

fn push_breakdown(
    out: &mut String,
    title: &str,
    breakdown: &Breakdown,
    summary: &CorpusSummary,
    key_width: usize,
) {
    out.push_str(&format!("\n{}:\n", title));
    for entry in breakdown.entries() {
        out.push_str(&format!(
            "  {:<width$}: {:>8}  ({:5.1}%)\n",
            entry.key,
            thousands(entry.count),
            summary.share(entry.count),
            width = key_width
        ));
    }
}

/// Formats an integer with comma thousands separators.
pub fn thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
