//! corpclean CLI - Korean-English parallel corpus cleansing tool
//!
//! Reads AI Hub style spreadsheets, filters and classifies sentence pairs,
//! deduplicates them and writes a CSV dataset plus a statistics report.

mod config;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use colored::*;
use config::{resolve_options, ThresholdArgs};
use corpclean::report::thousands;
use corpclean::source::{Field, RowSource};
use corpclean::{
    check_pair, write_records, FilterOptions, HeaderCheck, Pipeline, Report, SourceOutcome,
    SourceSchema,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};

/// Korean-English parallel corpus cleansing
#[derive(Parser)]
#[command(
    name = "corpclean",
    author = "iyulab",
    version,
    about = "Cleanse Korean-English parallel sentence corpora",
    long_about = "corpclean - Korean-English parallel corpus cleansing tool.\n\n\
                  Filters, classifies and deduplicates sentence pairs from AI Hub\n\
                  spreadsheets and writes a fixed-schema CSV plus a report.\n\n\
                  Usage:\n  \
                  corpclean run <data_dir>          Cleanse the configured sources\n  \
                  corpclean check <en> <ko>         Evaluate one sentence pair\n  \
                  corpclean inspect <file>          Show the first rows of a source"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the cleansing pipeline over a data directory
    Run {
        /// Directory holding the source spreadsheets
        #[arg(default_value = ".", env = "CORPCLEAN_DATA_DIR")]
        data_dir: PathBuf,

        /// Output CSV path
        #[arg(short, long, default_value = "cleansed_sentences.csv", env = "CORPCLEAN_OUTPUT")]
        output: PathBuf,

        /// Text report path
        #[arg(long, default_value = "cleanse_report.txt", env = "CORPCLEAN_REPORT")]
        report: PathBuf,

        /// Also write the report as JSON
        #[arg(long, env = "CORPCLEAN_STATS_JSON")]
        stats_json: Option<PathBuf>,

        /// Config file (default: corpclean.toml in the data directory)
        #[arg(short, long, env = "CORPCLEAN_CONFIG")]
        config: Option<PathBuf>,

        /// Scan sources one at a time
        #[arg(long, env = "CORPCLEAN_SEQUENTIAL")]
        sequential: bool,

        /// Only check header column counts, not labels
        #[arg(long, env = "CORPCLEAN_LENIENT_HEADERS")]
        lenient_headers: bool,

        #[command(flatten)]
        thresholds: ThresholdArgs,
    },

    /// Evaluate one English/Korean pair against the filter
    Check {
        /// English sentence
        english: String,

        /// Korean sentence
        korean: String,

        /// Output the measurements as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        thresholds: ThresholdArgs,
    },

    /// Show the header and first rows of a source file
    Inspect {
        /// Source file (.xlsx or .csv)
        input: PathBuf,

        /// Validate the header and label columns with this schema
        #[arg(long)]
        schema: Option<SchemaArg>,

        /// Number of data rows to show
        #[arg(short = 'n', long, default_value = "5")]
        rows: usize,
    },

    /// Show version information
    Version,
}

/// Source column layout
#[derive(Clone, Copy, ValueEnum)]
enum SchemaArg {
    /// [id, korean, english]
    Spoken,
    /// [major, minor, situation, set, speaker, korean, english]
    Dialog,
}

impl From<SchemaArg> for SourceSchema {
    fn from(arg: SchemaArg) -> Self {
        match arg {
            SchemaArg::Spoken => SourceSchema::Spoken,
            SchemaArg::Dialog => SourceSchema::Dialog,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let Some(command) = cli.command else {
        use clap::CommandFactory;
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Run {
            data_dir,
            output,
            report,
            stats_json,
            config,
            sequential,
            lenient_headers,
            thresholds,
        } => {
            let options = resolve_options(
                config.as_ref(),
                &data_dir,
                &thresholds,
                sequential,
                lenient_headers,
            )?;

            let pb = create_spinner(&format!(
                "Cleansing {} source(s) in {}...",
                options.sources.len(),
                data_dir.display()
            ));
            let result = Pipeline::new(options).run(&data_dir);
            let result = match result {
                Ok(result) => result,
                Err(e) => {
                    pb.finish_and_clear();
                    return Err(e.into());
                }
            };

            pb.set_message("Writing output...");
            let generated_at = chrono::Local::now()
                .format("%Y-%m-%d %H:%M:%S %z")
                .to_string();
            let report_value = result.report.with_generated_at(generated_at);

            log::info!(
                "Writing {} sentences to {}",
                result.records.len(),
                output.display()
            );
            write_records(&output, &result.records)?;
            write_file(&report, &report_value.to_text())?;
            if let Some(ref path) = stats_json {
                write_file(path, &report_value.to_json()?)?;
            }
            pb.finish_and_clear();

            print_run_summary(&report_value, &output, &report, stats_json.as_deref());
        }

        Commands::Check {
            english,
            korean,
            json,
            thresholds,
        } => {
            let filter = thresholds.apply(FilterOptions::default());
            filter.validate()?;
            let check = check_pair(&english, &korean, &filter);

            if json {
                println!("{}", serde_json::to_string_pretty(&check)?);
                return Ok(());
            }

            if check.passed {
                println!("{} {}", "✓".green().bold(), "passed".green());
            } else {
                let reason = check.reason.to_string();
                println!("{} rejected: {}", "✗".red().bold(), reason.red());
            }
            println!("{}", "─".repeat(40));
            println!(
                "{}: {} ({}~{})",
                "English words".bold(),
                check.en_words,
                filter.en_word_min,
                filter.en_word_max
            );
            println!(
                "{}: {} ({}~{})",
                "Korean characters".bold(),
                check.ko_chars,
                filter.ko_char_min,
                filter.ko_char_max
            );
            println!(
                "{}: {:.3} / {:.3} (limit {:.2})",
                "Special ratio en/ko".bold(),
                check.en_special_ratio,
                check.ko_special_ratio,
                filter.special_char_ratio
            );
            println!(
                "{}: {} (limit {})",
                "Hangul in English".bold(),
                check.hangul_in_english,
                filter.mixed_lang_threshold
            );
            if let Some(difficulty) = check.difficulty {
                println!("{}: {}", "Difficulty".bold(), difficulty.to_string().cyan());
            }
        }

        Commands::Inspect {
            input,
            schema,
            rows,
        } => {
            inspect(&input, schema.map(SourceSchema::from), rows)?;
        }

        Commands::Version => {
            print_version();
        }
    }

    Ok(())
}

fn inspect(
    input: &Path,
    schema: Option<SourceSchema>,
    limit: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut source = RowSource::open(input)?;
    let header = source.header()?;

    println!("{}", "Source Information".cyan().bold());
    println!("{}", "─".repeat(40));
    println!(
        "{}: {}",
        "File".bold(),
        input.file_name().unwrap_or_default().to_string_lossy()
    );
    println!("{}: {}", "Format".bold(), source.format());
    if let RowSource::Xlsx(ref workbook) = source {
        println!("{}: {}", "Sheets".bold(), workbook.sheet_names().join(", "));
    }
    println!("{}: {}", "Header".bold(), header.join(" | "));

    if let Some(schema) = schema {
        match schema
            .descriptor()
            .validate_header(input, &header, HeaderCheck::Strict)
        {
            Ok(()) => println!("{}: {} {}", "Schema".bold(), schema, "✓".green()),
            Err(e) => println!("{}: {} {} {}", "Schema".bold(), schema, "✗".red(), e),
        }
    }

    println!("\n{}", "Sample Rows".cyan().bold());
    println!("{}", "─".repeat(40));
    for row in source.rows()?.skip(1).take(limit) {
        let row = row?;
        match schema {
            Some(schema) => {
                let raw = corpclean::RawRecord::new(row.number, row.cells);
                let descriptor = schema.descriptor();
                println!("{}", format!("row {}", raw.row_number).bold());
                for field in [Field::Korean, Field::English] {
                    println!("  {}: {}", field.name(), descriptor.extract(&raw, field));
                }
                let (category, subcategory) = schema.categories(&raw);
                println!("  category: {} / {}", category, subcategory);
            }
            None => {
                let number = format!("{:>6}", row.number);
                println!("{} {}", number.dimmed(), row.cells.join(" | "));
            }
        }
    }

    Ok(())
}

fn print_run_summary(report: &Report, output: &Path, report_path: &Path, json_path: Option<&Path>) {
    println!("{}", "Cleansing Complete".green().bold());
    println!("{}", "─".repeat(40));
    for outcome in &report.sources {
        match outcome {
            SourceOutcome::Scanned(stats) => println!(
                "  {} {}: {} / {} rows ({:.1}%)",
                "✓".green(),
                stats.label,
                thousands(stats.passed),
                thousands(stats.total),
                stats.pass_rate()
            ),
            SourceOutcome::Missing { label, file } => {
                println!("  {} {}: {} not found", "!".yellow().bold(), label, file)
            }
        }
    }

    println!("\n{}", "Statistics".cyan().bold());
    println!("{}", "─".repeat(40));
    println!("{}: {}", "Before dedup".bold(), thousands(report.pre_dedup));
    println!("{}: {}", "After dedup".bold(), thousands(report.post_dedup));
    for entry in report.summary.by_difficulty.entries() {
        println!(
            "  {:<13} {:>8}  ({:5.1}%)",
            entry.key,
            thousands(entry.count),
            report.summary.share(entry.count)
        );
    }

    println!("\n{}: {}", "Output".bold(), output.display());
    println!("{}: {}", "Report".bold(), report_path.display());
    if let Some(path) = json_path {
        println!("{}: {}", "Stats".bold(), path.display());
    }
}

fn print_version() {
    let version = env!("CARGO_PKG_VERSION");
    println!("{} {}", "corpclean".green().bold(), version);
    println!("Korean-English parallel corpus cleansing");
    println!();
    println!("Supported sources: XLSX, CSV");
    println!("Difficulty labels: STARTER, BEGINNER, INTERMEDIATE, ADVANCED, CHALLENGE");
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
            .template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn write_file(path: &Path, content: &str) -> corpclean::Result<()> {
    fs::write(path, content).map_err(|source| corpclean::Error::OutputWrite {
        path: path.to_path_buf(),
        source,
    })
}
