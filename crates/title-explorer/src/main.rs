//! CLI entry point for the title explorer.

use anyhow::{Result, anyhow};
use clap::{Parser, ValueEnum};
use dotenv::dotenv;
use std::env;
use std::path::Path;
use title_explorer::{
    CategoryCount, Catalog, DashboardReport, DashboardSnapshot, Explorer, ExplorerConfig,
    ExplorerConfigBuilder, FilterSelection, Histogram, ReportGenerator, TitleType,
};
use tracing::{debug, info};

/// Source file used when neither `--input` nor the environment names one.
const DEFAULT_INPUT: &str = "netflix_titles.csv";

/// Environment variable naming the source file.
const INPUT_ENV_VAR: &str = "TITLE_EXPLORER_INPUT";

/// Output directory used when neither `--output` nor `--config` names one.
const DEFAULT_OUTPUT_DIR: &str = "./outputs";

/// Width of the longest bar in the text charts.
const BAR_WIDTH: usize = 40;

/// CLI-compatible content type enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum CliTitleType {
    /// Feature films
    Movie,
    /// Series
    TvShow,
}

impl From<CliTitleType> for TitleType {
    fn from(cli: CliTitleType) -> Self {
        match cli {
            CliTitleType::Movie => TitleType::Movie,
            CliTitleType::TvShow => TitleType::TvShow,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Explore a catalog of movies and TV shows",
    long_about = "Loads a title catalog CSV, applies content-type and country filters, \
                  and summarizes genres, countries, release years and movie durations.\n\n\
                  ENVIRONMENT VARIABLES:\n  \
                  TITLE_EXPLORER_INPUT  Default CSV path when --input is not given\n  \
                  RUST_LOG              Log filter (overrides --log-level)\n\n\
                  EXAMPLES:\n  \
                  # Everything in the catalog\n  \
                  title-explorer -i netflix_titles.csv\n\n  \
                  # Indian movies only\n  \
                  title-explorer -i netflix_titles.csv -t movie -c India\n\n  \
                  # List the country choices\n  \
                  title-explorer -i netflix_titles.csv --list-countries\n\n  \
                  # Machine-readable output\n  \
                  title-explorer -i netflix_titles.csv --json | jq .dashboard.summary"
)]
struct Args {
    /// Path to the CSV file to explore
    #[arg(short, long)]
    input: Option<String>,

    /// Content types to include (repeatable); defaults to every type in the file
    #[arg(short = 't', long = "type", value_enum)]
    types: Vec<CliTitleType>,

    /// Country substring filter (case-sensitive); "All" disables it
    #[arg(short, long, default_value = "All")]
    country: String,

    /// Size of the top genre and top country lists
    #[arg(long)]
    top_n: Option<usize>,

    /// Number of histogram bins
    #[arg(long)]
    bins: Option<usize>,

    /// JSON file with explorer settings
    #[arg(long)]
    config: Option<String>,

    /// Print the available country choices and exit
    #[arg(long)]
    list_countries: bool,

    /// Output directory for reports and exports
    ///
    /// Overrides `output_dir` from --config (default: ./outputs)
    #[arg(short, long)]
    output: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show errors and final result)
    #[arg(short, long)]
    quiet: bool,

    /// Output JSON to stdout instead of human-readable summary
    ///
    /// Disables all logs; only outputs the report.
    #[arg(long)]
    json: bool,

    /// Write a JSON report to the output directory
    ///
    /// The report will be saved as <input_name>_report.json
    #[arg(short = 'r', long, conflicts_with = "json")]
    emit_report: bool,

    /// Write the filtered titles to <input_name>_filtered.csv in the output directory
    #[arg(long)]
    export: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    // Load environment variables from .env file
    dotenv().ok();

    let input = resolve_input(&args);
    if !Path::new(&input).exists() {
        return Err(anyhow!("Input file not found: {}", input));
    }

    let config = build_config(&args)?;
    debug!("Using config: {:?}", config);

    let catalog = Catalog::load(&input)?;

    if args.list_countries {
        for option in catalog.country_options() {
            println!("{}", option);
        }
        return Ok(());
    }

    let explorer = Explorer::new(catalog, config);
    let selection = build_selection(&args, &explorer);
    info!(
        "Filtering: types={:?}, country={}",
        selection.content_types,
        selection.country_label()
    );

    let snapshot = explorer.snapshot(&selection);
    let report = ReportGenerator::build_report(
        &input,
        &selection,
        explorer.catalog().load_summary(),
        explorer.catalog().country_options().len(),
        snapshot,
    );

    let input_stem = extract_file_stem(&input);
    let generator = ReportGenerator::new(&explorer.config().output_dir);

    if args.export {
        let path = generator.export_view_csv(&explorer.view(&selection), &input_stem)?;
        info!("Filtered titles written to: {}", path.display());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if args.emit_report {
        let path = generator.write_report_to_file(&report, &input_stem)?;
        info!("Report written to: {}", path.display());
    }

    print_human_readable_summary(&report);

    Ok(())
}

/// `--input`, then `TITLE_EXPLORER_INPUT`, then the default file name.
fn resolve_input(args: &Args) -> String {
    args.input
        .clone()
        .or_else(|| env::var(INPUT_ENV_VAR).ok())
        .unwrap_or_else(|| DEFAULT_INPUT.to_string())
}

/// Config file (if any) overridden by explicit flags.
fn build_config(args: &Args) -> Result<ExplorerConfig> {
    let base = match &args.config {
        Some(path) => ExplorerConfig::from_json_file(path)?,
        None => ExplorerConfig::builder()
            .output_dir(DEFAULT_OUTPUT_DIR)
            .build()?,
    };

    let mut builder = ExplorerConfigBuilder::from_config(&base);
    if let Some(dir) = &args.output {
        builder = builder.output_dir(dir);
    }
    if let Some(n) = args.top_n {
        builder = builder.top_n(n);
    }
    if let Some(bins) = args.bins {
        builder = builder.histogram_bins(bins);
    }

    Ok(builder.build()?)
}

fn build_selection(args: &Args, explorer: &Explorer) -> FilterSelection {
    let mut selection = explorer
        .default_selection()
        .with_country(Some(args.country.as_str()));
    if !args.types.is_empty() {
        selection = selection.with_types(args.types.iter().copied().map(TitleType::from));
    }
    selection
}

/// Extract the file stem (name without extension) from a path.
fn extract_file_stem(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output")
        .to_string()
}

/// Truncate a string to max length with ellipsis
fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

fn bar(count: usize, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let len = (count * BAR_WIDTH).div_ceil(max);
    "#".repeat(len)
}

fn print_counts(title: &str, counts: &[CategoryCount]) {
    println!("{}", title);
    println!("{}", "-".repeat(40));
    if counts.is_empty() {
        println!("  (no data)");
    }
    let max = counts.iter().map(|c| c.count).max().unwrap_or(0);
    for entry in counts {
        println!(
            "  {:<28} {:>6}  {}",
            truncate_str(&entry.label, 28),
            entry.count,
            bar(entry.count, max)
        );
    }
    println!();
}

fn print_histogram(title: &str, histogram: &Histogram) {
    println!("{}", title);
    println!("{}", "-".repeat(40));
    if histogram.is_empty() {
        println!("  (no data)");
    }
    let max = histogram.max_count();
    for bin in histogram.bins.iter().filter(|b| b.count > 0) {
        println!(
            "  {:>8.1} - {:<8.1} {:>6}  {}",
            bin.lower,
            bin.upper,
            bin.count,
            bar(bin.count, max)
        );
    }
    println!();
}

/// Print the dashboard as plain text.
///
/// This output uses `println!` intentionally: it is the product of the
/// command and must show regardless of log level.
fn print_human_readable_summary(report: &DashboardReport) {
    let dashboard: &DashboardSnapshot = &report.dashboard;

    println!();
    println!("{}", "=".repeat(80));
    println!("TITLE EXPLORER");
    println!("{}", "=".repeat(80));
    println!();
    println!("Input:   {}", report.input_file);
    let types: Vec<&str> = report
        .filter
        .content_types
        .iter()
        .map(TitleType::as_str)
        .collect();
    println!("Types:   {}", types.join(", "));
    println!("Country: {}", report.filter.country_label());
    for action in report.load_summary.describe() {
        println!("  - {}", action);
    }
    println!();
    println!("Showing {} Titles", dashboard.title_count);
    println!();

    print_counts("Distribution of Content Type", &dashboard.type_counts);
    print_counts("Top Popular Genres", &dashboard.top_genres);
    print_histogram("Content Release Trend Over Years", &dashboard.release_years);
    print_counts("Top Content Producing Countries", &dashboard.top_countries);
    match &dashboard.movie_durations {
        Some(histogram) => print_histogram("Distribution of Movie Durations (minutes)", histogram),
        None => {
            println!("Distribution of Movie Durations (minutes)");
            println!("{}", "-".repeat(40));
            println!("  No movie data available for the selected filters.");
            println!();
        }
    }

    println!("Summary Statistics");
    println!("{}", "-".repeat(40));
    println!("  Total Titles: {}", dashboard.summary.total);
    println!("  Movies:       {}", dashboard.summary.movies);
    println!("  TV Shows:     {}", dashboard.summary.tv_shows);
    println!("{}", "=".repeat(80));
}
