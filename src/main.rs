//! xlcompare - compare two spreadsheets whose rows carry unique IDs

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::LevelFilter;

use xlcompare::config::{
    Config, OutputFormat, DEFAULT_COL_WIDTH_MAX, DEFAULT_ID_COLUMN, DEFAULT_MAX_DIFF_CHARS,
};
use xlcompare::diff::compute_diff;
use xlcompare::error::CompareError;
use xlcompare::logging;
use xlcompare::model::Table;
use xlcompare::output::{render_to_file, render_to_stdout};
use xlcompare::parser::ParserFactory;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliOutputFormat {
    Xlsx,
    Json,
    Terminal,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(f: CliOutputFormat) -> Self {
        match f {
            CliOutputFormat::Xlsx => OutputFormat::Xlsx,
            CliOutputFormat::Json => OutputFormat::Json,
            CliOutputFormat::Terminal => OutputFormat::Terminal,
        }
    }
}

/// Compares Excel or CSV files (first sheet only) with headers and unique row IDs; generates diff.xlsx.
#[derive(Parser, Debug)]
#[command(name = "xlcompare")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Old Excel file
    old_file: PathBuf,

    /// New Excel file
    new_file: PathBuf,

    /// ID column heading
    #[arg(long, default_value = DEFAULT_ID_COLUMN)]
    id: String,

    /// Output file of differences [default: diff.xlsx, or diff.json with --format json]
    #[arg(short, long)]
    outfile: Option<PathBuf>,

    /// Maximum column width in output file
    #[arg(long = "colwidthmax", default_value_t = DEFAULT_COL_WIDTH_MAX)]
    col_width_max: usize,

    /// Output format
    #[arg(short, long, value_enum, default_value = "xlsx")]
    format: CliOutputFormat,

    /// For Excel files: which sheet to compare instead of the first
    #[arg(long)]
    sheet: Option<String>,

    /// Compare ID values verbatim instead of stripping float formatting ("7.0" -> "7")
    #[arg(long)]
    no_normalize_id: bool,

    /// Cells longer than this many characters are shown as whole-cell replacements
    #[arg(long, default_value_t = DEFAULT_MAX_DIFF_CHARS)]
    max_diff_chars: usize,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long)]
    log_level: Option<LevelFilter>,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ERROR: {:#}", e);
            ExitCode::from(1)
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    logging::init(logging::resolve_level(cli.log_level)).context("Failed to install logger")?;

    let format = OutputFormat::from(cli.format);
    let outfile = cli
        .outfile
        .unwrap_or_else(|| PathBuf::from(format.default_outfile()));

    let mut config = Config::new(cli.old_file, cli.new_file)
        .with_id_column(cli.id)
        .with_outfile(outfile)
        .with_col_width_max(cli.col_width_max)
        .with_output_format(format)
        .with_normalize_ids(!cli.no_normalize_id)
        .with_max_diff_chars(cli.max_diff_chars);
    if let Some(sheet) = cli.sheet {
        config = config.with_sheet_name(sheet);
    }

    // Verify that files exist before reading either
    for path in [&config.old_file, &config.new_file] {
        if !path.is_file() {
            return Err(CompareError::file_not_found(path.display().to_string()).into());
        }
    }

    let factory = ParserFactory::new();
    let old_table = load(&factory, &config.old_file, &config, "old")?;
    let new_table = load(&factory, &config.new_file, &config, "new")?;

    let diff = compute_diff(&old_table, &new_table, &config)?;

    for notice in diff.header.notices() {
        println!("{}", notice);
    }

    if config.output_format.writes_file() {
        render_to_file(&diff, &config.outfile, config.output_format)?;
        for line in diff.stats.report() {
            println!("{}", line);
        }
        println!("Generated {}", config.outfile.display());
    } else {
        render_to_stdout(&diff, config.output_format)?;
    }

    println!("Done.");
    Ok(())
}

fn load(factory: &ParserFactory, path: &Path, config: &Config, role: &str) -> Result<Table> {
    let table = factory
        .parse(path, config)
        .with_context(|| format!("Failed to parse {} file: {}", role, path.display()))?;
    println!("{}: Reading: {}", path.display(), table.name);
    Ok(table)
}
