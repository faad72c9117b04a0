//! framefmt - Show tabular data files in the terminal

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use framefmt::config::{ConfigStore, DisplayOptions, OutputFormat};
use framefmt::output::{JsonOutput, OutputFactory, OutputFormatter};
use framefmt::parser::ParserFactory;
use framefmt::show::{Renderer, RowLimit, DEFAULT_SHOW_LIMIT};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliOutputFormat {
    Table,
    Html,
    Json,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(f: CliOutputFormat) -> Self {
        match f {
            CliOutputFormat::Table => OutputFormat::Table,
            CliOutputFormat::Html => OutputFormat::Html,
            CliOutputFormat::Json => OutputFormat::Json,
        }
    }
}

/// Show tabular data files (CSV, JSON) as formatted tables
#[derive(Parser, Debug)]
#[command(name = "framefmt")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// File to show
    file: PathBuf,

    /// Number of rows to show; negative values drop rows from the end
    #[arg(short = 'n', long, allow_negative_numbers = true, conflicts_with = "all")]
    limit: Option<i64>,

    /// Show every row
    #[arg(long)]
    all: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    format: CliOutputFormat,

    /// Emit JSON on a single line
    #[arg(long)]
    compact: bool,

    /// Display option as key=value (repeatable), e.g. tbl_formatting=ASCII_FULL
    #[arg(short, long = "set", value_name = "KEY=VALUE")]
    set: Vec<String>,

    /// Load display options from a JSON file
    #[arg(long, value_name = "FILE")]
    options: Option<PathBuf>,
}

fn main() -> ExitCode {
    init_tracing();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let store = ConfigStore::from_env().context("Invalid FRAMEFMT_* environment variable")?;

    let mut overrides = match &cli.options {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read options file: {}", path.display()))?;
            DisplayOptions::from_json(&json)?
        }
        None => DisplayOptions::new(),
    };
    for assignment in &cli.set {
        overrides.set_assignment(assignment)?;
    }

    let table = ParserFactory::new()
        .parse(&cli.file)
        .with_context(|| format!("Failed to parse file: {}", cli.file.display()))?;

    let limit = if cli.all {
        RowLimit::All
    } else {
        RowLimit::Head(cli.limit.unwrap_or(DEFAULT_SHOW_LIMIT))
    };

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match OutputFormat::from(cli.format) {
        OutputFormat::Table => {
            Renderer::with_store(&store).show(&table, limit, &overrides, &mut handle)?;
        }
        format => {
            let _guard = store.scoped(overrides);
            let mut config = store.snapshot();
            config.tbl_rows = None;
            let table = table.head(limit.rows(table.height()));
            let formatter: Box<dyn OutputFormatter> = match format {
                OutputFormat::Json if cli.compact => Box::new(JsonOutput::compact()),
                format => OutputFactory::create(format),
            };
            formatter.render(&table, &config, &mut handle)?;
        }
    }

    handle.flush()?;
    Ok(())
}
