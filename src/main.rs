//! modelscan - extract the layout of a spreadsheet financial model

mod error;
mod report;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use modelscan_core::{
    ExportDocument, WorkbookAnalyzer, load_config, load_workbook, write_fields_csv,
};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::error::{CliError, exit_code};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Full analysis as JSON
    Json,
    /// Human-readable outline
    Summary,
    /// Flattened metadata, sections and fields as JSON
    Export,
    /// One CSV row per field
    Csv,
}

#[derive(Parser, Debug)]
#[command(
    name = "modelscan",
    version,
    about = "Extract sections, headings and fields from a spreadsheet financial model"
)]
struct Args {
    /// Workbook to analyze (.grd, .csv, .xlsx, .xlsm, .xlsb, .xls, .ods)
    file: PathBuf,

    /// Config file (default: <config dir>/modelscan/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Write output to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Refuse workbooks whose scanned area exceeds this many cells
    #[arg(long)]
    max_cells: Option<usize>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = if verbose > 0 {
        EnvFilter::new(default_level)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(args: Args) -> Result<()> {
    let (mut config, _warnings) = load_config(args.config.as_deref());
    if args.max_cells.is_some() {
        config.max_cells = args.max_cells;
    }
    debug!(
        keywords = config.section_keywords.len(),
        max_cells = ?config.max_cells,
        "scan config"
    );

    let source = args.file.display().to_string();
    let workbook =
        load_workbook(&args.file).with_context(|| format!("Failed to load {}", source))?;

    let analyzer = WorkbookAnalyzer::new(&config);
    let analysis = analyzer
        .analyze(&workbook)
        .with_context(|| format!("Failed to analyze {}", source))?;

    let mut out: Box<dyn Write> = match args.output.as_ref() {
        Some(path) => {
            let file = File::create(path).map_err(|source| CliError::Output {
                path: path.display().to_string(),
                source,
            })?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    match args.format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &analysis)?;
            writeln!(out)?;
        }
        OutputFormat::Summary => {
            write!(out, "{}", report::render_summary(&analysis, &source)?)?;
        }
        OutputFormat::Export => {
            serde_json::to_writer_pretty(&mut out, &ExportDocument::from(&analysis))?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            write_fields_csv(&mut out, &ExportDocument::from(&analysis))?;
        }
    }
    out.flush()?;

    if let Some(path) = args.output.as_ref() {
        eprintln!("Wrote {}", path.display());
    }
    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(err) = run(args) {
        eprintln!("Error: {:#}", err);
        std::process::exit(exit_code(&err));
    }
}
