//! FILENAME: app/cli/src/main.rs
//! ntis-prep: groups NTIS project exports into project lineages and writes
//! the detailed or summary view.
//!
//! Usage:
//!   ntis-prep detailed --input export.xlsx
//!   ntis-prep summary --input export.xlsx --output summary.json --format json
//!   ntis-prep summary --input data.xlsx --preset default --config columns.toml

mod config;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use engine::{build_groups, LinkageReport, Table};
use log::info;
use persistence::{load_table, save_json, save_table, DETAILED_SHEET_NAME, SUMMARY_SHEET_NAME};
use pivot_engine::build_summary;

use crate::config::{load_schema, Preset};

#[derive(Parser)]
#[command(version, about = "Project lineage grouping and budget summaries for NTIS exports.")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Every deduplicated record with its GroupID, sorted by group and year.
    Detailed(RunArgs),
    /// One row per group with totals and per-year budget columns.
    Summary(RunArgs),
}

#[derive(Args)]
struct RunArgs {
    /// Export workbook to read.
    #[arg(long, short)]
    input: PathBuf,

    /// Output file. Defaults to ntis_<view>_view.<format> in the working directory.
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Worksheet to read. Defaults to the first sheet.
    #[arg(long)]
    sheet: Option<String>,

    /// TOML file overriding column names of the preset.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Built-in column layout.
    #[arg(long, value_enum, default_value_t = Preset::Ntis)]
    preset: Preset,

    /// Output encoding.
    #[arg(long, value_enum, default_value_t = OutputFormat::Xlsx)]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Xlsx,
    Json,
}

impl OutputFormat {
    fn extension(self) -> &'static str {
        match self {
            OutputFormat::Xlsx => "xlsx",
            OutputFormat::Json => "json",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum View {
    Detailed,
    Summary,
}

impl View {
    fn sheet_name(self) -> &'static str {
        match self {
            View::Detailed => DETAILED_SHEET_NAME,
            View::Summary => SUMMARY_SHEET_NAME,
        }
    }

    fn default_output(self, format: OutputFormat) -> PathBuf {
        PathBuf::from(format!("ntis_{}.{}", self.sheet_name(), format.extension()))
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Command::Detailed(args) => run(View::Detailed, &args),
        Command::Summary(args) => run(View::Summary, &args),
    }
}

fn run(view: View, args: &RunArgs) -> Result<()> {
    let schema = load_schema(args.preset, args.config.as_deref())?;

    let input = load_table(&args.input, args.sheet.as_deref())
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    info!(
        "loaded {} rows, {} columns from {}",
        input.len(),
        input.columns.len(),
        args.input.display()
    );

    let (table, report) = match view {
        View::Detailed => {
            let detailed =
                build_groups(&input, &schema).context("Failed to build detailed view")?;
            (detailed.table, Some(detailed.report))
        }
        View::Summary => {
            let summary =
                build_summary(&input, &schema).context("Failed to build summary view")?;
            if let Some(window) = summary.window {
                info!("pivot window {}..={}", window.first_year, window.last_year);
            }
            (summary.table, summary.report)
        }
    };

    if let Some(report) = &report {
        log_report(report);
    }

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| view.default_output(args.format));
    write_output(&table, &output, view, args.format)?;

    info!("wrote {} rows to {}", table.len(), output.display());
    println!("{}", output.display());
    Ok(())
}

fn log_report(report: &LinkageReport) {
    info!("input rows:         {}", report.input_rows);
    info!("duplicates removed: {}", report.duplicates_removed);
    info!("output rows:        {}", report.output_rows);
    info!("groups:             {}", report.group_count);
    if report.unassigned_rows > 0 {
        info!("rows without sub-task id: {}", report.unassigned_rows);
    }
}

fn write_output(table: &Table, path: &Path, view: View, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Xlsx => save_table(table, path, view.sheet_name()),
        OutputFormat::Json => save_json(table, path),
    }
    .with_context(|| format!("Failed to write {}", path.display()))
}
