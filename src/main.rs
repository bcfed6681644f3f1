//! CLI entry point for the wind frequency analysis tool.
//!
//! Provides subcommands for aggregating a single observation file and for
//! batch-processing a directory of observation files, one table per file.

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};
use windrose_freq::{
    output::{print_json, write_pivot_csv, write_table_csv},
    parser::read_observations,
    rose::{
        aggregate::aggregate,
        compass::SectorMode,
        speed::SpeedScaleSpec,
        types::AggregateOptions,
    },
};

#[derive(Parser)]
#[command(name = "windrose_freq")]
#[command(about = "Aggregates wind observations into direction/speed frequency tables", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct RoseArgs {
    /// Compass rose granularity: 8 or 16 sectors
    #[arg(short, long, default_value_t = 16)]
    sectors: u32,

    /// Derive equal-width speed classes from the dataset instead of the fixed knot bins
    #[arg(long, default_value_t = false)]
    dynamic_bins: bool,

    /// Add a percentage-of-total column to every cell
    #[arg(short, long, default_value_t = false)]
    percentage: bool,

    /// Keep only observations from this calendar month (1-12, any year)
    #[arg(short, long)]
    month: Option<u32>,
}

impl RoseArgs {
    fn to_options(&self) -> Result<AggregateOptions> {
        let sector_mode = match self.sectors {
            8 => SectorMode::Eight,
            16 => SectorMode::Sixteen,
            other => bail!("unsupported sector count: {} (expected 8 or 16)", other),
        };
        if let Some(month) = self.month {
            if !(1..=12).contains(&month) {
                bail!("month out of range: {} (expected 1-12)", month);
            }
        }
        let scale = if self.dynamic_bins {
            SpeedScaleSpec::Dynamic
        } else {
            SpeedScaleSpec::FixedDefault
        };
        Ok(AggregateOptions {
            sector_mode,
            scale,
            percentage: self.percentage,
            month: self.month,
        })
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate a single observation CSV into a frequency table
    Analyze {
        /// Path to the observation CSV
        #[arg(value_name = "FILE")]
        source: PathBuf,

        /// CSV file to write the long-form table to
        #[arg(short, long, default_value = "table.csv")]
        output: PathBuf,

        /// Optional CSV file for the pivoted (speed class rows, sector columns) table
        #[arg(long)]
        pivot: Option<PathBuf>,

        /// Also log the table as pretty-printed JSON
        #[arg(long, default_value_t = false)]
        json: bool,

        #[command(flatten)]
        rose: RoseArgs,
    },
    /// Aggregate every observation CSV in a directory, one table per file
    Batch {
        /// Directory containing observation CSVs
        #[arg(value_name = "DIR")]
        input_dir: PathBuf,

        /// Directory to write the frequency tables to
        #[arg(short, long, default_value = "tables")]
        output_dir: PathBuf,

        #[command(flatten)]
        rose: RoseArgs,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/windrose_freq.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("windrose_freq.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            source,
            output,
            pivot,
            json,
            rose,
        } => {
            let options = rose.to_options()?;
            analyze_file(&source, &output, pivot.as_deref(), json, &options)?;
        }
        Commands::Batch {
            input_dir,
            output_dir,
            rose,
        } => {
            let options = rose.to_options()?;
            batch(&input_dir, &output_dir, &options)?;
        }
    }

    Ok(())
}

/// Runs the full pipeline for one observation file: read, aggregate, write.
#[tracing::instrument(skip(options, pivot, json), fields(source = %source.display()))]
fn analyze_file(
    source: &Path,
    output: &Path,
    pivot: Option<&Path>,
    json: bool,
    options: &AggregateOptions,
) -> Result<()> {
    let records = read_observations(source)?;
    let table = aggregate(&records, options)
        .with_context(|| format!("aggregating {}", source.display()))?;

    info!(
        rows = records.len(),
        counted = table.total_count,
        mean_speed = table.speed_summary.mean,
        max_speed = table.speed_summary.max,
        "aggregation complete"
    );

    write_table_csv(output, &table)?;
    if let Some(pivot_path) = pivot {
        write_pivot_csv(pivot_path, &table)?;
    }
    if json {
        print_json(&table)?;
    }

    info!(output = %output.display(), "Frequency table written");
    Ok(())
}

/// Aggregates every `.csv` file in a directory into its own frequency table.
/// A failing file is logged and skipped; the rest of the batch proceeds.
#[tracing::instrument(skip(options), fields(input_dir = %input_dir.display()))]
fn batch(input_dir: &Path, output_dir: &Path, options: &AggregateOptions) -> Result<()> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("creating {}", output_dir.display()))?;

    let mut processed = 0usize;
    let mut failed = 0usize;

    let entries = std::fs::read_dir(input_dir)
        .with_context(|| format!("reading {}", input_dir.display()))?;

    for entry in entries {
        let entry = entry?;
        let path = entry.path();

        if path.extension().and_then(OsStr::to_str) != Some("csv") {
            continue;
        }

        let stem = path
            .file_stem()
            .and_then(OsStr::to_str)
            .unwrap_or("table");
        let output = output_dir.join(format!("{}_freq.csv", stem));

        match analyze_file(&path, &output, None, false, options) {
            Ok(()) => processed += 1,
            Err(e) => {
                failed += 1;
                error!(file = %path.display(), error = %e, "file failed, skipping");
            }
        }
    }

    info!(processed, failed, "batch complete");
    Ok(())
}
