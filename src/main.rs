//! dcmcohort: batch DICOM cohort cataloguer.
//!
//! Thin binary entry point. All logic lives in the `dcmcohort-core`
//! crate; this file parses arguments, initialises logging, and reports
//! the outcome.

use anyhow::Context;
use clap::Parser;
use dcmcohort_core::collect::CohortCollector;
use dcmcohort_core::config::{CollectorConfig, DEFAULT_DATA_SUFFIX};
use dcmcohort_core::metadata::DicomReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::prelude::*;

#[derive(Parser)]
#[command(
    name = "dcmcohort",
    version,
    about = "Collect DICOM cohort demographics into one CSV report"
)]
struct Args {
    /// Root of the directory tree holding participant imaging folders
    #[arg(long)]
    source: PathBuf,

    /// Where the report and run log go (defaults to the source directory)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Identifier prefix, e.g. "HC" in HC005
    #[arg(long, default_value = "HC")]
    prefix: String,

    /// Width of the zero-padded numeric order inside an identifier
    #[arg(long, default_value_t = 3)]
    digits: usize,

    /// Identifier suffix (often empty)
    #[arg(long, default_value = "")]
    suffix: String,

    /// Suffix a file must carry to count as imaging data (case-sensitive)
    #[arg(long, default_value = DEFAULT_DATA_SUFFIX)]
    data_suffix: String,
}

/// Timestamp format for log entries.
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One process-scoped subscriber, initialised once: an ANSI-free layer
/// appending to the fixed-name run log next to the report, plus a layer on
/// stderr for interactive use.
fn init_logging(log_path: &Path) -> anyhow::Result<()> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .with_context(|| format!("opening log file {}", log_path.display()))?;

    let file_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_timer(ChronoLocal::new(TIME_FORMAT.to_owned()))
        .with_writer(Arc::new(file));
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_timer(ChronoLocal::new(TIME_FORMAT.to_owned()))
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .with(LevelFilter::INFO)
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Configuration is validated before logging: the log lives in the
    // output directory, which only a valid configuration can name.
    let config = CollectorConfig::new(
        args.source,
        args.output,
        args.prefix,
        args.digits,
        args.suffix,
    )?
    .with_data_suffix(args.data_suffix);

    init_logging(&config.log_path())?;
    tracing::info!("dcmcohort starting, source {}", config.source_dir.display());

    let collector = CohortCollector::new(config, DicomReader::new());
    if let Err(err) = collector.run() {
        tracing::error!("cohort collection failed: {err}");
        return Err(err.into());
    }

    tracing::info!("dcmcohort finished");
    Ok(())
}
