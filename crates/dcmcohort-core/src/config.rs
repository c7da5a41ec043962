/// Collector configuration and the fixed constants of the pipeline.
use crate::error::CollectError;
use std::path::PathBuf;

/// Directory entries the emptiness check ignores. macOS drops these into
/// folders it has merely indexed; none of them are imaging data.
pub const IGNORED_ENTRIES: [&str; 6] = [
    ".DS_Store",
    "._",
    ".Spotlight-V100",
    ".Trashes",
    ".TemporaryItems",
    ".fseventsd",
];

/// Suffix a file must carry to count as imaging data. Case-sensitive:
/// scanners in the source cohorts write uppercase `.DCM`.
pub const DEFAULT_DATA_SUFFIX: &str = ".DCM";

/// Two files whose sizes differ by at most this many KB are assigned to the
/// same acquisition subtype.
pub const SIZE_TOLERANCE_KB: f64 = 3.0;

/// Fixed name of the append-only run log, created in the output directory.
pub const LOG_FILE_NAME: &str = "dcmcohort.log";

/// Fixed name of the demographics report, overwritten on each run.
pub const OUTPUT_FILE_NAME: &str = "Demographics.csv";

/// Everything one collection run needs to know.
///
/// `new` validates the source directory up front so a bad path fails before
/// any walking starts. The output directory falls back to the source
/// directory when absent or nonexistent.
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    /// Root of the tree holding participant imaging folders.
    pub source_dir: PathBuf,
    /// Where the report and run log are written.
    pub output_dir: PathBuf,
    /// Identifier prefix, e.g. `HC` in `HC005`.
    pub id_prefix: String,
    /// Width of the zero-padded numeric order inside an identifier.
    pub order_digits: usize,
    /// Identifier suffix, often empty.
    pub id_suffix: String,
    /// Qualifying data file suffix, see [`DEFAULT_DATA_SUFFIX`].
    pub data_suffix: String,
}

impl CollectorConfig {
    pub fn new(
        source_dir: impl Into<PathBuf>,
        output_dir: Option<PathBuf>,
        id_prefix: impl Into<String>,
        order_digits: usize,
        id_suffix: impl Into<String>,
    ) -> Result<Self, CollectError> {
        let source_dir = source_dir.into();
        if !source_dir.exists() {
            return Err(CollectError::MissingSourceDir(source_dir));
        }

        let output_dir = match output_dir {
            Some(dir) if dir.exists() => dir,
            _ => source_dir.clone(),
        };

        Ok(Self {
            source_dir,
            output_dir,
            id_prefix: id_prefix.into(),
            order_digits,
            id_suffix: id_suffix.into(),
            data_suffix: DEFAULT_DATA_SUFFIX.to_string(),
        })
    }

    /// Override the qualifying data file suffix.
    pub fn with_data_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.data_suffix = suffix.into();
        self
    }

    /// Full path of the demographics report.
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(OUTPUT_FILE_NAME)
    }

    /// Full path of the run log.
    pub fn log_path(&self) -> PathBuf {
        self.output_dir.join(LOG_FILE_NAME)
    }
}
