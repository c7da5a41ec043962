/// Error taxonomy for the collection pipeline.
///
/// Containment policy: anything that can fail for a single participant is
/// caught and logged at the cohort loop boundary; only a startup
/// configuration problem or an empty cohort table at final persistence
/// aborts the whole run.
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CollectError {
    /// The configured source directory does not exist.
    #[error("source directory does not exist: {}", .0.display())]
    MissingSourceDir(PathBuf),

    /// A participant order's decimal form does not fit the digit width.
    #[error("order {order} does not fit in {digits} digits")]
    OrderTooWide { order: u32, digits: usize },

    /// An identifier did not yield a numeric order under the configured
    /// pattern.
    #[error("no numeric order could be extracted from {0}")]
    OrderNotFound(String),

    /// The emptiness check was pointed at something that is not a directory.
    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// A representative file vanished between listing and metadata read.
    #[error("representative file is missing: {}", .0.display())]
    MissingFile(PathBuf),

    /// The finished cohort table contains no rows; nothing is written.
    #[error("cohort table is empty, no output written")]
    EmptyCohort,

    #[error("invalid identifier pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("writing demographics table: {0}")]
    Csv(#[from] csv::Error),
}
