/// dcmcohort Core: discovery, clustering, and cohort collection.
///
/// This crate contains all business logic with zero CLI dependencies.
/// The binary only parses arguments, initialises logging, and calls
/// [`collect::CohortCollector::run`].
///
/// # Modules
///
/// - [`model`]: participant identity, folder references, and the output
///   table.
/// - [`scanner`]: sequential folder walking, emptiness check, and
///   participant folder discovery.
/// - [`analysis`]: size-based subtype clustering.
/// - [`metadata`]: the extraction collaborator boundary and its DICOM
///   implementation.
/// - [`collect`]: the per-participant state machine and the cohort loop.
/// - [`export`]: CSV persistence.
/// - [`config`], [`error`]: run configuration and the error taxonomy.
pub mod analysis;
pub mod collect;
pub mod config;
pub mod error;
pub mod export;
pub mod metadata;
pub mod model;
pub mod scanner;
