/// Scanner module: sequential directory walking for the collection
/// pipeline.
///
/// - [`emptiness`]: junk-aware check that a folder holds qualifying data
///   files, plus the sorted data-file listing.
/// - [`discovery`]: three-phase participant folder discovery.
///
/// Walks are fully materialised per call and strictly sequential; one
/// participant's tree is small relative to memory and the batch model has
/// no concurrency.
pub mod discovery;
pub mod emptiness;

pub use discovery::FolderDiscoverer;
pub use emptiness::{is_folder_empty, list_data_files};
