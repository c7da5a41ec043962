/// Folder emptiness check: does a directory hold any qualifying data files
/// once known junk entries are excluded?
use crate::config::IGNORED_ENTRIES;
use crate::error::CollectError;
use std::path::{Path, PathBuf};

/// True iff `path` contains no entry whose name ends in `data_suffix`
/// after the fixed junk-entry list is excluded.
///
/// Name-based and case-sensitive, mirroring how the source cohorts are
/// laid out; type filtering happens in [`list_data_files`]. No side
/// effects. Errors with [`CollectError::NotADirectory`] when `path` is not
/// a directory.
pub fn is_folder_empty(path: &Path, data_suffix: &str) -> Result<bool, CollectError> {
    if !path.is_dir() {
        return Err(CollectError::NotADirectory(path.to_path_buf()));
    }

    for entry in std::fs::read_dir(path)? {
        let entry = entry?;
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if IGNORED_ENTRIES.contains(&name.as_ref()) {
            continue;
        }
        if name.ends_with(data_suffix) {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Qualifying regular files directly inside `path`, sorted by name.
///
/// Directory listing order is OS-arbitrary; sorting gives the downstream
/// clustering a platform-independent insertion order.
pub fn list_data_files(path: &Path, data_suffix: &str) -> Result<Vec<PathBuf>, CollectError> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(path)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        if entry.file_name().to_string_lossy().ends_with(data_suffix) {
            files.push(entry.path());
        }
    }
    files.sort();
    Ok(files)
}
