/// A directory claimed by a participant: the folder name plus its path.
use compact_str::CompactString;
use std::path::{Path, PathBuf};

/// Equality and hashing cover both fields, which is exactly what discovery
/// deduplication relies on: the same path can be reached through both the
/// named-match and descendant-expansion phases, and distinct folders may
/// share a name in different places.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FolderRef {
    /// Final path component only.
    pub name: CompactString,
    /// Full path of the directory.
    pub path: PathBuf,
}

impl FolderRef {
    /// Build a ref from a directory path; the name is the final component.
    pub fn from_path(path: &Path) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();
        Self {
            name: CompactString::new(name),
            path: path.to_path_buf(),
        }
    }
}
