/// Three-phase participant folder discovery.
///
/// A participant's files can sit in folders named after the participant, or
/// in anonymized subfolders whose names carry no identifier at all but
/// which are nested beneath a participant-named ancestor:
///
/// ```text
/// file/
///   sub-012/
///     000000001/   192 data files
///     000000002/   9760 data files
///   sub-013/
///     208 data files
///     sub-013_001/  76 data files
///   sub-014_001/   208 data files
/// ```
///
/// Phase 1 records every directory whose name contains the general ID;
/// phase 2 adds every descendant of a phase-1 folder regardless of name;
/// phase 3 deduplicates and drops folders without qualifying data files.
use crate::error::CollectError;
use crate::model::FolderRef;
use crate::scanner::emptiness::is_folder_empty;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Discovers the folders belonging to one participant.
#[derive(Debug, Clone)]
pub struct FolderDiscoverer {
    source_dir: PathBuf,
    data_suffix: String,
}

impl FolderDiscoverer {
    pub fn new(source_dir: impl Into<PathBuf>, data_suffix: impl Into<String>) -> Self {
        Self {
            source_dir: source_dir.into(),
            data_suffix: data_suffix.into(),
        }
    }

    /// All folders plausibly owned by `general_id`: deduplicated,
    /// non-empty, sorted ascending by name and then path so downstream
    /// labels come out in a stable order.
    ///
    /// Zero matches is an empty result, not an error; the participant is
    /// simply skipped downstream.
    pub fn discover(&self, general_id: &str) -> Result<Vec<FolderRef>, CollectError> {
        let named = self.collect_named_folders(general_id);
        let candidates = expand_descendants(named);
        let mut eligible = self.exclude_ineligible(candidates)?;
        eligible.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.path.cmp(&b.path)));
        Ok(eligible)
    }

    /// Phase 1: every directory in the source tree whose own name contains
    /// the general ID as a substring.
    fn collect_named_folders(&self, general_id: &str) -> Vec<FolderRef> {
        dirs_beneath(&self.source_dir)
            .filter(|folder| folder.name.contains(general_id))
            .collect()
    }

    /// Phase 3: drop exact (name, path) duplicates, then folders the
    /// emptiness check rejects. A candidate that stopped being a directory
    /// mid-run surfaces as `NotADirectory`, which the cohort loop treats
    /// as a participant-level failure.
    fn exclude_ineligible(
        &self,
        candidates: Vec<FolderRef>,
    ) -> Result<Vec<FolderRef>, CollectError> {
        let unique: HashSet<FolderRef> = candidates.into_iter().collect();
        let mut eligible = Vec::with_capacity(unique.len());
        for folder in unique {
            if !is_folder_empty(&folder.path, &self.data_suffix)? {
                eligible.push(folder);
            }
        }
        Ok(eligible)
    }
}

/// Phase 2: descendants of every phase-1 folder, whatever their names.
/// This is what recovers anonymized subfolders; duplicates with phase 1
/// are expected and removed in phase 3.
fn expand_descendants(named: Vec<FolderRef>) -> Vec<FolderRef> {
    let mut descendants = Vec::new();
    for folder in &named {
        descendants.extend(dirs_beneath(&folder.path));
    }
    let mut combined = named;
    combined.extend(descendants);
    combined
}

/// Every directory strictly beneath `root`, in walk order. Unreadable
/// entries are skipped; the walk itself never fails.
fn dirs_beneath(root: &Path) -> impl Iterator<Item = FolderRef> + '_ {
    WalkDir::new(root)
        .min_depth(1)
        .follow_links(false)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_dir())
        .map(|entry| FolderRef::from_path(entry.path()))
}
