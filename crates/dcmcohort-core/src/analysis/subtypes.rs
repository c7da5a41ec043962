/// Subtype clustering by approximate file size.
///
/// Files written by the same acquisition land within a few KB of each
/// other, while different acquisitions differ by far more. Clusters are
/// keyed by the truncated KB size of the file that opened them; a new file
/// joins the first existing cluster whose key is within
/// [`SIZE_TOLERANCE_KB`] of its own size.
///
/// This is deliberate first-fit, not best-fit: clusters are scanned in
/// creation order and the first match wins even when a later cluster key is
/// closer. Assignment therefore depends on insertion order, which is why
/// the file listing is sorted by name upstream.
use crate::config::SIZE_TOLERANCE_KB;
use crate::error::CollectError;
use crate::model::{FolderRef, SubtypeRecord};
use crate::scanner::list_data_files;
use std::path::PathBuf;
use tracing::error;

/// One size cluster under construction.
struct SizeCluster {
    /// Truncated KB size of the file that opened the cluster.
    key_kb: u64,
    files: Vec<PathBuf>,
}

/// Partition a folder's qualifying files into subtypes.
///
/// A single resulting cluster keeps the bare folder name as its label and
/// counts every qualifying file; two or more get
/// `"{folder}-{index}({key}size)"` labels in cluster-creation order, each
/// counting its own members. The representative is the first file that
/// entered the cluster.
///
/// A folder with no qualifying files logs a diagnostic and yields an empty
/// list; the participant pipeline continues with its remaining folders.
pub fn cluster_folder(
    folder: &FolderRef,
    data_suffix: &str,
) -> Result<Vec<SubtypeRecord>, CollectError> {
    let files = list_data_files(&folder.path, data_suffix)?;
    if files.is_empty() {
        error!(
            "no data files found in folder {} ({})",
            folder.name,
            folder.path.display()
        );
        return Ok(Vec::new());
    }
    let files_total = files.len();

    let mut clusters: Vec<SizeCluster> = Vec::new();
    for file in files {
        let size_kb = std::fs::metadata(&file)?.len() as f64 / 1024.0;
        let existing = clusters
            .iter()
            .position(|cluster| (size_kb - cluster.key_kb as f64).abs() <= SIZE_TOLERANCE_KB);
        match existing {
            Some(index) => clusters[index].files.push(file),
            None => clusters.push(SizeCluster {
                key_kb: size_kb as u64,
                files: vec![file],
            }),
        }
    }

    let records = if clusters.len() == 1 {
        vec![SubtypeRecord {
            label: folder.name.to_string(),
            representative: clusters[0].files[0].clone(),
            file_count: files_total,
        }]
    } else {
        clusters
            .iter()
            .enumerate()
            .map(|(index, cluster)| SubtypeRecord {
                label: format!("{}-{}({}size)", folder.name, index, cluster.key_kb),
                representative: cluster.files[0].clone(),
                file_count: cluster.files.len(),
            })
            .collect()
    };

    Ok(records)
}
