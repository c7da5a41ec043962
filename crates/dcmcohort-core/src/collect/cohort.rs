/// Cohort-level collection: identifier discovery, the per-participant
/// loop, and final persistence.
///
/// Every per-participant failure is contained here: the aggregator returns
/// a tagged result, the loop logs the failure with the identifier and
/// moves on. Only startup configuration problems and an empty finished
/// table abort the run.
use crate::collect::ParticipantCollector;
use crate::config::CollectorConfig;
use crate::error::CollectError;
use crate::export;
use crate::metadata::MetadataReader;
use crate::model::{CohortTable, ParticipantId, ParticipantRow};
use regex::Regex;
use tracing::{error, info, warn};
use walkdir::WalkDir;

/// Drives one full batch pass over the cohort.
pub struct CohortCollector<R> {
    config: CollectorConfig,
    reader: R,
}

impl<R: MetadataReader> CohortCollector<R> {
    pub fn new(config: CollectorConfig, reader: R) -> Self {
        Self { config, reader }
    }

    /// Discover identifiers, collect each participant in order, write the
    /// merged table.
    pub fn run(&self) -> Result<(), CollectError> {
        let pattern = self.id_pattern()?;
        let participant_ids = self.discover_participants(&pattern);
        info!(
            "{} participant identifiers discovered under {}",
            participant_ids.len(),
            self.config.source_dir.display()
        );

        let mut cohort = CohortTable::new();
        for general_id in &participant_ids {
            match self.collect_participant(general_id, &pattern) {
                Ok(rows) if !rows.is_empty() => {
                    cohort.append(rows);
                    info!("{general_id}: participant processed successfully");
                }
                Ok(_) => {
                    error!("{general_id}: data collection finished without output");
                }
                Err(err) => {
                    warn!("{general_id}: participant failed: {err}");
                }
            }
        }

        self.persist(&cohort)
    }

    /// The `prefix + \d{width} + suffix` identifier pattern, with the
    /// order digits captured for numeric extraction. Prefix and suffix are
    /// escaped literals; only the digit group is structural.
    fn id_pattern(&self) -> Result<Regex, CollectError> {
        let pattern = format!(
            "{}(\\d{{{}}}){}",
            regex::escape(&self.config.id_prefix),
            self.config.order_digits,
            regex::escape(&self.config.id_suffix),
        );
        Ok(Regex::new(&pattern)?)
    }

    /// Walk the whole tree once and collect every directory-name region
    /// matching the identifier pattern. Matches are substrings, so
    /// `sub-014_001` yields `sub-014`. Deduplicated and sorted ascending.
    fn discover_participants(&self, pattern: &Regex) -> Vec<String> {
        let mut ids: Vec<String> = WalkDir::new(&self.config.source_dir)
            .min_depth(1)
            .follow_links(false)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_dir())
            .filter_map(|entry| {
                let name = entry.file_name().to_string_lossy();
                pattern.find(&name).map(|m| m.as_str().to_string())
            })
            .collect();
        ids.sort();
        ids.dedup();
        ids
    }

    /// The numeric order back out of a matched identifier.
    /// `OrderNotFound` can only happen with configuration inconsistent
    /// with discovery, and skips just this participant.
    fn extract_order(&self, general_id: &str, pattern: &Regex) -> Result<u32, CollectError> {
        pattern
            .captures(general_id)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok())
            .ok_or_else(|| CollectError::OrderNotFound(general_id.to_string()))
    }

    fn collect_participant(
        &self,
        general_id: &str,
        pattern: &Regex,
    ) -> Result<Vec<ParticipantRow>, CollectError> {
        let order = self.extract_order(general_id, pattern)?;
        let id = ParticipantId::new(
            &self.config.id_prefix,
            order,
            self.config.order_digits,
            &self.config.id_suffix,
        )?;
        ParticipantCollector::new(&self.config, &self.reader, id).collect()
    }

    /// Write the merged table, or refuse when nothing was collected so a
    /// failed run never leaves an empty report behind.
    fn persist(&self, cohort: &CohortTable) -> Result<(), CollectError> {
        if cohort.is_empty() {
            error!("demographics table is blank, nothing to write");
            return Err(CollectError::EmptyCohort);
        }

        let path = self.config.output_path();
        export::write_demographics(&path, cohort)?;
        info!(
            "demographics table written to {}, {} rows",
            path.display(),
            cohort.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::MetadataFields;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    /// Reader that never touches the filesystem; identifier handling is
    /// what these tests are about.
    struct NullReader;

    impl MetadataReader for NullReader {
        fn extract(&self, _path: &Path) -> Result<MetadataFields, CollectError> {
            Ok(MetadataFields::default())
        }
    }

    fn collector(
        source: &Path,
        prefix: &str,
        digits: usize,
        suffix: &str,
    ) -> CohortCollector<NullReader> {
        let config = CollectorConfig::new(source, None, prefix, digits, suffix).unwrap();
        CohortCollector::new(config, NullReader)
    }

    #[test]
    fn identifiers_are_found_as_substrings_deduplicated_and_sorted() {
        let tmp = TempDir::new().unwrap();
        for dir in ["sub-014_001", "sub-012", "sub-014_002", "nested/sub-013", "misc"] {
            fs::create_dir_all(tmp.path().join(dir)).unwrap();
        }

        let c = collector(tmp.path(), "sub-", 3, "");
        let pattern = c.id_pattern().unwrap();
        let ids = c.discover_participants(&pattern);
        assert_eq!(ids, ["sub-012", "sub-013", "sub-014"]);
    }

    /// Prefix and suffix are escaped literals: a `.` in the prefix must
    /// not act as a regex wildcard.
    #[test]
    fn pattern_literals_are_escaped() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("subX001")).unwrap();
        fs::create_dir_all(tmp.path().join("sub.002")).unwrap();

        let c = collector(tmp.path(), "sub.", 3, "");
        let pattern = c.id_pattern().unwrap();
        let ids = c.discover_participants(&pattern);
        assert_eq!(ids, ["sub.002"]);
    }

    #[test]
    fn order_is_extracted_through_the_capture_group() {
        let tmp = TempDir::new().unwrap();
        let c = collector(tmp.path(), "HC", 3, "");
        let pattern = c.id_pattern().unwrap();

        assert_eq!(c.extract_order("HC005", &pattern).unwrap(), 5);
    }

    /// An identifier that does not match the configured pattern fails
    /// order extraction; the cohort loop logs it and moves on.
    #[test]
    fn mismatched_identifier_fails_order_extraction() {
        let tmp = TempDir::new().unwrap();
        let c = collector(tmp.path(), "HC", 4, "");
        let pattern = c.id_pattern().unwrap();

        let err = c.extract_order("HC005", &pattern).unwrap_err();
        assert!(matches!(err, CollectError::OrderNotFound(id) if id == "HC005"));
    }
}
