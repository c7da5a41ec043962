/// Per-participant aggregation: a four-stage sequential pipeline.
///
/// Discover -> Cluster -> Extract -> Assemble, each stage bracketed by
/// info-level log entries carrying the general ID. Failures inside a stage
/// are contained per item (a subtype whose representative vanished is
/// skipped, a folder without data files contributes nothing); failures of
/// the participant as a whole surface as the `Err` arm the cohort loop
/// inspects.
use crate::analysis::cluster_folder;
use crate::config::CollectorConfig;
use crate::error::CollectError;
use crate::metadata::{MetadataFields, MetadataReader};
use crate::model::{FolderRef, ParticipantId, ParticipantRow, SubtypeRecord};
use crate::scanner::FolderDiscoverer;
use tracing::{info, warn};

/// Runs the four stages for one participant.
pub struct ParticipantCollector<'a, R> {
    config: &'a CollectorConfig,
    reader: &'a R,
    id: ParticipantId,
}

impl<'a, R: MetadataReader> ParticipantCollector<'a, R> {
    pub fn new(config: &'a CollectorConfig, reader: &'a R, id: ParticipantId) -> Self {
        Self { config, reader, id }
    }

    /// Run all four stages, returning this participant's report rows.
    pub fn collect(&self) -> Result<Vec<ParticipantRow>, CollectError> {
        info!("{}: participant folder collecting starts", self.id);
        let folders = self.discover_folders()?;
        info!(
            "{}: participant folder collecting finished, {} folders",
            self.id,
            folders.len()
        );

        info!("{}: subtype clustering starts", self.id);
        let subtypes = self.cluster_folders(&folders)?;
        info!(
            "{}: subtype clustering finished, {} subtypes",
            self.id,
            subtypes.len()
        );

        info!("{}: metadata collecting starts", self.id);
        let extracted = self.extract_metadata(subtypes);
        info!("{}: metadata collecting finished", self.id);

        info!("{}: table assembly starts", self.id);
        let rows = self.assemble_rows(extracted);
        info!("{}: table assembly finished, {} rows", self.id, rows.len());

        Ok(rows)
    }

    /// Stage 1: the participant's deduplicated, non-empty folder set.
    fn discover_folders(&self) -> Result<Vec<FolderRef>, CollectError> {
        FolderDiscoverer::new(&self.config.source_dir, &self.config.data_suffix)
            .discover(self.id.as_str())
    }

    /// Stage 2: cluster every discovered folder, concatenating results in
    /// folder order.
    fn cluster_folders(
        &self,
        folders: &[FolderRef],
    ) -> Result<Vec<SubtypeRecord>, CollectError> {
        let mut subtypes = Vec::new();
        for folder in folders {
            subtypes.extend(cluster_folder(folder, &self.config.data_suffix)?);
        }
        Ok(subtypes)
    }

    /// Stage 3: one metadata read per subtype. A vanished representative is
    /// logged and that subtype skipped; the remaining subtypes keep going.
    fn extract_metadata(
        &self,
        subtypes: Vec<SubtypeRecord>,
    ) -> Vec<(SubtypeRecord, MetadataFields)> {
        let mut extracted = Vec::with_capacity(subtypes.len());
        for subtype in subtypes {
            match self.reader.extract(&subtype.representative) {
                Ok(fields) => extracted.push((subtype, fields)),
                Err(err) => warn!(
                    "{}: data file reading failed for {}: {err}",
                    self.id,
                    subtype.representative.display()
                ),
            }
        }
        extracted
    }

    /// Stage 4: (participant, subtype) keyed rows in the fixed column
    /// order.
    fn assemble_rows(
        &self,
        extracted: Vec<(SubtypeRecord, MetadataFields)>,
    ) -> Vec<ParticipantRow> {
        extracted
            .into_iter()
            .map(|(subtype, fields)| ParticipantRow::new(&self.id, &subtype, fields))
            .collect()
    }
}
