/// Output table types: subtype records, per-participant rows, and the
/// cohort-wide table.
use crate::metadata::MetadataFields;
use crate::model::ParticipantId;
use serde::Serialize;
use std::path::PathBuf;

/// One acquisition subtype inside a participant folder.
///
/// Invariant: across all records of one folder, `file_count` sums to the
/// folder's qualifying-file count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtypeRecord {
    /// The bare folder name for single-subtype folders, or
    /// `"{folder}-{index}({key}size)"` when the folder split.
    pub label: String,
    /// File chosen to stand in for the whole cluster at extraction time.
    pub representative: PathBuf,
    /// Number of files in this cluster, at least 1.
    pub file_count: usize,
}

/// One row of the demographics report: a (participant, subtype) composite
/// key plus the extracted fields in the fixed column order. The serde
/// renames double as the CSV header.
#[derive(Debug, Clone, Serialize)]
pub struct ParticipantRow {
    #[serde(rename = "Participant")]
    pub participant: String,
    #[serde(rename = "Subtype")]
    pub subtype: String,
    #[serde(rename = "FileCount")]
    pub file_count: usize,
    #[serde(rename = "Sex")]
    pub sex: String,
    #[serde(rename = "Age")]
    pub age: String,
    #[serde(rename = "Height")]
    pub height: String,
    #[serde(rename = "Weight")]
    pub weight: String,
    #[serde(rename = "SequenceName")]
    pub sequence_name: String,
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Time")]
    pub time: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "PatientID")]
    pub patient_id: String,
    #[serde(rename = "EchoTime")]
    pub echo_time: String,
    #[serde(rename = "ImageType")]
    pub image_type: String,
    #[serde(rename = "Manufacturer")]
    pub manufacturer: String,
}

impl ParticipantRow {
    /// Assemble one row from a subtype and the fields read from its
    /// representative file.
    pub fn new(
        participant: &ParticipantId,
        subtype: &SubtypeRecord,
        fields: MetadataFields,
    ) -> Self {
        Self {
            participant: participant.to_string(),
            subtype: subtype.label.clone(),
            file_count: subtype.file_count,
            sex: fields.patient_sex,
            age: fields.patient_age,
            height: fields.patient_size,
            weight: fields.patient_weight,
            sequence_name: fields.sequence_name,
            date: fields.step_start_date,
            time: fields.step_start_time,
            name: fields.patient_name,
            patient_id: fields.patient_id,
            echo_time: fields.echo_time,
            image_type: fields.image_type,
            manufacturer: fields.manufacturer,
        }
    }
}

/// The cohort-wide result table.
///
/// Starts empty, grows by whole-participant appends in processing order,
/// and is serialised once at the end of the run. Rows are never removed.
#[derive(Debug, Default)]
pub struct CohortTable {
    rows: Vec<ParticipantRow>,
}

impl CohortTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one participant's rows, preserving their order.
    pub fn append(&mut self, rows: Vec<ParticipantRow>) {
        self.rows.extend(rows);
    }

    pub fn rows(&self) -> &[ParticipantRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
