/// The metadata extraction boundary.
///
/// Everything upstream treats extraction as a pure function from a file
/// path to a record of attribute values; the trait keeps the DICOM-backed
/// implementation swappable for a stub in tests.
pub mod dicom;

pub use dicom::DicomReader;

use crate::error::CollectError;
use std::path::Path;

/// Sentinel value for any attribute the file does not carry.
pub const UNKNOWN: &str = "Unknown";

/// The fixed attribute set read from one representative file per subtype.
///
/// Every field defaults independently to [`UNKNOWN`]; a file missing half
/// its attributes still produces a complete record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataFields {
    pub sequence_name: String,
    pub image_type: String,
    pub step_start_date: String,
    pub step_start_time: String,
    pub manufacturer: String,
    pub patient_name: String,
    pub patient_id: String,
    pub patient_sex: String,
    pub patient_age: String,
    pub patient_size: String,
    pub patient_weight: String,
    pub echo_time: String,
}

impl Default for MetadataFields {
    fn default() -> Self {
        Self {
            sequence_name: UNKNOWN.to_string(),
            image_type: UNKNOWN.to_string(),
            step_start_date: UNKNOWN.to_string(),
            step_start_time: UNKNOWN.to_string(),
            manufacturer: UNKNOWN.to_string(),
            patient_name: UNKNOWN.to_string(),
            patient_id: UNKNOWN.to_string(),
            patient_sex: UNKNOWN.to_string(),
            patient_age: UNKNOWN.to_string(),
            patient_size: UNKNOWN.to_string(),
            patient_weight: UNKNOWN.to_string(),
            echo_time: UNKNOWN.to_string(),
        }
    }
}

/// How the collector reads attributes from a representative file.
///
/// The only error this boundary may surface is
/// [`CollectError::MissingFile`]: the representative vanished between
/// listing and read. A present but unreadable or non-conforming file must
/// yield the all-`Unknown` record instead of an error, so one corrupt file
/// cannot sink its participant.
pub trait MetadataReader {
    fn extract(&self, path: &Path) -> Result<MetadataFields, CollectError>;
}
