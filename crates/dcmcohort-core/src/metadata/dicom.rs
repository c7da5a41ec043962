/// DICOM-backed implementation of the metadata boundary.
use super::{MetadataFields, MetadataReader, UNKNOWN};
use crate::error::CollectError;
use dicom_object::DefaultDicomObject;
use std::path::Path;
use tracing::warn;

/// Reads attributes with `dicom-object`, by dictionary keyword.
///
/// Attribute access is per-field: each keyword that is absent or fails
/// string conversion falls back to `Unknown` without affecting the others.
#[derive(Debug, Default, Clone, Copy)]
pub struct DicomReader;

impl DicomReader {
    pub fn new() -> Self {
        Self
    }
}

/// One attribute by keyword, trailing padding stripped.
fn attribute(obj: &DefaultDicomObject, keyword: &str) -> String {
    obj.element_by_name(keyword)
        .ok()
        .and_then(|element| element.to_str().ok())
        .map(|value| value.trim_end().to_string())
        .unwrap_or_else(|| UNKNOWN.to_string())
}

impl MetadataReader for DicomReader {
    fn extract(&self, path: &Path) -> Result<MetadataFields, CollectError> {
        if !path.exists() {
            return Err(CollectError::MissingFile(path.to_path_buf()));
        }

        let obj = match dicom_object::open_file(path) {
            Ok(obj) => obj,
            Err(err) => {
                warn!("unreadable data file {}: {err}", path.display());
                return Ok(MetadataFields::default());
            }
        };

        Ok(MetadataFields {
            sequence_name: attribute(&obj, "SequenceName"),
            image_type: attribute(&obj, "ImageType"),
            step_start_date: attribute(&obj, "PerformedProcedureStepStartDate"),
            step_start_time: attribute(&obj, "PerformedProcedureStepStartTime"),
            manufacturer: attribute(&obj, "Manufacturer"),
            patient_name: attribute(&obj, "PatientName"),
            patient_id: attribute(&obj, "PatientID"),
            patient_sex: attribute(&obj, "PatientSex"),
            patient_age: attribute(&obj, "PatientAge"),
            patient_size: attribute(&obj, "PatientSize"),
            patient_weight: attribute(&obj, "PatientWeight"),
            echo_time: attribute(&obj, "EchoTime"),
        })
    }
}
