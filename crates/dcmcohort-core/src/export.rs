/// CSV persistence of the finished cohort table.
use crate::error::CollectError;
use crate::model::CohortTable;
use std::path::Path;

/// Write the table as one CSV file, full overwrite, header first.
///
/// Refuses an empty table with [`CollectError::EmptyCohort`] so no run can
/// leave behind a header-only report; the caller decides how loudly to
/// fail.
pub fn write_demographics(path: &Path, cohort: &CohortTable) -> Result<(), CollectError> {
    if cohort.is_empty() {
        return Err(CollectError::EmptyCohort);
    }

    let mut writer = csv::Writer::from_path(path)?;
    for row in cohort.rows() {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::MetadataFields;
    use crate::model::{ParticipantId, ParticipantRow, SubtypeRecord};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn one_row_table() -> CohortTable {
        let id = ParticipantId::new("HC", 5, 3, "").unwrap();
        let record = SubtypeRecord {
            label: "HC005_001".to_string(),
            representative: PathBuf::from("/data/HC005_001/00000001.DCM"),
            file_count: 192,
        };
        let mut table = CohortTable::new();
        table.append(vec![ParticipantRow::new(
            &id,
            &record,
            MetadataFields::default(),
        )]);
        table
    }

    #[test]
    fn header_and_rows_are_written() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("Demographics.csv");

        write_demographics(&path, &one_row_table()).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Participant,Subtype,FileCount,Sex,Age,Height,Weight,SequenceName,\
             Date,Time,Name,PatientID,EchoTime,ImageType,Manufacturer"
        );
        assert!(lines.next().unwrap().starts_with("HC005,HC005_001,192,"));
    }

    /// An empty table is refused and no file is created.
    #[test]
    fn empty_table_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("Demographics.csv");

        let err = write_demographics(&path, &CohortTable::new()).unwrap_err();
        assert!(matches!(err, CollectError::EmptyCohort));
        assert!(!path.exists());
    }

    /// A second run fully overwrites the previous report.
    #[test]
    fn rewrite_overwrites_previous_report() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("Demographics.csv");

        write_demographics(&path, &one_row_table()).unwrap();
        let first = fs::read_to_string(&path).unwrap();
        write_demographics(&path, &one_row_table()).unwrap();
        let second = fs::read_to_string(&path).unwrap();

        assert_eq!(first, second);
    }
}
