//! End-to-end collection tests.
//!
//! These tests exercise the real cohort pipeline (identifier discovery,
//! folder discovery, clustering, extraction, CSV persistence) against a
//! real temporary filesystem. The DICOM reader is replaced with a stub at
//! the `MetadataReader` seam so no imaging fixtures are needed; everything
//! upstream of the boundary runs for real.

use dcmcohort_core::collect::CohortCollector;
use dcmcohort_core::config::CollectorConfig;
use dcmcohort_core::error::CollectError;
use dcmcohort_core::metadata::{MetadataFields, MetadataReader};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::TempDir;

// ── Helpers ──────────────────────────────────────────────────────────────────

/// Stub metadata reader: records the representative's file name as the
/// patient ID, and fails with `MissingFile` for any path containing one of
/// the configured markers (to simulate vanished representatives).
struct StubReader {
    fail_markers: Vec<String>,
}

impl StubReader {
    fn new() -> Self {
        Self {
            fail_markers: Vec::new(),
        }
    }

    fn failing_on(marker: &str) -> Self {
        Self {
            fail_markers: vec![marker.to_string()],
        }
    }
}

impl MetadataReader for StubReader {
    fn extract(&self, path: &Path) -> Result<MetadataFields, CollectError> {
        let rendered = path.to_string_lossy();
        if self.fail_markers.iter().any(|m| rendered.contains(m)) {
            return Err(CollectError::MissingFile(path.to_path_buf()));
        }
        let mut fields = MetadataFields::default();
        fields.patient_id = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        fields.patient_sex = "F".to_string();
        Ok(fields)
    }
}

fn write_kb(path: &Path, kb: usize) {
    let mut f = fs::File::create(path).unwrap();
    f.write_all(&vec![0u8; kb * 1024]).unwrap();
}

/// Create a reproducible cohort tree:
///
/// ```text
/// root/
///   sub-012/              (junk only; data sits in anonymized subfolders)
///     000000001/          3 files of 200 KB
///     000000002/          2 files of 240 KB
///   sub-013/              4 files of 100 KB
///     sub-013_001/        1 file of 150 KB
///   sub-014_001/          2 files of 150 KB + 3 files of 300 KB
///   sub-015/              junk only, no data anywhere
///   misc/                 unrelated, never discovered
/// ```
fn build_cohort_tree(root: &Path) {
    let anon1 = root.join("sub-012").join("000000001");
    let anon2 = root.join("sub-012").join("000000002");
    fs::create_dir_all(&anon1).unwrap();
    fs::create_dir_all(&anon2).unwrap();
    fs::write(root.join("sub-012").join(".DS_Store"), b"x").unwrap();
    for i in 0..3 {
        write_kb(&anon1.join(format!("0000000{i}.DCM")), 200);
    }
    for i in 0..2 {
        write_kb(&anon2.join(format!("0000000{i}.DCM")), 240);
    }

    let sub13 = root.join("sub-013");
    let sub13_001 = sub13.join("sub-013_001");
    fs::create_dir_all(&sub13_001).unwrap();
    for i in 0..4 {
        write_kb(&sub13.join(format!("0000000{i}.DCM")), 100);
    }
    write_kb(&sub13_001.join("00000000.DCM"), 150);

    let sub14 = root.join("sub-014_001");
    fs::create_dir_all(&sub14).unwrap();
    for i in 0..2 {
        write_kb(&sub14.join(format!("0000000{i}.DCM")), 150);
    }
    for i in 2..5 {
        write_kb(&sub14.join(format!("0000000{i}.DCM")), 300);
    }

    fs::create_dir_all(root.join("sub-015")).unwrap();
    fs::write(root.join("sub-015").join(".DS_Store"), b"x").unwrap();

    fs::create_dir_all(root.join("misc")).unwrap();
    fs::write(root.join("misc").join("readme.txt"), b"x").unwrap();
}

fn config(source: &Path, output: &Path) -> CollectorConfig {
    CollectorConfig::new(source, Some(output.to_path_buf()), "sub-", 3, "").unwrap()
}

fn report_lines(output: &Path) -> Vec<String> {
    let contents = fs::read_to_string(output.join("Demographics.csv")).unwrap();
    contents.lines().map(str::to_string).collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

/// The full pipeline over the reference tree: participants in identifier
/// order, one row per subtype, correct labels and file counts.
#[test]
fn run_collects_all_participants_into_one_report() {
    let tmp = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    build_cohort_tree(tmp.path());

    CohortCollector::new(config(tmp.path(), out.path()), StubReader::new())
        .run()
        .unwrap();

    let lines = report_lines(out.path());
    assert_eq!(
        lines[0],
        "Participant,Subtype,FileCount,Sex,Age,Height,Weight,SequenceName,Date,Time,Name,PatientID,EchoTime,ImageType,Manufacturer"
    );

    let keys: Vec<(String, String, String)> = lines[1..]
        .iter()
        .map(|line| {
            let cols: Vec<&str> = line.split(',').collect();
            (cols[0].to_string(), cols[1].to_string(), cols[2].to_string())
        })
        .collect();

    let expected = [
        ("sub-012", "000000001", "3"),
        ("sub-012", "000000002", "2"),
        ("sub-013", "sub-013", "4"),
        ("sub-013", "sub-013_001", "1"),
        ("sub-014", "sub-014_001-0(150size)", "2"),
        ("sub-014", "sub-014_001-1(300size)", "3"),
    ];
    let keys: Vec<(&str, &str, &str)> = keys
        .iter()
        .map(|(p, s, c)| (p.as_str(), s.as_str(), c.as_str()))
        .collect();
    assert_eq!(keys, expected);
}

/// Stubbed fields land in the right columns: the representative's file
/// name is carried through as the patient ID.
#[test]
fn extracted_fields_reach_the_report() {
    let tmp = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    build_cohort_tree(tmp.path());

    CohortCollector::new(config(tmp.path(), out.path()), StubReader::new())
        .run()
        .unwrap();

    let lines = report_lines(out.path());
    let sub13 = lines
        .iter()
        .find(|l| l.starts_with("sub-013,sub-013,"))
        .expect("sub-013 row missing");
    let cols: Vec<&str> = sub13.split(',').collect();
    assert_eq!(cols[3], "F", "Sex column");
    assert_eq!(cols[11], "00000000.DCM", "PatientID column");
    assert_eq!(cols[14], "Unknown", "Manufacturer stays defaulted");
}

/// A tree with no matching identifiers ends in `EmptyCohort` and no
/// report file.
#[test]
fn empty_cohort_is_an_error_and_writes_nothing() {
    let tmp = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join("misc")).unwrap();

    let err = CohortCollector::new(config(tmp.path(), out.path()), StubReader::new())
        .run()
        .unwrap_err();

    assert!(matches!(err, CollectError::EmptyCohort));
    assert!(!out.path().join("Demographics.csv").exists());
}

/// One participant's representatives all failing to read must not abort
/// the cohort: the others still land in the report.
#[test]
fn failing_participant_is_isolated() {
    let tmp = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    build_cohort_tree(tmp.path());

    CohortCollector::new(
        config(tmp.path(), out.path()),
        StubReader::failing_on("sub-013"),
    )
    .run()
    .unwrap();

    let lines = report_lines(out.path());
    assert_eq!(lines.len(), 1 + 4, "header plus sub-012 and sub-014 rows");
    assert!(lines.iter().all(|l| !l.starts_with("sub-013,")));
}

/// Two runs over an unchanged tree produce byte-identical reports; the
/// second run fully overwrites the first.
#[test]
fn repeated_runs_are_deterministic() {
    let tmp = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    build_cohort_tree(tmp.path());

    let collector = CohortCollector::new(config(tmp.path(), out.path()), StubReader::new());
    collector.run().unwrap();
    let first = fs::read_to_string(out.path().join("Demographics.csv")).unwrap();
    collector.run().unwrap();
    let second = fs::read_to_string(out.path().join("Demographics.csv")).unwrap();

    assert_eq!(first, second);
}
