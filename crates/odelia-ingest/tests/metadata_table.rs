use std::fs;

use odelia_ingest::{DatasetLayout, IngestError, read_metadata_table};
use odelia_model::CellValue;
use tempfile::TempDir;

#[test]
fn reads_metadata_from_dataset_layout() {
    let dir = TempDir::new().expect("temp dir");
    let layout = DatasetLayout::new(dir.path(), "unilateral", "val");
    fs::create_dir_all(layout.split_dir()).expect("create split dir");
    fs::write(
        layout.metadata_path(),
        "UID,Institution,Split,Fold,Path,has_Pre,has_T2\n\
         CAM_001_left,CAM,val,0,/data/CAM/CAM_001_left,True,False\n\
         MHA_002_right,MHA,val,1,/data/MHA/MHA_002_right,True,True\n",
    )
    .expect("write metadata");

    let table = read_metadata_table(&layout.metadata_path()).expect("read metadata");
    assert_eq!(table.len(), 2);
    assert_eq!(table.flag_columns(), vec!["has_Pre", "has_T2"]);

    let cases = table.to_cases(None).expect("cases");
    assert_eq!(cases[1].uid, "MHA_002_right");
    assert_eq!(cases[1].institution, "MHA");
    assert_eq!(cases[1].fold, Some(1));
    assert_eq!(cases[0].flag("T2"), Some(&CellValue::Bool(false)));
    assert!(cases.iter().all(|case| case.label.is_null()));
}

#[test]
fn missing_file_is_reported() {
    let dir = TempDir::new().expect("temp dir");
    let err = read_metadata_table(&dir.path().join("metadata.csv")).unwrap_err();
    assert!(matches!(err, IngestError::FileNotFound { .. }));
}

#[test]
fn unknown_label_column_names_available_columns() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("metadata.csv");
    fs::write(&path, "UID,Institution\na,CAM\n").expect("write metadata");
    let table = read_metadata_table(&path).expect("read metadata");

    let err = table.to_cases(Some("Lesion")).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("'Lesion'"));
    assert!(message.contains("UID, Institution"));
}
