//! Integration tests for group index export and chart rendering.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use odelia_ingest::{MetadataTable, parse_metadata_csv};
use odelia_model::GroupSet;
use odelia_output::{
    ChartRenderer, PngChartRenderer, class_distribution_chart, modality_group_chart,
    write_group_index,
};
use odelia_reconcile::reconcile;

const THREE_CASES: &str = "\
UID,Institution,Split,Fold,has_Pre,has_Post_1,has_Post_2,has_T2,Lesion
case1,CAM,val,0,True,True,False,True,0
case2,MHA,val,1,True,False,False,False,benign
case3,RUMC,val,2,False,False,False,False,no lesion
";

fn load(content: &str) -> MetadataTable {
    parse_metadata_csv(content.as_bytes(), Path::new("metadata.csv")).expect("parse metadata")
}

#[test]
fn group_index_holds_members_only() {
    let dir = TempDir::new().expect("temp dir");
    let table = load(THREE_CASES);
    let result = reconcile(&table, None, &GroupSet::default()).expect("reconcile");

    let path = write_group_index(dir.path(), &table, &result, &result.groups[0]).expect("write");
    assert_eq!(path.file_name().and_then(|n| n.to_str()), Some("Pre-Post2_index.csv"));

    let content = fs::read_to_string(&path).expect("read index");
    assert_eq!(
        content,
        "UID,Institution,Split,Fold,has_Pre,has_Post_1,has_Post_2,has_T2,Lesion_Normalized\n\
         case1,CAM,val,0,True,True,False,True,malignant\n"
    );
}

#[test]
fn empty_group_still_gets_a_header() {
    let dir = TempDir::new().expect("temp dir");
    let table = load(THREE_CASES);
    let result = reconcile(&table, None, &GroupSet::default()).expect("reconcile");

    let path = write_group_index(dir.path(), &table, &result, &result.groups[1]).expect("write");
    assert_eq!(path.file_name().and_then(|n| n.to_str()), Some("Pre-Post4_index.csv"));
    let content = fs::read_to_string(&path).expect("read index");
    assert_eq!(content.lines().count(), 1);
    assert!(content.ends_with("Lesion_Normalized\n"));
}

#[test]
fn flags_are_coerced_and_unmapped_labels_kept() {
    let dir = TempDir::new().expect("temp dir");
    let table = load(
        "UID,Institution,Path,has_Pre,has_Post_1,has_T2,Class\n\
         a,CAM,/data/a,1,yes,1.0,Unknown_XYZ\n",
    );
    let result = reconcile(&table, None, &GroupSet::default()).expect("reconcile");

    let path = write_group_index(dir.path(), &table, &result, &result.groups[0]).expect("write");
    let content = fs::read_to_string(&path).expect("read index");
    assert_eq!(
        content,
        "UID,Institution,Path,has_Pre,has_Post_1,has_T2,Lesion_Normalized\n\
         a,CAM,/data/a,True,True,True,unknown_xyz\n"
    );
}

#[test]
fn rerun_produces_identical_files() {
    let dir = TempDir::new().expect("temp dir");
    let table = load(THREE_CASES);
    let result = reconcile(&table, None, &GroupSet::default()).expect("reconcile");

    let path = write_group_index(dir.path(), &table, &result, &result.groups[0]).expect("write");
    let first = fs::read(&path).expect("read first");
    write_group_index(dir.path(), &table, &result, &result.groups[0]).expect("rewrite");
    let second = fs::read(&path).expect("read second");
    assert_eq!(first, second);
}

#[test]
fn charts_are_written_as_png() {
    let dir = TempDir::new().expect("temp dir");
    let table = load(THREE_CASES);
    let result = reconcile(&table, None, &GroupSet::default()).expect("reconcile");
    let renderer = PngChartRenderer {
        width: 400,
        height: 300,
    };

    let modality = dir.path().join("modality_distribution.png");
    let class = dir.path().join("class_distribution.png");
    renderer
        .render(&modality_group_chart(&result), &modality)
        .expect("render modality chart");
    renderer
        .render(&class_distribution_chart(&result), &class)
        .expect("render class chart");

    for path in [&modality, &class] {
        let img = image::open(path).expect("decode png");
        assert_eq!((img.width(), img.height()), (400, 300));
    }
}
