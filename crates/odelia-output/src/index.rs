//! Per-group filtered index export.
//!
//! Each modality group gets one CSV holding only its member cases with a
//! fixed column set: the identifying columns present in the input, every
//! `has_*` flag coerced to `True`/`False`, and the normalized label.

use std::path::{Path, PathBuf};

use tracing::info;

use odelia_ingest::MetadataTable;
use odelia_model::{CellValue, IDENTIFYING_COLUMNS, NORMALIZED_LABEL_COLUMN};
use odelia_reconcile::{GroupReport, Reconciliation, is_truthy};

use crate::common::write_csv;
use crate::error::Result;

/// File name of a group's index: dash variants become `-`, whitespace and
/// path separators become `_`.
pub fn group_index_file_name(group_name: &str) -> String {
    let stem: String = group_name
        .trim()
        .chars()
        .map(|ch| match ch {
            '\u{2010}'..='\u{2015}' | '\u{2212}' | '\u{fe58}' | '\u{fe63}' | '\u{ff0d}' => '-',
            '/' | '\\' => '_',
            ch if ch.is_whitespace() => '_',
            ch => ch,
        })
        .collect();
    format!("{stem}_index.csv")
}

/// An index table ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupIndex {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Builds the index of one group's member cases in input order.
///
/// `table` must be the table `reconciliation` was computed from.
pub fn build_group_index(
    table: &MetadataTable,
    reconciliation: &Reconciliation,
    report: &GroupReport,
) -> GroupIndex {
    let identifying: Vec<usize> = IDENTIFYING_COLUMNS
        .iter()
        .filter_map(|name| table.column_index(name))
        .collect();
    let flags: Vec<usize> = table
        .flag_columns()
        .into_iter()
        .filter_map(|name| table.column_index(name))
        .collect();

    let mut headers: Vec<String> = identifying
        .iter()
        .chain(&flags)
        .map(|idx| table.headers[*idx].clone())
        .collect();
    headers.push(NORMALIZED_LABEL_COLUMN.to_string());

    let rows = reconciliation
        .members(report)
        .map(|(case, label)| {
            let mut row: Vec<String> = identifying
                .iter()
                .map(|idx| table.cell(case.row, *idx).to_string())
                .collect();
            row.extend(flags.iter().map(|idx| {
                let present = is_truthy(&CellValue::infer(table.cell(case.row, *idx)));
                CellValue::Bool(present).to_string()
            }));
            row.push(label.as_str().to_string());
            row
        })
        .collect();

    GroupIndex { headers, rows }
}

/// Writes one group's index into `dir` and returns its path.
pub fn write_group_index(
    dir: &Path,
    table: &MetadataTable,
    reconciliation: &Reconciliation,
    report: &GroupReport,
) -> Result<PathBuf> {
    let index = build_group_index(table, reconciliation, report);
    let path = dir.join(group_index_file_name(&report.coverage.group.name));
    write_csv(&path, &index.headers, &index.rows)?;
    info!(
        group = %report.coverage.group.name,
        rows = index.rows.len(),
        path = %path.display(),
        "group index written"
    );
    Ok(path)
}

/// Writes a whole metadata table, e.g. after merging external labels.
pub fn write_metadata_table(path: &Path, table: &MetadataTable) -> Result<()> {
    write_csv(path, &table.headers, &table.rows)
}
