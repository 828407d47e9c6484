//! Merging an external UID → label table into the metadata table.

use std::collections::HashMap;

use tracing::{debug, warn};

use odelia_ingest::MetadataTable;
use odelia_model::UID_COLUMN;

use crate::detect::resolve_label_column;
use crate::error::Result;

/// Column receiving merged labels.
pub const MERGED_LABEL_COLUMN: &str = "Lesion";

/// Outcome of a label merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelMergeStats {
    /// Label column used in the external table.
    pub source_column: String,
    /// Metadata rows that received a label.
    pub matched: usize,
    /// Metadata rows whose UID has no external label.
    pub unmatched: usize,
    /// Repeated UIDs in the external table; the first occurrence wins.
    pub duplicate_uids: usize,
}

/// Left-joins `labels` onto `table` by `UID`.
///
/// The external label column is detected unless `label_column` is given.
/// Merged values land in [`MERGED_LABEL_COLUMN`], replacing any existing
/// column of that name; rows without a match get an empty cell.
pub fn merge_labels(
    table: &mut MetadataTable,
    labels: &MetadataTable,
    label_column: Option<&str>,
) -> Result<LabelMergeStats> {
    let uid_in_labels = labels.require_column(UID_COLUMN)?;
    let source_column = resolve_label_column(&labels.headers, label_column)?;
    let source_index = labels.require_column(&source_column)?;
    let uid_in_table = table.require_column(UID_COLUMN)?;

    let mut by_uid: HashMap<&str, &str> = HashMap::with_capacity(labels.len());
    let mut duplicate_uids = 0usize;
    for row in 0..labels.len() {
        let uid = labels.cell(row, uid_in_labels);
        if uid.is_empty() {
            continue;
        }
        if by_uid.contains_key(uid) {
            duplicate_uids += 1;
            continue;
        }
        by_uid.insert(uid, labels.cell(row, source_index));
    }
    if duplicate_uids > 0 {
        warn!(
            duplicate_uids,
            "label table repeats UIDs; keeping the first label per UID"
        );
    }

    let mut matched = 0usize;
    let merged: Vec<String> = (0..table.len())
        .map(|row| match by_uid.get(table.cell(row, uid_in_table)) {
            Some(label) => {
                matched += 1;
                (*label).to_string()
            }
            None => String::new(),
        })
        .collect();
    let unmatched = table.len() - matched;
    table.set_column(MERGED_LABEL_COLUMN, merged);

    debug!(
        source_column = %source_column,
        matched,
        unmatched,
        "external labels merged"
    );
    Ok(LabelMergeStats {
        source_column,
        matched,
        unmatched,
        duplicate_uids,
    })
}
