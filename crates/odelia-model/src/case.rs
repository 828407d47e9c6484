//! Case records and the column naming conventions of the metadata table.

use std::collections::BTreeMap;

use crate::value::CellValue;

pub const UID_COLUMN: &str = "UID";
pub const INSTITUTION_COLUMN: &str = "Institution";
pub const SPLIT_COLUMN: &str = "Split";
pub const FOLD_COLUMN: &str = "Fold";
pub const PATH_COLUMN: &str = "Path";

/// Identifying columns carried into exported indices, in output order.
pub const IDENTIFYING_COLUMNS: [&str; 5] = [
    UID_COLUMN,
    INSTITUTION_COLUMN,
    SPLIT_COLUMN,
    FOLD_COLUMN,
    PATH_COLUMN,
];

/// Prefix of modality presence flag columns.
pub const FLAG_PREFIX: &str = "has_";

pub fn flag_column(modality: &str) -> String {
    format!("{FLAG_PREFIX}{modality}")
}

/// Returns the modality name for a `has_<Modality>` column.
pub fn modality_from_flag_column(column: &str) -> Option<&str> {
    column
        .strip_prefix(FLAG_PREFIX)
        .filter(|name| !name.is_empty())
}

/// One subject-visit row of the metadata table.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseRecord {
    /// Position of the row in the source table.
    pub row: usize,
    pub uid: String,
    pub institution: String,
    pub split: Option<String>,
    pub fold: Option<i64>,
    pub path: Option<String>,
    /// Presence flags keyed by modality name (without the `has_` prefix).
    pub flags: BTreeMap<String, CellValue>,
    pub label: CellValue,
}

impl CaseRecord {
    pub fn flag(&self, modality: &str) -> Option<&CellValue> {
        self.flags.get(modality)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_column_round_trip() {
        assert_eq!(flag_column("Post_1"), "has_Post_1");
        assert_eq!(modality_from_flag_column("has_Post_1"), Some("Post_1"));
        assert_eq!(modality_from_flag_column("has_"), None);
        assert_eq!(modality_from_flag_column("UID"), None);
    }
}
