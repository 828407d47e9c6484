//! Label column detection.
//!
//! Source tables name their ground-truth column inconsistently ("Lesion",
//! "label", "Ground Truth", ...). Detection runs in two passes over the
//! column names in table order:
//!
//! 1. exact match of the normalized name against [`EXACT_LABEL_NAMES`],
//!    earliest entry of the list wins;
//! 2. substring match against [`LABEL_KEYWORDS`], keyword order first and
//!    column order second.

use crate::error::{ReconcileError, Result};

/// Canonical label column names in priority order.
pub const EXACT_LABEL_NAMES: &[&str] = &[
    "lesion",
    "label",
    "class",
    "target",
    "gt",
    "groundtruth",
    "y",
    "category",
    "diagnosis",
];

/// Keywords for the substring pass.
pub const LABEL_KEYWORDS: &[&str] = &[
    "lesion", "label", "class", "target", "gt", "truth", "category", "diagnos",
];

/// Lower-cases a column name and drops spaces and non-breaking spaces.
pub fn normalize_column_name(name: &str) -> String {
    name.chars()
        .filter(|ch| *ch != ' ' && *ch != '\u{a0}')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Returns the column that most likely holds diagnosis labels.
pub fn detect_label_column<S: AsRef<str>>(columns: &[S]) -> Option<&str> {
    let normalized: Vec<String> = columns
        .iter()
        .map(|column| normalize_column_name(column.as_ref()))
        .collect();

    for canonical in EXACT_LABEL_NAMES {
        if let Some(idx) = normalized.iter().position(|name| name == canonical) {
            return Some(columns[idx].as_ref());
        }
    }
    for keyword in LABEL_KEYWORDS {
        if let Some(idx) = normalized.iter().position(|name| name.contains(keyword)) {
            return Some(columns[idx].as_ref());
        }
    }
    None
}

/// Resolves the label column, preferring an explicit name.
///
/// An explicit name must exist verbatim. Without one, detection must
/// succeed; there is no fallback column.
pub fn resolve_label_column<S: AsRef<str>>(
    columns: &[S],
    explicit: Option<&str>,
) -> Result<String> {
    let available = || -> Vec<String> {
        columns
            .iter()
            .map(|column| column.as_ref().to_string())
            .collect()
    };
    match explicit {
        Some(name) => {
            if columns.iter().any(|column| column.as_ref() == name) {
                Ok(name.to_string())
            } else {
                Err(ReconcileError::UnknownLabelColumn {
                    column: name.to_string(),
                    available: available(),
                })
            }
        }
        None => detect_label_column(columns)
            .map(str::to_string)
            .ok_or_else(|| ReconcileError::LabelColumnNotFound {
                available: available(),
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_names() {
        assert_eq!(normalize_column_name("Ground Truth"), "groundtruth");
        assert_eq!(normalize_column_name("Lesion\u{a0}Type"), "lesiontype");
    }

    #[test]
    fn exact_match_follows_priority_not_column_order() {
        let columns = ["UID", "Category", "Label"];
        assert_eq!(detect_label_column(&columns), Some("Label"));
    }

    #[test]
    fn label_beats_category() {
        let columns = ["UID", "Label", "Category"];
        assert_eq!(detect_label_column(&columns), Some("Label"));
    }

    #[test]
    fn detects_diagnosis_column() {
        let columns = ["UID", "Diagnosis"];
        assert_eq!(detect_label_column(&columns), Some("Diagnosis"));
    }

    #[test]
    fn exact_match_tolerates_spaces() {
        let columns = ["UID", "Ground Truth"];
        assert_eq!(detect_label_column(&columns), Some("Ground Truth"));
    }

    #[test]
    fn substring_pass_uses_keyword_order() {
        let columns = ["UID", "target_class", "lesion_type"];
        assert_eq!(detect_label_column(&columns), Some("lesion_type"));
    }

    #[test]
    fn no_candidate_is_none() {
        let columns = ["UID", "Institution", "has_T2"];
        assert_eq!(detect_label_column(&columns), None);
    }

    #[test]
    fn unresolvable_column_lists_available_columns() {
        let columns = ["UID", "Institution"];
        let err = resolve_label_column(&columns, None).unwrap_err();
        assert!(err.to_string().contains("UID, Institution"));
    }

    #[test]
    fn explicit_column_must_exist() {
        let columns = ["UID", "Outcome"];
        assert_eq!(
            resolve_label_column(&columns, Some("Outcome")).expect("resolve"),
            "Outcome"
        );
        assert!(matches!(
            resolve_label_column(&columns, Some("Lesion")),
            Err(ReconcileError::UnknownLabelColumn { .. })
        ));
    }
}
