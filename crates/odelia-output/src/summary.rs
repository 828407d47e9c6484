//! Machine-readable run summaries.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Serialize;

use odelia_model::CanonicalLabel;
use odelia_reconcile::{AgeSummary, InstitutionCount, ModalityCount, Reconciliation};

use crate::common::ensure_parent_dir;
use crate::error::{OutputError, Result};
use crate::index::group_index_file_name;

pub const RECONCILE_SUMMARY_FILE: &str = "summary.json";

/// Result of a reconcile run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub input: String,
    pub label_column: String,
    pub cases: usize,
    pub groups: Vec<GroupSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupSummary {
    pub name: String,
    pub modalities: Vec<String>,
    pub cases: usize,
    /// Canonical label counts; unmapped labels are not reported here.
    pub labels: BTreeMap<CanonicalLabel, usize>,
    pub index_file: String,
}

impl RunSummary {
    pub fn new(input: impl Into<String>, reconciliation: &Reconciliation) -> Self {
        Self {
            input: input.into(),
            label_column: reconciliation.label_column.clone(),
            cases: reconciliation.cases.len(),
            groups: reconciliation
                .groups
                .iter()
                .map(|report| GroupSummary {
                    name: report.coverage.group.name.clone(),
                    modalities: report.coverage.group.modalities.clone(),
                    cases: report.coverage.count,
                    labels: report.distribution.counts().clone(),
                    index_file: group_index_file_name(&report.coverage.group.name),
                })
                .collect(),
        }
    }
}

/// Result of a describe run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DescribeSummary {
    pub input: String,
    pub cases: usize,
    pub institutions: Vec<InstitutionCount>,
    pub modalities: Vec<ModalityCount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<AgeSummary>,
}

pub fn to_json<T: Serialize>(value: &T) -> serde_json::Result<String> {
    let mut text = serde_json::to_string_pretty(value)?;
    text.push('\n');
    Ok(text)
}

/// Writes a summary as pretty JSON with a trailing newline.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    ensure_parent_dir(path)?;
    let text = to_json(value).map_err(|source| OutputError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, text).map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })
}
