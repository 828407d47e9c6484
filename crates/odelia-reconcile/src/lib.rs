//! Modality-coverage reconciliation for case metadata.
//!
//! The pipeline is: resolve the label column, normalize every label,
//! evaluate each modality group's membership mask, then count canonical
//! labels per group.
//!
//! ```ignore
//! use odelia_model::GroupSet;
//! use odelia_reconcile::reconcile;
//!
//! let result = reconcile(&table, None, &GroupSet::default())?;
//! for group in &result.groups {
//!     println!("{}: {}", group.coverage.group.name, group.coverage.count);
//! }
//! ```

pub mod coverage;
pub mod detect;
pub mod distribution;
pub mod error;
pub mod label;
pub mod merge;
pub mod stats;
pub mod truthy;

use tracing::{debug, info};

use odelia_ingest::MetadataTable;
use odelia_model::{CaseRecord, GroupSet, NormalizedLabel};

pub use coverage::{GroupCoverage, evaluate_coverage, evaluate_group, is_member};
pub use detect::{detect_label_column, normalize_column_name, resolve_label_column};
pub use distribution::{LabelDistribution, label_distribution};
pub use error::{ReconcileError, Result};
pub use label::{normalize_label, normalize_label_text};
pub use merge::{LabelMergeStats, MERGED_LABEL_COLUMN, merge_labels};
pub use stats::{
    AgeSummary, FiveNumberSummary, HistogramBin, InstitutionAges, InstitutionCount, ModalityCount,
    age_summary, institution_counts, modality_coverage,
};
pub use truthy::{is_truthy, is_truthy_text};

/// Membership and label counts of one modality group.
#[derive(Debug, Clone)]
pub struct GroupReport {
    pub coverage: GroupCoverage,
    pub distribution: LabelDistribution,
}

/// Everything computed for one metadata table.
#[derive(Debug, Clone)]
pub struct Reconciliation {
    pub label_column: String,
    pub cases: Vec<CaseRecord>,
    /// Normalized label per case, in case order.
    pub labels: Vec<NormalizedLabel>,
    pub groups: Vec<GroupReport>,
}

impl Reconciliation {
    /// Member cases of a group, paired with their normalized labels.
    pub fn members<'a>(
        &'a self,
        report: &'a GroupReport,
    ) -> impl Iterator<Item = (&'a CaseRecord, &'a NormalizedLabel)> + 'a {
        report
            .coverage
            .members()
            .map(|idx| (&self.cases[idx], &self.labels[idx]))
    }
}

/// Runs the reconciliation over a loaded table.
///
/// Fails when `UID` or `Institution` is missing or when the label column
/// can neither be found by name nor detected.
pub fn reconcile(
    table: &MetadataTable,
    label_column: Option<&str>,
    groups: &GroupSet,
) -> Result<Reconciliation> {
    let label_column = resolve_label_column(&table.headers, label_column)?;
    let cases = table.to_cases(Some(&label_column))?;
    let labels: Vec<NormalizedLabel> = cases
        .iter()
        .map(|case| normalize_label(&case.label))
        .collect();
    debug!(
        label_column = %label_column,
        cases = cases.len(),
        "labels normalized"
    );

    let groups: Vec<GroupReport> = evaluate_coverage(&cases, groups)
        .into_iter()
        .map(|coverage| {
            let distribution = label_distribution(&labels, &coverage.mask);
            info!(
                group = %coverage.group.name,
                cases = coverage.count,
                unmapped_labels = distribution.unmapped(),
                "group evaluated"
            );
            GroupReport {
                coverage,
                distribution,
            }
        })
        .collect();

    Ok(Reconciliation {
        label_column,
        cases,
        labels,
        groups,
    })
}
