//! Reconcile and describe pipelines behind the CLI commands.
//!
//! Configuration problems (unreadable input, missing `UID`/`Institution`,
//! no label column, bad groups file) abort the run. Failures while writing
//! a single group index or chart are logged and collected so the remaining
//! outputs are still produced.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{error, info, info_span, trace};

use odelia_ingest::read_metadata_table;
use odelia_model::{GroupSet, NormalizedLabel};
use odelia_output::{
    BarChart, CLASS_CHART_FILE, ChartRenderer, DescribeSummary, MODALITY_CHART_FILE,
    RECONCILE_SUMMARY_FILE, RunSummary, age_histogram_chart, class_distribution_chart, ensure_dir,
    institution_chart, modality_coverage_chart, modality_group_chart, write_group_index,
    write_json, write_metadata_table,
};
use odelia_reconcile::{
    LabelMergeStats, MERGED_LABEL_COLUMN, Reconciliation, age_summary, institution_counts,
    merge_labels, modality_coverage, reconcile,
};

use crate::logging::redact_value;

/// Metadata with externally merged labels, written next to the indexes.
pub const MERGED_METADATA_FILE: &str = "metadata_with_labels.csv";

/// Loads modality groups from a TOML file, or the built-in groups.
pub fn load_groups(path: Option<&Path>) -> Result<GroupSet> {
    let Some(path) = path else {
        return Ok(GroupSet::default());
    };
    let content = fs::read_to_string(path)
        .with_context(|| format!("read groups file {}", path.display()))?;
    let groups: GroupSet = toml::from_str(&content)
        .with_context(|| format!("parse groups file {}", path.display()))?;
    groups
        .validated()
        .with_context(|| format!("invalid groups file {}", path.display()))
}

#[derive(Debug, Clone)]
pub struct ReconcileRequest {
    pub metadata: PathBuf,
    pub output_dir: PathBuf,
    /// Label column of the metadata, or of the labels file when `labels`
    /// is set.
    pub label_column: Option<String>,
    pub labels: Option<PathBuf>,
    pub groups: GroupSet,
    pub charts: bool,
}

#[derive(Debug)]
pub struct ReconcileOutcome {
    pub output_dir: PathBuf,
    pub summary: RunSummary,
    pub index_files: Vec<PathBuf>,
    pub merge: Option<LabelMergeStats>,
    pub merged_metadata: Option<PathBuf>,
    pub summary_file: PathBuf,
    pub charts: Vec<PathBuf>,
    pub errors: Vec<String>,
}

impl ReconcileOutcome {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

pub fn run_reconcile(
    request: &ReconcileRequest,
    renderer: &dyn ChartRenderer,
) -> Result<ReconcileOutcome> {
    let span = info_span!("reconcile", input = %request.metadata.display());
    let _guard = span.enter();

    let mut table = read_metadata_table(&request.metadata).context("load metadata")?;
    info!(
        rows = table.len(),
        columns = table.headers.len(),
        "metadata loaded"
    );
    ensure_dir(&request.output_dir).context("create output directory")?;

    let (merge, merged_metadata, label_column) = match &request.labels {
        Some(path) => {
            let labels = read_metadata_table(path).context("load labels")?;
            let stats = merge_labels(&mut table, &labels, request.label_column.as_deref())
                .context("merge labels")?;
            info!(
                source_column = %stats.source_column,
                matched = stats.matched,
                unmatched = stats.unmatched,
                "labels merged"
            );
            let merged_path = request.output_dir.join(MERGED_METADATA_FILE);
            write_metadata_table(&merged_path, &table).context("write merged metadata")?;
            (Some(stats), Some(merged_path), Some(MERGED_LABEL_COLUMN))
        }
        None => (None, None, request.label_column.as_deref()),
    };

    let reconciliation =
        reconcile(&table, label_column, &request.groups).context("reconcile metadata")?;
    trace_unmapped_labels(&reconciliation);

    let mut errors = Vec::new();
    let mut index_files = Vec::new();
    for report in &reconciliation.groups {
        match write_group_index(&request.output_dir, &table, &reconciliation, report) {
            Ok(path) => index_files.push(path),
            Err(err) => {
                error!(
                    group = %report.coverage.group.name,
                    error = %err,
                    "group index export failed"
                );
                errors.push(format!("{}: {err}", report.coverage.group.name));
            }
        }
    }

    let summary = RunSummary::new(request.metadata.display().to_string(), &reconciliation);
    let summary_file = request.output_dir.join(RECONCILE_SUMMARY_FILE);
    write_json(&summary_file, &summary).context("write summary")?;
    info!(path = %summary_file.display(), "summary written");

    let charts = if request.charts {
        render_charts(
            renderer,
            &request.output_dir,
            vec![
                (
                    MODALITY_CHART_FILE.to_string(),
                    modality_group_chart(&reconciliation),
                ),
                (
                    CLASS_CHART_FILE.to_string(),
                    class_distribution_chart(&reconciliation),
                ),
            ],
            &mut errors,
        )
    } else {
        Vec::new()
    };

    Ok(ReconcileOutcome {
        output_dir: request.output_dir.clone(),
        summary,
        index_files,
        merge,
        merged_metadata,
        summary_file,
        charts,
        errors,
    })
}

#[derive(Debug, Clone)]
pub struct DescribeRequest {
    pub metadata: PathBuf,
    pub output_dir: PathBuf,
    /// Prefix of every file written, e.g. `report_institutions.png`.
    pub prefix: String,
    pub charts: bool,
}

#[derive(Debug)]
pub struct DescribeOutcome {
    pub output_dir: PathBuf,
    pub summary: DescribeSummary,
    pub summary_file: PathBuf,
    pub charts: Vec<PathBuf>,
    pub errors: Vec<String>,
}

impl DescribeOutcome {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

pub fn run_describe(
    request: &DescribeRequest,
    renderer: &dyn ChartRenderer,
) -> Result<DescribeOutcome> {
    let span = info_span!("describe", input = %request.metadata.display());
    let _guard = span.enter();

    let table = read_metadata_table(&request.metadata).context("load metadata")?;
    let institutions = institution_counts(&table).context("count institutions")?;
    let modalities = modality_coverage(&table);
    let age = age_summary(&table, &institutions);
    info!(
        rows = table.len(),
        institutions = institutions.len(),
        modalities = modalities.len(),
        ages = age.as_ref().map_or(0, |age| age.count),
        "metadata described"
    );

    ensure_dir(&request.output_dir).context("create output directory")?;
    let prefix = &request.prefix;
    let mut planned = vec![
        (
            format!("{prefix}_institutions.png"),
            institution_chart(&institutions),
        ),
        (
            format!("{prefix}_modalities.png"),
            modality_coverage_chart(&modalities),
        ),
    ];
    if let Some(age) = &age {
        planned.push((format!("{prefix}_age_hist.png"), age_histogram_chart(age)));
    }

    let summary = DescribeSummary {
        input: request.metadata.display().to_string(),
        cases: table.len(),
        institutions,
        modalities,
        age,
    };
    let summary_file = request.output_dir.join(format!("{prefix}_summary.json"));
    write_json(&summary_file, &summary).context("write summary")?;
    info!(path = %summary_file.display(), "summary written");

    let mut errors = Vec::new();
    let charts = if request.charts {
        render_charts(renderer, &request.output_dir, planned, &mut errors)
    } else {
        Vec::new()
    };

    Ok(DescribeOutcome {
        output_dir: request.output_dir.clone(),
        summary,
        summary_file,
        charts,
        errors,
    })
}

fn render_charts(
    renderer: &dyn ChartRenderer,
    dir: &Path,
    charts: Vec<(String, BarChart)>,
    errors: &mut Vec<String>,
) -> Vec<PathBuf> {
    let mut written = Vec::new();
    for (file_name, chart) in charts {
        let path = dir.join(file_name);
        match renderer.render(&chart, &path) {
            Ok(()) => {
                info!(path = %path.display(), "chart written");
                written.push(path);
            }
            Err(err) => {
                error!(error = %err, "chart rendering failed");
                errors.push(err.to_string());
            }
        }
    }
    written
}

fn trace_unmapped_labels(reconciliation: &Reconciliation) {
    for (case, label) in reconciliation.cases.iter().zip(&reconciliation.labels) {
        if let NormalizedLabel::Other(value) = label {
            trace!(
                uid = redact_value(&case.uid),
                label = redact_value(value),
                "label outside the canonical vocabulary"
            );
        }
    }
}
