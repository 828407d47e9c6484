//! Output generation for reconciled metadata.
//!
//! - **Group indexes**: one filtered CSV per modality group
//! - **Summaries**: `summary.json` for reconcile and describe runs
//! - **Charts**: PNG bar charts behind the [`ChartRenderer`] trait

pub mod chart;
mod common;
mod error;
mod index;
mod summary;

pub use chart::{
    BarChart, CLASS_CHART_FILE, ChartRenderer, MODALITY_CHART_FILE, PngChartRenderer, Series,
    age_histogram_chart, class_distribution_chart, institution_chart, modality_coverage_chart,
    modality_group_chart,
};
pub use common::{ensure_dir, ensure_parent_dir, write_csv};
pub use error::{OutputError, Result};
pub use index::{
    GroupIndex, build_group_index, group_index_file_name, write_group_index, write_metadata_table,
};
pub use summary::{
    DescribeSummary, GroupSummary, RECONCILE_SUMMARY_FILE, RunSummary, to_json, write_json,
};
