use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow};
use comfy_table::Table;

use odelia_cli::pipeline::{
    DescribeOutcome, DescribeRequest, ReconcileOutcome, ReconcileRequest, load_groups,
    run_describe, run_reconcile,
};
use odelia_ingest::DatasetLayout;
use odelia_output::PngChartRenderer;

use crate::cli::{DescribeArgs, GroupsArgs, ReconcileArgs};
use crate::summary::apply_table_style;

pub fn run_reconcile_command(args: &ReconcileArgs) -> Result<ReconcileOutcome> {
    let request = ReconcileRequest {
        metadata: args.metadata.clone(),
        output_dir: args.out.clone(),
        label_column: args.label_column.clone(),
        labels: args.labels.clone(),
        groups: load_groups(args.groups.as_deref())?,
        charts: !args.no_charts,
    };
    run_reconcile(&request, &PngChartRenderer::default())
}

pub fn run_describe_command(args: &DescribeArgs) -> Result<DescribeOutcome> {
    let metadata = describe_metadata_path(args)?;
    let output_dir = args
        .out
        .clone()
        .unwrap_or_else(|| parent_dir(&metadata));
    let request = DescribeRequest {
        metadata,
        output_dir,
        prefix: args.prefix.clone(),
        charts: !args.no_charts,
    };
    run_describe(&request, &PngChartRenderer::default())
}

pub fn run_groups_command(args: &GroupsArgs) -> Result<()> {
    let groups = load_groups(args.groups.as_deref())?;
    let mut table = Table::new();
    table.set_header(vec!["Group", "Modalities", "Flag columns"]);
    apply_table_style(&mut table);
    for group in groups.groups() {
        table.add_row(vec![
            group.name.clone(),
            group.modalities.join(", "),
            group.flag_columns().join(", "),
        ]);
    }
    println!("{table}");
    Ok(())
}

fn describe_metadata_path(args: &DescribeArgs) -> Result<PathBuf> {
    if let Some(path) = &args.metadata {
        return Ok(path.clone());
    }
    match (&args.root, &args.split) {
        (Some(root), Some(split)) => {
            Ok(DatasetLayout::new(root.clone(), args.config.clone(), split.clone()).metadata_path())
        }
        _ => Err(anyhow!("either META_CSV or --root with --split is required")),
    }
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
