//! Descriptive statistics over a metadata table.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::warn;

use odelia_ingest::MetadataTable;
use odelia_model::{CellValue, INSTITUTION_COLUMN, modality_from_flag_column};

use crate::error::Result;
use crate::truthy::is_truthy;

pub const AGE_COLUMN: &str = "Age";
pub const AGE_HISTOGRAM_BINS: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstitutionCount {
    pub institution: String,
    pub cases: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModalityCount {
    pub modality: String,
    pub cases: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Min, quartiles and max with linear interpolation between order statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FiveNumberSummary {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstitutionAges {
    pub institution: String,
    pub count: usize,
    pub summary: FiveNumberSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgeSummary {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub histogram: Vec<HistogramBin>,
    pub by_institution: Vec<InstitutionAges>,
}

/// Cases per institution, most cases first and ties by name.
pub fn institution_counts(table: &MetadataTable) -> Result<Vec<InstitutionCount>> {
    let index = table.require_column(INSTITUTION_COLUMN)?;
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for row in 0..table.len() {
        *counts.entry(table.cell(row, index)).or_insert(0) += 1;
    }
    let mut ordered: Vec<InstitutionCount> = counts
        .into_iter()
        .map(|(institution, cases)| InstitutionCount {
            institution: institution.to_string(),
            cases,
        })
        .collect();
    ordered.sort_by(|a, b| b.cases.cmp(&a.cases).then_with(|| a.institution.cmp(&b.institution)));
    Ok(ordered)
}

/// Cases with each modality present, sorted by modality name.
pub fn modality_coverage(table: &MetadataTable) -> Vec<ModalityCount> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for (index, header) in table.headers.iter().enumerate() {
        let Some(modality) = modality_from_flag_column(header) else {
            continue;
        };
        let cases = (0..table.len())
            .filter(|row| is_truthy(&CellValue::infer(table.cell(*row, index))))
            .count();
        *counts.entry(modality.to_string()).or_insert(0) += cases;
    }
    counts
        .into_iter()
        .map(|(modality, cases)| ModalityCount { modality, cases })
        .collect()
}

/// Age statistics, or `None` when the table has no usable ages.
///
/// Institutions follow `institution_order`; institutions without any age
/// are left out.
pub fn age_summary(
    table: &MetadataTable,
    institution_order: &[InstitutionCount],
) -> Option<AgeSummary> {
    let Some(age_index) = table.column_index(AGE_COLUMN) else {
        warn!("no Age column; skipping age statistics");
        return None;
    };
    let institution_index = table.column_index(INSTITUTION_COLUMN);

    let mut ages = Vec::new();
    let mut by_institution: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for row in 0..table.len() {
        let Some(age) = CellValue::infer(table.cell(row, age_index)).as_f64() else {
            continue;
        };
        ages.push(age);
        if let Some(index) = institution_index {
            by_institution
                .entry(table.cell(row, index))
                .or_default()
                .push(age);
        }
    }
    if ages.is_empty() {
        warn!("Age column has no numeric values; skipping age statistics");
        return None;
    }

    let summary = five_number_summary(&mut ages)?;
    let mean = ages.iter().sum::<f64>() / ages.len() as f64;
    let histogram = histogram(&ages, AGE_HISTOGRAM_BINS);
    let by_institution = institution_order
        .iter()
        .filter_map(|entry| {
            let values = by_institution.get_mut(entry.institution.as_str())?;
            let count = values.len();
            let summary = five_number_summary(values)?;
            Some(InstitutionAges {
                institution: entry.institution.clone(),
                count,
                summary,
            })
        })
        .collect();

    Some(AgeSummary {
        count: ages.len(),
        min: summary.min,
        max: summary.max,
        mean,
        histogram,
        by_institution,
    })
}

/// Equal-width bins over `[min, max]`; the last bin includes `max`.
/// A degenerate range is widened by 0.5 on each side.
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }
    let mut lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let mut hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }
    let width = (hi - lo) / bins as f64;
    let mut counts = vec![0usize; bins];
    for value in values {
        let slot = (((value - lo) / width).floor() as usize).min(bins - 1);
        counts[slot] += 1;
    }
    counts
        .into_iter()
        .enumerate()
        .map(|(idx, count)| HistogramBin {
            lower: lo + width * idx as f64,
            upper: lo + width * (idx + 1) as f64,
            count,
        })
        .collect()
}

/// Sorts `values` in place and summarizes them.
pub fn five_number_summary(values: &mut [f64]) -> Option<FiveNumberSummary> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    Some(FiveNumberSummary {
        min: values[0],
        q1: quantile(values, 0.25),
        median: quantile(values, 0.5),
        q3: quantile(values, 0.75),
        max: values[values.len() - 1],
    })
}

fn quantile(sorted: &[f64], q: f64) -> f64 {
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(headers: &[&str], rows: &[&[&str]]) -> MetadataTable {
        MetadataTable::new(
            headers.iter().map(|h| (*h).to_string()).collect(),
            rows.iter()
                .map(|row| row.iter().map(|v| (*v).to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn institutions_sorted_by_count_then_name() {
        let t = table(
            &["UID", "Institution"],
            &[&["1", "MHA"], &["2", "CAM"], &["3", "RUMC"], &["4", "RUMC"]],
        );
        let counts = institution_counts(&t).expect("counts");
        let names: Vec<&str> = counts.iter().map(|c| c.institution.as_str()).collect();
        assert_eq!(names, vec!["RUMC", "CAM", "MHA"]);
        assert_eq!(counts[0].cases, 2);
    }

    #[test]
    fn institution_column_is_required() {
        let t = table(&["UID"], &[&["1"]]);
        assert!(institution_counts(&t).is_err());
    }

    #[test]
    fn modality_coverage_counts_truthy_flags() {
        let t = table(
            &["UID", "has_T2", "has_Pre"],
            &[&["1", "True", "1"], &["2", "False", "yes"], &["3", "", "True"]],
        );
        let coverage = modality_coverage(&t);
        assert_eq!(
            coverage,
            vec![
                ModalityCount {
                    modality: "Pre".to_string(),
                    cases: 3
                },
                ModalityCount {
                    modality: "T2".to_string(),
                    cases: 1
                },
            ]
        );
    }

    #[test]
    fn quartiles_interpolate() {
        let mut values = vec![4.0, 1.0, 3.0, 2.0];
        let summary = five_number_summary(&mut values).expect("summary");
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.q1, 1.75);
        assert_eq!(summary.median, 2.5);
        assert_eq!(summary.q3, 3.25);
        assert_eq!(summary.max, 4.0);
    }

    #[test]
    fn histogram_includes_max_in_last_bin() {
        let bins = histogram(&[0.0, 5.0, 10.0], 2);
        assert_eq!(bins.len(), 2);
        assert_eq!(bins[0].count, 1);
        assert_eq!(bins[1].count, 2);
        assert_eq!(bins[1].upper, 10.0);
    }

    #[test]
    fn histogram_widens_single_value() {
        let bins = histogram(&[50.0, 50.0], 4);
        assert_eq!(bins[0].lower, 49.5);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 2);
    }

    #[test]
    fn age_summary_groups_by_institution_order() {
        let t = table(
            &["UID", "Institution", "Age"],
            &[
                &["1", "CAM", "40"],
                &["2", "CAM", "60"],
                &["3", "MHA", ""],
                &["4", "RUMC", "55.5"],
            ],
        );
        let order = institution_counts(&t).expect("counts");
        let summary = age_summary(&t, &order).expect("ages");
        assert_eq!(summary.count, 3);
        assert_eq!(summary.min, 40.0);
        assert_eq!(summary.max, 60.0);
        assert_eq!(summary.histogram.len(), AGE_HISTOGRAM_BINS);
        let names: Vec<&str> = summary
            .by_institution
            .iter()
            .map(|entry| entry.institution.as_str())
            .collect();
        assert_eq!(names, vec!["CAM", "RUMC"]);
        assert_eq!(summary.by_institution[0].summary.median, 50.0);
    }

    #[test]
    fn missing_age_column_is_none() {
        let t = table(&["UID", "Institution"], &[&["1", "CAM"]]);
        assert!(age_summary(&t, &[]).is_none());
    }
}
