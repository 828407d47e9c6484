//! Bar charts rendered to PNG.
//!
//! Rendering sits behind [`ChartRenderer`] so callers only describe the
//! data; [`PngChartRenderer`] draws grouped bars with axes and gridlines.

use std::path::Path;

use image::{ImageFormat, Rgb, RgbImage};
use tracing::debug;

use odelia_model::CanonicalLabel;
use odelia_reconcile::{AgeSummary, InstitutionCount, ModalityCount, Reconciliation};

use crate::common::ensure_parent_dir;
use crate::error::{OutputError, Result};

pub const MODALITY_CHART_FILE: &str = "modality_distribution.png";
pub const CLASS_CHART_FILE: &str = "class_distribution.png";

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const AXIS: Rgb<u8> = Rgb([0, 0, 0]);
const GRID: Rgb<u8> = Rgb([225, 225, 225]);
const PALETTE: [Rgb<u8>; 6] = [
    Rgb([31, 119, 180]),
    Rgb([255, 127, 14]),
    Rgb([44, 160, 44]),
    Rgb([214, 39, 40]),
    Rgb([148, 103, 189]),
    Rgb([140, 86, 75]),
];
const GRID_LINES: u32 = 5;
const MARGIN_LEFT: u32 = 80;
const MARGIN_RIGHT: u32 = 30;
const MARGIN_TOP: u32 = 40;
const MARGIN_BOTTOM: u32 = 60;

/// One bar per category.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub title: String,
    pub categories: Vec<String>,
    pub series: Vec<Series>,
}

impl BarChart {
    pub fn single(
        title: impl Into<String>,
        categories: Vec<String>,
        name: impl Into<String>,
        values: Vec<f64>,
    ) -> Self {
        Self {
            title: title.into(),
            categories,
            series: vec![Series {
                name: name.into(),
                values,
            }],
        }
    }

    pub fn max_value(&self) -> f64 {
        self.series
            .iter()
            .flat_map(|series| series.values.iter().copied())
            .fold(0.0, f64::max)
    }
}

pub trait ChartRenderer {
    fn render(&self, chart: &BarChart, path: &Path) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PngChartRenderer {
    pub width: u32,
    pub height: u32,
}

impl Default for PngChartRenderer {
    fn default() -> Self {
        Self {
            width: 1500,
            height: 750,
        }
    }
}

impl PngChartRenderer {
    /// Draws the chart into an in-memory image.
    pub fn draw(&self, chart: &BarChart) -> Option<RgbImage> {
        if self.width <= MARGIN_LEFT + MARGIN_RIGHT || self.height <= MARGIN_TOP + MARGIN_BOTTOM {
            return None;
        }
        let mut img = RgbImage::from_pixel(self.width, self.height, BACKGROUND);
        let plot_w = self.width - MARGIN_LEFT - MARGIN_RIGHT;
        let plot_h = self.height - MARGIN_TOP - MARGIN_BOTTOM;
        let baseline = MARGIN_TOP + plot_h;

        for step in 1..=GRID_LINES {
            let y = baseline - plot_h * step / GRID_LINES;
            fill_rect(&mut img, MARGIN_LEFT, y, plot_w, 1, GRID);
        }

        let max = chart.max_value();
        let categories = chart.categories.len() as u32;
        let series_count = chart.series.len() as u32;
        if categories > 0 && series_count > 0 && max > 0.0 {
            let slot = plot_w / categories;
            let group_w = slot * 4 / 5;
            let bar_w = (group_w / series_count).max(1);
            for (s, series) in chart.series.iter().enumerate() {
                let color = PALETTE[s % PALETTE.len()];
                for (c, value) in series.values.iter().enumerate().take(categories as usize) {
                    let height = ((value.max(0.0) / max) * plot_h as f64).round() as u32;
                    let x = MARGIN_LEFT + slot * c as u32 + (slot - group_w) / 2 + bar_w * s as u32;
                    fill_rect(&mut img, x, baseline - height, bar_w, height, color);
                }
            }
        }

        fill_rect(&mut img, MARGIN_LEFT - 2, MARGIN_TOP, 2, plot_h + 2, AXIS);
        fill_rect(&mut img, MARGIN_LEFT - 2, baseline, plot_w + 2, 2, AXIS);
        Some(img)
    }
}

impl ChartRenderer for PngChartRenderer {
    fn render(&self, chart: &BarChart, path: &Path) -> Result<()> {
        let img = self.draw(chart).ok_or_else(|| OutputError::Chart {
            path: path.to_path_buf(),
            message: format!("canvas {}x{} is too small", self.width, self.height),
        })?;
        ensure_parent_dir(path)?;
        img.save_with_format(path, ImageFormat::Png)
            .map_err(|e| OutputError::Chart {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        debug!(title = %chart.title, path = %path.display(), "chart rendered");
        Ok(())
    }
}

fn fill_rect(img: &mut RgbImage, x: u32, y: u32, w: u32, h: u32, color: Rgb<u8>) {
    let x_end = (x + w).min(img.width());
    let y_end = (y + h).min(img.height());
    for py in y..y_end {
        for px in x..x_end {
            img.put_pixel(px, py, color);
        }
    }
}

/// Cases meeting each group's required modality combination.
pub fn modality_group_chart(reconciliation: &Reconciliation) -> BarChart {
    BarChart::single(
        "Modality Coverage",
        reconciliation
            .groups
            .iter()
            .map(|report| report.coverage.group.name.clone())
            .collect(),
        "Cases",
        reconciliation
            .groups
            .iter()
            .map(|report| report.coverage.count as f64)
            .collect(),
    )
}

/// Canonical label counts, one series per group.
pub fn class_distribution_chart(reconciliation: &Reconciliation) -> BarChart {
    BarChart {
        title: "Class Distribution".to_string(),
        categories: CanonicalLabel::ALL
            .iter()
            .map(|label| label.as_str().to_string())
            .collect(),
        series: reconciliation
            .groups
            .iter()
            .map(|report| Series {
                name: report.coverage.group.name.clone(),
                values: CanonicalLabel::ALL
                    .iter()
                    .map(|label| report.distribution.count(*label) as f64)
                    .collect(),
            })
            .collect(),
    }
}

pub fn institution_chart(counts: &[InstitutionCount]) -> BarChart {
    BarChart::single(
        "Samples per Institution",
        counts.iter().map(|c| c.institution.clone()).collect(),
        "Cases",
        counts.iter().map(|c| c.cases as f64).collect(),
    )
}

pub fn modality_coverage_chart(counts: &[ModalityCount]) -> BarChart {
    BarChart::single(
        "Modality Coverage (number of cases with modality)",
        counts.iter().map(|c| c.modality.clone()).collect(),
        "Cases",
        counts.iter().map(|c| c.cases as f64).collect(),
    )
}

pub fn age_histogram_chart(age: &AgeSummary) -> BarChart {
    BarChart::single(
        "Age Distribution (All Cases)",
        age.histogram
            .iter()
            .map(|bin| format!("{:.1}-{:.1}", bin.lower, bin.upper))
            .collect(),
        "Count",
        age.histogram.iter().map(|bin| bin.count as f64).collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tallest_bar_reaches_the_top_gridline() {
        let renderer = PngChartRenderer {
            width: 300,
            height: 200,
        };
        let chart = BarChart::single(
            "t",
            vec!["a".to_string(), "b".to_string()],
            "Cases",
            vec![1.0, 2.0],
        );
        let img = renderer.draw(&chart).expect("draw");
        let plot_w = 300 - MARGIN_LEFT - MARGIN_RIGHT;
        let slot = plot_w / 2;
        let x = MARGIN_LEFT + slot + slot / 2;
        assert_eq!(*img.get_pixel(x, MARGIN_TOP + 1), PALETTE[0]);
        // The shorter bar stops halfway.
        let x_first = MARGIN_LEFT + slot / 2;
        assert_eq!(*img.get_pixel(x_first, MARGIN_TOP + 10), BACKGROUND);
    }

    #[test]
    fn empty_chart_still_draws_axes() {
        let renderer = PngChartRenderer {
            width: 300,
            height: 200,
        };
        let chart = BarChart::single("t", Vec::new(), "Cases", Vec::new());
        let img = renderer.draw(&chart).expect("draw");
        assert_eq!(*img.get_pixel(MARGIN_LEFT - 1, MARGIN_TOP + 5), AXIS);
    }

    #[test]
    fn tiny_canvas_is_rejected() {
        let renderer = PngChartRenderer {
            width: 50,
            height: 50,
        };
        let chart = BarChart::single("t", Vec::new(), "Cases", Vec::new());
        assert!(renderer.draw(&chart).is_none());
    }
}
