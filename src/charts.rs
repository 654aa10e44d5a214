//! PNG bar charts
//!
//! Two charts: species per conservation status (log y axis) and sheep
//! sightings per park (linear y axis). Rendering errors come back as
//! `AnalysisError::ImageWrite` so the caller can treat them as step-local.

use crate::error::AnalysisError;
use anyhow::Result;
use plotters::prelude::*;
use polars::prelude::{DataFrame, DataType};
use std::error::Error;
use std::path::Path;

/// Matplotlib's "C1" orange
const BAR_COLOR: RGBColor = RGBColor(255, 127, 14);

/// Labelled bar values ready for drawing
#[derive(Debug, Clone)]
pub struct BarChart {
    pub title: String,
    pub y_label: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub log_scale: bool,
    pub size: (u32, u32),
}

impl BarChart {
    /// Build a chart from a label column and a numeric column of `df`
    pub fn from_frame(
        df: &DataFrame,
        label_col: &str,
        value_col: &str,
        title: &str,
        y_label: &str,
    ) -> Result<Self> {
        let labels = df.column(label_col)?.str()?
            .into_iter()
            .map(|v| v.unwrap_or_default().to_string())
            .collect();
        let values = df.column(value_col)?.cast(&DataType::Float64)?
            .f64()?
            .into_iter()
            .map(|v| v.unwrap_or(0.0))
            .collect();

        Ok(Self {
            title: title.to_string(),
            y_label: y_label.to_string(),
            labels,
            values,
            log_scale: false,
            size: (1200, 400),
        })
    }

    pub fn log_scale(mut self) -> Self {
        self.log_scale = true;
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    /// Render to a PNG file
    pub fn draw(&self, path: &Path) -> Result<(), AnalysisError> {
        let outcome = if self.log_scale {
            self.draw_log(path)
        } else {
            self.draw_linear(path)
        };

        outcome.map_err(|e| AnalysisError::ImageWrite {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        tracing::info!("Chart saved: {:?}", path);
        Ok(())
    }

    fn max_value(&self) -> f64 {
        self.values.iter().cloned().fold(0.0, f64::max)
    }

    fn segment_label(&self, value: &SegmentValue<u32>) -> String {
        match value {
            SegmentValue::CenterOf(idx) => self.labels.get(*idx as usize).cloned().unwrap_or_default(),
            _ => String::new(),
        }
    }

    fn draw_linear(&self, path: &Path) -> Result<(), Box<dyn Error>> {
        let n = self.labels.len().max(1) as u32;
        let y_max = (self.max_value() * 1.1).max(1.0);

        let root = BitMapBackend::new(path, self.size).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .margin(20)
            .caption(&self.title, ("sans-serif", 24))
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d((0u32..n).into_segmented(), 0.0..y_max)?;

        chart.configure_mesh()
            .disable_x_mesh()
            .light_line_style(WHITE)
            .bold_line_style(BLACK.mix(0.2))
            .x_labels(n as usize)
            .x_label_formatter(&|v| self.segment_label(v))
            .y_desc(self.y_label.as_str())
            .draw()?;

        chart.draw_series(self.values.iter().enumerate().map(|(i, &v)| {
            let i = i as u32;
            Rectangle::new(
                [(SegmentValue::Exact(i), 0.0), (SegmentValue::Exact(i + 1), v)],
                BAR_COLOR.mix(0.6).filled(),
            )
        }))?;

        root.present()?;
        Ok(())
    }

    fn draw_log(&self, path: &Path) -> Result<(), Box<dyn Error>> {
        let n = self.labels.len().max(1) as u32;
        // Bars start just under 1 so single-species buckets stay visible
        let base = 0.5;
        let y_max = (self.max_value() * 2.0).max(10.0);

        let root = BitMapBackend::new(path, self.size).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .margin(20)
            .caption(&self.title, ("sans-serif", 24))
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d((0u32..n).into_segmented(), (base..y_max).log_scale())?;

        chart.configure_mesh()
            .disable_x_mesh()
            .light_line_style(WHITE)
            .bold_line_style(BLACK.mix(0.2))
            .x_labels(n as usize)
            .x_label_formatter(&|v| self.segment_label(v))
            .y_desc(self.y_label.as_str())
            .draw()?;

        chart.draw_series(self.values.iter().enumerate().map(|(i, &v)| {
            let i = i as u32;
            Rectangle::new(
                [(SegmentValue::Exact(i), base), (SegmentValue::Exact(i + 1), v.max(base))],
                BAR_COLOR.mix(0.6).filled(),
            )
        }))?;

        root.present()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    #[test]
    fn test_from_frame() {
        let df = df![
            "park_name" => &["Bryce National Park", "Yellowstone National Park"],
            "observations" => &[250i64, 507],
        ].unwrap();

        let chart = BarChart::from_frame(&df, "park_name", "observations", "Sheep", "Observations").unwrap();

        assert_eq!(chart.labels, vec!["Bryce National Park", "Yellowstone National Park"]);
        assert_eq!(chart.values, vec![250.0, 507.0]);
        assert!(!chart.log_scale);
        assert!(chart.log_scale().log_scale);
    }

    #[test]
    fn test_segment_label() {
        let df = df![
            "conservation_status" => &["Endangered", "Threatened"],
            "species" => &[15i64, 10],
        ].unwrap();
        let chart = BarChart::from_frame(&df, "conservation_status", "species", "Status", "Species").unwrap();

        assert_eq!(chart.segment_label(&SegmentValue::CenterOf(1)), "Threatened");
        assert_eq!(chart.segment_label(&SegmentValue::Exact(0)), "");
        assert_eq!(chart.segment_label(&SegmentValue::CenterOf(7)), "");
    }

    #[test]
    fn test_draw_writes_png_for_both_scales() {
        let dir = tempfile::tempdir().unwrap();
        let df = df![
            "conservation_status" => &["In Recovery", "Threatened", "Endangered", "No Intervention"],
            "species" => &[4i64, 9, 15, 5363],
        ].unwrap();
        let chart = BarChart::from_frame(&df, "conservation_status", "species", "Status", "Species")
            .unwrap()
            .with_size(400, 200);

        let linear = dir.path().join("linear.png");
        chart.draw(&linear).unwrap();

        let log = dir.path().join("log.png");
        chart.clone().log_scale().draw(&log).unwrap();

        for path in [&linear, &log] {
            let bytes = std::fs::read(path).unwrap();
            assert!(bytes.starts_with(b"\x89PNG"), "{:?} is not a PNG", path);
        }
    }

    #[test]
    fn test_unwritable_path_is_image_write_error() {
        let chart = BarChart {
            title: "Status".to_string(),
            y_label: "Species".to_string(),
            labels: vec!["Endangered".to_string()],
            values: vec![15.0],
            log_scale: true,
            size: (200, 100),
        };

        let err = chart.draw(Path::new("/nonexistent-dir/chart.png")).unwrap_err();
        assert!(matches!(err, AnalysisError::ImageWrite { .. }));
    }
}
