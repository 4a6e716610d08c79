//! Line chart data for the daily average temperature, written as JSON for an
//! external chart renderer.

use crate::display::Surface;
use anyhow::Context;
use ccr_data::aggregation::DailySummary;
use log::info;
use serde::Serialize;
use std::path::PathBuf;

pub const AVERAGE_TEMPERATURE_LABEL: &str = "Average Daily Temperature (°C)";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineChart {
    pub title: String,
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

impl LineChart {
    /// One point per day, labelled by date, in the order the days were given.
    pub fn average_temperature(title: &str, daily: &[DailySummary]) -> Self {
        LineChart {
            title: title.to_string(),
            labels: daily.iter().map(|d| d.date.clone()).collect(),
            datasets: vec![Dataset {
                label: AVERAGE_TEMPERATURE_LABEL.to_string(),
                data: daily.iter().map(|d| d.avg_temp).collect(),
            }],
        }
    }
}

/// A chart written to a JSON file; tearing it down removes the file.
pub struct ChartFile {
    pub path: PathBuf,
    pub chart: LineChart,
}

impl ChartFile {
    pub fn new(path: impl Into<PathBuf>, chart: LineChart) -> Self {
        ChartFile {
            path: path.into(),
            chart,
        }
    }
}

impl Surface for ChartFile {
    fn present(&mut self) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(&self.chart)?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("writing chart to {}", self.path.display()))?;
        info!("Chart written to {}", self.path.display());
        Ok(())
    }

    fn teardown(&mut self) -> anyhow::Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("removing chart {}", self.path.display())),
        }
    }
}
