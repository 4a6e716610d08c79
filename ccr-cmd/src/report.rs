//! Terminal and CSV renderings of an assessment.

use crate::display::Surface;
use anyhow::Context;
use ccr_data::aggregation::DailySummary;
use ccr_data::assessment::Assessment;
use log::info;
use std::fmt::Write;
use std::path::PathBuf;

/// Drop inline markup such as `<strong>` from guidance text.
pub fn strip_markup(text: &str) -> String {
    let mut plain = String::with_capacity(text.len());
    let mut in_tag = false;
    for c in text.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => plain.push(c),
            _ => {}
        }
    }
    plain
}

/// One line for a day: condition, temperature range and rain.
pub fn day_line(day: &DailySummary) -> String {
    format!(
        "{}: {}, Temp: {:.1}°C - {:.1}°C, Rain: {:.2}mm",
        day.date, day.description, day.min_temp, day.max_temp, day.rain_total
    )
}

pub fn render_text(assessment: &Assessment, location: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} | {}", location, assessment.crop);
    let _ = writeln!(out, "Status: {}", assessment.status);
    let _ = writeln!(out);
    let _ = writeln!(out, "Daily forecast:");
    for (day, breaches) in assessment.days() {
        let _ = write!(out, "  {}", day_line(day));
        if !breaches.is_empty() {
            let notes: Vec<String> = breaches.iter().map(ToString::to_string).collect();
            let _ = write!(out, "  [{}]", notes.join("; "));
        }
        let _ = writeln!(out);
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Recommendations:");
    for recommendation in &assessment.recommendations {
        let _ = writeln!(out, "  - {}", strip_markup(recommendation));
    }
    out
}

/// Daily summaries written as CSV; tearing it down removes the file.
pub struct DailyTableFile {
    pub path: PathBuf,
    pub daily: Vec<DailySummary>,
}

impl DailyTableFile {
    pub fn new(path: impl Into<PathBuf>, daily: Vec<DailySummary>) -> Self {
        DailyTableFile {
            path: path.into(),
            daily,
        }
    }
}

impl Surface for DailyTableFile {
    fn present(&mut self) -> anyhow::Result<()> {
        let mut wtr = csv::Writer::from_path(&self.path)
            .with_context(|| format!("creating {}", self.path.display()))?;
        for day in &self.daily {
            wtr.serialize(day)?;
        }
        wtr.flush()?;
        info!("{} days written to {}", self.daily.len(), self.path.display());
        Ok(())
    }

    fn teardown(&mut self) -> anyhow::Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("removing {}", self.path.display())),
        }
    }
}
