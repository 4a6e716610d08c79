use crate::aggregation::{aggregate, DailySummary};
use crate::day_key::DayBoundary;
use crate::risk::{breaches, evaluate, Breach, RiskStatus};
use ccr_forecast::{CropRegistry, RawSample, Result};
use log::info;
use serde::Serialize;

/// Everything a display needs for one crop over one forecast window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    pub crop: String,
    pub status: RiskStatus,
    pub daily: Vec<DailySummary>,
    /// Parallel to `daily`: the thresholds each day crosses
    pub breaches: Vec<Vec<Breach>>,
    pub recommendations: Vec<String>,
}

impl Assessment {
    /// Days paired with the thresholds they cross.
    pub fn days(&self) -> impl Iterator<Item = (&DailySummary, &[Breach])> {
        self.daily
            .iter()
            .zip(self.breaches.iter().map(Vec::as_slice))
    }
}

/// Assess already aggregated days for a crop.
pub fn assess_daily(
    daily: Vec<DailySummary>,
    crop: &str,
    registry: &CropRegistry,
) -> Result<Assessment> {
    let rule = registry.lookup(crop)?;
    let status = evaluate(&daily, rule);
    let day_breaches = daily.iter().map(|d| breaches(d, rule)).collect();
    info!(
        "{} over {} days: {}",
        rule.name,
        daily.len(),
        status
    );
    Ok(Assessment {
        crop: rule.name.clone(),
        status,
        daily,
        breaches: day_breaches,
        recommendations: rule.recommendations.clone(),
    })
}

/// Aggregate raw samples and assess them for a crop.
pub fn assess(
    samples: &[RawSample],
    boundary: &DayBoundary,
    crop: &str,
    registry: &CropRegistry,
) -> Result<Assessment> {
    let daily = aggregate(samples, boundary)?;
    assess_daily(daily, crop, registry)
}
