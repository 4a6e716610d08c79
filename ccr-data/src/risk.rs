//! Classification of daily summaries against a crop's thresholds.
//!
//! All comparisons are strict: a value equal to its threshold is safe.

use crate::aggregation::DailySummary;
use ccr_forecast::{CropRegistry, CropRule, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Verdict for a whole forecast window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskStatus {
    Safe,
    Warning,
}

impl fmt::Display for RiskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskStatus::Safe => write!(f, "Safe"),
            RiskStatus::Warning => write!(f, "Warning"),
        }
    }
}

/// One threshold a single day crosses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Breach {
    Heat { max_temp: f64, limit: f64 },
    Cold { min_temp: f64, limit: f64 },
    Rain { rain_total: f64, limit: f64 },
}

impl fmt::Display for Breach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Breach::Heat { max_temp, limit } => {
                write!(f, "heat {:.1}°C above {:.1}°C", max_temp, limit)
            }
            Breach::Cold { min_temp, limit } => {
                write!(f, "cold {:.1}°C below {:.1}°C", min_temp, limit)
            }
            Breach::Rain { rain_total, limit } => {
                write!(f, "rain {:.2}mm above {:.2}mm", rain_total, limit)
            }
        }
    }
}

/// Thresholds this day crosses, in heat, cold, rain order.
pub fn breaches(day: &DailySummary, rule: &CropRule) -> Vec<Breach> {
    let mut found = Vec::new();
    if day.max_temp > rule.max_temp {
        found.push(Breach::Heat {
            max_temp: day.max_temp,
            limit: rule.max_temp,
        });
    }
    if day.min_temp < rule.min_temp {
        found.push(Breach::Cold {
            min_temp: day.min_temp,
            limit: rule.min_temp,
        });
    }
    if day.rain_total > rule.rain_limit {
        found.push(Breach::Rain {
            rain_total: day.rain_total,
            limit: rule.rain_limit,
        });
    }
    found
}

/// Warning if any day crosses any threshold, otherwise Safe.
pub fn evaluate(daily: &[DailySummary], rule: &CropRule) -> RiskStatus {
    let breached = daily.iter().any(|day| {
        day.max_temp > rule.max_temp || day.min_temp < rule.min_temp || day.rain_total > rule.rain_limit
    });
    if breached {
        RiskStatus::Warning
    } else {
        RiskStatus::Safe
    }
}

/// Evaluate against the rule registered under `crop`.
///
/// Fails with [`ccr_forecast::ForecastError::UnknownCrop`] rather than
/// falling back to another crop's rule.
pub fn evaluate_crop(
    daily: &[DailySummary],
    crop: &str,
    registry: &CropRegistry,
) -> Result<RiskStatus> {
    let rule = registry.lookup(crop)?;
    Ok(evaluate(daily, rule))
}
