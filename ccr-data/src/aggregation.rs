//! Folding of 3-hour forecast samples into per-day summaries.

use crate::day_key::DayBoundary;
use ccr_forecast::{ForecastError, RawSample, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Aggregated statistics for every sample sharing a calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    /// Day key, "YYYY-MM-DD"
    pub date: String,
    pub min_temp: f64,
    pub max_temp: f64,
    /// Mean of the sampled `temp` values
    pub avg_temp: f64,
    /// Millimeters of rain summed over the day's samples
    pub rain_total: f64,
    /// Condition text of the day's first sample
    pub description: String,
    pub sample_count: usize,
}

/// A day still receiving samples. The average is only known once folding ends.
struct DayAccumulator {
    date: String,
    min_temp: f64,
    max_temp: f64,
    rain_total: f64,
    description: String,
    temps: Vec<f64>,
}

impl DayAccumulator {
    fn open(date: String, sample: &RawSample) -> Self {
        DayAccumulator {
            date,
            min_temp: sample.temp_min,
            max_temp: sample.temp_max,
            rain_total: 0.0,
            description: sample.description.clone(),
            temps: Vec::new(),
        }
    }

    fn fold(&mut self, sample: &RawSample) {
        self.min_temp = self.min_temp.min(sample.temp_min);
        self.max_temp = self.max_temp.max(sample.temp_max);
        self.rain_total += sample.rain();
        self.temps.push(sample.temp);
    }

    fn finalize(self) -> DailySummary {
        // Every accumulator is opened by a sample, so temps is never empty.
        let avg_temp = self.temps.iter().sum::<f64>() / self.temps.len() as f64;
        DailySummary {
            date: self.date,
            min_temp: self.min_temp,
            max_temp: self.max_temp,
            avg_temp,
            rain_total: self.rain_total,
            description: self.description,
            sample_count: self.temps.len(),
        }
    }
}

fn check(sample: &RawSample, index: usize) -> Result<()> {
    let fields = [
        ("temp", sample.temp),
        ("temp_min", sample.temp_min),
        ("temp_max", sample.temp_max),
    ];
    for (field, value) in fields {
        if !value.is_finite() {
            return Err(ForecastError::malformed(index, field));
        }
    }
    match sample.precipitation_3h {
        Some(rain) if !rain.is_finite() || rain < 0.0 => {
            Err(ForecastError::malformed(index, "precipitation_3h"))
        }
        _ => Ok(()),
    }
}

/// Group samples by calendar day and compute each day's statistics.
///
/// Days are returned in the order their first sample appears. An empty input
/// yields an empty output.
pub fn aggregate(samples: &[RawSample], boundary: &DayBoundary) -> Result<Vec<DailySummary>> {
    let mut days: Vec<DayAccumulator> = Vec::new();
    let mut by_date: HashMap<String, usize> = HashMap::new();

    for (index, sample) in samples.iter().enumerate() {
        check(sample, index)?;
        let date = boundary
            .date_key(sample.timestamp)
            .ok_or_else(|| ForecastError::malformed(index, "timestamp"))?;
        let slot = match by_date.get(&date) {
            Some(&slot) => slot,
            None => {
                by_date.insert(date.clone(), days.len());
                days.push(DayAccumulator::open(date, sample));
                days.len() - 1
            }
        };
        days[slot].fold(sample);
    }

    debug!("Aggregated {} samples into {} days", samples.len(), days.len());
    Ok(days.into_iter().map(DayAccumulator::finalize).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2024-06-01T00:00:00Z
    const DAY_ONE: i64 = 1717200000;
    const HOUR: i64 = 3600;

    fn sample(timestamp: i64, temp: f64, temp_min: f64, temp_max: f64, rain: Option<f64>) -> RawSample {
        RawSample {
            timestamp,
            temp,
            temp_min,
            temp_max,
            precipitation_3h: rain,
            description: format!("sample at {}", timestamp),
        }
    }

    #[test]
    fn test_empty_input() {
        let days = aggregate(&[], &DayBoundary::Utc).unwrap();
        assert!(days.is_empty());
    }

    #[test]
    fn test_single_day_average() {
        let samples = vec![
            sample(DAY_ONE, 20.0, 19.0, 21.0, None),
            sample(DAY_ONE + 3 * HOUR, 25.0, 24.0, 26.0, None),
            sample(DAY_ONE + 6 * HOUR, 30.0, 29.0, 31.0, None),
        ];
        let days = aggregate(&samples, &DayBoundary::Utc).unwrap();
        assert_eq!(days.len(), 1);
        let day = &days[0];
        assert_eq!(day.date, "2024-06-01");
        assert_eq!(day.avg_temp, 25.0);
        assert_eq!(day.rain_total, 0.0);
        assert_eq!(day.min_temp, 19.0);
        assert_eq!(day.max_temp, 31.0);
        assert_eq!(day.sample_count, 3);
    }

    #[test]
    fn test_single_sample_average_is_exact() {
        let days = aggregate(&[sample(DAY_ONE, 17.3, 16.1, 18.9, None)], &DayBoundary::Utc).unwrap();
        assert_eq!(days[0].avg_temp, 17.3);
    }

    #[test]
    fn test_first_description_wins() {
        let mut later = sample(DAY_ONE + 3 * HOUR, 20.0, 19.0, 21.0, Some(4.0));
        later.description = "heavy intensity rain".to_string();
        let mut first = sample(DAY_ONE, 20.0, 19.0, 21.0, None);
        first.description = "clear sky".to_string();
        let days = aggregate(&[first, later], &DayBoundary::Utc).unwrap();
        assert_eq!(days[0].description, "clear sky");
    }

    #[test]
    fn test_rain_accumulates_and_absent_is_zero() {
        let samples = vec![
            sample(DAY_ONE, 20.0, 19.0, 21.0, Some(1.5)),
            sample(DAY_ONE + 3 * HOUR, 20.0, 19.0, 21.0, None),
            sample(DAY_ONE + 6 * HOUR, 20.0, 19.0, 21.0, Some(2.25)),
        ];
        let days = aggregate(&samples, &DayBoundary::Utc).unwrap();
        assert_eq!(days[0].rain_total, 3.75);
    }

    #[test]
    fn test_first_seen_order_not_sorted() {
        let samples = vec![
            sample(DAY_ONE + 24 * HOUR, 20.0, 19.0, 21.0, None),
            sample(DAY_ONE, 20.0, 19.0, 21.0, None),
            sample(DAY_ONE + 27 * HOUR, 22.0, 19.0, 23.0, None),
        ];
        let days = aggregate(&samples, &DayBoundary::Utc).unwrap();
        let dates: Vec<&str> = days.iter().map(|d| d.date.as_str()).collect();
        assert_eq!(dates, vec!["2024-06-02", "2024-06-01"]);
        assert_eq!(days[0].sample_count, 2);
        assert_eq!(days[0].avg_temp, 21.0);
    }

    #[test]
    fn test_distinct_date_count_and_min_max_order() {
        let samples: Vec<RawSample> = (0..40)
            .map(|i| {
                let t = 10.0 + (i % 7) as f64;
                sample(DAY_ONE + i * 3 * HOUR, t, t - 2.0, t + 3.0, None)
            })
            .collect();
        let days = aggregate(&samples, &DayBoundary::Utc).unwrap();
        assert_eq!(days.len(), 5);
        assert_eq!(days.iter().map(|d| d.sample_count).sum::<usize>(), 40);
        for day in &days {
            assert!(day.min_temp <= day.max_temp);
            assert!(day.min_temp <= day.avg_temp && day.avg_temp <= day.max_temp);
        }
    }

    #[test]
    fn test_order_within_day_does_not_change_statistics() {
        let forward = vec![
            sample(DAY_ONE, 20.0, 18.0, 22.0, Some(1.0)),
            sample(DAY_ONE + 3 * HOUR, 25.0, 23.0, 27.5, None),
            sample(DAY_ONE + 6 * HOUR, 30.0, 28.5, 32.0, Some(0.5)),
        ];
        let mut reversed = forward.clone();
        reversed.reverse();
        let a = aggregate(&forward, &DayBoundary::Utc).unwrap();
        let b = aggregate(&reversed, &DayBoundary::Utc).unwrap();
        assert_eq!(a[0].min_temp, b[0].min_temp);
        assert_eq!(a[0].max_temp, b[0].max_temp);
        assert_eq!(a[0].avg_temp, b[0].avg_temp);
        assert_eq!(a[0].rain_total, b[0].rain_total);
        assert_eq!(aggregate(&forward, &DayBoundary::Utc).unwrap(), a);
    }

    #[test]
    fn test_inverted_sample_does_not_invert_day() {
        // temp_min above temp_max on one sample, passed through from upstream
        let samples = vec![
            sample(DAY_ONE, 20.0, 25.0, 15.0, None),
            sample(DAY_ONE + 3 * HOUR, 20.0, 19.0, 21.0, None),
        ];
        let days = aggregate(&samples, &DayBoundary::Utc).unwrap();
        assert_eq!(days[0].min_temp, 19.0);
        assert_eq!(days[0].max_temp, 21.0);
    }

    #[test]
    fn test_boundary_moves_samples_between_days() {
        let samples = vec![
            sample(DAY_ONE + 21 * HOUR, 20.0, 19.0, 21.0, None),
            sample(DAY_ONE + 24 * HOUR, 22.0, 21.0, 23.0, None),
        ];
        let utc = aggregate(&samples, &DayBoundary::Utc).unwrap();
        assert_eq!(utc.len(), 2);
        let ist = DayBoundary::Offset(chrono::FixedOffset::east_opt(19800).unwrap());
        let local = aggregate(&samples, &ist).unwrap();
        assert_eq!(local.len(), 1);
        assert_eq!(local[0].date, "2024-06-02");
        assert_eq!(local[0].avg_temp, 21.0);
    }

    #[test]
    fn test_malformed_samples() {
        let good = sample(DAY_ONE, 20.0, 19.0, 21.0, None);
        let cases = [
            (sample(DAY_ONE, f64::NAN, 19.0, 21.0, None), "temp"),
            (sample(DAY_ONE, 20.0, f64::NEG_INFINITY, 21.0, None), "temp_min"),
            (sample(DAY_ONE, 20.0, 19.0, f64::INFINITY, None), "temp_max"),
            (sample(DAY_ONE, 20.0, 19.0, 21.0, Some(-0.5)), "precipitation_3h"),
            (sample(i64::MAX, 20.0, 19.0, 21.0, None), "timestamp"),
        ];
        for (bad, expected) in cases {
            match aggregate(&[good.clone(), bad], &DayBoundary::Utc) {
                Err(ForecastError::MalformedSample { index, field }) => {
                    assert_eq!(index, 1);
                    assert_eq!(field, expected);
                }
                other => panic!("expected MalformedSample for {}, got {:?}", expected, other),
            }
        }
    }
}
