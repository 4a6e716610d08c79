use serde::{Deserialize, Serialize};

/// One 3-hour forecast data point from the upstream provider.
///
/// `temp_min <= temp <= temp_max` is trusted from upstream, not enforced here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSample {
    /// Seconds since the unix epoch
    pub timestamp: i64,
    /// Degrees Celsius
    pub temp: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    /// Millimeters of rain accumulated over the preceding 3 hours
    pub precipitation_3h: Option<f64>,
    pub description: String,
}

impl RawSample {
    /// Rain for this interval, absent counts as zero.
    pub fn rain(&self) -> f64 {
        self.precipitation_3h.unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::RawSample;

    #[test]
    fn test_rain_defaults_to_zero() {
        let mut sample = RawSample {
            timestamp: 1717200000,
            temp: 21.0,
            temp_min: 19.5,
            temp_max: 22.5,
            precipitation_3h: None,
            description: "few clouds".to_string(),
        };
        assert_eq!(sample.rain(), 0.0);
        sample.precipitation_3h = Some(0.75);
        assert_eq!(sample.rain(), 0.75);
    }
}
