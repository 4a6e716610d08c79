//! Parsing of the OpenWeather 5 day / 3 hour forecast payload.

use crate::error::{ForecastError, Result};
use crate::sample::RawSample;
use chrono::FixedOffset;
use log::debug;
use serde_json::Value;

/// A parsed forecast payload: the interval samples plus the location metadata
/// the provider attaches to them.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastFeed {
    pub city: Option<String>,
    /// Shift of the forecast location from UTC, in seconds
    pub utc_offset_seconds: Option<i32>,
    pub samples: Vec<RawSample>,
}

impl ForecastFeed {
    /// Parse a forecast response body.
    ///
    /// Each entry of `list` must carry `dt`, `main.temp`, `main.temp_min`,
    /// `main.temp_max` and `weather[0].description`; `rain.3h` is optional.
    /// The first entry that does not fails with
    /// [`ForecastError::MalformedSample`] naming its index and field.
    pub fn from_json(body: &str) -> Result<ForecastFeed> {
        let root: Value = serde_json::from_str(body)?;
        let list = root
            .get("list")
            .and_then(Value::as_array)
            .ok_or_else(|| ForecastError::InvalidFeed("missing `list` array".to_string()))?;

        let samples = list
            .iter()
            .enumerate()
            .map(|(index, item)| parse_item(index, item))
            .collect::<Result<Vec<RawSample>>>()?;

        let city = root
            .pointer("/city/name")
            .and_then(Value::as_str)
            .map(String::from);
        let utc_offset_seconds = root
            .pointer("/city/timezone")
            .and_then(Value::as_i64)
            .and_then(|s| i32::try_from(s).ok());

        debug!(
            "Parsed {} forecast samples for {}",
            samples.len(),
            city.as_deref().unwrap_or("unnamed location")
        );

        Ok(ForecastFeed {
            city,
            utc_offset_seconds,
            samples,
        })
    }

    /// The location's offset from UTC, when the provider reported a valid one.
    pub fn utc_offset(&self) -> Option<FixedOffset> {
        self.utc_offset_seconds.and_then(FixedOffset::east_opt)
    }
}

fn parse_item(index: usize, item: &Value) -> Result<RawSample> {
    let timestamp = item
        .get("dt")
        .and_then(Value::as_i64)
        .ok_or_else(|| ForecastError::malformed(index, "dt"))?;
    let temp = number(index, item, "/main/temp", "main.temp")?;
    let temp_min = number(index, item, "/main/temp_min", "main.temp_min")?;
    let temp_max = number(index, item, "/main/temp_max", "main.temp_max")?;

    let precipitation_3h = match item.pointer("/rain/3h") {
        None | Some(Value::Null) => None,
        Some(v) => Some(
            v.as_f64()
                .ok_or_else(|| ForecastError::malformed(index, "rain.3h"))?,
        ),
    };

    let description = item
        .pointer("/weather/0/description")
        .and_then(Value::as_str)
        .ok_or_else(|| ForecastError::malformed(index, "weather[0].description"))?
        .to_string();

    Ok(RawSample {
        timestamp,
        temp,
        temp_min,
        temp_max,
        precipitation_3h,
        description,
    })
}

fn number(index: usize, item: &Value, pointer: &str, field: &str) -> Result<f64> {
    item.pointer(pointer)
        .and_then(Value::as_f64)
        .ok_or_else(|| ForecastError::malformed(index, field))
}
