use ccr_forecast::ForecastFeed;
use chrono::{DateTime, FixedOffset, Local};
use log::warn;

/// Date format used for day keys: "YYYY-MM-DD"
pub const DAY_KEY_FORMAT: &str = "%Y-%m-%d";

/// Which clock decides where one forecast day ends and the next begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayBoundary {
    Utc,
    /// A fixed shift from UTC, normally the forecast location's own
    Offset(FixedOffset),
    /// Whatever time zone the host running the evaluation is set to
    SystemLocal,
}

impl DayBoundary {
    /// The forecast location's offset when the feed reports one, else the
    /// host's local zone.
    pub fn for_feed(feed: &ForecastFeed) -> DayBoundary {
        match feed.utc_offset() {
            Some(offset) => DayBoundary::Offset(offset),
            None => {
                warn!("Feed carries no location offset, bucketing days in system local time");
                DayBoundary::SystemLocal
            }
        }
    }

    /// Calendar day of a unix timestamp, or `None` when it is out of range.
    pub fn date_key(&self, timestamp: i64) -> Option<String> {
        let utc = DateTime::from_timestamp(timestamp, 0)?;
        let key = match self {
            DayBoundary::Utc => utc.format(DAY_KEY_FORMAT).to_string(),
            DayBoundary::Offset(offset) => utc.with_timezone(offset).format(DAY_KEY_FORMAT).to_string(),
            DayBoundary::SystemLocal => utc.with_timezone(&Local).format(DAY_KEY_FORMAT).to_string(),
        };
        Some(key)
    }
}
