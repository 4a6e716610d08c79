//! Forecast aggregation and crop risk evaluation.
//!
//! Raw 3-hour samples are folded into per-day summaries by
//! [`aggregation::aggregate`], bucketed into calendar days by a
//! [`day_key::DayBoundary`]. [`risk::evaluate`] classifies those summaries
//! against a [`ccr_forecast::CropRule`], and [`assessment::assess`] composes
//! the two for display.

pub mod aggregation;
pub mod assessment;
pub mod day_key;
pub mod risk;
