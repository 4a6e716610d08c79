//! Core types for crop climate risk: forecast samples, the provider feed
//! format, the crop rule registry and, behind the `api` feature, the
//! OpenWeather client.

#[cfg(feature = "api")]
pub mod client;
pub mod crop;
pub mod error;
pub mod feed;
pub mod sample;

pub use crop::{CropRegistry, CropRule};
pub use error::{ForecastError, Result};
pub use feed::ForecastFeed;
pub use sample::RawSample;
