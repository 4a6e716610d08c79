//! OpenWeather geocoding and 5 day / 3 hour forecast client.
//!
//! Requests are made once; a failed request surfaces as an error and is not
//! retried here.

use crate::error::{ForecastError, Result};
use crate::feed::ForecastFeed;
use log::{info, warn};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const GEO_BASE_URL: &str = "http://api.openweathermap.org/geo/1.0";
pub const DATA_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Latitude/longitude of a geocoded location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Deserialize)]
struct GeocodeMatch {
    lat: f64,
    lon: f64,
}

pub struct OpenWeatherClient {
    client: Client,
    api_key: String,
    geo_url: String,
    data_url: String,
}

impl OpenWeatherClient {
    pub fn new(api_key: &str) -> Result<Self> {
        Self::with_base_urls(api_key, GEO_BASE_URL, DATA_BASE_URL)
    }

    /// Point the client at alternative endpoints (a proxy or a test server).
    pub fn with_base_urls(api_key: &str, geo_url: &str, data_url: &str) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(ForecastError::InvalidInput(
                "OpenWeather API key is empty".to_string(),
            ));
        }
        Ok(Self {
            client: Client::builder().timeout(Duration::from_secs(30)).build()?,
            api_key: api_key.to_string(),
            geo_url: geo_url.trim_end_matches('/').to_string(),
            data_url: data_url.trim_end_matches('/').to_string(),
        })
    }

    /// Resolve a free-text location to coordinates using the first match.
    pub async fn geocode(&self, location: &str) -> Result<Coordinates> {
        let location = location.trim();
        if location.is_empty() {
            return Err(ForecastError::InvalidInput("No location provided".to_string()));
        }
        let url = format!("{}/direct", self.geo_url);
        let body = self
            .get(&url, &[("q", location.to_string()), ("limit", "1".to_string())])
            .await?;
        let matches: Vec<GeocodeMatch> = serde_json::from_str(&body)?;
        let first = matches
            .first()
            .ok_or_else(|| ForecastError::LocationNotFound(location.to_string()))?;
        info!("Geocoded {} to ({:.4}, {:.4})", location, first.lat, first.lon);
        Ok(Coordinates {
            lat: first.lat,
            lon: first.lon,
        })
    }

    /// Fetch the metric 3-hour forecast for a location.
    pub async fn forecast(&self, coordinates: &Coordinates) -> Result<ForecastFeed> {
        let url = format!("{}/forecast", self.data_url);
        let body = self
            .get(
                &url,
                &[
                    ("lat", coordinates.lat.to_string()),
                    ("lon", coordinates.lon.to_string()),
                    ("units", "metric".to_string()),
                ],
            )
            .await?;
        ForecastFeed::from_json(&body)
    }

    async fn get(&self, url: &str, query: &[(&str, String)]) -> Result<String> {
        let response = self
            .client
            .get(url)
            .query(query)
            .query(&[("appid", self.api_key.as_str())])
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        if status != StatusCode::OK {
            warn!("Bad response status from {}: {}", url, status);
            return Err(ForecastError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }
}
