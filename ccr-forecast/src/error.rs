/// Error types for the forecast and crop rule library
use thiserror::Error;

/// Main error type for forecast ingestion and crop risk operations
#[derive(Error, Debug)]
pub enum ForecastError {
    /// A forecast sample is missing a required field or carries an unusable value
    #[error("Malformed forecast sample at index {index}: field `{field}`")]
    MalformedSample { index: usize, field: String },

    /// No crop rule is registered under this name
    #[error("Unknown crop: {0}")]
    UnknownCrop(String),

    /// The feed body is not a forecast payload at all
    #[error("Invalid forecast feed: {0}")]
    InvalidFeed(String),

    /// Failed to parse JSON
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to parse CSV data
    #[error("Failed to parse CSV: {0}")]
    CsvParse(#[from] csv::Error),

    /// A crop rule table is inconsistent
    #[error("Invalid crop table: {0}")]
    InvalidCropTable(String),

    /// Geocoding returned no match
    #[error("Location not found: {0}")]
    LocationNotFound(String),

    /// Caller supplied an unusable argument
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Upstream answered with a non-success status
    #[error("Upstream returned {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    /// HTTP request failed
    #[cfg(feature = "api")]
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),
}

impl ForecastError {
    pub fn malformed(index: usize, field: &str) -> Self {
        ForecastError::MalformedSample {
            index,
            field: field.to_string(),
        }
    }
}

/// Type alias for Results using ForecastError
pub type Result<T> = std::result::Result<T, ForecastError>;
