use reqwest::StatusCode;
use thiserror::Error;

/// Reasons a fetch cycle can fail. All of them end up as the same error banner.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The current-conditions endpoint answered with a non-success status.
    #[error("City not found: {city} (status {status})")]
    CityNotFound { city: String, status: StatusCode },

    /// The forecast endpoint answered with a non-success status.
    #[error("Forecast data not available for {city} (status {status})")]
    ForecastUnavailable { city: String, status: StatusCode },

    #[error("Failed to reach weather service: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Malformed weather response: {0}")]
    Malformed(#[from] serde_json::Error),
}
