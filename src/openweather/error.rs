//! OpenWeather client error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OpenWeatherError {
    #[error("OpenWeather API key is not configured")]
    MissingApiKey,
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Malformed response: {0}")]
    Malformed(String),
}
