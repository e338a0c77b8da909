//! Command-to-weather pipeline: extract city, geocode, fetch conditions.

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use super::extract_city;
use crate::config::Settings;
use crate::openweather::{OpenWeatherClient, OpenWeatherError};

/// Normalized weather payload returned to the frontend.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReport {
    pub temperature: f64,
    pub description: String,
    /// Canonical city name from the geocoder.
    pub city: String,
    pub humidity: u32,
    pub wind_speed: f64,
}

/// Reasons a command could not be answered.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Could not understand the city name")]
    UnrecognizedCity,
    #[error("City not found")]
    CityNotFound,
    #[error(transparent)]
    Upstream(#[from] OpenWeatherError),
}

/// Answers weather commands using OpenWeather.
#[derive(Debug, Clone)]
pub struct WeatherService {
    client: OpenWeatherClient,
}

impl WeatherService {
    pub fn new(client: OpenWeatherClient) -> Self {
        Self { client }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, OpenWeatherError> {
        Ok(Self::new(OpenWeatherClient::new(settings)?))
    }

    /// Turn a free-text command into a weather report.
    pub async fn process_command(&self, command: &str) -> Result<WeatherReport, CommandError> {
        let city = extract_city(command).ok_or_else(|| {
            info!("No city recognized in command: {:?}", command);
            CommandError::UnrecognizedCity
        })?;

        let location = self.client.geocode(&city).await?.ok_or_else(|| {
            info!("Geocoder has no match for '{}'", city);
            CommandError::CityNotFound
        })?;

        let conditions = self
            .client
            .current_weather(location.lat, location.lon)
            .await
            .inspect_err(|e| warn!("Weather lookup for '{}' failed: {}", location.name, e))?;

        info!(
            "Weather for {}: {}, {}",
            location.name, conditions.description, conditions.temperature
        );

        Ok(WeatherReport {
            temperature: conditions.temperature,
            description: conditions.description,
            city: location.name,
            humidity: conditions.humidity,
            wind_speed: conditions.wind_speed,
        })
    }
}
