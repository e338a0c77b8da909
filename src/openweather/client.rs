//! HTTP client for the OpenWeather geocoding and current-weather endpoints.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::types::WeatherResponse;
use super::{CurrentConditions, GeoLocation, OpenWeatherError};
use crate::config::{Settings, Units};

const GEOCODE_PATH: &str = "/geo/1.0/direct";
const WEATHER_PATH: &str = "/data/2.5/weather";

/// Thin client over the two OpenWeather endpoints the backend needs.
#[derive(Clone)]
pub struct OpenWeatherClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    units: Units,
}

impl OpenWeatherClient {
    pub fn new(settings: &Settings) -> Result<Self, OpenWeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout))
            .user_agent(settings.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone().filter(|k| !k.is_empty()),
            units: settings.units,
        })
    }

    fn api_key(&self) -> Result<&str, OpenWeatherError> {
        self.api_key
            .as_deref()
            .ok_or(OpenWeatherError::MissingApiKey)
    }

    /// Resolve a city name to its best geocoding match.
    ///
    /// Returns `Ok(None)` when the provider knows no such place.
    pub async fn geocode(&self, city: &str) -> Result<Option<GeoLocation>, OpenWeatherError> {
        let appid = self.api_key()?;
        debug!("Geocoding city: {}", city);

        let matches: Vec<GeoLocation> = self
            .get_json(
                GEOCODE_PATH,
                &[("q", city), ("limit", "1"), ("appid", appid)],
            )
            .await?;

        Ok(matches.into_iter().next())
    }

    /// Fetch current conditions at a coordinate.
    pub async fn current_weather(
        &self,
        lat: f64,
        lon: f64,
    ) -> Result<CurrentConditions, OpenWeatherError> {
        let appid = self.api_key()?;
        debug!("Fetching current weather at {}, {}", lat, lon);

        let lat = lat.to_string();
        let lon = lon.to_string();
        let raw: WeatherResponse = self
            .get_json(
                WEATHER_PATH,
                &[
                    ("lat", lat.as_str()),
                    ("lon", lon.as_str()),
                    ("appid", appid),
                    ("units", self.units.as_str()),
                ],
            )
            .await?;

        CurrentConditions::try_from(raw)
    }

    /// GET an endpoint and decode its JSON body.
    ///
    /// Transport failures, error statuses and non-JSON bodies surface as
    /// `Http`; JSON that lacks the expected fields surfaces as `Malformed`.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, OpenWeatherError> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await?
            .error_for_status()?;

        let value: serde_json::Value = response.json().await?;
        serde_json::from_value(value).map_err(|e| OpenWeatherError::Malformed(e.to_string()))
    }
}

impl std::fmt::Debug for OpenWeatherClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherClient")
            .field("base_url", &self.base_url)
            .field("units", &self.units)
            .finish_non_exhaustive()
    }
}
