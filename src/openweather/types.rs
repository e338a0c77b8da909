//! Response types for the OpenWeather endpoints.

use serde::{Deserialize, Serialize};

use super::OpenWeatherError;

/// A geocoding match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    /// Canonical city name as spelled by the provider.
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

/// Current conditions at a coordinate, in the configured units.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentConditions {
    pub temperature: f64,
    pub description: String,
    pub humidity: u32,
    pub wind_speed: f64,
}

/// Raw `/data/2.5/weather` payload; only the fields we read.
#[derive(Debug, Deserialize)]
pub(super) struct WeatherResponse {
    pub main: MainBlock,
    pub weather: Vec<ConditionEntry>,
    pub wind: WindBlock,
}

#[derive(Debug, Deserialize)]
pub(super) struct MainBlock {
    pub temp: f64,
    pub humidity: u32,
}

#[derive(Debug, Deserialize)]
pub(super) struct ConditionEntry {
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct WindBlock {
    pub speed: f64,
}

impl TryFrom<WeatherResponse> for CurrentConditions {
    type Error = OpenWeatherError;

    fn try_from(raw: WeatherResponse) -> Result<Self, Self::Error> {
        let description = raw
            .weather
            .into_iter()
            .next()
            .map(|c| c.description)
            .ok_or_else(|| OpenWeatherError::Malformed("empty `weather` list".to_string()))?;

        Ok(Self {
            temperature: raw.main.temp,
            description,
            humidity: raw.main.humidity,
            wind_speed: raw.wind.speed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conditions_from_full_payload() {
        let raw: WeatherResponse = serde_json::from_value(serde_json::json!({
            "coord": {"lon": 2.35, "lat": 48.85},
            "weather": [
                {"id": 500, "main": "Rain", "description": "light rain", "icon": "10d"},
                {"id": 701, "main": "Mist", "description": "mist", "icon": "50d"}
            ],
            "main": {"temp": 12.4, "feels_like": 11.8, "humidity": 87, "pressure": 1012},
            "wind": {"speed": 4.1, "deg": 230},
            "name": "Paris"
        }))
        .unwrap();

        let conditions = CurrentConditions::try_from(raw).unwrap();
        assert_eq!(conditions.temperature, 12.4);
        assert_eq!(conditions.description, "light rain");
        assert_eq!(conditions.humidity, 87);
        assert_eq!(conditions.wind_speed, 4.1);
    }

    #[test]
    fn test_empty_weather_list_is_malformed() {
        let raw: WeatherResponse = serde_json::from_value(serde_json::json!({
            "weather": [],
            "main": {"temp": 1.0, "humidity": 50},
            "wind": {"speed": 0.0}
        }))
        .unwrap();

        let err = CurrentConditions::try_from(raw).unwrap_err();
        assert!(matches!(err, OpenWeatherError::Malformed(_)));
    }

    #[test]
    fn test_geo_location_optional_fields() {
        let loc: GeoLocation = serde_json::from_value(serde_json::json!({
            "name": "Tokyo",
            "lat": 35.68,
            "lon": 139.76
        }))
        .unwrap();
        assert_eq!(loc.name, "Tokyo");
        assert!(loc.country.is_none());
        assert!(loc.state.is_none());
    }
}
