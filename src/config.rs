//! Configuration management for weather-voice using the prefer crate.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default OpenWeather API root.
pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

/// Origin of the voice assistant frontend dev server.
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:5173";

/// Name used for config file discovery.
const CONFIG_NAME: &str = "weather-voice";

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file: {0}")]
    Parse(String),
    #[error("Invalid base URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Unknown units '{0}' (expected standard, metric or imperial)")]
    UnknownUnits(String),
}

/// Measurement system passed to the current-conditions endpoint.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    /// Kelvin, m/s
    Standard,
    /// Celsius, m/s
    #[default]
    Metric,
    /// Fahrenheit, mph
    Imperial,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Standard => "standard",
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }
}

impl FromStr for Units {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" => Ok(Units::Standard),
            "metric" => Ok(Units::Metric),
            "imperial" => Ok(Units::Imperial),
            other => Err(ConfigError::UnknownUnits(other.to_string())),
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Runtime settings for the backend.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// OpenWeather API key. Set via OPENWEATHER_API_KEY env var or config.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// OpenWeather API root (geocoding and weather share it).
    pub base_url: String,
    /// Units for current conditions.
    pub units: Units,
    /// Request timeout in seconds.
    pub request_timeout: u64,
    /// User agent for outbound requests.
    pub user_agent: String,
    /// Origins allowed by the CORS layer.
    pub allowed_origins: Vec<String>,
    /// Config file these settings were read from, if any.
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            units: Units::default(),
            request_timeout: 10,
            user_agent: format!("weather-voice/{}", env!("CARGO_PKG_VERSION")),
            allowed_origins: vec![DEFAULT_ALLOWED_ORIGIN.to_string()],
            source_path: None,
        }
    }
}

// Keeps the API key out of logs.
impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("units", &self.units)
            .field("request_timeout", &self.request_timeout)
            .field("user_agent", &self.user_agent)
            .field("allowed_origins", &self.allowed_origins)
            .field("source_path", &self.source_path)
            .finish()
    }
}

impl Settings {
    /// Load settings from a specific file path.
    /// Supports TOML, YAML and JSON based on file extension.
    pub async fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents =
            tokio::fs::read_to_string(path)
                .await
                .map_err(|source| ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

        let mut settings: Settings = match ext {
            "toml" => toml::from_str(&contents)
                .map_err(|e| ConfigError::Parse(format!("TOML: {}", e)))?,
            "yaml" | "yml" => serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::Parse(format!("YAML: {}", e)))?,
            _ => serde_json::from_str(&contents)
                .map_err(|e| ConfigError::Parse(format!("JSON: {}", e)))?,
        };

        settings.source_path = Some(path.to_path_buf());
        Ok(settings)
    }

    /// Auto-discover a config file in the standard locations.
    /// Falls back to defaults when none is found or it cannot be read.
    pub async fn discover() -> Self {
        match prefer::load(CONFIG_NAME).await {
            Ok(pref_config) => {
                if let Some(path) = pref_config.source_path() {
                    match Self::load_from_path(path).await {
                        Ok(settings) => settings,
                        Err(e) => {
                            tracing::warn!("Ignoring config file: {}", e);
                            Self::default()
                        }
                    }
                } else {
                    Self::default()
                }
            }
            Err(_) => Self::default(),
        }
    }

    /// Apply overrides from the process environment.
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable source.
    /// Empty values are treated as unset.
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = get("OPENWEATHER_API_KEY") {
            self.api_key = Some(key.trim().to_string());
        }
        if let Some(url) = get("OPENWEATHER_BASE_URL") {
            tracing::debug!("Using OPENWEATHER_BASE_URL from environment: {}", url);
            self.base_url = url;
        }
        if let Some(units) = get("OPENWEATHER_UNITS") {
            self.units = units.parse()?;
        }
        if let Some(origins) = get("WEATHER_ALLOWED_ORIGINS") {
            self.allowed_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(String::from)
                .collect();
        }

        Ok(self)
    }

    /// Check values that would otherwise only fail on the first request.
    pub fn validate(&self) -> Result<(), ConfigError> {
        url::Url::parse(&self.base_url).map_err(|source| ConfigError::InvalidBaseUrl {
            url: self.base_url.clone(),
            source,
        })?;
        Ok(())
    }

    /// Whether an API key is configured.
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }
}

/// Options controlling where settings are loaded from.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Explicit config file path (overrides auto-discovery).
    pub config_path: Option<PathBuf>,
}

/// Load settings: config file (explicit or discovered), then environment.
pub async fn load_settings(options: LoadOptions) -> Result<Settings, ConfigError> {
    let settings = match options.config_path {
        Some(ref path) => Settings::load_from_path(path).await?,
        None => Settings::discover().await,
    };

    let settings = settings.with_env_overrides()?;
    settings.validate()?;

    if let Some(ref path) = settings.source_path {
        tracing::info!("Loaded config from {}", path.display());
    }
    if settings.has_api_key() {
        tracing::info!("OpenWeather API key loaded");
    } else {
        tracing::warn!(
            "OpenWeather API key not found. Please set the OPENWEATHER_API_KEY environment variable."
        );
    }

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.units, Units::Metric);
        assert_eq!(settings.allowed_origins, vec![DEFAULT_ALLOWED_ORIGIN]);
        assert!(!settings.has_api_key());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_env_overrides() {
        let env = vars(&[
            ("OPENWEATHER_API_KEY", " abc123 "),
            ("OPENWEATHER_BASE_URL", "http://127.0.0.1:9000"),
            ("OPENWEATHER_UNITS", "Imperial"),
            ("WEATHER_ALLOWED_ORIGINS", "http://a.test, http://b.test,"),
        ]);
        let settings = Settings::default()
            .with_overrides_from(|k| env.get(k).cloned())
            .unwrap();

        assert_eq!(settings.api_key.as_deref(), Some("abc123"));
        assert_eq!(settings.base_url, "http://127.0.0.1:9000");
        assert_eq!(settings.units, Units::Imperial);
        assert_eq!(settings.allowed_origins, vec!["http://a.test", "http://b.test"]);
    }

    #[test]
    fn test_empty_env_values_ignored() {
        let env = vars(&[("OPENWEATHER_API_KEY", ""), ("OPENWEATHER_BASE_URL", "  ")]);
        let settings = Settings::default()
            .with_overrides_from(|k| env.get(k).cloned())
            .unwrap();

        assert!(settings.api_key.is_none());
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_unknown_units_rejected() {
        let env = vars(&[("OPENWEATHER_UNITS", "furlongs")]);
        let result = Settings::default().with_overrides_from(|k| env.get(k).cloned());
        assert!(matches!(result, Err(ConfigError::UnknownUnits(u)) if u == "furlongs"));
    }

    #[test]
    fn test_invalid_base_url() {
        let settings = Settings {
            base_url: "not a url".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let settings = Settings {
            api_key: Some("super-secret".to_string()),
            ..Default::default()
        };
        let debug = format!("{:?}", settings);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[tokio::test]
    async fn test_load_toml() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "api_key = \"from-file\"\nunits = \"imperial\"\nrequest_timeout = 3"
        )
        .unwrap();

        let settings = Settings::load_from_path(file.path()).await.unwrap();
        assert_eq!(settings.api_key.as_deref(), Some("from-file"));
        assert_eq!(settings.units, Units::Imperial);
        assert_eq!(settings.request_timeout, 3);
        // Unspecified fields keep their defaults
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.source_path.as_deref(), Some(file.path()));
    }

    #[tokio::test]
    async fn test_load_json() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"allowed_origins": ["https://app.test"]}}"#).unwrap();

        let settings = Settings::load_from_path(file.path()).await.unwrap();
        assert_eq!(settings.allowed_origins, vec!["https://app.test"]);
    }

    #[tokio::test]
    async fn test_load_invalid_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(file, "units = [").unwrap();

        let result = Settings::load_from_path(file.path()).await;
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let result = Settings::load_from_path(Path::new("/nonexistent/weather.toml")).await;
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}
