//! OpenWeather API client.
//!
//! Two endpoints are used:
//! - Direct geocoding (`/geo/1.0/direct`) to resolve a city name to coordinates
//! - Current weather (`/data/2.5/weather`) for conditions at those coordinates

mod client;
mod error;
mod types;

pub use client::OpenWeatherClient;
pub use error::OpenWeatherError;
pub use types::{CurrentConditions, GeoLocation};
