//! Voice-command weather backend.
//!
//! A free-text command is matched against a small set of phrasings to pull
//! out a city name, which is geocoded and then looked up for current
//! conditions through the OpenWeather API.

pub mod cli;
pub mod config;
pub mod openweather;
pub mod server;
pub mod services;

pub use config::{Settings, Units};
pub use services::{extract_city, CommandError, WeatherReport, WeatherService};
