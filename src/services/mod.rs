//! Command handling services.

mod command;
mod weather;

pub use command::extract_city;
pub use weather::{CommandError, WeatherReport, WeatherService};
