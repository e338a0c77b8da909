//! One-shot command answering.

use console::style;

use crate::config::Settings;
use crate::server::{ApiError, CommandResponse};
use crate::services::WeatherService;

/// Answer a single command, printing the same JSON the server would return.
pub async fn cmd_ask(settings: &Settings, command: &str) -> anyhow::Result<()> {
    let service = WeatherService::from_settings(settings)?;

    match service.process_command(command).await {
        Ok(weather) => {
            let payload = serde_json::to_string_pretty(&CommandResponse { weather })?;
            println!("{}", payload);
            Ok(())
        }
        Err(e) => {
            let api_error = ApiError::from(e);
            eprintln!(
                "{} {} ({})",
                style("✗").red(),
                api_error.detail,
                style(api_error.status).dim()
            );
            // Detail is already on stderr; keep the returned error short
            anyhow::bail!("command failed with status {}", api_error.status.as_u16())
        }
    }
}
