//! weather-voice - voice-command weather backend.
//!
//! Turns free-text commands like "what's the weather in Paris?" into current
//! conditions fetched from OpenWeather.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (before anything else)
    let _ = dotenvy::dotenv();

    // Initialize logging based on verbosity
    let default_filter = if weather_voice::cli::is_verbose() {
        "weather_voice=info"
    } else {
        "weather_voice=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    weather_voice::cli::run().await
}
