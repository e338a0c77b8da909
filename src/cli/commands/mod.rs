//! CLI commands implementation.
//!
//! This module contains the CLI parser and dispatches to command-specific modules.

mod ask;
mod extract;
mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{load_settings, LoadOptions, Units};

#[derive(Debug, Parser)]
#[command(name = "weather-voice")]
#[command(about = "Voice-command weather backend over the OpenWeather API")]
#[command(version)]
pub struct Cli {
    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Address to bind (port, host, or host:port)
        #[arg(short, long, default_value = "0.0.0.0:8000", env = "WEATHER_BIND")]
        bind: String,
    },

    /// Answer a single command and print the JSON payload
    Ask {
        /// The command, e.g. "what's the weather in Paris?"
        #[arg(required = true, num_args = 1..)]
        words: Vec<String>,
        /// Override the configured units
        #[arg(short, long, value_enum)]
        units: Option<Units>,
    },

    /// Show which city a command resolves to (no network access)
    Extract {
        /// The command to parse
        #[arg(required = true, num_args = 1..)]
        words: Vec<String>,
    },
}

/// Run the CLI.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let options = LoadOptions {
        config_path: cli.config,
    };

    match cli.command {
        // Extraction is offline and needs no settings
        Commands::Extract { words } => extract::cmd_extract(&words.join(" ")),
        Commands::Serve { bind } => {
            let settings = load_settings(options).await?;
            serve::cmd_serve(&settings, &bind).await
        }
        Commands::Ask { words, units } => {
            let mut settings = load_settings(options).await?;
            if let Some(units) = units {
                settings.units = units;
            }
            ask::cmd_ask(&settings, &words.join(" ")).await
        }
    }
}
