//! Web server for the voice weather assistant.
//!
//! Exposes:
//! - `GET /` greeting
//! - `GET /health` liveness probe
//! - `POST /process-command` which turns a spoken command into current weather

mod handlers;
mod routes;

pub use handlers::{ApiError, CommandRequest, CommandResponse};
pub use routes::create_router;

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use crate::config::Settings;
use crate::services::WeatherService;

/// Shared state for the web server.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<WeatherService>,
    pub allowed_origins: Arc<[String]>,
}

impl AppState {
    pub fn new(settings: &Settings) -> anyhow::Result<Self> {
        Ok(Self {
            service: Arc::new(WeatherService::from_settings(settings)?),
            allowed_origins: settings.allowed_origins.clone().into(),
        })
    }
}

/// Start the web server.
pub async fn serve(settings: &Settings, host: &str, port: u16) -> anyhow::Result<()> {
    let state = AppState::new(settings)?;
    let app = create_router(state);

    let listener = bind_listener(host, port).await?;
    tracing::info!("Starting server at http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Bind a TCP listener, resolving `host` if it is a name rather than an IP.
pub async fn bind_listener(host: &str, port: u16) -> anyhow::Result<TcpListener> {
    TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind {}:{}", host, port))
}
