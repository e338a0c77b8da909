//! Translation of service errors into HTTP responses.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::openweather::OpenWeatherError;
use crate::services::CommandError;

const UPSTREAM_FAILURE: &str = "Error fetching data from OpenWeather API";

/// An error response carrying a status and a `{"detail": ...}` body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }
}

impl From<CommandError> for ApiError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::UnrecognizedCity => Self::new(StatusCode::BAD_REQUEST, err.to_string()),
            CommandError::CityNotFound => Self::new(StatusCode::NOT_FOUND, err.to_string()),
            CommandError::Upstream(OpenWeatherError::Http(e)) => {
                tracing::error!("OpenWeather request failed: {}", e);
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, UPSTREAM_FAILURE)
            }
            CommandError::Upstream(e) => {
                tracing::error!("{}", e);
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(serde_json::json!({ "detail": self.detail })),
        )
            .into_response()
    }
}
