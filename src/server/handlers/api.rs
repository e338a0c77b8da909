//! API endpoint handlers.

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

use super::super::AppState;
use super::ApiError;
use crate::services::WeatherReport;

/// Body of `POST /process-command`.
#[derive(Debug, Deserialize)]
pub struct CommandRequest {
    pub command: String,
}

/// Successful `POST /process-command` response.
#[derive(Debug, Serialize)]
pub struct CommandResponse {
    pub weather: WeatherReport,
}

/// Root greeting.
pub async fn greet() -> impl IntoResponse {
    Json(serde_json::json!({ "message": "hello world" }))
}

/// Health check endpoint for container orchestration.
pub async fn health() -> impl IntoResponse {
    StatusCode::OK
}

/// Answer a free-text weather command.
pub async fn process_command(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<CommandResponse>, ApiError> {
    let Json(request) = parse_command_body(&headers, &body)?;
    tracing::debug!("Processing command: {:?}", request.command);

    let weather = state.service.process_command(&request.command).await?;
    Ok(Json(CommandResponse { weather }))
}

/// Decode the command body.
///
/// A missing `Content-Type` is read as JSON; any other non-JSON type is
/// rejected.
fn parse_command_body(
    headers: &HeaderMap,
    body: &[u8],
) -> Result<Json<CommandRequest>, ApiError> {
    if let Some(content_type) = headers.get(header::CONTENT_TYPE) {
        if !is_json_content_type(content_type.to_str().unwrap_or_default()) {
            return Err(ApiError::new(
                StatusCode::UNPROCESSABLE_ENTITY,
                "Expected request with `Content-Type: application/json`",
            ));
        }
    }

    Ok(Json::from_bytes(body)?)
}

fn is_json_content_type(value: &str) -> bool {
    let essence = value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_content_types() {
        assert!(is_json_content_type("application/json"));
        assert!(is_json_content_type("Application/JSON; charset=utf-8"));
        assert!(is_json_content_type("application/merge-patch+json"));
        assert!(!is_json_content_type("text/plain"));
        assert!(!is_json_content_type(""));
    }

    #[test]
    fn test_body_without_content_type_is_parsed() {
        let headers = HeaderMap::new();
        let Json(request) =
            parse_command_body(&headers, br#"{"command": "weather in Quito"}"#).unwrap();
        assert_eq!(request.command, "weather in Quito");
    }

    #[test]
    fn test_non_json_content_type_rejected() {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, "text/plain".parse().unwrap());
        let err =
            parse_command_body(&headers, br#"{"command": "weather in Quito"}"#).unwrap_err();
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
    }
}
