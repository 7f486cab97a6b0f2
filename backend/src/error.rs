//! Error handling for the Smart Crop Advisor
//!
//! Provider and geolocation failures stay internal; only `AppError` reaches
//! HTTP clients, as a consistent JSON error body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Message shown to the user for every failed recommendation request
pub const RECOMMENDATION_FAILED_MESSAGE: &str =
    "Failed to get recommendations. Please check your API key or network connection.";

/// Failures of the recommendation provider call
#[derive(Error, Debug, Clone)]
pub enum ProviderError {
    /// The call could not reach or complete against the provider
    #[error("Network failure: {0}")]
    NetworkFailure(String),

    /// The provider answered but the content is not the expected shape
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The provider rejected the credential
    #[error("Authentication failed: {0}")]
    AuthFailure(String),
}

impl ProviderError {
    /// Short tag for structured logs
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderError::NetworkFailure(_) => "network_failure",
            ProviderError::MalformedResponse(_) => "malformed_response",
            ProviderError::AuthFailure(_) => "auth_failure",
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ProviderError::NetworkFailure(format!("Request timed out: {}", e))
        } else if e.is_decode() {
            ProviderError::MalformedResponse(e.to_string())
        } else {
            ProviderError::NetworkFailure(e.to_string())
        }
    }
}

impl From<shared::RecommendationParseError> for ProviderError {
    fn from(e: shared::RecommendationParseError) -> Self {
        ProviderError::MalformedResponse(e.to_string())
    }
}

/// Failures of the geolocation capability. Never surfaced to the user.
#[derive(Error, Debug)]
pub enum LocationError {
    #[error("Geolocation is not available")]
    Unavailable,

    #[error("Geolocation was denied: {0}")]
    Denied(String),

    #[error("Geolocation lookup failed: {0}")]
    LookupFailed(String),
}

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {message}")]
    Validation { field: String, message: String },

    #[error("A recommendation request is already in progress")]
    RequestInFlight,

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = match &self {
            AppError::Validation { field, message } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "VALIDATION_ERROR".to_string(),
                    message: message.clone(),
                    field: Some(field.clone()),
                },
            ),
            AppError::RequestInFlight => (
                StatusCode::CONFLICT,
                ErrorDetail {
                    code: "REQUEST_IN_FLIGHT".to_string(),
                    message: "A recommendation request is already in progress".to_string(),
                    field: None,
                },
            ),
            AppError::Configuration(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "CONFIGURATION_ERROR".to_string(),
                    message: format!("Configuration error: {}", msg),
                    field: None,
                },
            ),
        };

        if status.is_server_error() {
            tracing::error!("Error: {:?}", self);
        } else {
            tracing::debug!("Request rejected: {:?}", self);
        }

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_kinds() {
        assert_eq!(
            ProviderError::NetworkFailure("timeout".into()).kind(),
            "network_failure"
        );
        assert_eq!(
            ProviderError::MalformedResponse("missing score".into()).kind(),
            "malformed_response"
        );
        assert_eq!(ProviderError::AuthFailure("bad key".into()).kind(), "auth_failure");
    }

    #[test]
    fn test_parse_error_maps_to_malformed() {
        let parse_error = shared::parse_recommendations("{}").unwrap_err();
        let error: ProviderError = parse_error.into();
        assert!(matches!(error, ProviderError::MalformedResponse(_)));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::RequestInFlight.into_response().status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::Validation {
                field: "season".into(),
                message: "Unknown season".into(),
            }
            .into_response()
            .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Configuration("missing key".into())
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
