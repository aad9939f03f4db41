//! Error handling for the Living Earth server
//!
//! Provides consistent JSON error responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::CoreError;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Invalid coordinate: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    #[error("Validation error: {message}")]
    Validation { field: String, message: String },

    // Lookup errors
    #[error("Event not found: {0}")]
    EventNotFound(String),

    #[error("No event selected")]
    SelectionNotFound,

    /// The selection changed while its analysis was in flight
    #[error("Selection {0} is no longer current")]
    StaleSelection(uuid::Uuid),

    // External service errors
    #[error("Event feed fetch failed: {0}")]
    FeedFetchFailed(String),

    #[error("Weather fetch failed: {0}")]
    WeatherFetchFailed(String),

    // Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidCoordinate {
                latitude,
                longitude,
            } => AppError::InvalidCoordinate {
                latitude,
                longitude,
            },
            CoreError::InvalidRadius(radius) => AppError::Validation {
                field: "radius".to_string(),
                message: format!("Radius must be positive, got {}", radius),
            },
            CoreError::MalformedFeed(msg) => AppError::FeedFetchFailed(msg),
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let field = errors
            .field_errors()
            .keys()
            .next()
            .map(|f| f.to_string())
            .unwrap_or_default();
        AppError::Validation {
            field,
            message: errors.to_string(),
        }
    }
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

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::InvalidCoordinate { .. } => (StatusCode::BAD_REQUEST, "INVALID_COORDINATE"),
            AppError::Validation { .. } => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::EventNotFound(_) => (StatusCode::NOT_FOUND, "EVENT_NOT_FOUND"),
            AppError::SelectionNotFound => (StatusCode::NOT_FOUND, "SELECTION_NOT_FOUND"),
            AppError::StaleSelection(_) => (StatusCode::CONFLICT, "STALE_SELECTION"),
            AppError::FeedFetchFailed(_) => (StatusCode::BAD_GATEWAY, "FEED_FETCH_FAILED"),
            AppError::WeatherFetchFailed(_) => (StatusCode::BAD_GATEWAY, "WEATHER_FETCH_FAILED"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let field = match &self {
            AppError::Validation { field, .. } => Some(field.clone()),
            AppError::InvalidCoordinate { .. } => Some("coordinates".to_string()),
            _ => None,
        };
        let message = match &self {
            // Don't leak internals to clients
            AppError::Internal(_) => "An internal server error occurred".to_string(),
            other => other.to_string(),
        };

        // Log the error for debugging
        tracing::error!("Error: {:?}", self);

        (
            status,
            Json(ErrorResponse {
                error: ErrorDetail {
                    code: code.to_string(),
                    message,
                    field,
                },
            }),
        )
            .into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_mapping() {
        let err: AppError = CoreError::InvalidCoordinate {
            latitude: 95.0,
            longitude: 0.0,
        }
        .into();
        assert!(matches!(err, AppError::InvalidCoordinate { .. }));

        let err: AppError = CoreError::MalformedFeed("eof".to_string()).into();
        assert!(matches!(err, AppError::FeedFetchFailed(_)));

        let err: AppError = CoreError::InvalidRadius(-1.0).into();
        assert!(matches!(err, AppError::Validation { ref field, .. } if field == "radius"));
    }

    #[tokio::test]
    async fn test_internal_error_hides_details() {
        let err: AppError = CoreError::DegenerateOrientation.into();
        assert!(matches!(err, AppError::Internal(_)));

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"]["code"], "INTERNAL_ERROR");
        assert_eq!(body["error"]["message"], "An internal server error occurred");
    }

    #[test]
    fn test_status_codes() {
        let stale = AppError::StaleSelection(uuid::Uuid::new_v4());
        assert_eq!(stale.into_response().status(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::EventNotFound("x".into()).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::InvalidCoordinate {
                latitude: 100.0,
                longitude: 0.0
            }
            .into_response()
            .status(),
            StatusCode::BAD_REQUEST
        );
    }
}
