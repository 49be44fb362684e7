use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::Serialize;
use thiserror::Error;

/// Uniform error body returned by every API handler on failure.
///
/// The shape is part of the public contract: clients only ever see either
/// well-formed chart JSON or this three-field envelope.
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub status: &'static str,
    pub message: String,
    pub timestamp: String,
}

impl ErrorEnvelope {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: "error",
            message: message.into(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{message}")]
    ChartData {
        message: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Database error: {0}")]
    DatabaseError(anyhow::Error),

    #[error("Configuration error: {0}")]
    ConfigError(anyhow::Error),

    #[error("Internal server error: {0}")]
    InternalError(#[from] anyhow::Error),
}

impl AppError {
    /// Wrap a data-source failure with the message the client should see.
    pub fn chart_data(message: impl Into<String>, source: anyhow::Error) -> Self {
        AppError::ChartData {
            message: message.into(),
            source,
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(anyhow::Error::new(err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalError(anyhow::Error::new(err))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Every handler-reachable failure maps to 500 with the envelope;
        // underlying causes are logged at the failure site, never exposed.
        let message = match self {
            AppError::ChartData { message, .. } => message,
            AppError::DatabaseError(_) => "Database error".to_string(),
            AppError::ConfigError(_) => "Configuration error".to_string(),
            AppError::InternalError(_) => "Internal server error".to_string(),
        };

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorEnvelope::new(message)),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_carries_fixed_status_and_rfc3339_timestamp() {
        let envelope = ErrorEnvelope::new("boom");
        assert_eq!(envelope.status, "error");
        assert_eq!(envelope.message, "boom");
        assert!(chrono::DateTime::parse_from_rfc3339(&envelope.timestamp).is_ok());
    }

    #[test]
    fn chart_data_error_displays_client_message_only() {
        let err = AppError::chart_data("Error retrieving chart data", anyhow::anyhow!("pg down"));
        assert_eq!(err.to_string(), "Error retrieving chart data");
    }
}
