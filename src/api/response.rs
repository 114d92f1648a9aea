//! Response types for the Pricing Engine API.
//!
//! This module defines the success envelopes and the error response
//! structures for the HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::{ProjectSummary, RateModelSummary};

/// Response for a newly created pricing session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionCreated {
    /// The new session's id.
    pub session_id: Uuid,
}

/// The combined model and project view returned after reads and mutations.
///
/// Callers must treat every field as a read-only projection and re-read it
/// after each mutating call rather than caching it across calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Rate model inputs and derived rates.
    pub model: RateModelSummary,
    /// The full internal project view.
    pub project: ProjectSummary,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates a session not found error response.
    pub fn session_not_found(id: Uuid) -> Self {
        Self::with_details(
            "SESSION_NOT_FOUND",
            format!("Pricing session not found: {}", id),
            "The session id does not exist or has expired",
        )
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Creates a 400 validation error response.
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: ApiError::validation_error(message),
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::SnapshotParse { message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "SNAPSHOT_PARSE_ERROR",
                    "Failed to parse snapshot",
                    message,
                ),
            },
            EngineError::SnapshotMissingVersion => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new(
                    "SNAPSHOT_MISSING_VERSION",
                    "Snapshot is missing the version tag",
                ),
            },
            EngineError::SnapshotSerialize { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "SNAPSHOT_SERIALIZE_ERROR",
                    "Failed to serialize snapshot",
                    message,
                ),
            },
            EngineError::DefaultsNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "DEFAULTS_ERROR",
                    "Defaults configuration error",
                    format!("Defaults file not found: {}", path),
                ),
            },
            EngineError::DefaultsParse { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "DEFAULTS_ERROR",
                    "Defaults configuration error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::SessionNotFound { id } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::session_not_found(id),
            },
            EngineError::InvalidInput { field, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "VALIDATION_ERROR",
                    format!("Invalid input for '{}': {}", field, message),
                    "The request contains invalid values",
                ),
            },
        }
    }
}
