//! API error types and responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::NaiveDate;
use serde::Serialize;
use veda_rewards_core::RewardsError;
use veda_rewards_store::StoreError;

/// API error type.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Unauthorized - missing or invalid credentials.
    #[error("unauthorized")]
    Unauthorized,

    /// Forbidden - valid credentials but insufficient permissions.
    #[error("forbidden")]
    Forbidden,

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Bad request - invalid input.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Daily reward already claimed for this date.
    #[error("daily reward already claimed for {claim_date}")]
    AlreadyClaimed {
        /// The calendar date that was already claimed.
        claim_date: NaiveDate,
    },

    /// Achievement already unlocked (idempotency).
    #[error("achievement already unlocked: {achievement}")]
    AlreadyUnlocked {
        /// The achievement that was already unlocked.
        achievement: String,
    },

    /// A required integration is not configured on this deployment.
    #[error("not configured: {0}")]
    NotConfigured(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),

    /// External service error.
    #[error("external service error: {0}")]
    ExternalService(String),
}

/// JSON error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match &self {
            Self::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                self.to_string(),
                None,
            ),
            Self::Forbidden => (StatusCode::FORBIDDEN, "forbidden", self.to_string(), None),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone(), None),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone(), None),
            Self::AlreadyClaimed { claim_date } => (
                StatusCode::CONFLICT,
                "already_claimed",
                self.to_string(),
                Some(serde_json::json!({
                    "claim_date": claim_date.to_string()
                })),
            ),
            Self::AlreadyUnlocked { achievement } => (
                StatusCode::CONFLICT,
                "already_unlocked",
                self.to_string(),
                Some(serde_json::json!({
                    "achievement": achievement
                })),
            ),
            Self::NotConfigured(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "not_configured",
                msg.clone(),
                None,
            ),
            Self::Internal(msg) => {
                tracing::error!(error = %msg, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
            Self::ExternalService(msg) => (
                StatusCode::BAD_GATEWAY,
                "external_service_error",
                msg.clone(),
                None,
            ),
        };

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::AlreadyClaimed { claim_date } => Self::AlreadyClaimed { claim_date },
            StoreError::AlreadyUnlocked { achievement } => Self::AlreadyUnlocked { achievement },
            StoreError::Database(msg) | StoreError::Serialization(msg) => Self::Internal(msg),
        }
    }
}

impl From<RewardsError> for ApiError {
    fn from(err: RewardsError) -> Self {
        match err {
            RewardsError::AlreadyClaimed { claim_date } => Self::AlreadyClaimed { claim_date },
            RewardsError::AlreadyUnlocked { achievement } => Self::AlreadyUnlocked { achievement },
            RewardsError::InvalidActivity(msg) => Self::BadRequest(msg),
            RewardsError::InvalidPoints(value) => {
                Self::BadRequest(format!("invalid points value: {value}"))
            }
            RewardsError::InvalidId(err) => Self::BadRequest(err.to_string()),
            RewardsError::ExternalService { service, message } => {
                Self::ExternalService(format!("{service}: {message}"))
            }
            RewardsError::Storage(msg)
            | RewardsError::Serialization(msg)
            | RewardsError::Configuration(msg) => Self::Internal(msg),
        }
    }
}
