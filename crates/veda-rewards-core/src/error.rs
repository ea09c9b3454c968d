//! Error types for veda-rewards.

use chrono::NaiveDate;

use crate::ids::IdError;

/// Result type for veda-rewards operations.
pub type Result<T> = std::result::Result<T, RewardsError>;

/// Errors that can occur in veda-rewards operations.
#[derive(Debug, thiserror::Error)]
pub enum RewardsError {
    /// The daily reward for this date was already claimed.
    #[error("daily reward already claimed for {claim_date}")]
    AlreadyClaimed {
        /// The calendar date that was already claimed.
        claim_date: NaiveDate,
    },

    /// The achievement was already unlocked for this user.
    #[error("achievement already unlocked: {achievement}")]
    AlreadyUnlocked {
        /// The achievement type that was already unlocked.
        achievement: String,
    },

    /// An activity payload failed validation.
    #[error("invalid activity: {0}")]
    InvalidActivity(String),

    /// A points value is outside the allowed range.
    #[error("invalid points value: {0}")]
    InvalidPoints(i64),

    /// External service error (identity provider, email delivery).
    #[error("external service error: {service} - {message}")]
    ExternalService {
        /// The service that failed.
        service: String,
        /// Error message.
        message: String,
    },

    /// Storage error.
    #[error("storage error: {0}")]
    Storage(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Invalid identifier.
    #[error("invalid identifier: {0}")]
    InvalidId(#[from] IdError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Configuration(String),
}
