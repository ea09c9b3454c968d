//! Error types for veda-rewards storage.

use chrono::NaiveDate;

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur in storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Database operation failed.
    #[error("database error: {0}")]
    Database(String),

    /// Serialization/deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The daily reward for this date was already claimed (idempotency
    /// check failed).
    #[error("daily reward already claimed for {claim_date}")]
    AlreadyClaimed {
        /// The calendar date that was already claimed.
        claim_date: NaiveDate,
    },

    /// The achievement was already unlocked (idempotency check failed).
    #[error("achievement already unlocked: {achievement}")]
    AlreadyUnlocked {
        /// The achievement kind that was already unlocked.
        achievement: String,
    },
}
