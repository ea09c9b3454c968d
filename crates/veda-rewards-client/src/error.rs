//! Client error types.

use chrono::NaiveDate;

/// Errors that can occur when using the veda-rewards client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server returned an error response.
    #[error("API error: {code} - {message}")]
    Api {
        /// Error code.
        code: String,
        /// Error message.
        message: String,
        /// HTTP status code.
        status: u16,
    },

    /// The daily reward was already claimed for this date.
    #[error("already claimed for {claim_date}")]
    AlreadyClaimed {
        /// The calendar date that was already claimed.
        claim_date: NaiveDate,
    },

    /// The achievement was already unlocked.
    #[error("already unlocked: {achievement}")]
    AlreadyUnlocked {
        /// The achievement name.
        achievement: String,
    },

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Configuration(String),
}
