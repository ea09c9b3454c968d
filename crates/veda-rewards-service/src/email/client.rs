//! Transactional e-mail API client implementation.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Error type for e-mail operations.
#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider API returned an error.
    #[error("e-mail API error: {status} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message.
        message: String,
    },
}

/// Request body for the provider's send endpoint.
#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: Vec<&'a str>,
    subject: &'a str,
    html: &'a str,
}

/// Response body from the provider's send endpoint.
#[derive(Debug, Deserialize)]
struct SendEmailResponse {
    id: String,
}

/// Error body returned by the provider.
#[derive(Debug, Deserialize)]
struct EmailErrorResponse {
    message: String,
}

/// Transactional e-mail client (Resend-compatible API).
#[derive(Debug, Clone)]
pub struct EmailClient {
    client: Client,
    base_url: String,
    api_key: String,
    from_address: String,
}

impl EmailClient {
    /// Create a new e-mail client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Provider API URL (e.g., `"https://api.resend.com"`)
    /// * `api_key` - Provider API key
    /// * `from_address` - Sender address for all outgoing mail
    pub fn new(base_url: &str, api_key: &str, from_address: &str) -> Result<Self, EmailError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            from_address: from_address.to_string(),
        })
    }

    /// Send an HTML e-mail to a single recipient.
    ///
    /// Returns the provider's message ID on success. Delivery is
    /// one-shot; callers decide whether a failure is worth retrying.
    pub async fn send(&self, to: &str, subject: &str, html: &str) -> Result<String, EmailError> {
        let url = format!("{}/emails", self.base_url);
        let request = SendEmailRequest {
            from: &self.from_address,
            to: vec![to],
            subject,
            html,
        };

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        self.handle_response::<SendEmailResponse>(response)
            .await
            .map(|r| r.id)
    }

    /// Handle API response and convert errors.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, EmailError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response.json().await?);
        }

        // Try to parse error response
        let error_body: Result<EmailErrorResponse, _> = response.json().await;

        match error_body {
            Ok(provider_error) => Err(EmailError::Api {
                status: status.as_u16(),
                message: provider_error.message,
            }),
            Err(_) => Err(EmailError::Api {
                status: status.as_u16(),
                message: format!("HTTP {status}"),
            }),
        }
    }
}
