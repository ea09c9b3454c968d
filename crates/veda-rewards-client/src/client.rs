//! Veda Rewards HTTP client implementation.

use reqwest::Client;
use std::time::Duration;

use crate::error::ClientError;
use crate::types::{
    ApiErrorResponse, CatalogResponse, ClaimDailyResponse, ConsultationEmailRequest,
    ConsultationEmailResponse, ListAchievementsResponse, ListActivitiesResponse,
    ListClaimsResponse, LogActivityRequest, LogActivityResponse, StatsResponse,
    SystemActivityRequest, TodayClaimResponse,
};

/// Veda Rewards API client.
///
/// Service-to-service calls authenticate with the API key the client was
/// built with; user-facing calls take the user's JWT per request.
#[derive(Debug, Clone)]
pub struct RewardsClient {
    client: Client,
    base_url: String,
    api_key: String,
    service_name: String,
}

impl RewardsClient {
    /// Create a new veda-rewards client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the veda-rewards service (e.g., `"http://veda-rewards:8080"`)
    /// * `api_key` - Service API key for authentication
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, ClientError> {
        Self::with_options(base_url, api_key, ClientOptions::default())
    }

    /// Create a new veda-rewards client with custom options.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_options(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        options: ClientOptions,
    ) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(options.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            service_name: options.service_name,
        })
    }

    /// Report an activity on behalf of a user.
    ///
    /// Used by backend pipelines (analysis workers, symptom checker) that
    /// finish work the user never logs directly. Authenticates with the
    /// service API key.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn report_activity(
        &self,
        request: SystemActivityRequest,
    ) -> Result<LogActivityResponse, ClientError> {
        let url = format!("{}/v1/system/activities", self.base_url);

        tracing::debug!(
            user_id = %request.user_id,
            kind = %request.data.kind().as_str(),
            "Reporting activity"
        );

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("x-service-name", &self.service_name)
            .json(&request)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Get a user's reward stats.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn get_stats(&self, user_jwt: &str) -> Result<StatsResponse, ClientError> {
        let url = format!("{}/v1/stats", self.base_url);

        let response = self
            .client
            .get(&url)
            .header("authorization", format!("Bearer {user_jwt}"))
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Claim today's daily reward for a user.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::AlreadyClaimed`] when today's reward was
    /// already claimed, or another error if the request fails.
    pub async fn claim_daily(&self, user_jwt: &str) -> Result<ClaimDailyResponse, ClientError> {
        let url = format!("{}/v1/claims/daily", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("authorization", format!("Bearer {user_jwt}"))
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Check whether a user has claimed today's reward.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn today_claim(&self, user_jwt: &str) -> Result<TodayClaimResponse, ClientError> {
        let url = format!("{}/v1/claims/today", self.base_url);

        let response = self
            .client
            .get(&url)
            .header("authorization", format!("Bearer {user_jwt}"))
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// List a user's claim history, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn list_claims(
        &self,
        user_jwt: &str,
        limit: Option<usize>,
    ) -> Result<ListClaimsResponse, ClientError> {
        let mut url = format!("{}/v1/claims", self.base_url);
        if let Some(limit) = limit {
            url.push_str(&format!("?limit={limit}"));
        }

        let response = self
            .client
            .get(&url)
            .header("authorization", format!("Bearer {user_jwt}"))
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Log a wellness activity for a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn log_activity(
        &self,
        user_jwt: &str,
        request: LogActivityRequest,
    ) -> Result<LogActivityResponse, ClientError> {
        let url = format!("{}/v1/activities", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("authorization", format!("Bearer {user_jwt}"))
            .json(&request)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// List a user's activity journal, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn recent_activities(
        &self,
        user_jwt: &str,
        limit: Option<usize>,
    ) -> Result<ListActivitiesResponse, ClientError> {
        let mut url = format!("{}/v1/activities", self.base_url);
        if let Some(limit) = limit {
            url.push_str(&format!("?limit={limit}"));
        }

        let response = self
            .client
            .get(&url)
            .header("authorization", format!("Bearer {user_jwt}"))
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// List a user's activity journal entries strictly after a cursor,
    /// oldest first.
    ///
    /// The cursor is the `id` of a previously seen entry; polling with the
    /// newest seen ID yields exactly the entries that arrived since.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn activities_after(
        &self,
        user_jwt: &str,
        cursor: &str,
        limit: Option<usize>,
    ) -> Result<ListActivitiesResponse, ClientError> {
        let mut url = format!("{}/v1/activities?after={cursor}", self.base_url);
        if let Some(limit) = limit {
            url.push_str(&format!("&limit={limit}"));
        }

        let response = self
            .client
            .get(&url)
            .header("authorization", format!("Bearer {user_jwt}"))
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// List a user's unlocked achievements, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn list_achievements(
        &self,
        user_jwt: &str,
    ) -> Result<ListAchievementsResponse, ClientError> {
        let url = format!("{}/v1/achievements", self.base_url);

        let response = self
            .client
            .get(&url)
            .header("authorization", format!("Bearer {user_jwt}"))
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Get the full achievement catalog with a user's progress.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn achievement_catalog(
        &self,
        user_jwt: &str,
    ) -> Result<CatalogResponse, ClientError> {
        let url = format!("{}/v1/achievements/catalog", self.base_url);

        let response = self
            .client
            .get(&url)
            .header("authorization", format!("Bearer {user_jwt}"))
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Send a consultation confirmation e-mail to a patient.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the server has no e-mail
    /// provider configured, or the provider rejects the message.
    pub async fn send_consultation_email(
        &self,
        user_jwt: &str,
        request: ConsultationEmailRequest,
    ) -> Result<ConsultationEmailResponse, ClientError> {
        let url = format!("{}/v1/consultations/email", self.base_url);

        tracing::debug!(
            consultation_id = %request.consultation_id,
            "Sending consultation confirmation"
        );

        let response = self
            .client
            .post(&url)
            .header("authorization", format!("Bearer {user_jwt}"))
            .json(&request)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Handle API response and convert errors.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response.json().await?);
        }

        // Try to parse error response
        let error_body: Result<ApiErrorResponse, _> = response.json().await;

        match error_body {
            Ok(api_error) => {
                let code = api_error.error.code.as_str();
                let details = api_error.error.details.as_ref();

                // Map specific error codes to typed errors
                match code {
                    "already_claimed" => {
                        let claim_date = details
                            .and_then(|d| d.get("claim_date"))
                            .and_then(serde_json::Value::as_str)
                            .and_then(|s| s.parse().ok())
                            .unwrap_or_default();

                        Err(ClientError::AlreadyClaimed { claim_date })
                    }
                    "already_unlocked" => {
                        let achievement = details
                            .and_then(|d| d.get("achievement"))
                            .and_then(serde_json::Value::as_str)
                            .unwrap_or(api_error.error.message.as_str())
                            .to_string();

                        Err(ClientError::AlreadyUnlocked { achievement })
                    }
                    _ => Err(ClientError::Api {
                        code: code.to_string(),
                        message: api_error.error.message,
                        status: status.as_u16(),
                    }),
                }
            }
            Err(_) => Err(ClientError::Api {
                code: "unknown".to_string(),
                message: format!("HTTP {status}"),
                status: status.as_u16(),
            }),
        }
    }
}

/// Client options for customization.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Request timeout in seconds (default: 30).
    pub timeout_seconds: u64,
    /// Service name to include in service-authenticated requests.
    pub service_name: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            service_name: "unknown".to_string(),
        }
    }
}

impl ClientOptions {
    /// Create options with a service name.
    #[must_use]
    pub fn with_service_name(name: impl Into<String>) -> Self {
        Self {
            service_name: name.into(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use veda_rewards_core::ActivityData;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn client_creation() {
        let client = RewardsClient::new("http://localhost:8080", "test-api-key").unwrap();
        assert_eq!(client.base_url, "http://localhost:8080");
    }

    #[test]
    fn client_trims_trailing_slash() {
        let client = RewardsClient::new("http://localhost:8080/", "test-api-key").unwrap();
        assert_eq!(client.base_url, "http://localhost:8080");
    }

    #[test]
    fn client_options() {
        let options = ClientOptions::with_service_name("prakriti-analyzer");
        let client =
            RewardsClient::with_options("http://localhost:8080", "key", options).unwrap();
        assert_eq!(client.service_name, "prakriti-analyzer");
    }

    #[tokio::test]
    async fn report_activity_attaches_service_headers() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/system/activities"))
            .and(header("x-api-key", "service-key"))
            .and(header("x-service-name", "prakriti-analyzer"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "activity": {
                    "id": "01J1G5M9Z3W8X4V2T6R8Q0N5KD",
                    "kind": "health_analysis",
                    "data": { "type": "health_analysis" },
                    "points_earned": 10,
                    "streak_count": 0,
                    "completed_at": "2025-06-16T08:00:00+00:00",
                    "created_at": "2025-06-16T08:00:00+00:00"
                },
                "stats": {
                    "user_id": "7b0f4f0a-58b5-4a0e-9aef-8c3f6ad1a6b2",
                    "total_points": 10,
                    "current_level": 1,
                    "daily_streak": 0,
                    "longest_streak": 0,
                    "total_analyses": 1,
                    "points_to_next_level": 490,
                    "created_at": "2025-06-16T08:00:00+00:00"
                },
                "unlocked": []
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = RewardsClient::with_options(
            mock_server.uri(),
            "service-key",
            ClientOptions::with_service_name("prakriti-analyzer"),
        )
        .unwrap();

        let response = client
            .report_activity(SystemActivityRequest {
                user_id: "7b0f4f0a-58b5-4a0e-9aef-8c3f6ad1a6b2".to_string(),
                data: ActivityData::HealthAnalysis { summary: None },
                points: None,
                completed_at: None,
            })
            .await
            .unwrap();

        assert_eq!(response.stats.total_points, 10);
        assert_eq!(response.activity.points_earned, 10);
    }

    #[tokio::test]
    async fn claim_conflict_maps_to_typed_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/claims/daily"))
            .respond_with(ResponseTemplate::new(409).set_body_json(json!({
                "error": {
                    "code": "already_claimed",
                    "message": "daily reward already claimed for 2025-06-16",
                    "details": { "claim_date": "2025-06-16" }
                }
            })))
            .mount(&mock_server)
            .await;

        let client = RewardsClient::new(mock_server.uri(), "service-key").unwrap();

        let err = client.claim_daily("user-jwt").await.unwrap_err();
        match err {
            ClientError::AlreadyClaimed { claim_date } => {
                assert_eq!(claim_date.to_string(), "2025-06-16");
            }
            other => panic!("expected AlreadyClaimed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unexpected_errors_keep_code_and_status() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/stats"))
            .respond_with(ResponseTemplate::new(503).set_body_json(json!({
                "error": {
                    "code": "not_configured",
                    "message": "E-mail delivery is not configured on this deployment"
                }
            })))
            .mount(&mock_server)
            .await;

        let client = RewardsClient::new(mock_server.uri(), "service-key").unwrap();

        let err = client.get_stats("user-jwt").await.unwrap_err();
        match err {
            ClientError::Api { code, status, .. } => {
                assert_eq!(code, "not_configured");
                assert_eq!(status, 503);
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }
}
