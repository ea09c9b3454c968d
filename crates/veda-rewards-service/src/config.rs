//! Service configuration.

use serde::Deserialize;
use std::path::Path;

/// Default e-mail provider API URL.
pub const DEFAULT_EMAIL_API_URL: &str = "https://api.resend.com";

/// Default sender address for consultation confirmations.
pub const DEFAULT_EMAIL_FROM: &str = "AyurGen <consultation@resend.dev>";

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Address to listen on (default: "0.0.0.0:8080").
    pub listen_addr: String,

    /// Path to `RocksDB` data directory (default: "/data/veda-rewards").
    pub data_dir: String,

    /// JWT validation base URL (default: `<https://id.vedawellness.app>`).
    pub auth_base_url: String,

    /// Expected JWT audience (default: "veda-rewards").
    pub auth_audience: String,

    /// Service API key for service-to-service auth.
    pub service_api_key: Option<String>,

    /// E-mail provider API URL (optional, defaults to Resend).
    pub email_api_url: Option<String>,

    /// E-mail provider API key (optional; e-mail sending is disabled
    /// when unset).
    pub email_api_key: Option<String>,

    /// Sender address for outgoing consultation e-mails.
    pub email_from: String,

    /// CORS allowed origins.
    pub cors_origins: Vec<String>,

    /// Maximum request body size in bytes.
    pub max_body_bytes: usize,

    /// Request timeout in seconds.
    pub request_timeout_seconds: u64,
}

/// E-mail provider secrets file structure.
#[derive(Debug, Deserialize)]
struct EmailSecrets {
    #[serde(default)]
    api_url: Option<String>,
    api_key: String,
    #[serde(default)]
    from_address: Option<String>,
}

impl ServiceConfig {
    /// Load configuration from environment variables and secrets files.
    #[must_use]
    pub fn from_env() -> Self {
        // Try to load e-mail secrets from file first, then fall back to env vars
        let (email_api_url, email_api_key, email_from) = load_email_secrets();

        Self {
            listen_addr: std::env::var("LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".into()),
            data_dir: std::env::var("DATA_DIR").unwrap_or_else(|_| "/data/veda-rewards".into()),
            auth_base_url: std::env::var("AUTH_BASE_URL")
                .unwrap_or_else(|_| "https://id.vedawellness.app".into()),
            auth_audience: std::env::var("AUTH_AUDIENCE").unwrap_or_else(|_| "veda-rewards".into()),
            service_api_key: std::env::var("SERVICE_API_KEY").ok(),
            email_api_url,
            email_api_key,
            email_from: email_from.unwrap_or_else(|| DEFAULT_EMAIL_FROM.into()),
            cors_origins: std::env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| "*".into())
                .split(',')
                .map(|s| s.trim().to_string())
                .collect(),
            max_body_bytes: std::env::var("MAX_BODY_BYTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1024 * 1024), // 1MB
            request_timeout_seconds: std::env::var("REQUEST_TIMEOUT_SECONDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
        }
    }
}

/// Load e-mail provider secrets from file or environment.
fn load_email_secrets() -> (Option<String>, Option<String>, Option<String>) {
    // Try multiple paths for the secrets file
    let secret_paths = [
        ".secrets/email.json",
        "veda-rewards/.secrets/email.json",
        "veda-rewards/service/.secrets/email.json",
        "../.secrets/email.json",
    ];

    for path in &secret_paths {
        if let Ok(secrets) = load_secrets_file::<EmailSecrets>(path) {
            tracing::info!(path = %path, "Loaded e-mail secrets from file");
            return (
                secrets.api_url,
                Some(secrets.api_key),
                secrets.from_address,
            );
        }
    }

    // Fall back to environment variables
    tracing::debug!("E-mail secrets file not found, using environment variables");
    (
        std::env::var("EMAIL_API_URL").ok(),
        std::env::var("EMAIL_API_KEY").ok(),
        std::env::var("EMAIL_FROM").ok(),
    )
}

/// Load secrets from a JSON file.
fn load_secrets_file<T: serde::de::DeserializeOwned>(path: &str) -> Result<T, std::io::Error> {
    let path = Path::new(path);
    if !path.exists() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Secrets file not found",
        ));
    }
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".into(),
            data_dir: "/data/veda-rewards".into(),
            auth_base_url: "https://id.vedawellness.app".into(),
            auth_audience: "veda-rewards".into(),
            service_api_key: None,
            email_api_url: None,
            email_api_key: None,
            email_from: DEFAULT_EMAIL_FROM.into(),
            cors_origins: vec!["*".into()],
            max_body_bytes: 1024 * 1024,
            request_timeout_seconds: 30,
        }
    }
}
