//! Application state.

use std::sync::Arc;

use tokio::sync::broadcast;
use veda_rewards_core::UserActivity;
use veda_rewards_store::RocksStore;

use crate::config::{ServiceConfig, DEFAULT_EMAIL_API_URL};
use crate::email::EmailClient;

/// Capacity of the live activity feed channel. Slow subscribers that
/// fall more than this many entries behind skip ahead.
const FEED_CHANNEL_CAPACITY: usize = 256;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The storage backend.
    pub store: Arc<RocksStore>,

    /// Service configuration.
    pub config: ServiceConfig,

    /// E-mail client for consultation confirmations (optional).
    pub email: Option<Arc<EmailClient>>,

    /// Broadcast channel feeding live activity subscribers.
    pub feed: broadcast::Sender<UserActivity>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(store: Arc<RocksStore>, config: ServiceConfig) -> Self {
        // Create the e-mail client if configured
        let email = config.email_api_key.as_ref().and_then(|key| {
            let api_url = config
                .email_api_url
                .clone()
                .unwrap_or_else(|| DEFAULT_EMAIL_API_URL.into());
            match EmailClient::new(&api_url, key, &config.email_from) {
                Ok(client) => {
                    tracing::info!(email_url = %api_url, "E-mail integration enabled");
                    Some(Arc::new(client))
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to create e-mail client");
                    None
                }
            }
        });

        if email.is_none() {
            tracing::warn!("E-mail not configured - consultation confirmations will not be sent");
        }

        let (feed, _) = broadcast::channel(FEED_CHANNEL_CAPACITY);

        Self {
            store,
            config,
            email,
            feed,
        }
    }

    /// Check if the e-mail integration is configured.
    #[must_use]
    pub fn has_email(&self) -> bool {
        self.email.is_some()
    }

    /// Publish ledger entries to live feed subscribers.
    ///
    /// Delivery is best-effort: a send error only means nobody is
    /// subscribed right now, and the durable ledger remains the source
    /// of truth either way.
    pub fn publish_feed(&self, entries: &[UserActivity]) {
        for entry in entries {
            let _ = self.feed.send(entry.clone());
        }
    }
}
