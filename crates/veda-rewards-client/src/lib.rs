//! Veda Rewards Client SDK.
//!
//! This crate provides a client library for services to interact with the
//! veda-rewards API.
//!
//! # Example
//!
//! ```no_run
//! use veda_rewards_client::{ClientOptions, RewardsClient, SystemActivityRequest};
//! use veda_rewards_core::ActivityData;
//!
//! # async fn example() -> Result<(), veda_rewards_client::ClientError> {
//! let client = RewardsClient::with_options(
//!     "http://veda-rewards.wellness-system.svc:8080",
//!     "your-service-api-key",
//!     ClientOptions::with_service_name("prakriti-analyzer"),
//! )?;
//!
//! // Credit a user for a completed analysis
//! let response = client.report_activity(SystemActivityRequest {
//!     user_id: "user-uuid".to_string(),
//!     data: ActivityData::HealthAnalysis {
//!         summary: Some("Vata-Pitta constitution".to_string()),
//!     },
//!     points: None,
//!     completed_at: None,
//! }).await?;
//!
//! println!("New total: {} points", response.stats.total_points);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod client;
mod error;
mod types;

pub use client::{ClientOptions, RewardsClient};
pub use error::ClientError;
pub use types::*;
