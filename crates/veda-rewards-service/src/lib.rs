//! HTTP API service for the Veda rewards platform.
//!
//! Exposes user stats, daily claims, the activity feed, and achievements
//! over REST, plus a server-side consultation e-mail relay. Routes are
//! grouped under `/v1` and authenticated with bearer JWTs; sibling
//! services report activity through `/v1/system` with an API key.

#![warn(missing_docs)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::unused_async)]

pub mod auth;
pub mod config;
pub mod email;
pub mod error;
pub mod feed;
pub mod handlers;
pub mod routes;
pub mod state;

pub use config::ServiceConfig;
pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
