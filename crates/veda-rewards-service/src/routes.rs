//! Router configuration.
//!
//! This module sets up the Axum router with all routes and middleware.

use std::sync::Arc;
use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{achievements, activities, claims, consultations, health, stats};
use crate::state::AppState;

// ============================================================================
// Concurrency Limiting Constants
// ============================================================================

/// Maximum concurrent requests for system reporting endpoints.
/// Backend pipelines report in bursts, so they get a higher limit but
/// are still protected from overload.
const SYSTEM_MAX_CONCURRENT_REQUESTS: usize = 100;

/// Maximum concurrent requests for general API endpoints.
const API_MAX_CONCURRENT_REQUESTS: usize = 50;

/// Create the service router with all routes and middleware.
///
/// # Routes
///
/// ## Public
/// - `GET /health` - Health check
///
/// ## Stats (JWT auth)
/// - `GET /v1/stats` - Get current user's reward stats
///
/// ## Claims (JWT auth)
/// - `POST /v1/claims/daily` - Claim today's daily reward
/// - `GET /v1/claims/today` - Check today's claim status
/// - `GET /v1/claims` - List claim history
///
/// ## Activities (JWT auth)
/// - `POST /v1/activities` - Log a wellness activity
/// - `GET /v1/activities` - List the activity journal
/// - `GET /v1/activities/live` - Live activity feed (SSE)
///
/// ## Achievements (JWT auth)
/// - `GET /v1/achievements` - List unlocked achievements
/// - `GET /v1/achievements/catalog` - Full catalog with progress
///
/// ## Consultations (JWT auth)
/// - `POST /v1/consultations/email` - Send a confirmation e-mail
///
/// ## System (Service API Key auth, rate-limited)
/// - `POST /v1/system/activities` - Report an activity for a user
pub fn create_router(state: AppState) -> Router {
    // Extract config values before moving state
    let cors_origins = state.config.cors_origins.clone();
    let max_body_bytes = state.config.max_body_bytes;
    let request_timeout_seconds = state.config.request_timeout_seconds;

    // Build CORS layer
    let cors = build_cors_layer(&cors_origins);

    let state = Arc::new(state);

    // Create concurrency-limited system routes
    let system_routes = Router::new()
        .route("/activities", post(activities::report_system_activity))
        .layer(ConcurrencyLimitLayer::new(SYSTEM_MAX_CONCURRENT_REQUESTS));

    // Create concurrency-limited API routes
    let api_routes = Router::new()
        // Stats
        .route("/stats", get(stats::get_stats))
        // Claims
        .route("/claims/daily", post(claims::claim_daily))
        .route("/claims/today", get(claims::get_today_claim))
        .route("/claims", get(claims::list_claims))
        // Activities
        .route("/activities", post(activities::log_activity))
        .route("/activities", get(activities::list_activities))
        .route("/activities/live", get(activities::live_activity_feed))
        // Achievements
        .route("/achievements", get(achievements::list_achievements))
        .route(
            "/achievements/catalog",
            get(achievements::achievement_catalog),
        )
        // Consultations
        .route(
            "/consultations/email",
            post(consultations::send_confirmation_email),
        )
        // System routes (with their own concurrency limit)
        .nest("/system", system_routes)
        .layer(ConcurrencyLimitLayer::new(API_MAX_CONCURRENT_REQUESTS));

    Router::new()
        // Health (public, no rate limit)
        .route("/health", get(health::health))
        // API v1 routes (rate limited)
        .nest("/v1", api_routes)
        // Global middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(
            request_timeout_seconds,
        )))
        .with_state(state)
}

/// Build the CORS layer from configured origins.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
