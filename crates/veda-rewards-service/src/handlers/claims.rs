//! Daily claim handlers.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use veda_rewards_core::DailyClaim;
use veda_rewards_store::Store;

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::handlers::achievements::AchievementResponse;
use crate::handlers::stats::StatsResponse;
use crate::state::AppState;

/// A settled daily claim.
#[derive(Debug, Serialize)]
pub struct ClaimResponse {
    /// Calendar date the claim covers (UTC), as `YYYY-MM-DD`.
    pub claim_date: String,
    /// Points the claim credited.
    pub points_claimed: i64,
    /// Streak length the claim was awarded at.
    pub streak_days: u32,
    /// Streak bonus multiplier applied.
    pub bonus_multiplier: f64,
    /// When the claim settled.
    pub claimed_at: String,
}

impl From<&DailyClaim> for ClaimResponse {
    fn from(claim: &DailyClaim) -> Self {
        Self {
            claim_date: claim.claim_date.to_string(),
            points_claimed: claim.points_claimed,
            streak_days: claim.streak_days,
            bonus_multiplier: claim.bonus_multiplier,
            claimed_at: claim.claimed_at.to_rfc3339(),
        }
    }
}

/// Claim response with the updated stats.
#[derive(Debug, Serialize)]
pub struct ClaimDailyResponse {
    /// The claim that settled.
    pub claim: ClaimResponse,
    /// Stats after the claim and any unlock rewards were applied.
    pub stats: StatsResponse,
    /// Achievements the claim unlocked, if any.
    pub unlocked: Vec<AchievementResponse>,
}

/// Claim today's daily reward.
///
/// The claim date is always the server's current UTC day; one claim per
/// user per day, enforced atomically in the store. A second attempt
/// returns 409 `already_claimed` and changes nothing.
pub async fn claim_daily(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> Result<Json<ClaimDailyResponse>, ApiError> {
    let today = Utc::now().date_naive();

    let outcome = state.store.claim_daily(&auth.user_id, today)?;

    state.publish_feed(&outcome.feed);

    tracing::info!(
        user_id = %auth.user_id,
        claim_date = %outcome.claim.claim_date,
        points = %outcome.claim.points_claimed,
        streak = %outcome.claim.streak_days,
        "Daily reward claimed"
    );

    Ok(Json(ClaimDailyResponse {
        claim: ClaimResponse::from(&outcome.claim),
        stats: StatsResponse::from(&outcome.stats),
        unlocked: outcome.unlocked.iter().map(AchievementResponse::from).collect(),
    }))
}

/// Today's claim status.
#[derive(Debug, Serialize)]
pub struct TodayClaimResponse {
    /// Whether today's reward has been claimed.
    pub claimed: bool,
    /// The claim, when one exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claim: Option<ClaimResponse>,
}

/// Check whether today's reward has been claimed.
pub async fn get_today_claim(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> Result<Json<TodayClaimResponse>, ApiError> {
    let today = Utc::now().date_naive();

    let claim = state.store.get_claim(&auth.user_id, today)?;

    Ok(Json(TodayClaimResponse {
        claimed: claim.is_some(),
        claim: claim.as_ref().map(ClaimResponse::from),
    }))
}

/// Claim history query parameters.
#[derive(Debug, Deserialize)]
pub struct ListClaimsQuery {
    /// Maximum number of claims to return (default: 30).
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    30
}

/// Claim history response.
#[derive(Debug, Serialize)]
pub struct ListClaimsResponse {
    /// Claims, newest first.
    pub claims: Vec<ClaimResponse>,
    /// Whether there are more claims.
    pub has_more: bool,
}

/// List the current user's claim history, newest first.
pub async fn list_claims(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Query(query): Query<ListClaimsQuery>,
) -> Result<Json<ListClaimsResponse>, ApiError> {
    // Fetch one more than requested to determine has_more
    let limit = query.limit.min(100);
    let claims = state.store.list_claims(&auth.user_id, limit + 1)?;

    let has_more = claims.len() > limit;
    let claims: Vec<_> = claims.iter().take(limit).map(ClaimResponse::from).collect();

    Ok(Json(ListClaimsResponse { claims, has_more }))
}
