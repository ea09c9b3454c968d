//! User stats handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use veda_rewards_core::UserStats;
use veda_rewards_store::Store;

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;

/// User stats response.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    /// User ID.
    pub user_id: String,
    /// Lifetime points earned.
    pub total_points: i64,
    /// Current level (500 points per level).
    pub current_level: u32,
    /// Current run of consecutive daily claims.
    pub daily_streak: u32,
    /// Longest streak ever reached.
    pub longest_streak: u32,
    /// Completed analyses (health and medical).
    pub total_analyses: u32,
    /// Points still needed to reach the next level.
    pub points_to_next_level: i64,
    /// When the user last earned points, if ever.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_activity_at: Option<String>,
    /// When the stats record was created.
    pub created_at: String,
}

impl From<&UserStats> for StatsResponse {
    fn from(stats: &UserStats) -> Self {
        Self {
            user_id: stats.user_id.to_string(),
            total_points: stats.total_points,
            current_level: stats.current_level,
            daily_streak: stats.daily_streak,
            longest_streak: stats.longest_streak,
            total_analyses: stats.total_analyses,
            points_to_next_level: stats.points_to_next_level(),
            last_activity_at: stats.last_activity_at.map(|at| at.to_rfc3339()),
            created_at: stats.created_at.to_rfc3339(),
        }
    }
}

/// Get the current user's reward stats.
///
/// A user who has never earned anything gets the zero-state record
/// rather than a 404, matching the first-visit dashboard load.
pub async fn get_stats(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> Result<Json<StatsResponse>, ApiError> {
    let stats = state.store.ensure_stats(&auth.user_id)?;

    Ok(Json(StatsResponse::from(&stats)))
}
