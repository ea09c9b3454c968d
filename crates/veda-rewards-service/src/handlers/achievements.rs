//! Achievement handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use veda_rewards_core::{Achievement, AchievementKind};
use veda_rewards_store::Store;

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;

/// An unlocked achievement.
#[derive(Debug, Serialize)]
pub struct AchievementResponse {
    /// Achievement kind, e.g. "seven_day_streak".
    pub kind: String,
    /// Display name.
    pub name: String,
    /// Display description.
    pub description: String,
    /// Points the unlock credited.
    pub points_reward: i64,
    /// When it was unlocked.
    pub unlocked_at: String,
}

impl From<&Achievement> for AchievementResponse {
    fn from(achievement: &Achievement) -> Self {
        Self {
            kind: achievement.kind.as_str().to_string(),
            name: achievement.name.clone(),
            description: achievement.description.clone(),
            points_reward: achievement.points_reward,
            unlocked_at: achievement.unlocked_at.to_rfc3339(),
        }
    }
}

/// Unlocked achievements response.
#[derive(Debug, Serialize)]
pub struct ListAchievementsResponse {
    /// Unlocked achievements, newest first.
    pub achievements: Vec<AchievementResponse>,
}

/// List the current user's unlocked achievements, newest first.
pub async fn list_achievements(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> Result<Json<ListAchievementsResponse>, ApiError> {
    let mut unlocked = state.store.list_achievements(&auth.user_id)?;
    unlocked.reverse();

    Ok(Json(ListAchievementsResponse {
        achievements: unlocked.iter().map(AchievementResponse::from).collect(),
    }))
}

/// One catalog entry: an achievement definition plus the user's progress
/// toward it.
#[derive(Debug, Serialize)]
pub struct CatalogEntryResponse {
    /// Achievement kind.
    pub kind: String,
    /// Display name.
    pub name: String,
    /// Display description.
    pub description: String,
    /// Points awarded on unlock.
    pub points_reward: i64,
    /// The metric value required to unlock.
    pub target: i64,
    /// The user's current value for that metric.
    pub current: i64,
    /// Whether the user has unlocked it.
    pub unlocked: bool,
    /// When it was unlocked, if it was.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unlocked_at: Option<String>,
}

/// Achievement catalog response.
#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    /// Every achievement in catalog order, with progress.
    pub achievements: Vec<CatalogEntryResponse>,
}

/// Get the full achievement catalog with the current user's progress.
///
/// Drives the achievements screen: locked entries show progress toward
/// their target, unlocked entries show when they were earned.
pub async fn achievement_catalog(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> Result<Json<CatalogResponse>, ApiError> {
    let stats = state.store.ensure_stats(&auth.user_id)?;
    let unlocked = state.store.list_achievements(&auth.user_id)?;

    let achievements = AchievementKind::all()
        .into_iter()
        .map(|kind| {
            let earned = unlocked.iter().find(|a| a.kind == kind);
            CatalogEntryResponse {
                kind: kind.as_str().to_string(),
                name: kind.name().to_string(),
                description: kind.description().to_string(),
                points_reward: kind.points_reward(),
                target: kind.target(),
                current: kind.current(&stats).min(kind.target()),
                unlocked: earned.is_some(),
                unlocked_at: earned.map(|a| a.unlocked_at.to_rfc3339()),
            }
        })
        .collect();

    Ok(Json(CatalogResponse { achievements }))
}
