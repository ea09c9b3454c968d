//! Activity journal handlers.

use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Query, State};
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::Json;
use chrono::{DateTime, Utc};
use futures::stream::Stream;
use serde::{Deserialize, Serialize};

use veda_rewards_core::{
    validate_points_override, ActivityData, ActivityId, UserActivity, UserId,
};
use veda_rewards_store::Store;

use crate::auth::{AuthUser, ServiceAuth};
use crate::error::ApiError;
use crate::feed;
use crate::handlers::achievements::AchievementResponse;
use crate::handlers::stats::StatsResponse;
use crate::state::AppState;

/// One activity journal entry.
#[derive(Debug, Serialize)]
pub struct ActivityResponse {
    /// Entry ID; doubles as the feed cursor.
    pub id: String,
    /// Entry kind, e.g. "meditation".
    pub kind: String,
    /// Typed payload, tagged by kind.
    pub data: ActivityData,
    /// Points this entry credited.
    pub points_earned: i64,
    /// The user's daily streak when the entry was written.
    pub streak_count: u32,
    /// When the activity happened.
    pub completed_at: String,
    /// When the entry was journaled.
    pub created_at: String,
}

impl From<&UserActivity> for ActivityResponse {
    fn from(entry: &UserActivity) -> Self {
        Self {
            id: entry.id.to_string(),
            kind: entry.data.kind().as_str().to_string(),
            data: entry.data.clone(),
            points_earned: entry.points_earned,
            streak_count: entry.streak_count,
            completed_at: entry.completed_at.to_rfc3339(),
            created_at: entry.created_at.to_rfc3339(),
        }
    }
}

/// Log activity request.
#[derive(Debug, Deserialize)]
pub struct LogActivityRequest {
    /// Typed activity payload, tagged by kind:
    /// `{"type": "meditation", "duration_min": 20}`.
    pub data: ActivityData,
    /// Points override; the kind's default award applies when absent.
    #[serde(default)]
    pub points: Option<i64>,
    /// When the activity happened; defaults to now.
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

/// Log activity response.
#[derive(Debug, Serialize)]
pub struct LogActivityResponse {
    /// The journal entry that was written.
    pub activity: ActivityResponse,
    /// Stats after the point credit and any unlock rewards were applied.
    pub stats: StatsResponse,
    /// Achievements the entry unlocked, if any.
    pub unlocked: Vec<AchievementResponse>,
}

/// Log a wellness activity for the current user.
///
/// System kinds (`daily_claim`, `level_up`, `achievement_unlocked`) are
/// rejected; those entries are written by the store itself.
pub async fn log_activity(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Json(body): Json<LogActivityRequest>,
) -> Result<Json<LogActivityResponse>, ApiError> {
    record(&state, auth.user_id, body.data, body.points, body.completed_at).map(Json)
}

/// Service-reported activity request: a normal log request plus the
/// target user.
#[derive(Debug, Deserialize)]
pub struct SystemActivityRequest {
    /// The user to credit.
    pub user_id: String,
    /// Typed activity payload, tagged by kind.
    pub data: ActivityData,
    /// Points override; the kind's default award applies when absent.
    #[serde(default)]
    pub points: Option<i64>,
    /// When the activity happened; defaults to now.
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

/// Report an activity on behalf of a user.
///
/// Service-authenticated variant used by backend pipelines (analysis
/// workers, symptom checker) that finish work the user never logs
/// directly.
pub async fn report_system_activity(
    State(state): State<Arc<AppState>>,
    auth: ServiceAuth,
    Json(body): Json<SystemActivityRequest>,
) -> Result<Json<LogActivityResponse>, ApiError> {
    let user_id = body
        .user_id
        .parse()
        .map_err(|_| ApiError::BadRequest("Invalid user ID".into()))?;

    tracing::debug!(
        service = %auth.service_name,
        user_id = %user_id,
        kind = %body.data.kind().as_str(),
        "Processing service-reported activity"
    );

    record(&state, user_id, body.data, body.points, body.completed_at).map(Json)
}

/// Validate and journal one activity, fanning out to feed subscribers.
fn record(
    state: &AppState,
    user_id: UserId,
    data: ActivityData,
    points: Option<i64>,
    completed_at: Option<DateTime<Utc>>,
) -> Result<LogActivityResponse, ApiError> {
    if data.kind().is_system() {
        return Err(ApiError::BadRequest(format!(
            "{} entries are written by the service and cannot be logged",
            data.kind().as_str()
        )));
    }

    data.validate()?;

    if let Some(points) = points {
        validate_points_override(points)?;
    }

    let completed_at = completed_at.unwrap_or_else(Utc::now);

    let outcome = state
        .store
        .record_activity(&user_id, data, points, completed_at)?;

    state.publish_feed(&outcome.feed);

    tracing::info!(
        user_id = %user_id,
        kind = %outcome.activity.data.kind().as_str(),
        points = %outcome.activity.points_earned,
        unlocked = %outcome.unlocked.len(),
        "Activity recorded"
    );

    Ok(LogActivityResponse {
        activity: ActivityResponse::from(&outcome.activity),
        stats: StatsResponse::from(&outcome.stats),
        unlocked: outcome.unlocked.iter().map(AchievementResponse::from).collect(),
    })
}

/// Activity listing query parameters.
#[derive(Debug, Deserialize)]
pub struct ListActivitiesQuery {
    /// Maximum number of entries to return (default: 20).
    #[serde(default = "default_limit")]
    pub limit: usize,
    /// Resume cursor: return entries strictly after this entry ID,
    /// oldest first. Without it, the newest entries come first.
    #[serde(default)]
    pub after: Option<String>,
}

fn default_limit() -> usize {
    20
}

/// Activity listing response.
#[derive(Debug, Serialize)]
pub struct ListActivitiesResponse {
    /// Journal entries; newest first, or oldest first in cursor mode.
    pub activities: Vec<ActivityResponse>,
    /// Whether there are more entries.
    pub has_more: bool,
}

/// List the current user's activity journal.
pub async fn list_activities(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Query(query): Query<ListActivitiesQuery>,
) -> Result<Json<ListActivitiesResponse>, ApiError> {
    // Fetch one more than requested to determine has_more
    let limit = query.limit.min(100);

    let entries = match &query.after {
        Some(after) => {
            let cursor: ActivityId = after
                .parse()
                .map_err(|_| ApiError::BadRequest("Invalid after cursor".into()))?;
            state
                .store
                .list_activities_after(&auth.user_id, &cursor, limit + 1)?
        }
        None => state.store.list_activities(&auth.user_id, limit + 1)?,
    };

    let has_more = entries.len() > limit;
    let activities: Vec<_> = entries
        .iter()
        .take(limit)
        .map(ActivityResponse::from)
        .collect();

    Ok(Json(ListActivitiesResponse {
        activities,
        has_more,
    }))
}

/// Stream the current user's activity feed as Server-Sent Events.
///
/// Each event is named after the entry kind and carries the same JSON
/// body as the listing endpoint. Keep-alive pings go out every 15
/// seconds.
pub async fn live_activity_feed(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    tracing::debug!(user_id = %auth.user_id, "Live feed subscriber connected");

    let rx = state.feed.subscribe();

    Sse::new(feed::user_activity_stream(rx, auth.user_id)).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("ping"),
    )
}
