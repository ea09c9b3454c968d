//! Request and response types for the veda-rewards client.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use veda_rewards_core::{AchievementKind, ActivityData, ActivityKind, ConsultationId};

/// A user's aggregate reward stats.
#[derive(Debug, Clone, Deserialize)]
pub struct StatsResponse {
    /// The user the stats belong to.
    pub user_id: String,
    /// Lifetime points earned.
    pub total_points: i64,
    /// Current level.
    pub current_level: u32,
    /// Consecutive daily claims, as of the latest claim.
    pub daily_streak: u32,
    /// Longest streak ever held.
    pub longest_streak: u32,
    /// Completed analyses count.
    pub total_analyses: u32,
    /// Points still needed to reach the next level.
    pub points_to_next_level: i64,
    /// When the user last earned points (RFC 3339).
    pub last_activity_at: Option<String>,
    /// When the stats record was created (RFC 3339).
    pub created_at: String,
}

/// One settled daily claim.
#[derive(Debug, Clone, Deserialize)]
pub struct ClaimResponse {
    /// The calendar date the claim covers (YYYY-MM-DD).
    pub claim_date: String,
    /// Points the claim credited, bonus included.
    pub points_claimed: i64,
    /// Streak length the claim was awarded at.
    pub streak_days: u32,
    /// Display multiplier for that streak.
    pub bonus_multiplier: f64,
    /// When the claim settled (RFC 3339).
    pub claimed_at: String,
}

/// Response to a daily claim.
#[derive(Debug, Clone, Deserialize)]
pub struct ClaimDailyResponse {
    /// The claim that settled.
    pub claim: ClaimResponse,
    /// Stats after the credit.
    pub stats: StatsResponse,
    /// Achievements the claim unlocked, if any.
    pub unlocked: Vec<AchievementResponse>,
}

/// Whether today's reward was claimed.
#[derive(Debug, Clone, Deserialize)]
pub struct TodayClaimResponse {
    /// Whether a claim exists for today.
    pub claimed: bool,
    /// The claim, when one exists.
    pub claim: Option<ClaimResponse>,
}

/// Claim history response.
#[derive(Debug, Clone, Deserialize)]
pub struct ListClaimsResponse {
    /// Claims, newest first.
    pub claims: Vec<ClaimResponse>,
    /// Whether there are more claims.
    pub has_more: bool,
}

/// One activity journal entry.
#[derive(Debug, Clone, Deserialize)]
pub struct ActivityResponse {
    /// Entry ID; doubles as the feed cursor.
    pub id: String,
    /// Entry kind, e.g. `meditation`.
    pub kind: ActivityKind,
    /// Typed payload, tagged by kind.
    pub data: ActivityData,
    /// Points this entry credited.
    pub points_earned: i64,
    /// The user's daily streak when the entry was written.
    pub streak_count: u32,
    /// When the activity happened (RFC 3339).
    pub completed_at: String,
    /// When the entry was journaled (RFC 3339).
    pub created_at: String,
}

/// Log activity request for the current user.
#[derive(Debug, Clone, Serialize)]
pub struct LogActivityRequest {
    /// Typed activity payload.
    pub data: ActivityData,
    /// Points override; the kind's default award applies when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<i64>,
    /// When the activity happened; the server uses now when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

/// Service-reported activity request: a log request plus the target user.
#[derive(Debug, Clone, Serialize)]
pub struct SystemActivityRequest {
    /// The user to credit.
    pub user_id: String,
    /// Typed activity payload.
    pub data: ActivityData,
    /// Points override; the kind's default award applies when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<i64>,
    /// When the activity happened; the server uses now when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

/// Response to logging an activity.
#[derive(Debug, Clone, Deserialize)]
pub struct LogActivityResponse {
    /// The journal entry that was written.
    pub activity: ActivityResponse,
    /// Stats after the credit.
    pub stats: StatsResponse,
    /// Achievements the entry unlocked, if any.
    pub unlocked: Vec<AchievementResponse>,
}

/// Activity listing response.
#[derive(Debug, Clone, Deserialize)]
pub struct ListActivitiesResponse {
    /// Journal entries; newest first, or oldest first in cursor mode.
    pub activities: Vec<ActivityResponse>,
    /// Whether there are more entries.
    pub has_more: bool,
}

/// An unlocked achievement.
#[derive(Debug, Clone, Deserialize)]
pub struct AchievementResponse {
    /// Achievement kind.
    pub kind: AchievementKind,
    /// Display name.
    pub name: String,
    /// Display description.
    pub description: String,
    /// Points the unlock credited.
    pub points_reward: i64,
    /// When it was unlocked (RFC 3339).
    pub unlocked_at: String,
}

/// Unlocked achievements response.
#[derive(Debug, Clone, Deserialize)]
pub struct ListAchievementsResponse {
    /// Unlocked achievements, newest first.
    pub achievements: Vec<AchievementResponse>,
}

/// One catalog entry with the user's progress toward it.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogEntryResponse {
    /// Achievement kind.
    pub kind: AchievementKind,
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
    /// When it was unlocked, if it was (RFC 3339).
    pub unlocked_at: Option<String>,
}

/// Achievement catalog response.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogResponse {
    /// Every achievement in catalog order, with progress.
    pub achievements: Vec<CatalogEntryResponse>,
}

/// Consultation mode for the confirmation e-mail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsultationType {
    /// A video call consultation.
    Video,
    /// A chat consultation.
    Chat,
}

/// Consultation confirmation e-mail request.
#[derive(Debug, Clone, Serialize)]
pub struct ConsultationEmailRequest {
    /// The booking this confirmation covers.
    pub consultation_id: ConsultationId,
    /// Patient display name.
    pub patient_name: String,
    /// Recipient address.
    pub patient_email: String,
    /// Doctor display name.
    pub doctor_name: String,
    /// Video call or chat.
    pub consultation_type: ConsultationType,
    /// Scheduled date.
    pub preferred_date: NaiveDate,
    /// Scheduled time slot, e.g. "10:30 AM".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_time: Option<String>,
    /// Meeting link; the server generates one when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_link: Option<String>,
    /// Consultation fee in paise.
    pub total_amount_cents: i64,
}

/// Consultation confirmation e-mail response.
#[derive(Debug, Clone, Deserialize)]
pub struct ConsultationEmailResponse {
    /// Whether the confirmation was sent.
    pub success: bool,
    /// Provider message ID for the sent e-mail.
    pub email_id: String,
    /// The meeting link included in the confirmation.
    pub meeting_link: String,
}

/// API error response.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    /// Error details.
    pub error: ApiErrorBody,
}

/// API error body.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    /// Error code.
    pub code: String,
    /// Error message.
    pub message: String,
    /// Additional details.
    pub details: Option<serde_json::Value>,
}
