//! Activity log entries and their payloads.
//!
//! Every reward event in the system is journaled as a [`UserActivity`]:
//! wellness activities the user logs directly, analyses reported by
//! backend services, and system entries (claims, level-ups, unlocks)
//! written by the store itself. The journal doubles as the live feed,
//! ordered by [`ActivityId`](crate::ids::ActivityId).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::achievement::{Achievement, AchievementKind};
use crate::claim::DailyClaim;
use crate::error::{Result, RewardsError};
use crate::ids::{ActivityId, UserId};

/// Largest water intake accepted per entry, in millilitres.
pub const MAX_WATER_AMOUNT_ML: u32 = 10_000;

/// Longest meditation or exercise session accepted, in minutes.
pub const MAX_SESSION_MINUTES: u32 = 1_440;

/// Largest symptom count accepted per symptom check.
pub const MAX_SYMPTOM_COUNT: u32 = 100;

/// Longest free-text label (meditation style, exercise kind, image
/// kind) accepted, in characters.
pub const MAX_LABEL_CHARS: usize = 120;

/// Longest analysis summary accepted, in characters.
pub const MAX_SUMMARY_CHARS: usize = 2_000;

/// Largest per-activity point override accepted from callers.
pub const MAX_POINTS_PER_ACTIVITY: i64 = 1_000;

/// The kind of an activity log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    /// Water intake logged by the user.
    WaterIntake,
    /// A meditation session.
    Meditation,
    /// An exercise session.
    Exercise,
    /// The daily wellness check-in form.
    DailyCheckin,
    /// A completed prakriti/health analysis.
    HealthAnalysis,
    /// A completed medical image analysis.
    MedicalAnalysis,
    /// A symptom checker session.
    SymptomCheck,
    /// System entry: a settled daily claim.
    DailyClaim,
    /// System entry: the user reached a new level.
    LevelUp,
    /// System entry: an achievement was unlocked.
    AchievementUnlocked,
}

impl ActivityKind {
    /// Stable snake_case name, matching the serde representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WaterIntake => "water_intake",
            Self::Meditation => "meditation",
            Self::Exercise => "exercise",
            Self::DailyCheckin => "daily_checkin",
            Self::HealthAnalysis => "health_analysis",
            Self::MedicalAnalysis => "medical_analysis",
            Self::SymptomCheck => "symptom_check",
            Self::DailyClaim => "daily_claim",
            Self::LevelUp => "level_up",
            Self::AchievementUnlocked => "achievement_unlocked",
        }
    }

    /// Whether this kind is written by the store itself. System kinds
    /// are rejected on every public logging surface.
    #[must_use]
    pub fn is_system(&self) -> bool {
        matches!(
            self,
            Self::DailyClaim | Self::LevelUp | Self::AchievementUnlocked
        )
    }

    /// Whether this kind counts toward the analysis total used by
    /// achievement conditions.
    #[must_use]
    pub fn counts_as_analysis(&self) -> bool {
        matches!(self, Self::HealthAnalysis | Self::MedicalAnalysis)
    }

    /// Points credited when the caller supplies no override.
    #[must_use]
    pub fn default_points(&self) -> i64 {
        match self {
            Self::WaterIntake => 5,
            Self::Meditation => 15,
            Self::Exercise => 10,
            Self::DailyCheckin => 20,
            Self::HealthAnalysis | Self::MedicalAnalysis | Self::SymptomCheck => 10,
            Self::DailyClaim | Self::LevelUp | Self::AchievementUnlocked => 0,
        }
    }
}

/// Typed payload of an activity entry, tagged by kind on the wire:
/// `{"type": "water_intake", "amount_ml": 250}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActivityData {
    /// Water intake in millilitres.
    WaterIntake {
        /// Amount drunk, in millilitres.
        amount_ml: u32,
    },
    /// A meditation session.
    Meditation {
        /// Session length in minutes.
        duration_min: u32,
        /// Optional style label, e.g. "pranayama".
        #[serde(skip_serializing_if = "Option::is_none")]
        style: Option<String>,
    },
    /// An exercise session.
    Exercise {
        /// Session length in minutes.
        duration_min: u32,
        /// Optional kind label, e.g. "yoga".
        #[serde(skip_serializing_if = "Option::is_none")]
        kind: Option<String>,
    },
    /// The daily wellness check-in form. Carries no payload.
    DailyCheckin,
    /// A completed prakriti/health analysis.
    HealthAnalysis {
        /// Optional one-line result summary.
        #[serde(skip_serializing_if = "Option::is_none")]
        summary: Option<String>,
    },
    /// A completed medical image analysis.
    MedicalAnalysis {
        /// Optional image kind label, e.g. "skin".
        #[serde(skip_serializing_if = "Option::is_none")]
        image_kind: Option<String>,
    },
    /// A symptom checker session.
    SymptomCheck {
        /// Number of symptoms entered.
        symptom_count: u32,
    },
    /// System entry: a settled daily claim.
    DailyClaim {
        /// Streak length the claim was awarded at.
        streak_days: u32,
        /// Display multiplier for that streak.
        bonus_multiplier: f64,
    },
    /// System entry: the user reached a new level.
    LevelUp {
        /// The level just reached.
        new_level: u32,
    },
    /// System entry: an achievement was unlocked.
    AchievementUnlocked {
        /// Which achievement.
        achievement: AchievementKind,
        /// Points the unlock credited.
        points_reward: i64,
    },
}

impl ActivityData {
    /// The kind this payload belongs to.
    #[must_use]
    pub fn kind(&self) -> ActivityKind {
        match self {
            Self::WaterIntake { .. } => ActivityKind::WaterIntake,
            Self::Meditation { .. } => ActivityKind::Meditation,
            Self::Exercise { .. } => ActivityKind::Exercise,
            Self::DailyCheckin => ActivityKind::DailyCheckin,
            Self::HealthAnalysis { .. } => ActivityKind::HealthAnalysis,
            Self::MedicalAnalysis { .. } => ActivityKind::MedicalAnalysis,
            Self::SymptomCheck { .. } => ActivityKind::SymptomCheck,
            Self::DailyClaim { .. } => ActivityKind::DailyClaim,
            Self::LevelUp { .. } => ActivityKind::LevelUp,
            Self::AchievementUnlocked { .. } => ActivityKind::AchievementUnlocked,
        }
    }

    /// Validates payload ranges and label lengths.
    ///
    /// # Errors
    ///
    /// Returns [`RewardsError::InvalidActivity`] when a field is out of
    /// range.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::WaterIntake { amount_ml } => {
                if *amount_ml == 0 || *amount_ml > MAX_WATER_AMOUNT_ML {
                    return Err(RewardsError::InvalidActivity(format!(
                        "amount_ml must be between 1 and {MAX_WATER_AMOUNT_ML}"
                    )));
                }
            }
            Self::Meditation {
                duration_min,
                style,
            } => {
                validate_duration(*duration_min)?;
                validate_label("style", style.as_deref())?;
            }
            Self::Exercise { duration_min, kind } => {
                validate_duration(*duration_min)?;
                validate_label("kind", kind.as_deref())?;
            }
            Self::DailyCheckin => {}
            Self::HealthAnalysis { summary } => {
                if let Some(summary) = summary {
                    if summary.chars().count() > MAX_SUMMARY_CHARS {
                        return Err(RewardsError::InvalidActivity(format!(
                            "summary must be at most {MAX_SUMMARY_CHARS} characters"
                        )));
                    }
                }
            }
            Self::MedicalAnalysis { image_kind } => {
                validate_label("image_kind", image_kind.as_deref())?;
            }
            Self::SymptomCheck { symptom_count } => {
                if *symptom_count == 0 || *symptom_count > MAX_SYMPTOM_COUNT {
                    return Err(RewardsError::InvalidActivity(format!(
                        "symptom_count must be between 1 and {MAX_SYMPTOM_COUNT}"
                    )));
                }
            }
            Self::DailyClaim { .. } | Self::LevelUp { .. } | Self::AchievementUnlocked { .. } => {}
        }
        Ok(())
    }
}

/// Validates a caller-supplied per-activity points override.
///
/// # Errors
///
/// Returns [`RewardsError::InvalidPoints`] when the value is negative
/// or exceeds [`MAX_POINTS_PER_ACTIVITY`].
pub fn validate_points_override(points: i64) -> Result<()> {
    if !(0..=MAX_POINTS_PER_ACTIVITY).contains(&points) {
        return Err(RewardsError::InvalidPoints(points));
    }
    Ok(())
}

fn validate_duration(duration_min: u32) -> Result<()> {
    if duration_min == 0 || duration_min > MAX_SESSION_MINUTES {
        return Err(RewardsError::InvalidActivity(format!(
            "duration_min must be between 1 and {MAX_SESSION_MINUTES}"
        )));
    }
    Ok(())
}

fn validate_label(field: &str, label: Option<&str>) -> Result<()> {
    if let Some(label) = label {
        if label.chars().count() > MAX_LABEL_CHARS {
            return Err(RewardsError::InvalidActivity(format!(
                "{field} must be at most {MAX_LABEL_CHARS} characters"
            )));
        }
    }
    Ok(())
}

/// One entry in a user's activity journal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserActivity {
    /// Time-ordered entry ID; also the feed cursor.
    pub id: ActivityId,
    /// The user the entry belongs to.
    pub user_id: UserId,
    /// Typed payload.
    pub data: ActivityData,
    /// Points this entry credited.
    pub points_earned: i64,
    /// The user's daily streak when the entry was written.
    pub streak_count: u32,
    /// When the activity happened, as reported by the caller.
    pub completed_at: DateTime<Utc>,
    /// When the entry was journaled.
    pub created_at: DateTime<Utc>,
}

impl UserActivity {
    /// Creates a journal entry with a freshly generated ID.
    #[must_use]
    pub fn new(
        user_id: UserId,
        data: ActivityData,
        points_earned: i64,
        streak_count: u32,
        completed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: ActivityId::generate(),
            user_id,
            data,
            points_earned,
            streak_count,
            completed_at,
            created_at: Utc::now(),
        }
    }

    /// System entry journaling a settled daily claim.
    #[must_use]
    pub fn claim_entry(claim: &DailyClaim) -> Self {
        Self {
            id: ActivityId::generate(),
            user_id: claim.user_id,
            data: ActivityData::DailyClaim {
                streak_days: claim.streak_days,
                bonus_multiplier: claim.bonus_multiplier,
            },
            points_earned: claim.points_claimed,
            streak_count: claim.streak_days,
            completed_at: claim.claimed_at,
            created_at: claim.claimed_at,
        }
    }

    /// System entry journaling a level-up.
    #[must_use]
    pub fn level_up_entry(
        user_id: UserId,
        new_level: u32,
        streak_count: u32,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: ActivityId::generate(),
            user_id,
            data: ActivityData::LevelUp { new_level },
            points_earned: 0,
            streak_count,
            completed_at: at,
            created_at: at,
        }
    }

    /// System entry journaling an achievement unlock.
    #[must_use]
    pub fn achievement_entry(achievement: &Achievement, streak_count: u32) -> Self {
        Self {
            id: ActivityId::generate(),
            user_id: achievement.user_id,
            data: ActivityData::AchievementUnlocked {
                achievement: achievement.kind,
                points_reward: achievement.points_reward,
            },
            points_earned: achievement.points_reward,
            streak_count,
            completed_at: achievement.unlocked_at,
            created_at: achievement.unlocked_at,
        }
    }
}
