//! Achievement catalog and unlock records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::UserId;
use crate::stats::UserStats;

/// The fixed achievement catalog.
///
/// Each kind carries its display name, point reward and unlock
/// condition. Unlocks are evaluated against [`UserStats`] inside the
/// same transaction that changed them, so a user can never satisfy a
/// condition without the unlock landing atomically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementKind {
    /// Seven consecutive daily claims.
    SevenDayStreak,
    /// Thirty consecutive daily claims.
    ThirtyDayStreak,
    /// Five completed analyses.
    FiveAnalyses,
    /// Twenty-five completed analyses.
    TwentyFiveAnalyses,
    /// One thousand lifetime points.
    ThousandPoints,
    /// Level ten.
    LevelTen,
}

impl AchievementKind {
    /// Every catalog entry, in display order.
    #[must_use]
    pub fn all() -> [Self; 6] {
        [
            Self::SevenDayStreak,
            Self::ThirtyDayStreak,
            Self::FiveAnalyses,
            Self::TwentyFiveAnalyses,
            Self::ThousandPoints,
            Self::LevelTen,
        ]
    }

    /// Stable snake_case name, matching the serde representation. Also
    /// used as the storage key suffix.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SevenDayStreak => "seven_day_streak",
            Self::ThirtyDayStreak => "thirty_day_streak",
            Self::FiveAnalyses => "five_analyses",
            Self::TwentyFiveAnalyses => "twenty_five_analyses",
            Self::ThousandPoints => "thousand_points",
            Self::LevelTen => "level_ten",
        }
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::SevenDayStreak => "Week of Wellness",
            Self::ThirtyDayStreak => "Thirty Day Sadhana",
            Self::FiveAnalyses => "Health Explorer",
            Self::TwentyFiveAnalyses => "Wellness Warrior",
            Self::ThousandPoints => "Point Collector",
            Self::LevelTen => "Ayurveda Adept",
        }
    }

    /// Display description of the unlock condition.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::SevenDayStreak => "Claim your daily reward seven days in a row",
            Self::ThirtyDayStreak => "Keep a daily claim streak alive for thirty days",
            Self::FiveAnalyses => "Complete five health analyses",
            Self::TwentyFiveAnalyses => "Complete twenty-five health analyses",
            Self::ThousandPoints => "Earn 1,000 lifetime wellness points",
            Self::LevelTen => "Reach level ten",
        }
    }

    /// Points credited when this achievement unlocks.
    #[must_use]
    pub fn points_reward(&self) -> i64 {
        match self {
            Self::SevenDayStreak => 100,
            Self::ThirtyDayStreak => 500,
            Self::FiveAnalyses => 150,
            Self::TwentyFiveAnalyses => 400,
            Self::ThousandPoints => 200,
            Self::LevelTen => 1_000,
        }
    }

    /// The stat value the condition compares against [`Self::target`].
    #[must_use]
    pub fn current(&self, stats: &UserStats) -> i64 {
        match self {
            Self::SevenDayStreak | Self::ThirtyDayStreak => i64::from(stats.longest_streak),
            Self::FiveAnalyses | Self::TwentyFiveAnalyses => i64::from(stats.total_analyses),
            Self::ThousandPoints => stats.total_points,
            Self::LevelTen => i64::from(UserStats::level_for_points(stats.total_points)),
        }
    }

    /// The threshold [`Self::current`] must reach to unlock.
    #[must_use]
    pub fn target(&self) -> i64 {
        match self {
            Self::SevenDayStreak => 7,
            Self::ThirtyDayStreak => 30,
            Self::FiveAnalyses => 5,
            Self::TwentyFiveAnalyses => 25,
            Self::ThousandPoints => 1_000,
            Self::LevelTen => 10,
        }
    }

    /// Whether the given stats satisfy this achievement's condition.
    #[must_use]
    pub fn unlocked_by(&self, stats: &UserStats) -> bool {
        self.current(stats) >= self.target()
    }
}

/// An unlocked achievement, recorded once per `(user, kind)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Achievement {
    /// The user who unlocked it.
    pub user_id: UserId,
    /// Which catalog entry.
    pub kind: AchievementKind,
    /// Display name, denormalized from the catalog at unlock time.
    pub name: String,
    /// Display description, denormalized from the catalog.
    pub description: String,
    /// Points the unlock credited.
    pub points_reward: i64,
    /// When the unlock settled.
    pub unlocked_at: DateTime<Utc>,
}

impl Achievement {
    /// Builds the unlock record for a user from the catalog entry.
    #[must_use]
    pub fn unlock(user_id: UserId, kind: AchievementKind) -> Self {
        Self {
            user_id,
            kind,
            name: kind.name().to_string(),
            description: kind.description().to_string(),
            points_reward: kind.points_reward(),
            unlocked_at: Utc::now(),
        }
    }
}
