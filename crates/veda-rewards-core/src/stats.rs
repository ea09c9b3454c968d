//! Per-user reward statistics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::UserId;

/// Points required to advance one level.
pub const POINTS_PER_LEVEL: i64 = 500;

/// Aggregated reward state for a single user.
///
/// This is the single authoritative record that claims, activities and
/// achievement unlocks all read and update. Every mutation happens
/// inside one store transaction, so the totals here are never partially
/// applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserStats {
    /// The user these stats belong to.
    pub user_id: UserId,
    /// Lifetime points earned. Never decreases.
    pub total_points: i64,
    /// Current level, derived from `total_points`.
    pub current_level: u32,
    /// Length of the current run of consecutive daily claims.
    pub daily_streak: u32,
    /// Longest streak ever reached. Never decreases.
    pub longest_streak: u32,
    /// Count of completed analysis activities (health and medical).
    pub total_analyses: u32,
    /// When the user last earned points or claimed, if ever.
    pub last_activity_at: Option<DateTime<Utc>>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}

impl UserStats {
    /// Creates a fresh zero-state record for a user.
    #[must_use]
    pub fn new(user_id: UserId) -> Self {
        let now = Utc::now();
        Self {
            user_id,
            total_points: 0,
            current_level: 1,
            daily_streak: 0,
            longest_streak: 0,
            total_analyses: 0,
            last_activity_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Level for a lifetime point total: 500 points per level, starting
    /// at level 1.
    #[must_use]
    pub fn level_for_points(total_points: i64) -> u32 {
        u32::try_from(total_points.max(0) / POINTS_PER_LEVEL + 1).unwrap_or(u32::MAX)
    }

    /// Credits points and recomputes the level.
    ///
    /// Negative amounts are ignored; rewards only ever add.
    pub fn add_points(&mut self, points: i64, at: DateTime<Utc>) {
        self.total_points = self.total_points.saturating_add(points.max(0));
        self.current_level = Self::level_for_points(self.total_points);
        self.last_activity_at = Some(at);
        self.updated_at = at;
    }

    /// Records a successful daily claim at the given streak length.
    ///
    /// Updates the streak counters only; the claim's points go through
    /// [`UserStats::add_points`] like every other credit.
    pub fn record_claim(&mut self, streak_days: u32, claimed_at: DateTime<Utc>) {
        self.daily_streak = streak_days;
        self.longest_streak = self.longest_streak.max(streak_days);
        self.last_activity_at = Some(claimed_at);
        self.updated_at = claimed_at;
    }

    /// Counts one completed analysis activity.
    pub fn record_analysis(&mut self) {
        self.total_analyses = self.total_analyses.saturating_add(1);
    }

    /// Points still needed to reach the next level.
    #[must_use]
    pub fn points_to_next_level(&self) -> i64 {
        let next_threshold = i64::from(self.current_level) * POINTS_PER_LEVEL;
        (next_threshold - self.total_points).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_stats() -> UserStats {
        UserStats::new(UserId::generate())
    }

    #[test]
    fn new_stats_start_at_level_one() {
        let stats = new_stats();
        assert_eq!(stats.total_points, 0);
        assert_eq!(stats.current_level, 1);
        assert_eq!(stats.daily_streak, 0);
        assert_eq!(stats.longest_streak, 0);
        assert_eq!(stats.total_analyses, 0);
        assert!(stats.last_activity_at.is_none());
    }

    #[test]
    fn level_thresholds() {
        assert_eq!(UserStats::level_for_points(0), 1);
        assert_eq!(UserStats::level_for_points(499), 1);
        assert_eq!(UserStats::level_for_points(500), 2);
        assert_eq!(UserStats::level_for_points(999), 2);
        assert_eq!(UserStats::level_for_points(1250), 3);
        assert_eq!(UserStats::level_for_points(4500), 10);
    }

    #[test]
    fn negative_totals_clamp_to_level_one() {
        assert_eq!(UserStats::level_for_points(-50), 1);
    }

    #[test]
    fn add_points_recomputes_level() {
        let mut stats = new_stats();
        let now = Utc::now();
        stats.add_points(480, now);
        assert_eq!(stats.total_points, 480);
        assert_eq!(stats.current_level, 1);
        stats.add_points(20, now);
        assert_eq!(stats.total_points, 500);
        assert_eq!(stats.current_level, 2);
        assert_eq!(stats.last_activity_at, Some(now));
    }

    #[test]
    fn add_points_ignores_negative_amounts() {
        let mut stats = new_stats();
        let now = Utc::now();
        stats.add_points(100, now);
        stats.add_points(-40, now);
        assert_eq!(stats.total_points, 100);
    }

    #[test]
    fn record_claim_updates_streaks() {
        let mut stats = new_stats();
        let now = Utc::now();
        stats.record_claim(5, now);
        assert_eq!(stats.daily_streak, 5);
        assert_eq!(stats.longest_streak, 5);
        stats.record_claim(1, now);
        assert_eq!(stats.daily_streak, 1);
        assert_eq!(stats.longest_streak, 5, "longest streak never decreases");
    }

    #[test]
    fn record_analysis_increments_counter() {
        let mut stats = new_stats();
        stats.record_analysis();
        stats.record_analysis();
        assert_eq!(stats.total_analyses, 2);
    }

    #[test]
    fn points_to_next_level_counts_down() {
        let mut stats = new_stats();
        assert_eq!(stats.points_to_next_level(), 500);
        stats.add_points(380, Utc::now());
        assert_eq!(stats.points_to_next_level(), 120);
        stats.add_points(120, Utc::now());
        assert_eq!(stats.current_level, 2);
        assert_eq!(stats.points_to_next_level(), 500);
    }

    #[test]
    fn stats_serde_roundtrip() {
        let mut stats = new_stats();
        stats.add_points(730, Utc::now());
        stats.record_claim(3, Utc::now());
        let json = serde_json::to_string(&stats).unwrap();
        let back: UserStats = serde_json::from_str(&json).unwrap();
        assert_eq!(back.user_id, stats.user_id);
        assert_eq!(back.total_points, 730);
        assert_eq!(back.current_level, 2);
        assert_eq!(back.daily_streak, 3);
    }
}
