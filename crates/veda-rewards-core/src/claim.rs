//! Daily claim ledger entries.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::UserId;
use crate::streak;

/// One settled daily reward claim.
///
/// A user can hold at most one claim per calendar date; the store keys
/// the ledger by `(user_id, claim_date)` and rejects duplicates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyClaim {
    /// The user who claimed.
    pub user_id: UserId,
    /// The UTC calendar date the claim settles.
    pub claim_date: NaiveDate,
    /// Points credited by this claim, bonus included.
    pub points_claimed: i64,
    /// Streak length this claim was awarded at.
    pub streak_days: u32,
    /// Display multiplier matching `streak_days`. Points are computed
    /// from integer tenths, never from this field.
    pub bonus_multiplier: f64,
    /// When the claim settled.
    pub claimed_at: DateTime<Utc>,
}

impl DailyClaim {
    /// Builds the claim awarded for `claim_date` at the given streak
    /// length, with points and multiplier derived from the streak
    /// tables.
    #[must_use]
    pub fn award(user_id: UserId, claim_date: NaiveDate, streak_days: u32) -> Self {
        Self {
            user_id,
            claim_date,
            points_claimed: streak::claim_points(streak_days),
            streak_days,
            bonus_multiplier: streak::bonus_multiplier(streak_days),
            claimed_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn first_day_award() {
        let claim = DailyClaim::award(UserId::generate(), date(2025, 6, 10), 1);
        assert_eq!(claim.points_claimed, 50);
        assert_eq!(claim.streak_days, 1);
        assert!((claim.bonus_multiplier - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn day_seven_award() {
        let claim = DailyClaim::award(UserId::generate(), date(2025, 6, 16), 7);
        assert_eq!(claim.points_claimed, 80);
        assert!((claim.bonus_multiplier - 1.6).abs() < f64::EPSILON);
    }

    #[test]
    fn capped_award() {
        let claim = DailyClaim::award(UserId::generate(), date(2025, 7, 1), 30);
        assert_eq!(claim.points_claimed, 150);
        assert!((claim.bonus_multiplier - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn claim_serde_roundtrip() {
        let claim = DailyClaim::award(UserId::generate(), date(2025, 6, 10), 4);
        let json = serde_json::to_string(&claim).unwrap();
        let back: DailyClaim = serde_json::from_str(&json).unwrap();
        assert_eq!(back.user_id, claim.user_id);
        assert_eq!(back.claim_date, claim.claim_date);
        assert_eq!(back.points_claimed, claim.points_claimed);
    }
}
