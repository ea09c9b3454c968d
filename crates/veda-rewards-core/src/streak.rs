//! Streak evaluation and claim point arithmetic.
//!
//! Daily claims earn a base number of points scaled by a streak bonus.
//! The bonus is tracked in integer tenths of the multiplier so point
//! awards stay exact; the floating-point multiplier exists only for
//! display.

use chrono::NaiveDate;

/// Base points awarded for a daily claim before the streak bonus.
pub const BASE_CLAIM_POINTS: i64 = 50;

/// Maximum streak bonus, in tenths of the multiplier (3.0x).
pub const MAX_BONUS_TENTHS: i64 = 30;

/// Computes the streak length for a claim made on `today`.
///
/// A claim made the day after `last_claim_date` extends the streak by
/// one; any other gap (or no prior claim) resets it to 1.
#[must_use]
pub fn next_streak(last_claim_date: Option<NaiveDate>, prior_streak: u32, today: NaiveDate) -> u32 {
    match (last_claim_date, today.pred_opt()) {
        (Some(last), Some(yesterday)) if last == yesterday => prior_streak.saturating_add(1),
        _ => 1,
    }
}

/// Streak bonus in tenths of the multiplier: 1.0x on day one, growing
/// by 0.1x per consecutive day, capped at [`MAX_BONUS_TENTHS`].
#[must_use]
pub fn bonus_tenths(streak_days: u32) -> i64 {
    (10 + i64::from(streak_days.saturating_sub(1))).min(MAX_BONUS_TENTHS)
}

/// Display multiplier for a streak (e.g. 1.6 on day seven).
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn bonus_multiplier(streak_days: u32) -> f64 {
    bonus_tenths(streak_days) as f64 / 10.0
}

/// Points awarded for a daily claim at the given streak length.
///
/// Computed entirely in integers: `50 * tenths / 10` is always exact
/// because the base is a multiple of ten.
#[must_use]
pub fn claim_points(streak_days: u32) -> i64 {
    BASE_CLAIM_POINTS * bonus_tenths(streak_days) / 10
}
