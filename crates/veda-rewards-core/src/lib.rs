//! Core types and utilities for veda-rewards.
//!
//! This crate provides the foundational types used throughout the veda-rewards
//! platform:
//!
//! - **Identifiers**: `UserId`, `ActivityId`, `ConsultationId`
//! - **Stats**: `UserStats` and the level curve
//! - **Streaks**: the pure daily-streak and bonus-multiplier evaluation
//! - **Claims**: `DailyClaim`, the once-per-day reward ledger entry
//! - **Activities**: `UserActivity` and the validated `ActivityData` payloads
//! - **Achievements**: `AchievementKind` catalog and `Achievement` records
//!
//! # Wellness Points
//!
//! Points are whole numbers stored as `i64`. The streak bonus multiplier is
//! tracked in integer tenths (1.0x = 10 tenths) so awarded points are always
//! exact; awards never involve floating point arithmetic.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod achievement;
pub mod activity;
pub mod claim;
pub mod error;
pub mod ids;
pub mod stats;
pub mod streak;

pub use achievement::{Achievement, AchievementKind};
pub use activity::{
    validate_points_override, ActivityData, ActivityKind, UserActivity, MAX_POINTS_PER_ACTIVITY,
    MAX_SESSION_MINUTES, MAX_WATER_AMOUNT_ML,
};
pub use claim::DailyClaim;
pub use error::{Result, RewardsError};
pub use ids::{ActivityId, ConsultationId, IdError, UserId};
pub use stats::{UserStats, POINTS_PER_LEVEL};
pub use streak::{
    bonus_multiplier, bonus_tenths, claim_points, next_streak, BASE_CLAIM_POINTS, MAX_BONUS_TENTHS,
};
