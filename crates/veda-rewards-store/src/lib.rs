//! `RocksDB` storage layer for veda-rewards.
//!
//! This crate provides persistent storage for user stats, daily claims,
//! activity journal entries, and achievements using `RocksDB` with column
//! families for efficient indexing.
//!
//! # Architecture
//!
//! The storage uses the following column families:
//!
//! - `stats`: Per-user reward stats, keyed by `user_id`
//! - `claims`: Daily claim ledger, keyed by `user_id || claim_date`
//! - `activities`: Activity journal entries, keyed by `activity_id` (ULID)
//! - `activities_by_user`: Index for listing a user's activities in time order
//! - `achievements`: Unlocked achievements, keyed by `user_id || kind`
//!
//! Compound operations (claiming, logging an activity, unlocking an
//! achievement) serialize per user behind striped locks and land in a
//! single atomic write batch, so stats, ledger, journal and achievements
//! can never drift apart.
//!
//! # Example
//!
//! ```no_run
//! use veda_rewards_store::{RocksStore, Store};
//! use veda_rewards_core::UserId;
//!
//! let store = RocksStore::open("/tmp/veda-rewards-db").unwrap();
//!
//! let user_id = UserId::generate();
//! let today = chrono::Utc::now().date_naive();
//! let outcome = store.claim_daily(&user_id, today).unwrap();
//! println!("claimed {} points", outcome.claim.points_claimed);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod keys;
pub mod rocks;
pub mod schema;

pub use error::{Result, StoreError};
pub use rocks::RocksStore;

use chrono::{DateTime, NaiveDate, Utc};

use veda_rewards_core::{
    Achievement, AchievementKind, ActivityData, ActivityId, DailyClaim, UserActivity, UserId,
    UserStats,
};

/// Result of a successful daily claim.
#[derive(Debug, Clone)]
pub struct ClaimOutcome {
    /// The ledger entry that was written.
    pub claim: DailyClaim,
    /// Stats after the claim and any unlock rewards were applied.
    pub stats: UserStats,
    /// Every journal entry the operation wrote, in write order.
    pub feed: Vec<UserActivity>,
    /// Achievements the operation unlocked, if any.
    pub unlocked: Vec<Achievement>,
}

/// Result of logging an activity.
#[derive(Debug, Clone)]
pub struct ActivityOutcome {
    /// The journal entry for the logged activity itself.
    pub activity: UserActivity,
    /// Stats after the point credit and any unlock rewards were applied.
    pub stats: UserStats,
    /// Every journal entry the operation wrote, in write order.
    pub feed: Vec<UserActivity>,
    /// Achievements the operation unlocked, if any.
    pub unlocked: Vec<Achievement>,
}

/// Result of unlocking an achievement directly.
#[derive(Debug, Clone)]
pub struct UnlockOutcome {
    /// The achievement that was requested.
    pub achievement: Achievement,
    /// Stats after the unlock rewards were applied.
    pub stats: UserStats,
    /// Every journal entry the operation wrote, in write order.
    pub feed: Vec<UserActivity>,
    /// Everything the operation unlocked: the requested achievement
    /// first, then any unlocks its reward points chained into.
    pub unlocked: Vec<Achievement>,
}

/// The storage trait defining all database operations.
///
/// This trait abstracts the storage layer, allowing for different implementations
/// (e.g., `RocksDB`, in-memory for testing).
pub trait Store: Send + Sync {
    // =========================================================================
    // Stats Operations
    // =========================================================================

    /// Get a user's stats.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_stats(&self, user_id: &UserId) -> Result<Option<UserStats>>;

    /// Get a user's stats, creating the zero-state record if none exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn ensure_stats(&self, user_id: &UserId) -> Result<UserStats>;

    /// Insert or update a stats record.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn put_stats(&self, stats: &UserStats) -> Result<()>;

    // =========================================================================
    // Daily Claim Operations
    // =========================================================================

    /// Claim the daily reward for `claim_date`: evaluate the streak,
    /// write the ledger entry, credit points, journal the claim, and
    /// unlock any achievements the new stats satisfy, all atomically.
    ///
    /// # Errors
    ///
    /// - `StoreError::AlreadyClaimed` if a claim exists for the date.
    fn claim_daily(&self, user_id: &UserId, claim_date: NaiveDate) -> Result<ClaimOutcome>;

    /// Get the claim for a specific date, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_claim(&self, user_id: &UserId, claim_date: NaiveDate) -> Result<Option<DailyClaim>>;

    /// Get a user's most recent claim, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn latest_claim(&self, user_id: &UserId) -> Result<Option<DailyClaim>>;

    /// List a user's claims, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn list_claims(&self, user_id: &UserId, limit: usize) -> Result<Vec<DailyClaim>>;

    // =========================================================================
    // Activity Operations
    // =========================================================================

    /// Log an activity: journal the entry, credit its points, and unlock
    /// any achievements the new stats satisfy, all atomically.
    ///
    /// `points_override` replaces the kind's default award when given;
    /// callers are expected to have validated it.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn record_activity(
        &self,
        user_id: &UserId,
        data: ActivityData,
        points_override: Option<i64>,
        completed_at: DateTime<Utc>,
    ) -> Result<ActivityOutcome>;

    /// Get a journal entry by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_activity(&self, activity_id: &ActivityId) -> Result<Option<UserActivity>>;

    /// List a user's journal entries, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn list_activities(&self, user_id: &UserId, limit: usize) -> Result<Vec<UserActivity>>;

    /// List a user's journal entries written after `after`, oldest
    /// first. This is the catch-up read for live feed consumers: replay
    /// from a cursor, then switch to the push stream.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn list_activities_after(
        &self,
        user_id: &UserId,
        after: &ActivityId,
        limit: usize,
    ) -> Result<Vec<UserActivity>>;

    // =========================================================================
    // Achievement Operations
    // =========================================================================

    /// List a user's unlocked achievements, oldest unlock first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn list_achievements(&self, user_id: &UserId) -> Result<Vec<Achievement>>;

    /// Check whether an achievement is already unlocked.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn has_achievement(&self, user_id: &UserId, kind: AchievementKind) -> Result<bool>;

    /// Unlock an achievement directly: write the unlock record, credit
    /// its reward, journal the unlock, and chase any further unlocks the
    /// reward satisfies, all atomically.
    ///
    /// # Errors
    ///
    /// - `StoreError::AlreadyUnlocked` if the achievement is already
    ///   unlocked for this user.
    fn unlock_achievement(&self, user_id: &UserId, kind: AchievementKind) -> Result<UnlockOutcome>;
}
