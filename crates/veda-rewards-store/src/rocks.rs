//! `RocksDB` storage implementation.
//!
//! This module provides the `RocksStore` implementation of the `Store` trait.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, NaiveDate, Utc};
use rocksdb::{
    BoundColumnFamily, ColumnFamilyDescriptor, DBWithThreadMode, Direction, IteratorMode,
    MultiThreaded, Options, WriteBatch,
};

use veda_rewards_core::{
    next_streak, Achievement, AchievementKind, ActivityData, ActivityId, DailyClaim, UserActivity,
    UserId, UserStats,
};

use crate::error::{Result, StoreError};
use crate::keys;
use crate::schema::{all_column_families, cf};
use crate::{ActivityOutcome, ClaimOutcome, Store, UnlockOutcome};

/// Number of lock stripes serializing compound operations.
///
/// Operations for the same user always map to the same stripe, so the
/// read-compute-write sequence inside a compound operation can never
/// interleave with another operation for that user.
const LOCK_STRIPES: usize = 64;

/// `RocksDB`-backed storage implementation.
pub struct RocksStore {
    db: Arc<DBWithThreadMode<MultiThreaded>>,
    user_locks: Vec<Mutex<()>>,
}

impl RocksStore {
    /// Open or create a `RocksDB` database at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_descriptors: Vec<_> = all_column_families()
            .into_iter()
            .map(|name| ColumnFamilyDescriptor::new(name, Options::default()))
            .collect();

        let db = DBWithThreadMode::open_cf_descriptors(&opts, path, cf_descriptors)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        tracing::debug!(
            column_families = all_column_families().len(),
            "opened rewards store"
        );

        Ok(Self {
            db: Arc::new(db),
            user_locks: (0..LOCK_STRIPES).map(|_| Mutex::new(())).collect(),
        })
    }

    /// Get a column family handle.
    fn cf(&self, name: &str) -> Result<Arc<BoundColumnFamily<'_>>> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| StoreError::Database(format!("column family not found: {name}")))
    }

    /// Serialize a value using CBOR.
    fn serialize<T: serde::Serialize>(value: &T) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        ciborium::into_writer(value, &mut buf)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(buf)
    }

    /// Deserialize a value from CBOR.
    fn deserialize<T: serde::de::DeserializeOwned>(data: &[u8]) -> Result<T> {
        ciborium::from_reader(data).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    /// Acquire the lock stripe serializing compound operations for this user.
    fn user_lock(&self, user_id: &UserId) -> MutexGuard<'_, ()> {
        let stripe = usize::from(user_id.as_bytes()[0]) % LOCK_STRIPES;
        self.user_locks[stripe]
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Unlock every achievement the current stats satisfy, crediting
    /// rewards as it goes until no further condition is met.
    ///
    /// `unlocked` carries achievements already granted earlier in this
    /// operation (not yet visible in the database) and accumulates the
    /// new ones. Returns the journal entries for the new unlocks.
    fn evaluate_unlocks(
        &self,
        stats: &mut UserStats,
        unlocked: &mut Vec<Achievement>,
    ) -> Result<Vec<UserActivity>> {
        let mut entries = Vec::new();
        loop {
            let mut progressed = false;
            for kind in AchievementKind::all() {
                if unlocked.iter().any(|a| a.kind == kind)
                    || self.has_achievement(&stats.user_id, kind)?
                {
                    continue;
                }
                if !kind.unlocked_by(stats) {
                    continue;
                }

                let achievement = Achievement::unlock(stats.user_id, kind);
                stats.add_points(achievement.points_reward, achievement.unlocked_at);
                entries.push(UserActivity::achievement_entry(
                    &achievement,
                    stats.daily_streak,
                ));
                unlocked.push(achievement);
                progressed = true;
            }
            // Reward points can satisfy further conditions, so sweep the
            // catalog again until a pass unlocks nothing.
            if !progressed {
                break;
            }
        }
        Ok(entries)
    }

    /// Commit one compound operation's writes in a single atomic batch.
    fn commit(
        &self,
        stats: &UserStats,
        claim: Option<&DailyClaim>,
        feed: &[UserActivity],
        unlocked: &[Achievement],
    ) -> Result<()> {
        let cf_stats = self.cf(cf::STATS)?;
        let cf_claims = self.cf(cf::CLAIMS)?;
        let cf_activities = self.cf(cf::ACTIVITIES)?;
        let cf_by_user = self.cf(cf::ACTIVITIES_BY_USER)?;
        let cf_achievements = self.cf(cf::ACHIEVEMENTS)?;

        let mut batch = WriteBatch::default();
        batch.put_cf(
            &cf_stats,
            keys::stats_key(&stats.user_id),
            Self::serialize(stats)?,
        );

        if let Some(claim) = claim {
            batch.put_cf(
                &cf_claims,
                keys::claim_key(&claim.user_id, claim.claim_date),
                Self::serialize(claim)?,
            );
        }

        for entry in feed {
            batch.put_cf(
                &cf_activities,
                keys::activity_key(&entry.id),
                Self::serialize(entry)?,
            );
            batch.put_cf(
                &cf_by_user,
                keys::user_activity_key(&entry.user_id, &entry.id),
                [],
            );
        }

        for achievement in unlocked {
            batch.put_cf(
                &cf_achievements,
                keys::achievement_key(&achievement.user_id, achievement.kind),
                Self::serialize(achievement)?,
            );
        }

        self.db
            .write(batch)
            .map_err(|e| StoreError::Database(e.to_string()))
    }
}

impl Store for RocksStore {
    // =========================================================================
    // Stats Operations
    // =========================================================================

    fn get_stats(&self, user_id: &UserId) -> Result<Option<UserStats>> {
        let cf = self.cf(cf::STATS)?;
        let key = keys::stats_key(user_id);

        self.db
            .get_cf(&cf, key)
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| Self::deserialize(&data))
            .transpose()
    }

    fn ensure_stats(&self, user_id: &UserId) -> Result<UserStats> {
        if let Some(stats) = self.get_stats(user_id)? {
            return Ok(stats);
        }

        let _guard = self.user_lock(user_id);

        // Re-check under the lock; another request may have initialized
        // the record in the meantime.
        if let Some(stats) = self.get_stats(user_id)? {
            return Ok(stats);
        }

        let stats = UserStats::new(*user_id);
        self.put_stats(&stats)?;
        Ok(stats)
    }

    fn put_stats(&self, stats: &UserStats) -> Result<()> {
        let cf = self.cf(cf::STATS)?;
        let key = keys::stats_key(&stats.user_id);
        let value = Self::serialize(stats)?;

        self.db
            .put_cf(&cf, key, value)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    // =========================================================================
    // Daily Claim Operations
    // =========================================================================

    fn claim_daily(&self, user_id: &UserId, claim_date: NaiveDate) -> Result<ClaimOutcome> {
        let _guard = self.user_lock(user_id);

        // Idempotency: at most one claim per (user, date).
        if self.get_claim(user_id, claim_date)?.is_some() {
            return Err(StoreError::AlreadyClaimed { claim_date });
        }

        let mut stats = self
            .get_stats(user_id)?
            .unwrap_or_else(|| UserStats::new(*user_id));
        let level_before = stats.current_level;

        let last_claim = self.latest_claim(user_id)?;
        let streak = next_streak(
            last_claim.map(|c| c.claim_date),
            stats.daily_streak,
            claim_date,
        );

        let claim = DailyClaim::award(*user_id, claim_date, streak);
        stats.record_claim(streak, claim.claimed_at);
        stats.add_points(claim.points_claimed, claim.claimed_at);

        let mut feed = vec![UserActivity::claim_entry(&claim)];
        let mut unlocked = Vec::new();
        feed.append(&mut self.evaluate_unlocks(&mut stats, &mut unlocked)?);

        if stats.current_level > level_before {
            feed.push(UserActivity::level_up_entry(
                *user_id,
                stats.current_level,
                stats.daily_streak,
                claim.claimed_at,
            ));
        }

        self.commit(&stats, Some(&claim), &feed, &unlocked)?;

        Ok(ClaimOutcome {
            claim,
            stats,
            feed,
            unlocked,
        })
    }

    fn get_claim(&self, user_id: &UserId, claim_date: NaiveDate) -> Result<Option<DailyClaim>> {
        let cf = self.cf(cf::CLAIMS)?;
        let key = keys::claim_key(user_id, claim_date);

        self.db
            .get_cf(&cf, key)
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| Self::deserialize(&data))
            .transpose()
    }

    fn latest_claim(&self, user_id: &UserId) -> Result<Option<DailyClaim>> {
        let cf = self.cf(cf::CLAIMS)?;
        let prefix = keys::user_claims_prefix(user_id);

        let iter = self
            .db
            .iterator_cf(&cf, IteratorMode::From(&prefix, Direction::Forward));

        // ISO date keys iterate in calendar order; the newest claim is
        // the last key under the prefix.
        let mut newest: Option<Vec<u8>> = None;
        for item in iter {
            let (key, value) = item.map_err(|e| StoreError::Database(e.to_string()))?;

            if !key.starts_with(&prefix) {
                break;
            }

            newest = Some(value.to_vec());
        }

        newest.map(|data| Self::deserialize(&data)).transpose()
    }

    fn list_claims(&self, user_id: &UserId, limit: usize) -> Result<Vec<DailyClaim>> {
        let cf = self.cf(cf::CLAIMS)?;
        let prefix = keys::user_claims_prefix(user_id);

        let iter = self
            .db
            .iterator_cf(&cf, IteratorMode::From(&prefix, Direction::Forward));

        let mut claims: Vec<DailyClaim> = Vec::new();
        for item in iter {
            let (key, value) = item.map_err(|e| StoreError::Database(e.to_string()))?;

            if !key.starts_with(&prefix) {
                break;
            }

            claims.push(Self::deserialize(&value)?);
        }

        // Reverse to get newest first
        claims.reverse();
        claims.truncate(limit);
        Ok(claims)
    }

    // =========================================================================
    // Activity Operations
    // =========================================================================

    fn record_activity(
        &self,
        user_id: &UserId,
        data: ActivityData,
        points_override: Option<i64>,
        completed_at: DateTime<Utc>,
    ) -> Result<ActivityOutcome> {
        let _guard = self.user_lock(user_id);

        let mut stats = self
            .get_stats(user_id)?
            .unwrap_or_else(|| UserStats::new(*user_id));
        let level_before = stats.current_level;

        let kind = data.kind();
        let points = points_override.unwrap_or_else(|| kind.default_points());
        let activity = UserActivity::new(*user_id, data, points, stats.daily_streak, completed_at);

        stats.add_points(points, activity.created_at);
        if kind.counts_as_analysis() {
            stats.record_analysis();
        }

        let mut feed = vec![activity.clone()];
        let mut unlocked = Vec::new();
        feed.append(&mut self.evaluate_unlocks(&mut stats, &mut unlocked)?);

        if stats.current_level > level_before {
            feed.push(UserActivity::level_up_entry(
                *user_id,
                stats.current_level,
                stats.daily_streak,
                activity.created_at,
            ));
        }

        self.commit(&stats, None, &feed, &unlocked)?;

        Ok(ActivityOutcome {
            activity,
            stats,
            feed,
            unlocked,
        })
    }

    fn get_activity(&self, activity_id: &ActivityId) -> Result<Option<UserActivity>> {
        let cf = self.cf(cf::ACTIVITIES)?;
        let key = keys::activity_key(activity_id);

        self.db
            .get_cf(&cf, key)
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| Self::deserialize(&data))
            .transpose()
    }

    fn list_activities(&self, user_id: &UserId, limit: usize) -> Result<Vec<UserActivity>> {
        let cf_by_user = self.cf(cf::ACTIVITIES_BY_USER)?;
        let prefix = keys::user_activities_prefix(user_id);

        let iter = self
            .db
            .iterator_cf(&cf_by_user, IteratorMode::From(&prefix, Direction::Forward));

        // Collect all matching keys first (since ULIDs are naturally time-ordered)
        let mut all_keys: Vec<Vec<u8>> = Vec::new();
        for item in iter {
            let (key, _) = item.map_err(|e| StoreError::Database(e.to_string()))?;

            if !key.starts_with(&prefix) {
                break;
            }

            all_keys.push(key.to_vec());
        }

        // Reverse to get newest first
        all_keys.reverse();

        let mut activities = Vec::new();
        for key in all_keys {
            if activities.len() >= limit {
                break;
            }

            let activity_id = keys::extract_activity_id_from_user_key(&key);
            if let Some(activity) = self.get_activity(&activity_id)? {
                activities.push(activity);
            }
        }

        Ok(activities)
    }

    fn list_activities_after(
        &self,
        user_id: &UserId,
        after: &ActivityId,
        limit: usize,
    ) -> Result<Vec<UserActivity>> {
        let cf_by_user = self.cf(cf::ACTIVITIES_BY_USER)?;
        let prefix = keys::user_activities_prefix(user_id);
        let start = keys::user_activity_key(user_id, after);

        let iter = self
            .db
            .iterator_cf(&cf_by_user, IteratorMode::From(&start, Direction::Forward));

        let mut activities = Vec::new();
        for item in iter {
            let (key, _) = item.map_err(|e| StoreError::Database(e.to_string()))?;

            if !key.starts_with(&prefix) {
                break;
            }

            // The cursor itself is excluded; the iterator seeks to the
            // first key >= start.
            if &key[..] == start.as_slice() {
                continue;
            }

            if activities.len() >= limit {
                break;
            }

            let activity_id = keys::extract_activity_id_from_user_key(&key);
            if let Some(activity) = self.get_activity(&activity_id)? {
                activities.push(activity);
            }
        }

        Ok(activities)
    }

    // =========================================================================
    // Achievement Operations
    // =========================================================================

    fn list_achievements(&self, user_id: &UserId) -> Result<Vec<Achievement>> {
        let cf = self.cf(cf::ACHIEVEMENTS)?;
        let prefix = keys::user_achievements_prefix(user_id);

        let iter = self
            .db
            .iterator_cf(&cf, IteratorMode::From(&prefix, Direction::Forward));

        let mut achievements: Vec<Achievement> = Vec::new();
        for item in iter {
            let (key, value) = item.map_err(|e| StoreError::Database(e.to_string()))?;

            if !key.starts_with(&prefix) {
                break;
            }

            achievements.push(Self::deserialize(&value)?);
        }

        // Keys order by kind name; present unlocks chronologically.
        achievements.sort_by_key(|a| a.unlocked_at);
        Ok(achievements)
    }

    fn has_achievement(&self, user_id: &UserId, kind: AchievementKind) -> Result<bool> {
        let cf = self.cf(cf::ACHIEVEMENTS)?;
        let key = keys::achievement_key(user_id, kind);

        let exists = self
            .db
            .get_cf(&cf, key)
            .map_err(|e| StoreError::Database(e.to_string()))?
            .is_some();

        Ok(exists)
    }

    fn unlock_achievement(&self, user_id: &UserId, kind: AchievementKind) -> Result<UnlockOutcome> {
        let _guard = self.user_lock(user_id);

        // Idempotency: at most one unlock per (user, kind).
        if self.has_achievement(user_id, kind)? {
            return Err(StoreError::AlreadyUnlocked {
                achievement: kind.as_str().to_string(),
            });
        }

        let mut stats = self
            .get_stats(user_id)?
            .unwrap_or_else(|| UserStats::new(*user_id));
        let level_before = stats.current_level;

        let achievement = Achievement::unlock(*user_id, kind);
        stats.add_points(achievement.points_reward, achievement.unlocked_at);

        let mut feed = vec![UserActivity::achievement_entry(
            &achievement,
            stats.daily_streak,
        )];
        let mut unlocked = vec![achievement.clone()];
        feed.append(&mut self.evaluate_unlocks(&mut stats, &mut unlocked)?);

        if stats.current_level > level_before {
            feed.push(UserActivity::level_up_entry(
                *user_id,
                stats.current_level,
                stats.daily_streak,
                achievement.unlocked_at,
            ));
        }

        self.commit(&stats, None, &feed, &unlocked)?;

        Ok(UnlockOutcome {
            achievement,
            stats,
            feed,
            unlocked,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_store() -> (RocksStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = RocksStore::open(dir.path()).unwrap();
        (store, dir)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn stats_lazy_init() {
        let (store, _dir) = create_test_store();
        let user_id = UserId::generate();

        assert!(store.get_stats(&user_id).unwrap().is_none());

        let stats = store.ensure_stats(&user_id).unwrap();
        assert_eq!(stats.total_points, 0);
        assert_eq!(stats.current_level, 1);
        assert_eq!(stats.daily_streak, 0);

        let again = store.ensure_stats(&user_id).unwrap();
        assert_eq!(again.created_at, stats.created_at);
    }

    #[test]
    fn first_claim() {
        let (store, _dir) = create_test_store();
        let user_id = UserId::generate();

        let outcome = store.claim_daily(&user_id, date(2025, 6, 10)).unwrap();
        assert_eq!(outcome.claim.points_claimed, 50);
        assert_eq!(outcome.claim.streak_days, 1);
        assert!((outcome.claim.bonus_multiplier - 1.0).abs() < f64::EPSILON);
        assert_eq!(outcome.stats.total_points, 50);
        assert_eq!(outcome.stats.daily_streak, 1);
        assert_eq!(outcome.stats.current_level, 1);
        assert_eq!(outcome.feed.len(), 1);
        assert!(outcome.unlocked.is_empty());

        // Ledger and journal both persisted
        let claim = store
            .get_claim(&user_id, date(2025, 6, 10))
            .unwrap()
            .unwrap();
        assert_eq!(claim.points_claimed, 50);

        let feed = store.list_activities(&user_id, 10).unwrap();
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].points_earned, 50);
    }

    #[test]
    fn consecutive_claims_grow_bonus() {
        let (store, _dir) = create_test_store();
        let user_id = UserId::generate();

        let mut last = None;
        for day in 1..=7 {
            last = Some(store.claim_daily(&user_id, date(2025, 6, day)).unwrap());
        }

        let outcome = last.unwrap();
        assert_eq!(outcome.claim.streak_days, 7);
        assert_eq!(outcome.claim.points_claimed, 80);
        assert!((outcome.claim.bonus_multiplier - 1.6).abs() < f64::EPSILON);

        // 50+55+60+65+70+75+80 from claims, plus the seven-day unlock reward
        assert_eq!(outcome.stats.total_points, 555);
        assert_eq!(outcome.stats.current_level, 2);
        assert_eq!(outcome.unlocked.len(), 1);
        assert_eq!(outcome.unlocked[0].kind, AchievementKind::SevenDayStreak);

        // Claim entry, unlock entry, and level-up entry in one transaction
        assert_eq!(outcome.feed.len(), 3);
        assert!(store
            .has_achievement(&user_id, AchievementKind::SevenDayStreak)
            .unwrap());
    }

    #[test]
    fn missed_day_resets_streak() {
        let (store, _dir) = create_test_store();
        let user_id = UserId::generate();

        store.claim_daily(&user_id, date(2025, 6, 10)).unwrap();
        let outcome = store.claim_daily(&user_id, date(2025, 6, 12)).unwrap();

        assert_eq!(outcome.claim.streak_days, 1);
        assert_eq!(outcome.claim.points_claimed, 50);
        assert_eq!(outcome.stats.daily_streak, 1);
        assert_eq!(outcome.stats.total_points, 100);
    }

    #[test]
    fn duplicate_claim_rejected() {
        let (store, _dir) = create_test_store();
        let user_id = UserId::generate();

        store.claim_daily(&user_id, date(2025, 6, 10)).unwrap();

        let result = store.claim_daily(&user_id, date(2025, 6, 10));
        assert!(
            matches!(result, Err(StoreError::AlreadyClaimed { claim_date }) if claim_date == date(2025, 6, 10))
        );

        // The losing claim left no trace
        let stats = store.get_stats(&user_id).unwrap().unwrap();
        assert_eq!(stats.total_points, 50);
        assert_eq!(store.list_claims(&user_id, 10).unwrap().len(), 1);
        assert_eq!(store.list_activities(&user_id, 10).unwrap().len(), 1);
    }

    #[test]
    fn bonus_caps_after_three_weeks() {
        let (store, _dir) = create_test_store();
        let user_id = UserId::generate();

        let mut outcomes = Vec::new();
        for day in 1..=22 {
            outcomes.push(store.claim_daily(&user_id, date(2025, 6, day)).unwrap());
        }

        assert_eq!(outcomes[20].claim.points_claimed, 150);
        assert_eq!(outcomes[21].claim.points_claimed, 150);
        assert!((outcomes[21].claim.bonus_multiplier - 3.0).abs() < f64::EPSILON);

        let stats = store.get_stats(&user_id).unwrap().unwrap();
        assert_eq!(stats.daily_streak, 22);
        assert_eq!(stats.longest_streak, 22);
        // 2,250 from claims plus the seven-day (100) and thousand-point
        // (200) unlock rewards
        assert_eq!(stats.total_points, 2_550);
        assert_eq!(stats.current_level, 6);

        let achievements = store.list_achievements(&user_id).unwrap();
        assert_eq!(achievements.len(), 2);
        assert_eq!(achievements[0].kind, AchievementKind::SevenDayStreak);
        assert_eq!(achievements[1].kind, AchievementKind::ThousandPoints);
    }

    #[test]
    fn concurrent_claims_single_winner() {
        let (store, _dir) = create_test_store();
        let store = Arc::new(store);
        let user_id = UserId::generate();
        let claim_date = date(2025, 6, 10);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || store.claim_daily(&user_id, claim_date))
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let wins = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(wins, 1);
        assert!(results
            .iter()
            .filter(|r| r.is_err())
            .all(|r| matches!(r, Err(StoreError::AlreadyClaimed { .. }))));

        // Exactly one claim settled
        let stats = store.get_stats(&user_id).unwrap().unwrap();
        assert_eq!(stats.total_points, 50);
        assert_eq!(store.list_activities(&user_id, 100).unwrap().len(), 1);
    }

    #[test]
    fn longest_streak_survives_reset() {
        let (store, _dir) = create_test_store();
        let user_id = UserId::generate();

        store.claim_daily(&user_id, date(2025, 6, 1)).unwrap();
        store.claim_daily(&user_id, date(2025, 6, 2)).unwrap();
        let outcome = store.claim_daily(&user_id, date(2025, 6, 4)).unwrap();

        assert_eq!(outcome.stats.daily_streak, 1);
        assert_eq!(outcome.stats.longest_streak, 2);
    }

    #[test]
    fn activity_defaults_and_override() {
        let (store, _dir) = create_test_store();
        let user_id = UserId::generate();

        let meditation = store
            .record_activity(
                &user_id,
                ActivityData::Meditation {
                    duration_min: 20,
                    style: None,
                },
                None,
                Utc::now(),
            )
            .unwrap();
        assert_eq!(meditation.activity.points_earned, 15);
        assert_eq!(meditation.feed.len(), 1);

        std::thread::sleep(std::time::Duration::from_millis(2)); // Ensure different ULIDs

        let water = store
            .record_activity(
                &user_id,
                ActivityData::WaterIntake { amount_ml: 500 },
                Some(25),
                Utc::now(),
            )
            .unwrap();
        assert_eq!(water.activity.points_earned, 25);
        assert_eq!(water.stats.total_points, 40);

        let activities = store.list_activities(&user_id, 10).unwrap();
        assert_eq!(activities.len(), 2);
        assert_eq!(activities[0].points_earned, 25); // Newest first
    }

    #[test]
    fn analyses_unlock_health_explorer() {
        let (store, _dir) = create_test_store();
        let user_id = UserId::generate();

        let mut last = None;
        for _ in 0..5 {
            last = Some(
                store
                    .record_activity(
                        &user_id,
                        ActivityData::HealthAnalysis { summary: None },
                        None,
                        Utc::now(),
                    )
                    .unwrap(),
            );
            std::thread::sleep(std::time::Duration::from_millis(2)); // Ensure different ULIDs
        }

        let outcome = last.unwrap();
        assert_eq!(outcome.stats.total_analyses, 5);
        assert_eq!(outcome.unlocked.len(), 1);
        assert_eq!(outcome.unlocked[0].kind, AchievementKind::FiveAnalyses);
        // Five 10-point analyses plus the 150-point unlock reward
        assert_eq!(outcome.stats.total_points, 200);
        assert_eq!(outcome.feed.len(), 2);

        assert!(store
            .has_achievement(&user_id, AchievementKind::FiveAnalyses)
            .unwrap());
    }

    #[test]
    fn activity_feed_cursor() {
        let (store, _dir) = create_test_store();
        let user_id = UserId::generate();

        let first = store
            .record_activity(
                &user_id,
                ActivityData::WaterIntake { amount_ml: 250 },
                None,
                Utc::now(),
            )
            .unwrap();
        std::thread::sleep(std::time::Duration::from_millis(2)); // Ensure different ULIDs
        let second = store
            .record_activity(
                &user_id,
                ActivityData::Exercise {
                    duration_min: 30,
                    kind: None,
                },
                None,
                Utc::now(),
            )
            .unwrap();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let third = store
            .record_activity(&user_id, ActivityData::DailyCheckin, None, Utc::now())
            .unwrap();

        let newest_first = store.list_activities(&user_id, 10).unwrap();
        assert_eq!(newest_first.len(), 3);
        assert_eq!(newest_first[0].id, third.activity.id);
        assert_eq!(newest_first[2].id, first.activity.id);

        // Catch-up reads resume after the cursor, oldest first
        let after_first = store
            .list_activities_after(&user_id, &first.activity.id, 10)
            .unwrap();
        assert_eq!(after_first.len(), 2);
        assert_eq!(after_first[0].id, second.activity.id);
        assert_eq!(after_first[1].id, third.activity.id);

        assert!(store
            .list_activities_after(&user_id, &third.activity.id, 10)
            .unwrap()
            .is_empty());

        let limited = store.list_activities(&user_id, 2).unwrap();
        assert_eq!(limited.len(), 2);
        assert_eq!(limited[0].id, third.activity.id);
    }

    #[test]
    fn direct_unlock_is_idempotent() {
        let (store, _dir) = create_test_store();
        let user_id = UserId::generate();

        let outcome = store
            .unlock_achievement(&user_id, AchievementKind::SevenDayStreak)
            .unwrap();
        assert_eq!(outcome.achievement.points_reward, 100);
        assert_eq!(outcome.stats.total_points, 100);
        assert_eq!(outcome.unlocked.len(), 1);

        let result = store.unlock_achievement(&user_id, AchievementKind::SevenDayStreak);
        assert!(
            matches!(result, Err(StoreError::AlreadyUnlocked { achievement }) if achievement == "seven_day_streak")
        );

        // The losing unlock left no trace
        assert_eq!(store.list_achievements(&user_id).unwrap().len(), 1);
        assert_eq!(
            store.get_stats(&user_id).unwrap().unwrap().total_points,
            100
        );
    }

    #[test]
    fn unlock_rewards_chain_into_further_unlocks() {
        let (store, _dir) = create_test_store();
        let user_id = UserId::generate();

        let mut stats = UserStats::new(user_id);
        stats.add_points(900, Utc::now());
        store.put_stats(&stats).unwrap();

        let outcome = store
            .unlock_achievement(&user_id, AchievementKind::SevenDayStreak)
            .unwrap();

        // 900 + 100 reaches 1,000, which chains into the point-collector
        // unlock inside the same transaction
        assert_eq!(outcome.unlocked.len(), 2);
        assert_eq!(outcome.unlocked[0].kind, AchievementKind::SevenDayStreak);
        assert_eq!(outcome.unlocked[1].kind, AchievementKind::ThousandPoints);
        assert_eq!(outcome.stats.total_points, 1_200);
        assert_eq!(outcome.stats.current_level, 3);

        // Unlock entry, chained unlock entry, and level-up entry
        assert_eq!(outcome.feed.len(), 3);
        assert_eq!(store.list_achievements(&user_id).unwrap().len(), 2);
    }

    #[test]
    fn claims_listing() {
        let (store, _dir) = create_test_store();
        let user_id = UserId::generate();

        for day in 10..=12 {
            store.claim_daily(&user_id, date(2025, 6, day)).unwrap();
        }

        let claims = store.list_claims(&user_id, 10).unwrap();
        assert_eq!(claims.len(), 3);
        assert_eq!(claims[0].claim_date, date(2025, 6, 12)); // Newest first
        assert_eq!(claims[2].claim_date, date(2025, 6, 10));

        let limited = store.list_claims(&user_id, 2).unwrap();
        assert_eq!(limited.len(), 2);
        assert_eq!(limited[0].claim_date, date(2025, 6, 12));

        assert!(store
            .get_claim(&user_id, date(2025, 6, 11))
            .unwrap()
            .is_some());
        assert!(store
            .get_claim(&user_id, date(2025, 6, 13))
            .unwrap()
            .is_none());

        let latest = store.latest_claim(&user_id).unwrap().unwrap();
        assert_eq!(latest.claim_date, date(2025, 6, 12));
    }
}
