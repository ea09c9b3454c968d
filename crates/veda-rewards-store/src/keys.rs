//! Key encoding utilities for `RocksDB`.
//!
//! This module provides functions for encoding and decoding keys used in column families.

use chrono::NaiveDate;

use veda_rewards_core::{AchievementKind, ActivityId, UserId};

/// Create a stats key from a user ID.
#[must_use]
pub fn stats_key(user_id: &UserId) -> Vec<u8> {
    user_id.as_bytes().to_vec()
}

/// Create a daily claim key.
///
/// Format: `user_id (16 bytes) || claim_date ("YYYY-MM-DD", 10 bytes)`
///
/// ISO dates sort lexicographically, so a user's claims iterate in
/// calendar order and the newest claim is the last key under the prefix.
#[must_use]
pub fn claim_key(user_id: &UserId, claim_date: NaiveDate) -> Vec<u8> {
    let date = claim_date.format("%Y-%m-%d").to_string();
    let mut key = Vec::with_capacity(16 + date.len());
    key.extend_from_slice(user_id.as_bytes());
    key.extend_from_slice(date.as_bytes());
    key
}

/// Create a prefix for iterating all claims for a user.
#[must_use]
pub fn user_claims_prefix(user_id: &UserId) -> Vec<u8> {
    user_id.as_bytes().to_vec()
}

/// Create an activity key from an activity ID.
#[must_use]
pub fn activity_key(activity_id: &ActivityId) -> Vec<u8> {
    activity_id.to_bytes().to_vec()
}

/// Create a user-activity index key.
///
/// Format: `user_id (16 bytes) || activity_id (16 bytes)`
///
/// Since ULIDs are time-ordered, activities for a user will be sorted by time.
#[must_use]
pub fn user_activity_key(user_id: &UserId, activity_id: &ActivityId) -> Vec<u8> {
    let mut key = Vec::with_capacity(32);
    key.extend_from_slice(user_id.as_bytes());
    key.extend_from_slice(&activity_id.to_bytes());
    key
}

/// Create a prefix for iterating all activities for a user.
#[must_use]
pub fn user_activities_prefix(user_id: &UserId) -> Vec<u8> {
    user_id.as_bytes().to_vec()
}

/// Extract the activity ID from a user-activity index key.
///
/// # Panics
///
/// Panics if the key is not at least 32 bytes.
#[must_use]
pub fn extract_activity_id_from_user_key(key: &[u8]) -> ActivityId {
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&key[16..32]);
    ActivityId::from_bytes(bytes).expect("valid ULID bytes")
}

/// Create an achievement key.
///
/// Format: `user_id (16 bytes) || achievement_kind (snake_case name)`
///
/// One key per `(user, kind)` pair is what makes unlocks idempotent.
#[must_use]
pub fn achievement_key(user_id: &UserId, kind: AchievementKind) -> Vec<u8> {
    let name = kind.as_str();
    let mut key = Vec::with_capacity(16 + name.len());
    key.extend_from_slice(user_id.as_bytes());
    key.extend_from_slice(name.as_bytes());
    key
}

/// Create a prefix for iterating all achievements for a user.
#[must_use]
pub fn user_achievements_prefix(user_id: &UserId) -> Vec<u8> {
    user_id.as_bytes().to_vec()
}
