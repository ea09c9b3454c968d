//! Database schema definitions and column families.
//!
//! This module defines the column families used in `RocksDB` storage.

/// Column family names for the `RocksDB` database.
pub mod cf {
    /// Per-user reward stats, keyed by `user_id`.
    pub const STATS: &str = "stats";

    /// Daily claim ledger, keyed by `user_id || claim_date` (ISO date).
    pub const CLAIMS: &str = "claims";

    /// Activity journal entries, keyed by `activity_id` (ULID).
    pub const ACTIVITIES: &str = "activities";

    /// Index: activities by user, keyed by `user_id || activity_id`.
    /// Value is empty (index only).
    pub const ACTIVITIES_BY_USER: &str = "activities_by_user";

    /// Unlocked achievements, keyed by `user_id || achievement_kind`.
    pub const ACHIEVEMENTS: &str = "achievements";
}

/// Returns all column family names for database initialization.
#[must_use]
pub fn all_column_families() -> Vec<&'static str> {
    vec![
        cf::STATS,
        cf::CLAIMS,
        cf::ACTIVITIES,
        cf::ACTIVITIES_BY_USER,
        cf::ACHIEVEMENTS,
    ]
}
