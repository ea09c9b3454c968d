//! Achievement unlocking integration tests.

mod common;

use common::TestHarness;
use serde_json::json;

// ============================================================================
// Helper to log analyses until an unlock condition is met
// ============================================================================

async fn log_analyses(harness: &TestHarness, count: usize) -> serde_json::Value {
    let mut last = json!(null);
    for _ in 0..count {
        let response = harness
            .server
            .post("/v1/activities")
            .add_header("authorization", harness.user_auth_header())
            .json(&json!({
                "data": { "type": "health_analysis" }
            }))
            .await;
        response.assert_status_ok();
        last = response.json();
    }
    last
}

// ============================================================================
// Unlocked List
// ============================================================================

#[tokio::test]
async fn achievements_start_empty() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .get("/v1/achievements")
        .add_header("authorization", harness.user_auth_header())
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["achievements"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn achievements_without_auth_fails() {
    let harness = TestHarness::new();

    let response = harness.server.get("/v1/achievements").await;

    response.assert_status_unauthorized();
}

#[tokio::test]
async fn fifth_analysis_unlocks_health_explorer() {
    let harness = TestHarness::new();

    let body = log_analyses(&harness, 5).await;

    // The unlock rides on the response of the activity that earned it.
    let unlocked = body["unlocked"].as_array().unwrap();
    assert_eq!(unlocked.len(), 1);
    assert_eq!(unlocked[0]["kind"], "five_analyses");
    assert_eq!(unlocked[0]["name"], "Health Explorer");
    assert_eq!(unlocked[0]["points_reward"], 150);

    // 5 x 10 activity points plus the 150 point reward.
    assert_eq!(body["stats"]["total_points"], 200);
    assert_eq!(body["stats"]["total_analyses"], 5);

    let list: serde_json::Value = harness
        .server
        .get("/v1/achievements")
        .add_header("authorization", harness.user_auth_header())
        .await
        .json();
    let achievements = list["achievements"].as_array().unwrap();
    assert_eq!(achievements.len(), 1);
    assert_eq!(achievements[0]["kind"], "five_analyses");
    assert!(achievements[0]["unlocked_at"].as_str().is_some());
}

#[tokio::test]
async fn unlock_is_awarded_only_once() {
    let harness = TestHarness::new();

    log_analyses(&harness, 5).await;
    let body = log_analyses(&harness, 1).await;

    assert_eq!(body["unlocked"].as_array().unwrap().len(), 0);
    assert_eq!(body["stats"]["total_points"], 210);

    let list: serde_json::Value = harness
        .server
        .get("/v1/achievements")
        .add_header("authorization", harness.user_auth_header())
        .await
        .json();
    assert_eq!(list["achievements"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn unlock_journals_into_the_activity_feed() {
    let harness = TestHarness::new();

    log_analyses(&harness, 5).await;

    let body: serde_json::Value = harness
        .server
        .get("/v1/activities")
        .add_header("authorization", harness.user_auth_header())
        .await
        .json();

    let kinds: Vec<&str> = body["activities"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["kind"].as_str().unwrap())
        .collect();
    assert!(kinds.contains(&"achievement_unlocked"));
}

// ============================================================================
// Catalog
// ============================================================================

#[tokio::test]
async fn catalog_lists_every_entry_locked() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .get("/v1/achievements/catalog")
        .add_header("authorization", harness.user_auth_header())
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let entries = body["achievements"].as_array().unwrap();
    assert_eq!(entries.len(), 6);

    for entry in entries {
        assert_eq!(entry["unlocked"], false);
        assert!(entry.get("unlocked_at").is_none());
    }

    assert_eq!(entries[0]["kind"], "seven_day_streak");
    assert_eq!(entries[0]["target"], 7);
    assert_eq!(entries[0]["current"], 0);
    assert_eq!(entries[2]["kind"], "five_analyses");
    assert_eq!(entries[2]["points_reward"], 150);
    // A fresh account is already level one.
    assert_eq!(entries[5]["kind"], "level_ten");
    assert_eq!(entries[5]["current"], 1);
}

#[tokio::test]
async fn catalog_tracks_partial_progress() {
    let harness = TestHarness::new();

    log_analyses(&harness, 2).await;

    let body: serde_json::Value = harness
        .server
        .get("/v1/achievements/catalog")
        .add_header("authorization", harness.user_auth_header())
        .await
        .json();

    let entries = body["achievements"].as_array().unwrap();
    assert_eq!(entries[2]["kind"], "five_analyses");
    assert_eq!(entries[2]["current"], 2);
    assert_eq!(entries[2]["unlocked"], false);
}

#[tokio::test]
async fn catalog_marks_unlocked_entries() {
    let harness = TestHarness::new();

    log_analyses(&harness, 5).await;

    let body: serde_json::Value = harness
        .server
        .get("/v1/achievements/catalog")
        .add_header("authorization", harness.user_auth_header())
        .await
        .json();

    let entries = body["achievements"].as_array().unwrap();
    assert_eq!(entries[2]["kind"], "five_analyses");
    assert_eq!(entries[2]["unlocked"], true);
    assert_eq!(entries[2]["current"], 5);
    assert!(entries[2]["unlocked_at"].as_str().is_some());
}
