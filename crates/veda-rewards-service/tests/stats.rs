//! Stats endpoint integration tests.

mod common;

use common::TestHarness;
use serde_json::json;

#[tokio::test]
async fn stats_start_from_zero_state() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .get("/v1/stats")
        .add_header("authorization", harness.user_auth_header())
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["user_id"], harness.test_user_id.to_string());
    assert_eq!(body["total_points"], 0);
    assert_eq!(body["current_level"], 1);
    assert_eq!(body["daily_streak"], 0);
    assert_eq!(body["longest_streak"], 0);
    assert_eq!(body["total_analyses"], 0);
    assert_eq!(body["points_to_next_level"], 500);
    assert!(body.get("last_activity_at").is_none());
}

#[tokio::test]
async fn stats_without_auth_fails() {
    let harness = TestHarness::new();

    let response = harness.server.get("/v1/stats").await;

    response.assert_status_unauthorized();
}

#[tokio::test]
async fn stats_with_garbage_token_fails() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .get("/v1/stats")
        .add_header("authorization", "Bearer test-token:not-a-uuid")
        .await;

    response.assert_status_unauthorized();
}

#[tokio::test]
async fn stats_reflect_earned_points() {
    let harness = TestHarness::new();

    // Claim today's reward, then check the totals moved together.
    harness
        .server
        .post("/v1/claims/daily")
        .add_header("authorization", harness.user_auth_header())
        .await
        .assert_status_ok();

    harness
        .server
        .post("/v1/activities")
        .add_header("authorization", harness.user_auth_header())
        .json(&json!({ "data": { "type": "meditation", "duration_min": 20 } }))
        .await
        .assert_status_ok();

    let response = harness
        .server
        .get("/v1/stats")
        .add_header("authorization", harness.user_auth_header())
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    // 50 base claim points (streak 1, multiplier 1.0) + 15 meditation
    assert_eq!(body["total_points"], 65);
    assert_eq!(body["daily_streak"], 1);
    assert_eq!(body["points_to_next_level"], 435);
    assert!(body["last_activity_at"].as_str().is_some());
}

#[tokio::test]
async fn stats_are_isolated_per_user() {
    let harness = TestHarness::new();

    harness
        .server
        .post("/v1/claims/daily")
        .add_header("authorization", harness.user_auth_header())
        .await
        .assert_status_ok();

    let response = harness
        .server
        .get("/v1/stats")
        .add_header("authorization", TestHarness::other_user_auth_header())
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["total_points"], 0);
    assert_eq!(body["daily_streak"], 0);
}
