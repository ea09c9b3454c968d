//! Consultation confirmation e-mail integration tests.

mod common;

use common::TestHarness;
use serde_json::json;
use veda_rewards_core::ConsultationId;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn booking() -> serde_json::Value {
    json!({
        "consultation_id": ConsultationId::generate().to_string(),
        "patient_name": "Ananya Sharma",
        "patient_email": "ananya@example.com",
        "doctor_name": "Dr. Ritu Verma",
        "consultation_type": "video",
        "preferred_date": "2025-07-01",
        "preferred_time": "10:30 AM",
        "total_amount_cents": 150_000
    })
}

#[tokio::test]
async fn unconfigured_email_returns_service_unavailable() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .post("/v1/consultations/email")
        .add_header("authorization", harness.user_auth_header())
        .json(&booking())
        .await;

    response.assert_status(axum::http::StatusCode::SERVICE_UNAVAILABLE);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["code"], "not_configured");
}

#[tokio::test]
async fn confirmation_is_forwarded_to_the_provider() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/emails"))
        .and(header("authorization", "Bearer re_test_key"))
        .and(body_partial_json(json!({
            "from": "AyurGen <consultation@resend.dev>",
            "to": ["ananya@example.com"],
            "subject": "Consultation Confirmed with Dr. Ritu Verma - Tuesday, July 1, 2025"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "email_abc123"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let harness = TestHarness::with_email(&mock_server.uri());

    let response = harness
        .server
        .post("/v1/consultations/email")
        .add_header("authorization", harness.user_auth_header())
        .json(&booking())
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["email_id"], "email_abc123");
    assert!(body["meeting_link"]
        .as_str()
        .unwrap()
        .contains("meet.jit.si/consultation-"));
}

#[tokio::test]
async fn explicit_meeting_link_is_preserved() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/emails"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "email_def456"
        })))
        .mount(&mock_server)
        .await;

    let harness = TestHarness::with_email(&mock_server.uri());

    let mut request = booking();
    request["meeting_link"] = json!("https://meet.vedawellness.app/room/42");

    let body: serde_json::Value = harness
        .server
        .post("/v1/consultations/email")
        .add_header("authorization", harness.user_auth_header())
        .json(&request)
        .await
        .json();

    assert_eq!(body["meeting_link"], "https://meet.vedawellness.app/room/42");
}

#[tokio::test]
async fn provider_failure_maps_to_bad_gateway() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/emails"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "message": "internal provider error"
        })))
        .mount(&mock_server)
        .await;

    let harness = TestHarness::with_email(&mock_server.uri());

    let response = harness
        .server
        .post("/v1/consultations/email")
        .add_header("authorization", harness.user_auth_header())
        .json(&booking())
        .await;

    response.assert_status(axum::http::StatusCode::BAD_GATEWAY);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["code"], "external_service_error");
}

#[tokio::test]
async fn email_without_auth_fails() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .post("/v1/consultations/email")
        .json(&booking())
        .await;

    response.assert_status_unauthorized();
}
