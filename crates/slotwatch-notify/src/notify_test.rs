use chrono::{NaiveDate, Utc};
use wiremock::matchers::{bearer_token, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use slotwatch_core::types::{CenterType, LocationRecord};
use slotwatch_core::{MatchResult, NotifyConfig};

use super::*;
use crate::message::{match_body, match_subject};

fn sample_match() -> MatchResult {
    MatchResult {
        record: LocationRecord {
            location_id: "193".to_string(),
            location_name: "Perth".to_string(),
            full_address: "Level 3,\n2 Mill Street,\nPerth".to_string(),
            distance: "4 km".to_string(),
            availability_text: "Saturday 23/08/2025\n03:00 PM".to_string(),
            coordinates: "-31.9548200,115.8526330".to_string(),
            center_type: CenterType::BupaCentre,
            has_available_slots: true,
            extracted_at: Utc::now(),
        },
        availability_date: NaiveDate::from_ymd_opt(2025, 8, 23).unwrap(),
    }
}

fn config_for(server: &MockServer) -> NotifyConfig {
    NotifyConfig {
        api_url: format!("{}/send", server.uri()),
        api_token: "test-token".to_string(),
        email_to: "operator@example.com".to_string(),
        email_from: "slotwatch@localhost".to_string(),
    }
}

#[test]
fn subject_carries_the_match_count() {
    assert_eq!(match_subject(1), "Appointment alert: 1 matching slot found");
    assert_eq!(match_subject(3), "Appointment alert: 3 matching slots found");
}

#[test]
fn body_lists_match_details_and_booking_url() {
    let cutoff = NaiveDate::from_ymd_opt(2025, 8, 29).unwrap();
    let body = match_body(&[sample_match()], cutoff, "https://example.invalid/oasis");

    assert!(body.contains("Perth (4 km)"));
    assert!(body.contains("Saturday 23/08/2025 03:00 PM"));
    assert!(body.contains("2025-08-23"));
    assert!(body.contains("Level 3, 2 Mill Street, Perth"));
    assert!(body.contains("Bupa Centre"));
    assert!(body.contains("Cutoff date: 2025-08-29"));
    assert!(body.contains("https://example.invalid/oasis"));
}

#[tokio::test]
async fn posts_message_with_bearer_auth() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/send"))
        .and(bearer_token("test-token"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let notifier = Notifier::new(config_for(&server)).unwrap();
    let cutoff = NaiveDate::from_ymd_opt(2025, 8, 29).unwrap();
    notifier
        .send_match_notification(&[sample_match()], cutoff, "https://example.invalid/oasis")
        .await
        .unwrap();
}

#[tokio::test]
async fn message_payload_has_expected_shape() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let notifier = Notifier::new(config_for(&server)).unwrap();
    let cutoff = NaiveDate::from_ymd_opt(2025, 8, 29).unwrap();
    notifier
        .send_match_notification(&[sample_match()], cutoff, "https://example.invalid/oasis")
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let request: &Request = &requests[0];
    let payload: serde_json::Value = serde_json::from_slice(&request.body).unwrap();

    assert_eq!(payload["message"]["to"], "operator@example.com");
    assert_eq!(payload["message"]["from"], "slotwatch@localhost");
    assert_eq!(
        payload["message"]["subject"],
        "Appointment alert: 1 matching slot found"
    );
    assert!(payload["message"]["body"]
        .as_str()
        .unwrap()
        .contains("Perth"));
}

#[tokio::test]
async fn empty_match_set_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let notifier = Notifier::new(config_for(&server)).unwrap();
    let cutoff = NaiveDate::from_ymd_opt(2025, 8, 29).unwrap();
    notifier
        .send_match_notification(&[], cutoff, "https://example.invalid/oasis")
        .await
        .unwrap();
}

#[tokio::test]
async fn non_2xx_is_an_unexpected_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let notifier = Notifier::new(config_for(&server)).unwrap();
    let cutoff = NaiveDate::from_ymd_opt(2025, 8, 29).unwrap();
    let result = notifier
        .send_match_notification(&[sample_match()], cutoff, "https://example.invalid/oasis")
        .await;

    assert!(
        matches!(result, Err(NotifyError::UnexpectedStatus { status: 502 })),
        "expected UnexpectedStatus(502), got: {result:?}"
    );
}

#[tokio::test]
async fn test_message_posts_once() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(bearer_token("test-token"))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;

    let notifier = Notifier::new(config_for(&server)).unwrap();
    notifier.send_test_message().await.unwrap();
}
