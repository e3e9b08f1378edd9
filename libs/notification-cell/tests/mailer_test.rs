use std::sync::Arc;
use std::time::Duration;

use tempfile::tempdir;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use notification_cell::models::{AppointmentNotice, NoticeKind};
use notification_cell::services::{Mailer, NotificationService};
use shared_database::AppState;
use shared_utils::test_utils::{seed_datastore, TestConfig, TestData};

fn notice() -> AppointmentNotice {
    AppointmentNotice {
        patient_id: "P001".to_string(),
        patient_name: "Jane Doe".to_string(),
        patient_email: "jane@example.com".to_string(),
        doctor: "Dr. Alice Morgan".to_string(),
        date: "2031-05-20".to_string(),
        time: "10:00".to_string(),
    }
}

#[tokio::test]
async fn mailer_posts_message_with_bearer_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/messages"))
        .and(header("Authorization", "Bearer test-token"))
        .and(body_partial_json(serde_json::json!({
            "from": "frontdesk@clinic.example",
            "to": "jane@example.com",
            "subject": "Appointment Booking Confirmation",
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let mut config = TestConfig::new(dir.path()).to_app_config();
    config.mail_api_url = server.uri();
    config.mail_api_token = "test-token".to_string();
    config.mail_sender = "frontdesk@clinic.example".to_string();

    let mailer = Mailer::new(&config);
    mailer
        .send("jane@example.com", "Appointment Booking Confirmation", "body")
        .await
        .unwrap();
}

#[tokio::test]
async fn mailer_reports_api_failures() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/messages"))
        .respond_with(ResponseTemplate::new(500).set_body_string("smtp relay down"))
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let mut config = TestConfig::new(dir.path()).to_app_config();
    config.mail_api_url = server.uri();
    config.mail_api_token = "test-token".to_string();
    config.mail_sender = "frontdesk@clinic.example".to_string();

    let mailer = Mailer::new(&config);
    let err = mailer.send("jane@example.com", "subject", "body").await.unwrap_err();
    assert!(err.to_string().contains("Mail API error"));
}

#[tokio::test]
async fn dispatch_sends_patient_and_doctor_mail() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/messages"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let store = seed_datastore(dir.path(), &TestData::default()).await;
    let mut config = TestConfig::new(dir.path()).to_app_config();
    config.mail_api_url = server.uri();
    config.mail_api_token = "test-token".to_string();
    config.mail_sender = "frontdesk@clinic.example".to_string();

    let state = Arc::new(AppState { config, store });
    let service = NotificationService::new(&state);

    service.dispatch(NoticeKind::Booking, notice());

    // Delivery runs on spawned tasks; poll the mock until both arrive.
    for _ in 0..50 {
        if server.received_requests().await.unwrap_or_default().len() >= 2 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2, "expected patient and doctor mail");

    let bodies: Vec<serde_json::Value> = requests
        .iter()
        .map(|r| serde_json::from_slice(&r.body).unwrap())
        .collect();
    let recipients: Vec<&str> = bodies.iter().map(|b| b["to"].as_str().unwrap()).collect();
    assert!(recipients.contains(&"jane@example.com"));
    assert!(recipients.contains(&"alice.morgan@clinic.example"));
}

#[tokio::test]
async fn dispatch_skips_invalid_patient_address() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/messages"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let store = seed_datastore(dir.path(), &TestData::default()).await;
    let mut config = TestConfig::new(dir.path()).to_app_config();
    config.mail_api_url = server.uri();
    config.mail_api_token = "test-token".to_string();
    config.mail_sender = "frontdesk@clinic.example".to_string();

    let state = Arc::new(AppState { config, store });
    let service = NotificationService::new(&state);

    let mut bad_notice = notice();
    bad_notice.patient_email = "not-an-address".to_string();
    service.dispatch(NoticeKind::Cancellation, bad_notice);

    for _ in 0..50 {
        if !server.received_requests().await.unwrap_or_default().is_empty() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    // Only the doctor mail goes out.
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["to"], "alice.morgan@clinic.example");
}

#[tokio::test]
async fn dispatch_is_a_noop_when_mail_unconfigured() {
    let dir = tempdir().unwrap();
    let store = seed_datastore(dir.path(), &TestData::default()).await;
    let config = TestConfig::new(dir.path()).to_app_config();

    let state = Arc::new(AppState { config, store });
    let service = NotificationService::new(&state);

    // Nothing to assert beyond "does not panic / does not hang": the mail
    // gate short-circuits before any network client is built.
    service.dispatch(NoticeKind::Booking, notice());
}
