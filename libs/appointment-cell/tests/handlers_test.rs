use std::sync::Arc;

use assert_matches::assert_matches;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tempfile::tempdir;

use appointment_cell::handlers;
use appointment_cell::models::{
    BookAppointmentRequest, CancelAppointmentRequest, RescheduleAppointmentRequest,
};
use shared_database::AppState;
use shared_models::error::AppError;
use shared_utils::test_utils::{
    booked_slot, doctor, future_slot, patient, seed_datastore, TestConfig, TestData,
};

async fn state() -> (tempfile::TempDir, Arc<AppState>) {
    let dir = tempdir().unwrap();
    let data = TestData {
        patients: vec![patient("P001", "Jane Doe", "jane@example.com")],
        doctors: vec![doctor("Dr. Smith", "General Medicine", "smith@clinic.example")],
        slots: vec![
            booked_slot("Dr. Smith", 1, "P001", "Jane Doe"),
            future_slot("Dr. Smith", 2),
        ],
        ..TestData::default()
    };
    let store = seed_datastore(dir.path(), &data).await;
    let config = TestConfig::new(dir.path()).to_app_config();
    (dir, Arc::new(AppState { config, store }))
}

#[tokio::test]
async fn book_handler_rejects_missing_fields() {
    let (_dir, state) = state().await;

    let request = BookAppointmentRequest {
        patient_id: None,
        doctor_name: Some("Dr. Smith".to_string()),
        payment_confirmed: true,
    };

    let err = handlers::book_appointment(State(state), Json(request))
        .await
        .unwrap_err();
    assert_matches!(err, AppError::ValidationError(msg) if msg == "Missing required field: patient_id");
}

#[tokio::test]
async fn book_handler_answers_payment_required_with_400() {
    let (_dir, state) = state().await;

    let request = BookAppointmentRequest {
        patient_id: Some("P001".to_string()),
        doctor_name: Some("Dr. Smith".to_string()),
        payment_confirmed: false,
    };

    let (status, Json(body)) = handlers::book_appointment(State(state), Json(request))
        .await
        .unwrap();

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Payment confirmation required");
    assert!(body["payment_details"]
        .as_str()
        .unwrap()
        .contains("consultation fee"));
}

#[tokio::test]
async fn book_handler_returns_appointment_payload() {
    let (_dir, state) = state().await;

    let request = BookAppointmentRequest {
        patient_id: Some("P001".to_string()),
        doctor_name: Some("Dr Smth".to_string()),
        payment_confirmed: true,
    };

    let (status, Json(body)) = handlers::book_appointment(State(state), Json(request))
        .await
        .unwrap();

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["appointment"]["doctor"], "Dr. Smith");
    assert_eq!(body["appointment"]["patient_id"], "P001");
}

#[tokio::test]
async fn cancel_handler_maps_unknown_patient_to_404() {
    let (_dir, state) = state().await;

    let request = CancelAppointmentRequest {
        name: Some("Nobody".to_string()),
    };

    let err = handlers::cancel_appointment(State(state), Json(request))
        .await
        .unwrap_err();
    assert_matches!(err, AppError::NotFound(msg) if msg == "Patient not found");
}

#[tokio::test]
async fn reschedule_handler_maps_bad_index_to_400() {
    let (_dir, state) = state().await;

    let request = RescheduleAppointmentRequest {
        name: Some("Jane Doe".to_string()),
        slot_index: Some(99),
        new_doctor: None,
    };

    let err = handlers::reschedule_appointment(State(state), Json(request))
        .await
        .unwrap_err();
    assert_matches!(err, AppError::BadRequest(msg) if msg == "Invalid slot selection");
}

#[tokio::test]
async fn appointments_handler_lists_patient_bookings() {
    let (_dir, state) = state().await;

    let Json(body) = handlers::patient_appointments(State(state), Path("jane doe".to_string()))
        .await
        .unwrap();

    assert_eq!(body["success"], true);
    assert_eq!(body["appointments"].as_array().unwrap().len(), 1);
}
