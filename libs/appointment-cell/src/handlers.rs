// libs/appointment-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use shared_database::AppState;
use shared_models::error::{required, AppError};

use crate::models::{
    AppointmentError, BookAppointmentRequest, BookingOutcome, CancelAppointmentRequest,
    RescheduleAppointmentRequest, RescheduleSlotsRequest, PAYMENT_INSTRUCTIONS,
};
use crate::services::booking::AppointmentBookingService;

// ==============================================================================
// BOOKING HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn book_appointment(
    State(state): State<Arc<AppState>>,
    Json(request): Json<BookAppointmentRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let patient_id = required(request.patient_id, "patient_id")?;
    let doctor_name = required(request.doctor_name, "doctor_name")?;

    let service = AppointmentBookingService::new(&state);

    let outcome = service
        .book_appointment(&patient_id, &doctor_name, request.payment_confirmed)
        .await
        .map_err(|e| match e {
            AppointmentError::PatientNotFound => AppError::BadRequest("Patient not found".to_string()),
            AppointmentError::Storage(msg) => AppError::Storage(msg),
            other => AppError::Internal(other.to_string()),
        })?;

    let response = match outcome {
        BookingOutcome::Booked(appointment) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "message": "Appointment booked successfully",
                "appointment": appointment
            })),
        ),
        BookingOutcome::PaymentRequired => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "success": false,
                "message": "Payment confirmation required",
                "payment_details": PAYMENT_INSTRUCTIONS
            })),
        ),
        BookingOutcome::DoctorNotRecognized { requested, available_doctors } => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "success": false,
                "message": format!(
                    "No close match found for doctor name '{}'. Please try again.",
                    requested
                ),
                "available_doctors": available_doctors
            })),
        ),
        BookingOutcome::NoFutureSlots { requested, available_doctors } => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "success": false,
                "message": format!(
                    "No future slots are available for {} at the moment.",
                    requested
                ),
                "available_doctors": available_doctors
            })),
        ),
    };

    Ok(response)
}

#[axum::debug_handler]
pub async fn cancel_appointment(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CancelAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let name = required(request.name, "name")?;

    let service = AppointmentBookingService::new(&state);

    let cancelled = service.cancel_appointment(&name).await.map_err(|e| match e {
        AppointmentError::PatientNotFound | AppointmentError::NoActiveAppointment => {
            AppError::NotFound(e.to_string())
        }
        AppointmentError::Storage(msg) => AppError::Storage(msg),
        other => AppError::Internal(other.to_string()),
    })?;

    Ok(Json(json!({
        "success": true,
        "message": "Appointment cancelled successfully",
        "cancelled_appointment": cancelled
    })))
}

// ==============================================================================
// RESCHEDULE HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn reschedule_slots(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RescheduleSlotsRequest>,
) -> Result<Json<Value>, AppError> {
    let name = required(request.name, "name")?;
    let doctor_name = required(request.doctor_name, "doctor_name")?;

    let service = AppointmentBookingService::new(&state);

    let options = service
        .reschedule_slots(&name, &doctor_name, request.same_doctor)
        .await
        .map_err(|e| match e {
            AppointmentError::PatientNotFound
            | AppointmentError::NothingToReschedule
            | AppointmentError::NoSlotsForDoctor { .. } => AppError::NotFound(e.to_string()),
            AppointmentError::Storage(msg) => AppError::Storage(msg),
            other => AppError::Internal(other.to_string()),
        })?;

    Ok(Json(json!({
        "success": true,
        "current_appointment": options.current_appointment,
        "available_slots": options.available_slots,
        "doctor": options.doctor
    })))
}

#[axum::debug_handler]
pub async fn reschedule_appointment(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RescheduleAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let name = required(request.name, "name")?;
    let slot_index = required(request.slot_index, "slot_index")?;

    let service = AppointmentBookingService::new(&state);

    let appointment = service
        .reschedule_appointment(&name, slot_index, request.new_doctor.as_deref())
        .await
        .map_err(|e| match e {
            AppointmentError::PatientNotFound
            | AppointmentError::NothingToReschedule
            | AppointmentError::InvalidSlotSelection => AppError::BadRequest(e.to_string()),
            AppointmentError::Storage(msg) => AppError::Storage(msg),
            other => AppError::Internal(other.to_string()),
        })?;

    Ok(Json(json!({
        "success": true,
        "message": "Appointment rescheduled successfully",
        "new_appointment": appointment
    })))
}

// ==============================================================================
// LISTING HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn available_slots(State(state): State<Arc<AppState>>) -> Result<Json<Value>, AppError> {
    let service = AppointmentBookingService::new(&state);
    let slots = service.available_slots().await;

    Ok(Json(json!({
        "success": true,
        "available_slots": slots
    })))
}

#[axum::debug_handler]
pub async fn patient_appointments(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<Value>, AppError> {
    let service = AppointmentBookingService::new(&state);

    let appointments = service.patient_appointments(&name).await.map_err(|e| match e {
        AppointmentError::PatientNotFound => AppError::NotFound("Patient not found".to_string()),
        AppointmentError::Storage(msg) => AppError::Storage(msg),
        other => AppError::Internal(other.to_string()),
    })?;

    Ok(Json(json!({
        "success": true,
        "appointments": appointments
    })))
}
