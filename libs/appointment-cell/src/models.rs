// libs/appointment-cell/src/models.rs
use serde::{Deserialize, Serialize};

use shared_models::records::AppointmentSlot;

/// Wire-transfer instructions quoted back whenever a booking arrives without
/// a confirmed payment.
pub const PAYMENT_INSTRUCTIONS: &str =
    "Please send the consultation fee to Bank Account 1234-5678-9012 at XYZ Bank.";

// ==============================================================================
// REQUEST MODELS
// ==============================================================================

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct BookAppointmentRequest {
    pub patient_id: Option<String>,
    pub doctor_name: Option<String>,
    #[serde(default)]
    pub payment_confirmed: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CancelAppointmentRequest {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RescheduleSlotsRequest {
    pub name: Option<String>,
    pub doctor_name: Option<String>,
    #[serde(default = "default_true")]
    pub same_doctor: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RescheduleAppointmentRequest {
    pub name: Option<String>,
    pub slot_index: Option<usize>,
    pub new_doctor: Option<String>,
}

// ==============================================================================
// RESULT MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct AppointmentDetail {
    pub patient_name: String,
    pub patient_id: String,
    pub date: String,
    pub time: String,
    pub doctor: String,
}

/// What a booking attempt came back with. Only `Booked` changed any state;
/// the other variants are valid workflow answers, not errors.
#[derive(Debug, Clone)]
pub enum BookingOutcome {
    Booked(AppointmentDetail),
    PaymentRequired,
    DoctorNotRecognized {
        requested: String,
        available_doctors: Vec<String>,
    },
    NoFutureSlots {
        requested: String,
        available_doctors: Vec<String>,
    },
}

/// Candidate slots offered for a reschedule, selected later by index.
#[derive(Debug, Clone, Serialize)]
pub struct RescheduleOptions {
    pub current_appointment: AppointmentSlot,
    pub available_slots: Vec<AppointmentSlot>,
    pub doctor: String,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum AppointmentError {
    #[error("Patient not found")]
    PatientNotFound,

    #[error("No active appointment found")]
    NoActiveAppointment,

    #[error("No previous appointment found to reschedule")]
    NothingToReschedule,

    #[error("No available future slots for {doctor}")]
    NoSlotsForDoctor { doctor: String },

    #[error("Invalid slot selection")]
    InvalidSlotSelection,

    #[error("Storage error: {0}")]
    Storage(String),
}
