// libs/doctor-cell/src/models.rs
use serde::{Deserialize, Serialize};

use shared_models::records::Doctor;

#[derive(Debug, Clone, Deserialize)]
pub struct DoctorSuggestionRequest {
    pub symptom: Option<String>,
}

/// A resolved symptom: the specialty it mapped to and the first doctor
/// practising it.
#[derive(Debug, Clone, Serialize)]
pub struct DoctorSuggestion {
    pub specialty: String,
    pub doctor: Doctor,
}

#[derive(Debug, Clone, Serialize, Deserialize, thiserror::Error)]
pub enum DoctorError {
    #[error("Sorry, we couldn't find a doctor for your condition. Please try describing it differently.")]
    NoConditionMatch,

    #[error("No {specialty} available in our system.")]
    SpecialtyNotAvailable { specialty: String },
}
