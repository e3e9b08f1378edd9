// libs/patient-cell/src/models.rs
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterPatientRequest {
    pub name: Option<String>,
    pub dob: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum PatientError {
    #[error("Patient not found")]
    NotFound,

    #[error("Storage error: {0}")]
    Storage(String),
}
