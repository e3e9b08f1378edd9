// libs/patient-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

use shared_database::AppState;
use shared_models::error::{required, AppError};

use crate::models::{PatientError, RegisterPatientRequest};
use crate::services::PatientService;

#[axum::debug_handler]
pub async fn register_patient(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RegisterPatientRequest>,
) -> Result<Json<Value>, AppError> {
    let name = required(request.name, "name")?;
    let dob = required(request.dob, "dob")?;
    let address = required(request.address, "address")?;
    let phone = required(request.phone, "phone")?;
    let email = required(request.email, "email")?;

    let service = PatientService::new(&state);
    let patient_id = service
        .register(&name, &dob, &address, &phone, &email)
        .await
        .map_err(|e| AppError::Storage(e.to_string()))?;

    Ok(Json(json!({
        "success": true,
        "message": "Patient registered successfully",
        "patient_id": patient_id
    })))
}

#[axum::debug_handler]
pub async fn get_patient(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<Value>, AppError> {
    let service = PatientService::new(&state);

    let patient = service.find_by_name(&name).await.map_err(|e| match e {
        PatientError::NotFound => AppError::NotFound("Patient not found".to_string()),
        PatientError::Storage(msg) => AppError::Storage(msg),
    })?;

    Ok(Json(json!({
        "success": true,
        "patient": patient
    })))
}
