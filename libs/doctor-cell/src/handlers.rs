// libs/doctor-cell/src/handlers.rs
use std::sync::Arc;

use axum::{extract::State, Json};
use serde_json::{json, Value};

use shared_database::AppState;
use shared_models::error::{required, AppError};

use crate::models::DoctorSuggestionRequest;
use crate::services::matching::SpecialtyMatchService;

/// Suggest a specialist for a symptom description. Misses are part of the
/// contract: they answer 200 with an `error` field, not a failure status.
#[axum::debug_handler]
pub async fn suggest_doctor(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DoctorSuggestionRequest>,
) -> Result<Json<Value>, AppError> {
    let symptom = required(request.symptom, "symptom")?;

    let service = SpecialtyMatchService::new(&state);
    match service.suggest_doctor(&symptom) {
        Ok(suggestion) => Ok(Json(json!(suggestion))),
        Err(err) => Ok(Json(json!({ "error": err.to_string() }))),
    }
}

#[axum::debug_handler]
pub async fn list_doctors(State(state): State<Arc<AppState>>) -> Result<Json<Value>, AppError> {
    let service = SpecialtyMatchService::new(&state);

    Ok(Json(json!({
        "success": true,
        "doctors": service.roster()
    })))
}
