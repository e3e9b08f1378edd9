use std::sync::Arc;

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

use appointment_cell::router::appointment_routes;
use doctor_cell::router::doctor_routes;
use faq_cell::router::faq_routes;
use patient_cell::router::patient_routes;
use shared_database::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(|| async { "Hospital Receptionist API is running!" }))
        .nest("/api", api_routes(state))
}

fn api_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .merge(patient_routes(state.clone()))
        .merge(doctor_routes(state.clone()))
        .merge(appointment_routes(state.clone()))
        .merge(faq_routes(state))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "message": "Hospital Receptionist API is running"
    }))
}
